//! DnsResolver backed by hickory-resolver.

use async_trait::async_trait;
use hickory_resolver::config::{ResolverConfig, ResolverOpts};
use hickory_resolver::error::ResolveErrorKind;
use hickory_resolver::proto::rr::{RData, RecordType as WireType};
use hickory_resolver::TokioAsyncResolver;

use crate::domain::utilities::dns::{format_mx, RecordType};
use crate::ports::{DnsLookupError, DnsResolver};

pub struct HickoryDnsResolver {
    resolver: TokioAsyncResolver,
}

impl HickoryDnsResolver {
    /// Uses the host's resolver configuration, falling back to public
    /// resolvers when it cannot be read.
    pub fn from_system() -> Self {
        let resolver = TokioAsyncResolver::tokio_from_system_conf().unwrap_or_else(|e| {
            tracing::warn!("System DNS configuration unavailable ({}); using defaults", e);
            TokioAsyncResolver::tokio(ResolverConfig::default(), ResolverOpts::default())
        });
        Self { resolver }
    }
}

fn wire_type(record_type: RecordType) -> WireType {
    match record_type {
        RecordType::A => WireType::A,
        RecordType::Aaaa => WireType::AAAA,
        RecordType::Mx => WireType::MX,
        RecordType::Txt => WireType::TXT,
        RecordType::Ns => WireType::NS,
        RecordType::Cname => WireType::CNAME,
    }
}

fn without_root(name: impl ToString) -> String {
    name.to_string().trim_end_matches('.').to_string()
}

fn render(data: &RData) -> Option<String> {
    match data {
        RData::A(ip) => Some(ip.to_string()),
        RData::AAAA(ip) => Some(ip.to_string()),
        RData::MX(mx) => Some(format_mx(mx.preference(), &mx.exchange().to_string())),
        RData::TXT(txt) => Some(
            txt.txt_data()
                .iter()
                .map(|segment| String::from_utf8_lossy(segment).into_owned())
                .collect::<String>(),
        ),
        RData::NS(ns) => Some(without_root(ns)),
        RData::CNAME(cname) => Some(without_root(cname)),
        _ => None,
    }
}

#[async_trait]
impl DnsResolver for HickoryDnsResolver {
    async fn lookup(
        &self,
        domain: &str,
        record_type: RecordType,
    ) -> Result<Vec<String>, DnsLookupError> {
        let fqdn = format!("{}.", domain.trim_end_matches('.'));
        let wanted = wire_type(record_type);
        let lookup = self
            .resolver
            .lookup(fqdn.as_str(), wanted)
            .await
            .map_err(|e| match e.kind() {
                ResolveErrorKind::NoRecordsFound { .. } => DnsLookupError::NoRecords,
                _ => DnsLookupError::Failed(e.to_string()),
            })?;

        // CNAME chains come back alongside the final records; keep only the
        // requested type.
        Ok(lookup
            .record_iter()
            .filter(|record| record.record_type() == wanted)
            .filter_map(|record| record.data().and_then(render))
            .collect())
    }
}

impl std::fmt::Debug for HickoryDnsResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HickoryDnsResolver").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hickory_resolver::proto::rr::rdata::{A, MX, TXT};
    use hickory_resolver::proto::rr::Name;
    use std::str::FromStr;

    #[test]
    fn renders_mx_without_root_dot() {
        let mx = RData::MX(MX::new(10, Name::from_str("mail.example.com.").unwrap()));
        assert_eq!(render(&mx).unwrap(), "10 mail.example.com");
    }

    #[test]
    fn renders_txt_segments_joined() {
        let txt = RData::TXT(TXT::new(vec!["v=spf1 ".into(), "-all".into()]));
        assert_eq!(render(&txt).unwrap(), "v=spf1 -all");
    }

    #[test]
    fn renders_a_record() {
        let a = RData::A(A::new(93, 184, 216, 34));
        assert_eq!(render(&a).unwrap(), "93.184.216.34");
    }
}
