//! DnsLookup - Resolves every supported record type concurrently.

use futures::future::join_all;
use std::sync::Arc;

use crate::domain::foundation::DomainError;
use crate::domain::utilities::dns::{normalize_domain, DnsReport, RecordType};
use crate::ports::{DnsLookupError, DnsResolver};

pub struct DnsLookupHandler {
    resolver: Arc<dyn DnsResolver>,
}

impl DnsLookupHandler {
    pub fn new(resolver: Arc<dyn DnsResolver>) -> Self {
        Self { resolver }
    }

    /// Record types that fail individually come back empty.
    pub async fn handle(&self, domain: &str) -> Result<DnsReport, DomainError> {
        let domain = normalize_domain(domain)?;

        let lookups = RecordType::ALL.map(|record_type| {
            let resolver = self.resolver.clone();
            let domain = domain.clone();
            async move { (record_type, resolver.lookup(&domain, record_type).await) }
        });

        let mut report = DnsReport::new(domain.clone());
        for (record_type, result) in join_all(lookups).await {
            match result {
                Ok(values) => report.set(record_type, values),
                Err(DnsLookupError::NoRecords) => {}
                Err(DnsLookupError::Failed(reason)) => {
                    tracing::debug!(%domain, ?record_type, %reason, "DNS lookup failed");
                }
            }
        }
        Ok(report.finish())
    }
}
