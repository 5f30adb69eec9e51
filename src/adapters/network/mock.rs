//! Mock network adapters for testing.
//!
//! Let router and integration tests exercise the DNS and URL tester routes
//! without touching the network.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use crate::domain::utilities::dns::RecordType;
use crate::ports::{
    DnsLookupError, DnsResolver, HttpProbe, ProbeError, ProbeRequest, ProbeResponse,
};

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Resolver backed by a fixed record table. Unknown entries yield `NoRecords`.
#[derive(Debug, Default)]
pub struct MockDnsResolver {
    records: Mutex<HashMap<(String, RecordType), Vec<String>>>,
}

impl MockDnsResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records(
        self,
        domain: &str,
        record_type: RecordType,
        values: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        lock(&self.records).insert(
            (domain.to_string(), record_type),
            values.into_iter().map(Into::into).collect(),
        );
        self
    }
}

#[async_trait]
impl DnsResolver for MockDnsResolver {
    async fn lookup(
        &self,
        domain: &str,
        record_type: RecordType,
    ) -> Result<Vec<String>, DnsLookupError> {
        lock(&self.records)
            .get(&(domain.to_string(), record_type))
            .cloned()
            .ok_or(DnsLookupError::NoRecords)
    }
}

/// Probe that answers every request with one canned outcome and remembers
/// what it was asked.
#[derive(Debug)]
pub struct MockHttpProbe {
    outcome: Result<ProbeResponse, ProbeError>,
    requests: Mutex<Vec<ProbeRequest>>,
}

impl MockHttpProbe {
    pub fn responding(response: ProbeResponse) -> Self {
        Self {
            outcome: Ok(response),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// `200 OK` with an empty body and no headers.
    pub fn ok() -> Self {
        Self::responding(ProbeResponse {
            status: 200,
            status_text: "OK".to_string(),
            headers: Default::default(),
            body: String::new(),
            truncated: false,
            elapsed_ms: 1,
        })
    }

    pub fn failing(error: ProbeError) -> Self {
        Self {
            outcome: Err(error),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<ProbeRequest> {
        lock(&self.requests).clone()
    }
}

impl Default for MockHttpProbe {
    fn default() -> Self {
        Self::ok()
    }
}

#[async_trait]
impl HttpProbe for MockHttpProbe {
    async fn send(&self, request: ProbeRequest) -> Result<ProbeResponse, ProbeError> {
        lock(&self.requests).push(request);
        self.outcome.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use url::Url;

    #[tokio::test]
    async fn resolver_returns_configured_records_only() {
        let resolver =
            MockDnsResolver::new().with_records("example.com", RecordType::A, ["93.184.216.34"]);

        assert_eq!(
            resolver.lookup("example.com", RecordType::A).await.unwrap(),
            vec!["93.184.216.34".to_string()]
        );
        assert_eq!(
            resolver.lookup("example.com", RecordType::Mx).await,
            Err(DnsLookupError::NoRecords)
        );
    }

    #[tokio::test]
    async fn probe_records_requests() {
        let probe = MockHttpProbe::failing(ProbeError::Timeout(10));
        let url = Url::parse("https://example.com").unwrap();

        let result = probe.send(ProbeRequest::get(url.clone())).await;

        assert_eq!(result, Err(ProbeError::Timeout(10)));
        assert_eq!(probe.requests()[0].url, url);
    }
}
