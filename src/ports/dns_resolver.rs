//! DNS resolution port.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::utilities::dns::RecordType;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DnsLookupError {
    /// The name exists but has no records of the requested type, or does not
    /// exist at all.
    #[error("no records found")]
    NoRecords,

    #[error("lookup failed: {0}")]
    Failed(String),
}

/// Resolves one record type for a domain.
///
/// Values are rendered as text: addresses in canonical form, MX as
/// `priority host`, TXT segments concatenated, names without the root dot.
#[async_trait]
pub trait DnsResolver: Send + Sync {
    async fn lookup(&self, domain: &str, record_type: RecordType)
        -> Result<Vec<String>, DnsLookupError>;
}
