//! Outbound HTTP port used by the URL tester.

use async_trait::async_trait;
use std::collections::BTreeMap;
use thiserror::Error;
use url::Url;

use crate::domain::utilities::http_check::HeaderMap;

/// A request already checked against the outbound target policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeRequest {
    pub method: &'static str,
    pub url: Url,
    pub headers: BTreeMap<String, String>,
    pub body: Option<String>,
}

impl ProbeRequest {
    pub fn get(url: Url) -> Self {
        Self {
            method: "GET",
            url,
            headers: BTreeMap::new(),
            body: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeResponse {
    pub status: u16,
    pub status_text: String,
    pub headers: HeaderMap,
    pub body: String,
    /// The body was cut at the configured limit.
    pub truncated: bool,
    pub elapsed_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProbeError {
    #[error("request timed out after {0} ms")]
    Timeout(u64),

    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("{0}")]
    Transport(String),
}

/// Sends a single HTTP request and captures the response.
///
/// Non-2xx responses are successes here; only transport failures are errors.
#[async_trait]
pub trait HttpProbe: Send + Sync {
    async fn send(&self, request: ProbeRequest) -> Result<ProbeResponse, ProbeError>;
}
