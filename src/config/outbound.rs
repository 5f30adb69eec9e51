//! Outbound HTTP configuration for the URL tester and header check

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

#[derive(Debug, Clone, Deserialize)]
pub struct OutboundConfig {
    /// Per-request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Response bodies are truncated to this many bytes
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,

    /// Permit loopback, private and link-local targets
    #[serde(default)]
    pub allow_private_targets: bool,
}

impl OutboundConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.timeout_secs == 0 || self.timeout_secs > 60 {
            return Err(ValidationError::InvalidOutboundTimeout);
        }
        if self.max_body_bytes == 0 {
            return Err(ValidationError::InvalidBodyLimit);
        }
        Ok(())
    }
}

impl Default for OutboundConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout(),
            max_body_bytes: default_max_body_bytes(),
            allow_private_targets: false,
        }
    }
}

fn default_timeout() -> u64 {
    10
}

fn default_max_body_bytes() -> usize {
    1024 * 1024
}
