//! Errors raised by the stateless utilities.

use thiserror::Error;

use crate::domain::foundation::{DomainError, ErrorCode};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UtilityError {
    #[error("{field}: {reason}")]
    InvalidInput { field: &'static str, reason: String },

    #[error("Algorithm not supported: {0}")]
    UnsupportedAlgorithm(String),

    #[error("Invalid regular expression: {0}")]
    InvalidPattern(String),

    #[error("Target not allowed: {0}")]
    TargetNotAllowed(String),
}

impl UtilityError {
    pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            field,
            reason: reason.into(),
        }
    }
}

impl From<UtilityError> for DomainError {
    fn from(err: UtilityError) -> Self {
        match &err {
            UtilityError::InvalidInput { field, .. } => {
                DomainError::validation(*field, err.to_string())
            }
            UtilityError::UnsupportedAlgorithm(_) => {
                DomainError::new(ErrorCode::UnsupportedAlgorithm, err.to_string())
            }
            UtilityError::InvalidPattern(_) => {
                DomainError::validation("pattern", err.to_string())
            }
            UtilityError::TargetNotAllowed(_) => {
                DomainError::new(ErrorCode::TargetNotAllowed, err.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_to_domain_codes() {
        let err: DomainError = UtilityError::UnsupportedAlgorithm("CRC32".into()).into();
        assert_eq!(err.code, ErrorCode::UnsupportedAlgorithm);

        let err: DomainError = UtilityError::invalid("length", "too long").into();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
        assert_eq!(err.details.get("field").map(String::as_str), Some("length"));

        let err: DomainError = UtilityError::InvalidPattern("unclosed group".into()).into();
        assert_eq!(err.details.get("field").map(String::as_str), Some("pattern"));
    }
}
