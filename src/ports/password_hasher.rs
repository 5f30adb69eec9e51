//! Password hashing port.

use async_trait::async_trait;

use crate::domain::foundation::DomainError;

/// One-way password hashing.
///
/// Implementations are expected to be slow on purpose and must not block the
/// async executor.
#[async_trait]
pub trait PasswordHasher: Send + Sync {
    async fn hash(&self, password: &str) -> Result<String, DomainError>;

    /// `Ok(false)` for a wrong password; `Err` only for a corrupt hash or an
    /// internal failure.
    async fn verify(&self, password: &str, hash: &str) -> Result<bool, DomainError>;

    /// Does the work of a `verify` against a throwaway hash of the same
    /// cost. Login calls this when no account matches, so unknown and known
    /// accounts take equally long to refuse.
    async fn verify_unknown_account(&self, password: &str) -> Result<(), DomainError>;
}
