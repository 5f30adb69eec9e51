//! Refresh token store port.

use async_trait::async_trait;

use crate::domain::account::RefreshToken;
use crate::domain::foundation::{DomainError, Timestamp, UserId};

/// Opaque refresh tokens, one row per issued token.
#[async_trait]
pub trait RefreshTokenRepository: Send + Sync {
    async fn save(&self, token: &RefreshToken) -> Result<(), DomainError>;

    async fn find(&self, token: &str) -> Result<Option<RefreshToken>, DomainError>;

    /// Returns `false` if the token did not exist.
    async fn delete(&self, token: &str) -> Result<bool, DomainError>;

    /// Revokes every token of a user; returns how many were removed.
    async fn delete_for_user(&self, user_id: &UserId) -> Result<u64, DomainError>;

    async fn delete_expired(&self, now: Timestamp) -> Result<u64, DomainError>;
}
