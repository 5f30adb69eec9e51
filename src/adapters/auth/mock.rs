//! Mock authentication adapters for testing.
//!
//! Lets router tests authenticate with fixed tokens instead of signing JWTs.
//!
//! # Example
//!
//! ```ignore
//! use tool_hub::adapters::auth::MockSessionValidator;
//! use tool_hub::domain::foundation::{AuthenticatedUser, Role, UserId};
//!
//! let validator = MockSessionValidator::new()
//!     .with_user("admin-token", AuthenticatedUser::new(UserId::new(), "admin", vec![Role::Admin]));
//!
//! let result = validator.validate("admin-token").await;
//! assert!(result.is_ok());
//! ```

use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;

use crate::domain::foundation::{AuthError, AuthenticatedUser, Role, UserId};
use crate::ports::SessionValidator;

/// Mock session validator for testing.
///
/// Stores a map of tokens to users. Tokens not in the map return `InvalidToken`.
#[derive(Debug, Default)]
pub struct MockSessionValidator {
    tokens: RwLock<HashMap<String, AuthenticatedUser>>,
    /// Returned for every validation when set.
    force_error: RwLock<Option<AuthError>>,
}

fn read<T>(lock: &RwLock<T>) -> RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn write<T>(lock: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl MockSessionValidator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a valid token that maps to a user.
    pub fn with_user(self, token: impl Into<String>, user: AuthenticatedUser) -> Self {
        self.add_token(token, user);
        self
    }

    /// Adds a valid token for a fresh user with the given username and role.
    pub fn with_test_user(self, token: impl Into<String>, username: &str, role: Role) -> Self {
        let user = AuthenticatedUser::new(UserId::new(), username, vec![role]);
        self.with_user(token, user)
    }

    /// Forces all validations to return the specified error.
    pub fn with_error(self, error: AuthError) -> Self {
        *write(&self.force_error) = Some(error);
        self
    }

    pub fn add_token(&self, token: impl Into<String>, user: AuthenticatedUser) {
        write(&self.tokens).insert(token.into(), user);
    }

    pub fn remove_token(&self, token: &str) {
        write(&self.tokens).remove(token);
    }

    pub fn token_count(&self) -> usize {
        read(&self.tokens).len()
    }
}

#[async_trait]
impl SessionValidator for MockSessionValidator {
    async fn validate(&self, token: &str) -> Result<AuthenticatedUser, AuthError> {
        if let Some(error) = read(&self.force_error).clone() {
            return Err(error);
        }

        read(&self.tokens)
            .get(token)
            .cloned()
            .ok_or(AuthError::InvalidToken)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn known_token_validates() {
        let validator = MockSessionValidator::new().with_test_user("t", "alice", Role::User);
        let user = validator.validate("t").await.unwrap();
        assert_eq!(user.username, "alice");
        assert!(!user.is_admin());
    }

    #[tokio::test]
    async fn unknown_token_is_invalid() {
        let validator = MockSessionValidator::new();
        assert_eq!(validator.validate("nope").await, Err(AuthError::InvalidToken));
    }

    #[tokio::test]
    async fn forced_error_wins() {
        let validator = MockSessionValidator::new()
            .with_test_user("t", "alice", Role::User)
            .with_error(AuthError::TokenExpired);
        assert_eq!(validator.validate("t").await, Err(AuthError::TokenExpired));
    }

    #[tokio::test]
    async fn removed_token_stops_working() {
        let validator = MockSessionValidator::new().with_test_user("t", "alice", Role::User);
        validator.remove_token("t");
        assert_eq!(validator.token_count(), 0);
        assert!(validator.validate("t").await.is_err());
    }
}
