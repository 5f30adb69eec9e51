//! Access token ports.
//!
//! `SessionValidator` turns a presented access token into an
//! [`AuthenticatedUser`]; `AccessTokenIssuer` mints tokens at login and
//! refresh. The JWT adapter implements both.
//!
//! # Contract
//!
//! Validators must check the signature and the expiry claim and must never
//! consult the database; roles travel inside the token.

use async_trait::async_trait;

use crate::domain::account::User;
use crate::domain::foundation::{AuthError, AuthenticatedUser, DomainError, Timestamp};

/// Validates access tokens and extracts user identity.
///
/// HTTP middleware uses this for Bearer headers and the `token` cookie.
#[async_trait]
pub trait SessionValidator: Send + Sync {
    /// Validate an access token and return the authenticated user.
    ///
    /// # Returns
    ///
    /// * `Ok(AuthenticatedUser)` - Token is valid
    /// * `Err(AuthError::InvalidToken)` - Malformed token or bad signature
    /// * `Err(AuthError::TokenExpired)` - Signature valid but expired
    async fn validate(&self, token: &str) -> Result<AuthenticatedUser, AuthError>;
}

/// A freshly minted access token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedAccessToken {
    pub token: String,
    pub expires_at: Timestamp,
}

/// Mints access tokens for users.
pub trait AccessTokenIssuer: Send + Sync {
    fn issue(&self, user: &User) -> Result<IssuedAccessToken, DomainError>;

    /// Lifetime of issued tokens in seconds; used for the cookie `Max-Age`.
    fn ttl_secs(&self) -> u64;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{Role, UserId};
    use std::collections::HashMap;
    use std::sync::RwLock;

    /// Simple mock implementation for testing the trait
    struct TestSessionValidator {
        tokens: RwLock<HashMap<String, AuthenticatedUser>>,
    }

    impl TestSessionValidator {
        fn new() -> Self {
            Self {
                tokens: RwLock::new(HashMap::new()),
            }
        }

        fn add_valid_token(&self, token: &str, user: AuthenticatedUser) {
            self.tokens.write().unwrap().insert(token.to_string(), user);
        }
    }

    #[async_trait]
    impl SessionValidator for TestSessionValidator {
        async fn validate(&self, token: &str) -> Result<AuthenticatedUser, AuthError> {
            self.tokens
                .read()
                .unwrap()
                .get(token)
                .cloned()
                .ok_or(AuthError::InvalidToken)
        }
    }

    #[tokio::test]
    async fn session_validator_returns_user_for_valid_token() {
        let validator = TestSessionValidator::new();
        let id = UserId::new();
        validator.add_valid_token("valid-token-123", AuthenticatedUser::new(id, "alice", vec![Role::User]));

        let user = validator.validate("valid-token-123").await.unwrap();

        assert_eq!(user.id, id);
        assert_eq!(user.username, "alice");
        assert!(!user.is_admin());
    }

    #[tokio::test]
    async fn session_validator_returns_error_for_invalid_token() {
        let validator = TestSessionValidator::new();

        let result = validator.validate("invalid-token").await;

        assert!(matches!(result, Err(AuthError::InvalidToken)));
    }

    #[test]
    fn ports_are_send_sync() {
        fn assert_send_sync<T: Send + Sync + ?Sized>() {}
        assert_send_sync::<dyn SessionValidator>();
        assert_send_sync::<dyn AccessTokenIssuer>();
    }
}
