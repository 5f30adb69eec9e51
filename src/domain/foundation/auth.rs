//! Authentication types for the domain layer.
//!
//! These types represent the caller identity extracted from an access token.
//! They carry no token or transport details; the `SessionValidator` port
//! populates them.

use super::{Role, UserId};
use thiserror::Error;

/// Caller identity extracted from a validated access token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub id: UserId,
    pub username: String,
    pub roles: Vec<Role>,
}

impl AuthenticatedUser {
    pub fn new(id: UserId, username: impl Into<String>, roles: Vec<Role>) -> Self {
        Self {
            id,
            username: username.into(),
            roles,
        }
    }

    pub fn has_role(&self, role: Role) -> bool {
        self.roles.contains(&role)
    }

    pub fn is_admin(&self) -> bool {
        self.has_role(Role::Admin)
    }
}

/// Authentication errors that can occur during token validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// The token is malformed or has an invalid signature.
    #[error("Invalid token")]
    InvalidToken,

    /// The token signature is valid but it has expired.
    #[error("Token expired")]
    TokenExpired,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admin_detection() {
        let admin = AuthenticatedUser::new(UserId::new(), "root", vec![Role::Admin]);
        let user = AuthenticatedUser::new(UserId::new(), "alice", vec![Role::User]);
        assert!(admin.is_admin());
        assert!(!user.is_admin());
        assert!(user.has_role(Role::User));
    }

    #[test]
    fn errors_render_client_messages() {
        assert_eq!(AuthError::TokenExpired.to_string(), "Token expired");
        assert_eq!(AuthError::InvalidToken.to_string(), "Invalid token");
    }
}
