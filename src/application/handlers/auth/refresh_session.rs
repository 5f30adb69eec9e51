//! RefreshSession - Mints a new access token from a refresh token.
//!
//! The refresh token itself is not rotated.

use std::sync::Arc;

use crate::domain::account::User;
use crate::domain::foundation::{DomainError, ErrorCode, Timestamp};
use crate::ports::{AccessTokenIssuer, IssuedAccessToken, RefreshTokenRepository, UserRepository};

#[derive(Debug, Clone)]
pub struct RefreshSessionCommand {
    pub refresh_token: String,
}

#[derive(Debug, Clone)]
pub struct RefreshSessionResult {
    pub user: User,
    pub access_token: IssuedAccessToken,
}

pub struct RefreshSessionHandler {
    users: Arc<dyn UserRepository>,
    refresh_tokens: Arc<dyn RefreshTokenRepository>,
    issuer: Arc<dyn AccessTokenIssuer>,
}

fn rejected() -> DomainError {
    DomainError::new(ErrorCode::Unauthorized, "Invalid refresh token")
}

impl RefreshSessionHandler {
    pub fn new(
        users: Arc<dyn UserRepository>,
        refresh_tokens: Arc<dyn RefreshTokenRepository>,
        issuer: Arc<dyn AccessTokenIssuer>,
    ) -> Self {
        Self {
            users,
            refresh_tokens,
            issuer,
        }
    }

    pub async fn handle(
        &self,
        cmd: RefreshSessionCommand,
    ) -> Result<RefreshSessionResult, DomainError> {
        let stored = self
            .refresh_tokens
            .find(&cmd.refresh_token)
            .await?
            .ok_or_else(rejected)?;

        if stored.is_expired_at(&Timestamp::now()) {
            self.refresh_tokens.delete(&stored.token).await?;
            return Err(DomainError::new(
                ErrorCode::TokenExpired,
                "Refresh token expired, please log in again",
            ));
        }

        let Some(user) = self.users.find_by_id(&stored.user_id).await? else {
            self.refresh_tokens.delete(&stored.token).await?;
            return Err(rejected());
        };

        let access_token = self.issuer.issue(&user)?;
        tracing::debug!(user_id = %user.id, "Access token refreshed");
        Ok(RefreshSessionResult { user, access_token })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::auth::JwtTokenService;
    use crate::adapters::memory::{InMemoryRefreshTokenRepository, InMemoryUserRepository};
    use crate::domain::account::RefreshToken;
    use crate::domain::foundation::Role;
    use secrecy::SecretString;

    async fn setup() -> (RefreshSessionHandler, Arc<InMemoryRefreshTokenRepository>, User) {
        let users = Arc::new(InMemoryUserRepository::new());
        let tokens = Arc::new(InMemoryRefreshTokenRepository::new());
        let user = User::register("alice", "alice@example.com", "h".into(), Role::User).unwrap();
        users.create(&user).await.unwrap();
        let jwt = Arc::new(JwtTokenService::new(
            &SecretString::new("0123456789abcdef0123456789abcdef".into()),
            900,
        ));
        (RefreshSessionHandler::new(users, tokens.clone(), jwt), tokens, user)
    }

    #[tokio::test]
    async fn valid_token_mints_access_token() {
        let (handler, tokens, user) = setup().await;
        let token = RefreshToken::issue(user.id, 60);
        tokens.save(&token).await.unwrap();

        let result = handler
            .handle(RefreshSessionCommand {
                refresh_token: token.token.clone(),
            })
            .await
            .unwrap();

        assert_eq!(result.user.id, user.id);
        assert!(tokens.find(&token.token).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn unknown_token_is_unauthorized() {
        let (handler, _, _) = setup().await;

        let err = handler
            .handle(RefreshSessionCommand {
                refresh_token: "nope".into(),
            })
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::Unauthorized);
    }

    #[tokio::test]
    async fn expired_token_is_deleted() {
        let (handler, tokens, user) = setup().await;
        let mut token = RefreshToken::issue(user.id, 60);
        token.expires_at = Timestamp::now().plus_seconds(-5);
        tokens.save(&token).await.unwrap();

        let err = handler
            .handle(RefreshSessionCommand {
                refresh_token: token.token.clone(),
            })
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::TokenExpired);
        assert_eq!(tokens.len().await, 0);
    }
}
