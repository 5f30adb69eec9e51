//! Login - Exchanges credentials for an access token and a refresh token.

use std::sync::Arc;

use crate::domain::account::{RefreshToken, User};
use crate::domain::foundation::{DomainError, ErrorCode};
use crate::ports::{
    AccessTokenIssuer, IssuedAccessToken, PasswordHasher, RefreshTokenRepository, UserRepository,
};

#[derive(Debug, Clone)]
pub struct LoginCommand {
    /// Username or email address.
    pub login: String,
    pub password: String,
}

#[derive(Debug, Clone)]
pub struct LoginResult {
    pub user: User,
    pub access_token: IssuedAccessToken,
    pub refresh_token: RefreshToken,
}

pub struct LoginHandler {
    users: Arc<dyn UserRepository>,
    refresh_tokens: Arc<dyn RefreshTokenRepository>,
    hasher: Arc<dyn PasswordHasher>,
    issuer: Arc<dyn AccessTokenIssuer>,
    refresh_ttl_secs: u64,
}

fn invalid_credentials() -> DomainError {
    DomainError::new(ErrorCode::InvalidCredentials, "Invalid username or password")
}

impl LoginHandler {
    pub fn new(
        users: Arc<dyn UserRepository>,
        refresh_tokens: Arc<dyn RefreshTokenRepository>,
        hasher: Arc<dyn PasswordHasher>,
        issuer: Arc<dyn AccessTokenIssuer>,
        refresh_ttl_secs: u64,
    ) -> Self {
        Self {
            users,
            refresh_tokens,
            hasher,
            issuer,
            refresh_ttl_secs,
        }
    }

    async fn find_account(&self, login: &str) -> Result<Option<User>, DomainError> {
        if let Some(user) = self.users.find_by_username(login).await? {
            return Ok(Some(user));
        }
        if login.contains('@') {
            return self.users.find_by_email(login).await;
        }
        Ok(None)
    }

    pub async fn handle(&self, cmd: LoginCommand) -> Result<LoginResult, DomainError> {
        let login = cmd.login.trim();
        if login.is_empty() || cmd.password.is_empty() {
            return Err(invalid_credentials());
        }

        let Some(user) = self.find_account(login).await? else {
            self.hasher.verify_unknown_account(&cmd.password).await?;
            tracing::warn!("Login failed: unknown account");
            return Err(invalid_credentials());
        };
        if !self.hasher.verify(&cmd.password, &user.password_hash).await? {
            tracing::warn!(user_id = %user.id, "Login failed: wrong password");
            return Err(invalid_credentials());
        }

        let access_token = self.issuer.issue(&user)?;

        // One live refresh token per user
        self.refresh_tokens.delete_for_user(&user.id).await?;
        let refresh_token = RefreshToken::issue(user.id, self.refresh_ttl_secs);
        self.refresh_tokens.save(&refresh_token).await?;

        tracing::info!(user_id = %user.id, "User logged in");
        Ok(LoginResult {
            user,
            access_token,
            refresh_token,
        })
    }
}
