//! Logout - Revokes the caller's refresh tokens.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, UserId};
use crate::ports::RefreshTokenRepository;

pub struct LogoutHandler {
    refresh_tokens: Arc<dyn RefreshTokenRepository>,
}

impl LogoutHandler {
    pub fn new(refresh_tokens: Arc<dyn RefreshTokenRepository>) -> Self {
        Self { refresh_tokens }
    }

    /// Anonymous callers only get their cookies cleared; returns the number
    /// of revoked tokens.
    pub async fn handle(&self, user_id: Option<&UserId>) -> Result<u64, DomainError> {
        let Some(user_id) = user_id else {
            return Ok(0);
        };
        let revoked = self.refresh_tokens.delete_for_user(user_id).await?;
        tracing::info!(user_id = %user_id, revoked, "User logged out");
        Ok(revoked)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryRefreshTokenRepository;
    use crate::domain::account::RefreshToken;

    #[tokio::test]
    async fn revokes_only_callers_tokens() {
        let tokens = Arc::new(InMemoryRefreshTokenRepository::new());
        let me = UserId::new();
        tokens.save(&RefreshToken::issue(me, 60)).await.unwrap();
        tokens.save(&RefreshToken::issue(UserId::new(), 60)).await.unwrap();
        let handler = LogoutHandler::new(tokens.clone());

        assert_eq!(handler.handle(Some(&me)).await.unwrap(), 1);
        assert_eq!(handler.handle(None).await.unwrap(), 0);
        assert_eq!(tokens.len().await, 1);
    }
}
