//! In-memory RefreshTokenRepository.

use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::domain::account::RefreshToken;
use crate::domain::foundation::{DomainError, Timestamp, UserId};
use crate::ports::RefreshTokenRepository;

#[derive(Debug, Default)]
pub struct InMemoryRefreshTokenRepository {
    tokens: RwLock<HashMap<String, RefreshToken>>,
}

impl InMemoryRefreshTokenRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.tokens.read().await.len()
    }
}

#[async_trait]
impl RefreshTokenRepository for InMemoryRefreshTokenRepository {
    async fn save(&self, token: &RefreshToken) -> Result<(), DomainError> {
        self.tokens
            .write()
            .await
            .insert(token.token.clone(), token.clone());
        Ok(())
    }

    async fn find(&self, token: &str) -> Result<Option<RefreshToken>, DomainError> {
        Ok(self.tokens.read().await.get(token).cloned())
    }

    async fn delete(&self, token: &str) -> Result<bool, DomainError> {
        Ok(self.tokens.write().await.remove(token).is_some())
    }

    async fn delete_for_user(&self, user_id: &UserId) -> Result<u64, DomainError> {
        let mut tokens = self.tokens.write().await;
        let before = tokens.len();
        tokens.retain(|_, t| t.user_id != *user_id);
        Ok((before - tokens.len()) as u64)
    }

    async fn delete_expired(&self, now: Timestamp) -> Result<u64, DomainError> {
        let mut tokens = self.tokens.write().await;
        let before = tokens.len();
        tokens.retain(|_, t| !t.is_expired_at(&now));
        Ok((before - tokens.len()) as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn revokes_all_tokens_of_a_user() {
        let repo = InMemoryRefreshTokenRepository::new();
        let alice = UserId::new();
        repo.save(&RefreshToken::issue(alice, 60)).await.unwrap();
        repo.save(&RefreshToken::issue(alice, 60)).await.unwrap();
        let bob_token = RefreshToken::issue(UserId::new(), 60);
        repo.save(&bob_token).await.unwrap();

        assert_eq!(repo.delete_for_user(&alice).await.unwrap(), 2);
        assert_eq!(repo.len().await, 1);
        assert!(repo.find(&bob_token.token).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn purges_expired_tokens() {
        let repo = InMemoryRefreshTokenRepository::new();
        repo.save(&RefreshToken::issue(UserId::new(), 60)).await.unwrap();
        let later = Timestamp::now().plus_seconds(120);
        assert_eq!(repo.delete_expired(later).await.unwrap(), 1);
    }
}
