//! bcrypt implementation of PasswordHasher.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::OnceCell;

use crate::domain::foundation::DomainError;
use crate::ports::PasswordHasher;

/// Hashes on the blocking pool so request handling is not stalled.
#[derive(Debug, Clone)]
pub struct BcryptPasswordHasher {
    cost: u32,
    /// Hash of a random password at `cost`, made on first use.
    decoy: Arc<OnceCell<String>>,
}

impl BcryptPasswordHasher {
    pub fn new(cost: u32) -> Self {
        Self {
            cost,
            decoy: Arc::new(OnceCell::new()),
        }
    }
}

#[async_trait]
impl PasswordHasher for BcryptPasswordHasher {
    async fn hash(&self, password: &str) -> Result<String, DomainError> {
        let password = password.to_string();
        let cost = self.cost;
        tokio::task::spawn_blocking(move || bcrypt::hash(password, cost))
            .await
            .map_err(|e| DomainError::internal(format!("Password hashing task failed: {}", e)))?
            .map_err(|e| DomainError::internal(format!("Password hashing failed: {}", e)))
    }

    async fn verify(&self, password: &str, hash: &str) -> Result<bool, DomainError> {
        let password = password.to_string();
        let hash = hash.to_string();
        tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash))
            .await
            .map_err(|e| DomainError::internal(format!("Password check task failed: {}", e)))?
            .map_err(|e| DomainError::internal(format!("Stored password hash is invalid: {}", e)))
    }

    async fn verify_unknown_account(&self, password: &str) -> Result<(), DomainError> {
        let decoy = self
            .decoy
            .get_or_try_init(|| async {
                let throwaway = uuid::Uuid::new_v4().to_string();
                self.hash(&throwaway).await
            })
            .await?;
        self.verify(password, decoy).await.map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn hash_then_verify() {
        let hasher = BcryptPasswordHasher::new(4);
        let hash = hasher.hash("s3cret!").await.unwrap();
        assert_ne!(hash, "s3cret!");
        assert!(hasher.verify("s3cret!", &hash).await.unwrap());
        assert!(!hasher.verify("wrong", &hash).await.unwrap());
    }

    #[tokio::test]
    async fn unknown_account_check_uses_configured_cost() {
        let hasher = BcryptPasswordHasher::new(5);

        hasher.verify_unknown_account("guess").await.unwrap();
        hasher.verify_unknown_account("again").await.unwrap();

        let decoy = hasher.decoy.get().unwrap();
        assert!(decoy.starts_with("$2b$05$"));
    }

    #[tokio::test]
    async fn corrupt_hash_is_an_error() {
        let hasher = BcryptPasswordHasher::new(4);
        assert!(hasher.verify("x", "not-a-bcrypt-hash").await.is_err());
    }
}
