//! In-memory UserRepository.

use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::domain::account::User;
use crate::domain::foundation::{DomainError, ErrorCode, Page, PageRequest, Role, UserId};
use crate::ports::UserRepository;

/// Users kept in a map; uniqueness is checked the way the database
/// constraints would.
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    users: RwLock<HashMap<UserId, User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn check_unique(users: &HashMap<UserId, User>, user: &User) -> Result<(), DomainError> {
        for other in users.values().filter(|u| u.id != user.id) {
            if other.username == user.username {
                return Err(DomainError::new(ErrorCode::UsernameTaken, "Username is already taken"));
            }
            if other.email == user.email {
                return Err(DomainError::new(ErrorCode::EmailTaken, "Email is already registered"));
            }
        }
        Ok(())
    }
}

fn sorted(mut users: Vec<User>) -> Vec<User> {
    users.sort_by(|a, b| a.username.cmp(&b.username));
    users
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: &User) -> Result<(), DomainError> {
        let mut users = self.users.write().await;
        Self::check_unique(&users, user)?;
        users.insert(user.id, user.clone());
        Ok(())
    }

    async fn update(&self, user: &User) -> Result<(), DomainError> {
        let mut users = self.users.write().await;
        if !users.contains_key(&user.id) {
            return Err(DomainError::new(ErrorCode::UserNotFound, "User not found"));
        }
        Self::check_unique(&users, user)?;
        users.insert(user.id, user.clone());
        Ok(())
    }

    async fn delete(&self, id: &UserId) -> Result<bool, DomainError> {
        Ok(self.users.write().await.remove(id).is_some())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, DomainError> {
        Ok(self.users.read().await.get(id).cloned())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, DomainError> {
        Ok(self
            .users
            .read()
            .await
            .values()
            .find(|u| u.username == username)
            .cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        let email = email.trim().to_lowercase();
        Ok(self
            .users
            .read()
            .await
            .values()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn list(
        &self,
        request: PageRequest,
        search: Option<&str>,
        role: Option<Role>,
    ) -> Result<Page<User>, DomainError> {
        let term = search.map(str::trim).filter(|s| !s.is_empty());
        let matching: Vec<User> = self
            .users
            .read()
            .await
            .values()
            .filter(|u| term.map_or(true, |t| u.matches_search(t)))
            .filter(|u| role.map_or(true, |r| u.role == r))
            .cloned()
            .collect();
        Ok(Page::from_slice(&sorted(matching), request))
    }

    async fn list_by_role(&self, role: Role) -> Result<Vec<User>, DomainError> {
        let users: Vec<User> = self
            .users
            .read()
            .await
            .values()
            .filter(|u| u.role == role)
            .cloned()
            .collect();
        Ok(sorted(users))
    }

    async fn count(&self) -> Result<u64, DomainError> {
        Ok(self.users.read().await.len() as u64)
    }
}
