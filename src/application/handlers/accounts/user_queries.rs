//! Read-side queries over accounts.

use std::sync::Arc;

use crate::domain::account::User;
use crate::domain::foundation::{DomainError, ErrorCode, Page, PageRequest, Role, UserId};
use crate::ports::UserRepository;

/// Filters for the admin user listing.
#[derive(Debug, Clone, Default)]
pub struct ListUsersQuery {
    pub page: PageRequest,
    pub search: Option<String>,
    pub role: Option<Role>,
}

pub struct UserQueryHandler {
    users: Arc<dyn UserRepository>,
}

impl UserQueryHandler {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    pub async fn list(&self, query: ListUsersQuery) -> Result<Page<User>, DomainError> {
        self.users
            .list(query.page, query.search.as_deref(), query.role)
            .await
    }

    pub async fn get(&self, id: &UserId) -> Result<User, DomainError> {
        self.users
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::new(ErrorCode::UserNotFound, "User not found"))
    }

    pub async fn by_role(&self, role: Role) -> Result<Vec<User>, DomainError> {
        self.users.list_by_role(role).await
    }

    pub async fn has_role(&self, id: &UserId, role: Role) -> Result<bool, DomainError> {
        Ok(self.get(id).await?.role == role)
    }

    pub async fn count(&self) -> Result<u64, DomainError> {
        self.users.count().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryUserRepository;

    async fn seeded() -> (UserQueryHandler, User) {
        let users = Arc::new(InMemoryUserRepository::new());
        let admin = User::register("root", "root@example.com", "h".into(), Role::Admin).unwrap();
        users.create(&admin).await.unwrap();
        for name in ["alice", "albert", "bob"] {
            let user =
                User::register(name, &format!("{}@example.com", name), "h".into(), Role::User)
                    .unwrap();
            users.create(&user).await.unwrap();
        }
        (UserQueryHandler::new(users), admin)
    }

    #[tokio::test]
    async fn list_filters_by_search_and_role() {
        let (queries, _) = seeded().await;

        let page = queries
            .list(ListUsersQuery {
                search: Some("AL".into()),
                role: Some(Role::User),
                ..Default::default()
            })
            .await
            .unwrap();

        assert_eq!(page.total_elements, 2);
        assert!(page.content.iter().all(|u| u.username.starts_with("al")));
    }

    #[tokio::test]
    async fn has_role_and_count() {
        let (queries, admin) = seeded().await;

        assert!(queries.has_role(&admin.id, Role::Admin).await.unwrap());
        assert!(!queries.has_role(&admin.id, Role::User).await.unwrap());
        assert_eq!(queries.count().await.unwrap(), 4);
        assert_eq!(queries.by_role(Role::Admin).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn get_missing_user_is_not_found() {
        let (queries, _) = seeded().await;

        let err = queries.get(&UserId::new()).await.unwrap_err();

        assert_eq!(err.code, ErrorCode::UserNotFound);
    }
}
