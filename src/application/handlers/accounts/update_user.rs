//! UpdateUser - Command handler for account edits.
//!
//! Serves the admin `PUT`/`PATCH /users/{id}`, `PATCH /users/{id}/role` and
//! the self-service `PUT /users/me`. The latter always passes `role: None`.

use std::sync::Arc;

use super::create_user::{ensure_email_free, ensure_username_free};
use crate::domain::account::{normalize_email, normalize_username, validate_password, User};
use crate::domain::foundation::{DomainError, ErrorCode, Role, UserId};
use crate::ports::{PasswordHasher, UserRepository};

/// Changes to apply; `None` leaves a field untouched.
#[derive(Debug, Clone, Default)]
pub struct UpdateUserCommand {
    pub user_id: UserId,
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub role: Option<Role>,
}

impl UpdateUserCommand {
    pub fn for_user(user_id: UserId) -> Self {
        Self {
            user_id,
            ..Default::default()
        }
    }

    /// Drops blank strings so that partial updates can send empty fields.
    pub fn ignoring_blanks(mut self) -> Self {
        fn keep(value: Option<String>) -> Option<String> {
            value.filter(|v| !v.trim().is_empty())
        }
        self.username = keep(self.username);
        self.email = keep(self.email);
        self.password = keep(self.password);
        self
    }
}

pub struct UpdateUserHandler {
    users: Arc<dyn UserRepository>,
    hasher: Arc<dyn PasswordHasher>,
}

impl UpdateUserHandler {
    pub fn new(users: Arc<dyn UserRepository>, hasher: Arc<dyn PasswordHasher>) -> Self {
        Self { users, hasher }
    }

    pub async fn handle(&self, cmd: UpdateUserCommand) -> Result<User, DomainError> {
        let mut user = self
            .users
            .find_by_id(&cmd.user_id)
            .await?
            .ok_or_else(|| DomainError::new(ErrorCode::UserNotFound, "User not found"))?;

        // Validate everything before touching the entity
        let username = cmd.username.as_deref().map(normalize_username).transpose()?;
        let email = cmd.email.as_deref().map(normalize_email).transpose()?;
        if let Some(password) = &cmd.password {
            validate_password(password)?;
        }

        if let Some(username) = username.filter(|u| *u != user.username) {
            ensure_username_free(self.users.as_ref(), &username, Some(&user)).await?;
            user.rename(&username)?;
        }
        if let Some(email) = email.filter(|e| *e != user.email) {
            ensure_email_free(self.users.as_ref(), &email, Some(&user)).await?;
            user.change_email(&email)?;
        }
        if let Some(password) = &cmd.password {
            let hash = self.hasher.hash(password).await?;
            user.set_password_hash(hash);
        }
        if let Some(role) = cmd.role.filter(|r| *r != user.role) {
            tracing::info!(user_id = %user.id, from = %user.role, to = %role, "Role changed");
            user.change_role(role);
        }

        self.users.update(&user).await?;
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::auth::BcryptPasswordHasher;
    use crate::adapters::memory::InMemoryUserRepository;

    async fn setup() -> (UpdateUserHandler, Arc<InMemoryUserRepository>, User) {
        let users = Arc::new(InMemoryUserRepository::new());
        let alice = User::register("alice", "alice@example.com", "h".into(), Role::User).unwrap();
        let bob = User::register("bob", "bob@example.com", "h".into(), Role::User).unwrap();
        users.create(&alice).await.unwrap();
        users.create(&bob).await.unwrap();
        let handler = UpdateUserHandler::new(users.clone(), Arc::new(BcryptPasswordHasher::new(4)));
        (handler, users, alice)
    }

    #[tokio::test]
    async fn partial_update_keeps_other_fields() {
        let (handler, _, alice) = setup().await;

        let updated = handler
            .handle(UpdateUserCommand {
                email: Some("new@example.com".into()),
                ..UpdateUserCommand::for_user(alice.id)
            })
            .await
            .unwrap();

        assert_eq!(updated.username, "alice");
        assert_eq!(updated.email, "new@example.com");
        assert_eq!(updated.password_hash, "h");
    }

    #[tokio::test]
    async fn blank_fields_are_ignored_when_requested() {
        let (handler, _, alice) = setup().await;

        let cmd = UpdateUserCommand {
            username: Some("  ".into()),
            password: Some(String::new()),
            ..UpdateUserCommand::for_user(alice.id)
        }
        .ignoring_blanks();
        let updated = handler.handle(cmd).await.unwrap();

        assert_eq!(updated.username, "alice");
        assert_eq!(updated.password_hash, "h");
    }

    #[tokio::test]
    async fn taking_another_users_name_conflicts() {
        let (handler, _, alice) = setup().await;

        let err = handler
            .handle(UpdateUserCommand {
                username: Some("bob".into()),
                ..UpdateUserCommand::for_user(alice.id)
            })
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::UsernameTaken);
    }

    #[tokio::test]
    async fn keeping_own_email_is_not_a_conflict() {
        let (handler, _, alice) = setup().await;

        let updated = handler
            .handle(UpdateUserCommand {
                email: Some("ALICE@example.com".into()),
                ..UpdateUserCommand::for_user(alice.id)
            })
            .await
            .unwrap();

        assert_eq!(updated.email, "alice@example.com");
    }

    #[tokio::test]
    async fn changes_role_and_password() {
        let (handler, users, alice) = setup().await;

        handler
            .handle(UpdateUserCommand {
                password: Some("another1".into()),
                role: Some(Role::Admin),
                ..UpdateUserCommand::for_user(alice.id)
            })
            .await
            .unwrap();

        let stored = users.find_by_id(&alice.id).await.unwrap().unwrap();
        assert!(stored.is_admin());
        assert!(bcrypt::verify("another1", &stored.password_hash).unwrap());
    }

    #[tokio::test]
    async fn unknown_user_is_not_found() {
        let (handler, _, _) = setup().await;

        let err = handler
            .handle(UpdateUserCommand::for_user(UserId::new()))
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::UserNotFound);
    }
}
