//! CreateUser - Command handler for new accounts.

use std::sync::Arc;

use crate::domain::account::{normalize_email, normalize_username, validate_password, User};
use crate::domain::foundation::{DomainError, ErrorCode, Role};
use crate::ports::{PasswordHasher, UserRepository};

/// Command to create an account.
#[derive(Debug, Clone)]
pub struct CreateUserCommand {
    pub username: String,
    pub email: String,
    pub password: String,
    pub role: Role,
}

/// Handler for creating accounts, used by admin creation and self sign-up.
pub struct CreateUserHandler {
    users: Arc<dyn UserRepository>,
    hasher: Arc<dyn PasswordHasher>,
}

impl CreateUserHandler {
    pub fn new(users: Arc<dyn UserRepository>, hasher: Arc<dyn PasswordHasher>) -> Self {
        Self { users, hasher }
    }

    pub async fn handle(&self, cmd: CreateUserCommand) -> Result<User, DomainError> {
        // 1. Validate input before paying for a hash
        let username = normalize_username(&cmd.username)?;
        let email = normalize_email(&cmd.email)?;
        validate_password(&cmd.password)?;

        // 2. Uniqueness
        ensure_username_free(self.users.as_ref(), &username, None).await?;
        ensure_email_free(self.users.as_ref(), &email, None).await?;

        // 3. Hash and persist
        let hash = self.hasher.hash(&cmd.password).await?;
        let user = User::register(&username, &email, hash, cmd.role)?;
        self.users.create(&user).await?;

        tracing::info!(user_id = %user.id, role = %user.role, "User created");
        Ok(user)
    }
}

/// Fails with `UsernameTaken` when another account owns `username`.
pub(crate) async fn ensure_username_free(
    users: &dyn UserRepository,
    username: &str,
    except: Option<&User>,
) -> Result<(), DomainError> {
    match users.find_by_username(username).await? {
        Some(existing) if except.map_or(true, |u| u.id != existing.id) => Err(DomainError::new(
            ErrorCode::UsernameTaken,
            "Username is already taken",
        )),
        _ => Ok(()),
    }
}

/// Fails with `EmailTaken` when another account owns `email`.
pub(crate) async fn ensure_email_free(
    users: &dyn UserRepository,
    email: &str,
    except: Option<&User>,
) -> Result<(), DomainError> {
    match users.find_by_email(email).await? {
        Some(existing) if except.map_or(true, |u| u.id != existing.id) => Err(DomainError::new(
            ErrorCode::EmailTaken,
            "Email is already registered",
        )),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::auth::BcryptPasswordHasher;
    use crate::adapters::memory::InMemoryUserRepository;

    fn handler() -> (CreateUserHandler, Arc<InMemoryUserRepository>) {
        let users = Arc::new(InMemoryUserRepository::new());
        let handler = CreateUserHandler::new(users.clone(), Arc::new(BcryptPasswordHasher::new(4)));
        (handler, users)
    }

    fn command(username: &str, email: &str) -> CreateUserCommand {
        CreateUserCommand {
            username: username.to_string(),
            email: email.to_string(),
            password: "secret1".to_string(),
            role: Role::User,
        }
    }

    #[tokio::test]
    async fn creates_user_with_hashed_password() {
        let (handler, users) = handler();

        let user = handler.handle(command("alice", "Alice@Example.com")).await.unwrap();

        assert_eq!(user.email, "alice@example.com");
        assert_ne!(user.password_hash, "secret1");
        assert!(users.find_by_id(&user.id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn rejects_duplicate_username() {
        let (handler, _) = handler();
        handler.handle(command("alice", "a@example.com")).await.unwrap();

        let err = handler.handle(command("alice", "b@example.com")).await.unwrap_err();

        assert_eq!(err.code, ErrorCode::UsernameTaken);
    }

    #[tokio::test]
    async fn rejects_duplicate_email_case_insensitively() {
        let (handler, _) = handler();
        handler.handle(command("alice", "a@example.com")).await.unwrap();

        let err = handler.handle(command("bob", "A@EXAMPLE.com")).await.unwrap_err();

        assert_eq!(err.code, ErrorCode::EmailTaken);
    }

    #[tokio::test]
    async fn rejects_short_password() {
        let (handler, _) = handler();
        let mut cmd = command("alice", "a@example.com");
        cmd.password = "123".into();

        let err = handler.handle(cmd).await.unwrap_err();

        assert_eq!(err.code, ErrorCode::ValidationFailed);
    }
}
