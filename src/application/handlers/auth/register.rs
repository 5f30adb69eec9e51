//! Register - Self-service sign-up. New accounts are always `USER`.

use crate::application::handlers::accounts::{CreateUserCommand, CreateUserHandler};
use crate::domain::account::User;
use crate::domain::foundation::{DomainError, Role};

#[derive(Debug, Clone)]
pub struct RegisterCommand {
    pub username: String,
    pub email: String,
    pub password: String,
}

pub struct RegisterHandler {
    create_user: CreateUserHandler,
}

impl RegisterHandler {
    pub fn new(create_user: CreateUserHandler) -> Self {
        Self { create_user }
    }

    pub async fn handle(&self, cmd: RegisterCommand) -> Result<User, DomainError> {
        self.create_user
            .handle(CreateUserCommand {
                username: cmd.username,
                email: cmd.email,
                password: cmd.password,
                role: Role::User,
            })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::auth::BcryptPasswordHasher;
    use crate::adapters::memory::InMemoryUserRepository;
    use std::sync::Arc;

    #[tokio::test]
    async fn registered_account_is_a_plain_user() {
        let handler = RegisterHandler::new(CreateUserHandler::new(
            Arc::new(InMemoryUserRepository::new()),
            Arc::new(BcryptPasswordHasher::new(4)),
        ));

        let user = handler
            .handle(RegisterCommand {
                username: "newbie".into(),
                email: "newbie@example.com".into(),
                password: "secret1".into(),
            })
            .await
            .unwrap();

        assert_eq!(user.role, Role::User);
    }
}
