//! Startup seeding of the catalog and the administrator account.

use std::sync::Arc;

use super::accounts::{CreateUserCommand, CreateUserHandler};
use crate::domain::catalog::default_tools;
use crate::domain::foundation::{DomainError, Role};
use crate::ports::{PasswordHasher, ToolRepository, UserRepository};

/// Outcome of a seeding run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub tools_inserted: usize,
    pub admin_created: bool,
}

pub struct SeedHandler {
    tools: Arc<dyn ToolRepository>,
    users: Arc<dyn UserRepository>,
    create_user: CreateUserHandler,
}

impl SeedHandler {
    pub fn new(
        tools: Arc<dyn ToolRepository>,
        users: Arc<dyn UserRepository>,
        hasher: Arc<dyn PasswordHasher>,
    ) -> Self {
        Self {
            create_user: CreateUserHandler::new(users.clone(), hasher),
            tools,
            users,
        }
    }

    /// Inserts the default tools when the catalog is empty.
    pub async fn seed_catalog(&self) -> Result<usize, DomainError> {
        if self.tools.count().await? > 0 {
            return Ok(0);
        }
        let defaults = default_tools()?;
        let inserted = defaults.len();
        for tool in defaults {
            self.tools.insert(tool).await?;
        }
        tracing::info!(inserted, "Seeded default tool catalog");
        Ok(inserted)
    }

    /// Creates the administrator unless an account with that username exists.
    pub async fn seed_admin(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<bool, DomainError> {
        if self.users.find_by_username(username.trim()).await?.is_some() {
            return Ok(false);
        }
        let admin = self
            .create_user
            .handle(CreateUserCommand {
                username: username.to_string(),
                email: email.to_string(),
                password: password.to_string(),
                role: Role::Admin,
            })
            .await?;
        tracing::info!(user_id = %admin.id, "Seeded administrator account");
        Ok(true)
    }

    pub async fn run(
        &self,
        admin: Option<(&str, &str, &str)>,
    ) -> Result<SeedReport, DomainError> {
        let tools_inserted = self.seed_catalog().await?;
        let admin_created = match admin {
            Some((username, email, password)) => self.seed_admin(username, email, password).await?,
            None => false,
        };
        Ok(SeedReport {
            tools_inserted,
            admin_created,
        })
    }
}
