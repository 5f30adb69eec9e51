//! DeleteUser - Command handler for account removal.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, ErrorCode, UserId};
use crate::ports::{RefreshTokenRepository, UserRepository};

#[derive(Debug, Clone)]
pub struct DeleteUserCommand {
    pub user_id: UserId,
    /// The administrator issuing the request.
    pub requested_by: UserId,
}

pub struct DeleteUserHandler {
    users: Arc<dyn UserRepository>,
    refresh_tokens: Arc<dyn RefreshTokenRepository>,
}

impl DeleteUserHandler {
    pub fn new(
        users: Arc<dyn UserRepository>,
        refresh_tokens: Arc<dyn RefreshTokenRepository>,
    ) -> Self {
        Self {
            users,
            refresh_tokens,
        }
    }

    pub async fn handle(&self, cmd: DeleteUserCommand) -> Result<(), DomainError> {
        if cmd.user_id == cmd.requested_by {
            return Err(DomainError::new(
                ErrorCode::Conflict,
                "Administrators cannot delete their own account",
            ));
        }

        self.refresh_tokens.delete_for_user(&cmd.user_id).await?;
        if !self.users.delete(&cmd.user_id).await? {
            return Err(DomainError::new(ErrorCode::UserNotFound, "User not found"));
        }

        tracing::info!(user_id = %cmd.user_id, by = %cmd.requested_by, "User deleted");
        Ok(())
    }
}
