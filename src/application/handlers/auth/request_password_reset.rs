//! RequestPasswordReset - Records a reset request.
//!
//! No mail is sent and the outcome never reveals whether the address is
//! registered.

use std::sync::Arc;

use crate::domain::account::normalize_email;
use crate::domain::foundation::DomainError;
use crate::ports::UserRepository;

pub struct RequestPasswordResetHandler {
    users: Arc<dyn UserRepository>,
}

impl RequestPasswordResetHandler {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    pub async fn handle(&self, email: &str) -> Result<(), DomainError> {
        let email = normalize_email(email)?;
        match self.users.find_by_email(&email).await? {
            Some(user) => tracing::info!(user_id = %user.id, "Password reset requested"),
            None => tracing::info!("Password reset requested for unknown address"),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryUserRepository;
    use crate::domain::foundation::ErrorCode;

    #[tokio::test]
    async fn unknown_address_is_acknowledged() {
        let handler = RequestPasswordResetHandler::new(Arc::new(InMemoryUserRepository::new()));
        assert!(handler.handle("ghost@example.com").await.is_ok());
    }

    #[tokio::test]
    async fn malformed_address_is_rejected() {
        let handler = RequestPasswordResetHandler::new(Arc::new(InMemoryUserRepository::new()));
        let err = handler.handle("not-an-email").await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
    }
}
