//! User repository port.
//!
//! Persists [`User`] accounts. Username and email uniqueness is enforced by
//! implementations and surfaced as `UsernameTaken` / `EmailTaken`.

use async_trait::async_trait;

use crate::domain::account::User;
use crate::domain::foundation::{DomainError, Page, PageRequest, Role, UserId};

/// Repository port for user accounts.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new user.
    ///
    /// # Errors
    ///
    /// - `UsernameTaken` / `EmailTaken` on a uniqueness violation
    /// - `DatabaseError` on persistence failure
    async fn create(&self, user: &User) -> Result<(), DomainError>;

    /// Overwrite an existing user.
    ///
    /// # Errors
    ///
    /// - `UserNotFound` if the user does not exist
    /// - `UsernameTaken` / `EmailTaken` on a uniqueness violation
    async fn update(&self, user: &User) -> Result<(), DomainError>;

    /// Delete a user. Returns `false` if nothing was deleted.
    async fn delete(&self, id: &UserId) -> Result<bool, DomainError>;

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, DomainError>;

    /// Exact, case-sensitive username match.
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, DomainError>;

    /// Email match; emails are stored lowercase.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError>;

    /// Page of users ordered by username, optionally filtered by a
    /// case-insensitive substring of username or email and by role.
    async fn list(
        &self,
        request: PageRequest,
        search: Option<&str>,
        role: Option<Role>,
    ) -> Result<Page<User>, DomainError>;

    async fn list_by_role(&self, role: Role) -> Result<Vec<User>, DomainError>;

    async fn count(&self) -> Result<u64, DomainError>;
}
