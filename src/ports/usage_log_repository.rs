//! Tool usage log port.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, Page, PageRequest, Timestamp, UserId};
use crate::domain::usage::UsageRecord;

/// Append-only store of tool usage.
#[async_trait]
pub trait UsageLogRepository: Send + Sync {
    async fn record(&self, entry: &UsageRecord) -> Result<(), DomainError>;

    /// Number of entries for `user_id` at or after `since`.
    async fn count_since(&self, user_id: &UserId, since: Timestamp) -> Result<u64, DomainError>;

    /// Newest first, optionally restricted to one user.
    async fn list(
        &self,
        request: PageRequest,
        user_id: Option<&UserId>,
    ) -> Result<Page<UsageRecord>, DomainError>;
}
