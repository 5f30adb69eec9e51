//! Read-side queries over the usage log.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, Page, PageRequest, Timestamp, UserId};
use crate::domain::usage::UsageRecord;
use crate::ports::UsageLogRepository;

pub struct UsageQueryHandler {
    logs: Arc<dyn UsageLogRepository>,
}

impl UsageQueryHandler {
    pub fn new(logs: Arc<dyn UsageLogRepository>) -> Self {
        Self { logs }
    }

    /// Records since 00:00 UTC today.
    pub async fn count_today(&self, user_id: &UserId) -> Result<u64, DomainError> {
        self.logs
            .count_since(user_id, Timestamp::start_of_today())
            .await
    }

    /// Newest first, optionally restricted to one user.
    pub async fn list(
        &self,
        page: PageRequest,
        user_id: Option<&UserId>,
    ) -> Result<Page<UsageRecord>, DomainError> {
        self.logs.list(page, user_id).await
    }
}
