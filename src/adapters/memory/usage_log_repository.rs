//! In-memory UsageLogRepository.

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, Page, PageRequest, Timestamp, UserId};
use crate::domain::usage::UsageRecord;
use crate::ports::UsageLogRepository;

#[derive(Debug, Default)]
pub struct InMemoryUsageLogRepository {
    entries: RwLock<Vec<UsageRecord>>,
}

impl InMemoryUsageLogRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UsageLogRepository for InMemoryUsageLogRepository {
    async fn record(&self, entry: &UsageRecord) -> Result<(), DomainError> {
        self.entries.write().await.push(entry.clone());
        Ok(())
    }

    async fn count_since(&self, user_id: &UserId, since: Timestamp) -> Result<u64, DomainError> {
        Ok(self
            .entries
            .read()
            .await
            .iter()
            .filter(|e| e.user_id == *user_id && !e.used_at.is_before(&since))
            .count() as u64)
    }

    async fn list(
        &self,
        request: PageRequest,
        user_id: Option<&UserId>,
    ) -> Result<Page<UsageRecord>, DomainError> {
        let mut matching: Vec<UsageRecord> = self
            .entries
            .read()
            .await
            .iter()
            .filter(|e| user_id.map_or(true, |id| e.user_id == *id))
            .cloned()
            .collect();
        matching.sort_by(|a, b| b.used_at.cmp(&a.used_at));
        Ok(Page::from_slice(&matching, request))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn counts_only_recent_entries_of_the_user() {
        let repo = InMemoryUsageLogRepository::new();
        let alice = UserId::new();
        let bob = UserId::new();

        let mut old = UsageRecord::new(alice, "hash", None).unwrap();
        old.used_at = Timestamp::now().plus_seconds(-2 * 86_400);
        repo.record(&old).await.unwrap();
        repo.record(&UsageRecord::new(alice, "hash", None).unwrap()).await.unwrap();
        repo.record(&UsageRecord::new(bob, "base64", None).unwrap()).await.unwrap();

        let count = repo.count_since(&alice, Timestamp::start_of_today()).await.unwrap();
        assert_eq!(count, 1);
    }

    #[tokio::test]
    async fn list_is_newest_first_and_filterable() {
        let repo = InMemoryUsageLogRepository::new();
        let alice = UserId::new();
        let mut first = UsageRecord::new(alice, "first", None).unwrap();
        first.used_at = Timestamp::now().plus_seconds(-60);
        repo.record(&first).await.unwrap();
        repo.record(&UsageRecord::new(alice, "second", None).unwrap()).await.unwrap();
        repo.record(&UsageRecord::new(UserId::new(), "other", None).unwrap()).await.unwrap();

        let page = repo.list(PageRequest::new(None, None), Some(&alice)).await.unwrap();
        let names: Vec<&str> = page.content.iter().map(|e| e.tool_name.as_str()).collect();
        assert_eq!(names, ["second", "first"]);

        let all = repo.list(PageRequest::new(None, None), None).await.unwrap();
        assert_eq!(all.total_elements, 3);
    }
}
