//! Read-side queries over the catalog.

use std::sync::Arc;

use crate::domain::catalog::Tool;
use crate::domain::foundation::{DomainError, ErrorCode, Page, PageRequest, ToolId};
use crate::ports::ToolRepository;

pub struct ToolQueryHandler {
    tools: Arc<dyn ToolRepository>,
}

impl ToolQueryHandler {
    pub fn new(tools: Arc<dyn ToolRepository>) -> Self {
        Self { tools }
    }

    pub async fn list(&self, page: PageRequest) -> Result<Page<Tool>, DomainError> {
        self.tools.list(page).await
    }

    pub async fn get(&self, id: ToolId) -> Result<Tool, DomainError> {
        self.tools
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::new(ErrorCode::ToolNotFound, "Tool not found"))
    }

    /// Public listing: active tools only, in display order.
    pub async fn active(&self) -> Result<Vec<Tool>, DomainError> {
        self.tools.list_active().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryToolRepository;
    use crate::domain::catalog::NewTool;

    #[tokio::test]
    async fn active_listing_hides_disabled_tools() {
        let repo = Arc::new(InMemoryToolRepository::new());
        repo.insert(NewTool::new("shown", "Shown", "", None, None, vec![]).unwrap())
            .await
            .unwrap();
        repo.insert(
            NewTool::new("hidden", "Hidden", "", None, None, vec![])
                .unwrap()
                .inactive(),
        )
        .await
        .unwrap();
        let queries = ToolQueryHandler::new(repo);

        let active = queries.active().await.unwrap();
        let all = queries.list(PageRequest::default()).await.unwrap();

        assert_eq!(active.len(), 1);
        assert_eq!(active[0].key, "shown");
        assert_eq!(all.total_elements, 2);
    }
}
