//! In-memory ToolRepository.

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::catalog::{self, sort_for_display, NewTool, Tool};
use crate::domain::foundation::{DomainError, ErrorCode, Page, PageRequest, ToolId};
use crate::ports::ToolRepository;

#[derive(Debug, Default)]
struct Catalog {
    tools: Vec<Tool>,
    next_id: i64,
}

/// Tool catalog held in a vector with a sequence for ids.
#[derive(Debug, Default)]
pub struct InMemoryToolRepository {
    catalog: RwLock<Catalog>,
}

impl InMemoryToolRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

fn key_taken() -> DomainError {
    DomainError::new(ErrorCode::ToolKeyTaken, "A tool with this key already exists")
}

fn sorted(mut tools: Vec<Tool>) -> Vec<Tool> {
    sort_for_display(&mut tools);
    tools
}

#[async_trait]
impl ToolRepository for InMemoryToolRepository {
    async fn insert(&self, tool: NewTool) -> Result<Tool, DomainError> {
        let mut catalog = self.catalog.write().await;
        if catalog.tools.iter().any(|t| t.key == tool.key) {
            return Err(key_taken());
        }
        let order = match tool.display_order {
            Some(order) => order,
            None => catalog
                .tools
                .iter()
                .map(|t| t.display_order + 1)
                .max()
                .unwrap_or(0),
        };
        catalog.next_id += 1;
        let created = tool.into_tool(ToolId::new(catalog.next_id), order);
        catalog.tools.push(created.clone());
        Ok(created)
    }

    async fn update(&self, tool: &Tool) -> Result<(), DomainError> {
        let mut catalog = self.catalog.write().await;
        if catalog.tools.iter().any(|t| t.key == tool.key && t.id != tool.id) {
            return Err(key_taken());
        }
        let slot = catalog
            .tools
            .iter_mut()
            .find(|t| t.id == tool.id)
            .ok_or_else(|| DomainError::new(ErrorCode::ToolNotFound, "Tool not found"))?;
        *slot = tool.clone();
        Ok(())
    }

    async fn delete(&self, id: ToolId) -> Result<bool, DomainError> {
        let mut catalog = self.catalog.write().await;
        let before = catalog.tools.len();
        catalog.tools.retain(|t| t.id != id);
        Ok(catalog.tools.len() < before)
    }

    async fn find_by_id(&self, id: ToolId) -> Result<Option<Tool>, DomainError> {
        Ok(self
            .catalog
            .read()
            .await
            .tools
            .iter()
            .find(|t| t.id == id)
            .cloned())
    }

    async fn find_by_key(&self, key: &str) -> Result<Option<Tool>, DomainError> {
        Ok(self
            .catalog
            .read()
            .await
            .tools
            .iter()
            .find(|t| t.key == key)
            .cloned())
    }

    async fn list(&self, request: PageRequest) -> Result<Page<Tool>, DomainError> {
        let all = self.list_all().await?;
        Ok(Page::from_slice(&all, request))
    }

    async fn list_all(&self) -> Result<Vec<Tool>, DomainError> {
        Ok(sorted(self.catalog.read().await.tools.clone()))
    }

    async fn list_active(&self) -> Result<Vec<Tool>, DomainError> {
        let active = self
            .catalog
            .read()
            .await
            .tools
            .iter()
            .filter(|t| t.active)
            .cloned()
            .collect();
        Ok(sorted(active))
    }

    async fn count(&self) -> Result<u64, DomainError> {
        Ok(self.catalog.read().await.tools.len() as u64)
    }

    async fn reorder(&self, ids: &[ToolId]) -> Result<Vec<Tool>, DomainError> {
        let mut catalog = self.catalog.write().await;
        let (ordered, _) = catalog::reorder(catalog.tools.clone(), ids)?;
        catalog.tools = ordered.clone();
        Ok(ordered)
    }
}
