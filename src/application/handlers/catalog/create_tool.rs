//! CreateTool - Adds a tool to the catalog.

use std::sync::Arc;

use crate::domain::catalog::{NewTool, Tool};
use crate::domain::foundation::{DomainError, ErrorCode};
use crate::ports::ToolRepository;

pub struct CreateToolHandler {
    tools: Arc<dyn ToolRepository>,
}

impl CreateToolHandler {
    pub fn new(tools: Arc<dyn ToolRepository>) -> Self {
        Self { tools }
    }

    /// `display_order: None` appends the tool to the end of the catalog.
    pub async fn handle(&self, tool: NewTool) -> Result<Tool, DomainError> {
        if self.tools.find_by_key(&tool.key).await?.is_some() {
            return Err(DomainError::new(
                ErrorCode::ToolKeyTaken,
                "A tool with this key already exists",
            ));
        }
        let tool = self.tools.insert(tool).await?;
        tracing::info!(tool_id = %tool.id, key = %tool.key, "Tool created");
        Ok(tool)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryToolRepository;

    fn new_tool(key: &str) -> NewTool {
        NewTool::new(key, key, "", None, None, vec![]).unwrap()
    }

    #[tokio::test]
    async fn appends_to_end_of_catalog() {
        let handler = CreateToolHandler::new(Arc::new(InMemoryToolRepository::new()));

        let first = handler.handle(new_tool("alpha")).await.unwrap();
        let second = handler.handle(new_tool("beta")).await.unwrap();

        assert!(second.display_order > first.display_order);
    }

    #[tokio::test]
    async fn duplicate_key_conflicts() {
        let handler = CreateToolHandler::new(Arc::new(InMemoryToolRepository::new()));
        handler.handle(new_tool("alpha")).await.unwrap();

        let err = handler.handle(new_tool("alpha")).await.unwrap_err();

        assert_eq!(err.code, ErrorCode::ToolKeyTaken);
    }
}
