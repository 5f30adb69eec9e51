//! UpdateTool - Partial edits, status toggles and deletion.

use std::sync::Arc;

use crate::domain::catalog::{Tool, ToolChanges};
use crate::domain::foundation::{DomainError, ErrorCode, ToolId};
use crate::ports::ToolRepository;

fn not_found() -> DomainError {
    DomainError::new(ErrorCode::ToolNotFound, "Tool not found")
}

pub struct UpdateToolHandler {
    tools: Arc<dyn ToolRepository>,
}

impl UpdateToolHandler {
    pub fn new(tools: Arc<dyn ToolRepository>) -> Self {
        Self { tools }
    }

    async fn load(&self, id: ToolId) -> Result<Tool, DomainError> {
        self.tools.find_by_id(id).await?.ok_or_else(not_found)
    }

    pub async fn handle(&self, id: ToolId, changes: ToolChanges) -> Result<Tool, DomainError> {
        let mut tool = self.load(id).await?;
        let previous_key = tool.key.clone();
        tool.apply(changes)?;

        if tool.key != previous_key {
            if let Some(other) = self.tools.find_by_key(&tool.key).await? {
                if other.id != tool.id {
                    return Err(DomainError::new(
                        ErrorCode::ToolKeyTaken,
                        "A tool with this key already exists",
                    ));
                }
            }
        }

        self.tools.update(&tool).await?;
        Ok(tool)
    }

    pub async fn set_status(&self, id: ToolId, active: bool) -> Result<Tool, DomainError> {
        let mut tool = self.load(id).await?;
        tool.set_active(active);
        self.tools.update(&tool).await?;
        tracing::info!(tool_id = %id, active, "Tool status changed");
        Ok(tool)
    }

    pub async fn delete(&self, id: ToolId) -> Result<(), DomainError> {
        if !self.tools.delete(id).await? {
            return Err(not_found());
        }
        tracing::info!(tool_id = %id, "Tool deleted");
        Ok(())
    }

    /// Assigns `display_order` by position in `ids`; unlisted tools follow.
    pub async fn reorder(&self, ids: &[ToolId]) -> Result<Vec<Tool>, DomainError> {
        self.tools.reorder(ids).await
    }
}
