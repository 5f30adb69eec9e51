//! Tool catalog repository port.

use async_trait::async_trait;

use crate::domain::catalog::{NewTool, Tool};
use crate::domain::foundation::{DomainError, Page, PageRequest, ToolId};

/// Repository port for the tool catalog.
///
/// Listing order is always `display_order`, then title.
#[async_trait]
pub trait ToolRepository: Send + Sync {
    /// Insert a tool, assigning its id. Without an explicit position the tool
    /// goes after the current last one.
    ///
    /// # Errors
    ///
    /// - `ToolKeyTaken` if the key is already used
    async fn insert(&self, tool: NewTool) -> Result<Tool, DomainError>;

    /// Overwrite an existing tool.
    ///
    /// # Errors
    ///
    /// - `ToolNotFound` if the tool does not exist
    /// - `ToolKeyTaken` if the new key belongs to another tool
    async fn update(&self, tool: &Tool) -> Result<(), DomainError>;

    /// Delete a tool. Returns `false` if nothing was deleted.
    async fn delete(&self, id: ToolId) -> Result<bool, DomainError>;

    async fn find_by_id(&self, id: ToolId) -> Result<Option<Tool>, DomainError>;

    async fn find_by_key(&self, key: &str) -> Result<Option<Tool>, DomainError>;

    async fn list(&self, request: PageRequest) -> Result<Page<Tool>, DomainError>;

    async fn list_all(&self) -> Result<Vec<Tool>, DomainError>;

    async fn list_active(&self) -> Result<Vec<Tool>, DomainError>;

    async fn count(&self) -> Result<u64, DomainError>;

    /// Assign `display_order` 0, 1, 2... following `ids`; tools not listed
    /// keep their relative order after them. Atomic.
    ///
    /// # Errors
    ///
    /// - `ToolNotFound` if any id is unknown
    async fn reorder(&self, ids: &[ToolId]) -> Result<Vec<Tool>, DomainError>;
}
