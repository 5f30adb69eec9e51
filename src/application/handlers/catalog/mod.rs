//! Tool catalog handlers.

mod create_tool;
mod tool_queries;
mod update_tool;

pub use create_tool::CreateToolHandler;
pub use tool_queries::ToolQueryHandler;
pub use update_tool::UpdateToolHandler;
