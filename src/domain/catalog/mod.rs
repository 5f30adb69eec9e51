//! Tool catalog: which utilities the dashboard exposes and in what order.

mod defaults;
mod tool;

pub use defaults::default_tools;
pub use tool::{reorder, sort_for_display, NewTool, Tool, ToolChanges, KEY_MAX, TITLE_MAX};
