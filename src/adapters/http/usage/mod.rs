//! HTTP adapter for tool usage logging.

pub mod dto;
mod handlers;
mod routes;

pub use routes::{admin_usage_router, usage_router};
