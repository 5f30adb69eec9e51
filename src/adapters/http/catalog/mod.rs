//! HTTP adapter for the tool catalog.

pub mod dto;
mod handlers;
mod routes;

pub use routes::{admin_tools_router, public_tools_router};
