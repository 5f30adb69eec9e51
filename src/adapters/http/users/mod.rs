//! HTTP adapter for account management.

pub mod dto;
mod handlers;
mod routes;

pub use routes::users_router;
