//! HTTP adapter for the developer utilities.

pub mod dto;
mod handlers;
mod routes;

pub use routes::utilities_router;
