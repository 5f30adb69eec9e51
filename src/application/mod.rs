//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Command handlers own writes; query handlers are thin reads over a port.

pub mod handlers;

pub use handlers::{SeedHandler, SeedReport};
