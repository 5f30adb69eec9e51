//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations through
//! the ports. HTTP handlers build commands and call these.

pub mod accounts;
pub mod auth;
pub mod bootstrap;
pub mod catalog;
pub mod usage;
pub mod utilities;

pub use bootstrap::{SeedHandler, SeedReport};
