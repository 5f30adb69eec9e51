//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `auth` - JWT access tokens and bcrypt password hashing
//! - `http` - axum REST API
//! - `memory` - In-memory repositories for tests and local runs
//! - `network` - DNS resolution and outbound HTTP
//! - `postgres` - sqlx repositories

pub mod auth;
pub mod http;
pub mod memory;
pub mod network;
pub mod postgres;
