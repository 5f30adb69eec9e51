//! HTTP middleware for axum.
//!
//! This module contains middleware layers and extractors for cross-cutting concerns:
//!
//! - `auth` - Authentication middleware and extractors
//! - `client_ip` - Caller address for the usage log

pub mod auth;
pub mod client_ip;

pub use auth::{
    auth_middleware, extract_token, lenient_auth_middleware, AuthRejection, AuthState,
    OptionalAuth, RequireAdmin, RequireAuth, ACCESS_COOKIE,
};
pub use client_ip::ClientIp;
