//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Persistence Ports
//!
//! - `UserRepository` - User accounts
//! - `ToolRepository` - Tool catalog
//! - `UsageLogRepository` - Tool usage log
//! - `RefreshTokenRepository` - Opaque refresh tokens
//!
//! ## Security Ports
//!
//! - `PasswordHasher` - One-way password hashing
//! - `SessionValidator` - Access token validation
//! - `AccessTokenIssuer` - Access token minting
//!
//! ## Network Ports
//!
//! - `DnsResolver` - Record lookups for the DNS tool
//! - `HttpProbe` - Outbound requests for the URL tester

mod dns_resolver;
mod http_probe;
mod password_hasher;
mod refresh_token_repository;
mod session_validator;
mod tool_repository;
mod usage_log_repository;
mod user_repository;

pub use dns_resolver::{DnsLookupError, DnsResolver};
pub use http_probe::{HttpProbe, ProbeError, ProbeRequest, ProbeResponse};
pub use password_hasher::PasswordHasher;
pub use refresh_token_repository::RefreshTokenRepository;
pub use session_validator::{AccessTokenIssuer, IssuedAccessToken, SessionValidator};
pub use tool_repository::ToolRepository;
pub use usage_log_repository::UsageLogRepository;
pub use user_repository::UserRepository;
