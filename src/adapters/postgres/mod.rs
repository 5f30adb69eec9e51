//! PostgreSQL adapters.
//!
//! Implements the persistence ports over a shared `PgPool`. Schema lives in
//! `migrations/` and is embedded into the binary.

mod refresh_token_repository;
mod tool_repository;
mod usage_log_repository;
mod user_repository;

pub use refresh_token_repository::PostgresRefreshTokenRepository;
pub use tool_repository::PostgresToolRepository;
pub use usage_log_repository::PostgresUsageLogRepository;
pub use user_repository::PostgresUserRepository;
