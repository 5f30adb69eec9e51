//! In-memory adapters for the persistence ports.
//!
//! Used by the test suites; state is lost on restart.

mod refresh_token_repository;
mod tool_repository;
mod usage_log_repository;
mod user_repository;

pub use refresh_token_repository::InMemoryRefreshTokenRepository;
pub use tool_repository::InMemoryToolRepository;
pub use usage_log_repository::InMemoryUsageLogRepository;
pub use user_repository::InMemoryUserRepository;
