//! Tool usage log handlers.

mod record_usage;
mod usage_queries;

pub use record_usage::{RecordUsageCommand, RecordUsageHandler};
pub use usage_queries::UsageQueryHandler;
