//! RecordUsage - Appends to the tool usage log.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::usage::UsageRecord;
use crate::ports::UsageLogRepository;

#[derive(Debug, Clone)]
pub struct RecordUsageCommand {
    pub user_id: UserId,
    pub tool_name: String,
    pub ip_address: Option<String>,
}

pub struct RecordUsageHandler {
    logs: Arc<dyn UsageLogRepository>,
}

impl RecordUsageHandler {
    pub fn new(logs: Arc<dyn UsageLogRepository>) -> Self {
        Self { logs }
    }

    pub async fn handle(&self, cmd: RecordUsageCommand) -> Result<UsageRecord, DomainError> {
        let record = UsageRecord::new(cmd.user_id, &cmd.tool_name, cmd.ip_address)?;
        self.logs.record(&record).await?;
        tracing::debug!(user_id = %record.user_id, tool = %record.tool_name, "Tool usage recorded");
        Ok(record)
    }
}
