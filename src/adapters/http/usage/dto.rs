//! Request and response bodies for tool usage logging.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::foundation::{Timestamp, UsageRecordId, UserId};
use crate::domain::usage::UsageRecord;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordUsageRequest {
    #[serde(alias = "tool")]
    pub tool_name: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageLogParams {
    pub page: Option<u32>,
    pub size: Option<u32>,
    pub user_id: Option<Uuid>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageRecordResponse {
    pub id: UsageRecordId,
    pub user_id: UserId,
    pub tool_name: String,
    pub ip_address: Option<String>,
    pub used_at: Timestamp,
}

impl From<UsageRecord> for UsageRecordResponse {
    fn from(record: UsageRecord) -> Self {
        Self {
            id: record.id,
            user_id: record.user_id,
            tool_name: record.tool_name,
            ip_address: record.ip_address,
            used_at: record.used_at,
        }
    }
}
