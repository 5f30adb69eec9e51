//! Tool usage records.

use crate::domain::foundation::{Timestamp, UsageRecordId, UserId, ValidationError};

pub const TOOL_NAME_MAX: usize = 100;

/// One recorded use of a tool by an authenticated user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UsageRecord {
    pub id: UsageRecordId,
    pub user_id: UserId,
    pub tool_name: String,
    pub ip_address: Option<String>,
    pub used_at: Timestamp,
}

impl UsageRecord {
    pub fn new(
        user_id: UserId,
        tool_name: &str,
        ip_address: Option<String>,
    ) -> Result<Self, ValidationError> {
        let tool_name = tool_name.trim();
        if tool_name.is_empty() {
            return Err(ValidationError::empty_field("toolName"));
        }
        let len = tool_name.chars().count();
        if len > TOOL_NAME_MAX {
            return Err(ValidationError::out_of_range(
                "toolName",
                1,
                TOOL_NAME_MAX as i64,
                len as i64,
            ));
        }
        Ok(Self {
            id: UsageRecordId::new(),
            user_id,
            tool_name: tool_name.to_string(),
            ip_address: ip_address.filter(|ip| !ip.is_empty()),
            used_at: Timestamp::now(),
        })
    }
}
