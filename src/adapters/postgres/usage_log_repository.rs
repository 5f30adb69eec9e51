//! PostgreSQL implementation of UsageLogRepository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::foundation::{
    DomainError, Page, PageRequest, Timestamp, UsageRecordId, UserId,
};
use crate::domain::usage::UsageRecord;
use crate::ports::UsageLogRepository;

pub struct PostgresUsageLogRepository {
    pool: PgPool,
}

impl PostgresUsageLogRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct UsageRow {
    id: Uuid,
    user_id: Uuid,
    tool_name: String,
    ip_address: Option<String>,
    used_at: DateTime<Utc>,
}

impl From<UsageRow> for UsageRecord {
    fn from(row: UsageRow) -> Self {
        UsageRecord {
            id: UsageRecordId::from_uuid(row.id),
            user_id: UserId::from_uuid(row.user_id),
            tool_name: row.tool_name,
            ip_address: row.ip_address,
            used_at: Timestamp::from_datetime(row.used_at),
        }
    }
}

fn read_error(e: sqlx::Error) -> DomainError {
    DomainError::database(format!("Failed to load usage logs: {}", e))
}

#[async_trait]
impl UsageLogRepository for PostgresUsageLogRepository {
    async fn record(&self, entry: &UsageRecord) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO tool_usage_logs (id, user_id, tool_name, ip_address, used_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(entry.id.as_uuid())
        .bind(entry.user_id.as_uuid())
        .bind(&entry.tool_name)
        .bind(&entry.ip_address)
        .bind(entry.used_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to record tool usage: {}", e)))?;

        Ok(())
    }

    async fn count_since(&self, user_id: &UserId, since: Timestamp) -> Result<u64, DomainError> {
        let total: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM tool_usage_logs WHERE user_id = $1 AND used_at >= $2",
        )
        .bind(user_id.as_uuid())
        .bind(since.as_datetime())
        .fetch_one(&self.pool)
        .await
        .map_err(read_error)?;

        Ok(total.max(0) as u64)
    }

    async fn list(
        &self,
        request: PageRequest,
        user_id: Option<&UserId>,
    ) -> Result<Page<UsageRecord>, DomainError> {
        let user_uuid = user_id.map(|id| *id.as_uuid());

        let total: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM tool_usage_logs WHERE $1::uuid IS NULL OR user_id = $1",
        )
        .bind(user_uuid)
        .fetch_one(&self.pool)
        .await
        .map_err(read_error)?;

        let rows: Vec<UsageRow> = sqlx::query_as(
            r#"
            SELECT id, user_id, tool_name, ip_address, used_at
            FROM tool_usage_logs
            WHERE $1::uuid IS NULL OR user_id = $1
            ORDER BY used_at DESC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(user_uuid)
        .bind(request.limit() as i64)
        .bind(request.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(read_error)?;

        Ok(Page::new(
            rows.into_iter().map(UsageRecord::from).collect(),
            request,
            total.max(0) as u64,
        ))
    }
}
