//! PostgreSQL implementation of ToolRepository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::domain::catalog::{self, NewTool, Tool};
use crate::domain::foundation::{DomainError, ErrorCode, Page, PageRequest, Timestamp, ToolId};
use crate::ports::ToolRepository;

/// PostgreSQL implementation of the ToolRepository port.
pub struct PostgresToolRepository {
    pool: PgPool,
}

impl PostgresToolRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Database row representation of a tool.
#[derive(Debug, sqlx::FromRow)]
struct ToolRow {
    id: i64,
    tool_key: String,
    title: String,
    description: String,
    icon: Option<String>,
    href: String,
    keywords: Vec<String>,
    active: bool,
    display_order: i32,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<ToolRow> for Tool {
    fn from(row: ToolRow) -> Self {
        Tool {
            id: ToolId::new(row.id),
            key: row.tool_key,
            title: row.title,
            description: row.description,
            icon: row.icon,
            href: row.href,
            keywords: row.keywords,
            active: row.active,
            display_order: row.display_order,
            created_at: Timestamp::from_datetime(row.created_at),
            updated_at: Timestamp::from_datetime(row.updated_at),
        }
    }
}

const SELECT_TOOL: &str = r#"
    SELECT id, tool_key, title, description, icon, href, keywords, active,
           display_order, created_at, updated_at
    FROM tools
"#;

fn map_write_error(e: sqlx::Error, action: &str) -> DomainError {
    if let sqlx::Error::Database(db_err) = &e {
        if db_err.constraint() == Some("tools_tool_key_key") {
            return DomainError::new(ErrorCode::ToolKeyTaken, "A tool with this key already exists");
        }
    }
    DomainError::database(format!("Failed to {} tool: {}", action, e))
}

fn read_error(e: sqlx::Error) -> DomainError {
    DomainError::database(format!("Failed to load tools: {}", e))
}

#[async_trait]
impl ToolRepository for PostgresToolRepository {
    async fn insert(&self, tool: NewTool) -> Result<Tool, DomainError> {
        let now = Timestamp::now();
        let row: ToolRow = sqlx::query_as(
            r#"
            INSERT INTO tools (
                tool_key, title, description, icon, href, keywords, active,
                display_order, created_at, updated_at
            ) VALUES (
                $1, $2, $3, $4, $5, $6, $7,
                COALESCE($8, (SELECT COALESCE(MAX(display_order) + 1, 0) FROM tools)),
                $9, $9
            )
            RETURNING id, tool_key, title, description, icon, href, keywords, active,
                      display_order, created_at, updated_at
            "#,
        )
        .bind(&tool.key)
        .bind(&tool.title)
        .bind(&tool.description)
        .bind(&tool.icon)
        .bind(&tool.href)
        .bind(&tool.keywords)
        .bind(tool.active)
        .bind(tool.display_order)
        .bind(now.as_datetime())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_write_error(e, "create"))?;

        Ok(row.into())
    }

    async fn update(&self, tool: &Tool) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE tools SET
                tool_key = $2,
                title = $3,
                description = $4,
                icon = $5,
                href = $6,
                keywords = $7,
                active = $8,
                display_order = $9,
                updated_at = $10
            WHERE id = $1
            "#,
        )
        .bind(tool.id.value())
        .bind(&tool.key)
        .bind(&tool.title)
        .bind(&tool.description)
        .bind(&tool.icon)
        .bind(&tool.href)
        .bind(&tool.keywords)
        .bind(tool.active)
        .bind(tool.display_order)
        .bind(tool.updated_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| map_write_error(e, "update"))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(ErrorCode::ToolNotFound, "Tool not found"));
        }
        Ok(())
    }

    async fn delete(&self, id: ToolId) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM tools WHERE id = $1")
            .bind(id.value())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::database(format!("Failed to delete tool: {}", e)))?;

        Ok(result.rows_affected() > 0)
    }

    async fn find_by_id(&self, id: ToolId) -> Result<Option<Tool>, DomainError> {
        let row: Option<ToolRow> = sqlx::query_as(&format!("{} WHERE id = $1", SELECT_TOOL))
            .bind(id.value())
            .fetch_optional(&self.pool)
            .await
            .map_err(read_error)?;

        Ok(row.map(Tool::from))
    }

    async fn find_by_key(&self, key: &str) -> Result<Option<Tool>, DomainError> {
        let row: Option<ToolRow> = sqlx::query_as(&format!("{} WHERE tool_key = $1", SELECT_TOOL))
            .bind(key)
            .fetch_optional(&self.pool)
            .await
            .map_err(read_error)?;

        Ok(row.map(Tool::from))
    }

    async fn list(&self, request: PageRequest) -> Result<Page<Tool>, DomainError> {
        let total = self.count().await?;
        let rows: Vec<ToolRow> = sqlx::query_as(&format!(
            "{} ORDER BY display_order ASC, title ASC LIMIT $1 OFFSET $2",
            SELECT_TOOL
        ))
        .bind(request.limit() as i64)
        .bind(request.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(read_error)?;

        Ok(Page::new(rows.into_iter().map(Tool::from).collect(), request, total))
    }

    async fn list_all(&self) -> Result<Vec<Tool>, DomainError> {
        let rows: Vec<ToolRow> =
            sqlx::query_as(&format!("{} ORDER BY display_order ASC, title ASC", SELECT_TOOL))
                .fetch_all(&self.pool)
                .await
                .map_err(read_error)?;

        Ok(rows.into_iter().map(Tool::from).collect())
    }

    async fn list_active(&self) -> Result<Vec<Tool>, DomainError> {
        let rows: Vec<ToolRow> = sqlx::query_as(&format!(
            "{} WHERE active ORDER BY display_order ASC, title ASC",
            SELECT_TOOL
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(read_error)?;

        Ok(rows.into_iter().map(Tool::from).collect())
    }

    async fn count(&self) -> Result<u64, DomainError> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM tools")
            .fetch_one(&self.pool)
            .await
            .map_err(read_error)?;
        Ok(total.max(0) as u64)
    }

    async fn reorder(&self, ids: &[ToolId]) -> Result<Vec<Tool>, DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DomainError::database(format!("Failed to begin transaction: {}", e)))?;

        let rows: Vec<ToolRow> = sqlx::query_as(&format!(
            "{} ORDER BY display_order ASC, title ASC FOR UPDATE",
            SELECT_TOOL
        ))
        .fetch_all(&mut *tx)
        .await
        .map_err(read_error)?;

        let current: Vec<Tool> = rows.into_iter().map(Tool::from).collect();
        let (ordered, changed) = catalog::reorder(current, ids)?;

        for tool in ordered.iter().filter(|t| changed.contains(&t.id)) {
            sqlx::query("UPDATE tools SET display_order = $2, updated_at = $3 WHERE id = $1")
                .bind(tool.id.value())
                .bind(tool.display_order)
                .bind(tool.updated_at.as_datetime())
                .execute(&mut *tx)
                .await
                .map_err(|e| map_write_error(e, "reorder"))?;
        }

        tx.commit()
            .await
            .map_err(|e| DomainError::database(format!("Failed to commit reorder: {}", e)))?;

        Ok(ordered)
    }
}
