//! HTTP handlers for tool usage logging.

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use axum_extra::extract::WithRejection;

use super::dto::{RecordUsageRequest, UsageLogParams, UsageRecordResponse};
use crate::adapters::http::error::{ApiError, ApiJson, ApiQuery};
use crate::adapters::http::middleware::{ClientIp, RequireAdmin, RequireAuth};
use crate::adapters::http::state::AppState;
use crate::application::handlers::usage::RecordUsageCommand;
use crate::domain::foundation::{PageRequest, UserId};

/// POST /api/v1/logs - 201 with an empty body
pub async fn record_usage(
    State(state): State<AppState>,
    RequireAuth(caller): RequireAuth,
    ClientIp(ip_address): ClientIp,
    WithRejection(body, _): ApiJson<RecordUsageRequest>,
) -> Result<impl IntoResponse, ApiError> {
    state
        .record_usage_handler()
        .handle(RecordUsageCommand {
            user_id: caller.id,
            tool_name: body.0.tool_name,
            ip_address,
        })
        .await?;
    Ok(StatusCode::CREATED)
}

/// GET /api/v1/admin/logs - Newest first, optionally for one user
pub async fn list_usage(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    WithRejection(query, _): ApiQuery<UsageLogParams>,
) -> Result<impl IntoResponse, ApiError> {
    let params = query.0;
    let user_id = params.user_id.map(UserId::from_uuid);
    let page = state
        .usage_queries()
        .list(PageRequest::new(params.page, params.size), user_id.as_ref())
        .await?;
    Ok(Json(page.map(UsageRecordResponse::from)))
}
