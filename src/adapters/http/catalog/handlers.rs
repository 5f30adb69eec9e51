//! HTTP handlers for the tool catalog.

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use axum_extra::extract::WithRejection;

use super::dto::{
    CreateToolRequest, PageParams, ReorderRequest, StatusRequest, ToolResponse, UpdateToolRequest,
};
use crate::adapters::http::error::{ApiError, ApiJson, ApiPath, ApiQuery};
use crate::adapters::http::middleware::RequireAdmin;
use crate::adapters::http::state::AppState;
use crate::domain::foundation::{DomainError, PageRequest, ToolId};

fn to_responses(tools: Vec<crate::domain::catalog::Tool>) -> Vec<ToolResponse> {
    tools.into_iter().map(ToolResponse::from).collect()
}

/// GET /api/v1/public/tools/active - Anonymous; what the dashboard renders
pub async fn active_tools(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    Ok(Json(to_responses(state.tool_queries().active().await?)))
}

/// GET /api/v1/admin/tools
pub async fn list_tools(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    WithRejection(query, _): ApiQuery<PageParams>,
) -> Result<impl IntoResponse, ApiError> {
    let params = query.0;
    let page = state
        .tool_queries()
        .list(PageRequest::new(params.page, params.size))
        .await?;
    Ok(Json(page.map(ToolResponse::from)))
}

/// GET /api/v1/admin/tools/:id
pub async fn get_tool(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    WithRejection(path, _): ApiPath<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let tool = state.tool_queries().get(ToolId::new(path.0)).await?;
    Ok(Json(ToolResponse::from(tool)))
}

/// POST /api/v1/admin/tools
pub async fn create_tool(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    WithRejection(body, _): ApiJson<CreateToolRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let new_tool = body.0.into_new_tool().map_err(DomainError::from)?;
    let tool = state.create_tool_handler().handle(new_tool).await?;
    Ok((StatusCode::CREATED, Json(ToolResponse::from(tool))))
}

/// PUT /api/v1/admin/tools/:id - Partial update
pub async fn update_tool(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    WithRejection(path, _): ApiPath<i64>,
    WithRejection(body, _): ApiJson<UpdateToolRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let tool = state
        .update_tool_handler()
        .handle(ToolId::new(path.0), body.0.into())
        .await?;
    Ok(Json(ToolResponse::from(tool)))
}

/// PUT|PATCH /api/v1/admin/tools/:id/status
pub async fn set_status(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    WithRejection(path, _): ApiPath<i64>,
    WithRejection(body, _): ApiJson<StatusRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let tool = state
        .update_tool_handler()
        .set_status(ToolId::new(path.0), body.0.status)
        .await?;
    Ok(Json(ToolResponse::from(tool)))
}

/// DELETE /api/v1/admin/tools/:id
pub async fn delete_tool(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    WithRejection(path, _): ApiPath<i64>,
) -> Result<impl IntoResponse, ApiError> {
    state.update_tool_handler().delete(ToolId::new(path.0)).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/admin/tools/reorder - Position in `toolIds` becomes the display order
pub async fn reorder_tools(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    WithRejection(body, _): ApiJson<ReorderRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let ids: Vec<ToolId> = body.0.tool_ids.into_iter().map(ToolId::new).collect();
    let tools = state.update_tool_handler().reorder(&ids).await?;
    Ok(Json(to_responses(tools)))
}
