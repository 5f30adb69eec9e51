//! Axum routers for the tool catalog.

use axum::{
    routing::{get, post, put},
    Router,
};

use super::handlers::{
    active_tools, create_tool, delete_tool, get_tool, list_tools, reorder_tools, set_status,
    update_tool,
};
use crate::adapters::http::state::AppState;

/// Anonymous catalog routes, mounted at `/api/v1/public/tools`.
///
/// - `GET /active` - Active tools in display order
pub fn public_tools_router() -> Router<AppState> {
    Router::new().route("/active", get(active_tools))
}

/// Admin catalog routes, mounted at `/api/v1/admin/tools`.
///
/// - `GET /`, `POST /` - Paginated list and create
/// - `GET /:id`, `PUT /:id`, `DELETE /:id`
/// - `PUT /:id/status`, `PATCH /:id/status` - Enable or disable
/// - `POST /reorder` - Reassign display order
pub fn admin_tools_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_tools).post(create_tool))
        .route("/reorder", post(reorder_tools))
        .route("/:id", get(get_tool).put(update_tool).delete(delete_tool))
        .route("/:id/status", put(set_status).patch(set_status))
}
