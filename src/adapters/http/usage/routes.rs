//! Axum routers for tool usage logging.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{list_usage, record_usage};
use crate::adapters::http::state::AppState;

/// Mounted at `/api/v1/logs`: `POST /` records a use by the caller.
pub fn usage_router() -> Router<AppState> {
    Router::new().route("/", post(record_usage))
}

/// Mounted at `/api/v1/admin/logs`: `GET /?page&size&userId`.
pub fn admin_usage_router() -> Router<AppState> {
    Router::new().route("/", get(list_usage))
}
