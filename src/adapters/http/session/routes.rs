//! Axum router for session endpoints.

use axum::{routing::post, Router};

use super::handlers::{forgot_password, login, logout, refresh, register};
use crate::adapters::http::state::AppState;

/// Create the auth router, mounted at `/api/v1/auth`.
///
/// # Routes
///
/// - `POST /login` - Credentials for access + refresh cookies
/// - `POST /refresh` - New access cookie (refresh cookie required)
/// - `POST /logout` - Clear cookies
/// - `POST /register` - Sign up
/// - `POST /forgot-password` - Acknowledge a reset request
pub fn auth_router() -> Router<AppState> {
    Router::new()
        .route("/login", post(login))
        .route("/refresh", post(refresh))
        .route("/logout", post(logout))
        .route("/register", post(register))
        .route("/forgot-password", post(forgot_password))
}
