//! Axum router for account endpoints.

use axum::{
    routing::{get, patch},
    Router,
};

use super::handlers::{
    change_role, count_users, create_user, delete_user, get_profile, get_user, has_role,
    list_users, patch_user, replace_user, update_profile, usage_today, users_by_role,
};
use crate::adapters::http::state::AppState;

/// Create the users router, mounted at `/api/v1/users`.
///
/// # Routes
///
/// ## Caller
/// - `GET /me`, `PUT /me` - Own profile
/// - `GET /me/usage/today` - Own tool uses since midnight UTC
/// - `GET /count` - Number of accounts
///
/// ## Admin
/// - `GET /`, `POST /` - List (page, size, search, role) and create
/// - `GET /:id`, `PUT /:id`, `PATCH /:id`, `DELETE /:id`
/// - `PATCH /:id/role` - Change role
/// - `GET /role/:role` - List by role
/// - `GET /:id/has-role/:role` - Boolean role check
pub fn users_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_users).post(create_user))
        .route("/me", get(get_profile).put(update_profile))
        .route("/me/usage/today", get(usage_today))
        .route("/count", get(count_users))
        .route("/role/:role", get(users_by_role))
        .route(
            "/:id",
            get(get_user)
                .put(replace_user)
                .patch(patch_user)
                .delete(delete_user),
        )
        .route("/:id/role", patch(change_role))
        .route("/:id/has-role/:role", get(has_role))
}
