//! HTTP handlers for `/users`.

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use axum_extra::extract::WithRejection;
use uuid::Uuid;

use super::dto::{CreateUserRequest, ListUsersParams, RoleRequest, UpdateUserRequest, UserResponse};
use crate::adapters::http::error::{ApiError, ApiJson, ApiPath, ApiQuery};
use crate::adapters::http::middleware::{RequireAdmin, RequireAuth};
use crate::adapters::http::state::AppState;
use crate::application::handlers::accounts::{
    CreateUserCommand, DeleteUserCommand, ListUsersQuery, UpdateUserCommand,
};
use crate::domain::foundation::{DomainError, PageRequest, Role, UserId};

fn parse_role(raw: &str) -> Result<Role, ApiError> {
    raw.parse::<Role>()
        .map_err(|e| ApiError(DomainError::from(e)))
}

fn parse_optional_role(raw: Option<&str>) -> Result<Option<Role>, ApiError> {
    raw.map(str::trim)
        .filter(|r| !r.is_empty())
        .map(parse_role)
        .transpose()
}

// ════════════════════════════════════════════════════════════════════════════════
// Admin Queries
// ════════════════════════════════════════════════════════════════════════════════

/// GET /api/v1/users - Paginated listing with optional search and role filter
pub async fn list_users(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    WithRejection(query, _): ApiQuery<ListUsersParams>,
) -> Result<impl IntoResponse, ApiError> {
    let params = query.0;
    let page = state
        .user_queries()
        .list(ListUsersQuery {
            page: PageRequest::new(params.page, params.size),
            search: params.search,
            role: parse_optional_role(params.role.as_deref())?,
        })
        .await?;
    Ok(Json(page.map(UserResponse::from)))
}

/// GET /api/v1/users/:id
pub async fn get_user(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    WithRejection(path, _): ApiPath<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let user = state.user_queries().get(&UserId::from_uuid(path.0)).await?;
    Ok(Json(UserResponse::from(user)))
}

/// GET /api/v1/users/role/:role
pub async fn users_by_role(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    WithRejection(path, _): ApiPath<String>,
) -> Result<impl IntoResponse, ApiError> {
    let users = state.user_queries().by_role(parse_role(&path.0)?).await?;
    Ok(Json(users.into_iter().map(UserResponse::from).collect::<Vec<_>>()))
}

/// GET /api/v1/users/:id/has-role/:role - Plain boolean body
pub async fn has_role(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    WithRejection(path, _): ApiPath<(Uuid, String)>,
) -> Result<impl IntoResponse, ApiError> {
    let (id, role) = path.0;
    let result = state
        .user_queries()
        .has_role(&UserId::from_uuid(id), parse_role(&role)?)
        .await?;
    Ok(Json(result))
}

// ════════════════════════════════════════════════════════════════════════════════
// Admin Commands
// ════════════════════════════════════════════════════════════════════════════════

/// POST /api/v1/users - Create an account (role defaults to USER)
pub async fn create_user(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    WithRejection(body, _): ApiJson<CreateUserRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let req = body.0;
    let role = parse_optional_role(req.role.as_deref())?.unwrap_or_default();
    let user = state
        .create_user_handler()
        .handle(CreateUserCommand {
            username: req.username,
            email: req.email,
            password: req.password,
            role,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(UserResponse::from(user))))
}

/// PUT /api/v1/users/:id - Replace username and email; password and role optional
pub async fn replace_user(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    WithRejection(path, _): ApiPath<Uuid>,
    WithRejection(body, _): ApiJson<UpdateUserRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let req = body.0;
    if req.username.is_none() {
        return Err(ApiError::bad_request("username", "Field 'username' is required"));
    }
    if req.email.is_none() {
        return Err(ApiError::bad_request("email", "Field 'email' is required"));
    }
    let cmd = UpdateUserCommand {
        role: parse_optional_role(req.role.as_deref())?,
        username: req.username,
        email: req.email,
        password: req.password.filter(|p| !p.is_empty()),
        user_id: UserId::from_uuid(path.0),
    };
    let user = state.update_user_handler().handle(cmd).await?;
    Ok(Json(UserResponse::from(user)))
}

/// PATCH /api/v1/users/:id - Partial update; blank fields are ignored
pub async fn patch_user(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    WithRejection(path, _): ApiPath<Uuid>,
    WithRejection(body, _): ApiJson<UpdateUserRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let req = body.0;
    let cmd = UpdateUserCommand {
        role: parse_optional_role(req.role.as_deref())?,
        username: req.username,
        email: req.email,
        password: req.password,
        user_id: UserId::from_uuid(path.0),
    }
    .ignoring_blanks();
    let user = state.update_user_handler().handle(cmd).await?;
    Ok(Json(UserResponse::from(user)))
}

/// PATCH /api/v1/users/:id/role
pub async fn change_role(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    WithRejection(path, _): ApiPath<Uuid>,
    WithRejection(body, _): ApiJson<RoleRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let cmd = UpdateUserCommand {
        role: Some(parse_role(&body.0.role)?),
        ..UpdateUserCommand::for_user(UserId::from_uuid(path.0))
    };
    let user = state.update_user_handler().handle(cmd).await?;
    Ok(Json(UserResponse::from(user)))
}

/// DELETE /api/v1/users/:id - 204; administrators cannot delete themselves
pub async fn delete_user(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    WithRejection(path, _): ApiPath<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    state
        .delete_user_handler()
        .handle(DeleteUserCommand {
            user_id: UserId::from_uuid(path.0),
            requested_by: admin.id,
        })
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

// ════════════════════════════════════════════════════════════════════════════════
// Authenticated Caller
// ════════════════════════════════════════════════════════════════════════════════

/// GET /api/v1/users/count - Plain number body
pub async fn count_users(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
) -> Result<impl IntoResponse, ApiError> {
    Ok(Json(state.user_queries().count().await?))
}

/// GET /api/v1/users/me
pub async fn get_profile(
    State(state): State<AppState>,
    RequireAuth(caller): RequireAuth,
) -> Result<impl IntoResponse, ApiError> {
    let user = state.user_queries().get(&caller.id).await?;
    Ok(Json(UserResponse::from(user)))
}

/// PUT /api/v1/users/me - The role field is ignored
pub async fn update_profile(
    State(state): State<AppState>,
    RequireAuth(caller): RequireAuth,
    WithRejection(body, _): ApiJson<UpdateUserRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let req = body.0;
    let cmd = UpdateUserCommand {
        username: req.username,
        email: req.email,
        password: req.password,
        role: None,
        user_id: caller.id,
    }
    .ignoring_blanks();
    let user = state.update_user_handler().handle(cmd).await?;
    Ok(Json(UserResponse::from(user)))
}

/// GET /api/v1/users/me/usage/today - Plain number body
pub async fn usage_today(
    State(state): State<AppState>,
    RequireAuth(caller): RequireAuth,
) -> Result<impl IntoResponse, ApiError> {
    Ok(Json(state.usage_queries().count_today(&caller.id).await?))
}
