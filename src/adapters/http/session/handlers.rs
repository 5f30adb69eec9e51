//! HTTP handlers for `/auth`.

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use axum_extra::extract::{cookie::CookieJar, WithRejection};

use super::cookies::{cleared, with_access_cookie, with_refresh_cookie, REFRESH_COOKIE};
use super::dto::{
    ForgotPasswordRequest, LoginRequest, MessageResponse, RegisterRequest, SessionResponse,
};
use crate::adapters::http::error::{ApiError, ApiJson};
use crate::adapters::http::middleware::OptionalAuth;
use crate::adapters::http::state::AppState;
use crate::adapters::http::users::dto::UserResponse;
use crate::application::handlers::auth::{LoginCommand, RefreshSessionCommand, RegisterCommand};

/// POST /api/v1/auth/login - Sets the access and refresh cookies
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    WithRejection(body, _): ApiJson<LoginRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let req = body.0;
    let result = state
        .login_handler()
        .handle(LoginCommand {
            login: req.username,
            password: req.password,
        })
        .await?;

    let secure = state.settings.secure_cookies;
    let jar = with_access_cookie(
        jar,
        result.access_token.token.clone(),
        state.token_issuer.ttl_secs(),
        secure,
    );
    let jar = with_refresh_cookie(
        jar,
        result.refresh_token.token,
        state.settings.refresh_token_ttl_secs,
        secure,
    );

    let body = SessionResponse {
        user: UserResponse::from(result.user),
        access_token: result.access_token.token,
        expires_at: result.access_token.expires_at,
    };
    Ok((jar, Json(body)))
}

/// POST /api/v1/auth/refresh - New access cookie from the refresh cookie
pub async fn refresh(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<impl IntoResponse, ApiError> {
    let Some(refresh_token) = jar
        .get(REFRESH_COOKIE)
        .map(|c| c.value().to_string())
        .filter(|v| !v.is_empty())
    else {
        return Err(ApiError::bad_request(
            REFRESH_COOKIE,
            "Refresh token cookie is missing",
        ));
    };

    let result = state
        .refresh_session_handler()
        .handle(RefreshSessionCommand { refresh_token })
        .await?;

    let jar = with_access_cookie(
        jar,
        result.access_token.token.clone(),
        state.token_issuer.ttl_secs(),
        state.settings.secure_cookies,
    );
    let body = SessionResponse {
        user: UserResponse::from(result.user),
        access_token: result.access_token.token,
        expires_at: result.access_token.expires_at,
    };
    Ok((jar, Json(body)))
}

/// POST /api/v1/auth/logout - Clears cookies; revokes refresh tokens when authenticated
pub async fn logout(
    State(state): State<AppState>,
    OptionalAuth(caller): OptionalAuth,
    jar: CookieJar,
) -> Result<impl IntoResponse, ApiError> {
    state
        .logout_handler()
        .handle(caller.as_ref().map(|u| &u.id))
        .await?;
    Ok((
        cleared(jar, state.settings.secure_cookies),
        Json(MessageResponse {
            message: "Logged out",
        }),
    ))
}

/// POST /api/v1/auth/register - Self-service sign-up, always role USER
pub async fn register(
    State(state): State<AppState>,
    WithRejection(body, _): ApiJson<RegisterRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let req = body.0;
    let user = state
        .register_handler()
        .handle(RegisterCommand {
            username: req.username,
            email: req.email,
            password: req.password,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(UserResponse::from(user))))
}

/// POST /api/v1/auth/forgot-password - Same answer whether or not the email exists
pub async fn forgot_password(
    State(state): State<AppState>,
    WithRejection(body, _): ApiJson<ForgotPasswordRequest>,
) -> Result<impl IntoResponse, ApiError> {
    state.password_reset_handler().handle(&body.0.email).await?;
    Ok(Json(MessageResponse {
        message: "If the email is registered, password reset instructions have been sent",
    }))
}
