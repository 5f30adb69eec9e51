//! Authentication middleware and extractors for axum.
//!
//! This module provides:
//! - `auth_middleware` - Layer that validates access tokens and injects the user into extensions
//! - `lenient_auth_middleware` - Same, but a bad token continues anonymously
//! - `RequireAuth` - Extractor that requires authentication
//! - `RequireAdmin` - Extractor that requires the `ADMIN` role
//! - `OptionalAuth` - Extractor for optional authentication
//!
//! # Architecture
//!
//! The middleware uses the `SessionValidator` port, so the JWT adapter and the
//! test mock are interchangeable.
//!
//! ```text
//! Request → auth_middleware → injects AuthenticatedUser into extensions
//!                                      ↓
//!                              Handler → RequireAuth extractor reads from extensions
//! ```

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, HeaderMap, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use axum_extra::extract::cookie::CookieJar;

use crate::adapters::http::error::ErrorResponse;
use crate::domain::foundation::{AuthError, AuthenticatedUser};
use crate::ports::SessionValidator;

/// Name of the cookie carrying the access token.
pub const ACCESS_COOKIE: &str = "token";

/// Auth middleware state - wraps the session validator.
pub type AuthState = Arc<dyn SessionValidator>;

/// Finds the access token: `Authorization: Bearer` first, then the `token` cookie.
pub fn extract_token(headers: &HeaderMap) -> Option<String> {
    let bearer = headers
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty());
    if let Some(token) = bearer {
        return Some(token.to_string());
    }
    CookieJar::from_headers(headers)
        .get(ACCESS_COOKIE)
        .map(|c| c.value().to_string())
        .filter(|t| !t.is_empty())
}

/// Authentication middleware.
///
/// 1. Extracts the token (Bearer header, then cookie)
/// 2. Validates it with the `SessionValidator` port
/// 3. On success, injects `AuthenticatedUser` into request extensions
/// 4. On missing token, continues anonymously
/// 5. On invalid or expired token, returns 401 `AUTH_ERROR`
pub async fn auth_middleware(
    State(validator): State<AuthState>,
    mut request: Request,
    next: Next,
) -> Response {
    match authenticate(validator.as_ref(), &mut request).await {
        Ok(()) => next.run(request).await,
        Err(e) => {
            let message = match e {
                AuthError::TokenExpired => "Token expired",
                AuthError::InvalidToken => "Invalid token",
            };
            (
                StatusCode::UNAUTHORIZED,
                Json(ErrorResponse::new("AUTH_ERROR", message)),
            )
                .into_response()
        }
    }
}

/// Lenient variant for the session routes: an invalid or expired token is
/// dropped and the request continues anonymously, so a stale cookie never
/// blocks login, refresh or logout.
pub async fn lenient_auth_middleware(
    State(validator): State<AuthState>,
    mut request: Request,
    next: Next,
) -> Response {
    if let Err(e) = authenticate(validator.as_ref(), &mut request).await {
        tracing::debug!(error = %e, "Ignoring stale access token");
    }
    next.run(request).await
}

async fn authenticate(
    validator: &dyn SessionValidator,
    request: &mut Request,
) -> Result<(), AuthError> {
    let Some(token) = extract_token(request.headers()) else {
        return Ok(());
    };
    let user = validator.validate(&token).await?;
    request.extensions_mut().insert(user);
    Ok(())
}

/// Extractor that requires authentication.
///
/// If the auth middleware did not inject a user, returns 401.
#[derive(Debug, Clone)]
pub struct RequireAuth(pub AuthenticatedUser);

impl<S> axum::extract::FromRequestParts<S> for RequireAuth
where
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    fn from_request_parts<'life0, 'life1, 'async_trait>(
        parts: &'life0 mut axum::http::request::Parts,
        _state: &'life1 S,
    ) -> std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self, Self::Rejection>> + Send + 'async_trait>,
    >
    where
        'life0: 'async_trait,
        'life1: 'async_trait,
        Self: 'async_trait,
    {
        Box::pin(async move {
            parts
                .extensions
                .get::<AuthenticatedUser>()
                .cloned()
                .map(RequireAuth)
                .ok_or(AuthRejection::Unauthenticated)
        })
    }
}

/// Extractor that requires an authenticated administrator.
///
/// 401 when anonymous, 403 when authenticated without the `ADMIN` role.
#[derive(Debug, Clone)]
pub struct RequireAdmin(pub AuthenticatedUser);

impl<S> axum::extract::FromRequestParts<S> for RequireAdmin
where
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    fn from_request_parts<'life0, 'life1, 'async_trait>(
        parts: &'life0 mut axum::http::request::Parts,
        _state: &'life1 S,
    ) -> std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self, Self::Rejection>> + Send + 'async_trait>,
    >
    where
        'life0: 'async_trait,
        'life1: 'async_trait,
        Self: 'async_trait,
    {
        Box::pin(async move {
            let user = parts
                .extensions
                .get::<AuthenticatedUser>()
                .cloned()
                .ok_or(AuthRejection::Unauthenticated)?;
            if !user.is_admin() {
                tracing::debug!(user_id = %user.id, "Admin route refused");
                return Err(AuthRejection::Forbidden);
            }
            Ok(RequireAdmin(user))
        })
    }
}

/// Extractor for optional authentication.
///
/// `None` if no token was presented, `Some(user)` if authenticated.
#[derive(Debug, Clone)]
pub struct OptionalAuth(pub Option<AuthenticatedUser>);

impl<S> axum::extract::FromRequestParts<S> for OptionalAuth
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    fn from_request_parts<'life0, 'life1, 'async_trait>(
        parts: &'life0 mut axum::http::request::Parts,
        _state: &'life1 S,
    ) -> std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self, Self::Rejection>> + Send + 'async_trait>,
    >
    where
        'life0: 'async_trait,
        'life1: 'async_trait,
        Self: 'async_trait,
    {
        Box::pin(async move {
            let user = parts.extensions.get::<AuthenticatedUser>().cloned();
            Ok(OptionalAuth(user))
        })
    }
}

/// Rejection type for authentication failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthRejection {
    /// No valid access token was provided.
    Unauthenticated,
    /// Authenticated, but not an administrator.
    Forbidden,
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            AuthRejection::Unauthenticated => (
                StatusCode::UNAUTHORIZED,
                "UNAUTHORIZED",
                "Authentication required",
            ),
            AuthRejection::Forbidden => (
                StatusCode::FORBIDDEN,
                "FORBIDDEN",
                "Administrator role required",
            ),
        };
        (status, Json(ErrorResponse::new(code, message))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::auth::MockSessionValidator;
    use crate::domain::foundation::{Role, UserId};
    use axum::extract::FromRequestParts;
    use axum::http::{header::COOKIE, HeaderValue, Request};

    fn user(role: Role) -> AuthenticatedUser {
        AuthenticatedUser::new(UserId::new(), "alice", vec![role])
    }

    fn parts_with(user: Option<AuthenticatedUser>) -> axum::http::request::Parts {
        let mut request: Request<()> = Request::builder().uri("/test").body(()).unwrap();
        if let Some(user) = user {
            request.extensions_mut().insert(user);
        }
        request.into_parts().0
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Token Extraction Tests
    // ════════════════════════════════════════════════════════════════════════════

    #[test]
    fn bearer_header_wins_over_cookie() {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer from-header"));
        headers.insert(COOKIE, HeaderValue::from_static("token=from-cookie"));

        assert_eq!(extract_token(&headers).as_deref(), Some("from-header"));
    }

    #[test]
    fn falls_back_to_cookie() {
        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, HeaderValue::from_static("theme=dark; token=from-cookie"));

        assert_eq!(extract_token(&headers).as_deref(), Some("from-cookie"));
    }

    #[test]
    fn other_schemes_are_ignored() {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_static("Basic dXNlcjpwYXNz"));

        assert_eq!(extract_token(&headers), None);
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Extractor Tests
    // ════════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn require_auth_extracts_user_from_extensions() {
        let mut parts = parts_with(Some(user(Role::User)));

        let RequireAuth(found) = RequireAuth::from_request_parts(&mut parts, &()).await.unwrap();

        assert_eq!(found.username, "alice");
    }

    #[tokio::test]
    async fn require_auth_fails_without_user() {
        let mut parts = parts_with(None);

        let result = RequireAuth::from_request_parts(&mut parts, &()).await;

        assert_eq!(result.unwrap_err(), AuthRejection::Unauthenticated);
    }

    #[tokio::test]
    async fn require_admin_distinguishes_401_and_403() {
        let mut anonymous = parts_with(None);
        let mut plain = parts_with(Some(user(Role::User)));
        let mut admin = parts_with(Some(user(Role::Admin)));

        assert_eq!(
            RequireAdmin::from_request_parts(&mut anonymous, &()).await.unwrap_err(),
            AuthRejection::Unauthenticated
        );
        assert_eq!(
            RequireAdmin::from_request_parts(&mut plain, &()).await.unwrap_err(),
            AuthRejection::Forbidden
        );
        assert!(RequireAdmin::from_request_parts(&mut admin, &()).await.is_ok());
    }

    #[tokio::test]
    async fn optional_auth_returns_none_when_absent() {
        let mut parts = parts_with(None);

        let OptionalAuth(found) = OptionalAuth::from_request_parts(&mut parts, &()).await.unwrap();

        assert!(found.is_none());
    }

    #[test]
    fn rejections_map_to_statuses() {
        assert_eq!(
            AuthRejection::Unauthenticated.into_response().status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(AuthRejection::Forbidden.into_response().status(), StatusCode::FORBIDDEN);
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Middleware Tests
    // ════════════════════════════════════════════════════════════════════════════

    mod middleware {
        use super::*;
        use axum::{body::Body, middleware::from_fn_with_state, routing::get, Router};
        use tower::ServiceExt;

        async fn whoami(OptionalAuth(user): OptionalAuth) -> String {
            user.map(|u| u.username).unwrap_or_else(|| "anonymous".into())
        }

        fn app(validator: MockSessionValidator) -> Router {
            let validator: AuthState = Arc::new(validator);
            Router::new()
                .route("/whoami", get(whoami))
                .layer(from_fn_with_state(validator, auth_middleware))
        }

        fn validator() -> MockSessionValidator {
            MockSessionValidator::new().with_test_user("good", "alice", Role::User)
        }

        async fn call_with(
            validator: MockSessionValidator,
            header: Option<&str>,
        ) -> (StatusCode, String) {
            let mut builder = Request::builder().uri("/whoami");
            if let Some(value) = header {
                builder = builder.header(AUTHORIZATION, value);
            }
            let response = app(validator)
                .oneshot(builder.body(Body::empty()).unwrap())
                .await
                .unwrap();
            let status = response.status();
            let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
                .await
                .unwrap();
            (status, String::from_utf8(bytes.to_vec()).unwrap())
        }

        async fn call(header: Option<&str>) -> (StatusCode, String) {
            call_with(validator(), header).await
        }

        #[tokio::test]
        async fn valid_token_identifies_caller() {
            assert_eq!(call(Some("Bearer good")).await, (StatusCode::OK, "alice".into()));
        }

        #[tokio::test]
        async fn missing_token_is_anonymous() {
            assert_eq!(call(None).await, (StatusCode::OK, "anonymous".into()));
        }

        #[tokio::test]
        async fn lenient_layer_treats_bad_token_as_anonymous() {
            let validator: AuthState = Arc::new(validator());
            let app = Router::new()
                .route("/whoami", get(whoami))
                .layer(from_fn_with_state(validator, lenient_auth_middleware));

            for (header, expected) in [("Bearer nope", "anonymous"), ("Bearer good", "alice")] {
                let request = Request::builder()
                    .uri("/whoami")
                    .header(AUTHORIZATION, header)
                    .body(Body::empty())
                    .unwrap();
                let response = app.clone().oneshot(request).await.unwrap();
                assert_eq!(response.status(), StatusCode::OK);
                let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
                    .await
                    .unwrap();
                assert_eq!(bytes, expected);
            }
        }

        #[tokio::test]
        async fn bad_or_expired_token_is_rejected() {
            let (status, body) = call(Some("Bearer nope")).await;
            assert_eq!(status, StatusCode::UNAUTHORIZED);
            assert!(body.contains("AUTH_ERROR"));

            let expired = validator().with_error(AuthError::TokenExpired);
            let (status, body) = call_with(expired, Some("Bearer good")).await;
            assert_eq!(status, StatusCode::UNAUTHORIZED);
            assert!(body.contains("Token expired"));
        }
    }
}
