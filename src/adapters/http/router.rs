//! Top-level router: every area under `/api/v1`, plus the cross-cutting layers.
//!
//! Layer order, outermost first:
//!
//! ```text
//! SetRequestId → Trace → PropagateRequestId → Cors → Compression → Timeout → auth_middleware → handlers
//! (`/auth` uses lenient_auth_middleware)
//! ```

use std::time::Duration;

use axum::{
    body::Body,
    http::{
        header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE},
        HeaderValue, Method, Request,
    },
    middleware,
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer,
    cors::{AllowOrigin, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use super::catalog::{admin_tools_router, public_tools_router};
use super::middleware::{auth_middleware, lenient_auth_middleware};
use super::session::auth_router;
use super::state::AppState;
use super::usage::{admin_usage_router, usage_router};
use super::users::users_router;
use super::utilities::utilities_router;

/// Options for the outer layers.
#[derive(Debug, Clone, Default)]
pub struct RouterOptions {
    pub request_timeout: Duration,
    /// Allowed browser origins. Empty disables CORS (same-origin only).
    pub cors_origins: Vec<String>,
}

/// GET /health
async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// All `/api/v1` routes. `/auth` sits behind the lenient auth layer so a
/// stale token cannot block a new session; everything else rejects it.
pub fn api_routes(state: AppState) -> Router {
    let validator = state.session_validator.clone();
    let session = Router::new().nest("/auth", auth_router()).layer(
        middleware::from_fn_with_state(validator.clone(), lenient_auth_middleware),
    );
    let protected = Router::new()
        .nest("/users", users_router())
        .nest("/public/tools", public_tools_router())
        .nest("/admin/tools", admin_tools_router())
        .nest("/admin/logs", admin_usage_router())
        .nest("/logs", usage_router())
        .nest("/tools", utilities_router())
        .layer(middleware::from_fn_with_state(validator, auth_middleware));
    session.merge(protected).with_state(state)
}

fn cors_layer(origins: &[String]) -> Option<CorsLayer> {
    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(%origin, "Ignoring unparseable CORS origin");
                None
            }
        })
        .collect();
    if allowed.is_empty() {
        return None;
    }
    Some(
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(allowed))
            .allow_methods([
                Method::GET,
                Method::POST,
                Method::PUT,
                Method::PATCH,
                Method::DELETE,
                Method::OPTIONS,
            ])
            .allow_headers([AUTHORIZATION, CONTENT_TYPE, ACCEPT])
            .allow_credentials(true),
    )
}

/// The complete application, ready for `axum::serve`.
pub fn app_router(state: AppState, options: &RouterOptions) -> Router {
    let mut app = Router::new()
        .route("/health", get(health))
        .nest("/api/v1", api_routes(state))
        .layer(
            ServiceBuilder::new()
                .layer(CompressionLayer::new())
                .layer(TimeoutLayer::new(options.request_timeout)),
        );

    if let Some(cors) = cors_layer(&options.cors_origins) {
        app = app.layer(cors);
    }

    app.layer(
        ServiceBuilder::new()
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
            .layer(
                TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
                    let request_id = request
                        .headers()
                        .get("x-request-id")
                        .and_then(|v| v.to_str().ok())
                        .unwrap_or("-");
                    tracing::info_span!(
                        "http",
                        method = %request.method(),
                        uri = %request.uri(),
                        request_id = %request_id,
                    )
                }),
            )
            .layer(PropagateRequestIdLayer::x_request_id()),
    )
}
