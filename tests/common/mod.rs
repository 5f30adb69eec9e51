//! Shared harness: the full router over in-memory adapters.

#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{header, HeaderMap, Method, Request, StatusCode};
use axum::Router;
use secrecy::SecretString;
use serde_json::Value;
use tower::ServiceExt;

use tool_hub::adapters::auth::{BcryptPasswordHasher, JwtTokenService};
use tool_hub::adapters::http::{app_router, AppState, HttpSettings, RouterOptions};
use tool_hub::adapters::memory::{
    InMemoryRefreshTokenRepository, InMemoryToolRepository, InMemoryUsageLogRepository,
    InMemoryUserRepository,
};
use tool_hub::adapters::network::{MockDnsResolver, MockHttpProbe};
use tool_hub::application::SeedHandler;
use tool_hub::ports::{DnsResolver, HttpProbe};

pub const ADMIN_USERNAME: &str = "admin";
pub const ADMIN_EMAIL: &str = "admin@toolhub.local";
pub const ADMIN_PASSWORD: &str = "admin-password";

pub struct TestApp {
    pub router: Router,
    pub state: AppState,
}

/// Response pieces the tests assert on.
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
}

impl TestResponse {
    /// Every `Set-Cookie` header value.
    pub fn set_cookies(&self) -> Vec<String> {
        self.headers
            .get_all(header::SET_COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok().map(str::to_string))
            .collect()
    }

    /// Value of the named cookie from `Set-Cookie`.
    pub fn cookie(&self, name: &str) -> Option<String> {
        let prefix = format!("{}=", name);
        self.set_cookies().into_iter().find_map(|c| {
            c.strip_prefix(&prefix)
                .map(|rest| rest.split(';').next().unwrap_or_default().to_string())
        })
    }
}

impl TestApp {
    pub async fn new() -> Self {
        Self::with_network(Arc::new(MockDnsResolver::new()), Arc::new(MockHttpProbe::ok())).await
    }

    /// Builds the app with the given network doubles and seeds the catalog and admin.
    pub async fn with_network(
        dns_resolver: Arc<dyn DnsResolver>,
        http_probe: Arc<dyn HttpProbe>,
    ) -> Self {
        let jwt = Arc::new(JwtTokenService::new(
            &SecretString::new("integration-secret-integration-secret".to_string()),
            900,
        ));
        let state = AppState {
            users: Arc::new(InMemoryUserRepository::new()),
            tools: Arc::new(InMemoryToolRepository::new()),
            usage_logs: Arc::new(InMemoryUsageLogRepository::new()),
            refresh_tokens: Arc::new(InMemoryRefreshTokenRepository::new()),
            password_hasher: Arc::new(BcryptPasswordHasher::new(4)),
            token_issuer: jwt.clone(),
            session_validator: jwt,
            dns_resolver,
            http_probe,
            settings: HttpSettings {
                bcrypt_cost: 4,
                ..HttpSettings::default()
            },
        };

        SeedHandler::new(
            state.tools.clone(),
            state.users.clone(),
            state.password_hasher.clone(),
        )
        .run(Some((ADMIN_USERNAME, ADMIN_EMAIL, ADMIN_PASSWORD)))
        .await
        .expect("seeding succeeds");

        let router = app_router(
            state.clone(),
            &RouterOptions {
                request_timeout: Duration::from_secs(10),
                cors_origins: Vec::new(),
            },
        );
        Self { router, state }
    }

    pub async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible");
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body is readable");
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).expect("body is JSON")
        };
        TestResponse {
            status,
            headers,
            body,
        }
    }

    pub async fn call(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string())),
            None => builder.body(Body::empty()),
        }
        .expect("request builds");
        self.send(request).await
    }

    pub async fn get(&self, uri: &str, token: Option<&str>) -> TestResponse {
        self.call(Method::GET, uri, token, None).await
    }

    pub async fn post(&self, uri: &str, token: Option<&str>, body: Value) -> TestResponse {
        self.call(Method::POST, uri, token, Some(body)).await
    }

    /// Logs in and returns the access token.
    pub async fn login(&self, username: &str, password: &str) -> String {
        let response = self
            .post(
                "/api/v1/auth/login",
                None,
                serde_json::json!({ "username": username, "password": password }),
            )
            .await;
        assert_eq!(response.status, StatusCode::OK, "login failed: {}", response.body);
        response.body["accessToken"]
            .as_str()
            .expect("access token in body")
            .to_string()
    }

    pub async fn admin_token(&self) -> String {
        self.login(ADMIN_USERNAME, ADMIN_PASSWORD).await
    }

    /// Registers a plain user and returns their access token.
    pub async fn user_token(&self, username: &str) -> String {
        let response = self
            .post(
                "/api/v1/auth/register",
                None,
                serde_json::json!({
                    "username": username,
                    "email": format!("{}@example.com", username),
                    "password": "secret-pass",
                }),
            )
            .await;
        assert_eq!(response.status, StatusCode::CREATED, "{}", response.body);
        self.login(username, "secret-pass").await
    }
}
