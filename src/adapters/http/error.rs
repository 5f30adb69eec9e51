//! API error type and the JSON error body shared by every route.

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query,
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use axum_extra::extract::WithRejection;
use serde::Serialize;
use std::collections::BTreeMap;

use crate::domain::foundation::{DomainError, ErrorCode};
use crate::domain::utilities::UtilityError;

/// `{ "error": <message>, "code": <ERROR_CODE>, "details"?: {...} }`
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<BTreeMap<String, String>>,
}

impl ErrorResponse {
    pub fn new(code: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            code: code.into(),
            details: None,
        }
    }
}

/// Extractors whose rejections render as [`ErrorResponse`] instead of plain text.
pub type ApiJson<T> = WithRejection<Json<T>, ApiError>;
pub type ApiQuery<T> = WithRejection<Query<T>, ApiError>;
pub type ApiPath<T> = WithRejection<Path<T>, ApiError>;

/// Converts domain errors into HTTP responses.
#[derive(Debug)]
pub struct ApiError(pub DomainError);

impl ApiError {
    pub fn bad_request(field: &str, message: impl Into<String>) -> Self {
        Self(DomainError::validation(field, message))
    }

    fn status(&self) -> StatusCode {
        match self.0.code {
            ErrorCode::ValidationFailed
            | ErrorCode::UnsupportedAlgorithm
            | ErrorCode::TargetNotAllowed => StatusCode::BAD_REQUEST,
            ErrorCode::UserNotFound | ErrorCode::ToolNotFound | ErrorCode::RefreshTokenNotFound => {
                StatusCode::NOT_FOUND
            }
            ErrorCode::UsernameTaken
            | ErrorCode::EmailTaken
            | ErrorCode::ToolKeyTaken
            | ErrorCode::Conflict => StatusCode::CONFLICT,
            ErrorCode::InvalidCredentials | ErrorCode::Unauthorized | ErrorCode::TokenExpired => {
                StatusCode::UNAUTHORIZED
            }
            ErrorCode::Forbidden => StatusCode::FORBIDDEN,
            ErrorCode::UpstreamError => StatusCode::BAD_GATEWAY,
            ErrorCode::DatabaseError | ErrorCode::InternalError => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        Self(err)
    }
}

impl From<UtilityError> for ApiError {
    fn from(err: UtilityError) -> Self {
        Self(err.into())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::bad_request("body", rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::bad_request("query", rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        Self::bad_request("path", rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = if status.is_server_error() {
            tracing::error!(code = %self.0.code, "Request failed: {}", self.0.message);
            ErrorResponse::new(self.0.code.to_string(), "An internal error occurred")
        } else {
            ErrorResponse {
                error: self.0.message,
                code: self.0.code.to_string(),
                details: (!self.0.details.is_empty())
                    .then(|| self.0.details.into_iter().collect()),
            }
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status_of(code: ErrorCode) -> StatusCode {
        ApiError(DomainError::new(code, "x")).into_response().status()
    }

    #[test]
    fn maps_codes_to_statuses() {
        assert_eq!(status_of(ErrorCode::ValidationFailed), StatusCode::BAD_REQUEST);
        assert_eq!(status_of(ErrorCode::UnsupportedAlgorithm), StatusCode::BAD_REQUEST);
        assert_eq!(status_of(ErrorCode::ToolNotFound), StatusCode::NOT_FOUND);
        assert_eq!(status_of(ErrorCode::EmailTaken), StatusCode::CONFLICT);
        assert_eq!(status_of(ErrorCode::InvalidCredentials), StatusCode::UNAUTHORIZED);
        assert_eq!(status_of(ErrorCode::TokenExpired), StatusCode::UNAUTHORIZED);
        assert_eq!(status_of(ErrorCode::Forbidden), StatusCode::FORBIDDEN);
        assert_eq!(status_of(ErrorCode::UpstreamError), StatusCode::BAD_GATEWAY);
        assert_eq!(status_of(ErrorCode::DatabaseError), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn server_errors_hide_the_message() {
        let response = ApiError(DomainError::database("password=hunter2")).into_response();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();

        assert_eq!(json["error"], "An internal error occurred");
        assert_eq!(json["code"], "DATABASE_ERROR");
    }

    #[tokio::test]
    async fn validation_errors_carry_details() {
        let response = ApiError(DomainError::validation("username", "too short")).into_response();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();

        assert_eq!(json["details"]["field"], "username");
    }

    #[test]
    fn error_body_shape() {
        let body = ErrorResponse::new("TOOL_NOT_FOUND", "Tool not found");
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["error"], "Tool not found");
        assert_eq!(json["code"], "TOOL_NOT_FOUND");
        assert!(json.get("details").is_none());
    }
}
