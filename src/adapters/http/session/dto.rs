//! Request and response bodies for `/auth`.

use serde::{Deserialize, Serialize};

use crate::adapters::http::users::dto::UserResponse;
use crate::domain::foundation::Timestamp;

#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    /// Username or email address.
    #[serde(alias = "email", alias = "login")]
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    #[serde(alias = "passwordHash")]
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ForgotPasswordRequest {
    pub email: String,
}

/// Body of a successful login or refresh.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    pub user: UserResponse,
    pub access_token: String,
    pub expires_at: Timestamp,
}

#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_accepts_email_field_name() {
        let req: LoginRequest =
            serde_json::from_str(r#"{"email":"a@b.io","password":"secret1"}"#).unwrap();
        assert_eq!(req.username, "a@b.io");
    }

    #[test]
    fn register_accepts_password_hash_alias() {
        let req: RegisterRequest = serde_json::from_str(
            r#"{"username":"bob","email":"bob@b.io","passwordHash":"secret1"}"#,
        )
        .unwrap();
        assert_eq!(req.password, "secret1");
    }
}
