//! HS256 JWT access tokens.
//!
//! Implements both `AccessTokenIssuer` and `SessionValidator` with a single
//! shared secret. Claims:
//!
//! | Claim   | Content                          |
//! |---------|----------------------------------|
//! | `sub`   | username                         |
//! | `uid`   | user id (UUID)                   |
//! | `roles` | role names, e.g. `["ADMIN"]`     |
//! | `iat`   | issue time (seconds)             |
//! | `exp`   | expiry (seconds)                 |

use async_trait::async_trait;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::account::User;
use crate::domain::foundation::{
    AuthError, AuthenticatedUser, DomainError, Role, Timestamp, UserId,
};
use crate::ports::{AccessTokenIssuer, IssuedAccessToken, SessionValidator};

/// Clock skew tolerated when checking `exp`.
const LEEWAY_SECS: u64 = 5;

#[derive(Debug, Serialize, Deserialize)]
struct AccessClaims {
    sub: String,
    uid: Uuid,
    #[serde(default)]
    roles: Vec<String>,
    iat: i64,
    exp: i64,
}

/// Signs and validates access tokens.
pub struct JwtTokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    ttl_secs: u64,
}

impl JwtTokenService {
    pub fn new(secret: &SecretString, ttl_secs: u64) -> Self {
        let bytes = secret.expose_secret().as_bytes();
        Self {
            encoding_key: EncodingKey::from_secret(bytes),
            decoding_key: DecodingKey::from_secret(bytes),
            ttl_secs,
        }
    }

    fn validation() -> Validation {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = LEEWAY_SECS;
        validation.validate_exp = true;
        validation.set_required_spec_claims(&["exp", "sub"]);
        validation
    }

    fn sign(&self, claims: &AccessClaims) -> Result<String, DomainError> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding_key)
            .map_err(|e| DomainError::internal(format!("Failed to sign access token: {}", e)))
    }
}

impl AccessTokenIssuer for JwtTokenService {
    fn issue(&self, user: &User) -> Result<IssuedAccessToken, DomainError> {
        let now = Timestamp::now();
        let expires_at = now.plus_seconds(i64::try_from(self.ttl_secs).unwrap_or(i64::MAX / 2));
        let claims = AccessClaims {
            sub: user.username.clone(),
            uid: *user.id.as_uuid(),
            roles: vec![user.role.as_str().to_string()],
            iat: now.unix_seconds(),
            exp: expires_at.unix_seconds(),
        };
        Ok(IssuedAccessToken {
            token: self.sign(&claims)?,
            expires_at,
        })
    }

    fn ttl_secs(&self) -> u64 {
        self.ttl_secs
    }
}

#[async_trait]
impl SessionValidator for JwtTokenService {
    async fn validate(&self, token: &str) -> Result<AuthenticatedUser, AuthError> {
        let data = decode::<AccessClaims>(token, &self.decoding_key, &Self::validation())
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => {
                    tracing::debug!("Access token expired");
                    AuthError::TokenExpired
                }
                _ => {
                    tracing::debug!("Access token rejected: {}", e);
                    AuthError::InvalidToken
                }
            })?;

        let claims = data.claims;
        let roles = claims
            .roles
            .iter()
            .filter_map(|r| r.parse::<Role>().ok())
            .collect();
        Ok(AuthenticatedUser::new(
            UserId::from_uuid(claims.uid),
            claims.sub,
            roles,
        ))
    }
}

impl std::fmt::Debug for JwtTokenService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtTokenService")
            .field("ttl_secs", &self.ttl_secs)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn secret(s: &str) -> SecretString {
        SecretString::new(s.to_string())
    }

    fn service() -> JwtTokenService {
        JwtTokenService::new(&secret("0123456789abcdef0123456789abcdef"), 900)
    }

    fn admin() -> User {
        User::register("root", "root@example.com", "hash".into(), Role::Admin).unwrap()
    }

    #[tokio::test]
    async fn issued_token_validates_to_same_identity() {
        let service = service();
        let user = admin();
        let issued = service.issue(&user).unwrap();

        let authenticated = service.validate(&issued.token).await.unwrap();

        assert_eq!(authenticated.id, user.id);
        assert_eq!(authenticated.username, "root");
        assert!(authenticated.is_admin());
        assert!(issued.expires_at.is_after(&Timestamp::now()));
    }

    #[tokio::test]
    async fn token_signed_with_other_secret_is_invalid() {
        let other = JwtTokenService::new(&secret("another-secret-another-secret-xx"), 900);
        let issued = other.issue(&admin()).unwrap();

        let result = service().validate(&issued.token).await;

        assert_eq!(result, Err(AuthError::InvalidToken));
    }

    #[tokio::test]
    async fn expired_token_is_reported_as_expired() {
        let service = service();
        let now = Timestamp::now().unix_seconds();
        let token = service
            .sign(&AccessClaims {
                sub: "root".into(),
                uid: Uuid::new_v4(),
                roles: vec!["USER".into()],
                iat: now - 3600,
                exp: now - 600,
            })
            .unwrap();

        assert_eq!(service.validate(&token).await, Err(AuthError::TokenExpired));
    }

    #[tokio::test]
    async fn garbage_is_invalid() {
        assert_eq!(
            service().validate("not.a.jwt").await,
            Err(AuthError::InvalidToken)
        );
    }

    #[tokio::test]
    async fn unknown_roles_are_ignored() {
        let service = service();
        let now = Timestamp::now().unix_seconds();
        let token = service
            .sign(&AccessClaims {
                sub: "x".into(),
                uid: Uuid::new_v4(),
                roles: vec!["ROLE_USER".into(), "SUPERHERO".into()],
                iat: now,
                exp: now + 60,
            })
            .unwrap();

        let user = service.validate(&token).await.unwrap();
        assert_eq!(user.roles, vec![Role::User]);
    }
}
