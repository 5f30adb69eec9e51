//! Long-lived opaque refresh tokens.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use rand::rngs::OsRng;
use rand::RngCore;

use crate::domain::foundation::{Timestamp, UserId};

const TOKEN_BYTES: usize = 32;

/// Server-side record of a refresh token; the token string is the lookup key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefreshToken {
    pub token: String,
    pub user_id: UserId,
    pub expires_at: Timestamp,
}

impl RefreshToken {
    /// Mints a random token valid for `ttl_secs` from now.
    pub fn issue(user_id: UserId, ttl_secs: u64) -> Self {
        let mut bytes = [0u8; TOKEN_BYTES];
        OsRng.fill_bytes(&mut bytes);
        let ttl = i64::try_from(ttl_secs).unwrap_or(i64::MAX / 2);
        Self {
            token: URL_SAFE_NO_PAD.encode(bytes),
            user_id,
            expires_at: Timestamp::now().plus_seconds(ttl),
        }
    }

    pub fn is_expired_at(&self, now: &Timestamp) -> bool {
        !self.expires_at.is_after(now)
    }

    pub fn is_expired(&self) -> bool {
        self.is_expired_at(&Timestamp::now())
    }
}
