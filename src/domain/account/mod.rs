//! Accounts: users, credentials and refresh tokens.

mod refresh_token;
mod user;

pub use refresh_token::RefreshToken;
pub use user::{
    normalize_email, normalize_username, validate_password, User, PASSWORD_MIN, USERNAME_MAX,
    USERNAME_MIN,
};
