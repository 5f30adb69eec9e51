//! HTTP adapter for login, refresh, logout and sign-up.

mod cookies;
pub mod dto;
mod handlers;
mod routes;

pub use cookies::{REFRESH_COOKIE, REFRESH_COOKIE_PATH};
pub use routes::auth_router;
