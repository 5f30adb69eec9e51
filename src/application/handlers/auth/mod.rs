//! Authentication handlers: login, refresh, logout, sign-up and reset requests.

mod login;
mod logout;
mod refresh_session;
mod register;
mod request_password_reset;

pub use login::{LoginCommand, LoginHandler, LoginResult};
pub use logout::LogoutHandler;
pub use refresh_session::{RefreshSessionCommand, RefreshSessionHandler, RefreshSessionResult};
pub use register::{RegisterCommand, RegisterHandler};
pub use request_password_reset::RequestPasswordResetHandler;
