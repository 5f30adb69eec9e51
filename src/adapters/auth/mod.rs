//! Authentication adapters.
//!
//! - `jwt` - HS256 access tokens (`AccessTokenIssuer` + `SessionValidator`)
//! - `bcrypt_hasher` - `PasswordHasher` backed by bcrypt
//! - `mock` - Fixed-token validator for tests

mod bcrypt_hasher;
mod jwt;
mod mock;

pub use bcrypt_hasher::BcryptPasswordHasher;
pub use jwt::JwtTokenService;
pub use mock::MockSessionValidator;
