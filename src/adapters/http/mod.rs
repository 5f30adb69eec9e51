//! HTTP adapters - REST API implementations.
//!
//! Each area has its own dto/handlers/routes module; `router` stitches them
//! together under `/api/v1`.

pub mod catalog;
pub mod error;
pub mod middleware;
pub mod router;
pub mod session;
pub mod state;
pub mod usage;
pub mod users;
pub mod utilities;

pub use error::{ApiError, ErrorResponse};
pub use router::{api_routes, app_router, RouterOptions};
pub use state::{AppState, HttpSettings};
