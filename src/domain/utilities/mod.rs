//! Stateless developer utilities.
//!
//! Every function here is pure or draws only from a random source; the
//! network-bound tools (URL tester, DNS) keep their rules here and their I/O
//! behind ports.

pub mod dataset;
pub mod dns;
pub mod encoding;
mod error;
pub mod fake_data;
pub mod hashing;
pub mod http_check;
pub mod identifiers;
pub mod json_tools;
pub mod jwt_inspect;
pub mod password;
pub mod regex_lab;
pub mod url_tools;

pub use error::UtilityError;
