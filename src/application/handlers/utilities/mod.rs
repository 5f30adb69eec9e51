//! Utility handlers that reach the network.
//!
//! The pure utilities (hashing, encoding, regex, ...) are called straight
//! from the HTTP layer; only lookups that go through a port live here.

mod dns_lookup;
mod url_tester;

pub use dns_lookup::DnsLookupHandler;
pub use url_tester::{RequestEcho, UrlTestCommand, UrlTestResult, UrlTesterHandler};
