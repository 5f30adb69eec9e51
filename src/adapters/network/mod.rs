//! Network adapters: system DNS resolution and outbound HTTP.

mod dns_resolver;
mod http_probe;
mod mock;

pub use dns_resolver::HickoryDnsResolver;
pub use http_probe::ReqwestHttpProbe;
pub use mock::{MockDnsResolver, MockHttpProbe};
