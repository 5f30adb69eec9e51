//! Rules for the URL tester: allowed methods, outbound target policy,
//! static URL assessment and security-header scoring.
//!
//! The network round trip itself lives behind the `HttpProbe` port.

use serde::Serialize;
use std::collections::BTreeMap;
use std::net::IpAddr;
use url::{Host, Url};

use super::url_tools::default_port;
use super::UtilityError;

/// Response headers keyed by lowercase name.
pub type HeaderMap = BTreeMap<String, Vec<String>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MethodInfo {
    pub method: &'static str,
    pub description: &'static str,
}

pub const METHODS: [MethodInfo; 7] = [
    MethodInfo { method: "GET", description: "Retrieve data from the server" },
    MethodInfo { method: "POST", description: "Send data to create a resource" },
    MethodInfo { method: "PUT", description: "Replace an existing resource" },
    MethodInfo { method: "PATCH", description: "Partially update a resource" },
    MethodInfo { method: "DELETE", description: "Remove a resource" },
    MethodInfo { method: "HEAD", description: "Retrieve headers only" },
    MethodInfo { method: "OPTIONS", description: "Ask which methods are supported" },
];

/// Normalizes a method name; empty means GET.
pub fn parse_method(method: Option<&str>) -> Result<&'static str, UtilityError> {
    let requested = method.map(str::trim).filter(|m| !m.is_empty()).unwrap_or("GET");
    METHODS
        .iter()
        .map(|info| info.method)
        .find(|m| m.eq_ignore_ascii_case(requested))
        .ok_or_else(|| UtilityError::invalid("method", format!("unsupported HTTP method '{}'", requested)))
}

/// Parses an outbound URL and refuses targets the server must not reach.
///
/// Only http(s) is allowed. Unless `allow_private` is set, `localhost` and
/// literal loopback, private, link-local, unspecified and unique-local
/// addresses are refused. Hostnames are not resolved here.
pub fn check_target(raw: &str, allow_private: bool) -> Result<Url, UtilityError> {
    let url = Url::parse(raw.trim()).map_err(|e| UtilityError::invalid("url", e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(UtilityError::TargetNotAllowed(format!(
            "scheme '{}' is not allowed",
            url.scheme()
        )));
    }
    let host = url
        .host()
        .ok_or_else(|| UtilityError::invalid("url", "missing host"))?;
    if allow_private {
        return Ok(url);
    }

    let refused = match host {
        Host::Domain(domain) => {
            let domain = domain.trim_end_matches('.').to_ascii_lowercase();
            domain == "localhost" || domain.ends_with(".localhost")
        }
        Host::Ipv4(ip) => is_internal(IpAddr::V4(ip)),
        Host::Ipv6(ip) => is_internal(IpAddr::V6(ip)),
    };
    if refused {
        return Err(UtilityError::TargetNotAllowed(format!(
            "{} resolves to an internal address",
            url.host_str().unwrap_or_default()
        )));
    }
    Ok(url)
}

fn is_internal(ip: IpAddr) -> bool {
    match ip {
        IpAddr::V4(v4) => {
            v4.is_loopback()
                || v4.is_private()
                || v4.is_link_local()
                || v4.is_unspecified()
                || v4.is_broadcast()
        }
        IpAddr::V6(v6) => {
            if let Some(mapped) = v6.to_ipv4_mapped() {
                return is_internal(IpAddr::V4(mapped));
            }
            let first = v6.segments()[0];
            v6.is_loopback()
                || v6.is_unspecified()
                || (first & 0xfe00) == 0xfc00
                || (first & 0xffc0) == 0xfe80
        }
    }
}

/// Appends `parameters` to the URL's query, keeping any existing pairs.
pub fn with_parameters(mut url: Url, parameters: &BTreeMap<String, String>) -> Url {
    if !parameters.is_empty() {
        let mut pairs = url.query_pairs_mut();
        for (key, value) in parameters {
            pairs.append_pair(key, value);
        }
    }
    url
}

/// Prefixes `https://` when the input names no scheme.
pub fn with_default_scheme(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.starts_with("http://") || trimmed.starts_with("https://") || trimmed.contains("://") {
        trimmed.to_string()
    } else {
        format!("https://{}", trimmed)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StaticAssessment {
    pub is_https: bool,
    pub protocol: String,
    pub port: Option<u16>,
    pub is_standard_port: bool,
    pub has_credentials: bool,
    pub recommendations: Vec<String>,
    pub security_score: u8,
}

/// Scores a URL without contacting it: HTTPS 50, standard port 20, no
/// credentials 30.
pub fn assess(url: &Url) -> StaticAssessment {
    let is_https = url.scheme() == "https";
    let port = url.port().or_else(|| default_port(url.scheme()));
    let is_standard_port = matches!(port, Some(80) | Some(443));
    let has_credentials = !url.username().is_empty() || url.password().is_some();

    let mut recommendations = Vec::new();
    if !is_https {
        recommendations.push("Consider using HTTPS for secure communication".to_string());
    }
    if has_credentials {
        recommendations.push("Avoid putting credentials in the URL".to_string());
    }

    let mut score = 0;
    if is_https {
        score += 50;
    }
    if is_standard_port {
        score += 20;
    }
    if !has_credentials {
        score += 30;
    }

    StaticAssessment {
        is_https,
        protocol: url.scheme().to_string(),
        port,
        is_standard_port,
        has_credentials,
        recommendations,
        security_score: score,
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SecurityReport {
    pub url: String,
    pub https: bool,
    /// 0 when the target could not be reached.
    pub status_code: u16,
    pub headers: HeaderMap,
    pub security_score: u8,
    pub recommendations: Vec<String>,
}

const REQUIRED_HEADERS: [&str; 4] = [
    "Strict-Transport-Security",
    "X-Content-Type-Options",
    "X-Frame-Options",
    "Content-Security-Policy",
];

const DISCLOSING_HEADERS: [(&str, &str); 2] = [
    ("Server", "Server header is present. Consider hiding server version information."),
    (
        "X-Powered-By",
        "X-Powered-By header is present. Consider hiding technology stack information.",
    ),
];

/// Scores a reachable target's response headers, starting from 100.
pub fn score_response(url: &str, https: bool, status_code: u16, headers: HeaderMap) -> SecurityReport {
    let mut score: i32 = 100;
    let mut recommendations = Vec::new();

    if !https {
        score -= 20;
        recommendations.push("Use HTTPS instead of HTTP for secure communication.".to_string());
    }
    let has = |name: &str| headers.contains_key(&name.to_ascii_lowercase());
    for name in REQUIRED_HEADERS {
        if !has(name) {
            score -= 10;
            recommendations.push(format!("Missing '{}' header.", name));
        }
    }
    for (name, advice) in DISCLOSING_HEADERS {
        if has(name) {
            score -= 5;
            recommendations.push(advice.to_string());
        }
    }

    SecurityReport {
        url: url.to_string(),
        https,
        status_code,
        headers,
        security_score: score.clamp(0, 100) as u8,
        recommendations,
    }
}

/// Report for a target that could not be fetched.
pub fn unreachable(url: &str, https: bool, reason: &str) -> SecurityReport {
    let mut recommendations = Vec::new();
    if !https {
        recommendations.push("Use HTTPS instead of HTTP for secure communication.".to_string());
    }
    recommendations.push(format!("Failed to connect to URL: {}", reason));
    SecurityReport {
        url: url.to_string(),
        https,
        status_code: 0,
        headers: HeaderMap::new(),
        security_score: 0,
        recommendations,
    }
}
