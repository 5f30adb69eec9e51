//! HttpProbe backed by reqwest.

use async_trait::async_trait;
use reqwest::redirect::Policy;
use reqwest::{Client, Method};
use std::time::{Duration, Instant};

use crate::config::OutboundConfig;
use crate::domain::utilities::http_check::{check_target, HeaderMap};
use crate::ports::{HttpProbe, ProbeError, ProbeRequest, ProbeResponse};

const MAX_REDIRECTS: usize = 5;
const USER_AGENT: &str = concat!("tool-hub/", env!("CARGO_PKG_VERSION"));

/// Outbound HTTP client for the URL tester and header check.
pub struct ReqwestHttpProbe {
    client: Client,
    timeout: Duration,
    max_body_bytes: usize,
}

impl ReqwestHttpProbe {
    pub fn new(config: &OutboundConfig) -> Result<Self, reqwest::Error> {
        let allow_private = config.allow_private_targets;
        // Every redirect hop goes through the same target policy as the
        // original URL.
        let redirects = Policy::custom(move |attempt| {
            if attempt.previous().len() >= MAX_REDIRECTS {
                attempt.error("too many redirects")
            } else if check_target(attempt.url().as_str(), allow_private).is_err() {
                attempt.stop()
            } else {
                attempt.follow()
            }
        });

        let client = Client::builder()
            .timeout(config.timeout())
            .redirect(redirects)
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            client,
            timeout: config.timeout(),
            max_body_bytes: config.max_body_bytes,
        })
    }

    fn map_error(&self, e: reqwest::Error) -> ProbeError {
        if e.is_timeout() {
            ProbeError::Timeout(self.timeout.as_millis() as u64)
        } else if e.is_builder() {
            ProbeError::InvalidRequest(e.to_string())
        } else {
            ProbeError::Transport(e.to_string())
        }
    }
}

fn collect_headers(headers: &reqwest::header::HeaderMap) -> HeaderMap {
    let mut collected = HeaderMap::new();
    for (name, value) in headers {
        collected
            .entry(name.as_str().to_ascii_lowercase())
            .or_default()
            .push(String::from_utf8_lossy(value.as_bytes()).into_owned());
    }
    collected
}

#[async_trait]
impl HttpProbe for ReqwestHttpProbe {
    async fn send(&self, request: ProbeRequest) -> Result<ProbeResponse, ProbeError> {
        let method = Method::from_bytes(request.method.as_bytes())
            .map_err(|e| ProbeError::InvalidRequest(e.to_string()))?;

        let mut builder = self.client.request(method, request.url.clone());
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let started = Instant::now();
        let mut response = builder.send().await.map_err(|e| self.map_error(e))?;

        let status = response.status();
        let headers = collect_headers(response.headers());

        let mut body = Vec::new();
        let mut truncated = false;
        while let Some(chunk) = response.chunk().await.map_err(|e| self.map_error(e))? {
            let room = self.max_body_bytes.saturating_sub(body.len());
            if chunk.len() > room {
                body.extend_from_slice(&chunk[..room]);
                truncated = true;
                break;
            }
            body.extend_from_slice(&chunk);
        }
        let elapsed_ms = started.elapsed().as_millis() as u64;

        tracing::debug!(
            url = %request.url,
            status = status.as_u16(),
            elapsed_ms,
            truncated,
            "Outbound probe completed"
        );

        Ok(ProbeResponse {
            status: status.as_u16(),
            status_text: status.canonical_reason().unwrap_or("").to_string(),
            headers,
            body: String::from_utf8_lossy(&body).into_owned(),
            truncated,
            elapsed_ms,
        })
    }
}

impl std::fmt::Debug for ReqwestHttpProbe {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReqwestHttpProbe")
            .field("timeout", &self.timeout)
            .field("max_body_bytes", &self.max_body_bytes)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::{HeaderValue, SET_COOKIE};

    #[test]
    fn repeated_headers_are_grouped_under_lowercase_name() {
        let mut headers = reqwest::header::HeaderMap::new();
        headers.append(SET_COOKIE, HeaderValue::from_static("a=1"));
        headers.append(SET_COOKIE, HeaderValue::from_static("b=2"));
        headers.insert("X-Frame-Options", HeaderValue::from_static("DENY"));

        let collected = collect_headers(&headers);

        assert_eq!(collected["set-cookie"], vec!["a=1", "b=2"]);
        assert_eq!(collected["x-frame-options"], vec!["DENY"]);
    }

    #[test]
    fn builds_from_default_config() {
        let probe = ReqwestHttpProbe::new(&OutboundConfig::default()).unwrap();
        assert_eq!(probe.max_body_bytes, 1024 * 1024);
        assert_eq!(probe.timeout, Duration::from_secs(10));
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Against a local listener
    // ════════════════════════════════════════════════════════════════════════════

    mod live {
        use super::*;
        use axum::{response::Redirect, routing::get, Router};
        use std::net::SocketAddr;
        use url::Url;

        const BIG_BODY_LEN: usize = 5000;

        async fn serve() -> SocketAddr {
            let app = Router::new()
                .route("/big", get(|| async { "x".repeat(BIG_BODY_LEN) }))
                .route("/small", get(|| async { "tiny" }))
                .route("/hop", get(|| async { Redirect::temporary("/final") }))
                .route("/final", get(|| async { "landed" }));
            let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
            let addr = listener.local_addr().unwrap();
            tokio::spawn(async move {
                axum::serve(listener, app).await.unwrap();
            });
            addr
        }

        fn probe(max_body_bytes: usize, allow_private_targets: bool) -> ReqwestHttpProbe {
            ReqwestHttpProbe::new(&OutboundConfig {
                timeout_secs: 5,
                max_body_bytes,
                allow_private_targets,
            })
            .unwrap()
        }

        fn at(addr: SocketAddr, path: &str) -> ProbeRequest {
            ProbeRequest::get(Url::parse(&format!("http://{}{}", addr, path)).unwrap())
        }

        #[tokio::test]
        async fn body_over_the_cap_is_truncated_to_it() {
            let addr = serve().await;

            let response = probe(1000, true).send(at(addr, "/big")).await.unwrap();

            assert_eq!(response.status, 200);
            assert!(response.truncated);
            assert_eq!(response.body.len(), 1000);
        }

        #[tokio::test]
        async fn body_under_the_cap_is_complete() {
            let addr = serve().await;

            let response = probe(1000, true).send(at(addr, "/small")).await.unwrap();

            assert!(!response.truncated);
            assert_eq!(response.body, "tiny");
        }

        #[tokio::test]
        async fn redirect_to_allowed_target_is_followed() {
            let addr = serve().await;

            let response = probe(1000, true).send(at(addr, "/hop")).await.unwrap();

            assert_eq!(response.status, 200);
            assert_eq!(response.body, "landed");
        }

        #[tokio::test]
        async fn redirect_to_private_target_is_not_followed() {
            let addr = serve().await;

            let response = probe(1000, false).send(at(addr, "/hop")).await.unwrap();

            assert_eq!(response.status, 307);
            assert_eq!(response.headers["location"], vec!["/final"]);
            assert_ne!(response.body, "landed");
        }
    }
}
