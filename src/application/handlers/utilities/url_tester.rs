//! UrlTester - Sends ad-hoc requests and grades security headers.

use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Instant;

use crate::domain::foundation::DomainError;
use crate::domain::utilities::http_check::{
    assess, check_target, parse_method, score_response, unreachable, with_default_scheme,
    with_parameters, HeaderMap, SecurityReport, StaticAssessment,
};
use crate::ports::{HttpProbe, ProbeRequest};

#[derive(Debug, Clone, Default)]
pub struct UrlTestCommand {
    pub url: String,
    pub method: Option<String>,
    pub headers: BTreeMap<String, String>,
    pub parameters: BTreeMap<String, String>,
    pub body: Option<String>,
    pub check_security: bool,
}

/// Echo of what was actually sent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestEcho {
    pub url: String,
    pub method: &'static str,
    pub headers: BTreeMap<String, String>,
    pub parameters: BTreeMap<String, String>,
    pub has_body: bool,
}

/// Upstream failures are reported here with `success: false`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UrlTestResult {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_code: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub headers: Option<HeaderMap>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    pub truncated: bool,
    /// Human-readable, e.g. `"132ms"`.
    pub response_time: String,
    pub response_time_ms: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub request: RequestEcho,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub security: Option<StaticAssessment>,
}

pub struct UrlTesterHandler {
    probe: Arc<dyn HttpProbe>,
    allow_private_targets: bool,
}

impl UrlTesterHandler {
    pub fn new(probe: Arc<dyn HttpProbe>, allow_private_targets: bool) -> Self {
        Self {
            probe,
            allow_private_targets,
        }
    }

    pub async fn test(&self, cmd: UrlTestCommand) -> Result<UrlTestResult, DomainError> {
        let method = parse_method(cmd.method.as_deref())?;
        let url = check_target(&cmd.url, self.allow_private_targets)?;
        let url = with_parameters(url, &cmd.parameters);
        let security = cmd.check_security.then(|| assess(&url));
        let body = cmd.body.filter(|b| !b.is_empty());

        let request = RequestEcho {
            url: url.to_string(),
            method,
            headers: cmd.headers.clone(),
            parameters: cmd.parameters,
            has_body: body.is_some(),
        };

        let started = Instant::now();
        let outcome = self
            .probe
            .send(ProbeRequest {
                method,
                url,
                headers: cmd.headers,
                body,
            })
            .await;

        let result = match outcome {
            Ok(response) => UrlTestResult {
                success: true,
                status_code: Some(response.status),
                status_text: Some(response.status_text),
                headers: Some(response.headers),
                body: Some(response.body),
                truncated: response.truncated,
                response_time: format!("{}ms", response.elapsed_ms),
                response_time_ms: response.elapsed_ms,
                error: None,
                request,
                security,
            },
            Err(e) => {
                let elapsed = started.elapsed().as_millis() as u64;
                tracing::info!(url = %request.url, error = %e, "URL test failed upstream");
                UrlTestResult {
                    success: false,
                    status_code: None,
                    status_text: None,
                    headers: None,
                    body: None,
                    truncated: false,
                    response_time: format!("{}ms", elapsed),
                    response_time_ms: elapsed,
                    error: Some(e.to_string()),
                    request,
                    security,
                }
            }
        };
        Ok(result)
    }

    /// Fetches the URL (assuming `https://` when no scheme is given) and
    /// scores its response headers; an unreachable target scores 0.
    pub async fn security_check(&self, raw_url: &str) -> Result<SecurityReport, DomainError> {
        let url = check_target(&with_default_scheme(raw_url), self.allow_private_targets)?;
        let https = url.scheme() == "https";
        let target = url.to_string();

        Ok(match self.probe.send(ProbeRequest::get(url)).await {
            Ok(response) => score_response(&target, https, response.status, response.headers),
            Err(e) => {
                tracing::info!(url = %target, error = %e, "Security check could not reach target");
                unreachable(&target, https, &e.to_string())
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::ErrorCode;
    use crate::ports::{ProbeError, ProbeResponse};
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct MockProbe {
        response: Result<ProbeResponse, ProbeError>,
        sent: Mutex<Vec<ProbeRequest>>,
    }

    impl MockProbe {
        fn responding(status: u16, headers: &[(&str, &str)]) -> Self {
            let headers = headers
                .iter()
                .map(|(k, v)| (k.to_string(), vec![v.to_string()]))
                .collect();
            Self {
                response: Ok(ProbeResponse {
                    status,
                    status_text: "OK".into(),
                    headers,
                    body: "hello".into(),
                    truncated: false,
                    elapsed_ms: 42,
                }),
                sent: Mutex::new(Vec::new()),
            }
        }

        fn failing(error: ProbeError) -> Self {
            Self {
                response: Err(error),
                sent: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl HttpProbe for MockProbe {
        async fn send(&self, request: ProbeRequest) -> Result<ProbeResponse, ProbeError> {
            self.sent.lock().unwrap().push(request);
            self.response.clone()
        }
    }

    #[tokio::test]
    async fn successful_test_reports_response_and_echo() {
        let probe = Arc::new(MockProbe::responding(200, &[("content-type", "text/plain")]));
        let handler = UrlTesterHandler::new(probe.clone(), false);

        let result = handler
            .test(UrlTestCommand {
                url: "https://example.com/api".into(),
                method: Some("post".into()),
                parameters: BTreeMap::from([("q".to_string(), "rust lang".to_string())]),
                body: Some("{}".into()),
                check_security: true,
                ..Default::default()
            })
            .await
            .unwrap();

        assert!(result.success);
        assert_eq!(result.status_code, Some(200));
        assert_eq!(result.response_time, "42ms");
        assert_eq!(result.request.method, "POST");
        assert_eq!(result.request.url, "https://example.com/api?q=rust+lang");
        assert!(result.request.has_body);
        assert_eq!(result.security.unwrap().security_score, 100);
        assert_eq!(probe.sent.lock().unwrap()[0].body.as_deref(), Some("{}"));
    }

    #[tokio::test]
    async fn upstream_failure_is_not_an_error() {
        let handler = UrlTesterHandler::new(
            Arc::new(MockProbe::failing(ProbeError::Transport("connection refused".into()))),
            false,
        );

        let result = handler
            .test(UrlTestCommand {
                url: "http://example.com".into(),
                ..Default::default()
            })
            .await
            .unwrap();

        assert!(!result.success);
        assert_eq!(result.error.as_deref(), Some("connection refused"));
        assert!(result.security.is_none());
    }

    #[tokio::test]
    async fn private_targets_are_refused() {
        let handler = UrlTesterHandler::new(Arc::new(MockProbe::responding(200, &[])), false);

        let err = handler
            .test(UrlTestCommand {
                url: "http://127.0.0.1:8080/admin".into(),
                ..Default::default()
            })
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::TargetNotAllowed);
    }

    #[tokio::test]
    async fn unknown_method_is_rejected() {
        let handler = UrlTesterHandler::new(Arc::new(MockProbe::responding(200, &[])), false);

        let err = handler
            .test(UrlTestCommand {
                url: "https://example.com".into(),
                method: Some("BREW".into()),
                ..Default::default()
            })
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::ValidationFailed);
    }

    #[tokio::test]
    async fn security_check_scores_headers() {
        let handler = UrlTesterHandler::new(
            Arc::new(MockProbe::responding(
                200,
                &[
                    ("strict-transport-security", "max-age=63072000"),
                    ("x-content-type-options", "nosniff"),
                    ("server", "nginx"),
                ],
            )),
            false,
        );

        let report = handler.security_check("example.com").await.unwrap();

        assert!(report.https);
        assert_eq!(report.url, "https://example.com/");
        // -10 (XFO) -10 (CSP) -5 (Server)
        assert_eq!(report.security_score, 75);
    }

    #[tokio::test]
    async fn unreachable_target_scores_zero() {
        let handler = UrlTesterHandler::new(
            Arc::new(MockProbe::failing(ProbeError::Timeout(10_000))),
            false,
        );

        let report = handler.security_check("http://example.com").await.unwrap();

        assert_eq!(report.security_score, 0);
        assert_eq!(report.status_code, 0);
    }
}
