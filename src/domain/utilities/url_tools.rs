//! URL parsing and assembly.

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use serde_json::Value;
use url::form_urlencoded;
use url::Url;

use super::UtilityError;

/// Port implied by a scheme when the URL does not name one.
pub fn default_port(scheme: &str) -> Option<u16> {
    match scheme.to_ascii_lowercase().as_str() {
        "http" => Some(80),
        "https" => Some(443),
        "ftp" => Some(21),
        "ssh" => Some(22),
        _ => None,
    }
}

/// Query parameters in first-seen order; repeated keys collect their values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParameters(Vec<(String, Vec<String>)>);

impl QueryParameters {
    pub fn parse(query: &str) -> Self {
        let mut params = Self::default();
        for (key, value) in form_urlencoded::parse(query.as_bytes()) {
            params.push(key.into_owned(), value.into_owned());
        }
        params
    }

    fn push(&mut self, key: String, value: String) {
        match self.0.iter_mut().find(|(k, _)| *k == key) {
            Some((_, values)) => values.push(value),
            None => self.0.push((key, vec![value])),
        }
    }

    pub fn get(&self, key: &str) -> Option<&[String]> {
        self.0
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, values)| values.as_slice())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Serialize for QueryParameters {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (key, values) in &self.0 {
            map.serialize_entry(key, values)?;
        }
        map.end()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UrlSecurity {
    pub is_secure: bool,
    pub has_user_info: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedUrl {
    pub original: String,
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub protocol: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
    pub port: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    pub query: Option<String>,
    pub fragment: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub authority: Option<String>,
    pub user_info: Option<String>,
    pub parameters: QueryParameters,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub security: Option<UrlSecurity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reconstructed: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ParsedUrl {
    fn invalid(original: &str, error: String) -> Self {
        Self {
            original: original.to_string(),
            valid: false,
            protocol: None,
            host: None,
            port: None,
            path: None,
            query: None,
            fragment: None,
            authority: None,
            user_info: None,
            parameters: QueryParameters::default(),
            security: None,
            reconstructed: None,
            error: Some(error),
        }
    }
}

/// Splits an absolute URL into its components. Failures are reported in the
/// result, not raised.
pub fn parse(input: &str) -> ParsedUrl {
    let original = input.trim();
    let url = match Url::parse(original) {
        Ok(url) => url,
        Err(err) => return ParsedUrl::invalid(original, format!("Unable to parse URL: {}", err)),
    };

    let protocol = url.scheme().to_string();
    let user_info = user_info(&url);
    let host = url.host_str().map(str::to_string);
    let authority = host.as_ref().map(|host| {
        let mut authority = String::new();
        if let Some(info) = &user_info {
            authority.push_str(info);
            authority.push('@');
        }
        authority.push_str(host);
        if let Some(port) = url.port() {
            authority.push_str(&format!(":{}", port));
        }
        authority
    });
    let query = url.query().map(str::to_string);
    let parameters = query
        .as_deref()
        .map(QueryParameters::parse)
        .unwrap_or_default();

    let mut reconstructed = format!("{}:", protocol);
    if let Some(authority) = &authority {
        reconstructed.push_str("//");
        reconstructed.push_str(authority);
    }
    reconstructed.push_str(url.path());
    if let Some(query) = &query {
        reconstructed.push('?');
        reconstructed.push_str(query);
    }
    if let Some(fragment) = url.fragment() {
        reconstructed.push('#');
        reconstructed.push_str(fragment);
    }

    ParsedUrl {
        original: original.to_string(),
        valid: true,
        port: url.port().or_else(|| default_port(&protocol)),
        security: Some(UrlSecurity {
            is_secure: protocol == "https",
            has_user_info: user_info.is_some(),
        }),
        protocol: Some(protocol),
        host,
        path: Some(url.path().to_string()),
        query,
        fragment: url.fragment().map(str::to_string),
        authority,
        user_info,
        parameters,
        reconstructed: Some(reconstructed),
        error: None,
    }
}

fn user_info(url: &Url) -> Option<String> {
    match (url.username(), url.password()) {
        ("", None) => None,
        (user, None) => Some(user.to_string()),
        (user, Some(password)) => Some(format!("{}:{}", user, password)),
    }
}

/// Components accepted by [`build`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UrlParts {
    pub protocol: Option<String>,
    pub host: String,
    pub port: Option<u16>,
    pub path: Option<String>,
    /// Values are strings, numbers, booleans or arrays of those.
    pub parameters: serde_json::Map<String, Value>,
    pub fragment: Option<String>,
}

/// Assembles a URL. Scheme-default ports are omitted and query parameters are
/// percent-encoded; array values repeat their key.
pub fn build(parts: &UrlParts) -> Result<String, UtilityError> {
    let host = parts.host.trim();
    if host.is_empty() {
        return Err(UtilityError::invalid("host", "must not be empty"));
    }
    let protocol = parts
        .protocol
        .as_deref()
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .unwrap_or("http");
    if !protocol
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
    {
        return Err(UtilityError::invalid("protocol", "invalid scheme"));
    }

    let mut url = format!("{}://{}", protocol, host);
    if let Some(port) = parts.port {
        if Some(port) != default_port(protocol) {
            url.push_str(&format!(":{}", port));
        }
    }

    if let Some(path) = parts.path.as_deref().filter(|p| !p.is_empty()) {
        if !path.starts_with('/') {
            url.push('/');
        }
        url.push_str(path);
    }

    if !parts.parameters.is_empty() {
        let mut query = form_urlencoded::Serializer::new(String::new());
        for (key, value) in &parts.parameters {
            match value {
                Value::Array(items) => {
                    for item in items {
                        query.append_pair(key, &scalar(key, item)?);
                    }
                }
                other => {
                    query.append_pair(key, &scalar(key, other)?);
                }
            }
        }
        url.push('?');
        url.push_str(&query.finish());
    }

    if let Some(fragment) = parts.fragment.as_deref().filter(|f| !f.is_empty()) {
        url.push('#');
        url.push_str(fragment.trim_start_matches('#'));
    }

    Ok(url)
}

fn scalar(key: &str, value: &Value) -> Result<String, UtilityError> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        Value::Null => Ok(String::new()),
        _ => Err(UtilityError::invalid(
            "parameters",
            format!("value of '{}' must be a scalar or a list of scalars", key),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_all_components() {
        let parsed = parse("https://user:pw@example.com:8443/a/b?x=1&y=two&x=3#frag");
        assert!(parsed.valid);
        assert_eq!(parsed.protocol.as_deref(), Some("https"));
        assert_eq!(parsed.host.as_deref(), Some("example.com"));
        assert_eq!(parsed.port, Some(8443));
        assert_eq!(parsed.path.as_deref(), Some("/a/b"));
        assert_eq!(parsed.query.as_deref(), Some("x=1&y=two&x=3"));
        assert_eq!(parsed.fragment.as_deref(), Some("frag"));
        assert_eq!(parsed.user_info.as_deref(), Some("user:pw"));
        assert_eq!(parsed.authority.as_deref(), Some("user:pw@example.com:8443"));
        assert_eq!(parsed.parameters.get("x").unwrap(), ["1", "3"]);
        assert_eq!(parsed.parameters.get("y").unwrap(), ["two"]);
        let security = parsed.security.unwrap();
        assert!(security.is_secure);
        assert!(security.has_user_info);
        assert_eq!(
            parsed.reconstructed.as_deref(),
            Some("https://user:pw@example.com:8443/a/b?x=1&y=two&x=3#frag")
        );
    }

    #[test]
    fn default_ports_fill_in() {
        assert_eq!(parse("http://example.com").port, Some(80));
        assert_eq!(parse("https://example.com").port, Some(443));
        assert_eq!(parse("ftp://example.com").port, Some(21));
        assert_eq!(parse("ssh://example.com").port, Some(22));
        assert_eq!(parse("gopher://example.com").port, None);
    }

    #[test]
    fn parameters_keep_first_seen_order() {
        let parsed = parse("http://h/?b=1&a=2&b=3&flag");
        let json = serde_json::to_string(&parsed.parameters).unwrap();
        assert_eq!(json, r#"{"b":["1","3"],"a":["2"],"flag":[""]}"#);
    }

    #[test]
    fn decodes_percent_encoded_parameters() {
        let parsed = parse("http://h/?q=hello%20world&tag=a%2Bb");
        assert_eq!(parsed.parameters.get("q").unwrap(), ["hello world"]);
        assert_eq!(parsed.parameters.get("tag").unwrap(), ["a+b"]);
    }

    #[test]
    fn relative_url_is_invalid() {
        let parsed = parse("/just/a/path");
        assert!(!parsed.valid);
        assert!(parsed.error.is_some());
    }

    #[test]
    fn build_omits_default_port_and_adds_slash() {
        let parts = UrlParts {
            protocol: Some("https".into()),
            host: "example.com".into(),
            port: Some(443),
            path: Some("api/v1".into()),
            ..Default::default()
        };
        assert_eq!(build(&parts).unwrap(), "https://example.com/api/v1");
    }

    #[test]
    fn build_keeps_custom_port_and_encodes_params() {
        let parameters = json!({"q": "a b&c", "tag": ["x", "y"], "n": 5});
        let parts = UrlParts {
            protocol: Some("http".into()),
            host: "localhost".into(),
            port: Some(8080),
            path: Some("/search".into()),
            parameters: parameters.as_object().unwrap().clone(),
            fragment: Some("top".into()),
        };
        assert_eq!(
            build(&parts).unwrap(),
            "http://localhost:8080/search?q=a+b%26c&tag=x&tag=y&n=5#top"
        );
    }

    #[test]
    fn build_requires_host() {
        assert!(build(&UrlParts::default()).is_err());
    }

    #[test]
    fn build_rejects_nested_objects() {
        let parts = UrlParts {
            host: "h".into(),
            parameters: json!({"a": {"b": 1}}).as_object().unwrap().clone(),
            ..Default::default()
        };
        assert!(build(&parts).is_err());
    }
}
