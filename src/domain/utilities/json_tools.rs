//! JSON validation and formatting.

use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::{Serializer, Value};

use super::UtilityError;

pub const MAX_INDENT: usize = 8;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SyntaxError {
    pub message: String,
    pub line: usize,
    pub column: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JsonReport {
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parsed: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub formatted: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub root_type: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<SyntaxError>,
}

impl JsonReport {
    fn failed(err: serde_json::Error) -> Self {
        Self {
            valid: false,
            parsed: None,
            formatted: None,
            root_type: None,
            error: Some(SyntaxError {
                message: err.to_string(),
                line: err.line(),
                column: err.column(),
            }),
        }
    }
}

/// Parses `data`; syntax errors are reported, not raised.
pub fn parse(data: &str) -> JsonReport {
    match serde_json::from_str::<Value>(data) {
        Ok(value) => JsonReport {
            valid: true,
            root_type: Some(type_name(&value)),
            parsed: Some(value),
            formatted: None,
            error: None,
        },
        Err(err) => JsonReport::failed(err),
    }
}

/// Re-serializes `data` pretty (with `indent` spaces) or minified.
/// Key order is preserved.
pub fn format(data: &str, prettify: bool, indent: usize) -> Result<JsonReport, UtilityError> {
    if indent > MAX_INDENT {
        return Err(UtilityError::invalid(
            "indent",
            format!("must be between 0 and {}", MAX_INDENT),
        ));
    }
    let value = match serde_json::from_str::<Value>(data) {
        Ok(value) => value,
        Err(err) => return Ok(JsonReport::failed(err)),
    };

    let formatted = if prettify {
        pretty(&value, indent)?
    } else {
        serde_json::to_string(&value).map_err(|e| UtilityError::invalid("data", e.to_string()))?
    };

    Ok(JsonReport {
        valid: true,
        root_type: Some(type_name(&value)),
        parsed: Some(value),
        formatted: Some(formatted),
        error: None,
    })
}

fn pretty(value: &Value, indent: usize) -> Result<String, UtilityError> {
    let indent_bytes = vec![b' '; indent];
    let mut out = Vec::new();
    let mut serializer = Serializer::with_formatter(&mut out, PrettyFormatter::with_indent(&indent_bytes));
    value
        .serialize(&mut serializer)
        .map_err(|e| UtilityError::invalid("data", e.to_string()))?;
    String::from_utf8(out).map_err(|e| UtilityError::invalid("data", e.to_string()))
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_reports_root_type() {
        let report = parse(r#"{"a": [1, 2]}"#);
        assert!(report.valid);
        assert_eq!(report.root_type, Some("object"));
        assert_eq!(report.parsed.unwrap()["a"][1], 2);
    }

    #[test]
    fn parse_reports_position_of_syntax_error() {
        let report = parse("{\n  \"a\": 1,\n  \"b\": }");
        assert!(!report.valid);
        let error = report.error.unwrap();
        assert_eq!(error.line, 3);
        assert!(error.column > 0);
    }

    #[test]
    fn format_pretty_preserves_key_order() {
        let report = format(r#"{"zeta":1,"alpha":{"b":true}}"#, true, 2).unwrap();
        assert_eq!(
            report.formatted.unwrap(),
            "{\n  \"zeta\": 1,\n  \"alpha\": {\n    \"b\": true\n  }\n}"
        );
    }

    #[test]
    fn format_with_four_space_indent() {
        let report = format("[1]", true, 4).unwrap();
        assert_eq!(report.formatted.unwrap(), "[\n    1\n]");
    }

    #[test]
    fn format_minify() {
        let report = format("{ \"a\" : [ 1 , 2 ] }", false, 2).unwrap();
        assert_eq!(report.formatted.unwrap(), r#"{"a":[1,2]}"#);
    }

    #[test]
    fn format_invalid_json_is_reported() {
        let report = format("{oops}", true, 2).unwrap();
        assert!(!report.valid);
        assert!(report.formatted.is_none());
    }

    #[test]
    fn format_rejects_huge_indent() {
        assert!(format("{}", true, 9).is_err());
    }
}
