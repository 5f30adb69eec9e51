//! JWT decoding and HMAC signature verification.
//!
//! Decoding never fails: malformed tokens produce an inspection with
//! `valid == false` and an explanatory `error`.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use hmac::{Hmac, Mac};
use serde::Serialize;
use serde_json::Value;
use sha2::{Sha256, Sha384, Sha512};
use subtle::ConstantTimeEq;

use crate::domain::foundation::Timestamp;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JwtInspection {
    pub raw: String,
    /// Three segments whose header and payload decode to JSON objects.
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub header: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payload: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signature: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub algorithm: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issued_at: Option<Timestamp>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<Timestamp>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expired: Option<bool>,
    /// `None` when no secret was supplied or the algorithm is not HMAC.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signature_verified: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl JwtInspection {
    fn invalid(raw: &str, error: impl Into<String>) -> Self {
        Self {
            raw: raw.to_string(),
            valid: false,
            header: None,
            payload: None,
            signature: None,
            algorithm: None,
            issued_at: None,
            expires_at: None,
            expired: None,
            signature_verified: None,
            message: None,
            error: Some(error.into()),
        }
    }
}

/// Decodes `token` (a leading `Bearer ` is ignored) and, when `secret` is
/// given, verifies an HS256/HS384/HS512 signature.
///
/// `expected_algorithm` pins the algorithm; a header naming a different one
/// fails verification.
pub fn inspect(
    token: &str,
    secret: Option<&str>,
    expected_algorithm: Option<&str>,
    now: Timestamp,
) -> JwtInspection {
    let raw = token.trim();
    let raw = raw.strip_prefix("Bearer ").unwrap_or(raw).trim();

    if raw.is_empty() {
        return JwtInspection::invalid(raw, "Token is empty");
    }
    let parts: Vec<&str> = raw.split('.').collect();
    if parts.len() != 3 {
        return JwtInspection::invalid(
            raw,
            format!("JWT must have 3 parts separated by '.', found {}", parts.len()),
        );
    }

    let header = match decode_segment(parts[0]) {
        Ok(value) => value,
        Err(reason) => return JwtInspection::invalid(raw, format!("Invalid header: {}", reason)),
    };
    let payload = match decode_segment(parts[1]) {
        Ok(value) => value,
        Err(reason) => return JwtInspection::invalid(raw, format!("Invalid payload: {}", reason)),
    };

    let algorithm = header
        .get("alg")
        .and_then(Value::as_str)
        .map(str::to_string);
    let issued_at = numeric_date(&payload, "iat");
    let expires_at = numeric_date(&payload, "exp");
    let expired = expires_at.map(|exp| !exp.is_after(&now));

    let (signature_verified, message) = match secret.filter(|s| !s.is_empty()) {
        None => (None, Some("Token decoded; signature not verified".to_string())),
        Some(secret) => verify(&parts, algorithm.as_deref(), expected_algorithm, secret),
    };

    JwtInspection {
        raw: raw.to_string(),
        valid: true,
        header: Some(header),
        payload: Some(payload),
        signature: Some(parts[2].to_string()),
        algorithm,
        issued_at,
        expires_at,
        expired,
        signature_verified,
        message,
        error: None,
    }
}

fn verify(
    parts: &[&str],
    header_algorithm: Option<&str>,
    expected_algorithm: Option<&str>,
    secret: &str,
) -> (Option<bool>, Option<String>) {
    let header_algorithm = header_algorithm.unwrap_or_default().to_ascii_uppercase();
    if let Some(expected) = expected_algorithm.map(str::to_ascii_uppercase) {
        if expected != header_algorithm {
            return (
                Some(false),
                Some(format!(
                    "Algorithm mismatch: header says {}, expected {}",
                    header_algorithm, expected
                )),
            );
        }
    }

    let signing_input = format!("{}.{}", parts[0], parts[1]);
    let Some(expected_mac) = hmac_sign(&header_algorithm, secret.as_bytes(), signing_input.as_bytes())
    else {
        return (
            None,
            Some(format!(
                "Signature verification supports HS256, HS384 and HS512, not {}",
                header_algorithm
            )),
        );
    };

    let Ok(provided) = decode_base64url(parts[2]) else {
        return (Some(false), Some("Signature is not valid base64url".to_string()));
    };
    let verified: bool = provided.as_slice().ct_eq(expected_mac.as_slice()).into();
    let message = if verified {
        "Signature verified"
    } else {
        "Signature does not match"
    };
    (Some(verified), Some(message.to_string()))
}

fn hmac_sign(algorithm: &str, secret: &[u8], message: &[u8]) -> Option<Vec<u8>> {
    match algorithm {
        "HS256" => {
            let mut mac = Hmac::<Sha256>::new_from_slice(secret).ok()?;
            mac.update(message);
            Some(mac.finalize().into_bytes().to_vec())
        }
        "HS384" => {
            let mut mac = Hmac::<Sha384>::new_from_slice(secret).ok()?;
            mac.update(message);
            Some(mac.finalize().into_bytes().to_vec())
        }
        "HS512" => {
            let mut mac = Hmac::<Sha512>::new_from_slice(secret).ok()?;
            mac.update(message);
            Some(mac.finalize().into_bytes().to_vec())
        }
        _ => None,
    }
}

fn decode_base64url(segment: &str) -> Result<Vec<u8>, base64::DecodeError> {
    URL_SAFE_NO_PAD.decode(segment.trim_end_matches('='))
}

fn decode_segment(segment: &str) -> Result<Value, String> {
    let bytes = decode_base64url(segment).map_err(|_| "not valid base64url".to_string())?;
    let value: Value =
        serde_json::from_slice(&bytes).map_err(|e| format!("not valid JSON ({})", e))?;
    if value.is_object() {
        Ok(value)
    } else {
        Err("not a JSON object".to_string())
    }
}

fn numeric_date(payload: &Value, claim: &str) -> Option<Timestamp> {
    let value = payload.get(claim)?;
    let secs = value
        .as_i64()
        .or_else(|| value.as_f64().map(|f| f as i64))?;
    Timestamp::from_unix_seconds(secs)
}
