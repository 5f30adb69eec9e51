//! Base64 conversion.

use base64::engine::general_purpose::{STANDARD, STANDARD_NO_PAD, URL_SAFE, URL_SAFE_NO_PAD};
use base64::Engine as _;
use serde::Serialize;

use super::UtilityError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Decoded {
    pub output: String,
    /// False when the bytes were not UTF-8 and were converted lossily.
    pub utf8: bool,
    pub byte_length: usize,
}

pub fn encode(input: &str, url_safe: bool) -> String {
    if url_safe {
        URL_SAFE_NO_PAD.encode(input.as_bytes())
    } else {
        STANDARD.encode(input.as_bytes())
    }
}

/// Accepts either alphabet, with or without padding, ignoring whitespace.
pub fn decode(input: &str) -> Result<Decoded, UtilityError> {
    let compact: String = input.chars().filter(|c| !c.is_whitespace()).collect();
    if compact.is_empty() {
        return Ok(Decoded {
            output: String::new(),
            utf8: true,
            byte_length: 0,
        });
    }

    let url_safe = compact.contains('-') || compact.contains('_');
    let padded = compact.ends_with('=');
    let engine = match (url_safe, padded) {
        (false, true) => &STANDARD,
        (false, false) => &STANDARD_NO_PAD,
        (true, true) => &URL_SAFE,
        (true, false) => &URL_SAFE_NO_PAD,
    };

    let bytes = engine
        .decode(compact.as_bytes())
        .map_err(|_| UtilityError::invalid("input", "Invalid Base64 input"))?;

    let byte_length = bytes.len();
    let (output, utf8) = match String::from_utf8(bytes) {
        Ok(text) => (text, true),
        Err(err) => (String::from_utf8_lossy(err.as_bytes()).into_owned(), false),
    };
    Ok(Decoded {
        output,
        utf8,
        byte_length,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_standard_and_url_safe() {
        assert_eq!(encode("hello?", false), "aGVsbG8/");
        assert_eq!(encode("hello?", true), "aGVsbG8_");
        assert_eq!(encode("hi", false), "aGk=");
        assert_eq!(encode("hi", true), "aGk");
    }

    #[test]
    fn decodes_with_or_without_padding() {
        assert_eq!(decode("aGk=").unwrap().output, "hi");
        assert_eq!(decode("aGk").unwrap().output, "hi");
        assert_eq!(decode("aGVsbG8_").unwrap().output, "hello?");
        assert_eq!(decode(" aGVs\nbG8/ ").unwrap().output, "hello?");
    }

    #[test]
    fn rejects_garbage() {
        let err = decode("not base64!!").unwrap_err();
        assert_eq!(err, UtilityError::invalid("input", "Invalid Base64 input"));
    }

    #[test]
    fn flags_non_utf8() {
        let decoded = decode("/w==").unwrap();
        assert!(!decoded.utf8);
        assert_eq!(decoded.byte_length, 1);
        assert_eq!(decoded.output, "\u{FFFD}");
    }

    #[test]
    fn empty_input_decodes_to_empty() {
        assert_eq!(decode("").unwrap().output, "");
    }
}
