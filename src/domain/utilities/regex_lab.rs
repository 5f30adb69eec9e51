//! Regex testing, replacement and a catalog of common patterns.
//!
//! Offsets are character (not byte) positions so they line up with what a
//! browser text field reports.

use once_cell::sync::Lazy;
use regex::{Regex, RegexBuilder};
use serde::Serialize;
use std::collections::BTreeMap;

use super::UtilityError;

pub const MAX_MATCHES: usize = 1000;
const SIZE_LIMIT: usize = 4 << 20;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchInfo {
    #[serde(rename = "match")]
    pub text: String,
    pub start: usize,
    pub end: usize,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub groups: Vec<Option<String>>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub named: BTreeMap<String, Option<String>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TestOutcome {
    pub pattern: String,
    pub flags: String,
    pub matches: Vec<MatchInfo>,
    pub match_count: usize,
    pub has_match: bool,
    /// More than `MAX_MATCHES` matches; only the first ones are listed.
    pub truncated: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplaceOutcome {
    pub pattern: String,
    pub original: String,
    pub replacement: String,
    pub result: String,
    pub replacement_count: usize,
}

/// Compiles `pattern` with `flags` (`i`, `m`, `s`, `x`; `g` is accepted and implied).
pub fn compile(pattern: &str, flags: &str) -> Result<Regex, UtilityError> {
    if pattern.is_empty() {
        return Err(UtilityError::invalid("pattern", "must not be empty"));
    }
    let mut builder = RegexBuilder::new(pattern);
    builder.size_limit(SIZE_LIMIT);
    for flag in flags.chars() {
        match flag {
            'i' => builder.case_insensitive(true),
            'm' => builder.multi_line(true),
            's' => builder.dot_matches_new_line(true),
            'x' => builder.ignore_whitespace(true),
            'g' => &mut builder,
            other => {
                return Err(UtilityError::invalid(
                    "flags",
                    format!("unknown flag '{}' (supported: i, m, s, x, g)", other),
                ))
            }
        };
    }
    builder
        .build()
        .map_err(|e| UtilityError::InvalidPattern(e.to_string()))
}

pub fn find_matches(pattern: &str, text: &str, flags: &str) -> Result<TestOutcome, UtilityError> {
    let regex = compile(pattern, flags)?;
    let names: Vec<Option<&str>> = regex.capture_names().skip(1).collect();

    let mut matches = Vec::new();
    let mut match_count = 0;
    let mut cursor = CharCursor::new(text);

    for captures in regex.captures_iter(text) {
        match_count += 1;
        if matches.len() == MAX_MATCHES {
            continue;
        }
        let Some(whole) = captures.get(0) else { continue };
        let start = cursor.char_index(whole.start());
        let end = cursor.char_index(whole.end());

        let groups = (1..captures.len())
            .map(|i| captures.get(i).map(|m| m.as_str().to_string()))
            .collect::<Vec<_>>();
        let named = names
            .iter()
            .enumerate()
            .filter_map(|(i, name)| {
                name.map(|n| (n.to_string(), groups.get(i).cloned().flatten()))
            })
            .collect();

        matches.push(MatchInfo {
            text: whole.as_str().to_string(),
            start,
            end,
            groups,
            named,
        });
    }

    Ok(TestOutcome {
        pattern: pattern.to_string(),
        flags: flags.to_string(),
        truncated: match_count > matches.len(),
        has_match: match_count > 0,
        match_count,
        matches,
    })
}

/// Replaces all matches; `$1` and `${name}` refer to capture groups.
pub fn replace_all(
    pattern: &str,
    text: &str,
    replacement: &str,
    flags: &str,
) -> Result<ReplaceOutcome, UtilityError> {
    let regex = compile(pattern, flags)?;
    let replacement_count = regex.find_iter(text).count();
    let result = regex.replace_all(text, replacement).into_owned();
    Ok(ReplaceOutcome {
        pattern: pattern.to_string(),
        original: text.to_string(),
        replacement: replacement.to_string(),
        result,
        replacement_count,
    })
}

/// Converts ascending byte offsets into character offsets in one pass.
struct CharCursor<'a> {
    text: &'a str,
    byte: usize,
    chars: usize,
}

impl<'a> CharCursor<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            text,
            byte: 0,
            chars: 0,
        }
    }

    fn char_index(&mut self, byte: usize) -> usize {
        if byte < self.byte {
            return self.text[..byte].chars().count();
        }
        self.chars += self.text[self.byte..byte].chars().count();
        self.byte = byte;
        self.chars
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Pattern catalog
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CatalogPattern {
    pub key: &'static str,
    pub pattern: &'static str,
    pub description: &'static str,
}

pub const CATALOG: &[CatalogPattern] = &[
    CatalogPattern {
        key: "email",
        pattern: r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$",
        description: "Email address",
    },
    CatalogPattern {
        key: "url",
        pattern: r"^(https?://)?(www\.)?[-a-zA-Z0-9@:%._+~#=]{1,256}\.[a-zA-Z0-9()]{1,6}\b([-a-zA-Z0-9()@:%_+.~#?&/=]*)$",
        description: "HTTP(S) URL, scheme optional",
    },
    CatalogPattern {
        key: "ipv4",
        pattern: r"^(?:(?:25[0-5]|2[0-4][0-9]|[01]?[0-9][0-9]?)\.){3}(?:25[0-5]|2[0-4][0-9]|[01]?[0-9][0-9]?)$",
        description: "IPv4 address",
    },
    CatalogPattern {
        key: "phone_br",
        pattern: r"^\(?[1-9]{2}\)? ?(?:[2-8]|9[1-9])[0-9]{3}-?[0-9]{4}$",
        description: "Brazilian phone number with area code",
    },
    CatalogPattern {
        key: "cpf",
        pattern: r"^\d{3}\.\d{3}\.\d{3}-\d{2}$",
        description: "Brazilian CPF (000.000.000-00)",
    },
    CatalogPattern {
        key: "cnpj",
        pattern: r"^\d{2}\.\d{3}\.\d{3}/\d{4}-\d{2}$",
        description: "Brazilian CNPJ (00.000.000/0000-00)",
    },
    CatalogPattern {
        key: "cep",
        pattern: r"^\d{5}-\d{3}$",
        description: "Brazilian postal code (00000-000)",
    },
    CatalogPattern {
        key: "date_br",
        pattern: r"^(0[1-9]|[12][0-9]|3[01])/(0[1-9]|1[0-2])/\d{4}$",
        description: "Date as DD/MM/YYYY",
    },
    CatalogPattern {
        key: "date_iso",
        pattern: r"^\d{4}-(0[1-9]|1[0-2])-(0[1-9]|[12][0-9]|3[01])$",
        description: "Date as YYYY-MM-DD",
    },
    CatalogPattern {
        key: "time",
        pattern: r"^([01]?[0-9]|2[0-3]):[0-5][0-9](:[0-5][0-9])?$",
        description: "24-hour time, seconds optional",
    },
    CatalogPattern {
        key: "hex_color",
        pattern: r"^#?([A-Fa-f0-9]{6}|[A-Fa-f0-9]{3})$",
        description: "Hex color (#fff or #ffffff)",
    },
    CatalogPattern {
        key: "credit_card",
        pattern: r"^(?:4[0-9]{12}(?:[0-9]{3})?|5[1-5][0-9]{14}|3[47][0-9]{13})$",
        description: "Visa, Mastercard or Amex card number",
    },
    CatalogPattern {
        key: "username",
        pattern: r"^[a-zA-Z0-9_]{3,16}$",
        description: "3-16 letters, digits or underscores",
    },
    CatalogPattern {
        key: "strong_password",
        pattern: r"^[A-Za-z\d@$!%*?&]{8,}$",
        description: "8+ chars with lowercase, uppercase, digit and one of @$!%*?&",
    },
    CatalogPattern {
        key: "uuid",
        pattern: r"^[0-9a-fA-F]{8}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{12}$",
        description: "UUID in canonical form",
    },
    CatalogPattern {
        key: "base64",
        pattern: r"^(?:[A-Za-z0-9+/]{4})*(?:[A-Za-z0-9+/]{2}==|[A-Za-z0-9+/]{3}=)?$",
        description: "Padded standard Base64",
    },
    CatalogPattern {
        key: "jwt",
        pattern: r"^[A-Za-z0-9_-]+\.[A-Za-z0-9_-]+\.[A-Za-z0-9_-]*$",
        description: "JSON Web Token (three base64url segments)",
    },
];

static COMPILED: Lazy<Vec<(&'static str, Regex)>> = Lazy::new(|| {
    CATALOG
        .iter()
        .filter_map(|entry| Regex::new(entry.pattern).ok().map(|re| (entry.key, re)))
        .collect()
});

/// `strong_password` needs one character from each class, which the
/// finite-automaton engine cannot express with lookahead.
fn has_required_classes(text: &str) -> bool {
    text.chars().any(|c| c.is_ascii_lowercase())
        && text.chars().any(|c| c.is_ascii_uppercase())
        && text.chars().any(|c| c.is_ascii_digit())
        && text.chars().any(|c| "@$!%*?&".contains(c))
}

/// Keys of every catalog pattern that matches the whole of `text`, in catalog order.
pub fn identify(text: &str) -> Vec<&'static str> {
    if text.is_empty() {
        return Vec::new();
    }
    COMPILED
        .iter()
        .filter(|(key, regex)| {
            regex.is_match(text) && (*key != "strong_password" || has_required_classes(text))
        })
        .map(|(key, _)| *key)
        .collect()
}
