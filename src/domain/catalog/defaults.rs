//! Tools seeded into an empty catalog.

use super::NewTool;
use crate::domain::foundation::ValidationError;

struct Seed {
    key: &'static str,
    title: &'static str,
    description: &'static str,
    icon: &'static str,
    keywords: &'static [&'static str],
}

const SEEDS: &[Seed] = &[
    Seed {
        key: "password-generator",
        title: "Password Generator",
        description: "Generate strong random passwords with optional symbols.",
        icon: "key",
        keywords: &["password", "security", "random"],
    },
    Seed {
        key: "base64",
        title: "Base64 Encoder",
        description: "Encode and decode text as standard or URL-safe Base64.",
        icon: "binary",
        keywords: &["base64", "encode", "decode"],
    },
    Seed {
        key: "hash-generator",
        title: "Hash Generator",
        description: "Compute MD5, SHA-1, SHA-2 and bcrypt digests.",
        icon: "hash",
        keywords: &["hash", "md5", "sha256", "bcrypt"],
    },
    Seed {
        key: "uuid-generator",
        title: "UUID Generator",
        description: "Generate UUID v4/v7, ULID and NanoID identifiers.",
        icon: "fingerprint",
        keywords: &["uuid", "ulid", "nanoid", "id"],
    },
    Seed {
        key: "jwt-decoder",
        title: "JWT Decoder",
        description: "Inspect JWT headers and claims and verify HMAC signatures.",
        icon: "shield-check",
        keywords: &["jwt", "token", "decode"],
    },
    Seed {
        key: "regex-tester",
        title: "Regex Tester",
        description: "Test, replace and identify text with regular expressions.",
        icon: "regex",
        keywords: &["regex", "pattern", "match"],
    },
    Seed {
        key: "url-parser",
        title: "URL Parser",
        description: "Break URLs into components and build them back.",
        icon: "link",
        keywords: &["url", "query", "parse"],
    },
    Seed {
        key: "url-tester",
        title: "URL Tester",
        description: "Send HTTP requests and grade security headers.",
        icon: "globe",
        keywords: &["http", "request", "headers", "security"],
    },
    Seed {
        key: "json-formatter",
        title: "JSON Formatter",
        description: "Validate, pretty-print and minify JSON documents.",
        icon: "braces",
        keywords: &["json", "format", "validate"],
    },
    Seed {
        key: "dns-lookup",
        title: "DNS Lookup",
        description: "Resolve A, AAAA, MX, TXT, NS and CNAME records.",
        icon: "server",
        keywords: &["dns", "domain", "mx"],
    },
    Seed {
        key: "mock-data",
        title: "Mock Data Generator",
        description: "Generate fake people, companies and datasets as JSON, CSV, YAML or SQL.",
        icon: "database",
        keywords: &["faker", "mock", "csv", "dataset"],
    },
];

/// The built-in catalog in display order.
pub fn default_tools() -> Result<Vec<NewTool>, ValidationError> {
    SEEDS
        .iter()
        .enumerate()
        .map(|(index, seed)| {
            NewTool::new(
                seed.key,
                seed.title,
                seed.description,
                Some(seed.icon.to_string()),
                None,
                seed.keywords.iter().map(|k| k.to_string()).collect(),
            )
            .map(|tool| tool.at_position(index as i32))
        })
        .collect()
}
