//! DNS lookup input validation and report assembly.

use serde::Serialize;

use super::UtilityError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum RecordType {
    A,
    #[serde(rename = "AAAA")]
    Aaaa,
    #[serde(rename = "MX")]
    Mx,
    #[serde(rename = "TXT")]
    Txt,
    #[serde(rename = "NS")]
    Ns,
    #[serde(rename = "CNAME")]
    Cname,
}

impl RecordType {
    pub const ALL: [RecordType; 6] = [
        RecordType::A,
        RecordType::Aaaa,
        RecordType::Mx,
        RecordType::Txt,
        RecordType::Ns,
        RecordType::Cname,
    ];
}

/// Trims, lowercases and strips a trailing dot; rejects anything that is not
/// a syntactically valid hostname.
pub fn normalize_domain(input: &str) -> Result<String, UtilityError> {
    let domain = input.trim().trim_end_matches('.').to_ascii_lowercase();
    if domain.is_empty() {
        return Err(UtilityError::invalid("domain", "must not be empty"));
    }
    if domain.len() > 253 {
        return Err(UtilityError::invalid("domain", "must be at most 253 characters"));
    }
    for label in domain.split('.') {
        let valid = !label.is_empty()
            && label.len() <= 63
            && !label.starts_with('-')
            && !label.ends_with('-')
            && label
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(UtilityError::invalid(
                "domain",
                format!("'{}' is not a valid domain name", input.trim()),
            ));
        }
    }
    Ok(domain)
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DnsReport {
    pub domain: String,
    #[serde(rename = "A")]
    pub a: Vec<String>,
    #[serde(rename = "AAAA")]
    pub aaaa: Vec<String>,
    #[serde(rename = "MX")]
    pub mx: Vec<String>,
    #[serde(rename = "TXT")]
    pub txt: Vec<String>,
    #[serde(rename = "NS")]
    pub ns: Vec<String>,
    #[serde(rename = "CNAME")]
    pub cname: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl DnsReport {
    pub fn new(domain: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
            ..Default::default()
        }
    }

    pub fn set(&mut self, record_type: RecordType, values: Vec<String>) {
        let slot = match record_type {
            RecordType::A => &mut self.a,
            RecordType::Aaaa => &mut self.aaaa,
            RecordType::Mx => &mut self.mx,
            RecordType::Txt => &mut self.txt,
            RecordType::Ns => &mut self.ns,
            RecordType::Cname => &mut self.cname,
        };
        *slot = values;
    }

    pub fn is_empty(&self) -> bool {
        self.a.is_empty()
            && self.aaaa.is_empty()
            && self.mx.is_empty()
            && self.txt.is_empty()
            && self.ns.is_empty()
            && self.cname.is_empty()
    }

    /// Marks the report as not found when no record type resolved.
    pub fn finish(mut self) -> Self {
        if self.is_empty() {
            self.error = Some("Domain not found".to_string());
        }
        self
    }
}

/// `priority host` with the trailing root dot removed.
pub fn format_mx(preference: u16, exchange: &str) -> String {
    format!("{} {}", preference, exchange.trim_end_matches('.'))
}
