//! Request and response bodies for `/tools/*`.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::domain::utilities::fake_data::{FakeKind, FakeLocale};
use crate::domain::utilities::http_check::MethodInfo;
use crate::domain::utilities::url_tools::UrlParts;

// ════════════════════════════════════════════════════════════════════════════════
// Generators
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PasswordParams {
    pub length: Option<usize>,
    pub include_symbols: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct IdParams {
    pub count: Option<usize>,
    pub version: Option<u8>,
    pub size: Option<usize>,
}

// ════════════════════════════════════════════════════════════════════════════════
// Encoders and inspectors
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Base64Request {
    pub input: String,
    #[serde(default)]
    pub url_safe: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Base64EncodeResponse {
    pub output: String,
    pub url_safe: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HashRequest {
    pub input: String,
    #[serde(default)]
    pub algorithm: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct JwtDecodeRequest {
    pub token: String,
    #[serde(default)]
    pub secret: Option<String>,
    #[serde(default)]
    pub algorithm: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct JwtValidateParams {
    pub token: String,
    #[serde(default)]
    pub algorithm: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct JsonParseRequest {
    pub data: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct JsonFormatRequest {
    pub data: String,
    #[serde(default = "default_prettify")]
    pub prettify: bool,
    #[serde(default = "default_indent")]
    pub indent: usize,
}

fn default_prettify() -> bool {
    true
}

fn default_indent() -> usize {
    2
}

// ════════════════════════════════════════════════════════════════════════════════
// Regex
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Deserialize)]
pub struct RegexTestRequest {
    pub pattern: String,
    pub text: String,
    #[serde(default)]
    pub flags: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RegexReplaceRequest {
    pub pattern: String,
    pub text: String,
    pub replacement: String,
    #[serde(default)]
    pub flags: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct IdentifyRequest {
    pub text: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct IdentifyResponse {
    pub text: String,
    pub matches: Vec<&'static str>,
}

// ════════════════════════════════════════════════════════════════════════════════
// URLs and network
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Deserialize)]
pub struct UrlRequest {
    pub url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UrlBuildRequest {
    #[serde(default)]
    pub protocol: Option<String>,
    pub host: String,
    #[serde(default)]
    pub port: Option<u16>,
    #[serde(default)]
    pub path: Option<String>,
    #[serde(default)]
    pub parameters: Map<String, Value>,
    #[serde(default)]
    pub fragment: Option<String>,
}

impl From<UrlBuildRequest> for UrlParts {
    fn from(req: UrlBuildRequest) -> Self {
        Self {
            protocol: req.protocol,
            host: req.host,
            port: req.port,
            path: req.path,
            parameters: req.parameters,
            fragment: req.fragment,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct UrlBuildResponse {
    pub url: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UrlTestRequest {
    pub url: String,
    #[serde(default)]
    pub method: Option<String>,
    #[serde(default)]
    pub headers: BTreeMap<String, String>,
    #[serde(default, alias = "params")]
    pub parameters: BTreeMap<String, String>,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub check_security: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct MethodsResponse {
    pub methods: &'static [MethodInfo],
}

#[derive(Debug, Clone, Deserialize)]
pub struct DnsParams {
    pub domain: String,
}

// ════════════════════════════════════════════════════════════════════════════════
// Fake data
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Deserialize)]
pub struct FakerRequest {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub count: Option<u32>,
    #[serde(default)]
    pub locale: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct FakerTypesResponse {
    pub types: Vec<&'static str>,
    pub locales: Vec<&'static str>,
}

impl FakerTypesResponse {
    pub fn all() -> Self {
        Self {
            types: FakeKind::ALL.iter().map(FakeKind::as_str).collect(),
            locales: FakeLocale::ALL.iter().map(FakeLocale::tag).collect(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatasetField {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatasetRequest {
    pub fields: Vec<DatasetField>,
    #[serde(default)]
    pub count: Option<u32>,
    #[serde(default)]
    pub format: Option<String>,
    #[serde(default)]
    pub table_name: Option<String>,
    #[serde(default)]
    pub locale: Option<String>,
}
