//! HTTP handlers for the developer utilities. Every route requires a caller.

use axum::{extract::State, response::IntoResponse, Json};
use axum_extra::extract::WithRejection;

use super::dto::{
    Base64EncodeResponse, Base64Request, DatasetRequest, DnsParams, FakerRequest,
    FakerTypesResponse, HashRequest, IdParams, IdentifyRequest, IdentifyResponse,
    JsonFormatRequest, JsonParseRequest, JwtDecodeRequest, JwtValidateParams, MethodsResponse,
    PasswordParams, RegexReplaceRequest, RegexTestRequest, UrlBuildRequest, UrlBuildResponse,
    UrlRequest, UrlTestRequest,
};
use crate::adapters::http::error::{ApiError, ApiJson, ApiQuery};
use crate::adapters::http::middleware::RequireAuth;
use crate::adapters::http::state::AppState;
use crate::application::handlers::utilities::UrlTestCommand;
use crate::domain::foundation::{DomainError, Timestamp};
use crate::domain::utilities::dataset::{self, DatasetFormat, FieldSpec};
use crate::domain::utilities::fake_data::{self, FakeLocale};
use crate::domain::utilities::hashing::{self, HashAlgorithm};
use crate::domain::utilities::http_check::METHODS;
use crate::domain::utilities::identifiers::{self, NANOID_DEFAULT_SIZE};
use crate::domain::utilities::password::{self, DEFAULT_LENGTH};
use crate::domain::utilities::{encoding, json_tools, jwt_inspect, regex_lab, url_tools};

fn parse_locale(raw: Option<&str>) -> Result<FakeLocale, ApiError> {
    match raw.map(str::trim).filter(|l| !l.is_empty()) {
        Some(tag) => Ok(tag.parse()?),
        None => Ok(FakeLocale::default()),
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Generators
// ════════════════════════════════════════════════════════════════════════════════

/// GET /api/v1/tools/password?length&includeSymbols
pub async fn generate_password(
    RequireAuth(_caller): RequireAuth,
    WithRejection(query, _): ApiQuery<PasswordParams>,
) -> Result<impl IntoResponse, ApiError> {
    let params = query.0;
    let generated = password::generate(
        params.length.unwrap_or(DEFAULT_LENGTH),
        params.include_symbols.unwrap_or(true),
    )?;
    Ok(Json(generated))
}

/// GET /api/v1/tools/uuid?count&version
pub async fn generate_uuids(
    RequireAuth(_caller): RequireAuth,
    WithRejection(query, _): ApiQuery<IdParams>,
) -> Result<impl IntoResponse, ApiError> {
    let params = query.0;
    let ids = identifiers::uuids(params.count.unwrap_or(1), params.version.unwrap_or(4))?;
    Ok(Json(ids))
}

/// GET /api/v1/tools/ulid?count
pub async fn generate_ulids(
    RequireAuth(_caller): RequireAuth,
    WithRejection(query, _): ApiQuery<IdParams>,
) -> Result<impl IntoResponse, ApiError> {
    Ok(Json(identifiers::ulids(query.0.count.unwrap_or(1))?))
}

/// GET /api/v1/tools/nanoid?count&size
pub async fn generate_nanoids(
    RequireAuth(_caller): RequireAuth,
    WithRejection(query, _): ApiQuery<IdParams>,
) -> Result<impl IntoResponse, ApiError> {
    let params = query.0;
    let ids = identifiers::nanoids(
        params.count.unwrap_or(1),
        params.size.unwrap_or(NANOID_DEFAULT_SIZE),
    )?;
    Ok(Json(ids))
}

// ════════════════════════════════════════════════════════════════════════════════
// Encoders and inspectors
// ════════════════════════════════════════════════════════════════════════════════

/// POST /api/v1/tools/base64/encode
pub async fn base64_encode(
    RequireAuth(_caller): RequireAuth,
    WithRejection(body, _): ApiJson<Base64Request>,
) -> Result<impl IntoResponse, ApiError> {
    let req = body.0;
    Ok(Json(Base64EncodeResponse {
        output: encoding::encode(&req.input, req.url_safe),
        url_safe: req.url_safe,
    }))
}

/// POST /api/v1/tools/base64/decode
pub async fn base64_decode(
    RequireAuth(_caller): RequireAuth,
    WithRejection(body, _): ApiJson<Base64Request>,
) -> Result<impl IntoResponse, ApiError> {
    Ok(Json(encoding::decode(&body.0.input)?))
}

/// POST /api/v1/tools/hash - bcrypt runs on the blocking pool
pub async fn hash(
    State(state): State<AppState>,
    RequireAuth(_caller): RequireAuth,
    WithRejection(body, _): ApiJson<HashRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let req = body.0;
    let algorithm = match req.algorithm.as_deref().map(str::trim).filter(|a| !a.is_empty()) {
        Some(name) => name.parse::<HashAlgorithm>()?,
        None => HashAlgorithm::default(),
    };

    let cost = state.settings.bcrypt_cost;
    let output = if algorithm.is_blocking() {
        tokio::task::spawn_blocking(move || hashing::hash(&req.input, algorithm, cost))
            .await
            .map_err(|e| ApiError(DomainError::internal(format!("Hash task failed: {}", e))))??
    } else {
        hashing::hash(&req.input, algorithm, cost)?
    };
    Ok(Json(output))
}

/// POST /api/v1/tools/jwt/decode - Verifies the signature when a secret is given
pub async fn jwt_decode(
    RequireAuth(_caller): RequireAuth,
    WithRejection(body, _): ApiJson<JwtDecodeRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let req = body.0;
    Ok(Json(jwt_inspect::inspect(
        &req.token,
        req.secret.as_deref(),
        req.algorithm.as_deref(),
        Timestamp::now(),
    )))
}

/// GET /api/v1/tools/jwt/validate?token&algorithm - Structure and expiry only
pub async fn jwt_validate(
    RequireAuth(_caller): RequireAuth,
    WithRejection(query, _): ApiQuery<JwtValidateParams>,
) -> Result<impl IntoResponse, ApiError> {
    let params = query.0;
    Ok(Json(jwt_inspect::inspect(
        &params.token,
        None,
        params.algorithm.as_deref(),
        Timestamp::now(),
    )))
}

/// POST /api/v1/tools/json/parse
pub async fn json_parse(
    RequireAuth(_caller): RequireAuth,
    WithRejection(body, _): ApiJson<JsonParseRequest>,
) -> Result<impl IntoResponse, ApiError> {
    Ok(Json(json_tools::parse(&body.0.data)))
}

/// POST /api/v1/tools/json/format
pub async fn json_format(
    RequireAuth(_caller): RequireAuth,
    WithRejection(body, _): ApiJson<JsonFormatRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let req = body.0;
    Ok(Json(json_tools::format(&req.data, req.prettify, req.indent)?))
}

// ════════════════════════════════════════════════════════════════════════════════
// Regex
// ════════════════════════════════════════════════════════════════════════════════

/// POST /api/v1/tools/regex/test
pub async fn regex_test(
    RequireAuth(_caller): RequireAuth,
    WithRejection(body, _): ApiJson<RegexTestRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let req = body.0;
    Ok(Json(regex_lab::find_matches(&req.pattern, &req.text, &req.flags)?))
}

/// POST /api/v1/tools/regex/replace
pub async fn regex_replace(
    RequireAuth(_caller): RequireAuth,
    WithRejection(body, _): ApiJson<RegexReplaceRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let req = body.0;
    Ok(Json(regex_lab::replace_all(
        &req.pattern,
        &req.text,
        &req.replacement,
        &req.flags,
    )?))
}

/// GET /api/v1/tools/regex/patterns
pub async fn regex_patterns(RequireAuth(_caller): RequireAuth) -> impl IntoResponse {
    Json(regex_lab::CATALOG)
}

/// POST /api/v1/tools/regex/identify
pub async fn regex_identify(
    RequireAuth(_caller): RequireAuth,
    WithRejection(body, _): ApiJson<IdentifyRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let text = body.0.text;
    let matches = regex_lab::identify(&text);
    Ok(Json(IdentifyResponse { text, matches }))
}

// ════════════════════════════════════════════════════════════════════════════════
// URLs and network
// ════════════════════════════════════════════════════════════════════════════════

/// POST /api/v1/tools/url/parse
pub async fn url_parse(
    RequireAuth(_caller): RequireAuth,
    WithRejection(body, _): ApiJson<UrlRequest>,
) -> Result<impl IntoResponse, ApiError> {
    Ok(Json(url_tools::parse(&body.0.url)))
}

/// POST /api/v1/tools/url/build
pub async fn url_build(
    RequireAuth(_caller): RequireAuth,
    WithRejection(body, _): ApiJson<UrlBuildRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let url = url_tools::build(&body.0.into())?;
    Ok(Json(UrlBuildResponse { url }))
}

/// POST /api/v1/tools/url-tester/test - Upstream failures come back as `success: false`
pub async fn url_test(
    State(state): State<AppState>,
    RequireAuth(_caller): RequireAuth,
    WithRejection(body, _): ApiJson<UrlTestRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let req = body.0;
    let result = state
        .url_tester_handler()
        .test(UrlTestCommand {
            url: req.url,
            method: req.method,
            headers: req.headers,
            parameters: req.parameters,
            body: req.body,
            check_security: req.check_security,
        })
        .await?;
    Ok(Json(result))
}

/// GET /api/v1/tools/url-tester/methods
pub async fn url_test_methods(RequireAuth(_caller): RequireAuth) -> impl IntoResponse {
    Json(MethodsResponse { methods: &METHODS })
}

/// POST /api/v1/tools/url-tester/security
pub async fn url_security(
    State(state): State<AppState>,
    RequireAuth(_caller): RequireAuth,
    WithRejection(body, _): ApiJson<UrlRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let report = state.url_tester_handler().security_check(&body.0.url).await?;
    Ok(Json(report))
}

/// GET /api/v1/tools/dns/lookup?domain
pub async fn dns_lookup(
    State(state): State<AppState>,
    RequireAuth(_caller): RequireAuth,
    WithRejection(query, _): ApiQuery<DnsParams>,
) -> Result<impl IntoResponse, ApiError> {
    let report = state.dns_lookup_handler().handle(&query.0.domain).await?;
    Ok(Json(report))
}

// ════════════════════════════════════════════════════════════════════════════════
// Fake data
// ════════════════════════════════════════════════════════════════════════════════

/// POST /api/v1/tools/faker/generate
pub async fn faker_generate(
    RequireAuth(_caller): RequireAuth,
    WithRejection(body, _): ApiJson<FakerRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let req = body.0;
    let kind = req.kind.parse()?;
    let locale = parse_locale(req.locale.as_deref())?;
    Ok(Json(fake_data::generate(kind, req.count, locale)?))
}

/// GET /api/v1/tools/faker/types
pub async fn faker_types(RequireAuth(_caller): RequireAuth) -> impl IntoResponse {
    Json(FakerTypesResponse::all())
}

/// POST /api/v1/tools/faker/dataset
pub async fn faker_dataset(
    RequireAuth(_caller): RequireAuth,
    WithRejection(body, _): ApiJson<DatasetRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let req = body.0;
    let fields = req
        .fields
        .iter()
        .map(|f| FieldSpec::new(&f.name, &f.kind))
        .collect::<Result<Vec<_>, _>>()?;
    let format = match req.format.as_deref().map(str::trim).filter(|f| !f.is_empty()) {
        Some(name) => name.parse::<DatasetFormat>()?,
        None => DatasetFormat::default(),
    };
    let locale = parse_locale(req.locale.as_deref())?;

    let rendered = dataset::generate(&fields, req.count, locale)?
        .render(format, req.table_name.as_deref())?;
    Ok(Json(rendered))
}
