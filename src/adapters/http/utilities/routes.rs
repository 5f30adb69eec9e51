//! Axum router for the developer utilities.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{
    base64_decode, base64_encode, dns_lookup, faker_dataset, faker_generate, faker_types,
    generate_nanoids, generate_password, generate_uuids, generate_ulids, hash, json_format,
    json_parse, jwt_decode, jwt_validate, regex_identify, regex_patterns, regex_replace,
    regex_test, url_build, url_parse, url_security, url_test, url_test_methods,
};
use crate::adapters::http::state::AppState;

/// Create the utilities router, mounted at `/api/v1/tools`.
///
/// # Routes
///
/// ## Generators
/// - `GET /password`, `GET /uuid`, `GET /ulid`, `GET /nanoid`
///
/// ## Encoders and inspectors
/// - `POST /base64/encode`, `POST /base64/decode`
/// - `POST /hash`
/// - `POST /jwt/decode`, `GET /jwt/validate`
/// - `POST /json/parse`, `POST /json/format`
///
/// ## Regex
/// - `POST /regex/test`, `POST /regex/replace`, `GET /regex/patterns`, `POST /regex/identify`
///
/// ## URLs and network
/// - `POST /url/parse`, `POST /url/build`
/// - `POST /url-tester/test`, `GET /url-tester/methods`, `POST /url-tester/security`
/// - `GET /dns/lookup`
///
/// ## Fake data
/// - `POST /faker/generate`, `GET /faker/types`, `POST /faker/dataset`
pub fn utilities_router() -> Router<AppState> {
    Router::new()
        .route("/password", get(generate_password))
        .route("/uuid", get(generate_uuids))
        .route("/ulid", get(generate_ulids))
        .route("/nanoid", get(generate_nanoids))
        .route("/base64/encode", post(base64_encode))
        .route("/base64/decode", post(base64_decode))
        .route("/hash", post(hash))
        .route("/jwt/decode", post(jwt_decode))
        .route("/jwt/validate", get(jwt_validate))
        .route("/json/parse", post(json_parse))
        .route("/json/format", post(json_format))
        .route("/regex/test", post(regex_test))
        .route("/regex/replace", post(regex_replace))
        .route("/regex/patterns", get(regex_patterns))
        .route("/regex/identify", post(regex_identify))
        .route("/url/parse", post(url_parse))
        .route("/url/build", post(url_build))
        .route("/url-tester/test", post(url_test))
        .route("/url-tester/methods", get(url_test_methods))
        .route("/url-tester/security", post(url_security))
        .route("/dns/lookup", get(dns_lookup))
        .route("/faker/generate", post(faker_generate))
        .route("/faker/types", get(faker_types))
        .route("/faker/dataset", post(faker_dataset))
}
