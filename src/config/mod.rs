//! Typed configuration for the service.
//!
//! Values come from `TOOL_HUB__<SECTION>__<KEY>` environment variables,
//! optionally seeded from a `.env` file:
//!
//! ```text
//! TOOL_HUB__DATABASE__URL=postgres://hub@localhost/toolhub
//! TOOL_HUB__AUTH__JWT_SECRET=...
//! TOOL_HUB__SERVER__PORT=8080
//! ```
//!
//! ```no_run
//! use tool_hub::config::AppConfig;
//!
//! let config = AppConfig::load().expect("configuration loads");
//! config.validate().expect("configuration is valid");
//! ```

mod auth;
mod database;
mod error;
mod outbound;
mod seed;
mod server;

pub use auth::AuthConfig;
pub use database::DatabaseConfig;
pub use error::{ConfigError, ValidationError};
pub use outbound::OutboundConfig;
pub use seed::SeedConfig;
pub use server::{Environment, LogFormat, ServerConfig};

use serde::Deserialize;

/// Environment variable prefix.
pub const ENV_PREFIX: &str = "TOOL_HUB";

/// Separator between prefix, section and key.
const ENV_SEPARATOR: &str = "__";

/// Root configuration. `database` and `auth` are required; the other
/// sections fall back to their defaults.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,

    pub database: DatabaseConfig,

    pub auth: AuthConfig,

    #[serde(default)]
    pub seed: SeedConfig,

    #[serde(default)]
    pub outbound: OutboundConfig,
}

impl AppConfig {
    /// Reads `.env` (when present) and then the process environment.
    ///
    /// # Errors
    ///
    /// `ConfigError::LoadError` when a required value is missing or a value
    /// does not parse into its field type.
    pub fn load() -> Result<Self, ConfigError> {
        if let Ok(path) = dotenvy::dotenv() {
            tracing::debug!(path = %path.display(), "Loaded .env");
        }
        Self::from_source(config::Environment::with_prefix(ENV_PREFIX))
    }

    fn from_source(source: config::Environment) -> Result<Self, ConfigError> {
        let config = config::Config::builder()
            .add_source(source.prefix_separator(ENV_SEPARATOR).separator(ENV_SEPARATOR))
            .build()?
            .try_deserialize()?;
        Ok(config)
    }

    /// Checks every section; the first failure wins.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.database.validate()?;
        self.auth.validate(&self.server.environment)?;
        self.seed.validate()?;
        self.outbound.validate()
    }

    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "0123456789abcdef0123456789abcdef";

    /// Loads from an explicit variable set instead of the process environment.
    fn load_with(vars: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let map = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_source(config::Environment::with_prefix(ENV_PREFIX).source(Some(map)))
    }

    fn minimal() -> Vec<(&'static str, &'static str)> {
        vec![
            ("TOOL_HUB__DATABASE__URL", "postgresql://test@localhost/test"),
            ("TOOL_HUB__AUTH__JWT_SECRET", SECRET),
        ]
    }

    #[test]
    fn minimal_environment_loads_with_defaults() {
        let config = load_with(&minimal()).unwrap();

        assert_eq!(config.database.url, "postgresql://test@localhost/test");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.auth.access_token_ttl_secs, 900);
        assert_eq!(config.outbound.timeout_secs, 10);
        assert!(config.seed.enabled);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn nested_keys_override_defaults() {
        let mut vars = minimal();
        vars.push(("TOOL_HUB__SERVER__PORT", "9090"));
        vars.push(("TOOL_HUB__OUTBOUND__ALLOW_PRIVATE_TARGETS", "true"));

        let config = load_with(&vars).unwrap();

        assert_eq!(config.server.port, 9090);
        assert!(config.outbound.allow_private_targets);
    }

    #[test]
    fn production_requires_secure_cookies() {
        let mut vars = minimal();
        vars.push(("TOOL_HUB__SERVER__ENVIRONMENT", "production"));
        vars.push(("TOOL_HUB__AUTH__SECURE_COOKIES", "false"));

        let config = load_with(&vars).unwrap();

        assert!(config.is_production());
        assert!(matches!(
            config.validate(),
            Err(ValidationError::InsecureCookiesInProduction)
        ));
    }

    #[test]
    fn missing_database_section_fails_to_load() {
        let result = load_with(&[("TOOL_HUB__AUTH__JWT_SECRET", SECRET)]);

        assert!(matches!(result, Err(ConfigError::LoadError(_))));
    }
}
