//! Startup seeding configuration

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use super::error::ValidationError;

/// Seeds the default tool catalog and an administrator account
#[derive(Debug, Clone, Deserialize)]
pub struct SeedConfig {
    /// Run seeding at startup
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    #[serde(default = "default_admin_username")]
    pub admin_username: String,

    #[serde(default = "default_admin_email")]
    pub admin_email: String,

    /// No admin is created when unset
    pub admin_password: Option<SecretString>,
}

impl SeedConfig {
    /// Admin credentials when a password has been configured
    pub fn admin_credentials(&self) -> Option<(&str, &str, &str)> {
        self.admin_password.as_ref().map(|password| {
            (
                self.admin_username.as_str(),
                self.admin_email.as_str(),
                password.expose_secret().as_str(),
            )
        })
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.admin_password.is_none() {
            return Ok(());
        }
        if self.admin_username.trim().is_empty() {
            return Err(ValidationError::InvalidSeedAccount("username is empty"));
        }
        if !self.admin_email.contains('@') {
            return Err(ValidationError::InvalidSeedAccount("email is invalid"));
        }
        if let Some(password) = &self.admin_password {
            if password.expose_secret().len() < 6 {
                return Err(ValidationError::InvalidSeedAccount("password is too short"));
            }
        }
        Ok(())
    }
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            admin_username: default_admin_username(),
            admin_email: default_admin_email(),
            admin_password: None,
        }
    }
}

fn default_enabled() -> bool {
    true
}

fn default_admin_username() -> String {
    "admin".to_string()
}

fn default_admin_email() -> String {
    "admin@toolhub.local".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_password_means_no_admin() {
        let config = SeedConfig::default();
        assert!(config.admin_credentials().is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn credentials_exposed_when_password_set() {
        let config = SeedConfig {
            admin_password: Some(SecretString::new("changeme".to_string())),
            ..Default::default()
        };
        let (username, email, password) = config.admin_credentials().unwrap();
        assert_eq!(username, "admin");
        assert_eq!(email, "admin@toolhub.local");
        assert_eq!(password, "changeme");
    }

    #[test]
    fn short_password_rejected() {
        let config = SeedConfig {
            admin_password: Some(SecretString::new("abc".to_string())),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
