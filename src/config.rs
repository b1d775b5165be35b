//! Configuration loading and logging initialization.

use serde::Deserialize;
use std::path::Path;

use crate::error::{ConfigError, Result};
use crate::exchange::binance::TESTNET_API_URL;

/// Environment variable names honored by [`Config::from_env`].
const ENV_API_KEY: &str = "ORDERGATE_API_KEY";
const ENV_API_SECRET: &str = "ORDERGATE_API_SECRET";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub network: NetworkConfig,
    #[serde(default)]
    pub credentials: Credentials,
    #[serde(default)]
    pub audit: AuditConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NetworkConfig {
    pub api_url: String,
}

/// Exchange API credentials.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Credentials {
    #[serde(default)]
    pub api_key: String,
    #[serde(default)]
    pub api_secret: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuditConfig {
    /// File the audit log appends to for the process lifetime.
    pub path: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

impl Config {
    /// Load from a TOML file, filling credentials from the environment when
    /// the file leaves them empty.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        let mut config: Config = toml::from_str(&content).map_err(ConfigError::Parse)?;
        config.credentials.fill_from_env();
        config.validate()?;
        Ok(config)
    }

    /// Defaults plus credentials from `ORDERGATE_API_KEY` /
    /// `ORDERGATE_API_SECRET` (a `.env` file is honored).
    pub fn from_env() -> Result<Self> {
        let mut config = Config::default();
        config.credentials.fill_from_env();
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.network.api_url.is_empty() {
            return Err(ConfigError::MissingField { field: "api_url" }.into());
        }
        if self.credentials.api_key.is_empty() {
            return Err(ConfigError::MissingField { field: "api_key" }.into());
        }
        if self.credentials.api_secret.is_empty() {
            return Err(ConfigError::MissingField { field: "api_secret" }.into());
        }
        if self.audit.path.is_empty() {
            return Err(ConfigError::MissingField { field: "audit.path" }.into());
        }
        Ok(())
    }
}

impl Credentials {
    pub fn new(api_key: impl Into<String>, api_secret: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_secret: api_secret.into(),
        }
    }

    fn fill_from_env(&mut self) {
        // Best effort; a missing .env file is not an error.
        let _ = dotenvy::dotenv();
        if self.api_key.is_empty() {
            if let Ok(key) = std::env::var(ENV_API_KEY) {
                self.api_key = key;
            }
        }
        if self.api_secret.is_empty() {
            if let Ok(secret) = std::env::var(ENV_API_SECRET) {
                self.api_secret = secret;
            }
        }
    }
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            api_url: TESTNET_API_URL.into(),
        }
    }
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            // The filename the original deployment used.
            path: "trading_bot.log".into(),
        }
    }
}

impl LoggingConfig {
    /// Initialize the tracing subscriber with this logging configuration.
    pub fn init(&self) {
        use tracing_subscriber::{fmt, EnvFilter};

        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&self.level));

        match self.format.as_str() {
            "json" => {
                fmt().json().with_env_filter(filter).init();
            }
            _ => {
                fmt().with_env_filter(filter).init();
            }
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".into(),
            format: "pretty".into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn default_points_at_testnet() {
        let config = Config::default();
        assert_eq!(config.network.api_url, TESTNET_API_URL);
        assert_eq!(config.audit.path, "trading_bot.log");
    }

    #[test]
    fn validate_rejects_empty_credentials() {
        let config = Config::default();
        let result = config.validate();
        assert!(matches!(
            result,
            Err(Error::Config(ConfigError::MissingField { field: "api_key" }))
        ));
    }

    #[test]
    fn parses_full_toml() {
        let raw = r#"
            [network]
            api_url = "https://testnet.binancefuture.com"

            [credentials]
            api_key = "key"
            api_secret = "secret"

            [audit]
            path = "audit.log"

            [logging]
            level = "debug"
            format = "json"
        "#;
        let config: Config = toml::from_str(raw).unwrap();
        assert_eq!(config.credentials.api_key, "key");
        assert_eq!(config.logging.level, "debug");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn missing_sections_fall_back_to_defaults() {
        let raw = r#"
            [credentials]
            api_key = "key"
            api_secret = "secret"
        "#;
        let config: Config = toml::from_str(raw).unwrap();
        assert_eq!(config.network.api_url, TESTNET_API_URL);
        assert!(config.validate().is_ok());
    }
}
