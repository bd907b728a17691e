//! Configuration module with business-specific sub-modules
//!
//! This module organizes configuration into logical areas:
//! - `auth` - Session token signing and lifetimes
//! - `environment` - Environment detection and logging configuration
//! - `rate_limit` - Per-operation throttling rules
//! - `revocation` - Revocation registry sweep schedule
//! - `server` - HTTP server binding
//!
//! Sources are layered in this order, later ones winning: built-in defaults,
//! `config/default.toml`, `config/<environment>.toml`, then `FC__*`
//! environment variables (for example `FC__AUTH__SECRET`).

pub mod auth;
pub mod environment;
pub mod rate_limit;
pub mod revocation;
pub mod server;

use config::{Config, File};
use serde::{Deserialize, Serialize};
use thiserror::Error;

// Re-export commonly used types
pub use auth::{
    JwtConfig, DEFAULT_DEVELOPMENT_SECRET, MAX_TOKEN_LIFETIME_SECONDS, MIN_SECRET_BYTES,
};
pub use environment::{Environment, LogFormat, LoggingConfig};
pub use rate_limit::{ThrottleConfig, ThrottleRule, MAX_THROTTLE_PERIOD_SECONDS};
pub use revocation::RevocationConfig;
pub use server::ServerConfig;

/// Errors raised while loading or validating configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("Invalid configuration for {field}: {reason}")]
    Invalid { field: String, reason: String },
}

impl ConfigError {
    fn invalid(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ConfigError::Invalid {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// Environment configuration
    pub environment: Environment,

    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Token signing configuration
    pub auth: JwtConfig,

    /// Revocation sweep configuration
    #[serde(default)]
    pub revocation: RevocationConfig,

    /// Rate limiting configuration
    #[serde(default)]
    pub rate_limit: ThrottleConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::for_environment(Environment::default())
    }
}

impl AppConfig {
    /// Built-in defaults for an environment
    pub fn for_environment(environment: Environment) -> Self {
        let rate_limit = match environment {
            Environment::Development => ThrottleConfig::development(),
            Environment::Staging | Environment::Production => ThrottleConfig::production(),
        };

        Self {
            environment,
            server: ServerConfig::default(),
            auth: JwtConfig::default(),
            revocation: RevocationConfig::default(),
            rate_limit,
            logging: LoggingConfig::for_environment(environment),
        }
    }

    /// Load configuration from defaults, optional files and `FC__*` variables
    pub fn load() -> Result<Self, ConfigError> {
        let environment = Environment::from_env();
        let defaults = Config::try_from(&Self::for_environment(environment))?;

        let config: AppConfig = Config::builder()
            .add_source(defaults)
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(environment.config_name()).required(false))
            .add_source(
                config::Environment::with_prefix("FC")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;

        config.validate()?;
        Ok(config)
    }

    /// Reject settings that would make the service unsafe to start
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.auth.secret.len() < MIN_SECRET_BYTES {
            return Err(ConfigError::invalid(
                "auth.secret",
                format!("must be at least {} bytes", MIN_SECRET_BYTES),
            ));
        }
        if self.environment.is_production() && self.auth.is_using_default_secret() {
            return Err(ConfigError::invalid(
                "auth.secret",
                "the development secret cannot be used in production",
            ));
        }
        let lifetimes = [
            ("auth.access_token_expiry", self.auth.access_token_expiry),
            ("auth.refresh_token_expiry", self.auth.refresh_token_expiry),
        ];
        for (field, seconds) in lifetimes {
            if seconds <= 0 || seconds > MAX_TOKEN_LIFETIME_SECONDS {
                return Err(ConfigError::invalid(
                    field,
                    format!("must be between 1 and {} seconds", MAX_TOKEN_LIFETIME_SECONDS),
                ));
            }
        }
        if self.revocation.sweep_enabled && self.revocation.sweep_interval_seconds == 0 {
            return Err(ConfigError::invalid(
                "revocation.sweep_interval_seconds",
                "must be positive when the sweep is enabled",
            ));
        }
        for (name, rule) in self.rate_limit.rules() {
            if rule.capacity == 0 || rule.period_seconds == 0 {
                return Err(ConfigError::invalid(
                    format!("rate_limit.{}", name),
                    "capacity and period_seconds must be positive",
                ));
            }
            if rule.period_seconds > MAX_THROTTLE_PERIOD_SECONDS {
                return Err(ConfigError::invalid(
                    format!("rate_limit.{}", name),
                    format!("period_seconds must not exceed {}", MAX_THROTTLE_PERIOD_SECONDS),
                ));
            }
        }
        Ok(())
    }
}
