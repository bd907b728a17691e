//! Shared configuration and response types for the session security server
//!
//! This crate provides common functionality used across all server modules:
//! - Layered configuration (defaults, files, environment variables)
//! - Error response structures and error codes

pub mod config;
pub mod errors;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, ConfigError, Environment, JwtConfig, LogFormat, LoggingConfig, RevocationConfig,
    ServerConfig, ThrottleConfig, ThrottleRule,
};
pub use errors::{error_codes, ErrorResponse};
