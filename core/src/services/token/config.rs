//! Configuration for the token codec

use chrono::Duration;
use fc_shared::config::{JwtConfig, MAX_TOKEN_LIFETIME_SECONDS, MIN_SECRET_BYTES};

use crate::errors::{DomainError, DomainResult};

/// Configuration for the token codec
#[derive(Debug, Clone)]
pub struct TokenCodecConfig {
    /// HMAC signing secret
    pub secret: String,
    /// Access token lifetime
    pub access_ttl: Duration,
    /// Refresh token lifetime
    pub refresh_ttl: Duration,
}

impl TokenCodecConfig {
    pub fn new(secret: impl Into<String>, access_ttl: Duration, refresh_ttl: Duration) -> Self {
        Self {
            secret: secret.into(),
            access_ttl,
            refresh_ttl,
        }
    }

    /// Reject secrets shorter than 256 bits and lifetimes outside
    /// `(0, MAX_TOKEN_LIFETIME_SECONDS]`
    pub fn validate(&self) -> DomainResult<()> {
        if self.secret.len() < MIN_SECRET_BYTES {
            return Err(DomainError::Configuration {
                message: format!(
                    "token secret must be at least {} bytes, got {}",
                    MIN_SECRET_BYTES,
                    self.secret.len()
                ),
            });
        }
        check_lifetime("access", self.access_ttl)?;
        check_lifetime("refresh", self.refresh_ttl)
    }
}

fn check_lifetime(class: &str, ttl: Duration) -> DomainResult<()> {
    if ttl <= Duration::zero() {
        return Err(DomainError::Configuration {
            message: format!("{} token lifetime must be positive", class),
        });
    }
    if ttl > Duration::seconds(MAX_TOKEN_LIFETIME_SECONDS) {
        return Err(DomainError::Configuration {
            message: format!(
                "{} token lifetime must not exceed {} seconds",
                class, MAX_TOKEN_LIFETIME_SECONDS
            ),
        });
    }
    Ok(())
}

/// Seconds to a duration, saturating at chrono's bounds
fn lifetime(seconds: i64) -> Duration {
    let bound = i64::MAX / 1000;
    Duration::seconds(seconds.clamp(-bound, bound))
}

impl From<&JwtConfig> for TokenCodecConfig {
    fn from(config: &JwtConfig) -> Self {
        Self::new(
            config.secret.clone(),
            lifetime(config.access_token_expiry),
            lifetime(config.refresh_token_expiry),
        )
    }
}
