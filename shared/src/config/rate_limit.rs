//! Rate limiting configuration module
//!
//! Each sensitive operation gets its own bucket rule. A rule allows
//! `capacity` operations and refills the whole allotment once per
//! `period_seconds`.

use chrono::Duration;
use serde::{Deserialize, Serialize};

/// Longest accepted refill period, in seconds (one year)
pub const MAX_THROTTLE_PERIOD_SECONDS: u64 = 366 * 86400;

/// A single bucket rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct ThrottleRule {
    /// Operations allowed per period
    pub capacity: u32,

    /// Refill period in seconds
    pub period_seconds: u64,
}

impl ThrottleRule {
    pub const fn new(capacity: u32, period_seconds: u64) -> Self {
        Self {
            capacity,
            period_seconds,
        }
    }

    /// Refill period as a duration
    pub fn period(&self) -> Duration {
        // chrono durations are bounded by i64 milliseconds
        let max_seconds = (i64::MAX / 1000) as u64;
        Duration::seconds(self.period_seconds.min(max_seconds) as i64)
    }
}

/// Per-operation throttling rules
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ThrottleConfig {
    /// Login attempts per client IP
    #[serde(default = "default_login")]
    pub login: ThrottleRule,

    /// Password reset requests per email address
    #[serde(default = "default_password_reset")]
    pub password_reset: ThrottleRule,

    /// AI flashcard generation requests per user
    #[serde(default = "default_ai_generation")]
    pub ai_generation: ThrottleRule,
}

impl Default for ThrottleConfig {
    fn default() -> Self {
        Self {
            login: default_login(),
            password_reset: default_password_reset(),
            ai_generation: default_ai_generation(),
        }
    }
}

impl ThrottleConfig {
    /// Create a development configuration (more lenient limits)
    pub fn development() -> Self {
        Self {
            login: ThrottleRule::new(50, 900),
            ..Default::default()
        }
    }

    /// Create a production configuration
    pub fn production() -> Self {
        Self::default()
    }

    /// All rules, labelled, for validation and logging
    pub fn rules(&self) -> [(&'static str, ThrottleRule); 3] {
        [
            ("login", self.login),
            ("password_reset", self.password_reset),
            ("ai_generation", self.ai_generation),
        ]
    }
}

fn default_login() -> ThrottleRule {
    ThrottleRule::new(5, 15 * 60)
}

fn default_password_reset() -> ThrottleRule {
    ThrottleRule::new(3, 60 * 60)
}

fn default_ai_generation() -> ThrottleRule {
    ThrottleRule::new(10, 60)
}
