//! Named throttle scopes for the operations the API gates

use fc_shared::config::{ThrottleConfig, ThrottleRule};
use std::fmt;

/// Operation guarded by a rate limit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ThrottleScope {
    /// Login attempts, keyed by client IP
    Login,
    /// Password reset requests, keyed by email address
    PasswordReset,
    /// AI flashcard generation, keyed by user id
    AiGeneration,
}

impl ThrottleScope {
    pub fn prefix(&self) -> &'static str {
        match self {
            ThrottleScope::Login => "login",
            ThrottleScope::PasswordReset => "password-reset",
            ThrottleScope::AiGeneration => "ai-generate",
        }
    }

    /// Bucket key for this scope and caller
    ///
    /// Email addresses are trimmed and lower-cased so that case variants
    /// share one bucket.
    pub fn key(&self, discriminator: &str) -> String {
        match self {
            ThrottleScope::PasswordReset => {
                format!("{}:{}", self.prefix(), discriminator.trim().to_lowercase())
            }
            _ => format!("{}:{}", self.prefix(), discriminator),
        }
    }

    /// Configured rule for this scope
    pub fn rule(&self, config: &ThrottleConfig) -> ThrottleRule {
        match self {
            ThrottleScope::Login => config.login,
            ThrottleScope::PasswordReset => config.password_reset,
            ThrottleScope::AiGeneration => config.ai_generation,
        }
    }
}

impl fmt::Display for ThrottleScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.prefix())
    }
}
