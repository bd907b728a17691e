//! Revocation registry configuration

use serde::{Deserialize, Serialize};

/// Background sweep settings for the revocation registry
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RevocationConfig {
    /// How often to purge stale entries (in seconds)
    #[serde(default = "default_sweep_interval")]
    pub sweep_interval_seconds: u64,

    /// Whether the periodic sweep runs at all
    #[serde(default = "default_sweep_enabled")]
    pub sweep_enabled: bool,
}

impl Default for RevocationConfig {
    fn default() -> Self {
        Self {
            sweep_interval_seconds: default_sweep_interval(),
            sweep_enabled: default_sweep_enabled(),
        }
    }
}

fn default_sweep_interval() -> u64 {
    3600 // Run every hour
}

fn default_sweep_enabled() -> bool {
    true
}
