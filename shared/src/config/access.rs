//! Access code lifecycle configuration

use serde::{Deserialize, Serialize};

/// Tunables for the access-code lifecycle
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct AccessPolicyConfig {
    /// Seconds after first redemption during which the code keeps granting access
    #[serde(default = "default_reuse_window_seconds")]
    pub reuse_window_seconds: i64,

    /// Rows older than this many hours are purged by the sweeper
    #[serde(default = "default_retention_hours")]
    pub retention_hours: i64,

    /// Minimum minutes between two sweeps
    #[serde(default = "default_sweep_cooldown_minutes")]
    pub sweep_cooldown_minutes: i64,

    /// Upper bound for a single validation transaction in milliseconds
    #[serde(default = "default_store_timeout_ms")]
    pub store_timeout_ms: u64,
}

impl Default for AccessPolicyConfig {
    fn default() -> Self {
        Self {
            reuse_window_seconds: default_reuse_window_seconds(),
            retention_hours: default_retention_hours(),
            sweep_cooldown_minutes: default_sweep_cooldown_minutes(),
            store_timeout_ms: default_store_timeout_ms(),
        }
    }
}

fn default_reuse_window_seconds() -> i64 {
    60
}

fn default_retention_hours() -> i64 {
    24
}

fn default_sweep_cooldown_minutes() -> i64 {
    60
}

fn default_store_timeout_ms() -> u64 {
    5000
}
