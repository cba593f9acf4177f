//! Policy for the access code lifecycle

use chrono::Duration;
use std::time::Duration as StdDuration;

use mg_shared::config::AccessPolicyConfig;

use crate::domain::entities::access_code::{
    RETENTION_HOURS, REUSE_WINDOW_SECONDS, SWEEP_COOLDOWN_MINUTES,
};

/// Default bound on a single validation transaction
const DEFAULT_STORE_TIMEOUT_MS: u64 = 5000;

/// Durations governing validation and housekeeping
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessPolicy {
    /// How long after first use a code keeps granting access (inclusive)
    pub reuse_window: Duration,
    /// Rows created longer ago than this are swept
    pub retention: Duration,
    /// Minimum time between two sweeps, measured from sweep start
    pub sweep_cooldown: Duration,
    /// Bound on a validation transaction, including lock waits
    pub store_timeout: StdDuration,
}

impl Default for AccessPolicy {
    fn default() -> Self {
        Self {
            reuse_window: Duration::seconds(REUSE_WINDOW_SECONDS),
            retention: Duration::hours(RETENTION_HOURS),
            sweep_cooldown: Duration::minutes(SWEEP_COOLDOWN_MINUTES),
            store_timeout: StdDuration::from_millis(DEFAULT_STORE_TIMEOUT_MS),
        }
    }
}

impl AccessPolicy {
    /// Override the store timeout
    pub fn with_store_timeout(mut self, timeout: StdDuration) -> Self {
        self.store_timeout = timeout;
        self
    }
}

impl From<&AccessPolicyConfig> for AccessPolicy {
    /// Non-positive or out-of-range values fall back to the defaults
    fn from(config: &AccessPolicyConfig) -> Self {
        let defaults = Self::default();
        Self {
            reuse_window: positive(Duration::try_seconds, config.reuse_window_seconds)
                .unwrap_or(defaults.reuse_window),
            retention: positive(Duration::try_hours, config.retention_hours)
                .unwrap_or(defaults.retention),
            sweep_cooldown: positive(Duration::try_minutes, config.sweep_cooldown_minutes)
                .unwrap_or(defaults.sweep_cooldown),
            store_timeout: if config.store_timeout_ms > 0 {
                StdDuration::from_millis(config.store_timeout_ms)
            } else {
                defaults.store_timeout
            },
        }
    }
}

fn positive(unit: fn(i64) -> Option<Duration>, value: i64) -> Option<Duration> {
    if value > 0 {
        unit(value)
    } else {
        None
    }
}
