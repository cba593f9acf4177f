//! Access code entity gating verification-code retrieval.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use mg_shared::validation::{is_valid_access_code, ACCESS_CODE_LENGTH};

/// Length of an access code
pub const CODE_LENGTH: usize = ACCESS_CODE_LENGTH;

/// Seconds after first redemption during which the code keeps granting access
pub const REUSE_WINDOW_SECONDS: i64 = 60;

/// Age in hours after which a row is eligible for sweeping
pub const RETENTION_HOURS: i64 = 24;

/// Minimum minutes between two retention sweeps
pub const SWEEP_COOLDOWN_MINUTES: i64 = 60;

/// Redemption state derived from the stored fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CodeState {
    /// Never redeemed
    Fresh,
    /// Redeemed, still inside the reuse window
    Active,
    /// Redeemed, reuse window has lapsed
    Expired,
}

/// One row of the access code table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessCode {
    /// The 6-digit code, primary key
    pub code: String,

    /// Timestamp when the code was created
    pub created_at: DateTime<Utc>,

    /// First successful redemption, `None` while the code is fresh
    pub used_at: Option<DateTime<Utc>>,
}

impl AccessCode {
    /// Creates a fresh code record
    ///
    /// # Arguments
    ///
    /// * `code` - Six ASCII digits; the caller validates the format
    /// * `created_at` - Insertion instant
    pub fn new(code: impl Into<String>, created_at: DateTime<Utc>) -> Self {
        Self {
            code: code.into(),
            created_at,
            used_at: None,
        }
    }

    /// Checks whether a string has the access code format
    pub fn is_valid_format(code: &str) -> bool {
        is_valid_access_code(code)
    }

    /// Derives the redemption state at `now`
    ///
    /// The window is inclusive: exactly `window` after first use is still
    /// `Active`.
    pub fn state_at(&self, now: DateTime<Utc>, window: Duration) -> CodeState {
        match self.used_at {
            None => CodeState::Fresh,
            Some(used_at) if now - used_at <= window => CodeState::Active,
            Some(_) => CodeState::Expired,
        }
    }

    /// Time elapsed since first redemption, if any
    pub fn elapsed_since_use(&self, now: DateTime<Utc>) -> Option<Duration> {
        self.used_at.map(|used_at| now - used_at)
    }

    /// Whether the row is older than the retention horizon
    pub fn is_past_retention(&self, now: DateTime<Utc>, retention: Duration) -> bool {
        self.created_at < now - retention
    }

    /// Records the first redemption
    pub fn mark_used(&mut self, at: DateTime<Utc>) {
        if self.used_at.is_none() {
            self.used_at = Some(at);
        }
    }

    /// Returns the code to the fresh state
    pub fn wipe(&mut self) {
        self.used_at = None;
    }
}
