//! Opportunistic retention sweeping of old access codes

use std::sync::{Arc, Mutex, PoisonError};

use chrono::{DateTime, Utc};
use tracing::{debug, error, info};

use crate::errors::{AccessCodeResult, StoreError};
use crate::repositories::access_code::CodeStore;

use super::clock::Clock;
use super::config::AccessPolicy;

/// Result of a `maybe_sweep` call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SweepOutcome {
    /// Cooldown still running; nothing was done
    Skipped,
    /// The delete ran
    Swept { deleted: u64 },
}

/// Deletes rows older than the retention horizon, at most once per cooldown
///
/// Not scheduled on its own: the request path calls [`RetentionSweeper::maybe_sweep`]
/// alongside validation. The last-sweep marker lives in this instance.
pub struct RetentionSweeper<S: CodeStore, C: Clock> {
    store: Arc<S>,
    clock: Arc<C>,
    policy: AccessPolicy,
    last_run: Mutex<Option<DateTime<Utc>>>,
}

impl<S: CodeStore, C: Clock> RetentionSweeper<S, C> {
    /// Create a sweeper that has never run
    pub fn new(store: Arc<S>, clock: Arc<C>, policy: AccessPolicy) -> Self {
        Self {
            store,
            clock,
            policy,
            last_run: Mutex::new(None),
        }
    }

    /// Sweep if the cooldown since the previous sweep's start has elapsed
    ///
    /// The cooldown slot is claimed before the delete runs, so concurrent
    /// callers inside the cooldown return `Skipped`. If the delete fails the
    /// previous marker is restored and the next call retries. The delete is
    /// bounded by the store timeout; running out of time counts as a failure.
    pub async fn maybe_sweep(&self) -> AccessCodeResult<SweepOutcome> {
        let now = self.clock.now();

        let previous = match self.try_claim(now) {
            Some(previous) => previous,
            None => {
                debug!(event = "retention_sweep_skipped", "Sweep cooldown still running");
                return Ok(SweepOutcome::Skipped);
            }
        };

        let Some(cutoff) = now.checked_sub_signed(self.policy.retention) else {
            // Nothing can be older than a horizon before the calendar starts.
            return Ok(SweepOutcome::Swept { deleted: 0 });
        };

        let delete = self.store.delete_created_before(cutoff);
        let result = match tokio::time::timeout(self.policy.store_timeout, delete).await {
            Ok(result) => result,
            Err(_) => Err(StoreError::unavailable(format!(
                "retention delete exceeded {} ms",
                self.policy.store_timeout.as_millis()
            ))),
        };

        match result {
            Ok(deleted) => {
                info!(
                    deleted_count = deleted,
                    cutoff = %cutoff,
                    event = "retention_sweep",
                    "Swept access codes past retention"
                );
                Ok(SweepOutcome::Swept { deleted })
            }
            Err(e) => {
                self.release(now, previous);
                error!(error = %e, event = "retention_sweep_failed", "Retention sweep failed");
                Err(e.into())
            }
        }
    }

    /// Start instant of the most recent sweep
    pub fn last_run(&self) -> Option<DateTime<Utc>> {
        *self.last_run.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Claim the sweep slot; returns the marker it replaced, or `None` if in cooldown
    fn try_claim(&self, now: DateTime<Utc>) -> Option<Option<DateTime<Utc>>> {
        let mut last_run = self.last_run.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(last) = *last_run {
            if now - last < self.policy.sweep_cooldown {
                return None;
            }
        }
        Some(last_run.replace(now))
    }

    fn release(&self, claimed: DateTime<Utc>, previous: Option<DateTime<Utc>>) {
        let mut last_run = self.last_run.lock().unwrap_or_else(PoisonError::into_inner);
        if *last_run == Some(claimed) {
            *last_run = previous;
        }
    }
}
