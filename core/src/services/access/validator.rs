//! Claim-or-check validation of access codes

use std::sync::Arc;

use tracing::{debug, error, info, warn};

use mg_shared::validation::mask_code;

use crate::domain::entities::access_code::{AccessCode, CodeState};
use crate::domain::value_objects::verdict::{DenialReason, Verdict};
use crate::errors::StoreResult;
use crate::repositories::access_code::{CodeStore, CodeTransaction};

use super::clock::Clock;
use super::config::AccessPolicy;

/// Validates access codes against the store
///
/// The read of the row and the first-use write happen inside one store
/// transaction that locks the row, so of N concurrent calls on a fresh code
/// exactly one observes `first_use = true`. The others wait for the lock,
/// then see the code as active.
pub struct Validator<S: CodeStore, C: Clock> {
    store: Arc<S>,
    clock: Arc<C>,
    policy: AccessPolicy,
}

impl<S: CodeStore, C: Clock> Validator<S, C> {
    /// Create a new validator
    ///
    /// # Arguments
    ///
    /// * `store` - Shared code store
    /// * `clock` - Time source used for `used_at` and window checks
    /// * `policy` - Reuse window and store timeout
    pub fn new(store: Arc<S>, clock: Arc<C>, policy: AccessPolicy) -> Self {
        Self {
            store,
            clock,
            policy,
        }
    }

    /// Validate a presented code
    ///
    /// Never fails: store errors and timeouts are logged and returned as
    /// `Denied(StoreUnavailable)`, so infrastructure trouble can never turn
    /// into a grant.
    pub async fn validate(&self, code: &str) -> Verdict {
        if !AccessCode::is_valid_format(code) {
            debug!(
                event = "access_denied_format",
                code_length = code.chars().count(),
                "Rejected malformed access code"
            );
            return Verdict::Denied(DenialReason::Rejected);
        }

        let masked = mask_code(code);
        match tokio::time::timeout(self.policy.store_timeout, self.claim_or_check(code)).await {
            Ok(Ok(verdict)) => {
                match verdict {
                    Verdict::Granted { first_use: true } => info!(
                        code = %masked,
                        event = "access_granted_first_use",
                        "Access code redeemed"
                    ),
                    Verdict::Granted { first_use: false } => info!(
                        code = %masked,
                        event = "access_granted_reuse",
                        "Access code reused within window"
                    ),
                    Verdict::Denied(_) => {}
                }
                verdict
            }
            Ok(Err(e)) => {
                error!(
                    code = %masked,
                    error = %e,
                    event = "access_store_failure",
                    "Validation transaction failed"
                );
                Verdict::Denied(DenialReason::StoreUnavailable)
            }
            Err(_) => {
                error!(
                    code = %masked,
                    timeout_ms = self.policy.store_timeout.as_millis() as u64,
                    event = "access_store_timeout",
                    "Validation transaction timed out"
                );
                Verdict::Denied(DenialReason::StoreUnavailable)
            }
        }
    }

    /// Run the transaction; commit on a decision, roll back on any error
    ///
    /// A transaction abandoned by the timeout is dropped, which rolls it back.
    async fn claim_or_check(&self, code: &str) -> StoreResult<Verdict> {
        let mut tx = self.store.begin().await?;

        match self.decide(&mut tx, code).await {
            Ok(verdict) => {
                tx.commit().await?;
                Ok(verdict)
            }
            Err(e) => {
                if let Err(rollback_err) = tx.rollback().await {
                    warn!(
                        error = %rollback_err,
                        "Rollback after failed validation also failed"
                    );
                }
                Err(e)
            }
        }
    }

    async fn decide(&self, tx: &mut S::Tx, code: &str) -> StoreResult<Verdict> {
        let Some(record) = tx.fetch_for_update(code).await? else {
            info!(
                code = %mask_code(code),
                event = "access_denied_unknown",
                "Access code not found"
            );
            return Ok(Verdict::Denied(DenialReason::Rejected));
        };

        // Read the clock only once the row lock is held.
        let now = self.clock.now();

        match record.state_at(now, self.policy.reuse_window) {
            CodeState::Fresh => {
                tx.mark_used(code, now).await?;
                Ok(Verdict::Granted { first_use: true })
            }
            CodeState::Active => Ok(Verdict::Granted { first_use: false }),
            CodeState::Expired => {
                info!(
                    code = %mask_code(code),
                    event = "access_denied_expired",
                    "Access code reuse window has lapsed"
                );
                Ok(Verdict::Denied(DenialReason::Rejected))
            }
        }
    }

    /// The policy in effect
    pub fn policy(&self) -> &AccessPolicy {
        &self.policy
    }
}
