//! Request-path entry point combining sweeping and validation

use std::sync::Arc;

use crate::domain::value_objects::verdict::Verdict;
use crate::repositories::access_code::CodeStore;

use super::clock::Clock;
use super::config::AccessPolicy;
use super::sweeper::RetentionSweeper;
use super::validator::Validator;

/// Validation service shared by request handlers
///
/// Every `validate` call first gives the sweeper a chance to run. Both
/// steps are bounded by the policy's store timeout, so a stalled store
/// delays a request by at most twice that before it is denied.
pub struct AccessService<S: CodeStore, C: Clock> {
    validator: Validator<S, C>,
    sweeper: RetentionSweeper<S, C>,
}

impl<S: CodeStore, C: Clock> AccessService<S, C> {
    /// Create a new access service over one store and clock
    pub fn new(store: Arc<S>, clock: Arc<C>, policy: AccessPolicy) -> Self {
        Self {
            validator: Validator::new(Arc::clone(&store), Arc::clone(&clock), policy.clone()),
            sweeper: RetentionSweeper::new(store, clock, policy),
        }
    }

    /// Opportunistic sweep, then claim-or-check
    pub async fn validate(&self, code: &str) -> Verdict {
        // Sweep failures are logged by the sweeper and never affect the verdict.
        let _ = self.sweeper.maybe_sweep().await;
        self.validator.validate(code).await
    }

    pub fn validator(&self) -> &Validator<S, C> {
        &self.validator
    }

    pub fn sweeper(&self) -> &RetentionSweeper<S, C> {
        &self.sweeper
    }
}
