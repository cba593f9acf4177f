//! Administrative lifecycle operations for trusted operators

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use tracing::{info, warn};

use mg_shared::types::Language;
use mg_shared::validation::mask_code;

use crate::domain::entities::access_code::{AccessCode, CodeState};
use crate::domain::value_objects::code_summary::{CodeStatus, CodeSummary};
use crate::errors::{AccessCodeError, AccessCodeResult};
use crate::repositories::access_code::CodeStore;

use super::clock::Clock;
use super::config::AccessPolicy;
use super::humanize::humanize_elapsed;

/// Add, delete, wipe and list access codes
///
/// Each mutation is a single store call. Format and existence problems come
/// back as `AccessCodeError` values; store failures come back as
/// `AccessCodeError::StoreUnavailable` so an operator is never told a
/// mutation succeeded when it did not.
pub struct LifecycleAdmin<S: CodeStore, C: Clock> {
    store: Arc<S>,
    clock: Arc<C>,
    policy: AccessPolicy,
}

impl<S: CodeStore, C: Clock> LifecycleAdmin<S, C> {
    pub fn new(store: Arc<S>, clock: Arc<C>, policy: AccessPolicy) -> Self {
        Self {
            store,
            clock,
            policy,
        }
    }

    /// Register a new fresh code
    ///
    /// # Returns
    /// * `Ok(AccessCode)` - The inserted row
    /// * `Err(AccessCodeError::InvalidFormat)` - Not exactly six digits
    /// * `Err(AccessCodeError::AlreadyExists)` - The code is already registered
    pub async fn add(&self, code: &str) -> AccessCodeResult<AccessCode> {
        if !AccessCode::is_valid_format(code) {
            return Err(AccessCodeError::InvalidFormat {
                code: code.to_string(),
            });
        }

        let record = AccessCode::new(code, self.clock.now());
        self.store.insert(&record).await.map_err(|e| {
            warn!(code = %mask_code(code), error = %e, "Failed to add access code");
            AccessCodeError::from(e)
        })?;

        info!(code = %mask_code(code), event = "code_added", "Access code added");
        Ok(record)
    }

    /// Remove a code
    pub async fn delete(&self, code: &str) -> AccessCodeResult<()> {
        self.store.delete(code).await?;
        info!(code = %mask_code(code), event = "code_deleted", "Access code deleted");
        Ok(())
    }

    /// Return a code to the fresh state
    pub async fn wipe(&self, code: &str) -> AccessCodeResult<()> {
        self.store.clear_used_at(code).await?;
        info!(code = %mask_code(code), event = "code_wiped", "Access code reset to fresh");
        Ok(())
    }

    /// Snapshot every code with its redemption status
    pub async fn list_with_status(&self, language: Language) -> AccessCodeResult<CodeListing> {
        let records = self.store.list().await?;
        Ok(CodeListing {
            records,
            now: self.clock.now(),
            window: self.policy.reuse_window,
            language,
        })
    }
}

/// Snapshot of the code table taken by `list_with_status`
///
/// Summaries are rendered lazily while iterating; iterate again to restart.
#[derive(Debug, Clone)]
pub struct CodeListing {
    records: Vec<AccessCode>,
    now: DateTime<Utc>,
    window: Duration,
    language: Language,
}

impl CodeListing {
    pub fn iter(&self) -> CodeSummaries<'_> {
        CodeSummaries {
            records: self.records.iter(),
            listing: self,
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn summarize(&self, record: &AccessCode) -> CodeSummary {
        let status = match record.state_at(self.now, self.window) {
            CodeState::Fresh | CodeState::Active => CodeStatus::Available,
            CodeState::Expired => CodeStatus::Expired,
        };
        CodeSummary {
            code: record.code.clone(),
            status,
            elapsed: record
                .elapsed_since_use(self.now)
                .map(|elapsed| humanize_elapsed(elapsed, self.language)),
        }
    }
}

impl<'a> IntoIterator for &'a CodeListing {
    type Item = CodeSummary;
    type IntoIter = CodeSummaries<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Lazy iterator over a [`CodeListing`]
pub struct CodeSummaries<'a> {
    records: std::slice::Iter<'a, AccessCode>,
    listing: &'a CodeListing,
}

impl Iterator for CodeSummaries<'_> {
    type Item = CodeSummary;

    fn next(&mut self) -> Option<Self::Item> {
        self.records.next().map(|record| self.listing.summarize(record))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.records.size_hint()
    }
}

impl ExactSizeIterator for CodeSummaries<'_> {}
