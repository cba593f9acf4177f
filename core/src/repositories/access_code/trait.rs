//! Store traits defining the interface for access code persistence.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::entities::access_code::AccessCode;
use crate::errors::StoreResult;

/// Durable table of access codes keyed by `code`
///
/// Every primitive is a single atomic store call. The read-then-write used by
/// validation goes through [`CodeStore::begin`] instead, so that two
/// concurrent claims on the same fresh code are serialized by the store.
///
/// Failures of the underlying storage must surface as
/// `StoreError::Unavailable`, never as an absent row.
#[async_trait]
pub trait CodeStore: Send + Sync {
    /// Transaction handle returned by [`CodeStore::begin`]
    type Tx: CodeTransaction;

    /// Create the table if it does not exist yet
    async fn ensure_schema(&self) -> StoreResult<()>;

    /// Open a transaction for a claim-or-check sequence
    async fn begin(&self) -> StoreResult<Self::Tx>;

    /// Point lookup
    async fn find(&self, code: &str) -> StoreResult<Option<AccessCode>>;

    /// Insert a new row
    ///
    /// # Returns
    /// * `Err(StoreError::AlreadyExists)` - A row with this code is present; it is left untouched
    async fn insert(&self, record: &AccessCode) -> StoreResult<()>;

    /// Delete a row
    ///
    /// # Returns
    /// * `Err(StoreError::NotFound)` - No row with this code
    async fn delete(&self, code: &str) -> StoreResult<()>;

    /// Set `used_at` back to null
    ///
    /// # Returns
    /// * `Err(StoreError::NotFound)` - No row with this code
    async fn clear_used_at(&self, code: &str) -> StoreResult<()>;

    /// Full scan, ordered by code
    async fn list(&self) -> StoreResult<Vec<AccessCode>>;

    /// Delete every row created strictly before `cutoff`
    ///
    /// # Returns
    /// * `Ok(u64)` - Number of rows deleted
    async fn delete_created_before(&self, cutoff: DateTime<Utc>) -> StoreResult<u64>;
}

/// An open store transaction holding the lock on the rows it has read
///
/// Dropping the handle without calling [`CodeTransaction::commit`] discards
/// every write made through it.
#[async_trait]
pub trait CodeTransaction: Send {
    /// Read a row and lock it against concurrent transactions until commit or rollback
    async fn fetch_for_update(&mut self, code: &str) -> StoreResult<Option<AccessCode>>;

    /// Record the first redemption instant
    async fn mark_used(&mut self, code: &str, at: DateTime<Utc>) -> StoreResult<()>;

    /// Make all writes durable and release locks
    async fn commit(self) -> StoreResult<()>;

    /// Discard all writes and release locks
    async fn rollback(self) -> StoreResult<()>;
}
