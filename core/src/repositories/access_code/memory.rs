//! In-process implementation of `CodeStore`
//!
//! A single table-level lock serializes transactions, which gives the
//! same claim-or-check guarantees as row locking in a SQL store. Used for
//! development and by the service tests.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::{Mutex, OwnedMutexGuard};

use crate::domain::entities::access_code::AccessCode;
use crate::errors::{StoreError, StoreResult};

use super::r#trait::{CodeStore, CodeTransaction};

type Table = BTreeMap<String, AccessCode>;

/// In-memory access code table
pub struct InMemoryCodeStore {
    rows: Arc<Mutex<Table>>,
    unavailable: AtomicBool,
}

impl InMemoryCodeStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self {
            rows: Arc::new(Mutex::new(BTreeMap::new())),
            unavailable: AtomicBool::new(false),
        }
    }

    /// Simulate an outage: every call fails with `StoreError::Unavailable` while set
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Number of rows currently stored
    pub async fn len(&self) -> usize {
        self.rows.lock().await.len()
    }

    /// Check if the store holds no rows
    pub async fn is_empty(&self) -> bool {
        self.rows.lock().await.is_empty()
    }

    fn check_available(&self) -> StoreResult<()> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(StoreError::unavailable("in-memory store marked unavailable"));
        }
        Ok(())
    }
}

impl Default for InMemoryCodeStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CodeStore for InMemoryCodeStore {
    type Tx = InMemoryTransaction;

    async fn ensure_schema(&self) -> StoreResult<()> {
        self.check_available()
    }

    async fn begin(&self) -> StoreResult<Self::Tx> {
        self.check_available()?;
        let guard = Arc::clone(&self.rows).lock_owned().await;
        Ok(InMemoryTransaction {
            guard,
            staged: BTreeMap::new(),
        })
    }

    async fn find(&self, code: &str) -> StoreResult<Option<AccessCode>> {
        self.check_available()?;
        Ok(self.rows.lock().await.get(code).cloned())
    }

    async fn insert(&self, record: &AccessCode) -> StoreResult<()> {
        self.check_available()?;
        let mut rows = self.rows.lock().await;
        if rows.contains_key(&record.code) {
            return Err(StoreError::AlreadyExists {
                code: record.code.clone(),
            });
        }
        rows.insert(record.code.clone(), record.clone());
        Ok(())
    }

    async fn delete(&self, code: &str) -> StoreResult<()> {
        self.check_available()?;
        match self.rows.lock().await.remove(code) {
            Some(_) => Ok(()),
            None => Err(StoreError::NotFound {
                code: code.to_string(),
            }),
        }
    }

    async fn clear_used_at(&self, code: &str) -> StoreResult<()> {
        self.check_available()?;
        match self.rows.lock().await.get_mut(code) {
            Some(row) => {
                row.wipe();
                Ok(())
            }
            None => Err(StoreError::NotFound {
                code: code.to_string(),
            }),
        }
    }

    async fn list(&self) -> StoreResult<Vec<AccessCode>> {
        self.check_available()?;
        Ok(self.rows.lock().await.values().cloned().collect())
    }

    async fn delete_created_before(&self, cutoff: DateTime<Utc>) -> StoreResult<u64> {
        self.check_available()?;
        let mut rows = self.rows.lock().await;
        let before = rows.len();
        rows.retain(|_, row| row.created_at >= cutoff);
        Ok((before - rows.len()) as u64)
    }
}

/// Transaction over [`InMemoryCodeStore`]; holds the table lock until dropped
pub struct InMemoryTransaction {
    guard: OwnedMutexGuard<Table>,
    staged: BTreeMap<String, DateTime<Utc>>,
}

#[async_trait]
impl CodeTransaction for InMemoryTransaction {
    async fn fetch_for_update(&mut self, code: &str) -> StoreResult<Option<AccessCode>> {
        let staged = self.staged.get(code).copied();
        Ok(self.guard.get(code).map(|row| {
            let mut row = row.clone();
            if let Some(at) = staged {
                row.used_at = Some(at);
            }
            row
        }))
    }

    async fn mark_used(&mut self, code: &str, at: DateTime<Utc>) -> StoreResult<()> {
        if !self.guard.contains_key(code) {
            return Err(StoreError::NotFound {
                code: code.to_string(),
            });
        }
        self.staged.insert(code.to_string(), at);
        Ok(())
    }

    async fn commit(mut self) -> StoreResult<()> {
        let staged = std::mem::take(&mut self.staged);
        for (code, at) in staged {
            if let Some(row) = self.guard.get_mut(&code) {
                row.used_at = Some(at);
            }
        }
        Ok(())
    }

    async fn rollback(self) -> StoreResult<()> {
        Ok(())
    }
}
