//! MySQL implementation of the CodeStore trait.
//!
//! Rows live in the `access_codes` table. A validation transaction locks its
//! row with `SELECT ... FOR UPDATE`, so concurrent validations of one code
//! queue behind each other until the holder commits or rolls back.

use async_trait::async_trait;
use chrono::{DateTime, SubsecRound, Utc};
use sqlx::mysql::MySqlRow;
use sqlx::{MySql, MySqlPool, Row, Transaction};
use tracing::debug;

use mg_core::domain::entities::access_code::AccessCode;
use mg_core::errors::{StoreError, StoreResult};
use mg_core::repositories::access_code::{CodeStore, CodeTransaction};

const CREATE_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS access_codes (
        code CHAR(6) NOT NULL PRIMARY KEY,
        created_at DATETIME(6) NOT NULL,
        used_at DATETIME(6) NULL,
        INDEX idx_access_codes_created_at (created_at)
    ) ENGINE=InnoDB
"#;

/// MySQL implementation of CodeStore
pub struct MySqlCodeStore {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlCodeStore {
    /// Create a new MySQL code store
    ///
    /// # Arguments
    /// * `pool` - MySQL connection pool from SQLx
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Convert database row to AccessCode entity
    fn row_to_code(row: &MySqlRow) -> StoreResult<AccessCode> {
        Ok(AccessCode {
            code: row.try_get("code").map_err(unavailable)?,
            created_at: row.try_get::<DateTime<Utc>, _>("created_at").map_err(unavailable)?,
            used_at: row.try_get::<Option<DateTime<Utc>>, _>("used_at").map_err(unavailable)?,
        })
    }
}

/// Every SQL failure means the store cannot answer
fn unavailable(e: sqlx::Error) -> StoreError {
    StoreError::unavailable(e)
}

/// Columns are DATETIME(6); truncate so MySQL never rounds a timestamp upward
///
/// A stored `used_at` can be up to 1µs earlier than the clock reading, so the
/// reuse window measured against MySQL may close that much sooner.
fn to_column(at: DateTime<Utc>) -> DateTime<Utc> {
    at.trunc_subsecs(6)
}

#[async_trait]
impl CodeStore for MySqlCodeStore {
    type Tx = MySqlCodeTransaction;

    async fn ensure_schema(&self) -> StoreResult<()> {
        sqlx::query(CREATE_TABLE)
            .execute(&self.pool)
            .await
            .map_err(unavailable)?;
        debug!("access_codes table ready");
        Ok(())
    }

    async fn begin(&self) -> StoreResult<Self::Tx> {
        let tx = self.pool.begin().await.map_err(unavailable)?;
        Ok(MySqlCodeTransaction { tx })
    }

    async fn find(&self, code: &str) -> StoreResult<Option<AccessCode>> {
        let row = sqlx::query("SELECT code, created_at, used_at FROM access_codes WHERE code = ?")
            .bind(code)
            .fetch_optional(&self.pool)
            .await
            .map_err(unavailable)?;

        row.as_ref().map(Self::row_to_code).transpose()
    }

    async fn insert(&self, record: &AccessCode) -> StoreResult<()> {
        let result = sqlx::query(
            "INSERT IGNORE INTO access_codes (code, created_at, used_at) VALUES (?, ?, ?)",
        )
        .bind(&record.code)
        .bind(to_column(record.created_at))
        .bind(record.used_at.map(to_column))
        .execute(&self.pool)
        .await
        .map_err(unavailable)?;

        if result.rows_affected() == 0 {
            return Err(StoreError::AlreadyExists {
                code: record.code.clone(),
            });
        }
        Ok(())
    }

    async fn delete(&self, code: &str) -> StoreResult<()> {
        let result = sqlx::query("DELETE FROM access_codes WHERE code = ?")
            .bind(code)
            .execute(&self.pool)
            .await
            .map_err(unavailable)?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound {
                code: code.to_string(),
            });
        }
        Ok(())
    }

    async fn clear_used_at(&self, code: &str) -> StoreResult<()> {
        let result = sqlx::query("UPDATE access_codes SET used_at = NULL WHERE code = ?")
            .bind(code)
            .execute(&self.pool)
            .await
            .map_err(unavailable)?;

        // MySQL reports changed rows, so an already-fresh code also yields zero.
        if result.rows_affected() == 0 && self.find(code).await?.is_none() {
            return Err(StoreError::NotFound {
                code: code.to_string(),
            });
        }
        Ok(())
    }

    async fn list(&self) -> StoreResult<Vec<AccessCode>> {
        let rows = sqlx::query("SELECT code, created_at, used_at FROM access_codes ORDER BY code")
            .fetch_all(&self.pool)
            .await
            .map_err(unavailable)?;

        rows.iter().map(Self::row_to_code).collect()
    }

    async fn delete_created_before(&self, cutoff: DateTime<Utc>) -> StoreResult<u64> {
        let result = sqlx::query("DELETE FROM access_codes WHERE created_at < ?")
            .bind(to_column(cutoff))
            .execute(&self.pool)
            .await
            .map_err(unavailable)?;

        Ok(result.rows_affected())
    }
}

/// Transaction over [`MySqlCodeStore`]; dropping it without commit rolls back
pub struct MySqlCodeTransaction {
    tx: Transaction<'static, MySql>,
}

#[async_trait]
impl CodeTransaction for MySqlCodeTransaction {
    async fn fetch_for_update(&mut self, code: &str) -> StoreResult<Option<AccessCode>> {
        let row = sqlx::query(
            "SELECT code, created_at, used_at FROM access_codes WHERE code = ? FOR UPDATE",
        )
        .bind(code)
        .fetch_optional(&mut *self.tx)
        .await
        .map_err(unavailable)?;

        row.as_ref().map(MySqlCodeStore::row_to_code).transpose()
    }

    async fn mark_used(&mut self, code: &str, at: DateTime<Utc>) -> StoreResult<()> {
        let result = sqlx::query("UPDATE access_codes SET used_at = ? WHERE code = ?")
            .bind(to_column(at))
            .bind(code)
            .execute(&mut *self.tx)
            .await
            .map_err(unavailable)?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound {
                code: code.to_string(),
            });
        }
        Ok(())
    }

    async fn commit(self) -> StoreResult<()> {
        self.tx.commit().await.map_err(unavailable)
    }

    async fn rollback(self) -> StoreResult<()> {
        self.tx.rollback().await.map_err(unavailable)
    }
}
