//! # posit-db
//!
//! libSQL persistence gateway for POSIT'IF.
//!
//! Stores persons (clients and employees), mediums, the employee/medium
//! capability links, and conversations. Every read and write goes through a
//! [`UnitOfWork`], which wraps one `BEGIN IMMEDIATE` libSQL transaction.
//! Units of work are serialized, on one [`PositDb`] by an async gate and
//! across handles (or processes) sharing the file by SQLite's write lock, so a
//! service operation observes and commits a consistent view of the store.

pub mod error;
pub mod helpers;
mod migrations;
pub mod repos;
mod unit_of_work;

#[cfg(test)]
mod test_support;

pub use error::DatabaseError;
pub use repos::employees::Claim;
pub use repos::persons::LoginRecord;
pub use unit_of_work::UnitOfWork;

use std::time::Duration;

use libsql::{Builder, TransactionBehavior};
use tokio::sync::Mutex;

/// How long a connection waits on a lock held by another connection.
pub const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Central database handle for all POSIT'IF state.
///
/// Wraps a libSQL database and one connection. The connection is shared by
/// every unit of work, and the gate makes sure only one transaction is open on
/// it at a time.
pub struct PositDb {
    #[allow(dead_code)]
    db: libsql::Database,
    conn: libsql::Connection,
    gate: Mutex<()>,
}

impl PositDb {
    /// Open a local database at the given path. `":memory:"` opens a
    /// throwaway in-memory store.
    ///
    /// Runs migrations automatically on every open.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened or
    /// migrations fail.
    pub async fn open_local(path: &str) -> Result<Self, DatabaseError> {
        let db = Builder::new_local(path).build().await?;
        let conn = db.connect()?;

        // Enable foreign keys (must be per-connection in SQLite)
        conn.execute("PRAGMA foreign_keys = ON", ())
            .await
            .map_err(|e| DatabaseError::Migration(format!("PRAGMA foreign_keys: {e}")))?;

        // Other processes may hold the file; wait for their lock instead of
        // failing with SQLITE_BUSY.
        conn.busy_timeout(BUSY_TIMEOUT)
            .map_err(|e| DatabaseError::Migration(format!("busy_timeout: {e}")))?;

        let posit_db = Self {
            db,
            conn,
            gate: Mutex::new(()),
        };
        posit_db.run_migrations().await?;
        tracing::debug!(path, "database opened");
        Ok(posit_db)
    }

    /// Start a unit of work. Waits until any other open unit of work on this
    /// handle, or on another handle to the same file, has committed or rolled
    /// back.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the transaction cannot be started.
    pub async fn begin(&self) -> Result<UnitOfWork<'_>, DatabaseError> {
        let gate = self.gate.lock().await;
        // IMMEDIATE takes the write lock up front, so a read followed by a
        // conditional update cannot interleave with another process.
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .await?;
        Ok(UnitOfWork::new(tx, gate))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::test_db;

    #[tokio::test]
    async fn open_local_creates_schema() {
        let db = test_db().await;
        let uow = db.begin().await.unwrap();

        let tables = [
            "persons",
            "clients",
            "employees",
            "mediums",
            "employee_mediums",
            "conversations",
        ];
        for table in &tables {
            let mut rows = uow
                .conn()
                .query(
                    "SELECT name FROM sqlite_master WHERE type='table' AND name=?1",
                    [*table],
                )
                .await
                .unwrap();
            let row = rows.next().await.unwrap();
            assert!(row.is_some(), "table '{table}' should exist");
        }
        uow.rollback().await.unwrap();
    }

    #[tokio::test]
    async fn generate_id_correct_format() {
        let db = test_db().await;
        let uow = db.begin().await.unwrap();
        let id = uow.generate_id("cnv").await.unwrap();
        assert!(id.starts_with("cnv-"), "ID should start with 'cnv-': {id}");
        assert_eq!(id.len(), 12, "3 prefix + 1 dash + 8 hex: {id}");
        assert!(id[4..].chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[tokio::test]
    async fn migrations_are_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.db");
        let path = path.to_str().unwrap();

        drop(PositDb::open_local(path).await.unwrap());
        let reopened = PositDb::open_local(path).await;
        assert!(reopened.is_ok(), "second open should re-run migrations cleanly");
    }

    #[tokio::test]
    async fn busy_timeout_is_set() {
        let db = test_db().await;
        let uow = db.begin().await.unwrap();
        let mut rows = uow.conn().query("PRAGMA busy_timeout", ()).await.unwrap();
        let row = rows.next().await.unwrap().unwrap();
        assert_eq!(row.get::<i64>(0).unwrap(), 5000);
    }

    #[tokio::test]
    async fn foreign_keys_enforced() {
        let db = test_db().await;
        let uow = db.begin().await.unwrap();
        let result = uow
            .conn()
            .execute(
                "INSERT INTO employees (person_id, available) VALUES ('emp-nobody00', 1)",
                (),
            )
            .await;
        assert!(result.is_err(), "employee row without a person must be rejected");
    }
}
