//! Explicit transaction scope for service operations.

use tokio::sync::MutexGuard;

use crate::error::DatabaseError;

/// One libSQL transaction, holding the [`crate::PositDb`] gate until it ends.
///
/// Repository methods are defined on this type (see [`crate::repos`]), so every
/// query a service operation issues runs inside the same transaction. Call
/// [`UnitOfWork::finish`] (or `commit`/`rollback`) to end it. Dropping it
/// without either lets libSQL roll the transaction back.
pub struct UnitOfWork<'a> {
    // Field order matters: the transaction must end before the gate opens.
    tx: libsql::Transaction,
    _gate: MutexGuard<'a, ()>,
}

impl<'a> UnitOfWork<'a> {
    pub(crate) const fn new(tx: libsql::Transaction, gate: MutexGuard<'a, ()>) -> Self {
        Self { tx, _gate: gate }
    }

    /// The connection the transaction runs on.
    #[must_use]
    pub fn conn(&self) -> &libsql::Connection {
        &self.tx
    }

    /// Generate a prefixed ID via libSQL. Returns e.g., `"cnv-a3f8b2c1"`.
    ///
    /// Uses `randomblob(4)` in SQL to produce 8-char hex, then prepends the prefix.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails or returns no rows.
    pub async fn generate_id(&self, prefix: &str) -> Result<String, DatabaseError> {
        let mut rows = self
            .conn()
            .query(
                &format!("SELECT '{prefix}-' || lower(hex(randomblob(4)))"),
                (),
            )
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        Ok(row.get::<String>(0)?)
    }

    /// Commit every write made through this unit of work.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the commit fails.
    pub async fn commit(self) -> Result<(), DatabaseError> {
        self.tx.commit().await?;
        Ok(())
    }

    /// Discard every write made through this unit of work.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the rollback fails.
    pub async fn rollback(self) -> Result<(), DatabaseError> {
        self.tx.rollback().await?;
        Ok(())
    }

    /// Commit when `result` is `Ok`, roll back when it is `Err`, and hand
    /// `result` back.
    ///
    /// A failed rollback is logged and the original error returned.
    ///
    /// # Errors
    ///
    /// Returns the original error, or the commit failure converted into `E`.
    pub async fn finish<T, E>(self, result: Result<T, E>) -> Result<T, E>
    where
        E: From<DatabaseError>,
    {
        match result {
            Ok(value) => {
                self.commit().await?;
                Ok(value)
            }
            Err(error) => {
                if let Err(rollback) = self.rollback().await {
                    tracing::warn!(error = %rollback, "rollback failed");
                }
                Err(error)
            }
        }
    }
}
