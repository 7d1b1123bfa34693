use super::{
    DatabaseConnectionProvider, DatabaseError, ReadConnectionProvider, WriteConnectionProvider,
};

use tokio::sync::OwnedMutexGuard;

/// A type that represents a mutable database transaction.
///
/// This type is used to perform atomic read and write operations on the database. The transaction
/// holds the database write lock until it is committed, rolled back or dropped. Dropping the
/// transaction without committing rolls it back.
#[derive(Debug)]
pub struct TXMut {
    /// The underlying database transaction.
    tx: sea_orm::DatabaseTransaction,
    /// A guard for the database write lock.
    _guard: OwnedMutexGuard<()>,
}

impl TXMut {
    /// Creates a new [`TXMut`] instance associated with the provided
    /// [`sea_orm::DatabaseTransaction`] and mutex guard.
    pub const fn new(tx: sea_orm::DatabaseTransaction, guard: OwnedMutexGuard<()>) -> Self {
        Self { tx, _guard: guard }
    }

    /// Commits the transaction.
    pub async fn commit(self) -> Result<(), DatabaseError> {
        tracing::trace!(target: "scroll::db", "Committing transaction");
        self.tx.commit().await?;
        Ok(())
    }

    /// Rolls back the transaction.
    pub async fn rollback(self) -> Result<(), DatabaseError> {
        tracing::trace!(target: "scroll::db", "Rolling back transaction");
        self.tx.rollback().await?;
        Ok(())
    }
}

impl DatabaseConnectionProvider for TXMut {
    type Connection = sea_orm::DatabaseTransaction;

    fn get_connection(&self) -> &Self::Connection {
        &self.tx
    }
}

impl ReadConnectionProvider for TXMut {}
impl WriteConnectionProvider for TXMut {}
