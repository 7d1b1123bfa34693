use super::{
    metrics::DatabaseMetrics, transaction::TXMut, DatabaseConnectionProvider, DatabaseError,
    ReadConnectionProvider, WriteConnectionProvider,
};

use sea_orm::{Database as SeaOrmDatabase, DatabaseConnection, TransactionTrait};
use std::{sync::Arc, time::Instant};
use tokio::sync::Mutex;

/// The [`Database`] struct is responsible for interacting with the database.
///
/// The [`Database`] type wraps a [`sea_orm::DatabaseConnection`]. We implement
/// [`DatabaseConnectionProvider`] for [`Database`] such that it can be used to perform the
/// operations defined in [`crate::DatabaseReadOperations`] and [`crate::DatabaseWriteOperations`].
/// Atomic operations can be performed using the [`Database::tx_mut`] method which returns a
/// [`TXMut`] that also implements the [`DatabaseConnectionProvider`] trait. At most one
/// [`TXMut`] is alive at any time.
#[derive(Debug, Clone)]
pub struct Database {
    /// The underlying database connection.
    connection: DatabaseConnection,
    /// The lock serializing the write transactions.
    write_lock: Arc<Mutex<()>>,
    /// The database metrics.
    metrics: DatabaseMetrics,
}

impl Database {
    /// Creates a new [`Database`] instance associated with the provided database URL.
    pub async fn new(database_url: &str) -> Result<Self, DatabaseError> {
        let connection = SeaOrmDatabase::connect(database_url).await?;
        Ok(connection.into())
    }

    /// Creates a new [`TXMut`] which can be used for atomic read and write operations.
    ///
    /// Waits for the previous write transaction to be committed, rolled back or dropped.
    pub async fn tx_mut(&self) -> Result<TXMut, DatabaseError> {
        let started = Instant::now();
        let guard = self.write_lock.clone().lock_owned().await;
        self.metrics.write_lock_acquire_duration.record(started.elapsed().as_secs_f64() * 1000.0);

        let tx = self.connection.begin().await?;
        Ok(TXMut::new(tx, guard))
    }
}

impl DatabaseConnectionProvider for Database {
    type Connection = DatabaseConnection;

    fn get_connection(&self) -> &Self::Connection {
        &self.connection
    }
}

impl ReadConnectionProvider for Database {}
impl WriteConnectionProvider for Database {}

impl From<DatabaseConnection> for Database {
    fn from(connection: DatabaseConnection) -> Self {
        Self {
            connection,
            write_lock: Arc::new(Mutex::new(())),
            metrics: DatabaseMetrics::default(),
        }
    }
}

#[cfg(test)]
mod test {
    use crate::{
        test_utils::setup_test_db, DatabaseError, DatabaseReadOperations, DatabaseWriteOperations,
    };

    use alloy_primitives::{Bytes, B256, U256};
    use rollup_node_primitives::{BatchCommitRecord, BlockContext, ChunkInfo, L2Block};

    fn block(number: u64, transactions: Vec<Bytes>) -> L2Block {
        let context = BlockContext {
            number,
            timestamp: 1_000 + number,
            base_fee: U256::from(7),
            gas_limit: 10_000_000,
            num_transactions: transactions.len() as u16 + 1,
            num_l1_messages: 1,
        };
        L2Block::new(B256::repeat_byte(number as u8), transactions, context)
    }

    fn batch(index: u64, start_chunk_index: u64, end_chunk_index: u64) -> BatchCommitRecord {
        BatchCommitRecord {
            index,
            hash: B256::repeat_byte(0xb0 + index as u8),
            start_chunk_index,
            end_chunk_index,
            codec_version: 0,
            header: Bytes::from(vec![0u8; 89]),
        }
    }

    #[tokio::test]
    async fn test_database_round_trip_l2_blocks() {
        // Set up the test database.
        let db = setup_test_db().await;

        // Insert the blocks.
        let blocks = (1..=3)
            .map(|n| block(n, vec![Bytes::from(vec![n as u8; 10 * n as usize])]))
            .collect::<Vec<_>>();
        for b in &blocks {
            db.insert_l2_block(b.clone()).await.unwrap();
        }

        // Round trip the blocks through the database.
        let blocks_from_db = db.get_l2_blocks_in_range(1, 3).await.unwrap();
        assert_eq!(blocks, blocks_from_db);
        let blocks_from_db = db.get_l2_blocks_in_range(2, 2).await.unwrap();
        assert_eq!(&blocks[1..2], blocks_from_db.as_slice());
    }

    #[tokio::test]
    async fn test_database_missing_l2_blocks() {
        // Set up the test database.
        let db = setup_test_db().await;
        db.insert_l2_block(block(1, vec![])).await.unwrap();
        db.insert_l2_block(block(3, vec![])).await.unwrap();

        let res = db.get_l2_blocks_in_range(1, 3).await;
        assert!(matches!(
            res,
            Err(DatabaseError::MissingBlocks { start: 1, end: 3, expected: 3, found: 2 })
        ));
    }

    #[tokio::test]
    async fn test_database_chunks() {
        // Set up the test database.
        let db = setup_test_db().await;
        assert_eq!(db.get_first_unbatched_chunk_index().await.unwrap(), 0);
        assert!(db.get_latest_batch().await.unwrap().is_none());

        // Insert the chunks.
        for index in 0..5 {
            db.insert_chunk(ChunkInfo::new(index, index + 1, index + 1, 1_000 + index))
                .await
                .unwrap();
        }

        // Fetch them by index.
        let chunks = db.get_chunks_ge_index(2, 10).await.unwrap();
        assert_eq!(chunks.iter().map(|c| c.index).collect::<Vec<_>>(), vec![2, 3, 4]);
        assert!(chunks.iter().all(|c| !c.is_batched()));

        let chunks = db.get_chunks_ge_index(0, 2).await.unwrap();
        assert_eq!(chunks.iter().map(|c| c.index).collect::<Vec<_>>(), vec![0, 1]);
    }

    #[tokio::test]
    async fn test_database_tx_commit_batch() -> eyre::Result<()> {
        // Set up the test database.
        let db = setup_test_db().await;
        for index in 0..5 {
            db.insert_chunk(ChunkInfo::new(index, index, index, 0)).await?;
        }

        // Insert the batch and assign its chunks in a transaction.
        let batch = batch(1, 1, 3);
        let tx = db.tx_mut().await?;
        tx.insert_batch(batch.clone()).await?;
        tx.update_chunks_batch_hash_in_range(1, 3, batch.hash).await?;
        tx.commit().await?;

        // Check the state of the database.
        assert_eq!(db.get_latest_batch().await?, Some(batch.clone()));
        assert_eq!(db.get_batch_by_index(1).await?, Some(batch.clone()));
        assert_eq!(db.get_first_unbatched_chunk_index().await?, 4);

        let chunks = db.get_chunks_by_batch_hash(batch.hash).await?;
        assert_eq!(chunks.iter().map(|c| c.index).collect::<Vec<_>>(), vec![1, 2, 3]);
        let chunks = db.get_chunks_ge_index(0, 10).await?;
        assert!(!chunks[0].is_batched());
        assert!(!chunks[4].is_batched());

        Ok(())
    }

    #[tokio::test]
    async fn test_database_tx_rollback_on_chunk_range_mismatch() -> eyre::Result<()> {
        // Set up the test database.
        let db = setup_test_db().await;
        for index in 0..2 {
            db.insert_chunk(ChunkInfo::new(index, index, index, 0)).await?;
        }

        // The range covers a chunk which does not exist.
        let batch = batch(1, 0, 2);
        let tx = db.tx_mut().await?;
        tx.insert_batch(batch.clone()).await?;
        let res = tx.update_chunks_batch_hash_in_range(0, 2, batch.hash).await;
        assert!(matches!(
            res,
            Err(DatabaseError::ChunkRangeMismatch { expected: 3, updated: 2, .. })
        ));
        tx.rollback().await?;

        // Nothing was persisted.
        assert!(db.get_latest_batch().await?.is_none());
        assert!(db.get_chunks_by_batch_hash(batch.hash).await?.is_empty());
        assert_eq!(db.get_first_unbatched_chunk_index().await?, 0);

        Ok(())
    }

    #[tokio::test]
    async fn test_database_rejects_rebatching_chunks() -> eyre::Result<()> {
        // Set up the test database.
        let db = setup_test_db().await;
        for index in 0..3 {
            db.insert_chunk(ChunkInfo::new(index, index, index, 0)).await?;
        }
        db.update_chunks_batch_hash_in_range(0, 1, B256::repeat_byte(1)).await?;

        let res = db.update_chunks_batch_hash_in_range(1, 2, B256::repeat_byte(2)).await;
        assert!(matches!(
            res,
            Err(DatabaseError::ChunkRangeMismatch { expected: 2, updated: 1, .. })
        ));

        Ok(())
    }
}
