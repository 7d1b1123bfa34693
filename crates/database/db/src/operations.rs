use super::{models, DatabaseError, ReadConnectionProvider, WriteConnectionProvider};

use alloy_primitives::B256;
use rollup_node_primitives::{BatchCommitRecord, ChunkInfo, L2Block};
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect,
};

/// The [`DatabaseReadOperations`] trait provides read-only methods for interacting with the
/// database.
#[async_trait::async_trait]
pub trait DatabaseReadOperations: ReadConnectionProvider + Sync {
    /// Get the latest [`BatchCommitRecord`] from the database, i.e. the one with the highest index.
    async fn get_latest_batch(&self) -> Result<Option<BatchCommitRecord>, DatabaseError> {
        Ok(models::batch::Entity::find()
            .order_by_desc(models::batch::Column::Index)
            .one(self.get_connection())
            .await
            .map(|x| x.map(Into::into))?)
    }

    /// Get a [`BatchCommitRecord`] from the database by its batch index.
    async fn get_batch_by_index(
        &self,
        batch_index: u64,
    ) -> Result<Option<BatchCommitRecord>, DatabaseError> {
        Ok(models::batch::Entity::find_by_id(batch_index as i64)
            .one(self.get_connection())
            .await
            .map(|x| x.map(Into::into))?)
    }

    /// Returns the index of the first chunk which is not part of a batch.
    ///
    /// This is the chunk following the end chunk of the latest batch, or 0 if no batch is stored.
    async fn get_first_unbatched_chunk_index(&self) -> Result<u64, DatabaseError> {
        let latest_batch = self.get_latest_batch().await?;
        Ok(latest_batch.map(|batch| batch.end_chunk_index + 1).unwrap_or_default())
    }

    /// Get at most `limit` chunks with an index greater than or equal to `index`, ordered by
    /// index.
    async fn get_chunks_ge_index(
        &self,
        index: u64,
        limit: u64,
    ) -> Result<Vec<ChunkInfo>, DatabaseError> {
        Ok(models::chunk::Entity::find()
            .filter(models::chunk::Column::Index.gte(index as i64))
            .order_by_asc(models::chunk::Column::Index)
            .limit(limit)
            .all(self.get_connection())
            .await
            .map(|x| x.into_iter().map(Into::into).collect())?)
    }

    /// Get the chunks assigned to the batch with the provided hash, ordered by index.
    async fn get_chunks_by_batch_hash(
        &self,
        batch_hash: B256,
    ) -> Result<Vec<ChunkInfo>, DatabaseError> {
        Ok(models::chunk::Entity::find()
            .filter(models::chunk::Column::BatchHash.eq(batch_hash.to_vec()))
            .order_by_asc(models::chunk::Column::Index)
            .all(self.get_connection())
            .await
            .map(|x| x.into_iter().map(Into::into).collect())?)
    }

    /// Get the L2 blocks in the inclusive range `[start, end]`, ordered by number.
    ///
    /// Errors with [`DatabaseError::MissingBlocks`] if any block of the range is absent.
    async fn get_l2_blocks_in_range(
        &self,
        start: u64,
        end: u64,
    ) -> Result<Vec<L2Block>, DatabaseError> {
        let blocks = models::l2_block::Entity::find()
            .filter(models::l2_block::Column::BlockNumber.between(start as i64, end as i64))
            .order_by_asc(models::l2_block::Column::BlockNumber)
            .all(self.get_connection())
            .await?;

        let expected = (end + 1).saturating_sub(start);
        if blocks.len() as u64 != expected {
            tracing::error!(target: "scroll::db", start, end, expected, found = blocks.len(), "Missing L2 blocks in range.");
            return Err(DatabaseError::MissingBlocks {
                start,
                end,
                expected,
                found: blocks.len() as u64,
            })
        }

        blocks.into_iter().map(TryInto::try_into).collect()
    }
}

impl<T> DatabaseReadOperations for T where T: ReadConnectionProvider + Sync + ?Sized {}

/// The [`DatabaseWriteOperations`] trait provides write methods for interacting with the database.
///
/// Operations which must be applied atomically should be performed on a [`crate::TXMut`].
#[async_trait::async_trait]
pub trait DatabaseWriteOperations: WriteConnectionProvider + Sync {
    /// Insert a [`L2Block`] into the database.
    async fn insert_l2_block(&self, block: L2Block) -> Result<(), DatabaseError> {
        tracing::trace!(target: "scroll::db", block_number = block.number(), block_hash = ?block.hash, "Inserting L2 block into database.");
        let block: models::l2_block::ActiveModel = block.into();
        block.insert(self.get_connection()).await?;
        Ok(())
    }

    /// Insert a [`ChunkInfo`] into the database.
    async fn insert_chunk(&self, chunk: ChunkInfo) -> Result<(), DatabaseError> {
        tracing::trace!(target: "scroll::db", chunk_index = chunk.index, start_block = chunk.start_block_number, end_block = chunk.end_block_number, "Inserting chunk into database.");
        let chunk: models::chunk::ActiveModel = chunk.into();
        chunk.insert(self.get_connection()).await?;
        Ok(())
    }

    /// Insert a [`BatchCommitRecord`] into the database.
    async fn insert_batch(&self, batch: BatchCommitRecord) -> Result<(), DatabaseError> {
        tracing::trace!(target: "scroll::db", batch_hash = ?batch.hash, batch_index = batch.index, "Inserting batch into database.");
        let batch: models::batch::ActiveModel = batch.into();
        batch.insert(self.get_connection()).await?;
        Ok(())
    }

    /// Assigns the unbatched chunks in the inclusive index range `[start, end]` to the batch with
    /// the provided hash.
    ///
    /// Errors with [`DatabaseError::ChunkRangeMismatch`] if a chunk of the range is missing or
    /// already batched. The rows updated before the error are only discarded when the caller rolls
    /// back the enclosing transaction.
    async fn update_chunks_batch_hash_in_range(
        &self,
        start: u64,
        end: u64,
        batch_hash: B256,
    ) -> Result<(), DatabaseError> {
        tracing::trace!(target: "scroll::db", start, end, ?batch_hash, "Assigning chunks to batch.");
        let updated = models::chunk::Entity::update_many()
            .col_expr(models::chunk::Column::BatchHash, Expr::value(batch_hash.to_vec()))
            .filter(models::chunk::Column::Index.between(start as i64, end as i64))
            .filter(models::chunk::Column::BatchHash.is_null())
            .exec(self.get_connection())
            .await?
            .rows_affected;

        let expected = (end + 1).saturating_sub(start);
        if updated != expected {
            tracing::error!(target: "scroll::db", start, end, ?batch_hash, expected, updated, "Unexpected count of chunks assigned to batch.");
            return Err(DatabaseError::ChunkRangeMismatch {
                start,
                end,
                batch_hash,
                expected,
                updated,
            })
        }

        Ok(())
    }
}

impl<T> DatabaseWriteOperations for T where T: WriteConnectionProvider + Sync + ?Sized {}
