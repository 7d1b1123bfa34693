use crate::{assembler::ProposedBatch, error::BatchProposerError};

use rollup_node_primitives::BatchCommitRecord;
use scroll_db::{Database, DatabaseError, DatabaseWriteOperations, TXMut};

/// Persists the proposed batch and assigns its chunks to it, in a single transaction.
///
/// The batch header is built with the codec selected for the batch. If either write fails, the
/// transaction is rolled back and the chunks stay unbatched.
pub async fn commit_batch(
    database: &Database,
    proposed: &ProposedBatch,
) -> Result<BatchCommitRecord, BatchProposerError> {
    let header = proposed.codec.new_batch_header(&proposed.batch)?;
    let record = BatchCommitRecord {
        index: proposed.batch.index,
        hash: header.hash_slow(),
        start_chunk_index: proposed.start_chunk_index,
        end_chunk_index: proposed.end_chunk_index,
        codec_version: header.version(),
        header: header.encode(),
    };

    let tx = database.tx_mut().await.map_err(BatchProposerError::Persistence)?;
    match write_batch(&tx, &record).await {
        Ok(()) => tx.commit().await.map_err(BatchProposerError::Persistence)?,
        Err(err) => {
            tracing::warn!(
                target: "scroll::batch_proposer",
                batch_index = record.index,
                batch_hash = ?record.hash,
                start_chunk_index = record.start_chunk_index,
                end_chunk_index = record.end_chunk_index,
                %err,
                "Failed to persist batch, rolling back."
            );
            tx.rollback().await.map_err(BatchProposerError::Persistence)?;
            return Err(BatchProposerError::Persistence(err))
        }
    }

    tracing::info!(
        target: "scroll::batch_proposer",
        batch_index = record.index,
        batch_hash = ?record.hash,
        start_chunk_index = record.start_chunk_index,
        end_chunk_index = record.end_chunk_index,
        codec_version = record.codec_version,
        "Committed batch."
    );

    Ok(record)
}

/// Inserts the batch record and points its chunks to it.
async fn write_batch(tx: &TXMut, record: &BatchCommitRecord) -> Result<(), DatabaseError> {
    tx.insert_batch(record.clone()).await?;
    tx.update_chunks_batch_hash_in_range(
        record.start_chunk_index,
        record.end_chunk_index,
        record.hash,
    )
    .await
}
