use crate::error::BatchProposerError;

use alloy_primitives::B256;
use rollup_node_primitives::{Batch, BatchCommitRecord, Chunk, ChunkInfo, L2Block};
use scroll_codec::Codec;
use scroll_db::{Database, DatabaseError, DatabaseWriteOperations, TXMut};

/// Inserts the genesis block, chunk and batch.
///
/// The batch proposer requires a parent batch: the genesis batch (index 0) holds a single chunk
/// (index 0) made of the genesis block, and is encoded with the V0 codec with a zero parent hash.
pub async fn insert_genesis_batch(
    database: &Database,
    genesis: L2Block,
) -> Result<BatchCommitRecord, BatchProposerError> {
    let mut batch = Batch::new(0, 0, B256::ZERO);
    batch.chunks.push(Chunk::new(vec![genesis.clone()]));

    let header = Codec::V0.new_batch_header(&batch)?;
    let record = BatchCommitRecord {
        index: 0,
        hash: header.hash_slow(),
        start_chunk_index: 0,
        end_chunk_index: 0,
        codec_version: header.version(),
        header: header.encode(),
    };
    let mut chunk = ChunkInfo::new(0, genesis.number(), genesis.number(), genesis.timestamp());
    chunk.batch_hash = Some(record.hash);

    let tx = database.tx_mut().await.map_err(BatchProposerError::Persistence)?;
    if let Err(err) = write_genesis(&tx, genesis, chunk, &record).await {
        tx.rollback().await.map_err(BatchProposerError::Persistence)?;
        return Err(BatchProposerError::Persistence(err))
    }
    tx.commit().await.map_err(BatchProposerError::Persistence)?;

    tracing::info!(target: "scroll::batch_proposer", batch_hash = ?record.hash, "Inserted genesis batch.");
    Ok(record)
}

async fn write_genesis(
    tx: &TXMut,
    genesis: L2Block,
    chunk: ChunkInfo,
    record: &BatchCommitRecord,
) -> Result<(), DatabaseError> {
    tx.insert_l2_block(genesis).await?;
    tx.insert_chunk(chunk).await?;
    tx.insert_batch(record.clone()).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use scroll_codec::BatchHeaderPrefix;
    use scroll_db::{test_utils::setup_test_db, DatabaseReadOperations};

    #[tokio::test]
    async fn test_insert_genesis_batch() -> eyre::Result<()> {
        let db = setup_test_db().await;
        let record = insert_genesis_batch(&db, L2Block::default()).await?;

        assert_eq!(db.get_latest_batch().await?, Some(record.clone()));
        assert_eq!(db.get_first_unbatched_chunk_index().await?, 1);
        assert_eq!(db.get_chunks_by_batch_hash(record.hash).await?.len(), 1);
        assert_eq!(db.get_l2_blocks_in_range(0, 0).await?, vec![L2Block::default()]);

        let prefix = BatchHeaderPrefix::try_from_buf(&mut record.header.as_ref())?;
        assert_eq!(prefix.version, 0);
        assert_eq!(prefix.batch_index, 0);
        assert_eq!(prefix.total_l1_message_popped, 0);

        // the genesis batch can only be inserted once.
        let res = insert_genesis_batch(&db, L2Block::default()).await;
        assert!(matches!(res, Err(BatchProposerError::Persistence(_))));

        Ok(())
    }
}
