//! Implements the V1 codec: the L2 transactions of the batch are committed in a blob.

use crate::{
    constants::{
        BLOB_FIELD_ELEMENT_BYTES, BLOB_FIELD_ELEMENT_USABLE_BYTES, MAX_NUM_CHUNKS_V1,
        VERSIONED_HASH_VERSION_KZG,
    },
    error::{CodecError, EncodingError},
    header::BatchHeaderV1,
    skipped_l1_message_bitmap,
    v0::{validate_chunk, BlockContextV0},
    BlobCostEstimator,
};
use rollup_node_primitives::{Batch, Chunk};

use alloy_primitives::{bytes::BufMut, keccak256, B256};

/// The size of the blob metadata: the chunk count followed by the size of each chunk.
const BLOB_METADATA_BYTES: u64 = 2 + 4 * MAX_NUM_CHUNKS_V1 as u64;

/// The V1 codec.
///
/// The block contexts are committed as calldata and the L2 transactions are posted in a blob,
/// which makes the blob size the limiting resource.
#[derive(Debug, Default, Clone, Copy)]
pub struct CodecV1;

impl CodecV1 {
    /// The version of the codec.
    pub const VERSION: u8 = 1;

    /// Returns the unpadded blob payload of the batch.
    pub fn blob_payload(batch: &Batch) -> Result<Vec<u8>, CodecError> {
        validate_batch(batch)?;

        let mut payload = Vec::with_capacity(unpadded_blob_size(batch) as usize);
        payload.put_u16(batch.chunks.len() as u16);
        for index in 0..MAX_NUM_CHUNKS_V1 {
            let size = batch.chunks.get(index).map(chunk_blob_data_size).unwrap_or_default();
            payload.put_u32(size as u32);
        }
        for tx in batch.chunks.iter().flat_map(|c| c.blocks.iter()).flat_map(|b| &b.transactions) {
            payload.put_slice(tx);
        }

        Ok(payload)
    }

    /// Computes the data hash of the batch. The V1 chunk hash only commits to the block contexts,
    /// the transactions being committed to by the blob.
    pub fn data_hash(batch: &Batch) -> B256 {
        let chunk_hashes: Vec<u8> = batch
            .chunks
            .iter()
            .flat_map(|chunk| {
                let contexts: Vec<u8> = chunk
                    .blocks
                    .iter()
                    .flat_map(|b| {
                        let context = BlockContextV0::from(&b.context).to_bytes();
                        context[..BlockContextV0::HASHED_BYTES_LENGTH].to_vec()
                    })
                    .collect();
                keccak256(contexts).0
            })
            .collect();
        keccak256(chunk_hashes)
    }

    /// Derives the versioned hash of the blob payload.
    ///
    /// The versioned hash is computed from the payload digest; the KZG commitment of the padded
    /// blob is produced by the commit sender.
    pub fn blob_versioned_hash(payload: &[u8]) -> B256 {
        let mut hash = keccak256(payload);
        hash.0[0] = VERSIONED_HASH_VERSION_KZG;
        hash
    }

    /// Builds the header of the batch.
    pub fn new_batch_header(batch: &Batch) -> Result<BatchHeaderV1, CodecError> {
        let payload = Self::blob_payload(batch)?;
        let l1_message_popped = batch.num_l1_messages();

        Ok(BatchHeaderV1::new(
            Self::VERSION,
            batch.index,
            l1_message_popped,
            batch.total_l1_message_popped_after(),
            Self::data_hash(batch),
            Self::blob_versioned_hash(&payload),
            batch.parent_batch_hash,
            skipped_l1_message_bitmap(l1_message_popped),
        ))
    }
}

impl BlobCostEstimator for CodecV1 {
    fn estimate_batch_l1_commit_blob_size(&self, batch: &Batch) -> Result<u64, CodecError> {
        validate_batch(batch)?;
        Ok(padded_blob_size(unpadded_blob_size(batch)))
    }
}

/// Checks the batch can be encoded with the V1 codec.
fn validate_batch(batch: &Batch) -> Result<(), EncodingError> {
    if batch.chunks.is_empty() {
        return Err(EncodingError::EmptyBatch)
    }
    if batch.chunks.len() > MAX_NUM_CHUNKS_V1 {
        return Err(EncodingError::TooManyChunks {
            got: batch.chunks.len(),
            max: MAX_NUM_CHUNKS_V1,
        })
    }
    batch.chunks.iter().try_for_each(validate_chunk)
}

/// Returns the number of bytes the chunk contributes to the blob.
fn chunk_blob_data_size(chunk: &Chunk) -> u64 {
    chunk.blocks.iter().flat_map(|b| &b.transactions).map(|tx| tx.len() as u64).sum()
}

/// Returns the size of the blob payload before padding.
fn unpadded_blob_size(batch: &Batch) -> u64 {
    BLOB_METADATA_BYTES + batch.chunks.iter().map(chunk_blob_data_size).sum::<u64>()
}

/// Returns the size of the blob once the payload is spread over field elements.
const fn padded_blob_size(unpadded: u64) -> u64 {
    unpadded.div_ceil(BLOB_FIELD_ELEMENT_USABLE_BYTES) * BLOB_FIELD_ELEMENT_BYTES
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::MAX_BLOB_SIZE;
    use alloy_primitives::Bytes;
    use rollup_node_primitives::{BlockContext, L2Block};

    fn chunk(number: u64, tx_sizes: &[usize]) -> Chunk {
        Chunk::new(vec![L2Block::new(
            B256::ZERO,
            tx_sizes.iter().map(|s| Bytes::from(vec![0x11; *s])).collect(),
            BlockContext {
                number,
                num_transactions: tx_sizes.len() as u16,
                ..Default::default()
            },
        )])
    }

    #[test]
    fn test_should_estimate_padded_blob_size() -> eyre::Result<()> {
        let mut batch = Batch::new(1, 0, B256::ZERO);
        batch.chunks = vec![chunk(1, &[100, 200]), chunk(2, &[7])];

        // 62 bytes of metadata + 307 bytes of transactions = 369 bytes -> 12 field elements.
        let size = CodecV1.estimate_batch_l1_commit_blob_size(&batch)?;
        assert_eq!(size, 12 * 32);

        let payload = CodecV1::blob_payload(&batch)?;
        assert_eq!(payload.len(), 369);
        assert_eq!(&payload[0..2], &2u16.to_be_bytes());
        assert_eq!(&payload[2..6], &300u32.to_be_bytes());
        assert_eq!(&payload[6..10], &7u32.to_be_bytes());
        assert_eq!(&payload[10..14], &0u32.to_be_bytes());

        Ok(())
    }

    #[test]
    fn test_should_reject_too_many_chunks() {
        let mut batch = Batch::new(1, 0, B256::ZERO);
        batch.chunks = (0..=MAX_NUM_CHUNKS_V1 as u64).map(|i| chunk(i, &[1])).collect();

        let res = CodecV1.estimate_batch_l1_commit_blob_size(&batch);
        assert!(matches!(
            res,
            Err(CodecError::Encoding(EncodingError::TooManyChunks { got: 16, max: 15 }))
        ));
    }

    #[test]
    fn test_large_payload_exceeds_max_blob_size() -> eyre::Result<()> {
        let mut batch = Batch::new(1, 0, B256::ZERO);
        batch.chunks = vec![chunk(1, &[127_000])];

        let size = CodecV1.estimate_batch_l1_commit_blob_size(&batch)?;
        assert!(size > MAX_BLOB_SIZE);

        Ok(())
    }

    #[test]
    fn test_should_build_header() -> eyre::Result<()> {
        let mut batch = Batch::new(3, 5, B256::repeat_byte(2));
        batch.chunks = vec![chunk(1, &[10])];

        let header = CodecV1::new_batch_header(&batch)?;
        assert_eq!(header.version, 1);
        assert_eq!(header.batch_index, 3);
        assert_eq!(header.total_l1_message_popped, 5);
        assert_eq!(header.blob_versioned_hash.0[0], VERSIONED_HASH_VERSION_KZG);
        assert!(header.skipped_l1_message_bitmap.is_empty());

        Ok(())
    }
}
