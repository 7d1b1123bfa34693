//! Implements the V0 codec: chunks are committed as calldata.

pub(crate) use block_context::BlockContextV0;
mod block_context;

pub(crate) use chunk::{chunk_calldata_size, chunk_data_hash, encode_chunk, validate_chunk};
mod chunk;

use crate::{
    constants::{
        CALLDATA_NON_ZERO_BYTE_GAS, COLD_SLOAD_GAS, COMMIT_BATCH_OVERHEAD_GAS,
        KECCAK_256_DIGEST_BYTES_SIZE, SSTORE_SET_GAS, TX_BASE_GAS,
    },
    error::{CodecError, EncodingError},
    gas::{keccak256_gas, memory_expansion_cost},
    header::BatchHeaderV0,
    skipped_l1_message_bitmap, skipped_l1_message_bitmap_size, LegacyCostEstimator,
};
use rollup_node_primitives::Batch;

use alloy_primitives::{keccak256, B256};

/// The V0 codec.
///
/// Batches are committed by posting the encoded chunks as calldata, which makes the L1 commit gas
/// and the calldata size the limiting resources.
#[derive(Debug, Default, Clone, Copy)]
pub struct CodecV0;

impl CodecV0 {
    /// The version of the codec.
    pub const VERSION: u8 = 0;

    /// Returns the encoded chunks of the batch, as posted in the commit calldata.
    pub fn encode_chunks(batch: &Batch) -> Result<Vec<Vec<u8>>, CodecError> {
        if batch.chunks.is_empty() {
            return Err(EncodingError::EmptyBatch.into())
        }
        batch.chunks.iter().map(encode_chunk).collect::<Result<_, _>>().map_err(Into::into)
    }

    /// Computes the data hash of the batch.
    pub fn data_hash(batch: &Batch) -> B256 {
        let chunk_hashes: Vec<u8> =
            batch.chunks.iter().flat_map(|c| chunk_data_hash(c).0).collect();
        keccak256(chunk_hashes)
    }

    /// Builds the header of the batch.
    pub fn new_batch_header(batch: &Batch) -> Result<BatchHeaderV0, CodecError> {
        if batch.chunks.is_empty() {
            return Err(EncodingError::EmptyBatch.into())
        }
        for chunk in &batch.chunks {
            validate_chunk(chunk)?;
        }

        let l1_message_popped = batch.num_l1_messages();
        Ok(BatchHeaderV0::new(
            Self::VERSION,
            batch.index,
            l1_message_popped,
            batch.total_l1_message_popped_after(),
            Self::data_hash(batch),
            batch.parent_batch_hash,
            skipped_l1_message_bitmap(l1_message_popped),
        ))
    }
}

impl LegacyCostEstimator for CodecV0 {
    fn estimate_batch_l1_commit_gas(&self, batch: &Batch) -> Result<u64, CodecError> {
        if batch.chunks.is_empty() {
            return Err(EncodingError::EmptyBatch.into())
        }

        let mut total = COMMIT_BATCH_OVERHEAD_GAS;
        total += 4 * COLD_SLOAD_GAS;
        total += SSTORE_SET_GAS;
        total += TX_BASE_GAS;

        // version byte and the parent batch header, which is loaded and hashed.
        let parent_header_size = BatchHeaderV0::BYTES_LENGTH as u64;
        total += CALLDATA_NON_ZERO_BYTE_GAS;
        total += CALLDATA_NON_ZERO_BYTE_GAS * parent_header_size;
        total += keccak256_gas(parent_header_size);

        for chunk in &batch.chunks {
            validate_chunk(chunk)?;
            total += chunk::chunk_l1_commit_gas(chunk);
            // the chunk's offset in the dynamic bytes array.
            total += CALLDATA_NON_ZERO_BYTE_GAS * KECCAK_256_DIGEST_BYTES_SIZE as u64;
            total += memory_expansion_cost(chunk_calldata_size(chunk));
        }

        // the batch data hash.
        total += keccak256_gas((KECCAK_256_DIGEST_BYTES_SIZE * batch.chunks.len()) as u64);

        // the skipped L1 message bitmap and the batch hash.
        let bitmap_size = skipped_l1_message_bitmap_size(batch.num_l1_messages());
        total += CALLDATA_NON_ZERO_BYTE_GAS * bitmap_size;
        total += keccak256_gas(BatchHeaderV0::BYTES_LENGTH as u64 + bitmap_size);

        Ok(total)
    }

    fn estimate_batch_l1_commit_calldata_size(&self, batch: &Batch) -> Result<u64, CodecError> {
        if batch.chunks.is_empty() {
            return Err(EncodingError::EmptyBatch.into())
        }
        let mut total = 0;
        for chunk in &batch.chunks {
            validate_chunk(chunk)?;
            total += chunk_calldata_size(chunk);
        }
        Ok(total)
    }
}
