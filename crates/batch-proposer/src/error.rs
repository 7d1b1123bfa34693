use crate::{config::ConfigError, cost::BatchMetrics};

use scroll_codec::CodecError;
use scroll_db::DatabaseError;

/// An error type for the batch proposer.
#[derive(Debug, thiserror::Error)]
pub enum BatchProposerError {
    /// The batch proposer was configured with invalid parameters.
    #[error("Invalid batch proposer configuration: {0}")]
    Config(#[from] ConfigError),
    /// The batch proposer encountered an error when reading from the database.
    #[error("Encountered an error interacting with the database: {0}")]
    Database(#[from] DatabaseError),
    /// The cost of the candidate batch could not be estimated or its header could not be built.
    #[error("Encountered an error estimating the batch cost: {0}")]
    CostEstimation(#[from] CodecError),
    /// The first chunk of the batch alone exceeds the limits of a batch. This indicates a chunk
    /// was sized incorrectly upstream and requires manual intervention.
    #[error("The first chunk (blocks {start_block_number} to {end_block_number}) exceeds the batch limits: {metrics:?}, max gas {max_l1_commit_gas}, max calldata size {max_l1_commit_calldata_size}, max blob size {max_l1_commit_blob_size}")]
    FirstChunkExceedsLimits {
        /// The first block of the chunk.
        start_block_number: u64,
        /// The last block of the chunk.
        end_block_number: u64,
        /// The metrics of the batch holding the chunk alone.
        metrics: BatchMetrics,
        /// The maximum L1 commit gas of a batch.
        max_l1_commit_gas: u64,
        /// The maximum L1 commit calldata size of a batch.
        max_l1_commit_calldata_size: u64,
        /// The maximum L1 commit blob size of a batch.
        max_l1_commit_blob_size: u64,
    },
    /// Persisting the batch failed, the transaction was rolled back.
    #[error("Failed to persist the batch: {0}")]
    Persistence(DatabaseError),
    /// No parent batch was found in the database.
    #[error("No parent batch found in the database, the genesis batch must be inserted first")]
    MissingParentBatch,
    /// The header of the parent batch could not be decoded.
    #[error("Failed to decode the parent batch header: {0}")]
    ParentHeader(CodecError),
    /// A chunk does not contain any block.
    #[error("Chunk {index} does not contain any block")]
    EmptyChunk {
        /// The index of the chunk.
        index: u64,
    },
}
