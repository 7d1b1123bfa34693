use alloy_primitives::B256;

/// The error type for database operations.
#[derive(Debug, thiserror::Error)]
pub enum DatabaseError {
    /// A database error occurred.
    #[error("database error: {0}")]
    DatabaseError(#[from] sea_orm::DbErr),
    /// The range of blocks stored in database is not contiguous.
    #[error("expected {expected} blocks in range [{start}, {end}], found {found}")]
    MissingBlocks {
        /// The first block of the range.
        start: u64,
        /// The last block of the range.
        end: u64,
        /// The expected count of blocks.
        expected: u64,
        /// The count of blocks found in database.
        found: u64,
    },
    /// The update of the chunks batch hash did not touch every chunk in the range.
    #[error("chunks [{start}, {end}] assigned to batch {batch_hash}: expected {expected} updated rows, got {updated}")]
    ChunkRangeMismatch {
        /// The first chunk index of the range.
        start: u64,
        /// The last chunk index of the range.
        end: u64,
        /// The hash of the batch.
        batch_hash: B256,
        /// The expected count of updated rows.
        expected: u64,
        /// The count of updated rows.
        updated: u64,
    },
    /// The stored data for the block could not be decoded.
    #[error("invalid data stored for block {0}")]
    InvalidBlockData(u64),
}
