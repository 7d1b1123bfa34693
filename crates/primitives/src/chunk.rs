use super::L2Block;
use alloy_primitives::B256;

/// A [`Chunk`] is a series of contiguous L2 blocks.
///
/// Chunks are formed upstream of the batch proposer. A collection of [`Chunk`]s is grouped into a
/// [`super::Batch`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Chunk {
    /// The blocks of the chunk, ordered by block number.
    pub blocks: Vec<L2Block>,
}

impl Chunk {
    /// Returns a new [`Chunk`] from the provided blocks.
    pub const fn new(blocks: Vec<L2Block>) -> Self {
        Self { blocks }
    }

    /// Returns the first block of the chunk.
    pub fn first_block(&self) -> Option<&L2Block> {
        self.blocks.first()
    }

    /// Returns the number of L1 messages popped in the chunk.
    pub fn num_l1_messages(&self) -> u64 {
        self.blocks.iter().map(L2Block::num_l1_messages).sum()
    }

    /// Returns the number of L2 transactions in the chunk.
    pub fn num_l2_transactions(&self) -> usize {
        self.blocks.iter().map(|b| b.transactions.len()).sum()
    }
}

/// The metadata of a chunk as persisted by the chunk proposer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChunkInfo {
    /// The index of the chunk.
    pub index: u64,
    /// The number of the first block in the chunk.
    pub start_block_number: u64,
    /// The number of the last block in the chunk.
    pub end_block_number: u64,
    /// The timestamp of the first block in the chunk.
    pub start_block_time: u64,
    /// The hash of the batch the chunk was assigned to, if any.
    pub batch_hash: Option<B256>,
}

impl ChunkInfo {
    /// Returns a new unbatched [`ChunkInfo`].
    pub const fn new(
        index: u64,
        start_block_number: u64,
        end_block_number: u64,
        start_block_time: u64,
    ) -> Self {
        Self { index, start_block_number, end_block_number, start_block_time, batch_hash: None }
    }

    /// Returns true if the chunk was assigned to a batch.
    pub const fn is_batched(&self) -> bool {
        self.batch_hash.is_some()
    }
}
