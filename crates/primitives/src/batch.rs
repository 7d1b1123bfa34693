use super::{Chunk, L2Block};
use alloy_primitives::{Bytes, B256};

/// A batch is the unit of settlement to L1 for the scroll rollup.
///
/// A batch contains a list of chunks, which contain a list of blocks. While the batch proposer
/// packs chunks, the [`Batch`] acts as the in-memory candidate; it is only persisted as a
/// [`BatchCommitRecord`] once the proposer commits it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Batch {
    /// The index of the batch.
    pub index: u64,
    /// The total number of L1 messages popped before this batch.
    pub total_l1_message_popped_before: u64,
    /// The hash of the parent batch.
    pub parent_batch_hash: B256,
    /// The chunks in the batch.
    pub chunks: Vec<Chunk>,
}

impl Batch {
    /// Creates a new [`Batch`] instance without chunks.
    pub const fn new(
        index: u64,
        total_l1_message_popped_before: u64,
        parent_batch_hash: B256,
    ) -> Self {
        Self { index, total_l1_message_popped_before, parent_batch_hash, chunks: Vec::new() }
    }

    /// Returns the first block of the batch.
    pub fn first_block(&self) -> Option<&L2Block> {
        self.chunks.first().and_then(Chunk::first_block)
    }

    /// Returns the number of chunks in the batch.
    pub fn num_chunks(&self) -> usize {
        self.chunks.len()
    }

    /// Returns the number of L1 messages popped in the batch.
    pub fn num_l1_messages(&self) -> u64 {
        self.chunks.iter().map(Chunk::num_l1_messages).sum()
    }

    /// Returns the total number of L1 messages popped after this batch.
    pub fn total_l1_message_popped_after(&self) -> u64 {
        self.total_l1_message_popped_before + self.num_l1_messages()
    }
}

/// A committed batch as persisted in the database.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchCommitRecord {
    /// The index of the batch.
    pub index: u64,
    /// The hash of the batch header.
    pub hash: B256,
    /// The index of the first chunk in the batch.
    pub start_chunk_index: u64,
    /// The index of the last chunk in the batch.
    pub end_chunk_index: u64,
    /// The codec version used to encode the batch header.
    pub codec_version: u8,
    /// The encoded batch header.
    pub header: Bytes,
}
