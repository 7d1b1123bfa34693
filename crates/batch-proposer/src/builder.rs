use alloy_primitives::B256;
use rollup_node_primitives::{Batch, Chunk};

/// The batch under construction by the batch proposer.
///
/// Chunks are appended one at a time; the last appended chunk can be removed when it pushes the
/// batch over its limits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateBatch {
    batch: Batch,
    /// The stored index of each chunk of the batch, in append order.
    chunk_indices: Vec<u64>,
}

impl CandidateBatch {
    /// Returns a new empty candidate.
    pub const fn new(
        index: u64,
        total_l1_message_popped_before: u64,
        parent_batch_hash: B256,
    ) -> Self {
        Self {
            batch: Batch::new(index, total_l1_message_popped_before, parent_batch_hash),
            chunk_indices: Vec::new(),
        }
    }

    /// Appends the chunk stored at `index` to the candidate.
    pub fn push_chunk(&mut self, index: u64, chunk: Chunk) {
        self.batch.chunks.push(chunk);
        self.chunk_indices.push(index);
    }

    /// Removes the last appended chunk from the candidate.
    pub fn undo_last_chunk(&mut self) -> Option<Chunk> {
        self.chunk_indices.pop();
        self.batch.chunks.pop()
    }

    /// Returns the index of the first chunk of the candidate, if any.
    pub fn start_chunk_index(&self) -> Option<u64> {
        self.chunk_indices.first().copied()
    }

    /// Returns the index of the last chunk of the candidate, if any.
    pub fn end_chunk_index(&self) -> Option<u64> {
        self.chunk_indices.last().copied()
    }

    /// Returns the first and last chunk indices of the candidate, if any.
    pub fn chunk_range(&self) -> Option<(u64, u64)> {
        self.start_chunk_index().zip(self.end_chunk_index())
    }

    /// Returns a reference to the batch under construction.
    pub const fn batch(&self) -> &Batch {
        &self.batch
    }

    /// Consumes the candidate and returns the batch.
    pub fn into_batch(self) -> Batch {
        self.batch
    }
}
