//! Fork configuration of the batch proposer.

use scroll_codec::Codec;

/// The cost model used to size a batch.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum CostModelVersion {
    /// Chunks are committed as calldata: the batch is sized by its L1 commit gas and calldata.
    #[default]
    Legacy,
    /// L2 transactions are committed in a blob: the batch is sized by its blob size.
    Blob,
}

impl CostModelVersion {
    /// Returns the codec encoding the batches sized with this cost model.
    pub const fn codec(&self) -> Codec {
        match self {
            Self::Legacy => Codec::V0,
            Self::Blob => Codec::V1,
        }
    }
}

/// The fork configuration.
///
/// Holds the sorted activation heights of the protocol forks and the height from which batches
/// are committed using blobs. The blob cutover is always part of the fork heights, such that a
/// batch never mixes cost models.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ForkConfig {
    heights: Vec<u64>,
    blob_cutover: Option<u64>,
}

impl ForkConfig {
    /// Returns a new [`ForkConfig`] from the activation heights and the optional blob cutover.
    pub fn new(heights: impl IntoIterator<Item = u64>, blob_cutover: Option<u64>) -> Self {
        let mut heights: Vec<_> = heights.into_iter().chain(blob_cutover).collect();
        heights.sort_unstable();
        heights.dedup();
        Self { heights, blob_cutover }
    }

    /// Returns true if the block number is the first block of a fork.
    pub fn is_fork_boundary(&self, block_number: u64) -> bool {
        self.heights.binary_search(&block_number).is_ok()
    }

    /// Returns the fork heights in ascending order.
    pub fn sorted_heights(&self) -> &[u64] {
        &self.heights
    }

    /// Returns the height from which the blob cost model applies.
    pub const fn blob_cutover(&self) -> Option<u64> {
        self.blob_cutover
    }

    /// Returns the cost model applying to a batch starting at the provided block number.
    pub fn cost_model_version(&self, block_number: u64) -> CostModelVersion {
        match self.blob_cutover {
            Some(cutover) if block_number >= cutover => CostModelVersion::Blob,
            _ => CostModelVersion::Legacy,
        }
    }
}
