//! The codec implementation for Scroll batches.
//!
//! The crate provides the versioned encodings of a batch: the batch headers, their hashes, and the
//! estimation of the L1 commit resources a batch consumes under each version.

pub mod constants;

pub use error::{CodecError, DecodingError, EncodingError};
mod error;

mod gas;

pub use header::{BatchHeader, BatchHeaderPrefix, BatchHeaderV0, BatchHeaderV1};
pub mod header;

mod macros;

pub use v0::CodecV0;
mod v0;

pub use v1::CodecV1;
mod v1;

use crate::constants::{L1_MESSAGES_PER_BITMAP_ITEM, SKIPPED_L1_MESSAGE_BITMAP_ITEM_BYTES_SIZE};

use auto_impl::auto_impl;
use rollup_node_primitives::Batch;

/// The Codec.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Codec {
    /// V0 variant of the codec.
    /// <https://github.com/scroll-tech/scroll-contracts/blob/81f0db72ca5335e0dddfaa99cb415e3d1cee895f/src/libraries/codec/ChunkCodecV0.sol>
    V0,
    /// V1 variant of the codec.
    /// <https://github.com/scroll-tech/scroll-contracts/blob/81f0db72ca5335e0dddfaa99cb415e3d1cee895f/src/libraries/codec/ChunkCodecV1.sol>
    V1,
}

impl Codec {
    /// Returns the version byte of the codec.
    pub const fn version(&self) -> u8 {
        match self {
            Self::V0 => CodecV0::VERSION,
            Self::V1 => CodecV1::VERSION,
        }
    }

    /// Returns the codec for the provided version byte.
    pub const fn from_version(version: u8) -> Result<Self, DecodingError> {
        match version {
            CodecV0::VERSION => Ok(Self::V0),
            CodecV1::VERSION => Ok(Self::V1),
            v => Err(DecodingError::UnsupportedCodecVersion(v)),
        }
    }

    /// Builds the batch header of the provided batch.
    pub fn new_batch_header(&self, batch: &Batch) -> Result<BatchHeader, CodecError> {
        Ok(match self {
            Self::V0 => BatchHeader::V0(CodecV0::new_batch_header(batch)?),
            Self::V1 => BatchHeader::V1(CodecV1::new_batch_header(batch)?),
        })
    }
}

/// Estimates the L1 commit resources of a batch committed through calldata.
#[auto_impl(&, Box, Arc)]
pub trait LegacyCostEstimator: Send + Sync {
    /// Returns the estimated L1 gas of committing the batch.
    fn estimate_batch_l1_commit_gas(&self, batch: &Batch) -> Result<u64, CodecError>;

    /// Returns the estimated calldata size of committing the batch.
    fn estimate_batch_l1_commit_calldata_size(&self, batch: &Batch) -> Result<u64, CodecError>;
}

/// Estimates the L1 commit resources of a batch committed through a blob.
#[auto_impl(&, Box, Arc)]
pub trait BlobCostEstimator: Send + Sync {
    /// Returns the estimated blob size of committing the batch.
    fn estimate_batch_l1_commit_blob_size(&self, batch: &Batch) -> Result<u64, CodecError>;
}

/// Returns the size in bytes of the skipped L1 message bitmap for the provided count of popped L1
/// messages.
pub(crate) const fn skipped_l1_message_bitmap_size(l1_message_popped: u64) -> u64 {
    l1_message_popped.div_ceil(L1_MESSAGES_PER_BITMAP_ITEM) *
        SKIPPED_L1_MESSAGE_BITMAP_ITEM_BYTES_SIZE as u64
}

/// Returns an empty skipped L1 message bitmap for the provided count of popped L1 messages. The
/// proposer never skips L1 messages.
pub(crate) fn skipped_l1_message_bitmap(l1_message_popped: u64) -> Vec<u8> {
    vec![0; skipped_l1_message_bitmap_size(l1_message_popped) as usize]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codec_version_round_trip() -> eyre::Result<()> {
        assert_eq!(Codec::from_version(Codec::V0.version())?, Codec::V0);
        assert_eq!(Codec::from_version(Codec::V1.version())?, Codec::V1);
        assert!(matches!(Codec::from_version(7), Err(DecodingError::UnsupportedCodecVersion(7))));
        Ok(())
    }

    #[test]
    fn test_skipped_l1_message_bitmap_size() {
        assert_eq!(skipped_l1_message_bitmap_size(0), 0);
        assert_eq!(skipped_l1_message_bitmap_size(1), 32);
        assert_eq!(skipped_l1_message_bitmap_size(256), 32);
        assert_eq!(skipped_l1_message_bitmap_size(257), 64);
    }
}
