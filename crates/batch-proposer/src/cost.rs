//! Cost-model dispatch: computes the L1 commit resources of a candidate batch.

use crate::fork::{CostModelVersion, ForkConfig};

use rollup_node_primitives::Batch;
use scroll_codec::{BlobCostEstimator, CodecError, EncodingError, LegacyCostEstimator};

/// The resources a batch consumes when committed to L1.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BatchMetrics {
    /// The cost model the metrics were computed with.
    pub version: CostModelVersion,
    /// The number of chunks in the batch.
    pub num_chunks: u64,
    /// The number of the first block in the batch.
    pub first_block_number: u64,
    /// The timestamp of the first block in the batch.
    pub first_block_timestamp: u64,
    /// The estimated L1 commit gas. Zero under the blob cost model.
    pub l1_commit_gas: u64,
    /// The estimated L1 commit calldata size. Zero under the blob cost model.
    pub l1_commit_calldata_size: u64,
    /// The estimated L1 commit blob size. Zero under the legacy cost model.
    pub l1_commit_blob_size: u64,
}

/// The cost models of the batch proposer, selected by the first block of the batch.
#[derive(Debug, Clone)]
pub struct CostModels<L, B> {
    legacy: L,
    blob: B,
    fork_config: ForkConfig,
}

impl<L, B> CostModels<L, B>
where
    L: LegacyCostEstimator,
    B: BlobCostEstimator,
{
    /// Returns a new [`CostModels`] instance.
    pub const fn new(legacy: L, blob: B, fork_config: ForkConfig) -> Self {
        Self { legacy, blob, fork_config }
    }

    /// Returns the fork configuration.
    pub const fn fork_config(&self) -> &ForkConfig {
        &self.fork_config
    }

    /// Computes the metrics of the batch under the cost model of its first block.
    pub fn compute_batch_metrics(&self, batch: &Batch) -> Result<BatchMetrics, CodecError> {
        let first_block = batch.first_block().ok_or(EncodingError::EmptyBatch)?;
        let version = self.fork_config.cost_model_version(first_block.number());

        let mut metrics = BatchMetrics {
            version,
            num_chunks: batch.num_chunks() as u64,
            first_block_number: first_block.number(),
            first_block_timestamp: first_block.timestamp(),
            ..Default::default()
        };

        match version {
            CostModelVersion::Legacy => {
                metrics.l1_commit_gas = self.legacy.estimate_batch_l1_commit_gas(batch)?;
                metrics.l1_commit_calldata_size =
                    self.legacy.estimate_batch_l1_commit_calldata_size(batch)?;
            }
            CostModelVersion::Blob => {
                metrics.l1_commit_blob_size =
                    self.blob.estimate_batch_l1_commit_blob_size(batch)?;
            }
        }

        Ok(metrics)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::{Bytes, B256};
    use rollup_node_primitives::{BlockContext, Chunk, L2Block};
    use scroll_codec::{CodecV0, CodecV1};

    fn batch(first_block: u64) -> Batch {
        let block = L2Block::new(
            B256::ZERO,
            vec![Bytes::from(vec![1u8; 100])],
            BlockContext {
                number: first_block,
                timestamp: 42,
                num_transactions: 1,
                ..Default::default()
            },
        );
        let mut batch = Batch::new(1, 0, B256::ZERO);
        batch.chunks.push(Chunk::new(vec![block]));
        batch
    }

    #[test]
    fn test_should_select_cost_model_by_first_block() -> eyre::Result<()> {
        let models = CostModels::new(CodecV0, CodecV1, ForkConfig::new([], Some(10)));

        let legacy = models.compute_batch_metrics(&batch(9))?;
        assert_eq!(legacy.version, CostModelVersion::Legacy);
        assert_eq!(legacy.num_chunks, 1);
        assert_eq!(legacy.first_block_number, 9);
        assert_eq!(legacy.first_block_timestamp, 42);
        assert_eq!(legacy.l1_commit_calldata_size, 1 + 60 + 4 + 100);
        assert!(legacy.l1_commit_gas > 0);
        assert_eq!(legacy.l1_commit_blob_size, 0);

        let blob = models.compute_batch_metrics(&batch(10))?;
        assert_eq!(blob.version, CostModelVersion::Blob);
        assert_eq!(blob.l1_commit_gas, 0);
        assert_eq!(blob.l1_commit_calldata_size, 0);
        // 62 metadata bytes and 100 transaction bytes over 31 bytes field elements.
        assert_eq!(blob.l1_commit_blob_size, 6 * 32);

        Ok(())
    }

    #[test]
    fn test_should_fail_on_empty_batch() {
        let models = CostModels::new(CodecV0, CodecV1, ForkConfig::default());
        let res = models.compute_batch_metrics(&Batch::new(1, 0, B256::ZERO));
        assert!(matches!(res, Err(CodecError::Encoding(EncodingError::EmptyBatch))));
    }
}
