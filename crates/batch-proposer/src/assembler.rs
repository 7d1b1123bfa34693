//! The batch assembler packs the unbatched chunks into the next batch.

use crate::{
    builder::CandidateBatch,
    config::BatchProposerConfig,
    cost::{BatchMetrics, CostModels},
    error::BatchProposerError,
    fork::{CostModelVersion, ForkConfig},
};

use rollup_node_primitives::{Batch, Chunk};
use scroll_codec::{
    constants::{MAX_BLOB_SIZE, MAX_NUM_CHUNKS_V1},
    BatchHeaderPrefix, BlobCostEstimator, Codec, CodecError, LegacyCostEstimator,
};
use scroll_db::DatabaseReadOperations;

/// The reason a batch was cut.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CutTrigger {
    /// Appending the next chunk would exceed a resource limit.
    ResourceLimit,
    /// The batch reached the maximum chunk count for this cycle.
    ChunkCount,
    /// The first block of the batch waited longer than the batch timeout.
    Timeout,
}

/// A batch ready to be persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProposedBatch {
    /// The batch.
    pub batch: Batch,
    /// The metrics of the batch.
    pub metrics: BatchMetrics,
    /// The reason the batch was cut.
    pub trigger: CutTrigger,
    /// The codec encoding the batch.
    pub codec: Codec,
    /// The index of the first chunk of the batch.
    pub start_chunk_index: u64,
    /// The index of the last chunk of the batch.
    pub end_chunk_index: u64,
}

/// The outcome of a proposal cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BatchProposal {
    /// There are no unbatched chunks.
    NoUnbatchedChunks,
    /// The unbatched chunks are not enough to cut a batch yet.
    NotEnoughChunks,
    /// A batch was cut.
    Proposed(ProposedBatch),
}

impl BatchProposal {
    /// Returns the proposed batch, if any.
    pub fn into_proposed(self) -> Option<ProposedBatch> {
        match self {
            Self::Proposed(proposed) => Some(proposed),
            _ => None,
        }
    }
}

/// The batch assembler.
///
/// Greedily appends the unbatched chunks to a candidate batch until a resource limit is broken,
/// in which case the last chunk is removed, or until all the chunks available for the cycle are
/// consumed, in which case the batch is cut only if it is full or timed out.
#[derive(Debug, Clone)]
pub struct BatchAssembler<L, B> {
    config: BatchProposerConfig,
    cost_models: CostModels<L, B>,
}

impl<L, B> BatchAssembler<L, B>
where
    L: LegacyCostEstimator,
    B: BlobCostEstimator,
{
    /// Returns a new [`BatchAssembler`].
    pub const fn new(
        config: BatchProposerConfig,
        fork_config: ForkConfig,
        legacy: L,
        blob: B,
    ) -> Self {
        Self { config, cost_models: CostModels::new(legacy, blob, fork_config) }
    }

    /// Returns the configuration of the assembler.
    pub const fn config(&self) -> &BatchProposerConfig {
        &self.config
    }

    /// Returns the fork configuration of the assembler.
    pub const fn fork_config(&self) -> &ForkConfig {
        self.cost_models.fork_config()
    }

    /// Proposes the next batch from the unbatched chunks, using `now` (seconds since the epoch)
    /// to evaluate the batch timeout.
    ///
    /// Only the chunks whose indices follow the first unbatched chunk without a gap are
    /// considered. The call only reads from the provider: running it twice against unchanged
    /// storage yields the same proposal.
    pub async fn propose_batch<P: DatabaseReadOperations>(
        &self,
        provider: &P,
        now: u64,
    ) -> Result<BatchProposal, BatchProposerError> {
        let first_unbatched_chunk_index = provider.get_first_unbatched_chunk_index().await?;
        let mut max_chunks = self.config.max_chunks_per_batch;
        let mut chunks = provider.get_chunks_ge_index(first_unbatched_chunk_index, max_chunks).await?;
        if chunks.is_empty() {
            tracing::trace!(target: "scroll::batch_proposer", first_unbatched_chunk_index, "No unbatched chunks.");
            return Ok(BatchProposal::NoUnbatchedChunks)
        }

        // a batch only covers a contiguous range of chunks.
        if let Some(gap) = chunks
            .iter()
            .zip(first_unbatched_chunk_index..)
            .position(|(chunk, expected)| chunk.index != expected)
        {
            tracing::debug!(target: "scroll::batch_proposer", missing_chunk_index = first_unbatched_chunk_index + gap as u64, next_chunk_index = chunks[gap].index, "Gap in the unbatched chunks.");
            chunks.truncate(gap);
            if chunks.is_empty() {
                return Ok(BatchProposal::NotEnoughChunks)
            }
        }

        // a batch never crosses a fork boundary.
        if let Some(boundary) = chunks
            .iter()
            .skip(1)
            .position(|chunk| self.fork_config().is_fork_boundary(chunk.start_block_number))
        {
            let len = boundary + 1;
            tracing::debug!(target: "scroll::batch_proposer", fork_block_number = chunks[len].start_block_number, chunks = len, "Capping batch at fork boundary.");
            chunks.truncate(len);
            max_chunks = len as u64;
        }

        // the blob cost model limits the chunk count of a batch.
        let version = self.fork_config().cost_model_version(chunks[0].start_block_number);
        if version == CostModelVersion::Blob && max_chunks > MAX_NUM_CHUNKS_V1 as u64 {
            chunks.truncate(MAX_NUM_CHUNKS_V1);
            max_chunks = MAX_NUM_CHUNKS_V1 as u64;
        }

        let parent = provider.get_latest_batch().await?.ok_or_else(|| {
            tracing::error!(target: "scroll::batch_proposer", "Missing parent batch.");
            BatchProposerError::MissingParentBatch
        })?;
        let parent_header = BatchHeaderPrefix::try_from_buf(&mut parent.header.as_ref())
            .map_err(|err| BatchProposerError::ParentHeader(CodecError::from(err)))?;

        let mut candidate = CandidateBatch::new(
            parent.index + 1,
            parent_header.total_l1_message_popped,
            parent.hash,
        );

        for (i, chunk) in chunks.iter().enumerate() {
            let blocks = provider
                .get_l2_blocks_in_range(chunk.start_block_number, chunk.end_block_number)
                .await
                .inspect_err(|err| {
                    tracing::error!(target: "scroll::batch_proposer", chunk_index = chunk.index, start_block_number = chunk.start_block_number, end_block_number = chunk.end_block_number, %err, "Failed to fetch chunk blocks.");
                })?;
            if blocks.is_empty() {
                return Err(BatchProposerError::EmptyChunk { index: chunk.index })
            }
            candidate.push_chunk(chunk.index, Chunk::new(blocks));

            let metrics = self.cost_models.compute_batch_metrics(candidate.batch())?;
            if self.exceeds_limits(&metrics) {
                if i == 0 {
                    tracing::error!(
                        target: "scroll::batch_proposer",
                        chunk_index = chunk.index,
                        start_block_number = chunk.start_block_number,
                        end_block_number = chunk.end_block_number,
                        ?metrics,
                        max_l1_commit_gas = self.config.max_l1_commit_gas_per_batch,
                        max_l1_commit_calldata_size = self.config.max_l1_commit_calldata_size_per_batch,
                        "First chunk exceeds the batch limits."
                    );
                    return Err(BatchProposerError::FirstChunkExceedsLimits {
                        start_block_number: chunk.start_block_number,
                        end_block_number: chunk.end_block_number,
                        metrics,
                        max_l1_commit_gas: self.config.max_l1_commit_gas_per_batch,
                        max_l1_commit_calldata_size: self
                            .config
                            .max_l1_commit_calldata_size_per_batch,
                        max_l1_commit_blob_size: MAX_BLOB_SIZE,
                    })
                }

                tracing::debug!(
                    target: "scroll::batch_proposer",
                    chunk_index = chunk.index,
                    ?metrics,
                    gas_cost_increase_multiplier = self.config.gas_cost_increase_multiplier,
                    "Chunk exceeds the batch limits, removing it from the batch."
                );
                candidate.undo_last_chunk();
                let metrics = self.cost_models.compute_batch_metrics(candidate.batch())?;
                return Ok(self.cut(candidate, metrics, CutTrigger::ResourceLimit))
            }
        }

        let metrics = self.cost_models.compute_batch_metrics(candidate.batch())?;
        let timed_out =
            metrics.first_block_timestamp.saturating_add(self.config.batch_timeout_sec) < now;
        if timed_out || metrics.num_chunks == max_chunks {
            let trigger = if timed_out { CutTrigger::Timeout } else { CutTrigger::ChunkCount };
            return Ok(self.cut(candidate, metrics, trigger))
        }

        tracing::debug!(
            target: "scroll::batch_proposer",
            num_chunks = metrics.num_chunks,
            max_chunks,
            first_block_timestamp = metrics.first_block_timestamp,
            batch_timeout_sec = self.config.batch_timeout_sec,
            "Not enough chunks to propose a batch."
        );
        Ok(BatchProposal::NotEnoughChunks)
    }

    /// Returns true if the metrics break any of the batch limits. The multiplied gas is truncated
    /// to an integer before the comparison.
    fn exceeds_limits(&self, metrics: &BatchMetrics) -> bool {
        let gas = (metrics.l1_commit_gas as f64 * self.config.gas_cost_increase_multiplier) as u64;
        metrics.l1_commit_calldata_size > self.config.max_l1_commit_calldata_size_per_batch ||
            gas > self.config.max_l1_commit_gas_per_batch ||
            metrics.l1_commit_blob_size > MAX_BLOB_SIZE
    }

    /// Finalizes the candidate into a [`ProposedBatch`]. The metrics must be computed on the final
    /// set of chunks.
    fn cut(
        &self,
        candidate: CandidateBatch,
        metrics: BatchMetrics,
        trigger: CutTrigger,
    ) -> BatchProposal {
        let Some((start_chunk_index, end_chunk_index)) = candidate.chunk_range() else {
            return BatchProposal::NotEnoughChunks
        };
        let batch = candidate.into_batch();

        tracing::info!(
            target: "scroll::batch_proposer",
            batch_index = batch.index,
            start_chunk_index,
            end_chunk_index,
            ?trigger,
            ?metrics,
            "Proposing batch."
        );

        BatchProposal::Proposed(ProposedBatch {
            batch,
            metrics,
            trigger,
            codec: metrics.version.codec(),
            start_chunk_index,
            end_chunk_index,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::genesis::insert_genesis_batch;

    use alloy_primitives::B256;
    use rollup_node_primitives::{BlockContext, ChunkInfo, L2Block};
    use scroll_codec::CodecV1;
    use scroll_db::{test_utils::setup_test_db, Database, DatabaseWriteOperations};

    /// A legacy estimator charging a fixed gas per chunk.
    #[derive(Debug)]
    struct FixedGasEstimator(u64);

    impl LegacyCostEstimator for FixedGasEstimator {
        fn estimate_batch_l1_commit_gas(&self, batch: &Batch) -> Result<u64, CodecError> {
            Ok(self.0 * batch.num_chunks() as u64)
        }

        fn estimate_batch_l1_commit_calldata_size(&self, _: &Batch) -> Result<u64, CodecError> {
            Ok(0)
        }
    }

    async fn setup_chunks(db: &Database, count: u64) -> eyre::Result<()> {
        insert_genesis_batch(db, L2Block::default()).await?;
        for n in 1..=count {
            let context = BlockContext { number: n, timestamp: 1_000, ..Default::default() };
            db.insert_l2_block(L2Block::new(B256::repeat_byte(n as u8), vec![], context)).await?;
            db.insert_chunk(ChunkInfo::new(n, n, n, 1_000)).await?;
        }
        Ok(())
    }

    #[tokio::test]
    async fn test_gas_limit_applies_multiplier() -> eyre::Result<()> {
        let db = setup_test_db().await;
        setup_chunks(&db, 5).await?;

        // 2 chunks cost 3_000 gas once multiplied, 3 chunks 4_500.
        let config = BatchProposerConfig {
            max_chunks_per_batch: 5,
            max_l1_commit_gas_per_batch: 4_000,
            gas_cost_increase_multiplier: 1.5,
            ..Default::default()
        };
        let assembler =
            BatchAssembler::new(config, ForkConfig::default(), FixedGasEstimator(1_000), CodecV1);

        let proposed =
            assembler.propose_batch(&db, 1_000).await?.into_proposed().expect("batch proposed");
        assert_eq!(proposed.trigger, CutTrigger::ResourceLimit);
        assert_eq!((proposed.start_chunk_index, proposed.end_chunk_index), (1, 2));
        assert_eq!(proposed.metrics.l1_commit_gas, 2_000);
        assert_eq!(proposed.metrics.num_chunks, 2);

        Ok(())
    }

    #[tokio::test]
    async fn test_gas_limit_truncates_multiplied_gas() -> eyre::Result<()> {
        let db = setup_test_db().await;
        setup_chunks(&db, 3).await?;

        // a single chunk costs 1_000.5 gas once multiplied, which truncates to the limit.
        let config = BatchProposerConfig {
            max_chunks_per_batch: 5,
            max_l1_commit_gas_per_batch: 1_000,
            gas_cost_increase_multiplier: 1.0005,
            ..Default::default()
        };
        let assembler =
            BatchAssembler::new(config, ForkConfig::default(), FixedGasEstimator(1_000), CodecV1);

        let proposed =
            assembler.propose_batch(&db, 1_000).await?.into_proposed().expect("batch proposed");
        assert_eq!(proposed.trigger, CutTrigger::ResourceLimit);
        assert_eq!((proposed.start_chunk_index, proposed.end_chunk_index), (1, 1));
        assert_eq!(proposed.metrics.l1_commit_gas, 1_000);

        Ok(())
    }

    #[tokio::test]
    async fn test_blob_batch_is_capped_at_max_chunks() -> eyre::Result<()> {
        let db = setup_test_db().await;
        setup_chunks(&db, 20).await?;

        let config = BatchProposerConfig { max_chunks_per_batch: 45, ..Default::default() };
        let assembler = BatchAssembler::new(
            config,
            ForkConfig::new([], Some(1)),
            FixedGasEstimator(0),
            CodecV1,
        );

        let proposed =
            assembler.propose_batch(&db, 1_000).await?.into_proposed().expect("batch proposed");
        assert_eq!(proposed.trigger, CutTrigger::ChunkCount);
        assert_eq!(proposed.codec, Codec::V1);
        assert_eq!(proposed.metrics.num_chunks, MAX_NUM_CHUNKS_V1 as u64);
        assert_eq!(proposed.end_chunk_index, MAX_NUM_CHUNKS_V1 as u64);

        Ok(())
    }

    #[tokio::test]
    async fn test_no_chunks() -> eyre::Result<()> {
        let db = setup_test_db().await;
        insert_genesis_batch(&db, L2Block::default()).await?;

        let assembler = BatchAssembler::new(
            BatchProposerConfig::default(),
            ForkConfig::default(),
            FixedGasEstimator(0),
            CodecV1,
        );
        let proposal = assembler.propose_batch(&db, u64::MAX).await?;
        assert_eq!(proposal, BatchProposal::NoUnbatchedChunks);

        Ok(())
    }
}
