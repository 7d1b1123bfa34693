//! This library contains the batch proposer, which packs the chunks produced upstream into
//! batches sized to fit a single L1 commitment.

use std::{
    sync::Arc,
    time::{SystemTime, UNIX_EPOCH},
};

use rollup_node_primitives::BatchCommitRecord;
use scroll_codec::{BlobCostEstimator, CodecV0, CodecV1, LegacyCostEstimator};
use scroll_db::Database;

mod assembler;
pub use assembler::{BatchAssembler, BatchProposal, CutTrigger, ProposedBatch};

mod builder;
pub use builder::CandidateBatch;

mod config;
pub use config::{
    BatchProposerArgs, BatchProposerConfig, ConfigError, DEFAULT_BATCH_TIMEOUT_SEC,
    DEFAULT_GAS_COST_INCREASE_MULTIPLIER, DEFAULT_MAX_CHUNKS_PER_BATCH,
    DEFAULT_MAX_L1_COMMIT_CALLDATA_SIZE_PER_BATCH, DEFAULT_MAX_L1_COMMIT_GAS_PER_BATCH,
};

mod cost;
pub use cost::{BatchMetrics, CostModels};

mod error;
pub use error::BatchProposerError;

mod fork;
pub use fork::{CostModelVersion, ForkConfig};

mod genesis;
pub use genesis::insert_genesis_batch;

mod metrics;
pub use metrics::BatchProposerMetrics;

mod persistence;
pub use persistence::commit_batch;

/// The batch proposer.
///
/// Each call to [`BatchProposer::try_propose_batch`] runs one proposal cycle: it assembles the
/// next batch from the unbatched chunks and persists it. Cycles must not run concurrently; the
/// caller is responsible for scheduling them.
#[derive(Debug)]
pub struct BatchProposer<L = CodecV0, B = CodecV1> {
    /// A reference to the database.
    database: Arc<Database>,
    /// The batch assembler.
    assembler: BatchAssembler<L, B>,
    /// The batch proposer metrics.
    metrics: BatchProposerMetrics,
}

impl BatchProposer {
    /// Creates a new batch proposer using the scroll codecs to estimate the batch costs.
    pub fn new(
        database: Arc<Database>,
        config: BatchProposerConfig,
        fork_config: ForkConfig,
    ) -> Result<Self, BatchProposerError> {
        Self::with_cost_estimators(database, config, fork_config, CodecV0, CodecV1)
    }
}

impl<L, B> BatchProposer<L, B>
where
    L: LegacyCostEstimator,
    B: BlobCostEstimator,
{
    /// Creates a new batch proposer with the provided cost estimators.
    pub fn with_cost_estimators(
        database: Arc<Database>,
        config: BatchProposerConfig,
        fork_config: ForkConfig,
        legacy: L,
        blob: B,
    ) -> Result<Self, BatchProposerError> {
        config.validate()?;
        tracing::debug!(
            target: "scroll::batch_proposer",
            max_chunks_per_batch = config.max_chunks_per_batch,
            max_l1_commit_gas_per_batch = config.max_l1_commit_gas_per_batch,
            max_l1_commit_calldata_size_per_batch = config.max_l1_commit_calldata_size_per_batch,
            batch_timeout_sec = config.batch_timeout_sec,
            gas_cost_increase_multiplier = config.gas_cost_increase_multiplier,
            fork_heights = ?fork_config.sorted_heights(),
            blob_cutover = ?fork_config.blob_cutover(),
            "Creating batch proposer."
        );

        Ok(Self {
            database,
            assembler: BatchAssembler::new(config, fork_config, legacy, blob),
            metrics: BatchProposerMetrics::default(),
        })
    }

    /// Returns the batch assembler.
    pub const fn assembler(&self) -> &BatchAssembler<L, B> {
        &self.assembler
    }

    /// Runs one proposal cycle at the current time.
    pub async fn try_propose_batch(&self) -> Result<Option<BatchCommitRecord>, BatchProposerError> {
        let now =
            SystemTime::now().duration_since(UNIX_EPOCH).expect("Time can't go backwards").as_secs();
        self.try_propose_batch_at(now).await
    }

    /// Runs one proposal cycle, using `now` (seconds since the epoch) to evaluate the batch
    /// timeout.
    ///
    /// Returns the persisted batch, or [`None`] if there are not enough chunks to propose one.
    pub async fn try_propose_batch_at(
        &self,
        now: u64,
    ) -> Result<Option<BatchCommitRecord>, BatchProposerError> {
        self.metrics.cycles.increment(1);

        let proposed = match self.assembler.propose_batch(self.database.as_ref(), now).await {
            Ok(BatchProposal::Proposed(proposed)) => proposed,
            Ok(BatchProposal::NotEnoughChunks) => {
                self.metrics.chunks_not_enough.increment(1);
                return Ok(None)
            }
            Ok(BatchProposal::NoUnbatchedChunks) => return Ok(None),
            Err(err) => {
                tracing::error!(target: "scroll::batch_proposer", %err, "Failed to propose batch.");
                self.metrics.failures.increment(1);
                return Err(err)
            }
        };

        if proposed.trigger == CutTrigger::Timeout {
            self.metrics.first_block_timeout_reached.increment(1);
        }
        self.metrics.record_batch_metrics(&proposed.metrics);

        self.metrics.update_info.increment(1);
        commit_batch(&self.database, &proposed).await.map(Some).inspect_err(|_| {
            self.metrics.update_info_failures.increment(1);
        })
    }
}
