use crate::cost::BatchMetrics;

use metrics::{Counter, Gauge};
use metrics_derive::Metrics;

/// The metrics for the [`super::BatchProposer`].
#[derive(Metrics, Clone)]
#[metrics(scope = "batch_proposer")]
pub struct BatchProposerMetrics {
    /// The number of proposal cycles run.
    pub cycles: Counter,
    /// The number of proposal cycles which failed to assemble a batch.
    pub failures: Counter,
    /// The number of attempts to persist a batch.
    pub update_info: Counter,
    /// The number of failed attempts to persist a batch.
    pub update_info_failures: Counter,
    /// The number of batches proposed because the first block reached the timeout.
    pub first_block_timeout_reached: Counter,
    /// The number of proposal cycles whose unbatched chunks were not enough to propose a batch.
    pub chunks_not_enough: Counter,
    /// The estimated L1 commit gas of the last proposed batch.
    pub total_l1_commit_gas: Gauge,
    /// The estimated L1 commit calldata size of the last proposed batch.
    pub total_l1_commit_calldata_size: Gauge,
    /// The estimated L1 commit blob size of the last proposed batch.
    pub total_l1_commit_blob_size: Gauge,
    /// The number of chunks in the last proposed batch.
    pub chunks_number: Gauge,
}

impl BatchProposerMetrics {
    /// Records the shape of a proposed batch.
    pub fn record_batch_metrics(&self, metrics: &BatchMetrics) {
        self.total_l1_commit_gas.set(metrics.l1_commit_gas as f64);
        self.total_l1_commit_calldata_size.set(metrics.l1_commit_calldata_size as f64);
        self.total_l1_commit_blob_size.set(metrics.l1_commit_blob_size as f64);
        self.chunks_number.set(metrics.num_chunks as f64);
    }
}
