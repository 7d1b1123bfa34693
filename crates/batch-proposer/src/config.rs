use crate::fork::ForkConfig;

/// The default maximum number of chunks in a batch.
pub const DEFAULT_MAX_CHUNKS_PER_BATCH: u64 = 45;

/// The default maximum L1 commit gas of a batch.
pub const DEFAULT_MAX_L1_COMMIT_GAS_PER_BATCH: u64 = 5_000_000;

/// The default maximum L1 commit calldata size of a batch.
pub const DEFAULT_MAX_L1_COMMIT_CALLDATA_SIZE_PER_BATCH: u64 = 110_000;

/// The default duration in seconds after which a batch is proposed regardless of its size.
pub const DEFAULT_BATCH_TIMEOUT_SEC: u64 = 300;

/// The default multiplier applied to the estimated L1 commit gas.
pub const DEFAULT_GAS_COST_INCREASE_MULTIPLIER: f64 = 1.2;

/// Configuration for the batch proposer.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchProposerConfig {
    /// The maximum number of chunks in a batch.
    pub max_chunks_per_batch: u64,
    /// The maximum L1 commit gas of a batch.
    pub max_l1_commit_gas_per_batch: u64,
    /// The maximum L1 commit calldata size of a batch.
    pub max_l1_commit_calldata_size_per_batch: u64,
    /// The duration in seconds after which a batch is proposed regardless of its size, counted
    /// from the timestamp of its first block.
    pub batch_timeout_sec: u64,
    /// The safety multiplier applied to the estimated L1 commit gas before checking it against
    /// the limit.
    pub gas_cost_increase_multiplier: f64,
}

impl BatchProposerConfig {
    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_chunks_per_batch == 0 {
            return Err(ConfigError::ZeroMaxChunksPerBatch)
        }
        if !self.gas_cost_increase_multiplier.is_finite() || self.gas_cost_increase_multiplier < 1.0
        {
            return Err(ConfigError::InvalidGasCostIncreaseMultiplier(
                self.gas_cost_increase_multiplier,
            ))
        }
        Ok(())
    }
}

impl Default for BatchProposerConfig {
    fn default() -> Self {
        Self {
            max_chunks_per_batch: DEFAULT_MAX_CHUNKS_PER_BATCH,
            max_l1_commit_gas_per_batch: DEFAULT_MAX_L1_COMMIT_GAS_PER_BATCH,
            max_l1_commit_calldata_size_per_batch: DEFAULT_MAX_L1_COMMIT_CALLDATA_SIZE_PER_BATCH,
            batch_timeout_sec: DEFAULT_BATCH_TIMEOUT_SEC,
            gas_cost_increase_multiplier: DEFAULT_GAS_COST_INCREASE_MULTIPLIER,
        }
    }
}

/// An invalid batch proposer configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The maximum number of chunks per batch is zero.
    #[error("max chunks per batch must be non-zero")]
    ZeroMaxChunksPerBatch,
    /// The gas cost multiplier is not a finite number greater than or equal to one.
    #[error("gas cost increase multiplier must be finite and >= 1.0, got {0}")]
    InvalidGasCostIncreaseMultiplier(f64),
}

/// The batch proposer arguments.
#[derive(Debug, Clone, clap::Args)]
pub struct BatchProposerArgs {
    /// The maximum number of chunks in a batch.
    #[arg(long = "batch-proposer.max-chunks-per-batch", id = "batch_proposer_max_chunks_per_batch", value_name = "BATCH_PROPOSER_MAX_CHUNKS_PER_BATCH", default_value_t = DEFAULT_MAX_CHUNKS_PER_BATCH)]
    pub max_chunks_per_batch: u64,
    /// The maximum L1 commit gas of a batch.
    #[arg(long = "batch-proposer.max-l1-commit-gas-per-batch", id = "batch_proposer_max_l1_commit_gas_per_batch", value_name = "BATCH_PROPOSER_MAX_L1_COMMIT_GAS_PER_BATCH", default_value_t = DEFAULT_MAX_L1_COMMIT_GAS_PER_BATCH)]
    pub max_l1_commit_gas_per_batch: u64,
    /// The maximum L1 commit calldata size of a batch.
    #[arg(long = "batch-proposer.max-l1-commit-calldata-size-per-batch", id = "batch_proposer_max_l1_commit_calldata_size_per_batch", value_name = "BATCH_PROPOSER_MAX_L1_COMMIT_CALLDATA_SIZE_PER_BATCH", default_value_t = DEFAULT_MAX_L1_COMMIT_CALLDATA_SIZE_PER_BATCH)]
    pub max_l1_commit_calldata_size_per_batch: u64,
    /// The duration in seconds after which a batch is proposed regardless of its size.
    #[arg(long = "batch-proposer.batch-timeout-sec", id = "batch_proposer_batch_timeout_sec", value_name = "BATCH_PROPOSER_BATCH_TIMEOUT_SEC", default_value_t = DEFAULT_BATCH_TIMEOUT_SEC)]
    pub batch_timeout_sec: u64,
    /// The multiplier applied to the estimated L1 commit gas.
    #[arg(long = "batch-proposer.gas-cost-increase-multiplier", id = "batch_proposer_gas_cost_increase_multiplier", value_name = "BATCH_PROPOSER_GAS_COST_INCREASE_MULTIPLIER", default_value_t = DEFAULT_GAS_COST_INCREASE_MULTIPLIER)]
    pub gas_cost_increase_multiplier: f64,
    /// The activation heights of the protocol forks, comma separated.
    #[arg(
        long = "batch-proposer.fork-heights",
        id = "batch_proposer_fork_heights",
        value_name = "BATCH_PROPOSER_FORK_HEIGHTS",
        value_delimiter = ','
    )]
    pub fork_heights: Vec<u64>,
    /// The height from which batches are committed using blobs.
    #[arg(long = "batch-proposer.blob-cutover-height", id = "batch_proposer_blob_cutover_height", value_name = "BATCH_PROPOSER_BLOB_CUTOVER_HEIGHT")]
    pub blob_cutover_height: Option<u64>,
}

impl BatchProposerArgs {
    /// Returns the validated [`BatchProposerConfig`].
    pub fn config(&self) -> Result<BatchProposerConfig, ConfigError> {
        let config = BatchProposerConfig {
            max_chunks_per_batch: self.max_chunks_per_batch,
            max_l1_commit_gas_per_batch: self.max_l1_commit_gas_per_batch,
            max_l1_commit_calldata_size_per_batch: self.max_l1_commit_calldata_size_per_batch,
            batch_timeout_sec: self.batch_timeout_sec,
            gas_cost_increase_multiplier: self.gas_cost_increase_multiplier,
        };
        config.validate()?;
        Ok(config)
    }

    /// Returns the [`ForkConfig`].
    pub fn fork_config(&self) -> ForkConfig {
        ForkConfig::new(self.fork_heights.iter().copied(), self.blob_cutover_height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Debug, Parser)]
    struct Cli {
        #[command(flatten)]
        args: BatchProposerArgs,
    }

    #[test]
    fn test_default_args() -> eyre::Result<()> {
        let cli = Cli::try_parse_from(["proposer"])?;
        assert_eq!(cli.args.config()?, BatchProposerConfig::default());
        assert_eq!(cli.args.fork_config(), ForkConfig::default());
        Ok(())
    }

    #[test]
    fn test_parse_args() -> eyre::Result<()> {
        let cli = Cli::try_parse_from([
            "proposer",
            "--batch-proposer.max-chunks-per-batch",
            "15",
            "--batch-proposer.gas-cost-increase-multiplier",
            "1.5",
            "--batch-proposer.fork-heights",
            "200,100",
            "--batch-proposer.blob-cutover-height",
            "150",
        ])?;
        let config = cli.args.config()?;
        assert_eq!(config.max_chunks_per_batch, 15);
        assert_eq!(config.gas_cost_increase_multiplier, 1.5);
        assert_eq!(cli.args.fork_config().sorted_heights(), &[100, 150, 200]);
        assert_eq!(cli.args.fork_config().blob_cutover(), Some(150));
        Ok(())
    }

    #[test]
    fn test_invalid_config() {
        let config = BatchProposerConfig { max_chunks_per_batch: 0, ..Default::default() };
        assert!(matches!(config.validate(), Err(ConfigError::ZeroMaxChunksPerBatch)));

        for multiplier in [0.9, f64::NAN, f64::INFINITY] {
            let config = BatchProposerConfig {
                gas_cost_increase_multiplier: multiplier,
                ..Default::default()
            };
            assert!(matches!(
                config.validate(),
                Err(ConfigError::InvalidGasCostIncreaseMultiplier(_))
            ));
        }
    }
}
