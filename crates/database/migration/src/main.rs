//! Command line entry point applying the `l2_block`, `chunk` and `batch` schema migrations.

use sea_orm_migration::prelude::*;

#[tokio::main]
async fn main() {
    tracing::info!(target: "scroll::migration", "Migrating the batch proposer schema.");
    cli::run_cli(scroll_migration::Migrator).await;
    tracing::info!(target: "scroll::migration", "Batch proposer schema up to date.");
}
