use super::{
    m20250101_000002_create_chunk_table::Chunk, m20250101_000003_create_batch_table::Batch,
};
use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub(crate) struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // A batch hash identifies a single batch.
        manager
            .create_index(
                Index::create()
                    .name("idx_batch_hash")
                    .col(Batch::Hash)
                    .table(Batch::Table)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // Create indexes for the `chunk` table.
        manager
            .create_index(
                Index::create()
                    .name("idx_chunk_batch_hash")
                    .col(Chunk::BatchHash)
                    .table(Chunk::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_chunk_start_block_number")
                    .col(Chunk::StartBlockNumber)
                    .table(Chunk::Table)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_index(Index::drop().name("idx_batch_hash").table(Batch::Table).to_owned()).await?;
        manager
            .drop_index(Index::drop().name("idx_chunk_batch_hash").table(Chunk::Table).to_owned())
            .await?;
        manager
            .drop_index(
                Index::drop().name("idx_chunk_start_block_number").table(Chunk::Table).to_owned(),
            )
            .await?;

        Ok(())
    }
}
