use crate::HASH_LENGTH;
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub(crate) struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Chunk::Table)
                    .if_not_exists()
                    .col(pk_auto(Chunk::Index))
                    .col(big_unsigned(Chunk::StartBlockNumber))
                    .col(big_unsigned(Chunk::EndBlockNumber))
                    .col(big_unsigned(Chunk::StartBlockTime))
                    .col(binary_len_null(Chunk::BatchHash, HASH_LENGTH))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Chunk::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
pub(crate) enum Chunk {
    Table,
    Index,
    StartBlockNumber,
    EndBlockNumber,
    StartBlockTime,
    BatchHash,
}
