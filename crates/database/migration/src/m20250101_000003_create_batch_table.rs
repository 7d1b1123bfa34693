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
                    .table(Batch::Table)
                    .if_not_exists()
                    .col(pk_auto(Batch::Index))
                    .col(binary_len(Batch::Hash, HASH_LENGTH))
                    .col(big_unsigned(Batch::StartChunkIndex))
                    .col(big_unsigned(Batch::EndChunkIndex))
                    .col(integer(Batch::CodecVersion))
                    .col(binary(Batch::BatchHeader))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Batch::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
pub(crate) enum Batch {
    Table,
    Index,
    Hash,
    StartChunkIndex,
    EndChunkIndex,
    CodecVersion,
    BatchHeader,
}
