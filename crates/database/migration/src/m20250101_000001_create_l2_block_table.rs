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
                    .table(L2Block::Table)
                    .if_not_exists()
                    .col(pk_auto(L2Block::BlockNumber))
                    .col(binary_len(L2Block::BlockHash, HASH_LENGTH))
                    .col(big_unsigned(L2Block::BlockTimestamp))
                    .col(binary_len(L2Block::BaseFee, 32))
                    .col(big_unsigned(L2Block::GasLimit))
                    .col(integer(L2Block::NumL1Messages))
                    .col(binary(L2Block::Transactions))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(L2Block::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
pub(crate) enum L2Block {
    Table,
    BlockNumber,
    BlockHash,
    BlockTimestamp,
    BaseFee,
    GasLimit,
    NumL1Messages,
    Transactions,
}
