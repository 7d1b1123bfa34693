//! Database migrations for the batch proposer tables.

// `MigrationTrait` methods take an elided `&SchemaManager`; naming the lifetime
// makes it early-bound and no longer matches the trait signature.
#![allow(elided_lifetimes_in_paths)]

pub use sea_orm_migration::prelude::*;

mod m20250101_000001_create_l2_block_table;
mod m20250101_000002_create_chunk_table;
mod m20250101_000003_create_batch_table;
mod m20250101_000004_add_table_indexes;

/// The migrator for the batch proposer database.
#[derive(Debug)]
pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250101_000001_create_l2_block_table::Migration),
            Box::new(m20250101_000002_create_chunk_table::Migration),
            Box::new(m20250101_000003_create_batch_table::Migration),
            Box::new(m20250101_000004_add_table_indexes::Migration),
        ]
    }
}

/// The length in bytes of a hash column.
pub(crate) const HASH_LENGTH: u32 = 32;
