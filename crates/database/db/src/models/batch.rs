use alloy_primitives::B256;
use rollup_node_primitives::BatchCommitRecord;
use sea_orm::{entity::prelude::*, ActiveValue};

/// A database model that represents a proposed batch.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "batch")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    index: i64,
    hash: Vec<u8>,
    start_chunk_index: i64,
    end_chunk_index: i64,
    codec_version: i32,
    batch_header: Vec<u8>,
}

/// The relation for the batch model.
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

/// The active model behavior for the batch model.
impl ActiveModelBehavior for ActiveModel {}

impl From<BatchCommitRecord> for ActiveModel {
    fn from(batch: BatchCommitRecord) -> Self {
        Self {
            index: ActiveValue::Set(batch.index as i64),
            hash: ActiveValue::Set(batch.hash.to_vec()),
            start_chunk_index: ActiveValue::Set(batch.start_chunk_index as i64),
            end_chunk_index: ActiveValue::Set(batch.end_chunk_index as i64),
            codec_version: ActiveValue::Set(batch.codec_version as i32),
            batch_header: ActiveValue::Set(batch.header.to_vec()),
        }
    }
}

impl From<Model> for BatchCommitRecord {
    fn from(value: Model) -> Self {
        Self {
            index: value.index as u64,
            hash: B256::from_slice(&value.hash),
            start_chunk_index: value.start_chunk_index as u64,
            end_chunk_index: value.end_chunk_index as u64,
            codec_version: value.codec_version as u8,
            header: value.batch_header.into(),
        }
    }
}
