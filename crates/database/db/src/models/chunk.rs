use alloy_primitives::B256;
use rollup_node_primitives::ChunkInfo;
use sea_orm::{entity::prelude::*, ActiveValue};

/// A database model that represents a chunk.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "chunk")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    index: i64,
    start_block_number: i64,
    end_block_number: i64,
    start_block_time: i64,
    batch_hash: Option<Vec<u8>>,
}

/// The relation for the chunk model.
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// A relation with the batch table, where column batch hash of the chunk table belongs to the
    /// column hash of the batch table.
    #[sea_orm(
        belongs_to = "super::batch::Entity",
        from = "Column::BatchHash",
        to = "super::batch::Column::Hash"
    )]
    Batch,
}

impl Related<super::batch::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Batch.def()
    }
}

/// The active model behavior for the chunk model.
impl ActiveModelBehavior for ActiveModel {}

impl From<ChunkInfo> for ActiveModel {
    fn from(chunk: ChunkInfo) -> Self {
        Self {
            index: ActiveValue::Set(chunk.index as i64),
            start_block_number: ActiveValue::Set(chunk.start_block_number as i64),
            end_block_number: ActiveValue::Set(chunk.end_block_number as i64),
            start_block_time: ActiveValue::Set(chunk.start_block_time as i64),
            batch_hash: ActiveValue::Set(chunk.batch_hash.map(|h| h.to_vec())),
        }
    }
}

impl From<Model> for ChunkInfo {
    fn from(value: Model) -> Self {
        Self {
            index: value.index as u64,
            start_block_number: value.start_block_number as u64,
            end_block_number: value.end_block_number as u64,
            start_block_time: value.start_block_time as u64,
            batch_hash: value.batch_hash.map(|h| B256::from_slice(&h)),
        }
    }
}
