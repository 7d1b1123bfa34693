use crate::DatabaseError;

use alloy_primitives::{
    bytes::{Buf, BufMut},
    Bytes, B256, U256,
};
use rollup_node_primitives::{BlockContext, L2Block};
use sea_orm::{entity::prelude::*, ActiveValue};

/// A database model that represents a L2 block.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "l2_block")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    block_number: i64,
    block_hash: Vec<u8>,
    block_timestamp: i64,
    base_fee: Vec<u8>,
    gas_limit: i64,
    num_l1_messages: i32,
    transactions: Vec<u8>,
}

/// The relation for the L2 block model.
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

/// The active model behavior for the L2 block model.
impl ActiveModelBehavior for ActiveModel {}

impl From<L2Block> for ActiveModel {
    fn from(block: L2Block) -> Self {
        Self {
            block_number: ActiveValue::Set(block.context.number as i64),
            block_hash: ActiveValue::Set(block.hash.to_vec()),
            block_timestamp: ActiveValue::Set(block.context.timestamp as i64),
            base_fee: ActiveValue::Set(block.context.base_fee.to_be_bytes_vec()),
            gas_limit: ActiveValue::Set(block.context.gas_limit as i64),
            num_l1_messages: ActiveValue::Set(block.context.num_l1_messages as i32),
            transactions: ActiveValue::Set(encode_transactions(&block.transactions)),
        }
    }
}

impl TryFrom<Model> for L2Block {
    type Error = DatabaseError;

    fn try_from(value: Model) -> Result<Self, Self::Error> {
        let number = value.block_number as u64;
        let transactions = decode_transactions(&value.transactions)
            .ok_or(DatabaseError::InvalidBlockData(number))?;
        let num_l1_messages = value.num_l1_messages as u16;

        Ok(Self {
            hash: B256::from_slice(&value.block_hash),
            context: BlockContext {
                number,
                timestamp: value.block_timestamp as u64,
                base_fee: U256::from_be_slice(&value.base_fee),
                gas_limit: value.gas_limit as u64,
                num_transactions: transactions.len() as u16 + num_l1_messages,
                num_l1_messages,
            },
            transactions,
        })
    }
}

/// Encodes the transactions as a sequence of `length | transaction`.
fn encode_transactions(transactions: &[Bytes]) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(transactions.iter().map(|tx| 4 + tx.len()).sum());
    for tx in transactions {
        bytes.put_u32(tx.len() as u32);
        bytes.put_slice(tx);
    }
    bytes
}

/// Decodes a sequence of `length | transaction`. Returns [`None`] if the buffer is truncated.
fn decode_transactions(mut buf: &[u8]) -> Option<Vec<Bytes>> {
    let mut transactions = Vec::new();
    while buf.has_remaining() {
        if buf.remaining() < 4 {
            return None
        }
        let len = buf.get_u32() as usize;
        if buf.remaining() < len {
            return None
        }
        transactions.push(Bytes::copy_from_slice(&buf[..len]));
        buf.advance(len);
    }
    Some(transactions)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transactions_encoding() {
        let transactions =
            vec![Bytes::from(vec![1u8; 3]), Bytes::new(), Bytes::from(vec![2u8; 5])];
        let encoded = encode_transactions(&transactions);
        assert_eq!(encoded.len(), 3 * 4 + 8);
        assert_eq!(decode_transactions(&encoded), Some(transactions));
    }

    #[test]
    fn test_truncated_transactions() {
        let encoded = encode_transactions(&[Bytes::from(vec![1u8; 3])]);
        assert_eq!(decode_transactions(&encoded[..encoded.len() - 1]), None);
        assert_eq!(decode_transactions(&encoded[..2]), None);
    }
}
