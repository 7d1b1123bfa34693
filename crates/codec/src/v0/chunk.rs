use super::BlockContextV0;
use crate::{
    constants::{
        CALLDATA_NON_ZERO_BYTE_GAS, COLD_SLOAD_GAS, KECCAK_256_DIGEST_BYTES_SIZE,
        WARM_ADDRESS_ACCESS_GAS,
    },
    error::EncodingError,
    gas::{keccak256_gas, memory_expansion_cost},
};
use rollup_node_primitives::{Chunk, L2Block};

use alloy_primitives::{bytes::BufMut, keccak256, B256};

/// The number of bytes used to prefix each L2 transaction with its length.
const TRANSACTION_LENGTH_PREFIX_BYTES: u64 = 4;

/// The size of the call data of a `L1MessageQueue.getCrossDomainMessage` call.
const L1_MESSAGE_QUEUE_CALL_BYTES: u64 = 36;

/// Checks that the chunk can be encoded.
pub(crate) fn validate_chunk(chunk: &Chunk) -> Result<(), EncodingError> {
    if chunk.blocks.is_empty() {
        return Err(EncodingError::EmptyChunk)
    }
    if chunk.blocks.len() > u8::MAX as usize {
        return Err(EncodingError::TooManyBlocks(chunk.blocks.len()))
    }
    for tx in chunk.blocks.iter().flat_map(|b| b.transactions.iter()) {
        if u32::try_from(tx.len()).is_err() {
            return Err(EncodingError::TransactionTooLarge(tx.len()))
        }
    }
    Ok(())
}

/// Encodes the chunk as `num_blocks | block_contexts | (tx_length | tx)*`.
pub(crate) fn encode_chunk(chunk: &Chunk) -> Result<Vec<u8>, EncodingError> {
    validate_chunk(chunk)?;

    let mut bytes = Vec::with_capacity(chunk_calldata_size(chunk) as usize);
    bytes.put_u8(chunk.blocks.len() as u8);
    for block in &chunk.blocks {
        BlockContextV0::from(&block.context).encode(&mut bytes);
    }
    for tx in chunk.blocks.iter().flat_map(|b| b.transactions.iter()) {
        bytes.put_u32(tx.len() as u32);
        bytes.put_slice(tx);
    }

    Ok(bytes)
}

/// Returns the size of the encoded chunk without encoding it.
pub(crate) fn chunk_calldata_size(chunk: &Chunk) -> u64 {
    let transactions: u64 = chunk
        .blocks
        .iter()
        .flat_map(|b| b.transactions.iter())
        .map(|tx| TRANSACTION_LENGTH_PREFIX_BYTES + tx.len() as u64)
        .sum();
    1 + (BlockContextV0::BYTES_LENGTH * chunk.blocks.len()) as u64 + transactions
}

/// Computes the data hash of the chunk, which commits to the block contexts and the L2
/// transaction hashes.
pub(crate) fn chunk_data_hash(chunk: &Chunk) -> B256 {
    let num_transactions = chunk.num_l2_transactions();
    let mut bytes = Vec::with_capacity(
        BlockContextV0::HASHED_BYTES_LENGTH * chunk.blocks.len() +
            KECCAK_256_DIGEST_BYTES_SIZE * num_transactions,
    );
    for block in &chunk.blocks {
        let context = BlockContextV0::from(&block.context).to_bytes();
        bytes.put_slice(&context[..BlockContextV0::HASHED_BYTES_LENGTH]);
    }
    for tx in chunk.blocks.iter().flat_map(|b| b.transactions.iter()) {
        bytes.put_slice(keccak256(tx).as_slice());
    }
    keccak256(bytes)
}

/// Estimates the L1 commit gas of the block.
fn block_l1_commit_gas(block: &L2Block) -> u64 {
    let mut total = 0;
    for tx in &block.transactions {
        let size = tx.len() as u64;
        total += CALLDATA_NON_ZERO_BYTE_GAS * size;
        total += CALLDATA_NON_ZERO_BYTE_GAS * TRANSACTION_LENGTH_PREFIX_BYTES;
        total += keccak256_gas(size);
    }

    total += CALLDATA_NON_ZERO_BYTE_GAS * BlockContextV0::BYTES_LENGTH as u64;

    // each L1 message is loaded from the message queue: cold sload, a static call and a warm
    // address access, plus the memory for the call data.
    let l1_messages = block.num_l1_messages();
    total += COLD_SLOAD_GAS * l1_messages;
    total += 2 * WARM_ADDRESS_ACCESS_GAS * l1_messages;
    total += memory_expansion_cost(L1_MESSAGE_QUEUE_CALL_BYTES) * l1_messages;

    total
}

/// Estimates the L1 commit gas of the chunk.
pub(crate) fn chunk_l1_commit_gas(chunk: &Chunk) -> u64 {
    let mut total: u64 = chunk.blocks.iter().map(block_l1_commit_gas).sum();

    // the block count.
    total += CALLDATA_NON_ZERO_BYTE_GAS;

    // the chunk data hash.
    let num_transactions: u64 =
        chunk.blocks.iter().map(|b| b.context.num_transactions as u64).sum();
    total += keccak256_gas(
        (BlockContextV0::HASHED_BYTES_LENGTH * chunk.blocks.len()) as u64 +
            KECCAK_256_DIGEST_BYTES_SIZE as u64 * num_transactions,
    );

    total
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::Bytes;
    use rollup_node_primitives::BlockContext;

    fn block(number: u64, transactions: Vec<Bytes>, num_l1_messages: u16) -> L2Block {
        L2Block::new(
            B256::ZERO,
            transactions.clone(),
            BlockContext {
                number,
                timestamp: number,
                num_transactions: transactions.len() as u16 + num_l1_messages,
                num_l1_messages,
                ..Default::default()
            },
        )
    }

    #[test]
    fn test_calldata_size_matches_encoding() -> eyre::Result<()> {
        let chunk = Chunk::new(vec![
            block(1, vec![Bytes::from(vec![1u8; 100]), Bytes::from(vec![2u8; 7])], 0),
            block(2, vec![], 3),
            block(3, vec![Bytes::from(vec![3u8; 55])], 1),
        ]);

        let encoded = encode_chunk(&chunk)?;
        assert_eq!(encoded.len() as u64, chunk_calldata_size(&chunk));
        assert_eq!(chunk_calldata_size(&chunk), 1 + 3 * 60 + (4 + 100) + (4 + 7) + (4 + 55));
        assert_eq!(encoded[0], 3);

        Ok(())
    }

    #[test]
    fn test_should_reject_empty_chunk() {
        let res = encode_chunk(&Chunk::default());
        assert!(matches!(res, Err(EncodingError::EmptyChunk)));
    }

    #[test]
    fn test_l1_messages_increase_gas() {
        let without = Chunk::new(vec![block(1, vec![Bytes::from(vec![1u8; 10])], 0)]);
        let with = Chunk::new(vec![block(1, vec![Bytes::from(vec![1u8; 10])], 2)]);

        let expected_l1_message_cost =
            2 * (COLD_SLOAD_GAS + 2 * WARM_ADDRESS_ACCESS_GAS + memory_expansion_cost(36));
        let hash_cost_delta =
            keccak256_gas(58 + 3 * 32) - keccak256_gas(58 + 32);
        assert_eq!(
            chunk_l1_commit_gas(&with) - chunk_l1_commit_gas(&without),
            expected_l1_message_cost + hash_cost_delta
        );
    }

    #[test]
    fn test_data_hash_commits_to_transactions() {
        let a = Chunk::new(vec![block(1, vec![Bytes::from(vec![1u8; 10])], 0)]);
        let b = Chunk::new(vec![block(1, vec![Bytes::from(vec![2u8; 10])], 0)]);
        assert_ne!(chunk_data_hash(&a), chunk_data_hash(&b));
        assert_eq!(chunk_data_hash(&a), chunk_data_hash(&a.clone()));
    }
}
