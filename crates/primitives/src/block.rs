use alloy_primitives::{Bytes, B256, U256};

/// The block's context.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BlockContext {
    /// The block number.
    pub number: u64,
    /// The block timestamp.
    pub timestamp: u64,
    /// The block base fee.
    pub base_fee: U256,
    /// The block gas limit.
    pub gas_limit: u64,
    /// The block's transaction count, L1 messages included.
    pub num_transactions: u16,
    /// The block's l1 message count.
    pub num_l1_messages: u16,
}

/// A L2 block, as read from the database by the batch proposer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct L2Block {
    /// The block hash.
    pub hash: B256,
    /// The RLP-encoded L2 transactions of the block. L1 messages are not part of the list and are
    /// only accounted for in [`BlockContext::num_l1_messages`].
    pub transactions: Vec<Bytes>,
    /// The context for the block.
    pub context: BlockContext,
}

impl L2Block {
    /// Returns a new instance of a [`L2Block`].
    pub const fn new(hash: B256, transactions: Vec<Bytes>, context: BlockContext) -> Self {
        Self { hash, transactions, context }
    }

    /// Returns the block number.
    pub const fn number(&self) -> u64 {
        self.context.number
    }

    /// Returns the block timestamp.
    pub const fn timestamp(&self) -> u64 {
        self.context.timestamp
    }

    /// Returns the number of L1 messages included in the block.
    pub const fn num_l1_messages(&self) -> u64 {
        self.context.num_l1_messages as u64
    }
}
