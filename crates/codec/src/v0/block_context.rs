use rollup_node_primitives::BlockContext;

use alloy_primitives::{bytes::BufMut, U256};

/// The V0 encoding of a [`BlockContext`].
#[derive(Debug)]
pub(crate) struct BlockContextV0 {
    pub(crate) number: u64,
    pub(crate) timestamp: u64,
    pub(crate) base_fee: U256,
    pub(crate) gas_limit: u64,
    pub(crate) num_transactions: u16,
    pub(crate) num_l1_messages: u16,
}

impl BlockContextV0 {
    pub(crate) const BYTES_LENGTH: usize = 60;

    /// The length of the context committed to in the chunk data hash, which excludes the L1
    /// message count.
    pub(crate) const HASHED_BYTES_LENGTH: usize = 58;

    /// Writes the encoded context into the buffer.
    pub(crate) fn encode(&self, buf: &mut impl BufMut) {
        buf.put_u64(self.number);
        buf.put_u64(self.timestamp);
        buf.put_slice(&self.base_fee.to_be_bytes::<32>());
        buf.put_u64(self.gas_limit);
        buf.put_u16(self.num_transactions);
        buf.put_u16(self.num_l1_messages);
    }

    /// Returns the encoded context.
    pub(crate) fn to_bytes(&self) -> [u8; Self::BYTES_LENGTH] {
        let mut bytes = [0u8; Self::BYTES_LENGTH];
        self.encode(&mut bytes.as_mut_slice());
        bytes
    }
}

impl From<&BlockContext> for BlockContextV0 {
    fn from(value: &BlockContext) -> Self {
        Self {
            number: value.number,
            timestamp: value.timestamp,
            base_fee: value.base_fee,
            gas_limit: value.gas_limit,
            num_transactions: value.num_transactions,
            num_l1_messages: value.num_l1_messages,
        }
    }
}
