use alloy_primitives::{bytes::BufMut, keccak256, B256};

/// The batch header for V0.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct BatchHeaderV0 {
    /// The batch version.
    pub version: u8,
    /// The index of the batch.
    pub batch_index: u64,
    /// Number of L1 messages popped in the batch.
    pub l1_message_popped: u64,
    /// Number of total L1 messages popped after the batch.
    pub total_l1_message_popped: u64,
    /// The data hash of the batch.
    pub data_hash: B256,
    /// The parent batch hash.
    pub parent_batch_hash: B256,
    /// A bitmap to indicate which L1 messages are skipped in the batch.
    pub skipped_l1_message_bitmap: Vec<u8>,
}

impl BatchHeaderV0 {
    /// The length in bytes of the header without the skipped L1 message bitmap.
    pub const BYTES_LENGTH: usize = 89;

    /// Returns a new instance [`BatchHeaderV0`].
    pub const fn new(
        version: u8,
        batch_index: u64,
        l1_message_popped: u64,
        total_l1_message_popped: u64,
        data_hash: B256,
        parent_batch_hash: B256,
        skipped_l1_message_bitmap: Vec<u8>,
    ) -> Self {
        Self {
            version,
            batch_index,
            l1_message_popped,
            total_l1_message_popped,
            data_hash,
            parent_batch_hash,
            skipped_l1_message_bitmap,
        }
    }

    /// Encodes the header into bytes.
    pub fn encode(&self) -> Vec<u8> {
        let mut bytes =
            Vec::<u8>::with_capacity(Self::BYTES_LENGTH + self.skipped_l1_message_bitmap.len());
        bytes.put_u8(self.version);
        bytes.put_u64(self.batch_index);
        bytes.put_u64(self.l1_message_popped);
        bytes.put_u64(self.total_l1_message_popped);
        bytes.put_slice(&self.data_hash.0);
        bytes.put_slice(&self.parent_batch_hash.0);
        bytes.put_slice(&self.skipped_l1_message_bitmap);
        bytes
    }

    /// Computes the hash for the header.
    pub fn hash_slow(&self) -> B256 {
        keccak256(self.encode())
    }
}

#[cfg(test)]
mod tests {
    use super::BatchHeaderV0;
    use alloy_primitives::b256;

    #[test]
    fn test_should_hash_header() {
        // <https://etherscan.io/tx/0x2c7bb77d6086befd9bdcf936479fd246d1065cbd2c6aff55b1d39a67aff965c1>
        let header = BatchHeaderV0::new(
            0,
            9,
            1,
            33,
            b256!("2aa3eeb5adebb96a49736583c744b89b0b3be45056e8e178106a42ab2cd1a063"),
            b256!("c0173d7e3561501cf57913763c7c34716216092a222a99fe8b85dcb466730f56"),
            vec![0; 32],
        );

        assert_eq!(header.encode().len(), BatchHeaderV0::BYTES_LENGTH + 32);
        let expected = b256!("A7F7C528E1827D3E64E406C76DE6C750D5FC3DE3DE4386E6C69958A89461D064");
        assert_eq!(header.hash_slow(), expected);
    }

    #[test]
    fn test_encode_allocates_exact_length() {
        let header = BatchHeaderV0 {
            skipped_l1_message_bitmap: vec![0xff; 64],
            ..Default::default()
        };

        let bytes = header.encode();
        assert_eq!(bytes.len(), BatchHeaderV0::BYTES_LENGTH + 64);
        assert_eq!(bytes.capacity(), bytes.len());
    }
}
