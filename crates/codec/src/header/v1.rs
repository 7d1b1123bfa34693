use alloy_primitives::{bytes::BufMut, keccak256, B256};

/// The batch header for V1.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct BatchHeaderV1 {
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
    /// The blob versioned hash for the batch.
    pub blob_versioned_hash: B256,
    /// The parent batch hash.
    pub parent_batch_hash: B256,
    /// A bitmap to indicate which L1 messages are skipped in the batch.
    pub skipped_l1_message_bitmap: Vec<u8>,
}

impl BatchHeaderV1 {
    /// The length in bytes of the header without the skipped L1 message bitmap.
    pub const BYTES_LENGTH: usize = 121;

    /// Returns a new instance [`BatchHeaderV1`].
    #[allow(clippy::too_many_arguments)]
    pub const fn new(
        version: u8,
        batch_index: u64,
        l1_message_popped: u64,
        total_l1_message_popped: u64,
        data_hash: B256,
        blob_versioned_hash: B256,
        parent_batch_hash: B256,
        skipped_l1_message_bitmap: Vec<u8>,
    ) -> Self {
        Self {
            version,
            batch_index,
            l1_message_popped,
            total_l1_message_popped,
            data_hash,
            blob_versioned_hash,
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
        bytes.put_slice(&self.blob_versioned_hash.0);
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
    use super::BatchHeaderV1;
    use alloy_primitives::b256;

    #[test]
    fn test_should_hash_header() {
        // <https://etherscan.io/tx/0x27d73eef6f0de411f8db966f0def9f28c312a0ae5cfb1ac09ec23f8fa18b005b>
        let header = BatchHeaderV1::new(
            1,
            206594,
            0,
            815396,
            b256!("e58ee8f9c15196600f9e618806bc835d1fdc35fe2467ed71adcf1a7c47d4e7eb"),
            b256!("014edb613b68d298710004d463b92eed58aab3af7386b8f32127af53b33fc9be"),
            b256!("a1aece1f54b8a429b121d61619b49f5c9da3b83d924c21c418160531e1319658"),
            vec![],
        );

        let expected = b256!("46B1C269784F1FC6CC12A04A65496D2D2B24D77EF582E893A510A963D09F4661");
        assert_eq!(header.hash_slow(), expected);
    }

    #[test]
    fn test_encode_allocates_exact_length() {
        let header = BatchHeaderV1 {
            skipped_l1_message_bitmap: vec![0xff; 64],
            ..Default::default()
        };

        let bytes = header.encode();
        assert_eq!(bytes.len(), BatchHeaderV1::BYTES_LENGTH + 64);
        assert_eq!(bytes.capacity(), bytes.len());
    }
}
