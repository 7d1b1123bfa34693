//! Batch header implementations.

pub use v0::BatchHeaderV0;
mod v0;

pub use v1::BatchHeaderV1;
mod v1;

use crate::{
    error::DecodingError, from_be_bytes_slice_and_advance_buf, from_slice_and_advance_buf,
};

use alloy_primitives::{Bytes, B256};

/// The batch header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BatchHeader {
    /// The batch header for V0.
    V0(BatchHeaderV0),
    /// The batch header for V1.
    V1(BatchHeaderV1),
}

impl BatchHeader {
    /// Returns the version of the header.
    pub const fn version(&self) -> u8 {
        match self {
            Self::V0(header) => header.version,
            Self::V1(header) => header.version,
        }
    }

    /// Returns the index of the batch.
    pub const fn batch_index(&self) -> u64 {
        match self {
            Self::V0(header) => header.batch_index,
            Self::V1(header) => header.batch_index,
        }
    }

    /// Returns the total number of L1 messages popped after the batch.
    pub const fn total_l1_message_popped(&self) -> u64 {
        match self {
            Self::V0(header) => header.total_l1_message_popped,
            Self::V1(header) => header.total_l1_message_popped,
        }
    }

    /// Encodes the header into bytes.
    pub fn encode(&self) -> Bytes {
        let bytes = match self {
            Self::V0(header) => header.encode(),
            Self::V1(header) => header.encode(),
        };
        bytes.into()
    }

    /// Computes the hash for the header.
    pub fn hash_slow(&self) -> B256 {
        match self {
            Self::V0(header) => header.hash_slow(),
            Self::V1(header) => header.hash_slow(),
        }
    }
}

/// The leading fields of a batch header.
///
/// Every header version starts with `version | batch_index | l1_message_popped |
/// total_l1_message_popped | data_hash`. Decoding a stored header of unknown version must only
/// rely on these fields: any later change to their position is a breaking change of the header
/// format.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BatchHeaderPrefix {
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
}

impl BatchHeaderPrefix {
    /// The length in bytes of the prefix.
    pub const BYTES_LENGTH: usize = 57;

    /// Tries to read the prefix from the input buffer, leaving the version specific fields in the
    /// buffer. Returns [`DecodingError::Eof`] if the buffer.len() <
    /// [`BatchHeaderPrefix::BYTES_LENGTH`].
    pub fn try_from_buf(buf: &mut &[u8]) -> Result<Self, DecodingError> {
        if buf.len() < Self::BYTES_LENGTH {
            return Err(DecodingError::Eof)
        }

        let version = from_be_bytes_slice_and_advance_buf!(u8, buf);
        let batch_index = from_be_bytes_slice_and_advance_buf!(u64, buf);
        let l1_message_popped = from_be_bytes_slice_and_advance_buf!(u64, buf);
        let total_l1_message_popped = from_be_bytes_slice_and_advance_buf!(u64, buf);
        let data_hash = from_slice_and_advance_buf!(B256, buf);

        Ok(Self { version, batch_index, l1_message_popped, total_l1_message_popped, data_hash })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::b256;

    #[test]
    fn test_should_decode_prefix_of_every_version() -> eyre::Result<()> {
        let data_hash = b256!("2aa3eeb5adebb96a49736583c744b89b0b3be45056e8e178106a42ab2cd1a063");
        let parent = b256!("c0173d7e3561501cf57913763c7c34716216092a222a99fe8b85dcb466730f56");
        let v0 = BatchHeader::V0(BatchHeaderV0::new(0, 9, 1, 33, data_hash, parent, vec![0; 32]));
        let v1 = BatchHeader::V1(BatchHeaderV1::new(
            1,
            10,
            300,
            333,
            data_hash,
            B256::repeat_byte(1),
            parent,
            vec![0; 64],
        ));

        for (header, popped) in [(v0, 1), (v1, 300)] {
            let encoded = header.encode();
            let mut buf = encoded.as_ref();
            let prefix = BatchHeaderPrefix::try_from_buf(&mut buf)?;

            assert_eq!(prefix.version, header.version());
            assert_eq!(prefix.batch_index, header.batch_index());
            assert_eq!(prefix.l1_message_popped, popped);
            assert_eq!(prefix.total_l1_message_popped, header.total_l1_message_popped());
            assert_eq!(prefix.data_hash, data_hash);
            assert_eq!(buf.len(), encoded.len() - BatchHeaderPrefix::BYTES_LENGTH);
        }

        Ok(())
    }

    #[test]
    fn test_should_fail_on_short_header() {
        let bytes = [0u8; BatchHeaderPrefix::BYTES_LENGTH - 1];
        let res = BatchHeaderPrefix::try_from_buf(&mut bytes.as_ref());
        assert!(matches!(res, Err(DecodingError::Eof)));
    }
}
