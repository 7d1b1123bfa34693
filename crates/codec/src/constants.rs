//! Constants shared by the codec versions.

/// The length in bytes of the Keccak 256 hash digest.
pub const KECCAK_256_DIGEST_BYTES_SIZE: usize = 32;

/// The length in bytes of each item in the skipped L1 messages bitmap.
pub const SKIPPED_L1_MESSAGE_BITMAP_ITEM_BYTES_SIZE: usize = 32;

/// The number of L1 messages covered by one item of the skipped L1 messages bitmap.
pub const L1_MESSAGES_PER_BITMAP_ITEM: u64 = 256;

/// The gas cost of a non-zero calldata byte.
pub const CALLDATA_NON_ZERO_BYTE_GAS: u64 = 16;

/// The gas cost of a cold storage load.
pub const COLD_SLOAD_GAS: u64 = 2100;

/// The gas cost of a warm address access.
pub const WARM_ADDRESS_ACCESS_GAS: u64 = 100;

/// The gas cost of a storage write to a fresh slot.
pub const SSTORE_SET_GAS: u64 = 20_000;

/// The intrinsic gas of a transaction.
pub const TX_BASE_GAS: u64 = 21_000;

/// Gas for the fixed overhead of `commitBatch`: admin and implementation lookups, pause checks and
/// event emission.
pub const COMMIT_BATCH_OVERHEAD_GAS: u64 = 100_000;

/// The maximum number of chunks in a V1 batch.
pub const MAX_NUM_CHUNKS_V1: usize = 15;

/// The maximum size in bytes of a blob.
pub const MAX_BLOB_SIZE: u64 = 131_072;

/// The number of bytes of a blob field element.
pub const BLOB_FIELD_ELEMENT_BYTES: u64 = 32;

/// The number of bytes of a blob field element that can hold payload data.
pub const BLOB_FIELD_ELEMENT_USABLE_BYTES: u64 = 31;

/// The version byte of a KZG blob versioned hash.
pub const VERSIONED_HASH_VERSION_KZG: u8 = 0x01;
