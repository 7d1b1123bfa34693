//! EVM gas helpers used by the commit gas estimation.

/// Returns the gas cost of hashing `size` bytes with keccak256.
pub(crate) const fn keccak256_gas(size: u64) -> u64 {
    30 + 6 * size.div_ceil(32)
}

/// Returns the gas cost of expanding memory to `size` bytes.
pub(crate) const fn memory_expansion_cost(size: u64) -> u64 {
    let words = size.div_ceil(32);
    3 * words + words * words / 512
}
