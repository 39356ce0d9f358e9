//! Key hashing
//!
//! SplitMix64 finalizer: three xor-shift/multiply rounds with two odd 64-bit
//! constants. Fixed output so bucket layouts are reproducible across runs.

use super::Key;

const MIX_MULT_1: u64 = 0xbf58_476d_1ce4_e5b9;
const MIX_MULT_2: u64 = 0x94d0_49bb_1331_11eb;

/// Avalanche a key into a 64-bit hash
#[inline]
pub fn mix64(key: Key) -> u64 {
    let mut x = key;
    x ^= x >> 30;
    x = x.wrapping_mul(MIX_MULT_1);
    x ^= x >> 27;
    x = x.wrapping_mul(MIX_MULT_2);
    x ^= x >> 31;
    x
}

/// Home bucket of `key` in a table whose capacity is `mask + 1`
#[inline]
pub fn bucket_index(key: Key, mask: usize) -> usize {
    (mix64(key) as usize) & mask
}
