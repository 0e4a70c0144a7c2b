//! Identity hash allocation for programmatically created nodes.

use std::collections::BTreeSet;

use crate::codec::HASH_SEED;

/// Monotonic 64-bit hash generator.
///
/// Each [`CastFile`](super::CastFile) owns one, so independent files issue
/// identical, reproducible sequences. Decoded nodes keep their stored hash and
/// never draw from an allocator; their hashes are reserved instead, and the
/// counter steps over every reserved value, including after it wraps.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HashAllocator {
    next: u64,
    reserved: BTreeSet<u64>,
}

impl Default for HashAllocator {
    fn default() -> Self {
        Self::new()
    }
}

impl HashAllocator {
    /// Allocator starting at the fixed seed.
    pub const fn new() -> Self {
        Self::starting_at(HASH_SEED)
    }

    /// Allocator starting at an arbitrary value.
    pub const fn starting_at(next: u64) -> Self {
        Self {
            next,
            reserved: BTreeSet::new(),
        }
    }

    /// Issue the next hash that is not reserved.
    pub fn next_hash(&mut self) -> u64 {
        let hash = self.peek();
        self.next = hash.wrapping_add(1);
        hash
    }

    /// The hash the next call to [`next_hash`](Self::next_hash) returns.
    pub fn peek(&self) -> u64 {
        let mut hash = self.next;
        while self.reserved.contains(&hash) {
            hash = hash.wrapping_add(1);
        }
        hash
    }

    /// Make sure `hash` is never issued.
    pub fn reserve(&mut self, hash: u64) {
        self.reserved.insert(hash);
    }

    /// Number of reserved hashes.
    #[inline]
    pub fn num_reserved(&self) -> usize {
        self.reserved.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequence_from_seed() {
        let mut a = HashAllocator::new();
        assert_eq!(a.next_hash(), 0x534E_4957_5254_5250);
        assert_eq!(a.next_hash(), 0x534E_4957_5254_5251);
        assert_eq!(a.peek(), 0x534E_4957_5254_5252);
    }

    #[test]
    fn test_independent_allocators() {
        let mut a = HashAllocator::new();
        let mut b = HashAllocator::new();
        a.next_hash();
        a.next_hash();
        assert_eq!(b.next_hash(), HASH_SEED);
        assert_ne!(a.peek(), b.peek());
    }

    #[test]
    fn test_reserve() {
        let mut a = HashAllocator::new();
        a.reserve(42);
        assert_eq!(a.peek(), HASH_SEED);

        a.reserve(HASH_SEED);
        a.reserve(HASH_SEED + 1);
        a.reserve(HASH_SEED + 3);
        assert_eq!(a.next_hash(), HASH_SEED + 2);
        assert_eq!(a.next_hash(), HASH_SEED + 4);
        assert_eq!(a.num_reserved(), 4);
    }

    #[test]
    fn test_reserve_max_hash() {
        let mut a = HashAllocator::starting_at(u64::MAX - 1);
        a.reserve(u64::MAX);
        a.reserve(0);
        a.reserve(2);

        let issued: Vec<u64> = (0..3).map(|_| a.next_hash()).collect();
        assert_eq!(issued, [u64::MAX - 1, 1, 3]);
    }
}
