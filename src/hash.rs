//! Polynomial rolling hasher used to pick home buckets.
//!
//! The table reduces the finished hash modulo its current bucket count,
//! so the hash itself stays capacity-independent while bucket indices do
//! not. Folding is `h = 17 * h + byte` in wrapping 32-bit arithmetic over
//! the raw key bytes; there is no length prefix and no seeding, so the
//! same bytes always land in the same bucket for a given capacity.

use core::hash::{BuildHasherDefault, Hasher};

/// `BuildHasher` producing [`PolyHasher`], the table's default.
pub type PolyBuildHasher = BuildHasherDefault<PolyHasher>;

/// Wrapping-u32 polynomial hasher over raw bytes.
///
/// Only `write` folds state; the integer `write_*` convenience methods
/// funnel through it via the default `Hasher` impls. The table never uses
/// those: it always hashes a key's byte slice directly, sidestepping the
/// length-prefix bytes `Hash for [u8]` would mix in.
#[derive(Clone, Default)]
pub struct PolyHasher {
    state: u32,
}

impl Hasher for PolyHasher {
    #[inline]
    fn write(&mut self, bytes: &[u8]) {
        for &b in bytes {
            self.state = self.state.wrapping_mul(17).wrapping_add(u32::from(b));
        }
    }

    #[inline]
    fn finish(&self) -> u64 {
        u64::from(self.state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn poly(bytes: &[u8]) -> u64 {
        let mut h = PolyHasher::default();
        h.write(bytes);
        h.finish()
    }

    /// Invariant: empty input hashes to zero (initial state, nothing folded).
    #[test]
    fn empty_input_is_zero() {
        assert_eq!(poly(b""), 0);
    }

    /// Invariant: folding is `17 * h + byte`, checked against hand-computed
    /// values for one- and two-byte keys.
    #[test]
    fn known_values() {
        assert_eq!(poly(b"a"), 97);
        assert_eq!(poly(b"ab"), 17 * 97 + 98);
        assert_eq!(poly(b"\x00"), 0); // a NUL byte folds as zero
        assert_eq!(poly(b"\x00\x01"), 1);
    }

    /// Invariant: state wraps at 32 bits instead of widening; a long input
    /// must equal the explicitly wrapped reference computation.
    #[test]
    fn wraps_at_32_bits() {
        let input: Vec<u8> = (0..=255u8).cycle().take(4096).collect();
        let mut expect: u32 = 0;
        for &b in &input {
            expect = expect.wrapping_mul(17).wrapping_add(u32::from(b));
        }
        assert_eq!(poly(&input), u64::from(expect));
    }

    /// Invariant: hashing all bytes at once equals hashing them in chunks
    /// (the fold has no per-call boundary state).
    #[test]
    fn chunked_writes_equal_single_write() {
        let mut chunked = PolyHasher::default();
        chunked.write(b"doc");
        chunked.write(b"ument");
        assert_eq!(chunked.finish(), poly(b"document"));
    }
}
