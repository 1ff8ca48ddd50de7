//! String hashing for bucket selection.
//!
//! The default hash multiplies the running value by 65599 and adds each byte,
//! with wrapping 64-bit arithmetic and no seed. It is fast and reproducible,
//! and offers no protection against deliberately colliding keys.

/// Maps key bytes to a 64-bit hash. Implementations must be pure: the same
/// bytes always produce the same value for a given hasher.
pub trait KeyHasher {
    fn hash_bytes(&self, bytes: &[u8]) -> u64;
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Multiplicative65599;

impl Multiplicative65599 {
    const MULTIPLIER: u64 = 65599;
}

impl KeyHasher for Multiplicative65599 {
    #[inline]
    fn hash_bytes(&self, bytes: &[u8]) -> u64 {
        bytes.iter().fold(0u64, |h, &b| {
            h.wrapping_mul(Self::MULTIPLIER).wrapping_add(u64::from(b))
        })
    }
}

impl<H: KeyHasher + ?Sized> KeyHasher for &H {
    #[inline]
    fn hash_bytes(&self, bytes: &[u8]) -> u64 {
        (**self).hash_bytes(bytes)
    }
}

/// Bucket for `key` in a table of `bucket_count` buckets, in `[0, bucket_count)`.
#[inline]
pub fn bucket_index<H: KeyHasher + ?Sized>(hasher: &H, key: &str, bucket_count: usize) -> usize {
    debug_assert!(bucket_count > 0, "bucket count must be positive");
    (hasher.hash_bytes(key.as_bytes()) % bucket_count as u64) as usize
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::growth::GROWTH_TABLE;

    #[test]
    fn known_values() {
        let h = Multiplicative65599;
        assert_eq!(h.hash_bytes(b""), 0);
        assert_eq!(h.hash_bytes(b"a"), 97);
        assert_eq!(h.hash_bytes(b"ab"), 97 * 65599 + 98);
        assert_eq!(h.hash_bytes(b"abc"), 417_419_622_498);
    }

    #[test]
    fn long_keys_wrap_instead_of_overflowing() {
        let h = Multiplicative65599;
        assert_eq!(h.hash_bytes(b"hello"), 7_416_051_667_693_574_450);
        assert_eq!(h.hash_bytes(b"symtable"), 7_612_010_355_279_080_135);
    }

    #[test]
    fn bucket_index_reduces_modulo_count() {
        let h = Multiplicative65599;
        assert_eq!(bucket_index(&h, "", 509), 0);
        assert_eq!(bucket_index(&h, "a", 509), 97);
        assert_eq!(bucket_index(&h, "ab", 509), 192);
        assert_eq!(bucket_index(&h, "ab", 1021), 329);
        assert_eq!(bucket_index(&h, "hello", 509), 228);
        assert_eq!(bucket_index(&h, "hello", 1021), 859);
    }

    #[test]
    fn bucket_index_is_in_range_and_reproducible() {
        let h = Multiplicative65599;
        for &count in GROWTH_TABLE {
            for i in 0..200 {
                let key = format!("key-{i}");
                let a = bucket_index(&h, &key, count);
                assert!(a < count);
                assert_eq!(a, bucket_index(&h, &key, count));
            }
        }
    }

    #[test]
    fn high_bytes_are_unsigned() {
        let h = Multiplicative65599;
        assert_eq!(h.hash_bytes(&[0xff]), 255);
        assert_eq!(h.hash_bytes("é".as_bytes()), 0xc3 * 65599 + 0xa9);
    }
}
