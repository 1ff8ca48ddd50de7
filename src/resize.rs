//! Growth policy and rehash for the chained hash table.
//!
//! Growth is requested after every successful insert and happens when the
//! load factor exceeds 1. Each growth step moves one entry along
//! `GROWTH_TABLE`; past the last entry the table stops growing and chains are
//! left to lengthen.

use crate::chain::{self, Arena, Link};
use crate::error::AllocError;
use crate::hash::{bucket_index, KeyHasher};

#[inline]
pub(crate) fn over_threshold(len: usize, bucket_count: usize) -> bool {
    len > bucket_count
}

/// Allocates `count` empty chain heads, reporting allocator failure.
pub(crate) fn alloc_buckets(count: usize) -> Result<Vec<Link>, AllocError> {
    let mut buckets = Vec::new();
    buckets.try_reserve_exact(count)?;
    buckets.resize(count, None);
    Ok(buckets)
}

/// Builds a bucket array of `new_count` buckets and relinks every binding
/// reachable from `old` into it, visiting old buckets in order and each chain
/// front to back. Allocation happens before any binding moves, so on error
/// `arena` and `old` are untouched.
pub(crate) fn rehash<V, H>(
    arena: &mut Arena<V>,
    old: &[Link],
    new_count: usize,
    hasher: &H,
) -> Result<Vec<Link>, AllocError>
where
    H: KeyHasher + ?Sized,
{
    let mut buckets = alloc_buckets(new_count)?;
    for &head in old {
        let mut cur = head;
        while let Some(k) = cur {
            cur = arena[k].next;
            let idx = bucket_index(hasher, &arena[k].key, new_count);
            chain::relink_front(arena, &mut buckets[idx], k);
        }
    }
    Ok(buckets)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chain::{push_front, ChainIter};
    use crate::hash::Multiplicative65599;
    use slotmap::SlotMap;

    #[test]
    fn threshold_is_strictly_greater() {
        assert!(!over_threshold(509, 509));
        assert!(over_threshold(510, 509));
        assert!(!over_threshold(0, 509));
    }

    #[test]
    fn alloc_buckets_reports_impossible_requests() {
        assert!(alloc_buckets(usize::MAX).is_err());
        let b = alloc_buckets(17).unwrap();
        assert_eq!(b.len(), 17);
        assert!(b.iter().all(Option::is_none));
    }

    #[test]
    fn rehash_places_every_binding_by_new_count() {
        let h = Multiplicative65599;
        let mut arena: Arena<usize> = SlotMap::new();
        let mut old = alloc_buckets(7).unwrap();
        for i in 0..50 {
            let key = format!("k{i}");
            let idx = bucket_index(&h, &key, 7);
            push_front(&mut arena, &mut old[idx], key, i);
        }
        let keys_before: Vec<_> = arena.keys().collect();

        let new = rehash(&mut arena, &old, 13, &h).unwrap();
        assert_eq!(new.len(), 13);
        let mut seen = 0;
        for (idx, &head) in new.iter().enumerate() {
            for (k, v) in ChainIter::new(&arena, head) {
                assert_eq!(bucket_index(&h, k, 13), idx);
                assert_eq!(k, format!("k{v}"));
                seen += 1;
            }
        }
        assert_eq!(seen, 50);
        let keys_after: Vec<_> = arena.keys().collect();
        assert_eq!(keys_before, keys_after, "bindings are moved, not reallocated");
    }

    #[test]
    fn failed_rehash_leaves_chains_alone() {
        let h = Multiplicative65599;
        let mut arena: Arena<u8> = SlotMap::new();
        let mut old = alloc_buckets(3).unwrap();
        push_front(&mut arena, &mut old[0], "a".to_string(), 1);
        push_front(&mut arena, &mut old[0], "b".to_string(), 2);
        assert!(rehash(&mut arena, &old, usize::MAX, &h).is_err());
        let keys: Vec<_> = ChainIter::new(&arena, old[0]).map(|(k, _)| k).collect();
        assert_eq!(keys, ["b", "a"]);
    }
}
