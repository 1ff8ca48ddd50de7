//! HashTable: separate chaining over an arena of bindings, with staged growth.

use crate::chain::{self, Arena, ChainIter, Link};
use crate::error::{copy_key, AllocError, InsertError};
use crate::growth::{self, INITIAL_CAPACITY};
use crate::hash::{bucket_index, KeyHasher, Multiplicative65599};
use crate::resize;
use crate::table::SymbolTable;
use core::fmt;
use core::iter::FusedIterator;
use slotmap::SlotMap;
use tracing::{debug, trace, warn};

/// A symbol table backed by a bucket array of chains.
///
/// The bucket count starts at the first `GROWTH_TABLE` entry and steps up one
/// entry whenever an insert leaves more bindings than buckets. Once the last
/// entry is reached the table keeps accepting bindings and chains grow.
///
/// Values are stored as given and never inspected. The intended `V` is a
/// borrowed reference or a handle into storage the caller owns, so dropping
/// or clearing the table releases only its own keys and bookkeeping.
pub struct HashTable<V, H = Multiplicative65599> {
    hasher: H,
    buckets: Vec<Link>,
    growth_index: usize,
    bindings: Arena<V>,
}

impl<V> HashTable<V> {
    pub fn new() -> Self {
        Self::with_hasher(Multiplicative65599)
    }

    pub fn try_new() -> Result<Self, AllocError> {
        Self::try_with_hasher(Multiplicative65599)
    }
}

impl<V> Default for HashTable<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V, H> HashTable<V, H> {
    pub fn with_hasher(hasher: H) -> Self {
        Self {
            hasher,
            buckets: vec![None; INITIAL_CAPACITY],
            growth_index: 0,
            bindings: SlotMap::new(),
        }
    }

    pub fn try_with_hasher(hasher: H) -> Result<Self, AllocError> {
        Ok(Self {
            hasher,
            buckets: resize::alloc_buckets(INITIAL_CAPACITY)?,
            growth_index: 0,
            bindings: SlotMap::new(),
        })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Current number of buckets.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.buckets.len()
    }

    pub fn hasher(&self) -> &H {
        &self.hasher
    }

    /// Bindings in bucket order, each chain newest first. The order is fixed
    /// for a given table state but changes with inserts, removals and growth.
    pub fn iter(&self) -> Iter<'_, V> {
        Iter {
            arena: &self.bindings,
            buckets: self.buckets.iter(),
            chain: ChainIter::new(&self.bindings, None),
            remaining: self.bindings.len(),
        }
    }

    pub fn for_each<F>(&self, mut visit: F)
    where
        F: FnMut(&str, &V),
    {
        for (k, v) in self.iter() {
            visit(k, v);
        }
    }
}

impl<V, H> HashTable<V, H>
where
    H: KeyHasher,
{
    #[inline]
    fn bucket_of(&self, key: &str) -> usize {
        bucket_index(&self.hasher, key, self.buckets.len())
    }

    fn find(&self, key: &str) -> Option<slotmap::DefaultKey> {
        chain::find(&self.bindings, self.buckets[self.bucket_of(key)], key)
    }

    pub fn put(&mut self, key: &str, value: V) -> Result<(), InsertError> {
        let idx = self.bucket_of(key);
        if chain::find(&self.bindings, self.buckets[idx], key).is_some() {
            return Err(InsertError::DuplicateKey);
        }
        self.bindings.try_reserve(1).map_err(AllocError::from)?;
        let owned = copy_key(key)?;
        chain::push_front(&mut self.bindings, &mut self.buckets[idx], owned, value);
        self.grow_if_needed();
        Ok(())
    }

    pub fn replace(&mut self, key: &str, value: V) -> Option<V> {
        let k = self.find(key)?;
        Some(core::mem::replace(&mut self.bindings[k].value, value))
    }

    pub fn contains(&self, key: &str) -> bool {
        self.find(key).is_some()
    }

    pub fn get(&self, key: &str) -> Option<&V> {
        self.find(key).map(|k| &self.bindings[k].value)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut V> {
        let k = self.find(key)?;
        self.bindings.get_mut(k).map(|b| &mut b.value)
    }

    pub fn remove(&mut self, key: &str) -> Option<V> {
        let idx = self.bucket_of(key);
        chain::unlink(&mut self.bindings, &mut self.buckets[idx], key).map(|b| b.value)
    }

    fn grow_if_needed(&mut self) {
        if !resize::over_threshold(self.len(), self.capacity()) {
            return;
        }
        let Some((next_index, next_count)) = growth::next_stage(self.growth_index) else {
            trace!(
                len = self.len(),
                capacity = self.capacity(),
                "at largest capacity, not growing"
            );
            return;
        };
        if let Err(err) = self.grow_to(next_index, next_count) {
            // The table stays valid at its old size; the next insert retries.
            warn!(
                %err,
                capacity = self.capacity(),
                target = next_count,
                "bucket array allocation failed, keeping current capacity"
            );
        }
    }

    fn grow_to(&mut self, growth_index: usize, bucket_count: usize) -> Result<(), AllocError> {
        let buckets = resize::rehash(&mut self.bindings, &self.buckets, bucket_count, &self.hasher)?;
        let old = core::mem::replace(&mut self.buckets, buckets);
        self.growth_index = growth_index;
        debug!(
            from = old.len(),
            to = bucket_count,
            len = self.len(),
            "grew bucket array"
        );
        Ok(())
    }

    /// Checks every structural invariant; panics on the first violation.
    #[cfg(test)]
    pub(crate) fn assert_invariants(&self) {
        use std::collections::HashSet;

        assert_eq!(self.capacity(), growth::GROWTH_TABLE[self.growth_index]);
        let mut total = 0;
        let mut keys = HashSet::new();
        for (idx, &head) in self.buckets.iter().enumerate() {
            total += chain::chain_len(&self.bindings, head);
            for (k, _) in ChainIter::new(&self.bindings, head) {
                assert_eq!(self.bucket_of(k), idx, "binding {k:?} in wrong bucket");
                assert!(keys.insert(k.to_string()), "duplicate key {k:?}");
            }
        }
        assert_eq!(total, self.len());
    }
}

impl<V, H> SymbolTable<V> for HashTable<V, H>
where
    H: KeyHasher + Default,
{
    type Iter<'a>
        = Iter<'a, V>
    where
        Self: 'a,
        V: 'a;

    fn try_new() -> Result<Self, AllocError> {
        Self::try_with_hasher(H::default())
    }

    fn len(&self) -> usize {
        HashTable::len(self)
    }

    fn put(&mut self, key: &str, value: V) -> Result<(), InsertError> {
        HashTable::put(self, key, value)
    }

    fn replace(&mut self, key: &str, value: V) -> Option<V> {
        HashTable::replace(self, key, value)
    }

    fn contains(&self, key: &str) -> bool {
        HashTable::contains(self, key)
    }

    fn get(&self, key: &str) -> Option<&V> {
        HashTable::get(self, key)
    }

    fn get_mut(&mut self, key: &str) -> Option<&mut V> {
        HashTable::get_mut(self, key)
    }

    fn remove(&mut self, key: &str) -> Option<V> {
        HashTable::remove(self, key)
    }

    fn iter(&self) -> Self::Iter<'_> {
        HashTable::iter(self)
    }
}

impl<V: fmt::Debug, H> fmt::Debug for HashTable<V, H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<'a, V, H> IntoIterator for &'a HashTable<V, H> {
    type Item = (&'a str, &'a V);
    type IntoIter = Iter<'a, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over `(key, value)` pairs of a `HashTable`.
pub struct Iter<'a, V> {
    arena: &'a Arena<V>,
    buckets: core::slice::Iter<'a, Link>,
    chain: ChainIter<'a, V>,
    remaining: usize,
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = (&'a str, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(item) = self.chain.next() {
                self.remaining -= 1;
                return Some(item);
            }
            let &head = self.buckets.next()?;
            self.chain = ChainIter::new(self.arena, head);
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<V> ExactSizeIterator for Iter<'_, V> {}

impl<V> FusedIterator for Iter<'_, V> {}

impl<V> Clone for Iter<'_, V> {
    fn clone(&self) -> Self {
        Self {
            arena: self.arena,
            buckets: self.buckets.clone(),
            chain: self.chain.clone(),
            remaining: self.remaining,
        }
    }
}
