//! ListTable: the whole table is one chain. Every operation is a linear scan;
//! there is no bucket array and nothing to resize.

use crate::chain::{self, Arena, ChainIter, Link};
use crate::error::{copy_key, AllocError, InsertError};
use crate::table::SymbolTable;
use core::fmt;
use slotmap::SlotMap;

/// A symbol table kept as a single newest-first chain.
pub struct ListTable<V> {
    head: Link,
    bindings: Arena<V>,
}

impl<V> ListTable<V> {
    pub fn new() -> Self {
        Self {
            head: None,
            bindings: SlotMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    pub fn put(&mut self, key: &str, value: V) -> Result<(), InsertError> {
        if self.contains(key) {
            return Err(InsertError::DuplicateKey);
        }
        self.bindings.try_reserve(1).map_err(AllocError::from)?;
        let owned = copy_key(key)?;
        chain::push_front(&mut self.bindings, &mut self.head, owned, value);
        Ok(())
    }

    pub fn replace(&mut self, key: &str, value: V) -> Option<V> {
        let k = chain::find(&self.bindings, self.head, key)?;
        Some(core::mem::replace(&mut self.bindings[k].value, value))
    }

    pub fn contains(&self, key: &str) -> bool {
        chain::find(&self.bindings, self.head, key).is_some()
    }

    pub fn get(&self, key: &str) -> Option<&V> {
        chain::find(&self.bindings, self.head, key).map(|k| &self.bindings[k].value)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut V> {
        let k = chain::find(&self.bindings, self.head, key)?;
        self.bindings.get_mut(k).map(|b| &mut b.value)
    }

    pub fn remove(&mut self, key: &str) -> Option<V> {
        chain::unlink(&mut self.bindings, &mut self.head, key).map(|b| b.value)
    }

    /// Bindings newest first.
    pub fn iter(&self) -> ChainIter<'_, V> {
        ChainIter::new(&self.bindings, self.head)
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

impl<V> Default for ListTable<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> SymbolTable<V> for ListTable<V> {
    type Iter<'a>
        = ChainIter<'a, V>
    where
        Self: 'a,
        V: 'a;

    fn try_new() -> Result<Self, AllocError> {
        Ok(Self::new())
    }

    fn len(&self) -> usize {
        ListTable::len(self)
    }

    fn put(&mut self, key: &str, value: V) -> Result<(), InsertError> {
        ListTable::put(self, key, value)
    }

    fn replace(&mut self, key: &str, value: V) -> Option<V> {
        ListTable::replace(self, key, value)
    }

    fn contains(&self, key: &str) -> bool {
        ListTable::contains(self, key)
    }

    fn get(&self, key: &str) -> Option<&V> {
        ListTable::get(self, key)
    }

    fn get_mut(&mut self, key: &str) -> Option<&mut V> {
        ListTable::get_mut(self, key)
    }

    fn remove(&mut self, key: &str) -> Option<V> {
        ListTable::remove(self, key)
    }

    fn iter(&self) -> Self::Iter<'_> {
        ListTable::iter(self)
    }
}

impl<V: fmt::Debug> fmt::Debug for ListTable<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}
