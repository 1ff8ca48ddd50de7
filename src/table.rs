//! The contract shared by `HashTable` and `ListTable`.

use crate::error::{AllocError, InsertError};

/// A string-keyed symbol table. Keys are copied in on insert and are unique
/// byte-wise; values are stored as given and handed back on `replace` and
/// `remove`, never inspected.
///
/// Both realizations give identical results for any sequence of calls; only
/// the order in which `iter`/`for_each` visit bindings may differ.
pub trait SymbolTable<V> {
    type Iter<'a>: Iterator<Item = (&'a str, &'a V)>
    where
        Self: 'a,
        V: 'a;

    /// Creates an empty table, or reports that the allocator refused.
    fn try_new() -> Result<Self, AllocError>
    where
        Self: Sized;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Adds a binding. A present key yields `InsertError::DuplicateKey` and
    /// leaves the table unchanged.
    fn put(&mut self, key: &str, value: V) -> Result<(), InsertError>;

    /// Swaps in `value` for an existing key and returns the previous one.
    /// On a miss nothing is inserted and `None` is returned.
    fn replace(&mut self, key: &str, value: V) -> Option<V>;

    fn contains(&self, key: &str) -> bool;

    fn get(&self, key: &str) -> Option<&V>;

    fn get_mut(&mut self, key: &str) -> Option<&mut V>;

    /// Drops the binding for `key` and returns its value.
    fn remove(&mut self, key: &str) -> Option<V>;

    fn iter(&self) -> Self::Iter<'_>;

    /// Calls `visit` once per binding, in `iter` order.
    fn for_each<F>(&self, mut visit: F)
    where
        F: FnMut(&str, &V),
    {
        for (k, v) in self.iter() {
            visit(k, v);
        }
    }
}
