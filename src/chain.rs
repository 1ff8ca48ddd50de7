//! Chain primitives shared by both table realizations.
//!
//! Bindings live in a generational arena; a chain is an `Option<DefaultKey>`
//! head plus the `next` link stored in each binding. Chains are newest-first.
//! Moving a binding between chains only rewrites links, so the arena key and
//! the owned key string survive a rehash untouched.

use slotmap::{DefaultKey, SlotMap};

pub(crate) type Link = Option<DefaultKey>;

#[derive(Debug)]
pub(crate) struct Binding<V> {
    pub(crate) key: String,
    pub(crate) value: V,
    pub(crate) next: Link,
}

pub(crate) type Arena<V> = SlotMap<DefaultKey, Binding<V>>;

/// Arena key of the binding for `key` in the chain starting at `head`.
pub(crate) fn find<V>(arena: &Arena<V>, head: Link, key: &str) -> Option<DefaultKey> {
    let mut cur = head;
    while let Some(k) = cur {
        let b = &arena[k];
        if b.key == key {
            return Some(k);
        }
        cur = b.next;
    }
    None
}

/// Stores a new binding and prepends it to the chain at `head`.
pub(crate) fn push_front<V>(arena: &mut Arena<V>, head: &mut Link, key: String, value: V) -> DefaultKey {
    let k = arena.insert(Binding {
        key,
        value,
        next: *head,
    });
    *head = Some(k);
    k
}

/// Moves an already stored binding to the front of the chain at `head`.
/// The caller must have detached it from its previous chain.
pub(crate) fn relink_front<V>(arena: &mut Arena<V>, head: &mut Link, k: DefaultKey) {
    arena[k].next = *head;
    *head = Some(k);
}

/// Detaches the binding for `key` from the chain at `head` and frees it,
/// handing back its contents.
pub(crate) fn unlink<V>(arena: &mut Arena<V>, head: &mut Link, key: &str) -> Option<Binding<V>> {
    let mut prev: Link = None;
    let mut cur = *head;
    while let Some(k) = cur {
        let (hit, next) = {
            let b = &arena[k];
            (b.key == key, b.next)
        };
        if hit {
            match prev {
                None => *head = next,
                Some(p) => arena[p].next = next,
            }
            return arena.remove(k);
        }
        prev = cur;
        cur = next;
    }
    None
}

/// Number of bindings reachable from `head`.
#[cfg(test)]
pub(crate) fn chain_len<V>(arena: &Arena<V>, head: Link) -> usize {
    ChainIter::new(arena, head).count()
}

/// Walks one chain front to back.
pub struct ChainIter<'a, V> {
    arena: &'a Arena<V>,
    cur: Link,
}

impl<'a, V> ChainIter<'a, V> {
    pub(crate) fn new(arena: &'a Arena<V>, head: Link) -> Self {
        Self { arena, cur: head }
    }
}

impl<'a, V> Iterator for ChainIter<'a, V> {
    type Item = (&'a str, &'a V);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let arena = self.arena;
        let b = &arena[self.cur?];
        self.cur = b.next;
        Some((b.key.as_str(), &b.value))
    }
}

impl<V> Clone for ChainIter<'_, V> {
    fn clone(&self) -> Self {
        Self {
            arena: self.arena,
            cur: self.cur,
        }
    }
}
