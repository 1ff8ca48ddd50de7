//! symtable: a string-keyed symbol table with two interchangeable
//! realizations behind one contract.
//!
//! Internal Design:
//!
//! Summary
//! - Goal: map unique string keys to caller-owned values, with a hash table
//!   that keeps chains short by growing in fixed stages.
//! - Layers:
//!   - `hash`: the multiplicative 65599 string hash and the `KeyHasher` seam.
//!   - `growth`: the fixed ascending list of bucket counts.
//!   - `chain`: bindings in a generational arena, linked by arena keys into
//!     newest-first chains.
//!   - `resize`: the load-factor check and the rehash that relinks every
//!     binding into a larger bucket array.
//!   - `HashTable<V, H>`: bucket array of chains; grows after inserts.
//!   - `ListTable<V>`: a single chain; linear scans, no growth.
//!   - `SymbolTable<V>`: the trait both tables implement.
//!
//! Constraints
//! - Single-threaded by contract: mutation needs `&mut self`; share across
//!   threads behind a lock.
//! - Keys are copied in on insert and never change afterwards.
//! - Values are opaque: stored, handed back on `replace`/`remove`, never
//!   inspected. Use a reference or handle type for values owned elsewhere.
//! - Duplicate inserts fail with `InsertError::DuplicateKey`; misses on
//!   `get`/`replace`/`remove` are `None`.
//!
//! Growth
//! - After each successful insert, if `len > bucket_count` the table moves
//!   to the next `GROWTH_TABLE` entry and relinks every binding. Only links
//!   change; bindings and their keys stay where they are in the arena.
//! - At the last entry growth stops for good and chains lengthen. This is
//!   slower, not an error.
//! - Capacity never shrinks.
//!
//! Allocation failure
//! - Arena slots, key copies and bucket arrays are allocated fallibly. A failed key copy
//!   fails the insert with no change; a failed bucket array abandons the
//!   resize, keeps the old capacity, and is retried on the next insert.
//! - The arena slot for a new binding is reserved before the key is copied;
//!   a refused reservation fails the insert the same way.
//!
//! Hashing
//! - `hash = hash * 65599 + byte` over the key bytes, wrapping, unseeded,
//!   reduced modulo the bucket count. Reproducible across runs and not
//!   resistant to chosen collisions.

mod chain;
pub mod error;
pub mod growth;
pub mod hash;
pub mod hash_table;
mod hash_table_proptest;
pub mod list_table;
mod resize;
pub mod table;

// Public surface
pub use chain::ChainIter;
pub use error::{AllocError, InsertError};
pub use growth::GROWTH_TABLE;
pub use hash::{bucket_index, KeyHasher, Multiplicative65599};
pub use hash_table::HashTable;
pub use list_table::ListTable;
pub use table::SymbolTable;
