//! Error types. Allocation failure is the only recoverable failure; a
//! duplicate key on insert is reported through `InsertError` as well.

use std::collections::TryReserveError;
use thiserror::Error;

/// The allocator refused a request (a key copy or a bucket array).
#[derive(Error, Clone, Debug, PartialEq, Eq)]
#[error("allocation failed: {0}")]
pub struct AllocError(#[from] TryReserveError);

#[derive(Error, Clone, Debug, PartialEq, Eq)]
pub enum InsertError {
    #[error("key already present")]
    DuplicateKey,
    #[error(transparent)]
    OutOfMemory(#[from] AllocError),
}

/// Copies `key` into a freshly allocated `String`, reporting allocator
/// failure instead of aborting.
pub(crate) fn copy_key(key: &str) -> Result<String, AllocError> {
    let mut owned = String::new();
    owned.try_reserve_exact(key.len())?;
    owned.push_str(key);
    Ok(owned)
}
