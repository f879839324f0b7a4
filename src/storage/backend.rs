//! Storage Backend Contract
//!
//! The storage engine is an external collaborator. This crate talks to it
//! through the `Backend` trait and requires exactly three things of it:
//! point lookups that report absence as `Ok(None)`, ascending prefix scans,
//! and atomic application of a [`WriteBatch`]. Implementations must be safe
//! for concurrent use; two batches committed concurrently must never
//! interleave their individual operations.

use crate::error::StorageError;
use crate::storage::batch::WriteBatch;
use bytes::Bytes;

/// Read configuration applied to lookups.
///
/// Only advisory knobs live here; the process uses one immutable instance
/// for every read this crate performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadOptions {
    /// Hint that read pages should populate the backend's block cache.
    pub fill_cache: bool,
}

impl Default for ReadOptions {
    fn default() -> Self {
        DEFAULT_READ_OPTIONS
    }
}

/// Process-wide read configuration used for all lookups.
pub const DEFAULT_READ_OPTIONS: ReadOptions = ReadOptions { fill_cache: true };

/// An ordered byte-key/byte-value store with atomic batched writes.
pub trait Backend: Send + Sync {
    /// Point lookup. An absent key is `Ok(None)`, never an error.
    fn get(&self, options: &ReadOptions, key: &[u8]) -> Result<Option<Bytes>, StorageError>;

    /// Every entry whose key starts with `prefix`, in ascending key order.
    fn scan_prefix(
        &self,
        options: &ReadOptions,
        prefix: &[u8],
    ) -> Result<Vec<(Bytes, Bytes)>, StorageError>;

    /// Applies the batch atomically: either every operation lands or none do.
    fn write(&self, batch: WriteBatch) -> Result<(), StorageError>;
}
