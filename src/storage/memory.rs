//! In-Memory Reference Backend
//!
//! An ordered map behind a single `RwLock`. This is the backend the tests
//! and benchmarks run against, and a usable default for embedders that do
//! not bring their own engine. A `BTreeMap` gives the ascending iteration
//! order the prefix-scan contract requires, and holding the write lock for
//! the whole of [`Backend::write`] gives batch atomicity: readers see the
//! map either before the batch or after it, never in between.

use crate::error::StorageError;
use crate::storage::backend::{Backend, ReadOptions};
use crate::storage::batch::{BatchOp, WriteBatch};
use bytes::Bytes;
use std::collections::BTreeMap;
use std::sync::RwLock;

/// An in-memory ordered key-value store.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    data: RwLock<BTreeMap<Vec<u8>, Bytes>>,
}

impl MemoryBackend {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self {
            data: RwLock::new(BTreeMap::new()),
        }
    }

    /// Number of live entries. Counts internal entries, not user keys.
    pub fn len(&self) -> usize {
        self.data.read().map(|map| map.len()).unwrap_or(0)
    }

    /// Returns true if the store holds no entries.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Backend for MemoryBackend {
    fn get(&self, _options: &ReadOptions, key: &[u8]) -> Result<Option<Bytes>, StorageError> {
        let map = self
            .data
            .read()
            .map_err(|err| StorageError::LockPoisoned(err.to_string()))?;
        Ok(map.get(key).cloned())
    }

    fn scan_prefix(
        &self,
        _options: &ReadOptions,
        prefix: &[u8],
    ) -> Result<Vec<(Bytes, Bytes)>, StorageError> {
        let map = self
            .data
            .read()
            .map_err(|err| StorageError::LockPoisoned(err.to_string()))?;
        let entries = map
            .range::<[u8], _>((std::ops::Bound::Included(prefix), std::ops::Bound::Unbounded))
            .take_while(|(key, _)| key.starts_with(prefix))
            .map(|(key, value)| (Bytes::copy_from_slice(key), value.clone()))
            .collect();
        Ok(entries)
    }

    fn write(&self, batch: WriteBatch) -> Result<(), StorageError> {
        let mut map = self
            .data
            .write()
            .map_err(|err| StorageError::LockPoisoned(err.to_string()))?;
        for op in batch.into_ops() {
            match op {
                BatchOp::Put { key, value } => {
                    map.insert(key.to_vec(), value);
                }
                BatchOp::Delete { key } => {
                    map.remove(key.as_ref());
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::backend::DEFAULT_READ_OPTIONS;

    fn put(store: &MemoryBackend, key: &[u8], value: &[u8]) {
        let mut batch = WriteBatch::new();
        batch.put(Bytes::copy_from_slice(key), Bytes::copy_from_slice(value));
        store.write(batch).unwrap();
    }

    #[test]
    fn get_returns_none_for_missing_key() {
        let store = MemoryBackend::new();
        assert_eq!(store.get(&DEFAULT_READ_OPTIONS, b"missing").unwrap(), None);
    }

    #[test]
    fn write_then_get_round_trips() {
        let store = MemoryBackend::new();
        put(&store, b"name", b"ridge");
        assert_eq!(
            store.get(&DEFAULT_READ_OPTIONS, b"name").unwrap(),
            Some(Bytes::from_static(b"ridge"))
        );
    }

    #[test]
    fn batch_applies_in_order() {
        let store = MemoryBackend::new();
        let mut batch = WriteBatch::new();
        batch.put(Bytes::from_static(b"k"), Bytes::from_static(b"v1"));
        batch.put(Bytes::from_static(b"k"), Bytes::from_static(b"v2"));
        batch.delete(Bytes::from_static(b"k"));
        store.write(batch).unwrap();

        assert_eq!(store.get(&DEFAULT_READ_OPTIONS, b"k").unwrap(), None);
        assert!(store.is_empty());
    }

    #[test]
    fn scan_prefix_returns_ascending_matches_only() {
        let store = MemoryBackend::new();
        put(&store, b"a:2", b"two");
        put(&store, b"a:1", b"one");
        put(&store, b"b:1", b"other");

        let entries = store.scan_prefix(&DEFAULT_READ_OPTIONS, b"a:").unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].0.as_ref(), b"a:1");
        assert_eq!(entries[1].0.as_ref(), b"a:2");
    }

    #[test]
    fn empty_prefix_scans_everything() {
        let store = MemoryBackend::new();
        put(&store, b"x", b"1");
        put(&store, b"y", b"2");
        assert_eq!(store.scan_prefix(&DEFAULT_READ_OPTIONS, b"").unwrap().len(), 2);
    }
}
