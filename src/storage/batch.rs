//! Atomic Write Batches
//!
//! A `WriteBatch` is an ordered collection of pending put/delete operations.
//! Handlers queue into it; the dispatcher hands the finished batch to the
//! backend, which applies it all-or-nothing. A batch belongs to exactly one
//! dispatch invocation and is dropped uncommitted if the handler fails.

use bytes::Bytes;

/// One pending operation in a batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BatchOp {
    /// Insert or overwrite `key` with `value`.
    Put { key: Bytes, value: Bytes },
    /// Remove `key` if present.
    Delete { key: Bytes },
}

/// An ordered set of put/delete operations applied as a single atomic unit.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct WriteBatch {
    ops: Vec<BatchOp>,
}

impl WriteBatch {
    /// Creates an empty batch.
    pub fn new() -> Self {
        Self { ops: Vec::new() }
    }

    /// Queues a put.
    pub fn put(&mut self, key: Bytes, value: Bytes) {
        self.ops.push(BatchOp::Put { key, value });
    }

    /// Queues a delete.
    pub fn delete(&mut self, key: Bytes) {
        self.ops.push(BatchOp::Delete { key });
    }

    /// Number of queued operations.
    pub fn len(&self) -> usize {
        self.ops.len()
    }

    /// Returns true if nothing has been queued.
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// The queued operations, in insertion order.
    pub fn ops(&self) -> &[BatchOp] {
        &self.ops
    }

    /// Consumes the batch, yielding its operations for application.
    pub fn into_ops(self) -> Vec<BatchOp> {
        self.ops
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn batch_preserves_insertion_order() {
        let mut batch = WriteBatch::new();
        batch.put(Bytes::from_static(b"a"), Bytes::from_static(b"1"));
        batch.delete(Bytes::from_static(b"b"));
        batch.put(Bytes::from_static(b"c"), Bytes::from_static(b"3"));

        let ops = batch.into_ops();
        assert_eq!(ops.len(), 3);
        assert!(matches!(&ops[0], BatchOp::Put { key, .. } if key.as_ref() == b"a"));
        assert!(matches!(&ops[1], BatchOp::Delete { key } if key.as_ref() == b"b"));
        assert!(matches!(&ops[2], BatchOp::Put { key, .. } if key.as_ref() == b"c"));
    }

    #[test]
    fn new_batch_is_empty() {
        let batch = WriteBatch::new();
        assert!(batch.is_empty());
        assert_eq!(batch.len(), 0);
    }
}
