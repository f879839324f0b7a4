//! Type-Polymorphic Deletion
//!
//! `del` removes keys regardless of the value type they hold. For each key
//! it reads the meta record, branches on the stored type tag, and lets the
//! owning type queue removal of the meta record and every payload entry into
//! the shared batch. The dispatcher commits that batch only if the whole
//! command succeeds, so a failure partway through deletes nothing at all.

use crate::commands::dispatch::Context;
use crate::commands::zset;
use crate::error::{CommandError, FatalError, HandlerError};
use crate::keys::{self, TypeTag};
use crate::protocol::Reply;
use crate::storage::WriteBatch;
use bytes::Bytes;

/// DEL key [key ...]
///
/// Returns the number of keys that existed and were queued for removal.
/// Missing keys are skipped; an empty meta record aborts the command with
/// `Invalid data`; an unrecognized type tag is a fatal consistency
/// violation, not a reply.
pub fn del(
    context: &Context<'_>,
    args: &[Bytes],
    batch: Option<&mut WriteBatch>,
) -> Result<Reply, HandlerError> {
    let batch = batch.expect("del is registered as a write command");

    let mut deleted = 0i64;
    for key in args {
        let Some(meta) = context.get(&keys::meta_key(key))? else {
            continue;
        };
        if meta.is_empty() {
            return Err(CommandError::InvalidData.into());
        }
        match TypeTag::from_byte(meta[0]) {
            Some(TypeTag::Zset) => zset::queue_delete(context, key, batch)?,
            None => return Err(FatalError::UnknownTypeTag { tag: meta[0] }.into()),
        }
        deleted += 1;
    }
    Ok(Reply::integer(deleted))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::registry::CommandTable;
    use crate::commands::Dispatcher;
    use crate::storage::{Backend, MemoryBackend};
    use std::sync::Arc;

    fn dispatcher() -> (Dispatcher, Arc<MemoryBackend>) {
        let store = Arc::new(MemoryBackend::new());
        let dispatcher = Dispatcher::new(CommandTable::builtin(), store.clone() as Arc<dyn Backend>);
        (dispatcher, store)
    }

    fn args(values: &[&str]) -> Vec<Bytes> {
        values
            .iter()
            .map(|value| Bytes::copy_from_slice(value.as_bytes()))
            .collect()
    }

    fn run(dispatcher: &Dispatcher, name: &str, argv: &[&str]) -> Reply {
        dispatcher
            .dispatch(name, &args(argv))
            .expect("command should not be fatal")
    }

    fn put_raw(store: &MemoryBackend, key: Bytes, value: Bytes) {
        let mut batch = WriteBatch::new();
        batch.put(key, value);
        store.write(batch).unwrap();
    }

    #[test]
    fn del_of_missing_keys_returns_zero_without_mutation() {
        let (dispatcher, store) = dispatcher();
        let reply = run(&dispatcher, "del", &["ghost", "phantom"]);
        assert_eq!(reply, Reply::integer(0));
        assert!(store.is_empty());
    }

    #[test]
    fn del_removes_every_entry_of_each_present_key() {
        let (dispatcher, store) = dispatcher();
        run(&dispatcher, "zadd", &["alpha", "1", "a", "2", "b"]);
        run(&dispatcher, "zadd", &["beta", "3", "c"]);
        assert!(!store.is_empty());

        let reply = run(&dispatcher, "del", &["alpha", "missing", "beta"]);
        assert_eq!(reply, Reply::integer(2));
        assert!(store.is_empty(), "meta and payload entries must all be gone");
    }

    #[test]
    fn del_is_idempotent() {
        let (dispatcher, _) = dispatcher();
        run(&dispatcher, "zadd", &["alpha", "1", "a"]);
        assert_eq!(run(&dispatcher, "del", &["alpha"]), Reply::integer(1));
        assert_eq!(run(&dispatcher, "del", &["alpha"]), Reply::integer(0));
        assert_eq!(run(&dispatcher, "del", &["alpha"]), Reply::integer(0));
    }

    #[test]
    fn empty_meta_record_aborts_the_whole_command() {
        let (dispatcher, store) = dispatcher();
        run(&dispatcher, "zadd", &["good", "1", "a"]);
        put_raw(&store, keys::meta_key(b"corrupt"), Bytes::new());
        let entries_before = store.len();

        // "good" comes first, so its removal is already queued when the
        // corrupt record is hit; nothing may be committed.
        let reply = run(&dispatcher, "del", &["good", "corrupt"]);
        assert_eq!(reply, Reply::error(CommandError::InvalidData));
        assert_eq!(store.len(), entries_before);
        assert_eq!(run(&dispatcher, "zcard", &["good"]), Reply::integer(1));
    }

    #[test]
    fn unknown_type_tag_is_fatal_not_a_reply() {
        let (dispatcher, store) = dispatcher();
        put_raw(&store, keys::meta_key(b"weird"), Bytes::from_static(b"Q"));

        let result = dispatcher.dispatch("del", &args(&["weird"]));
        assert_eq!(result, Err(FatalError::UnknownTypeTag { tag: b'Q' }));
        // Nothing was committed either.
        assert_eq!(store.len(), 1);
    }
}
