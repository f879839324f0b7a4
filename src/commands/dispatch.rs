//! Command Dispatcher
//!
//! Turns a raw (command name, argument list) pair into a [`Reply`], enforcing
//! the arity contract and the atomicity of any resulting mutation:
//!
//! 1. Look up the descriptor; unknown names are a syntax error.
//! 2. Validate the argument count; violations never reach the handler.
//! 3. Allocate a fresh [`WriteBatch`] iff the command writes.
//! 4. Invoke the handler.
//! 5. On handler error, drop the batch uncommitted and reply with the error.
//! 6. On success, commit the batch atomically; a commit failure is surfaced
//!    exactly like a handler error.
//! 7. Return the reply.
//!
//! Steps 1-5 never touch storage for writing; the batch commit in step 6 is
//! the only observable side effect. Fatal handler failures are not replies —
//! they propagate out of [`Dispatcher::dispatch`] as `Err`.

use crate::commands::registry::CommandTable;
use crate::error::{CommandError, FatalError, HandlerError, StorageError};
use crate::protocol::Reply;
use crate::storage::{Backend, ReadOptions, WriteBatch, DEFAULT_READ_OPTIONS};
use bytes::Bytes;
use std::sync::Arc;
use tracing::{debug, error, warn};

/// The storage view handed to command handlers.
pub struct Context<'a> {
    /// The storage backend.
    pub store: &'a dyn Backend,
    /// Read configuration for every lookup this command performs.
    pub options: &'a ReadOptions,
}

impl Context<'_> {
    /// Point lookup with the context's read options.
    pub fn get(&self, key: &[u8]) -> Result<Option<Bytes>, StorageError> {
        self.store.get(self.options, key)
    }

    /// Ascending prefix scan with the context's read options.
    pub fn scan_prefix(&self, prefix: &[u8]) -> Result<Vec<(Bytes, Bytes)>, StorageError> {
        self.store.scan_prefix(self.options, prefix)
    }
}

/// Routes commands to handlers and owns the batch lifecycle.
pub struct Dispatcher {
    table: CommandTable,
    store: Arc<dyn Backend>,
    options: ReadOptions,
}

impl Dispatcher {
    /// Creates a dispatcher over `store` serving the commands in `table`.
    pub fn new(table: CommandTable, store: Arc<dyn Backend>) -> Self {
        Self {
            table,
            store,
            options: DEFAULT_READ_OPTIONS,
        }
    }

    /// Executes one command.
    ///
    /// Recoverable failures come back as `Ok(Reply::Error(..))`; only a
    /// fatal internal-consistency violation is `Err`, and the caller must
    /// stop serving commands when it sees one.
    pub fn dispatch(&self, name: &str, args: &[Bytes]) -> Result<Reply, FatalError> {
        let name = name.to_ascii_lowercase();
        let Some(descriptor) = self.table.lookup(&name) else {
            debug!(command = %name, "unknown command");
            return Ok(Reply::error(CommandError::Syntax));
        };

        if !descriptor.arity.accepts(args.len()) {
            debug!(command = descriptor.name, args = args.len(), "arity violation");
            return Ok(Reply::error(CommandError::Syntax));
        }

        let mut batch = if descriptor.writes {
            Some(WriteBatch::new())
        } else {
            None
        };

        let context = Context {
            store: self.store.as_ref(),
            options: &self.options,
        };

        match (descriptor.handler)(&context, args, batch.as_mut()) {
            Ok(reply) => {
                if let Some(batch) = batch {
                    if let Err(err) = self.store.write(batch) {
                        warn!(command = descriptor.name, error = %err, "batch commit failed");
                        return Ok(Reply::error(CommandError::Storage(err)));
                    }
                }
                Ok(reply)
            }
            // The batch, if any, is dropped here without being committed.
            Err(HandlerError::Command(err)) => Ok(Reply::error(err)),
            Err(HandlerError::Fatal(fatal)) => {
                error!(command = descriptor.name, error = %fatal, "fatal consistency violation");
                Err(fatal)
            }
        }
    }
}
