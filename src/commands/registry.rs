//! Command Registry
//!
//! A static table mapping command names to descriptors. The table is built
//! once at startup via [`CommandTable::builtin`] and is read-only afterwards;
//! no synchronization is needed because no writer exists after
//! initialization. Each registry is an explicit value, so isolated tests can
//! build their own instead of sharing process-wide state.

use crate::commands::dispatch::Context;
use crate::commands::{keyspace, server, zset};
use crate::error::HandlerError;
use crate::protocol::Reply;
use crate::storage::WriteBatch;
use bytes::Bytes;
use std::collections::HashMap;

/// Handler function signature for command table entries.
///
/// `batch` is `Some` exactly when the descriptor's `writes` flag is set.
pub type CommandFn =
    fn(&Context<'_>, &[Bytes], Option<&mut WriteBatch>) -> Result<Reply, HandlerError>;

/// Required-argument-count contract for a command.
///
/// `Exact(0)` is a valid contract, distinct from any `AtLeast` variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    /// Exactly this many arguments.
    Exact(usize),
    /// At least this many arguments.
    AtLeast(usize),
}

impl Arity {
    /// Whether `count` arguments satisfy the contract.
    pub fn accepts(&self, count: usize) -> bool {
        match *self {
            Arity::Exact(required) => count == required,
            Arity::AtLeast(minimum) => count >= minimum,
        }
    }
}

/// Metadata and callback for one command table entry.
#[derive(Debug, Clone)]
pub struct CommandDescriptor {
    /// Canonical lowercase command name, unique within the table.
    pub name: &'static str,
    /// Handler callback.
    pub handler: CommandFn,
    /// Argument count contract, enforced before the handler runs.
    pub arity: Arity,
    /// True iff the handler mutates storage and needs a write batch.
    pub writes: bool,
}

/// The command table.
#[derive(Debug, Default)]
pub struct CommandTable {
    entries: HashMap<&'static str, CommandDescriptor>,
}

impl CommandTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Builds the table of built-in commands.
    pub fn builtin() -> Self {
        let mut table = Self::new();
        table.register(CommandDescriptor {
            name: "del",
            handler: keyspace::del,
            arity: Arity::AtLeast(1),
            writes: true,
        });
        table.register(CommandDescriptor {
            name: "echo",
            handler: server::echo,
            arity: Arity::Exact(1),
            writes: false,
        });
        table.register(CommandDescriptor {
            name: "ping",
            handler: server::ping,
            arity: Arity::Exact(0),
            writes: false,
        });
        table.register(CommandDescriptor {
            name: "zadd",
            handler: zset::zadd,
            arity: Arity::AtLeast(3),
            writes: true,
        });
        table.register(CommandDescriptor {
            name: "zcard",
            handler: zset::zcard,
            arity: Arity::Exact(1),
            writes: false,
        });
        table.register(CommandDescriptor {
            name: "zincrby",
            handler: zset::zincrby,
            arity: Arity::Exact(3),
            writes: true,
        });
        table.register(CommandDescriptor {
            name: "zrange",
            handler: zset::zrange,
            arity: Arity::AtLeast(3),
            writes: false,
        });
        table.register(CommandDescriptor {
            name: "zrem",
            handler: zset::zrem,
            arity: Arity::AtLeast(2),
            writes: true,
        });
        table.register(CommandDescriptor {
            name: "zrevrange",
            handler: zset::zrevrange,
            arity: Arity::AtLeast(3),
            writes: false,
        });
        table.register(CommandDescriptor {
            name: "zscore",
            handler: zset::zscore,
            arity: Arity::Exact(2),
            writes: false,
        });
        table
    }

    /// Registers a command.
    ///
    /// # Panics
    ///
    /// Panics if a descriptor with the same name is already registered;
    /// duplicate registration is a startup-time programming error.
    pub fn register(&mut self, descriptor: CommandDescriptor) {
        let name = descriptor.name;
        let previous = self.entries.insert(name, descriptor);
        assert!(previous.is_none(), "duplicate command registration: {name}");
    }

    /// Looks up a descriptor by (lowercase) name.
    pub fn lookup(&self, name: &str) -> Option<&CommandDescriptor> {
        self.entries.get(name)
    }

    /// Number of registered commands.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no commands are registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
