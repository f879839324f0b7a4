//! # RidgeKV - A Command Layer over an Ordered Key-Value Store
//!
//! RidgeKV is the command-processing core of a Redis-style server: named
//! commands are validated against a static command table, routed to typed
//! handlers, and their mutations applied to an ordered key-value backend as
//! one atomic batch.
//!
//! Heterogeneous value types share a single flat keyspace. Each live user
//! key owns a meta record whose leading byte - the type tag - says which
//! variant holds the key's payload entries, which is what lets `DEL` remove
//! a key without knowing its type up front.
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────┐
//! │                         RidgeKV                            │
//! │                                                            │
//! │  ┌──────────────┐   ┌──────────────┐   ┌───────────────┐   │
//! │  │ CommandTable │──>│  Dispatcher  │──>│   Handlers    │   │
//! │  │ (name/arity/ │   │ (arity, batch│   │ del, ping,    │   │
//! │  │  write flag) │   │  lifecycle)  │   │ echo, z*      │   │
//! │  └──────────────┘   └──────┬───────┘   └───────┬───────┘   │
//! │                            │                   │           │
//! │                            ▼                   ▼           │
//! │                     ┌─────────────────────────────────┐    │
//! │                     │     Backend (trait seam)        │    │
//! │                     │  get / scan_prefix / write      │    │
//! │                     └─────────────────────────────────┘    │
//! └────────────────────────────────────────────────────────────┘
//! ```
//!
//! Networking, request parsing, and the storage engine's internals live
//! outside this crate; replies are handed back as [`Reply`] values the
//! caller encodes with [`Reply::serialize`].
//!
//! ## Quick Start
//!
//! ```
//! use ridgekv::commands::{CommandTable, Dispatcher};
//! use ridgekv::storage::MemoryBackend;
//! use bytes::Bytes;
//! use std::sync::Arc;
//!
//! let dispatcher = Dispatcher::new(CommandTable::builtin(), Arc::new(MemoryBackend::new()));
//!
//! let args = vec![
//!     Bytes::from_static(b"board"),
//!     Bytes::from_static(b"1"),
//!     Bytes::from_static(b"alice"),
//! ];
//! let reply = dispatcher.dispatch("zadd", &args).unwrap();
//! assert_eq!(reply.serialize(), b":1\r\n");
//! ```
//!
//! ## Module Overview
//!
//! - [`commands`]: command table, dispatcher, and handlers
//! - [`keys`]: keyspace layout - meta keys, type tags, sorted set entries
//! - [`protocol`]: the reply model and its wire encoding
//! - [`storage`]: backend trait, write batches, in-memory reference backend
//! - [`error`]: recoverable command errors vs fatal consistency violations

pub mod commands;
pub mod error;
pub mod keys;
pub mod protocol;
pub mod storage;

// Re-export commonly used types for convenience
pub use commands::{CommandTable, Dispatcher};
pub use error::{CommandError, FatalError, HandlerError, StorageError};
pub use protocol::{Element, Reply};
pub use storage::{Backend, MemoryBackend, ReadOptions, WriteBatch, DEFAULT_READ_OPTIONS};

/// Version of RidgeKV
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
