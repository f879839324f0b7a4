//! Command Processing Layer
//!
//! This module turns named commands into replies. A [`CommandTable`] built
//! once at startup maps each name to its descriptor; the [`Dispatcher`]
//! validates the argument count, owns the write-batch lifecycle, and routes
//! to the handler.
//!
//! ## Architecture
//!
//! ```text
//! ("zadd", args)
//!       │
//!       ▼
//! ┌─────────────────┐
//! │   Dispatcher    │  lookup ── arity check ── batch alloc
//! └────────┬────────┘
//!          │
//!          ▼
//! ┌─────────────────┐     ┌──────────────────┐
//! │    Handler      │────>│    WriteBatch    │
//! │ (server/keyspace│     └────────┬─────────┘
//! │    /zset)       │              │ committed only on success
//! └────────┬────────┘              ▼
//!          │              ┌──────────────────┐
//!          └─────────────>│     Backend      │
//!                  reads  └──────────────────┘
//! ```
//!
//! ## Commands
//!
//! - Keyspace: `DEL`
//! - Sorted sets: `ZADD`, `ZCARD`, `ZINCRBY`, `ZRANGE`, `ZREM`,
//!   `ZREVRANGE`, `ZSCORE`
//! - Server: `PING`, `ECHO`

pub mod dispatch;
pub mod keyspace;
pub mod registry;
pub mod server;
pub mod zset;

// Re-export the dispatch surface
pub use dispatch::{Context, Dispatcher};
pub use registry::{Arity, CommandDescriptor, CommandFn, CommandTable};
