//! Storage Module
//!
//! The seam between the command layer and the storage engine. The engine
//! itself is an external collaborator reached through the [`Backend`] trait;
//! this crate supplies the atomic [`WriteBatch`] it consumes and an
//! in-memory ordered reference implementation for tests and embedders.

pub mod backend;
pub mod batch;
pub mod memory;

// Re-export commonly used types
pub use backend::{Backend, ReadOptions, DEFAULT_READ_OPTIONS};
pub use batch::{BatchOp, WriteBatch};
pub use memory::MemoryBackend;
