//! Reply Protocol
//!
//! The outward-facing half of the wire protocol: the closed set of reply
//! shapes commands can produce, and their byte encodings. Reading requests
//! off a connection is the surrounding server's job, not this crate's.

pub mod reply;

// Re-export commonly used types for convenience
pub use reply::{Element, Reply, CRLF};
