//! Reply Model and Wire Encoding
//!
//! Replies form a closed set of response shapes, one enum variant per shape.
//! The consumer is a RESP-style encoder, so every shape has an exact byte
//! encoding:
//!
//! Simple String: `+PONG\r\n`
//! Error: `-syntax error\r\n`
//! Integer: `:1000\r\n`
//! Bulk: `$5\r\nhello\r\n`
//! Nil Bulk: `$-1\r\n`
//! Sequence: `*2\r\n$3\r\nfoo\r\n:7\r\n`
//! Nil Sequence: `*-1\r\n`
//!
//! Nil bulk, nil sequence, and *empty* sequence are three different values
//! with three different encodings; nothing in this module conflates them.
//! Sequence elements are deliberately restricted to bulk, integer, and nil —
//! nested sequences are not a shape any command produces.

use crate::error::CommandError;
use bytes::Bytes;

/// The CRLF terminator used by the wire encoding.
pub const CRLF: &[u8] = b"\r\n";

/// Wire type prefixes.
pub mod prefix {
    pub const SIMPLE: u8 = b'+';
    pub const ERROR: u8 = b'-';
    pub const INTEGER: u8 = b':';
    pub const BULK: u8 = b'$';
    pub const SEQUENCE: u8 = b'*';
}

/// An element of a sequence reply.
#[derive(Debug, Clone, PartialEq)]
pub enum Element {
    /// Binary-safe payload.
    Bulk(Bytes),
    /// Signed 64-bit integer.
    Integer(i64),
    /// Nil element, encoded as a nil bulk.
    Nil,
}

/// A response to a command.
#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    /// Single-line reply; must not contain CRLF.
    Simple(String),
    /// Error reply carrying the error kind; encoded from its display text.
    Error(CommandError),
    /// Signed 64-bit integer reply.
    Integer(i64),
    /// Bulk reply; `None` is the nil bulk.
    Bulk(Option<Bytes>),
    /// Sequence reply; `None` is the nil sequence, `Some(vec![])` the empty one.
    Sequence(Option<Vec<Element>>),
}

impl Reply {
    /// Creates a simple string reply.
    pub fn simple(text: impl Into<String>) -> Self {
        Reply::Simple(text.into())
    }

    /// Creates an error reply.
    pub fn error(kind: CommandError) -> Self {
        Reply::Error(kind)
    }

    /// Creates an integer reply.
    pub fn integer(value: i64) -> Self {
        Reply::Integer(value)
    }

    /// Creates a bulk reply.
    pub fn bulk(data: impl Into<Bytes>) -> Self {
        Reply::Bulk(Some(data.into()))
    }

    /// Creates the nil bulk reply.
    pub fn nil_bulk() -> Self {
        Reply::Bulk(None)
    }

    /// Creates a sequence reply.
    pub fn sequence(elements: Vec<Element>) -> Self {
        Reply::Sequence(Some(elements))
    }

    /// Creates the nil sequence reply.
    pub fn nil_sequence() -> Self {
        Reply::Sequence(None)
    }

    /// Returns true if this reply is an error.
    pub fn is_error(&self) -> bool {
        matches!(self, Reply::Error(_))
    }

    /// Serializes the reply to its wire bytes.
    pub fn serialize(&self) -> Vec<u8> {
        let mut buf = Vec::new();
        self.serialize_into(&mut buf);
        buf
    }

    /// Serializes the reply into an existing buffer.
    pub fn serialize_into(&self, buf: &mut Vec<u8>) {
        match self {
            Reply::Simple(text) => {
                buf.push(prefix::SIMPLE);
                buf.extend_from_slice(text.as_bytes());
                buf.extend_from_slice(CRLF);
            }
            Reply::Error(kind) => {
                buf.push(prefix::ERROR);
                buf.extend_from_slice(kind.to_string().as_bytes());
                buf.extend_from_slice(CRLF);
            }
            Reply::Integer(value) => {
                buf.push(prefix::INTEGER);
                buf.extend_from_slice(value.to_string().as_bytes());
                buf.extend_from_slice(CRLF);
            }
            Reply::Bulk(Some(data)) => write_bulk(buf, data),
            Reply::Bulk(None) => write_nil_bulk(buf),
            Reply::Sequence(Some(elements)) => {
                buf.push(prefix::SEQUENCE);
                buf.extend_from_slice(elements.len().to_string().as_bytes());
                buf.extend_from_slice(CRLF);
                for element in elements {
                    element.serialize_into(buf);
                }
            }
            Reply::Sequence(None) => {
                buf.push(prefix::SEQUENCE);
                buf.extend_from_slice(b"-1");
                buf.extend_from_slice(CRLF);
            }
        }
    }
}

impl Element {
    /// Serializes the element into an existing buffer.
    pub fn serialize_into(&self, buf: &mut Vec<u8>) {
        match self {
            Element::Bulk(data) => write_bulk(buf, data),
            Element::Integer(value) => {
                buf.push(prefix::INTEGER);
                buf.extend_from_slice(value.to_string().as_bytes());
                buf.extend_from_slice(CRLF);
            }
            Element::Nil => write_nil_bulk(buf),
        }
    }
}

fn write_bulk(buf: &mut Vec<u8>, data: &[u8]) {
    buf.push(prefix::BULK);
    buf.extend_from_slice(data.len().to_string().as_bytes());
    buf.extend_from_slice(CRLF);
    buf.extend_from_slice(data);
    buf.extend_from_slice(CRLF);
}

fn write_nil_bulk(buf: &mut Vec<u8>) {
    buf.push(prefix::BULK);
    buf.extend_from_slice(b"-1");
    buf.extend_from_slice(CRLF);
}
