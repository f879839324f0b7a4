//! Error types for RidgeKV
//!
//! The error taxonomy is split along one hard line: errors a client can
//! recover from (they become an `Error` reply and the pending write batch is
//! dropped), and fatal internal-consistency violations (the store contains
//! data this binary cannot interpret; processing must stop rather than guess).

use thiserror::Error;

/// Errors surfaced by a storage backend.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StorageError {
    /// The backend rejected or failed an operation.
    #[error("storage backend error: {0}")]
    Backend(String),

    /// A lock guarding backend state was poisoned by a panicking writer.
    #[error("lock poisoned: {0}")]
    LockPoisoned(String),
}

/// Recoverable command errors.
///
/// Every variant is returned to the client as an `Error` reply; the
/// dispatcher guarantees no batch is committed on the way out. Display
/// strings are the exact reply texts.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CommandError {
    /// Unknown command name, arity violation, or malformed argument shape.
    #[error("syntax error")]
    Syntax,

    /// The key's stored type tag does not match the operation's type.
    #[error("Operation against a key holding the wrong kind of value")]
    WrongType,

    /// A meta record exists but is structurally invalid (e.g. zero length).
    #[error("Invalid data")]
    InvalidData,

    /// A score argument could not be parsed as a float.
    #[error("value is not a valid float")]
    NotAFloat,

    /// A rank argument could not be parsed as an integer.
    #[error("value is not an integer or out of range")]
    NotAnInteger,

    /// A score operation produced NaN.
    #[error("resulting score is not a number (NaN)")]
    NanScore,

    /// The storage backend failed mid-command.
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Unrecoverable divergence between stored data and the type variants this
/// binary knows about. Never converted into a reply.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FatalError {
    /// A meta record carries a type tag with no registered variant.
    #[error("unknown type tag {tag:#04x} in meta record")]
    UnknownTypeTag { tag: u8 },
}

/// What a command handler can fail with: an error the client gets back, or a
/// fatal condition that stops command processing entirely.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum HandlerError {
    #[error(transparent)]
    Command(#[from] CommandError),

    #[error(transparent)]
    Fatal(#[from] FatalError),
}

impl From<StorageError> for HandlerError {
    fn from(err: StorageError) -> Self {
        HandlerError::Command(CommandError::Storage(err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reply_texts_match_wire_contract() {
        assert_eq!(CommandError::Syntax.to_string(), "syntax error");
        assert_eq!(
            CommandError::WrongType.to_string(),
            "Operation against a key holding the wrong kind of value"
        );
        assert_eq!(CommandError::InvalidData.to_string(), "Invalid data");
    }

    #[test]
    fn storage_errors_flow_into_handler_errors_as_recoverable() {
        let err: HandlerError = StorageError::Backend("disk on fire".into()).into();
        assert!(matches!(err, HandlerError::Command(CommandError::Storage(_))));
    }
}
