//! Server Commands
//!
//! The two connection-level commands. Neither touches storage.

use crate::commands::dispatch::Context;
use crate::error::HandlerError;
use crate::protocol::Reply;
use crate::storage::WriteBatch;
use bytes::Bytes;

/// PING
pub fn ping(
    _context: &Context<'_>,
    _args: &[Bytes],
    _batch: Option<&mut WriteBatch>,
) -> Result<Reply, HandlerError> {
    Ok(Reply::simple("PONG"))
}

/// ECHO message
pub fn echo(
    _context: &Context<'_>,
    args: &[Bytes],
    _batch: Option<&mut WriteBatch>,
) -> Result<Reply, HandlerError> {
    Ok(Reply::bulk(args[0].clone()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::registry::CommandTable;
    use crate::commands::Dispatcher;
    use crate::storage::MemoryBackend;
    use std::sync::Arc;

    fn dispatcher() -> Dispatcher {
        Dispatcher::new(CommandTable::builtin(), Arc::new(MemoryBackend::new()))
    }

    #[test]
    fn ping_replies_pong() {
        let reply = dispatcher().dispatch("ping", &[]).unwrap();
        assert_eq!(reply, Reply::simple("PONG"));
        assert_eq!(reply.serialize(), b"+PONG\r\n");
    }

    #[test]
    fn echo_returns_its_argument_byte_for_byte() {
        let reply = dispatcher()
            .dispatch("echo", &[Bytes::from_static(b"hello")])
            .unwrap();
        assert_eq!(reply, Reply::bulk(Bytes::from_static(b"hello")));
        assert_eq!(reply.serialize(), b"$5\r\nhello\r\n");
    }

    #[test]
    fn echo_is_binary_safe() {
        let payload = Bytes::from_static(b"\x00\xffbin\r\n");
        let reply = dispatcher().dispatch("echo", &[payload.clone()]).unwrap();
        assert_eq!(reply, Reply::bulk(payload));
    }
}
