//! Readiness events delivered to the reactor.

use super::Link;
use crate::state::ConnId;
use bytes::Bytes;
use std::net::SocketAddr;

/// One thing that happened on a socket.
///
/// Events for a connection arrive in the order they happened: `Accepted`
/// always precedes that connection's first `Data`.
#[derive(Debug)]
pub enum NetEvent {
    /// A client connected. The reactor keeps `link` to write to it.
    Accepted {
        id: ConnId,
        addr: SocketAddr,
        link: Link,
    },
    /// Bytes read from the client, unframed.
    Data { id: ConnId, bytes: Bytes },
    /// The peer hung up or the socket failed.
    Closed { id: ConnId },
    /// The writer drained a chunk after the reactor asked to be told.
    Writable { id: ConnId },
}
