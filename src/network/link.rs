//! Socket tasks for one connection.
//!
//! The reader forwards raw reads as [`NetEvent::Data`]. The writer drains a
//! bounded queue of byte chunks into the socket; when the reactor finds the
//! queue full it raises `want_write` and the writer answers with
//! [`NetEvent::Writable`] after its next write.

use super::NetEvent;
use crate::state::ConnId;
use bytes::{Bytes, BytesMut};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::sync::mpsc::{self, error::TrySendError};
use tokio::task::JoinHandle;
use tokio_util::sync::{CancellationToken, DropGuard};
use tracing::{debug, instrument};

/// Read buffer growth step.
const READ_CHUNK: usize = 4096;

/// A peer that stops reading gets this long per chunk before the writer
/// gives up on it.
const WRITE_TIMEOUT: Duration = Duration::from_secs(30);

/// The reactor's handle on a connection's socket tasks.
///
/// Dropping it stops the reader at once and lets the writer finish what is
/// already queued before it shuts the socket down.
#[derive(Debug)]
pub struct Link {
    tx: mpsc::Sender<Bytes>,
    want_write: Arc<AtomicBool>,
    writer: JoinHandle<()>,
    _reader: DropGuard,
}

/// A reader that has not started yet.
///
/// Started only after the `Accepted` event is queued, so no `Data` can
/// overtake it.
pub struct PendingReader {
    id: ConnId,
    half: OwnedReadHalf,
    events: mpsc::Sender<NetEvent>,
    cancel: CancellationToken,
}

impl Link {
    /// Split `stream` and start its writer.
    pub fn open(
        id: ConnId,
        stream: TcpStream,
        events: mpsc::Sender<NetEvent>,
        queue: usize,
    ) -> (Link, PendingReader) {
        let (read_half, write_half) = stream.into_split();
        let (tx, rx) = mpsc::channel(queue.max(1));
        let want_write = Arc::new(AtomicBool::new(false));
        let cancel = CancellationToken::new();

        let writer = tokio::spawn(write_loop(
            id,
            write_half,
            rx,
            Arc::clone(&want_write),
            events.clone(),
        ));

        let link = Link {
            tx,
            want_write,
            writer,
            _reader: cancel.clone().drop_guard(),
        };
        let reader = PendingReader {
            id,
            half: read_half,
            events,
            cancel,
        };
        (link, reader)
    }

    /// Hand a chunk to the writer without waiting.
    pub fn try_send(&self, bytes: Bytes) -> Result<(), TrySendError<Bytes>> {
        self.tx.try_send(bytes)
    }

    /// Queue a final chunk for a connection that is going away, waiting for
    /// room in the background.
    pub fn send_detached(&self, bytes: Bytes) {
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let _ = tx.send(bytes).await;
        });
    }

    /// Ask the writer for a `Writable` event after its next write.
    pub fn want_write(&self) {
        self.want_write.store(true, Ordering::Release);
    }

    /// Drop the handle, keeping the writer task to await.
    pub fn into_writer(self) -> JoinHandle<()> {
        let Link { writer, .. } = self;
        writer
    }
}

impl PendingReader {
    pub fn spawn(self) {
        tokio::spawn(read_loop(self.id, self.half, self.events, self.cancel));
    }
}

#[instrument(skip_all, fields(conn = %id))]
async fn read_loop(
    id: ConnId,
    mut half: OwnedReadHalf,
    events: mpsc::Sender<NetEvent>,
    cancel: CancellationToken,
) {
    let mut buf = BytesMut::with_capacity(READ_CHUNK);
    loop {
        buf.reserve(READ_CHUNK);
        let read = tokio::select! {
            _ = cancel.cancelled() => return,
            read = half.read_buf(&mut buf) => read,
        };
        match read {
            Ok(0) => {
                debug!("Peer closed connection");
                break;
            }
            Ok(_) => {
                let bytes = buf.split().freeze();
                if events.send(NetEvent::Data { id, bytes }).await.is_err() {
                    return;
                }
            }
            Err(e) => {
                debug!(error = %e, "Read error");
                break;
            }
        }
    }
    let _ = events.send(NetEvent::Closed { id }).await;
}

#[instrument(skip_all, fields(conn = %id))]
async fn write_loop(
    id: ConnId,
    mut half: OwnedWriteHalf,
    mut rx: mpsc::Receiver<Bytes>,
    want_write: Arc<AtomicBool>,
    events: mpsc::Sender<NetEvent>,
) {
    while let Some(bytes) = rx.recv().await {
        let written = tokio::time::timeout(WRITE_TIMEOUT, half.write_all(&bytes)).await;
        match written {
            Ok(Ok(())) => {}
            Ok(Err(e)) => {
                debug!(error = %e, "Write error");
                let _ = events.send(NetEvent::Closed { id }).await;
                return;
            }
            Err(_) => {
                debug!("Write timed out");
                let _ = events.send(NetEvent::Closed { id }).await;
                return;
            }
        }
        if want_write.swap(false, Ordering::AcqRel)
            && events.send(NetEvent::Writable { id }).await.is_err()
        {
            return;
        }
    }
    let _ = half.shutdown().await;
}
