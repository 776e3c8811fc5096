//! Outbound byte queue for one connection.
//!
//! Enqueueing only appends; the reactor drains the queue into the socket
//! writer and puts back whatever the writer could not take yet.

use bytes::{Bytes, BytesMut};
use thiserror::Error;

/// The queue would grow past its cap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("send queue exceeded: {queued} bytes queued (limit: {limit})")]
pub struct SendQueueExceeded {
    pub queued: usize,
    pub limit: usize,
}

#[derive(Debug)]
pub struct SendQueue {
    buf: BytesMut,
    limit: usize,
}

impl SendQueue {
    pub fn new(limit: usize) -> Self {
        Self {
            buf: BytesMut::new(),
            limit,
        }
    }

    /// Append bytes, refusing if that would pass the cap.
    ///
    /// On refusal nothing is appended.
    pub fn enqueue(&mut self, bytes: &[u8]) -> Result<(), SendQueueExceeded> {
        let queued = self.buf.len() + bytes.len();
        if queued > self.limit {
            return Err(SendQueueExceeded {
                queued,
                limit: self.limit,
            });
        }
        self.buf.extend_from_slice(bytes);
        Ok(())
    }

    /// Append bytes regardless of the cap. Used for the final line before
    /// a connection is closed.
    pub fn force(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }

    /// Take everything queued.
    pub fn drain(&mut self) -> Bytes {
        self.buf.split().freeze()
    }

    /// Put bytes the writer refused back in front of anything queued since.
    pub fn requeue_front(&mut self, bytes: Bytes) {
        if self.buf.is_empty() {
            self.buf.extend_from_slice(&bytes);
            return;
        }
        let mut merged = BytesMut::with_capacity(bytes.len() + self.buf.len());
        merged.extend_from_slice(&bytes);
        merged.extend_from_slice(&self.buf);
        self.buf = merged;
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enqueue_and_drain() {
        let mut q = SendQueue::new(64);
        q.enqueue(b"PING a\r\n").unwrap();
        q.enqueue(b"PING b\r\n").unwrap();
        assert_eq!(q.len(), 16);
        assert_eq!(&q.drain()[..], b"PING a\r\nPING b\r\n");
        assert!(q.is_empty());
    }

    #[test]
    fn test_cap_refuses_without_partial_append() {
        let mut q = SendQueue::new(10);
        q.enqueue(b"12345678").unwrap();
        let err = q.enqueue(b"abc").unwrap_err();
        assert_eq!(err, SendQueueExceeded { queued: 11, limit: 10 });
        assert_eq!(q.len(), 8);

        q.force(b"abc");
        assert_eq!(q.len(), 11);
    }

    #[test]
    fn test_requeue_keeps_order() {
        let mut q = SendQueue::new(64);
        q.enqueue(b"first ").unwrap();
        let taken = q.drain();
        q.enqueue(b"third").unwrap();
        q.requeue_front(taken);
        assert_eq!(&q.drain()[..], b"first third");
    }
}
