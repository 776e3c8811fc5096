//! Per-socket connection record.
//!
//! The record carries everything the core knows about one socket: its
//! inbound framer, outbound queue, registration progress, timers and the
//! user identity. The socket itself lives with the reactor.

use crate::state::{ConnId, SendQueue, User};
use ircserv_proto::{LineFramer, Message};
use std::net::SocketAddr;
use std::time::Instant;

/// Registration progress.
///
/// ```text
/// Unauthenticated --PASS ok--> PassOk --NICK+USER--> Registered
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RegistrationState {
    #[default]
    Unauthenticated,
    PassOk,
    Registered,
}

#[derive(Debug)]
pub struct Connection {
    pub id: ConnId,
    pub addr: SocketAddr,
    pub state: RegistrationState,
    pub user: User,
    pub framer: LineFramer,
    pub sendq: SendQueue,
    /// Set once the connection is being closed; holds the reason peers see.
    pub closing: Option<String>,
    pub connected_at: Instant,
    /// Wall-clock connect time (unix seconds), shown in WHOIS.
    pub signon: i64,
    pub last_activity: Instant,
    /// When the server sent a keepalive PING that is still unanswered.
    pub ping_sent: Option<Instant>,
}

impl Connection {
    pub fn new(
        id: ConnId,
        addr: SocketAddr,
        max_line_len: usize,
        max_sendq: usize,
        now: Instant,
    ) -> Self {
        Self {
            id,
            addr,
            state: RegistrationState::Unauthenticated,
            user: User::new(addr.ip().to_string()),
            framer: LineFramer::with_max_len(max_line_len),
            sendq: SendQueue::new(max_sendq),
            closing: None,
            connected_at: now,
            signon: chrono::Utc::now().timestamp(),
            last_activity: now,
            ping_sent: None,
        }
    }

    pub fn is_registered(&self) -> bool {
        self.state == RegistrationState::Registered
    }

    /// Password, nick and username are all present and registration has not
    /// fired yet.
    pub fn can_register(&self) -> bool {
        self.state == RegistrationState::PassOk
            && self.user.nick.as_deref().is_some_and(|n| !n.is_empty())
            && self.user.username.as_deref().is_some_and(|u| !u.is_empty())
    }

    pub fn is_closing(&self) -> bool {
        self.closing.is_some()
    }

    /// Queue a message. Returns `false` if it was not queued.
    ///
    /// Overflowing the send queue closes the connection.
    pub fn send(&mut self, msg: &Message) -> bool {
        if self.is_closing() {
            return false;
        }
        let line = msg.to_string();
        match self.sendq.enqueue(line.as_bytes()) {
            Ok(()) => {
                crate::metrics::record_sent();
                true
            }
            Err(e) => {
                tracing::warn!(conn = %self.id, error = %e, "Send queue overflow");
                self.close("Max SendQ exceeded");
                false
            }
        }
    }

    /// Mark for teardown and queue the final `ERROR` line. Idempotent.
    pub fn close(&mut self, reason: &str) {
        if self.is_closing() {
            return;
        }
        let line = Message::error(format!("Closing Link: {} ({})", self.user.host, reason));
        self.sendq.force(line.to_string().as_bytes());
        self.closing = Some(reason.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn conn(max_sendq: usize) -> Connection {
        let addr: SocketAddr = "127.0.0.1:50000".parse().unwrap();
        Connection::new(ConnId::new(1), addr, 512, max_sendq, Instant::now())
    }

    #[test]
    fn test_can_register_needs_all_three() {
        let mut c = conn(1024);
        c.user.nick = Some("alice".into());
        c.user.username = Some("a".into());
        assert!(!c.can_register());

        c.state = RegistrationState::PassOk;
        assert!(c.can_register());

        c.state = RegistrationState::Registered;
        assert!(!c.can_register());
    }

    #[test]
    fn test_close_is_idempotent() {
        let mut c = conn(1024);
        c.close("Quit: bye");
        c.close("again");
        assert_eq!(c.closing.as_deref(), Some("Quit: bye"));
        assert_eq!(
            &c.sendq.drain()[..],
            b"ERROR :Closing Link: 127.0.0.1 (Quit: bye)\r\n"
        );
        assert!(!c.send(&Message::ping("x")));
    }

    #[test]
    fn test_overflow_closes() {
        let mut c = conn(16);
        assert!(c.send(&Message::ping("a")));
        assert!(!c.send(&Message::privmsg("alice", "far too long for the queue")));
        assert_eq!(c.closing.as_deref(), Some("Max SendQ exceeded"));
    }
}
