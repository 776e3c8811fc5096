//! The chat engine: Directory, server identity and command registry behind
//! a socket-free interface.
//!
//! The reactor feeds it accepted connections, raw reads, hangups and clock
//! ticks, and collects the bytes it queued. Nothing in here awaits.

use crate::handlers::{Context, Registry, server_notice};
use crate::state::{ConnId, Connection, Directory, ServerInfo};
use bytes::Bytes;
use ircserv_proto::Message;
use std::net::SocketAddr;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// What the idle check decided for one connection.
enum Keepalive {
    Nothing,
    Answered,
    Ping,
    Close(String),
}

pub struct Engine {
    directory: Directory,
    server: ServerInfo,
    registry: Registry,
}

impl Engine {
    pub fn new(server: ServerInfo) -> Self {
        Self {
            directory: Directory::new(),
            server,
            registry: Registry::new(),
        }
    }

    pub fn directory(&self) -> &Directory {
        &self.directory
    }

    #[cfg(test)]
    pub fn server(&self) -> &ServerInfo {
        &self.server
    }

    pub fn is_closing(&self, id: ConnId) -> bool {
        self.directory
            .connection(id)
            .is_some_and(Connection::is_closing)
    }

    /// Create the record for a new connection and greet it.
    pub fn accept(&mut self, id: ConnId, addr: SocketAddr, now: Instant) {
        let limits = &self.server.limits;
        let mut conn = Connection::new(id, addr, limits.max_line_len, limits.max_sendq, now);
        conn.send(&server_notice(
            &self.server.name,
            "*",
            "*** Send PASS <password>, NICK <nick> and USER <user> 0 * :<realname> to register",
        ));
        self.directory.add_connection(conn);
        debug!(conn = %id, %addr, "Connection record created");
    }

    /// Frame, parse and dispatch everything `bytes` completes.
    ///
    /// Lines after the one that marks the connection closing are dropped,
    /// as is anything that does not parse.
    pub fn receive(&mut self, id: ConnId, bytes: &[u8], now: Instant) {
        match self.directory.connection_mut(id) {
            Some(conn) if !conn.is_closing() => conn.framer.feed(bytes),
            _ => return,
        }

        loop {
            let Some(conn) = self.directory.connection_mut(id) else {
                return;
            };
            if conn.is_closing() {
                return;
            }
            let line = match conn.framer.next_line() {
                Ok(Some(line)) => line,
                Ok(None) => return,
                Err(e) => {
                    warn!(conn = %id, error = %e, "Dropping connection");
                    conn.framer.clear();
                    self.directory.close(id, "Input line too long");
                    return;
                }
            };
            conn.last_activity = now;

            let text = String::from_utf8_lossy(&line);
            let msg = match Message::parse(&text) {
                Ok(msg) => msg,
                Err(e) => {
                    debug!(conn = %id, error = %e, "Discarding unparseable line");
                    continue;
                }
            };

            let mut ctx = Context::new(id, &mut self.directory, &self.server);
            self.registry.dispatch(&mut ctx, &msg);
        }
    }

    /// The socket is gone: tear the connection down now.
    pub fn hangup(&mut self, id: ConnId, reason: &str) -> bool {
        let gone = self.directory.disconnect(id, reason).is_some();
        if gone {
            info!(conn = %id, %reason, "Connection lost");
        }
        gone
    }

    /// Enforce the registration deadline and the PING/timeout keepalive.
    pub fn tick(&mut self, now: Instant) {
        let timeouts = &self.server.timeouts;
        let registration = Duration::from_secs(timeouts.registration);
        let ping_every = Duration::from_secs(timeouts.ping);
        let ping_timeout = Duration::from_secs(timeouts.timeout);

        for id in self.directory.connection_ids() {
            let Some(conn) = self.directory.connection_mut(id) else {
                continue;
            };
            if conn.is_closing() {
                continue;
            }

            let action = if !conn.is_registered() {
                if now.saturating_duration_since(conn.connected_at) >= registration {
                    Keepalive::Close("Registration timeout".to_string())
                } else {
                    Keepalive::Nothing
                }
            } else {
                match conn.ping_sent {
                    Some(sent) if conn.last_activity > sent => Keepalive::Answered,
                    Some(sent) if now.saturating_duration_since(sent) >= ping_timeout => {
                        let idle = now.saturating_duration_since(conn.last_activity).as_secs();
                        Keepalive::Close(format!("Ping timeout: {idle} seconds"))
                    }
                    Some(_) => Keepalive::Nothing,
                    None if now.saturating_duration_since(conn.last_activity) >= ping_every => {
                        Keepalive::Ping
                    }
                    None => Keepalive::Nothing,
                }
            };

            match action {
                Keepalive::Nothing => {}
                Keepalive::Answered => conn.ping_sent = None,
                Keepalive::Ping => {
                    conn.ping_sent = Some(now);
                    let ping = Message::ping(self.server.name.as_str());
                    self.directory.send_to(id, &ping);
                }
                Keepalive::Close(reason) => {
                    info!(conn = %id, %reason, "Closing idle connection");
                    self.directory.close(id, &reason);
                }
            }
        }
    }

    /// Mark every connection closing with the shutdown notice.
    pub fn shutdown(&mut self) {
        for id in self.directory.connection_ids() {
            self.directory.close(id, "Server shutting down");
        }
    }

    /// Take the bytes queued on every connection touched since last time.
    pub fn drain_output(&mut self) -> Vec<(ConnId, Bytes)> {
        self.directory
            .take_dirty()
            .into_iter()
            .filter_map(|id| {
                let conn = self.directory.connection_mut(id)?;
                (!conn.sendq.is_empty()).then(|| (id, conn.sendq.drain()))
            })
            .collect()
    }

    /// Put back bytes the writer had no room for. They go out after the
    /// next [`writable`](Self::writable).
    pub fn requeue(&mut self, id: ConnId, bytes: Bytes) {
        if let Some(conn) = self.directory.connection_mut(id) {
            conn.sendq.requeue_front(bytes);
        }
    }

    pub fn writable(&mut self, id: ConnId) {
        self.directory.wake(id);
    }

    /// Tear down every connection marked closing. Returns their ids.
    pub fn reap(&mut self) -> Vec<ConnId> {
        let closing = self.directory.closing_ids();
        for &id in &closing {
            let reason = self
                .directory
                .connection(id)
                .and_then(|c| c.closing.clone())
                .unwrap_or_default();
            if let Some(conn) = self.directory.disconnect(id, &reason) {
                info!(
                    conn = %id,
                    nick = %conn.user.nick_or_star(),
                    %reason,
                    "Client disconnected"
                );
            }
        }
        closing
    }
}
