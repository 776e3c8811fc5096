//! Fan-out and teardown.
//!
//! Every delivery is an append to a send queue; the reactor flushes queues
//! after the handler returns. Nothing here performs I/O.

use crate::state::{ConnId, Connection, Directory};
use ircserv_proto::Message;
use std::collections::BTreeSet;

impl Directory {
    /// Queue `msg` for one connection. Unknown ids are ignored.
    pub fn send_to(&mut self, id: ConnId, msg: &Message) -> bool {
        let Some(conn) = self.connection_mut(id) else {
            return false;
        };
        let queued = conn.send(msg);
        // A refused send may still have queued the closing ERROR line.
        self.mark_dirty(id);
        queued
    }

    /// Queue `msg` for every member of `channel` except `exclude`.
    ///
    /// Returns the number of recipients.
    pub fn broadcast(&mut self, channel: &str, msg: &Message, exclude: Option<ConnId>) -> usize {
        let Some(chan) = self.channel(channel) else {
            return 0;
        };
        let targets: Vec<ConnId> = chan
            .member_ids()
            .filter(|id| Some(*id) != exclude)
            .collect();

        let mut sent = 0;
        for id in targets {
            if self.send_to(id, msg) {
                sent += 1;
            }
        }
        crate::metrics::record_fanout(sent);
        sent
    }

    /// Every connection sharing at least one channel with `id`, each once.
    pub fn peers_of(&self, id: ConnId) -> BTreeSet<ConnId> {
        let mut peers = BTreeSet::new();
        let Some(conn) = self.connection(id) else {
            return peers;
        };
        for name in &conn.user.channels {
            if let Some(chan) = self.channel(name) {
                peers.extend(chan.member_ids());
            }
        }
        peers.remove(&id);
        peers
    }

    /// Queue `msg` once for every peer of `id`, and for `id` itself when
    /// `include_self` is set.
    pub fn send_to_peers(&mut self, id: ConnId, msg: &Message, include_self: bool) {
        let mut targets = self.peers_of(id);
        if include_self {
            targets.insert(id);
        }
        for target in targets {
            self.send_to(target, msg);
        }
    }

    /// Mark a connection for teardown, queueing the final `ERROR` line.
    pub fn close(&mut self, id: ConnId, reason: &str) {
        if let Some(conn) = self.connection_mut(id) {
            conn.close(reason);
            self.mark_dirty(id);
        }
    }

    /// Ids of connections marked for teardown.
    pub fn closing_ids(&self) -> Vec<ConnId> {
        let mut ids: Vec<_> = self
            .connections()
            .filter(|c| c.is_closing())
            .map(|c| c.id)
            .collect();
        ids.sort_unstable();
        ids
    }

    /// Tear a connection down. Idempotent.
    ///
    /// Peers sharing a channel get one QUIT each, memberships are removed
    /// (emptied channels deleted), the nick is released and the record is
    /// removed and returned.
    pub fn disconnect(&mut self, id: ConnId, reason: &str) -> Option<Connection> {
        let conn = self.connection(id)?;
        let registered = conn.is_registered();
        let prefix = conn.user.prefix();
        let nick = conn.user.nick.clone();
        let channels: Vec<String> = conn.user.channels.iter().cloned().collect();

        if registered {
            let quit = Message::quit(reason).with_prefix(prefix);
            self.send_to_peers(id, &quit, false);
        }

        for name in &channels {
            self.remove_member(id, name);
        }
        if let Some(nick) = nick {
            self.release_nick(id, &nick);
        }

        self.remove_connection(id)
    }
}
