//! The Directory: authoritative in-memory state.
//!
//! Holds every live connection, the nickname index and the channels. It is
//! owned by the reactor task and lent to one handler at a time, so nothing
//! here needs a lock.

use crate::state::{Channel, ConnId, Connection, MemberModes};
use std::collections::{BTreeMap, BTreeSet, HashMap};

#[derive(Debug, Default)]
pub struct Directory {
    connections: HashMap<ConnId, Connection>,
    /// Nick to connection id. Case-sensitive.
    nicks: HashMap<String, ConnId>,
    /// Channels by name. Ordered so LIST and NAMES are stable.
    channels: BTreeMap<String, Channel>,
    /// Connections with bytes queued since the last flush.
    dirty: BTreeSet<ConnId>,
}

impl Directory {
    pub fn new() -> Self {
        Self::default()
    }

    // ========================================================================
    // Connections
    // ========================================================================

    pub fn add_connection(&mut self, conn: Connection) {
        let id = conn.id;
        if !conn.sendq.is_empty() {
            self.dirty.insert(id);
        }
        self.connections.insert(id, conn);
        crate::metrics::set_connected(self.connections.len());
    }

    pub fn connection(&self, id: ConnId) -> Option<&Connection> {
        self.connections.get(&id)
    }

    pub fn connection_mut(&mut self, id: ConnId) -> Option<&mut Connection> {
        self.connections.get_mut(&id)
    }

    #[cfg(test)]
    pub fn contains(&self, id: ConnId) -> bool {
        self.connections.contains_key(&id)
    }

    pub fn connection_count(&self) -> usize {
        self.connections.len()
    }

    pub fn connections(&self) -> impl Iterator<Item = &Connection> {
        self.connections.values()
    }

    /// Ids of every live connection, sorted.
    pub fn connection_ids(&self) -> Vec<ConnId> {
        let mut ids: Vec<_> = self.connections.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    /// Remove a record without any notification. Teardown goes through
    /// [`Directory::disconnect`].
    pub(super) fn remove_connection(&mut self, id: ConnId) -> Option<Connection> {
        let conn = self.connections.remove(&id)?;
        self.dirty.remove(&id);
        crate::metrics::set_connected(self.connections.len());
        Some(conn)
    }

    // ========================================================================
    // Nicknames
    // ========================================================================

    pub fn nick_to_id(&self, nick: &str) -> Option<ConnId> {
        self.nicks.get(nick).copied()
    }

    /// Whether a nick is held by a connection other than `except`.
    pub fn nick_in_use(&self, nick: &str, except: ConnId) -> bool {
        self.nick_to_id(nick).is_some_and(|holder| holder != except)
    }

    /// Give `id` a new nick and update the index.
    ///
    /// The caller checks uniqueness first. Returns the previous nick.
    pub fn set_nick(&mut self, id: ConnId, nick: &str) -> Option<String> {
        let conn = self.connections.get_mut(&id)?;
        let old = conn.user.nick.replace(nick.to_string());
        if let Some(old_nick) = &old
            && self.nicks.get(old_nick) == Some(&id)
        {
            self.nicks.remove(old_nick);
        }
        self.nicks.insert(nick.to_string(), id);
        old
    }

    pub(super) fn release_nick(&mut self, id: ConnId, nick: &str) {
        if self.nicks.get(nick) == Some(&id) {
            self.nicks.remove(nick);
        }
    }

    #[cfg(test)]
    pub fn nick_count(&self) -> usize {
        self.nicks.len()
    }

    // ========================================================================
    // Channels
    // ========================================================================

    pub fn channel(&self, name: &str) -> Option<&Channel> {
        self.channels.get(name)
    }

    pub fn channel_mut(&mut self, name: &str) -> Option<&mut Channel> {
        self.channels.get_mut(name)
    }

    pub fn channels(&self) -> impl Iterator<Item = &Channel> {
        self.channels.values()
    }

    #[cfg(test)]
    pub fn channel_count(&self) -> usize {
        self.channels.len()
    }

    /// Create an empty channel. Returns `false` if the name is taken.
    pub fn create_channel(&mut self, channel: Channel) -> bool {
        if self.channels.contains_key(&channel.name) {
            return false;
        }
        self.channels.insert(channel.name.clone(), channel);
        crate::metrics::set_channels(self.channels.len());
        true
    }

    /// Add `id` to an existing channel and record it on the user.
    pub fn add_member(&mut self, id: ConnId, name: &str, modes: MemberModes) -> bool {
        let Some(conn) = self.connections.get_mut(&id) else {
            return false;
        };
        let Some(chan) = self.channels.get_mut(name) else {
            return false;
        };
        if !chan.add_member(id, modes) {
            return false;
        }
        conn.user.channels.insert(name.to_string());
        true
    }

    /// Remove `id` from a channel, deleting the channel once it is empty.
    ///
    /// Returns whether `id` was a member.
    pub fn remove_member(&mut self, id: ConnId, name: &str) -> bool {
        if let Some(conn) = self.connections.get_mut(&id) {
            conn.user.channels.remove(name);
        }
        let Some(chan) = self.channels.get_mut(name) else {
            return false;
        };
        let removed = chan.remove_member(id);
        if chan.is_empty() {
            self.channels.remove(name);
            crate::metrics::set_channels(self.channels.len());
            tracing::debug!(channel = %name, "Channel emptied and removed");
        }
        removed
    }

    // ========================================================================
    // Flush bookkeeping
    // ========================================================================

    pub(super) fn mark_dirty(&mut self, id: ConnId) {
        self.dirty.insert(id);
    }

    /// Connections with pending output since the last call.
    pub fn take_dirty(&mut self) -> Vec<ConnId> {
        std::mem::take(&mut self.dirty).into_iter().collect()
    }

    /// Flag a connection for another flush attempt (the writer has room again).
    pub fn wake(&mut self, id: ConnId) {
        if self.connections.get(&id).is_some_and(|c| !c.sendq.is_empty()) {
            self.dirty.insert(id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::SocketAddr;
    use std::time::Instant;

    fn add(dir: &mut Directory, n: u64) -> ConnId {
        let id = ConnId::new(n);
        let addr: SocketAddr = "127.0.0.1:4000".parse().unwrap();
        dir.add_connection(Connection::new(id, addr, 512, 4096, Instant::now()));
        id
    }

    #[test]
    fn test_set_nick_moves_index() {
        let mut dir = Directory::new();
        let a = add(&mut dir, 1);

        assert_eq!(dir.set_nick(a, "alice"), None);
        assert_eq!(dir.nick_to_id("alice"), Some(a));

        assert_eq!(dir.set_nick(a, "alicia").as_deref(), Some("alice"));
        assert_eq!(dir.nick_to_id("alice"), None);
        assert_eq!(dir.nick_to_id("alicia"), Some(a));
        assert_eq!(dir.nick_count(), 1);
    }

    #[test]
    fn test_nick_in_use_is_case_sensitive() {
        let mut dir = Directory::new();
        let a = add(&mut dir, 1);
        let b = add(&mut dir, 2);
        dir.set_nick(a, "alice");

        assert!(dir.nick_in_use("alice", b));
        assert!(!dir.nick_in_use("alice", a));
        assert!(!dir.nick_in_use("Alice", b));
    }

    #[test]
    fn test_last_member_removes_channel() {
        let mut dir = Directory::new();
        let a = add(&mut dir, 1);
        dir.create_channel(Channel::new("#team", 0));
        assert!(dir.add_member(a, "#team", MemberModes { op: true }));
        assert!(dir.connection(a).unwrap().user.channels.contains("#team"));

        assert!(dir.remove_member(a, "#team"));
        assert!(dir.channel("#team").is_none());
        assert!(dir.connection(a).unwrap().user.channels.is_empty());
    }

    #[test]
    fn test_create_channel_once() {
        let mut dir = Directory::new();
        assert!(dir.create_channel(Channel::new("#team", 0)));
        assert!(!dir.create_channel(Channel::new("#team", 1)));
        assert_eq!(dir.channel_count(), 1);
    }
}
