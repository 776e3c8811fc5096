//! Channel-related types and state.

use crate::error::ChannelError;
use crate::state::ConnId;
use std::collections::HashSet;

/// Channel topic with metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Topic {
    pub text: String,
    pub set_by: String,
    pub set_at: i64,
}

/// Member modes.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct MemberModes {
    pub op: bool, // +o (@)
}

impl MemberModes {
    /// Prefix shown in NAMES and WHO.
    pub fn prefix_char(&self) -> Option<char> {
        self.op.then_some('@')
    }
}

/// Channel modes.
///
/// Key-protected and limit-enforced are represented by `key` and `limit`
/// being set, so a flag can never disagree with its value.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ChannelModes {
    pub invite_only: bool,   // +i
    pub topic_lock: bool,    // +t
    pub key: Option<String>, // +k
    pub limit: Option<usize>, // +l
}

impl ChannelModes {
    /// Mode letters plus their arguments, e.g. `("+ikl", ["secret", "10"])`.
    ///
    /// Arguments are only included when `with_args` is set, so key values
    /// are not leaked to non-members.
    pub fn as_mode_string(&self, with_args: bool) -> (String, Vec<String>) {
        let mut s = String::from("+");
        let mut args = Vec::new();
        if self.invite_only {
            s.push('i');
        }
        if self.topic_lock {
            s.push('t');
        }
        if let Some(key) = &self.key {
            s.push('k');
            if with_args {
                args.push(key.clone());
            }
        }
        if let Some(limit) = self.limit {
            s.push('l');
            if with_args {
                args.push(limit.to_string());
            }
        }
        (s, args)
    }
}

/// A chat channel.
///
/// Members are kept in join order. Operator status lives on the member
/// entry, so removing a member drops its operator status with it.
#[derive(Debug, Clone)]
pub struct Channel {
    pub name: String,
    pub topic: Option<Topic>,
    pub created: i64,
    pub modes: ChannelModes,
    members: Vec<(ConnId, MemberModes)>,
    /// Invited nicknames; an entry is consumed by a successful join.
    invites: HashSet<String>,
}

impl Channel {
    pub fn new(name: impl Into<String>, created: i64) -> Self {
        Self {
            name: name.into(),
            topic: None,
            created,
            modes: ChannelModes::default(),
            members: Vec::new(),
            invites: HashSet::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn is_member(&self, id: ConnId) -> bool {
        self.member_modes(id).is_some()
    }

    pub fn is_op(&self, id: ConnId) -> bool {
        self.member_modes(id).is_some_and(|m| m.op)
    }

    pub fn member_modes(&self, id: ConnId) -> Option<MemberModes> {
        self.members
            .iter()
            .find(|(member, _)| *member == id)
            .map(|(_, modes)| *modes)
    }

    /// Members in join order.
    pub fn members(&self) -> impl Iterator<Item = (ConnId, MemberModes)> + '_ {
        self.members.iter().copied()
    }

    pub fn member_ids(&self) -> impl Iterator<Item = ConnId> + '_ {
        self.members.iter().map(|(id, _)| *id)
    }

    /// Add a member. Returns `false` if already present.
    pub fn add_member(&mut self, id: ConnId, modes: MemberModes) -> bool {
        if self.is_member(id) {
            return false;
        }
        self.members.push((id, modes));
        true
    }

    /// Remove a member (and with it any operator status).
    pub fn remove_member(&mut self, id: ConnId) -> bool {
        let before = self.members.len();
        self.members.retain(|(member, _)| *member != id);
        self.members.len() != before
    }

    /// Grant or revoke operator status. Returns whether anything changed.
    pub fn set_op(&mut self, id: ConnId, op: bool) -> Result<bool, ChannelError> {
        let entry = self
            .members
            .iter_mut()
            .find(|(member, _)| *member == id)
            .map(|(_, modes)| modes);
        match entry {
            Some(modes) if modes.op == op => Ok(false),
            Some(modes) => {
                modes.op = op;
                Ok(true)
            }
            None => Err(ChannelError::NotOnChannel),
        }
    }

    pub fn invite(&mut self, nick: &str) {
        self.invites.insert(nick.to_string());
    }

    pub fn is_invited(&self, nick: &str) -> bool {
        self.invites.contains(nick)
    }

    /// Consume an invite after a successful join.
    pub fn take_invite(&mut self, nick: &str) -> bool {
        self.invites.remove(nick)
    }

    /// Admission checks for a join, in order: invite-only, key, limit.
    ///
    /// The limit is compared against the current member count; a join is
    /// refused only once that count is already past the limit.
    pub fn check_join(&self, nick: &str, key: Option<&str>) -> Result<(), ChannelError> {
        if self.modes.invite_only && !self.is_invited(nick) {
            return Err(ChannelError::InviteOnlyChan);
        }
        if let Some(expected) = &self.modes.key
            && key != Some(expected.as_str())
        {
            return Err(ChannelError::BadChannelKey);
        }
        if let Some(limit) = self.modes.limit
            && self.members.len() > limit
        {
            return Err(ChannelError::ChannelIsFull);
        }
        Ok(())
    }
}
