//! User-related types and state.

use ircserv_proto::Prefix;
use std::collections::BTreeSet;

/// Protocol identity attached to a connection.
///
/// Nick and username stay `None` until the client supplies them.
#[derive(Debug, Clone)]
pub struct User {
    pub nick: Option<String>,
    pub username: Option<String>,
    pub realname: String,
    /// Peer address as text; there is no reverse lookup.
    pub host: String,
    pub modes: UserModes,
    /// Away message if the user is marked away.
    pub away: Option<String>,
    /// Channels this user is in.
    pub channels: BTreeSet<String>,
}

/// User modes.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct UserModes {
    pub invisible: bool, // +i
    pub oper: bool,      // +o (server operator)
}

impl UserModes {
    /// Convert modes to a string like "+io".
    pub fn as_mode_string(&self) -> String {
        let mut s = String::from("+");
        if self.invisible {
            s.push('i');
        }
        if self.oper {
            s.push('o');
        }
        s
    }
}

impl User {
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            nick: None,
            username: None,
            realname: String::new(),
            host: host.into(),
            modes: UserModes::default(),
            away: None,
            channels: BTreeSet::new(),
        }
    }

    /// Nick for reply targets; `*` until one is set.
    pub fn nick_or_star(&self) -> &str {
        self.nick.as_deref().unwrap_or("*")
    }

    /// `nick!user@host` for messages this user originates.
    pub fn prefix(&self) -> Prefix {
        Prefix::new(
            self.nick_or_star(),
            self.username.as_deref().unwrap_or("*"),
            self.host.as_str(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefix_before_and_after_identity() {
        let mut user = User::new("10.0.0.1");
        assert_eq!(user.nick_or_star(), "*");
        assert_eq!(user.prefix().to_string(), "*!*@10.0.0.1");

        user.nick = Some("alice".into());
        user.username = Some("a".into());
        assert_eq!(user.prefix().to_string(), "alice!a@10.0.0.1");
    }

    #[test]
    fn test_mode_string() {
        let mut modes = UserModes::default();
        assert_eq!(modes.as_mode_string(), "+");
        modes.invisible = true;
        modes.oper = true;
        assert_eq!(modes.as_mode_string(), "+io");
    }
}
