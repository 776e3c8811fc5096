//! IRC message prefix types.
//!
//! A prefix names the origin of a message: either a server or a user's
//! `nick!user@host` mask.
//!
//! # Reference
//! - RFC 2812 Section 2.3.1: Message format

use std::str::FromStr;

/// IRC message prefix - identifies the origin of a message.
#[derive(Clone, Eq, PartialEq, Debug, Hash)]
pub enum Prefix {
    /// Server name (e.g., "irc.example.com")
    ServerName(String),
    /// User prefix: (nickname, username, hostname)
    Nickname(String, String, String),
}

impl Prefix {
    /// Parse a prefix string into a Prefix.
    ///
    /// Lenient: components are not validated. A dot before any `!` or `@`
    /// marks a server name.
    pub fn new_from_str(s: &str) -> Self {
        #[derive(Copy, Clone, Eq, PartialEq)]
        enum Part {
            Name,
            User,
            Host,
        }

        let mut name = String::new();
        let mut user = String::new();
        let mut host = String::new();
        let mut part = Part::Name;
        let mut is_server = false;

        for c in s.chars() {
            if c == '.' && part == Part::Name {
                is_server = true;
            }

            match c {
                '!' if part == Part::Name => {
                    is_server = false;
                    part = Part::User;
                }
                '@' if part != Part::Host => {
                    is_server = false;
                    part = Part::Host;
                }
                _ => {
                    match part {
                        Part::Name => &mut name,
                        Part::User => &mut user,
                        Part::Host => &mut host,
                    }
                    .push(c);
                }
            }
        }

        if is_server {
            Prefix::ServerName(name)
        } else {
            Prefix::Nickname(name, user, host)
        }
    }

    /// Create a new user prefix from nick, user, and host components.
    ///
    /// ```
    /// use ircserv_proto::Prefix;
    ///
    /// let prefix = Prefix::new("alice", "a", "127.0.0.1");
    /// assert_eq!(prefix.to_string(), "alice!a@127.0.0.1");
    /// ```
    pub fn new(nick: impl Into<String>, user: impl Into<String>, host: impl Into<String>) -> Self {
        Prefix::Nickname(nick.into(), user.into(), host.into())
    }

    /// Get the nickname if this is a user prefix.
    pub fn nick(&self) -> Option<&str> {
        match self {
            Prefix::Nickname(nick, _, _) if !nick.is_empty() => Some(nick),
            _ => None,
        }
    }

    /// Get the hostname, or the server name for server prefixes.
    pub fn host(&self) -> Option<&str> {
        match self {
            Prefix::ServerName(name) => Some(name),
            Prefix::Nickname(_, _, host) if !host.is_empty() => Some(host),
            _ => None,
        }
    }
}

impl FromStr for Prefix {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Prefix::new_from_str(s))
    }
}

impl From<&str> for Prefix {
    fn from(s: &str) -> Self {
        Prefix::new_from_str(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_mask() {
        assert_eq!(
            Prefix::new_from_str("alice!a@10.0.0.1"),
            Prefix::new("alice", "a", "10.0.0.1")
        );
    }

    #[test]
    fn test_server_name() {
        assert_eq!(
            Prefix::new_from_str("irc.example.net"),
            Prefix::ServerName("irc.example.net".into())
        );
    }

    #[test]
    fn test_bare_nick() {
        let p = Prefix::new_from_str("bob");
        assert_eq!(p.nick(), Some("bob"));
        assert_eq!(p.host(), None);
    }

    #[test]
    fn test_dotted_host_is_not_server() {
        let p = Prefix::new_from_str("bob@host.example");
        assert_eq!(p.nick(), Some("bob"));
        assert_eq!(p.host(), Some("host.example"));
    }
}
