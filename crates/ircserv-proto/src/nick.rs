//! Nickname validation.
//!
//! # Reference
//! - RFC 2812 Section 2.3.1: Message format (nickname definition)

/// Default maximum nickname length (RFC 2812).
pub const DEFAULT_NICK_MAX_LEN: usize = 9;

/// `[ ] \ ` ^ _ { | }`
#[inline]
fn is_special(c: char) -> bool {
    matches!(c, '[' | ']' | '\\' | '`' | '_' | '^' | '{' | '|' | '}')
}

/// Extension trait for checking if a string is a valid IRC nickname.
pub trait NickExt {
    /// Check against [`DEFAULT_NICK_MAX_LEN`].
    ///
    /// ```
    /// use ircserv_proto::NickExt;
    ///
    /// assert!("alice".is_valid_nick());
    /// assert!("[away]".is_valid_nick());
    /// assert!(!"9lives".is_valid_nick());
    /// assert!(!"-dash".is_valid_nick());
    /// assert!(!"two words".is_valid_nick());
    /// ```
    fn is_valid_nick(&self) -> bool {
        self.is_valid_nick_len(DEFAULT_NICK_MAX_LEN)
    }

    /// Check against a server-configured NICKLEN.
    ///
    /// First character: letter or special. Rest: letter, digit, special or
    /// hyphen.
    fn is_valid_nick_len(&self, max_len: usize) -> bool;
}

impl NickExt for str {
    fn is_valid_nick_len(&self, max_len: usize) -> bool {
        let mut chars = self.chars();

        let Some(first) = chars.next() else {
            return false;
        };

        if self.len() > max_len {
            return false;
        }

        if !first.is_ascii_alphabetic() && !is_special(first) {
            return false;
        }

        chars.all(|c| c.is_ascii_alphanumeric() || is_special(c) || c == '-')
    }
}

impl NickExt for String {
    fn is_valid_nick_len(&self, max_len: usize) -> bool {
        self.as_str().is_valid_nick_len(max_len)
    }
}
