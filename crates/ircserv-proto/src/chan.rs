//! Channel name utilities.
//!
//! # Reference
//! - RFC 2812 Section 1.3: Channel names

/// Prefixes this server accepts for channel names.
pub const CHANNEL_PREFIXES: [char; 2] = ['#', '&'];

/// Default maximum channel name length, prefix included.
pub const DEFAULT_CHANNEL_MAX_LEN: usize = 50;

/// Extension trait for checking if a string is a valid IRC channel name.
pub trait ChannelExt {
    /// Whether the string starts with a channel prefix. Used to tell channel
    /// targets from nickname targets.
    fn is_channel_target(&self) -> bool;

    /// Full validation with [`DEFAULT_CHANNEL_MAX_LEN`].
    fn is_channel_name(&self) -> bool {
        self.is_channel_name_len(DEFAULT_CHANNEL_MAX_LEN)
    }

    /// Full validation: a prefix, at least one more character, no space,
    /// comma, BEL, NUL or other control character, at most `max_len`
    /// characters.
    fn is_channel_name_len(&self, max_len: usize) -> bool;
}

impl ChannelExt for str {
    fn is_channel_target(&self) -> bool {
        self.starts_with(CHANNEL_PREFIXES)
    }

    fn is_channel_name_len(&self, max_len: usize) -> bool {
        if !self.is_channel_target() {
            return false;
        }

        let count = self.chars().count();
        if count < 2 || count > max_len {
            return false;
        }

        !self
            .chars()
            .skip(1)
            .any(|c| c == ' ' || c == ',' || c == '\x07' || c.is_control())
    }
}

impl ChannelExt for String {
    fn is_channel_target(&self) -> bool {
        self.as_str().is_channel_target()
    }

    fn is_channel_name_len(&self, max_len: usize) -> bool {
        self.as_str().is_channel_name_len(max_len)
    }
}
