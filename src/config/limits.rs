//! Buffer and fan-out limits.

use serde::Deserialize;

/// Per-connection resource caps.
///
/// Exceeding `max_line_len` or `max_sendq` disconnects the offending client.
#[derive(Debug, Clone, Deserialize)]
pub struct LimitsConfig {
    /// Maximum nickname length, advertised as NICKLEN (default: 9).
    #[serde(default = "default_nick_len")]
    pub nick_len: usize,
    /// Maximum channel name length including prefix (default: 50).
    #[serde(default = "default_channel_len")]
    pub channel_len: usize,
    /// Receive accumulator cap in bytes (default: 4096).
    #[serde(default = "default_max_line_len")]
    pub max_line_len: usize,
    /// Outbound bytes allowed to pile up for one client (default: 1 MiB).
    #[serde(default = "default_max_sendq")]
    pub max_sendq: usize,
    /// Chunks in flight between the core and a socket writer (default: 64).
    #[serde(default = "default_writer_queue")]
    pub writer_queue: usize,
    /// Comma-separated targets accepted by PRIVMSG/NOTICE (default: 8).
    #[serde(default = "default_max_targets")]
    pub max_targets: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            nick_len: default_nick_len(),
            channel_len: default_channel_len(),
            max_line_len: default_max_line_len(),
            max_sendq: default_max_sendq(),
            writer_queue: default_writer_queue(),
            max_targets: default_max_targets(),
        }
    }
}

fn default_nick_len() -> usize {
    ircserv_proto::DEFAULT_NICK_MAX_LEN
}

fn default_channel_len() -> usize {
    ircserv_proto::DEFAULT_CHANNEL_MAX_LEN
}

fn default_max_line_len() -> usize {
    ircserv_proto::DEFAULT_MAX_LINE_LEN
}

fn default_max_sendq() -> usize {
    1024 * 1024
}

fn default_writer_queue() -> usize {
    64
}

fn default_max_targets() -> usize {
    8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_values_are_correct() {
        let limits = LimitsConfig::default();
        assert_eq!(limits.nick_len, 9);
        assert_eq!(limits.channel_len, 50);
        assert_eq!(limits.max_line_len, 4096);
        assert_eq!(limits.max_sendq, 1_048_576);
        assert_eq!(limits.writer_queue, 64);
        assert_eq!(limits.max_targets, 8);
    }

    #[test]
    fn partial_table_keeps_other_defaults() {
        let limits: LimitsConfig = toml::from_str("max_sendq = 2048").unwrap();
        assert_eq!(limits.max_sendq, 2048);
        assert_eq!(limits.nick_len, 9);
    }
}
