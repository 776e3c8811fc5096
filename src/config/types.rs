//! Core configuration types and loading.

use serde::Deserialize;
use std::net::{IpAddr, Ipv4Addr};
use std::path::Path;
use thiserror::Error;

use super::limits::LimitsConfig;
use super::oper::OperBlock;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Server configuration.
///
/// Every table is optional; a missing file is the same as an empty one.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Server identity.
    #[serde(default)]
    pub server: ServerConfig,
    /// Buffer and fan-out caps.
    #[serde(default)]
    pub limits: LimitsConfig,
    /// Keepalive and registration deadlines.
    #[serde(default)]
    pub timeouts: IdleTimeoutsConfig,
    /// Channel creation defaults.
    #[serde(default)]
    pub channels: ChannelsConfig,
    /// Message of the Day.
    #[serde(default)]
    pub motd: MotdConfig,
    /// Operator blocks.
    #[serde(default)]
    pub oper: Vec<OperBlock>,
    /// Logging output.
    #[serde(default)]
    pub log: LogConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }
}

/// Server identity configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Name used as the prefix of every server-originated line.
    #[serde(default = "default_server_name")]
    pub name: String,
    /// Network name shown in the welcome line and ISUPPORT.
    #[serde(default = "default_network")]
    pub network: String,
    /// Free-form description for WHOIS.
    #[serde(default = "default_description")]
    pub description: String,
    /// Address the client listener binds to.
    #[serde(default = "default_bind")]
    pub bind: IpAddr,
    /// Prometheus metrics HTTP port. Absent or 0 disables the endpoint.
    #[serde(default)]
    pub metrics_port: Option<u16>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            name: default_server_name(),
            network: default_network(),
            description: default_description(),
            bind: default_bind(),
            metrics_port: None,
        }
    }
}

fn default_server_name() -> String {
    "ircserv.local".to_string()
}

fn default_network() -> String {
    "IRCServ".to_string()
}

fn default_description() -> String {
    "ircserv chat server".to_string()
}

fn default_bind() -> IpAddr {
    IpAddr::V4(Ipv4Addr::UNSPECIFIED)
}

/// Idle timeout configuration for client connection keepalive.
///
/// - `ping`: seconds of silence before the server sends PING (default: 120)
/// - `timeout`: seconds to wait for any traffic after that PING (default: 60)
/// - `registration`: seconds allowed to complete PASS/NICK/USER (default: 60)
#[derive(Debug, Clone, Deserialize)]
pub struct IdleTimeoutsConfig {
    #[serde(default = "default_ping_interval")]
    pub ping: u64,
    #[serde(default = "default_ping_timeout")]
    pub timeout: u64,
    #[serde(default = "default_registration_timeout")]
    pub registration: u64,
}

impl Default for IdleTimeoutsConfig {
    fn default() -> Self {
        Self {
            ping: default_ping_interval(),
            timeout: default_ping_timeout(),
            registration: default_registration_timeout(),
        }
    }
}

fn default_ping_interval() -> u64 {
    120
}

fn default_ping_timeout() -> u64 {
    60
}

fn default_registration_timeout() -> u64 {
    60
}

/// Defaults applied when a JOIN creates a channel.
#[derive(Debug, Clone, Deserialize)]
pub struct ChannelsConfig {
    /// Flag letters set on new channels (`i` and/or `t`; default: "t").
    #[serde(default = "default_channel_modes")]
    pub default_modes: String,
}

impl Default for ChannelsConfig {
    fn default() -> Self {
        Self {
            default_modes: default_channel_modes(),
        }
    }
}

fn default_channel_modes() -> String {
    "t".to_string()
}

/// Message of the Day configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MotdConfig {
    /// MOTD lines; empty sends ERR_NOMOTD.
    #[serde(default)]
    pub lines: Vec<String>,
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Logging configuration. `RUST_LOG` overrides `level`.
#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default)]
    pub format: LogFormat,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn empty_file_is_all_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.server.name, "ircserv.local");
        assert_eq!(config.server.bind, IpAddr::V4(Ipv4Addr::UNSPECIFIED));
        assert_eq!(config.timeouts.ping, 120);
        assert_eq!(config.channels.default_modes, "t");
        assert!(config.motd.lines.is_empty());
        assert!(config.oper.is_empty());
        assert_eq!(config.log.format, LogFormat::Pretty);
    }

    #[test]
    fn load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
[server]
name = "irc.test"
network = "TestNet"
bind = "127.0.0.1"

[limits]
max_sendq = 4096

[timeouts]
registration = 5

[motd]
lines = ["hello", "world"]

[[oper]]
name = "root"
password = "toor"

[log]
format = "json"
"#
        )
        .unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.server.name, "irc.test");
        assert_eq!(config.server.network, "TestNet");
        assert_eq!(config.server.bind, IpAddr::V4(Ipv4Addr::LOCALHOST));
        assert_eq!(config.limits.max_sendq, 4096);
        assert_eq!(config.timeouts.registration, 5);
        assert_eq!(config.timeouts.ping, 120);
        assert_eq!(config.motd.lines, vec!["hello", "world"]);
        assert_eq!(config.oper.len(), 1);
        assert_eq!(config.log.format, LogFormat::Json);
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = Config::load("/nonexistent/ircserv.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn bad_toml_is_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[server\nname = ").unwrap();
        assert!(matches!(
            Config::load(file.path()).unwrap_err(),
            ConfigError::Parse(_)
        ));
    }
}
