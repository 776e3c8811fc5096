//! This server's identity and the policy knobs handlers read.

use crate::config::{Config, IdleTimeoutsConfig, LimitsConfig, OperBlock};
use chrono::{DateTime, Utc};

#[derive(Debug, Clone)]
pub struct ServerInfo {
    pub name: String,
    pub network: String,
    pub description: String,
    pub version: String,
    pub created: DateTime<Utc>,
    /// Connection password required by PASS.
    pub password: String,
    pub limits: LimitsConfig,
    pub timeouts: IdleTimeoutsConfig,
    /// Mode letters applied to newly created channels.
    pub default_modes: String,
    pub motd: Vec<String>,
    pub opers: Vec<OperBlock>,
}

impl ServerInfo {
    pub fn from_config(config: &Config, password: impl Into<String>) -> Self {
        Self {
            name: config.server.name.clone(),
            network: config.server.network.clone(),
            description: config.server.description.clone(),
            version: format!("ircserv-{}", env!("CARGO_PKG_VERSION")),
            created: Utc::now(),
            password: password.into(),
            limits: config.limits.clone(),
            timeouts: config.timeouts.clone(),
            default_modes: config.channels.default_modes.clone(),
            motd: config.motd.lines.clone(),
            opers: config.oper.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_default_config() {
        let info = ServerInfo::from_config(&Config::default(), "hunter2");
        assert_eq!(info.name, "ircserv.local");
        assert_eq!(info.password, "hunter2");
        assert_eq!(info.default_modes, "t");
        assert!(info.version.starts_with("ircserv-"));
    }
}
