//! Configuration validation.
//!
//! Validates configuration at startup to catch common errors early.

use super::Config;
use thiserror::Error;

/// Validation errors for configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("server.name is required")]
    MissingServerName,
    #[error("server.name must not contain spaces")]
    ServerNameHasSpace,
    #[error("server.network is required")]
    MissingNetworkName,
    #[error("limits.{0} must be greater than zero")]
    ZeroLimit(&'static str),
    #[error("channels.default_modes may only contain 'i' and 't', got '{0}'")]
    InvalidDefaultModes(String),
}

/// Validate a configuration, returning all errors found.
pub fn validate(config: &Config) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.server.name.is_empty() {
        errors.push(ValidationError::MissingServerName);
    } else if config.server.name.contains(' ') {
        errors.push(ValidationError::ServerNameHasSpace);
    }
    if config.server.network.is_empty() {
        errors.push(ValidationError::MissingNetworkName);
    }

    let limits = &config.limits;
    for (name, value) in [
        ("nick_len", limits.nick_len),
        ("channel_len", limits.channel_len),
        ("max_line_len", limits.max_line_len),
        ("max_sendq", limits.max_sendq),
        ("writer_queue", limits.writer_queue),
        ("max_targets", limits.max_targets),
    ] {
        if value == 0 {
            errors.push(ValidationError::ZeroLimit(name));
        }
    }

    let modes = &config.channels.default_modes;
    if !modes.chars().all(|c| matches!(c, 'i' | 't' | '+')) {
        errors.push(ValidationError::InvalidDefaultModes(modes.clone()));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
