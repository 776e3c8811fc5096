//! Command line parsing.
//!
//! ```text
//! ircserv <port> <password> [config.toml]
//! ```

use std::path::PathBuf;
use thiserror::Error;

/// Lowest port accepted; privileged ports are refused.
const MIN_PORT: u16 = 1025;

/// Command line errors. Each one ends the process before any socket opens.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ArgsError {
    #[error("usage: {0} <port> <password> [config.toml]")]
    Usage(String),
    #[error("invalid port '{0}': expected a number between 1025 and 65535")]
    InvalidPort(String),
    #[error("password must not be empty")]
    EmptyPassword,
}

/// Parsed command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Args {
    pub port: u16,
    pub password: String,
    pub config_path: Option<PathBuf>,
}

impl Args {
    /// Parse from the process arguments.
    pub fn from_env() -> Result<Self, ArgsError> {
        Self::parse(std::env::args())
    }

    /// Parse an argument list whose first item is the program name.
    pub fn parse<I, S>(args: I) -> Result<Self, ArgsError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut args = args.into_iter().map(Into::into);
        let program = args.next().unwrap_or_else(|| "ircserv".to_string());

        let (Some(port), Some(password)) = (args.next(), args.next()) else {
            return Err(ArgsError::Usage(program));
        };
        let config_path = args.next().map(PathBuf::from);
        if args.next().is_some() {
            return Err(ArgsError::Usage(program));
        }

        let port = match port.parse::<u16>() {
            Ok(p) if p >= MIN_PORT => p,
            _ => return Err(ArgsError::InvalidPort(port)),
        };

        if password.is_empty() {
            return Err(ArgsError::EmptyPassword);
        }

        Ok(Self {
            port,
            password,
            config_path,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_port_and_password() {
        let args = Args::parse(["ircserv", "6667", "hunter2"]).unwrap();
        assert_eq!(args.port, 6667);
        assert_eq!(args.password, "hunter2");
        assert_eq!(args.config_path, None);
    }

    #[test]
    fn optional_config_path() {
        let args = Args::parse(["ircserv", "6667", "pw", "ircserv.toml"]).unwrap();
        assert_eq!(args.config_path, Some(PathBuf::from("ircserv.toml")));
    }

    #[test]
    fn missing_arguments() {
        assert_eq!(
            Args::parse(["ircserv", "6667"]),
            Err(ArgsError::Usage("ircserv".into()))
        );
        assert!(Args::parse(["ircserv", "1", "2", "3", "4"]).is_err());
    }

    #[test]
    fn privileged_and_garbage_ports_rejected() {
        for port in ["0", "80", "1024", "65536", "-1", "abc", ""] {
            assert_eq!(
                Args::parse(["ircserv", port, "pw"]),
                Err(ArgsError::InvalidPort(port.into())),
                "port {port:?}"
            );
        }
        assert!(Args::parse(["ircserv", "1025", "pw"]).is_ok());
        assert!(Args::parse(["ircserv", "65535", "pw"]).is_ok());
    }

    #[test]
    fn empty_password_rejected() {
        assert_eq!(
            Args::parse(["ircserv", "6667", ""]),
            Err(ArgsError::EmptyPassword)
        );
    }
}
