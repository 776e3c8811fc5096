//! Configuration loading and management.
//!
//! - [`args`]: command line (`<port> <password> [config.toml]`)
//! - [`types`]: file-backed config structs and loading
//! - [`limits`]: buffer and fan-out limits
//! - [`oper`]: operator blocks
//! - [`validation`]: startup sanity checks

mod args;
mod limits;
mod oper;
mod types;
mod validation;

pub use args::Args;
pub use limits::LimitsConfig;
pub use oper::OperBlock;
pub use types::{Config, IdleTimeoutsConfig, LogFormat};
pub use validation::validate;
