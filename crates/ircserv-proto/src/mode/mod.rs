//! User and channel mode strings.

mod parse;
mod types;

pub use self::types::{ChannelMode, Mode, ModeType, UserMode};
