//! Message prefixes.

mod serialize;
mod types;

pub use self::types::Prefix;
