//! # ircserv-proto
//!
//! Wire-level building blocks for the ircserv chat server: byte-stream line
//! framing, message parsing and serialization, numeric replies, mode strings
//! and name validation.
//!
//! Nothing in this crate touches server state; every function is pure.
//!
//! ```rust
//! use ircserv_proto::{LineFramer, Message};
//!
//! let mut framer = LineFramer::new();
//! framer.feed(b"NICK alice\r\nUSER a 0 * :Alice A\r\nJOI");
//!
//! let mut commands = Vec::new();
//! while let Some(line) = framer.next_line().unwrap() {
//!     let msg = Message::parse(&String::from_utf8_lossy(&line)).unwrap();
//!     commands.push(msg.command);
//! }
//! assert_eq!(commands, ["NICK", "USER"]);
//! assert_eq!(framer.pending(), 3);
//! ```

#![deny(clippy::all)]
#![warn(missing_docs)]

pub mod chan;
pub mod error;
pub mod line;
pub mod message;
pub mod mode;
pub mod nick;
pub mod prefix;
pub mod response;

pub use self::chan::{ChannelExt, CHANNEL_PREFIXES, DEFAULT_CHANNEL_MAX_LEN};
pub use self::error::{MessageParseError, ProtocolError};
#[cfg(feature = "tokio")]
pub use self::line::LineCodec;
pub use self::line::{LineFramer, DEFAULT_MAX_LINE_LEN};
pub use self::message::Message;
pub use self::mode::{ChannelMode, Mode, ModeType, UserMode};
pub use self::nick::{NickExt, DEFAULT_NICK_MAX_LEN};
pub use self::prefix::Prefix;
pub use self::response::Response;
