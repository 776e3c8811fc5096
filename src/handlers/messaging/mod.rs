//! Messaging handlers.
//!
//! Handles PRIVMSG and NOTICE commands for both users and channels.

mod common;
mod notice;
mod privmsg;

pub use notice::NoticeHandler;
pub use privmsg::PrivmsgHandler;
