//! Channel command handlers.
//!
//! Handles JOIN, PART, TOPIC, NAMES, LIST, KICK, INVITE commands.

mod common;
mod invite;
mod join;
mod kick;
mod list;
mod names;
mod part;
mod topic;

pub use invite::InviteHandler;
pub use join::JoinHandler;
pub use kick::KickHandler;
pub use list::ListHandler;
pub use names::NamesHandler;
pub use part::PartHandler;
pub use topic::TopicHandler;
