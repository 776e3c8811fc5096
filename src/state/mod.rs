//! State management module.
//!
//! Contains the Directory (the single source of truth for users, channels and
//! connections) and the records it owns.

mod broadcast;
mod channel;
mod connection;
mod directory;
mod sendq;
mod server;
mod uid;
mod user;

pub use channel::{Channel, ChannelModes, MemberModes, Topic};
pub use connection::{Connection, RegistrationState};
pub use directory::Directory;
pub use sendq::SendQueue;
pub use server::ServerInfo;
pub use uid::{ConnId, ConnIdGenerator};
pub use user::User;
