//! Connection and registration handlers.
//!
//! Handles PASS, NICK, USER, CAP, PING, PONG, QUIT commands.

mod caps;
mod nick;
mod pass;
mod ping;
mod quit;
mod user;
mod welcome;

pub use caps::CapHandler;
pub use nick::NickHandler;
pub use pass::PassHandler;
pub use ping::{PingHandler, PongHandler};
pub use quit::QuitHandler;
pub use user::UserHandler;
