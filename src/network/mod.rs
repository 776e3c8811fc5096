//! Network module.
//!
//! The Gateway accepts sockets and opens a [`Link`] per connection: a reader
//! task and a writer task around the split stream. Everything those tasks
//! observe reaches the [`Reactor`] as a [`NetEvent`]; the Reactor owns the
//! [`Engine`] and is the only task that touches chat state.

mod engine;
mod event;
mod gateway;
mod link;
mod reactor;

pub use engine::Engine;
pub use event::NetEvent;
pub use gateway::Gateway;
pub use link::Link;
pub use reactor::Reactor;
