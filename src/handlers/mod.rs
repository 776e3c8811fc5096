//! IRC command handlers.
//!
//! This module contains the Handler trait and command registry for dispatching
//! incoming IRC messages to appropriate handlers.
//!
//! Handlers are synchronous: each one runs to completion against the
//! Directory it is lent through [`Context`], queueing replies and marking
//! connections for closing. Socket I/O happens later, in the reactor.

mod channel;
mod connection;
mod core;
mod helpers;
mod messaging;
mod mode;
mod user_query;
mod user_status;

pub use self::core::{Context, Handler, Registry};
pub use helpers::{server_notice, split_list};

pub use crate::error::{HandlerError, HandlerResult};
