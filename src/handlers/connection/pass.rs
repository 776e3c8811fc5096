//! PASS command handler for connection registration.
//!
//! # RFC 2812 §3.1.1
//!
//! Password message - sets the connection password.
//!
//! ## Syntax
//! ```text
//! PASS <password>
//! ```
//!
//! ## Behavior
//! - Wrong password is fatal: ERR_PASSWDMISMATCH, then the link is closed
//! - Accepted after NICK/USER too; registration completes once all three hold
//! - ERR_ALREADYREGISTERED once registered

use super::super::{Context, Handler, HandlerError, HandlerResult};
use super::welcome::try_register;
use crate::state::RegistrationState;
use ircserv_proto::Message;
use tracing::{debug, info};

pub struct PassHandler;

impl Handler for PassHandler {
    fn handle(&self, ctx: &mut Context<'_>, msg: &Message) -> HandlerResult {
        if ctx.is_registered() {
            return Err(HandlerError::AlreadyRegistered);
        }

        // PASS <password>
        let password = msg
            .arg(0)
            .filter(|p| !p.is_empty())
            .ok_or(HandlerError::NeedMoreParams)?;

        if password != ctx.server.password {
            info!(conn = %ctx.id, "Rejected connection password");
            return Err(HandlerError::PasswordMismatch);
        }

        ctx.conn_mut()?.state = RegistrationState::PassOk;
        debug!(conn = %ctx.id, "PASS accepted");

        try_register(ctx)
    }
}
