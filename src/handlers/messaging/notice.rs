//! NOTICE command handler.
//!
//! Same routing as PRIVMSG, but the sender never gets an error reply or an
//! away notice back.

use super::super::{Context, Handler, HandlerResult};
use super::common::{deliver_all, validate};
use ircserv_proto::Message;
use tracing::debug;

/// Handler for NOTICE command.
pub struct NoticeHandler;

impl Handler for NoticeHandler {
    fn handle(&self, ctx: &mut Context<'_>, msg: &Message) -> HandlerResult {
        let Ok(outgoing) = validate(ctx, msg) else {
            return Ok(());
        };
        deliver_all(ctx, "NOTICE", &outgoing, |_, target, result| {
            if let Err(err) = result {
                debug!(target = %target, error = %err, "NOTICE dropped");
            }
        })
    }
}
