//! PRIVMSG command handler.
//!
//! `PRIVMSG <target>{,<target>} :<text>`
//!
//! Errors are reported per target; a direct message to an away user
//! answers the sender with RPL_AWAY.

use super::super::{Context, Handler, HandlerResult};
use super::common::{Delivered, deliver_all, validate};
use ircserv_proto::{Message, Response};

/// Handler for PRIVMSG command.
pub struct PrivmsgHandler;

impl Handler for PrivmsgHandler {
    fn handle(&self, ctx: &mut Context<'_>, msg: &Message) -> HandlerResult {
        let outgoing = validate(ctx, msg)?;
        deliver_all(ctx, "PRIVMSG", &outgoing, |ctx, target, result| match result {
            Ok(Delivered::User(Some(away))) => {
                ctx.send_reply(Response::RPL_AWAY, [target, away.as_str()]);
            }
            Ok(_) => {}
            Err(err) => ctx.send_error("PRIVMSG", &err),
        })
    }
}
