//! User status handlers: AWAY, OPER

use super::{Context, Handler, HandlerError, HandlerResult};
use ircserv_proto::{Message, Response};
use tracing::{debug, info, warn};

/// Handler for AWAY command.
///
/// `AWAY [message]`
///
/// Sets the away message, or clears it when the message is missing or empty.
pub struct AwayHandler;

impl Handler for AwayHandler {
    fn handle(&self, ctx: &mut Context<'_>, msg: &Message) -> HandlerResult {
        let away = msg.arg(0).filter(|m| !m.is_empty()).map(str::to_string);
        let now_away = away.is_some();
        ctx.conn_mut()?.user.away = away;

        if now_away {
            ctx.send_reply(Response::RPL_NOWAWAY, ["You have been marked as being away"]);
        } else {
            ctx.send_reply(Response::RPL_UNAWAY, ["You are no longer marked as being away"]);
        }
        debug!(conn = %ctx.id, away = now_away, "Away status changed");
        Ok(())
    }
}

/// Handler for OPER command.
///
/// `OPER <name> <password>`
pub struct OperHandler;

impl Handler for OperHandler {
    fn handle(&self, ctx: &mut Context<'_>, msg: &Message) -> HandlerResult {
        let (Some(name), Some(password)) = (msg.arg(0), msg.arg(1)) else {
            return Err(HandlerError::NeedMoreParams);
        };

        if !ctx.server.opers.iter().any(|o| o.matches(name, password)) {
            warn!(conn = %ctx.id, oper = %name, "Failed OPER attempt");
            return Err(HandlerError::OperFailed);
        }

        let user = &mut ctx.conn_mut()?.user;
        if !user.modes.oper {
            user.modes.oper = true;
            let change = Message::new("MODE", [user.nick_or_star(), "+o"]).with_prefix(user.prefix());
            ctx.send(change);
        }
        info!(conn = %ctx.id, oper = %name, "User is now an IRC operator");
        ctx.send_reply(Response::RPL_YOUREOPER, ["You are now an IRC operator"]);
        Ok(())
    }
}
