//! PING and PONG handlers.

use super::super::{Context, Handler, HandlerError, HandlerResult};
use ircserv_proto::{Message, Prefix};

/// Handler for PING command.
pub struct PingHandler;

impl Handler for PingHandler {
    fn handle(&self, ctx: &mut Context<'_>, msg: &Message) -> HandlerResult {
        // PING <token>
        let token = msg
            .arg(0)
            .filter(|t| !t.is_empty())
            .ok_or(HandlerError::NoOrigin)?;

        let name = ctx.server.name.as_str();
        let pong = Message::pong(name, token).with_prefix(Prefix::ServerName(name.to_string()));
        ctx.send(pong);
        Ok(())
    }
}

/// Handler for PONG command.
pub struct PongHandler;

impl Handler for PongHandler {
    fn handle(&self, ctx: &mut Context<'_>, _msg: &Message) -> HandlerResult {
        // Answers the keepalive PING sent by the idle check.
        ctx.conn_mut()?.ping_sent = None;
        Ok(())
    }
}
