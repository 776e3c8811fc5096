//! CAP handler.
//!
//! No capabilities are offered. Clients that probe with `CAP LS` get an
//! empty list, requests are refused, and `CAP END` is accepted silently.
//! Negotiation never holds up registration.

use super::super::{Context, Handler, HandlerError, HandlerResult};
use ircserv_proto::{Message, Prefix};
use tracing::debug;

pub struct CapHandler;

impl Handler for CapHandler {
    fn handle(&self, ctx: &mut Context<'_>, msg: &Message) -> HandlerResult {
        let subcommand = msg
            .arg(0)
            .ok_or(HandlerError::NeedMoreParams)?
            .to_ascii_uppercase();

        let nick = ctx.nick();
        let reply = match subcommand.as_str() {
            "LS" | "LIST" => Message::new("CAP", [nick.as_str(), subcommand.as_str(), ""]),
            "REQ" => {
                let requested = msg.arg(1).unwrap_or_default();
                Message::new("CAP", [nick.as_str(), "NAK", requested])
            }
            "END" => return Ok(()),
            other => {
                debug!(conn = %ctx.id, subcommand = %other, "Ignoring CAP subcommand");
                return Ok(());
            }
        };

        let prefix = Prefix::ServerName(ctx.server.name.clone());
        ctx.send(reply.with_prefix(prefix));
        Ok(())
    }
}
