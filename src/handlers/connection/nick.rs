//! NICK command handler.
//!
//! Before registration the nick is only recorded. Afterwards the change is
//! announced to the user and to everyone sharing a channel, once each.

use super::super::{Context, Handler, HandlerError, HandlerResult};
use super::welcome::try_register;
use ircserv_proto::{Message, NickExt};
use tracing::debug;

/// Handler for NICK command.
pub struct NickHandler;

impl Handler for NickHandler {
    fn handle(&self, ctx: &mut Context<'_>, msg: &Message) -> HandlerResult {
        // NICK <nickname>
        let nick = msg
            .arg(0)
            .filter(|n| !n.is_empty())
            .ok_or(HandlerError::NoNicknameGiven)?;

        if !nick.is_valid_nick_len(ctx.server.limits.nick_len) {
            return Err(HandlerError::ErroneousNickname(nick.to_string()));
        }

        if ctx.directory.nick_in_use(nick, ctx.id) {
            return Err(HandlerError::NicknameInUse(nick.to_string()));
        }

        let conn = ctx.conn()?;
        if conn.user.nick.as_deref() == Some(nick) {
            return Ok(());
        }

        if conn.is_registered() {
            // Announce under the old prefix before the rename takes effect.
            let change = Message::nick(nick).with_prefix(conn.user.prefix());
            ctx.directory.send_to_peers(ctx.id, &change, true);
            let old = ctx.directory.set_nick(ctx.id, nick);
            debug!(conn = %ctx.id, old = ?old, new = %nick, "Nick changed");
            return Ok(());
        }

        ctx.directory.set_nick(ctx.id, nick);
        try_register(ctx)
    }
}
