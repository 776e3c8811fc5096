//! USER command handler.

use super::super::{Context, Handler, HandlerError, HandlerResult, server_notice};
use super::welcome::try_register;
use crate::state::RegistrationState;
use ircserv_proto::Message;

/// Handler for USER command.
///
/// `USER <username> <mode> <unused> :<realname>`
///
/// Only accepted once PASS has succeeded; earlier attempts get a notice and
/// nothing is stored.
pub struct UserHandler;

impl Handler for UserHandler {
    fn handle(&self, ctx: &mut Context<'_>, msg: &Message) -> HandlerResult {
        if ctx.is_registered() {
            return Err(HandlerError::AlreadyRegistered);
        }

        if msg.params.len() < 4 {
            return Err(HandlerError::NeedMoreParams);
        }
        let username = msg
            .arg(0)
            .filter(|u| !u.is_empty())
            .ok_or(HandlerError::NeedMoreParams)?;
        let realname = msg.arg(3).unwrap_or_default();

        let conn = ctx.conn()?;
        if conn.state == RegistrationState::Unauthenticated {
            let nick = conn.user.nick_or_star().to_string();
            ctx.send(server_notice(
                &ctx.server.name,
                &nick,
                "*** Please authenticate first with: PASS <password>",
            ));
            return Ok(());
        }

        let user = &mut ctx.conn_mut()?.user;
        user.username = Some(username.to_string());
        user.realname = realname.to_string();

        try_register(ctx)
    }
}
