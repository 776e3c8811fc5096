//! WHOIS command handler.
//!
//! `WHOIS [<server>] <nick>`

use super::super::{Context, Handler, HandlerError, HandlerResult};
use ircserv_proto::{Message, Response};

pub struct WhoisHandler;

impl Handler for WhoisHandler {
    fn handle(&self, ctx: &mut Context<'_>, msg: &Message) -> HandlerResult {
        // The nick is the last parameter; a leading server name is ignored.
        let target = msg
            .params
            .last()
            .map(String::as_str)
            .filter(|t| !t.is_empty())
            .ok_or(HandlerError::NoNicknameGiven)?;

        let Some(conn) = ctx
            .directory
            .nick_to_id(target)
            .and_then(|id| ctx.directory.connection(id))
        else {
            ctx.send_error("WHOIS", &HandlerError::NoSuchNick(target.to_string()));
            ctx.send_reply(Response::RPL_ENDOFWHOIS, [target, "End of /WHOIS list"]);
            return Ok(());
        };

        let user = conn.user.clone();
        let idle = conn.last_activity.elapsed().as_secs();
        let signon = conn.signon;
        let channels: Vec<String> = user
            .channels
            .iter()
            .filter_map(|name| {
                let chan = ctx.directory.channel(name)?;
                let prefix = chan
                    .member_modes(conn.id)
                    .and_then(|m| m.prefix_char())
                    .map(String::from)
                    .unwrap_or_default();
                Some(format!("{prefix}{name}"))
            })
            .collect();
        let nick = user.nick_or_star().to_string();
        let server = ctx.server;

        ctx.send_reply(
            Response::RPL_WHOISUSER,
            [
                nick.clone(),
                user.username.clone().unwrap_or_else(|| "*".to_string()),
                user.host.clone(),
                "*".to_string(),
                user.realname.clone(),
            ],
        );
        if !channels.is_empty() {
            ctx.send_reply(Response::RPL_WHOISCHANNELS, [nick.clone(), channels.join(" ")]);
        }
        ctx.send_reply(
            Response::RPL_WHOISSERVER,
            [nick.as_str(), server.name.as_str(), server.description.as_str()],
        );
        if user.modes.oper {
            ctx.send_reply(Response::RPL_WHOISOPERATOR, [nick.as_str(), "is an IRC operator"]);
        }
        if let Some(away) = &user.away {
            ctx.send_reply(Response::RPL_AWAY, [nick.as_str(), away.as_str()]);
        }
        ctx.send_reply(
            Response::RPL_WHOISIDLE,
            [
                nick.clone(),
                idle.to_string(),
                signon.to_string(),
                "seconds idle, signon time".to_string(),
            ],
        );
        ctx.send_reply(Response::RPL_ENDOFWHOIS, [nick.as_str(), "End of /WHOIS list"]);
        Ok(())
    }
}
