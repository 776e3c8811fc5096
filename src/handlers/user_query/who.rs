//! WHO command handler.
//!
//! `WHO [<channel>|<nick>]`
//!
//! Invisible (`+i`) users are only listed to themselves and to users they
//! share a channel with.

use super::super::{Context, Handler, HandlerResult};
use crate::state::{ConnId, Connection};
use ircserv_proto::{ChannelExt, Message, Response};
use std::collections::BTreeSet;

pub struct WhoHandler;

impl Handler for WhoHandler {
    fn handle(&self, ctx: &mut Context<'_>, msg: &Message) -> HandlerResult {
        let mask = msg.arg(0).filter(|m| !m.is_empty() && *m != "0" && *m != "*");
        let visible = {
            let mut peers = ctx.directory.peers_of(ctx.id);
            peers.insert(ctx.id);
            peers
        };

        let view: &Context<'_> = ctx;
        let replies = match mask {
            Some(channel) if channel.is_channel_target() => channel_rows(view, channel, &visible),
            Some(nick) => view
                .directory
                .nick_to_id(nick)
                .and_then(|id| view.directory.connection(id))
                .filter(|c| is_visible(c, &visible))
                .map(|c| vec![who_row(view, c, "*", None)])
                .unwrap_or_default(),
            None => view
                .directory
                .connections()
                .filter(|c| c.is_registered() && is_visible(c, &visible))
                .map(|c| who_row(view, c, "*", None))
                .collect(),
        };

        for row in replies {
            ctx.send_reply(Response::RPL_WHOREPLY, row);
        }
        ctx.send_reply(Response::RPL_ENDOFWHO, [mask.unwrap_or("*"), "End of WHO list"]);
        Ok(())
    }
}

fn channel_rows(ctx: &Context<'_>, channel: &str, visible: &BTreeSet<ConnId>) -> Vec<Vec<String>> {
    let Some(chan) = ctx.directory.channel(channel) else {
        return Vec::new();
    };
    let requester_is_member = chan.is_member(ctx.id);
    chan.members()
        .filter_map(|(id, modes)| {
            let conn = ctx.directory.connection(id)?;
            (requester_is_member || is_visible(conn, visible))
                .then(|| who_row(ctx, conn, &chan.name, Some(modes.op)))
        })
        .collect()
}

fn is_visible(conn: &Connection, visible: &BTreeSet<ConnId>) -> bool {
    !conn.user.modes.invisible || visible.contains(&conn.id)
}

/// `<channel> <user> <host> <server> <nick> <flags> :<hopcount> <realname>`
fn who_row(ctx: &Context<'_>, conn: &Connection, channel: &str, chan_op: Option<bool>) -> Vec<String> {
    let user = &conn.user;
    let mut flags = String::from(if user.away.is_some() { "G" } else { "H" });
    if user.modes.oper {
        flags.push('*');
    }
    if chan_op == Some(true) {
        flags.push('@');
    }
    vec![
        channel.to_string(),
        user.username.clone().unwrap_or_else(|| "*".to_string()),
        user.host.clone(),
        ctx.server.name.clone(),
        user.nick_or_star().to_string(),
        flags,
        format!("0 {}", user.realname),
    ]
}
