//! Registration completion and the welcome burst.
//!
//! Registration fires once the password is accepted and both nick and
//! username are known. NICK may precede PASS; USER may not. The burst is
//! 001-005 followed by the MOTD (or ERR_NOMOTD).

use super::super::{Context, HandlerResult};
use crate::state::RegistrationState;
use ircserv_proto::Response;
use tracing::info;

/// User modes advertised in RPL_MYINFO.
const USER_MODES: &str = "io";
/// Channel modes advertised in RPL_MYINFO.
const CHANNEL_MODES: &str = "iklot";

/// Complete registration if everything is in place.
pub fn try_register(ctx: &mut Context<'_>) -> HandlerResult {
    let conn = ctx.conn_mut()?;
    if !conn.can_register() {
        return Ok(());
    }
    conn.state = RegistrationState::Registered;

    let addr = conn.addr;
    let nick = conn.user.nick_or_star().to_string();
    info!(conn = %ctx.id, %addr, %nick, "Client registered");

    send_welcome_burst(ctx)
}

fn send_welcome_burst(ctx: &mut Context<'_>) -> HandlerResult {
    let server = ctx.server;
    let prefix = ctx.prefix()?;

    ctx.send_reply(
        Response::RPL_WELCOME,
        [format!("Welcome to the {} Network, {}", server.network, prefix)],
    );
    ctx.send_reply(
        Response::RPL_YOURHOST,
        [format!(
            "Your host is {}, running version {}",
            server.name, server.version
        )],
    );
    ctx.send_reply(
        Response::RPL_CREATED,
        [format!(
            "This server was created {}",
            server.created.format("%a %b %d %Y at %H:%M:%S UTC")
        )],
    );
    ctx.send_reply(
        Response::RPL_MYINFO,
        [
            server.name.as_str(),
            server.version.as_str(),
            USER_MODES,
            CHANNEL_MODES,
        ],
    );
    ctx.send_reply(
        Response::RPL_ISUPPORT,
        [
            "CHANTYPES=#&".to_string(),
            "PREFIX=(o)@".to_string(),
            "CHANMODES=,k,l,it".to_string(),
            format!("NICKLEN={}", server.limits.nick_len),
            format!("CHANNELLEN={}", server.limits.channel_len),
            format!("NETWORK={}", server.network),
            "are supported by this server".to_string(),
        ],
    );

    send_motd(ctx);
    Ok(())
}

fn send_motd(ctx: &mut Context<'_>) {
    let server = ctx.server;
    if server.motd.is_empty() {
        ctx.send_reply(Response::ERR_NOMOTD, ["MOTD File is missing"]);
        return;
    }

    ctx.send_reply(
        Response::RPL_MOTDSTART,
        [format!("- {} Message of the day - ", server.name)],
    );
    for line in &server.motd {
        ctx.send_reply(Response::RPL_MOTD, [format!("- {line}")]);
    }
    ctx.send_reply(Response::RPL_ENDOFMOTD, ["End of /MOTD command."]);
}
