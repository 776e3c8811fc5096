//! INVITE command handler.
//!
//! # RFC 2812 §3.2.7 - Invite message
//!
//! ## Syntax
//! ```text
//! INVITE <nickname> <channel>
//! ```
//!
//! ## Behavior
//! - If the channel exists, the inviter must be a member, and an operator
//!   when the channel is `+i`; the invitee must not already be a member
//! - The invitee must be connected, whether or not the channel exists
//! - The nick goes on the channel's invite list (consumed by JOIN)
//! - Invitee gets the INVITE, inviter gets RPL_INVITING (and RPL_AWAY if
//!   the invitee is away)

use super::super::{Context, Handler, HandlerError, HandlerResult};
use crate::error::ChannelError;
use ircserv_proto::{Message, Response};

pub struct InviteHandler;

impl Handler for InviteHandler {
    fn handle(&self, ctx: &mut Context<'_>, msg: &Message) -> HandlerResult {
        // INVITE <nick> <channel>
        let (Some(target), Some(channel)) = (msg.arg(0), msg.arg(1)) else {
            return Err(HandlerError::NeedMoreParams);
        };

        if let Some(chan) = ctx.directory.channel(channel) {
            if !chan.is_member(ctx.id) {
                return Err(ChannelError::NotOnChannel.on(channel));
            }
            if chan.modes.invite_only && !chan.is_op(ctx.id) {
                return Err(ChannelError::ChanOpPrivsNeeded.on(channel));
            }
        }

        let target_id = ctx
            .directory
            .nick_to_id(target)
            .ok_or_else(|| HandlerError::NoSuchNick(target.to_string()))?;

        if let Some(chan) = ctx.directory.channel_mut(channel) {
            if chan.is_member(target_id) {
                return Err(ChannelError::UserOnChannel(target.to_string()).on(channel));
            }
            chan.invite(target);
        }

        let invite = Message::invite(target, channel).with_prefix(ctx.prefix()?);
        ctx.directory.send_to(target_id, &invite);

        ctx.send_reply(Response::RPL_INVITING, [target, channel]);
        let away = ctx
            .directory
            .connection(target_id)
            .and_then(|c| c.user.away.clone());
        if let Some(away) = away {
            ctx.send_reply(Response::RPL_AWAY, [target, away.as_str()]);
        }
        Ok(())
    }
}
