//! KICK command handler.
//!
//! # RFC 2812 §3.2.8 - Kick command
//!
//! ## Syntax
//! ```text
//! KICK <channel> <user>{,<user>} [<comment>]
//! ```
//!
//! ## Behavior
//! - Kicker must be a channel operator
//! - Each target must be a member; failures are reported per target
//! - The KICK reaches every member, the kicked user included, before the
//!   membership is removed
//! - Default reason is the kicker's nick

use super::super::{Context, Handler, HandlerError, HandlerResult, split_list};
use super::common::parse_reason;
use crate::error::ChannelError;
use ircserv_proto::Message;
use tracing::info;

pub struct KickHandler;

impl Handler for KickHandler {
    fn handle(&self, ctx: &mut Context<'_>, msg: &Message) -> HandlerResult {
        // KICK <channel> <user>[,<user>] [reason]
        let channel = msg.arg(0).ok_or(HandlerError::NeedMoreParams)?;
        let targets = msg.arg(1).ok_or(HandlerError::NeedMoreParams)?;

        let chan = ctx
            .directory
            .channel(channel)
            .ok_or_else(|| HandlerError::NoSuchChannel(channel.to_string()))?;
        if !chan.is_member(ctx.id) {
            return Err(ChannelError::NotOnChannel.on(channel));
        }
        if !chan.is_op(ctx.id) {
            return Err(ChannelError::ChanOpPrivsNeeded.on(channel));
        }

        let kicker = ctx.nick();
        let reason = parse_reason(msg.arg(2)).unwrap_or(kicker.as_str()).to_string();
        let prefix = ctx.prefix()?;

        for target in split_list(targets) {
            let target_id = ctx.directory.nick_to_id(target);
            let is_member = match (ctx.directory.channel(channel), target_id) {
                (Some(chan), Some(id)) => chan.is_member(id),
                _ => false,
            };
            let Some(target_id) = target_id.filter(|_| is_member) else {
                let err = ChannelError::UserNotInChannel(target.to_string()).on(channel);
                ctx.send_error("KICK", &err);
                continue;
            };

            let kick = Message::kick(channel, target, reason.as_str()).with_prefix(prefix.clone());
            ctx.directory.broadcast(channel, &kick, None);
            ctx.directory.remove_member(target_id, channel);
            info!(channel = %channel, kicker = %kicker, target = %target, "User kicked");
        }
        Ok(())
    }
}
