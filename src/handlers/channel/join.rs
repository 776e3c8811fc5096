//! JOIN command handler.
//!
//! # RFC 2812 §3.2.1 - Join message
//!
//! ## Syntax
//! ```text
//! JOIN <channel>{,<channel>} [<key>{,<key>}]
//! JOIN 0
//! ```
//!
//! ## Behavior
//! - A missing channel is created and the joiner becomes its operator
//! - Already a member: silently skipped
//! - Admission checks in order: invite-only, key, member limit
//! - The JOIN is broadcast to every member including the joiner, followed
//!   by the topic and the names list
//! - `JOIN 0` parts every channel

use super::super::{Context, Handler, HandlerError, HandlerResult, split_list};
use super::common::{
    DEFAULT_PART_REASON, is_join_zero, leave_channel, normalize_channel, parse_key_list,
    send_names, send_topic,
};
use crate::state::{Channel, ChannelModes, MemberModes};
use ircserv_proto::{ChannelExt, Message};
use tracing::debug;

pub struct JoinHandler;

impl Handler for JoinHandler {
    fn handle(&self, ctx: &mut Context<'_>, msg: &Message) -> HandlerResult {
        // JOIN <channels> [keys]
        let channels_str = msg.arg(0).ok_or(HandlerError::NeedMoreParams)?;

        if is_join_zero(channels_str) {
            let joined: Vec<String> = ctx.user()?.channels.iter().cloned().collect();
            for channel in joined {
                leave_channel(ctx, &channel, DEFAULT_PART_REASON)?;
            }
            return Ok(());
        }

        let targets: Vec<&str> = split_list(channels_str).collect();
        let keys = parse_key_list(msg.arg(1), targets.len());
        let max_targets = ctx.server.limits.max_targets;

        for (i, (target, key)) in targets.into_iter().zip(keys).enumerate() {
            if i >= max_targets {
                ctx.send_error("JOIN", &HandlerError::TooManyTargets(target.to_string()));
                continue;
            }
            if let Err(e) = join_channel(ctx, target, key) {
                ctx.send_error("JOIN", &e);
            }
        }
        Ok(())
    }
}

/// Modes a new channel starts with, from the configured letters.
pub fn initial_modes(letters: &str) -> ChannelModes {
    let mut modes = ChannelModes::default();
    for c in letters.chars() {
        match c {
            'i' => modes.invite_only = true,
            't' => modes.topic_lock = true,
            _ => {}
        }
    }
    modes
}

fn join_channel(ctx: &mut Context<'_>, target: &str, key: Option<&str>) -> HandlerResult {
    let name = normalize_channel(target);
    if !name.is_channel_name_len(ctx.server.limits.channel_len) {
        return Err(HandlerError::BadChanMask(name));
    }
    let nick = ctx.nick();

    let creating = match ctx.directory.channel_mut(&name) {
        Some(chan) => {
            if chan.is_member(ctx.id) {
                return Ok(());
            }
            chan.check_join(&nick, key).map_err(|e| e.on(&name))?;
            chan.take_invite(&nick);
            false
        }
        None => {
            let mut chan = Channel::new(name.as_str(), chrono::Utc::now().timestamp());
            chan.modes = initial_modes(&ctx.server.default_modes);
            ctx.directory.create_channel(chan);
            debug!(channel = %name, creator = %nick, "Channel created");
            true
        }
    };

    ctx.directory
        .add_member(ctx.id, &name, MemberModes { op: creating });

    let join = Message::join(name.as_str()).with_prefix(ctx.prefix()?);
    ctx.directory.broadcast(&name, &join, None);

    send_topic(ctx, &name);
    send_names(ctx, &name);
    Ok(())
}
