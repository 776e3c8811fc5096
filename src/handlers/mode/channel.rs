//! Channel mode handling.
//!
//! Each accepted change is applied and broadcast on its own line, so a
//! rejected letter in the middle of a mode string does not hide the ones
//! around it. Changes that leave the channel as it was are not broadcast.

use super::super::{Context, HandlerError, HandlerResult};
use crate::error::ChannelError;
use crate::state::Channel;
use ircserv_proto::{ChannelMode, Message, Mode, Response};
use tracing::info;

/// Handle channel mode query/change.
pub fn handle_channel_mode(
    ctx: &mut Context<'_>,
    channel: &str,
    modes: &[Mode<ChannelMode>],
) -> HandlerResult {
    let chan = ctx
        .directory
        .channel(channel)
        .ok_or_else(|| HandlerError::NoSuchChannel(channel.to_string()))?;

    if modes.is_empty() {
        // Key and limit values are only shown to members
        let (mode_string, args) = chan.modes.as_mode_string(chan.is_member(ctx.id));
        let created = chan.created.to_string();
        let mut params = vec![channel.to_string(), mode_string];
        params.extend(args);
        ctx.send_reply(Response::RPL_CHANNELMODEIS, params);
        ctx.send_reply(Response::RPL_CREATIONTIME, [channel.to_string(), created]);
        return Ok(());
    }

    if !chan.is_op(ctx.id) {
        return Err(ChannelError::ChanOpPrivsNeeded.on(channel));
    }

    let prefix = ctx.prefix()?;
    for mode in modes {
        match apply_mode(ctx, channel, mode) {
            Ok(Some(arg)) => {
                let mut params = vec![channel.to_string(), mode.flag()];
                params.extend(arg);
                let change = Message::new("MODE", params).with_prefix(prefix.clone());
                ctx.directory.broadcast(channel, &change, None);
                info!(channel = %channel, mode = %mode.flag(), "Channel mode changed");
            }
            Ok(None) => {}
            Err(err) => ctx.send_error("MODE", &err),
        }
    }
    Ok(())
}

/// Apply one change.
///
/// `Ok(Some(arg))` means the channel changed and the change should be
/// announced with `arg`; `Ok(None)` means nothing happened.
fn apply_mode(
    ctx: &mut Context<'_>,
    channel: &str,
    mode: &Mode<ChannelMode>,
) -> Result<Option<Option<String>>, HandlerError> {
    let plus = mode.is_plus();

    // Operator grants resolve a nick first, which needs the Directory.
    if *mode.mode() == ChannelMode::Oper {
        let nick = mode.arg().ok_or(HandlerError::NeedMoreParams)?;
        let target = ctx
            .directory
            .nick_to_id(nick)
            .ok_or_else(|| HandlerError::NoSuchNick(nick.to_string()))?;
        let chan = channel_mut(ctx, channel)?;
        let changed = chan
            .set_op(target, plus)
            .map_err(|_| ChannelError::UserNotInChannel(nick.to_string()).on(channel))?;
        return Ok(changed.then(|| Some(nick.to_string())));
    }

    let chan = channel_mut(ctx, channel)?;
    let modes = &mut chan.modes;
    let applied = match mode.mode() {
        ChannelMode::InviteOnly => {
            let changed = modes.invite_only != plus;
            modes.invite_only = plus;
            changed.then_some(None)
        }
        ChannelMode::ProtectedTopic => {
            let changed = modes.topic_lock != plus;
            modes.topic_lock = plus;
            changed.then_some(None)
        }
        ChannelMode::Key if plus => {
            let key = mode.arg().ok_or(HandlerError::NeedMoreParams)?;
            if key.is_empty() || key.chars().any(|c| c.is_whitespace() || c == ',') {
                return Err(ChannelError::InvalidKey.on(channel));
            }
            if modes.key.as_deref() == Some(key) {
                None
            } else {
                modes.key = Some(key.to_string());
                Some(Some(key.to_string()))
            }
        }
        ChannelMode::Key => match (&modes.key, mode.arg()) {
            (None, _) => None,
            (Some(current), Some(given)) if given != "*" && given != current => {
                return Err(ChannelError::KeySet.on(channel));
            }
            (Some(_), given) => {
                modes.key = None;
                Some(Some(given.unwrap_or("*").to_string()))
            }
        },
        ChannelMode::Limit if plus => {
            let raw = mode.arg().ok_or(HandlerError::NeedMoreParams)?;
            let limit = raw
                .parse::<usize>()
                .ok()
                .filter(|n| *n > 0)
                .ok_or_else(|| HandlerError::InvalidModeParam {
                    target: channel.to_string(),
                    mode: 'l',
                    param: raw.to_string(),
                    description: "Invalid limit".to_string(),
                })?;
            if modes.limit == Some(limit) {
                None
            } else {
                modes.limit = Some(limit);
                Some(Some(limit.to_string()))
            }
        }
        ChannelMode::Limit => modes.limit.take().map(|_| None),
        ChannelMode::Oper | ChannelMode::Unknown(_) => None,
    };
    Ok(applied)
}

fn channel_mut<'c>(
    ctx: &'c mut Context<'_>,
    channel: &str,
) -> Result<&'c mut Channel, HandlerError> {
    ctx.directory
        .channel_mut(channel)
        .ok_or_else(|| HandlerError::NoSuchChannel(channel.to_string()))
}
