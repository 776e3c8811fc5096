//! Common utilities for channel command handlers.
//!
//! Pure list parsing plus the topic/names replies and the leave path shared
//! by JOIN, PART, TOPIC and NAMES.

use super::super::{Context, HandlerError, HandlerResult};
use crate::error::ChannelError;
use ircserv_proto::{ChannelExt, Message, Response};

/// Part reason when the client gives none.
pub const DEFAULT_PART_REASON: &str = "Leaving";

/// Keep each 353 line comfortably below the 512-byte line limit.
const NAMES_LINE_BUDGET: usize = 400;

/// Parse a comma-separated list of keys and align with channel count.
/// Empty keys are represented as None, missing keys are padded with None.
pub fn parse_key_list(keys_str: Option<&str>, channel_count: usize) -> Vec<Option<&str>> {
    let mut key_list: Vec<Option<&str>> = keys_str
        .map(|keys| {
            keys.split(',')
                .map(|k| Some(k.trim()).filter(|k| !k.is_empty()))
                .collect()
        })
        .unwrap_or_default();
    key_list.resize(channel_count, None);
    key_list
}

/// Parse an optional part/kick reason.
/// Returns None if the reason is empty or whitespace-only.
pub fn parse_reason(reason: Option<&str>) -> Option<&str> {
    reason.map(|r| r.trim()).filter(|r| !r.is_empty())
}

/// Check if JOIN 0 syntax (leave all channels).
#[inline]
pub fn is_join_zero(channels_str: &str) -> bool {
    channels_str == "0"
}

/// Normalise a JOIN target: names without a channel prefix get `#`.
pub fn normalize_channel(name: &str) -> String {
    if name.is_channel_target() {
        name.to_string()
    } else {
        format!("#{name}")
    }
}

/// RPL_NOTOPIC, or RPL_TOPIC + RPL_TOPICWHOTIME.
pub fn send_topic(ctx: &mut Context<'_>, channel: &str) {
    let topic = ctx.directory.channel(channel).and_then(|c| c.topic.clone());
    match topic {
        Some(topic) => {
            ctx.send_reply(Response::RPL_TOPIC, [channel, topic.text.as_str()]);
            ctx.send_reply(
                Response::RPL_TOPICWHOTIME,
                [
                    channel.to_string(),
                    topic.set_by,
                    topic.set_at.to_string(),
                ],
            );
        }
        None => ctx.send_reply(Response::RPL_NOTOPIC, [channel, "No topic is set"]),
    }
}

/// Member names with their prefix, in join order.
pub fn member_names(ctx: &Context<'_>, channel: &str) -> Vec<String> {
    let Some(chan) = ctx.directory.channel(channel) else {
        return Vec::new();
    };
    chan.members()
        .filter_map(|(id, modes)| {
            let nick = ctx.directory.connection(id)?.user.nick.as_deref()?;
            Some(match modes.prefix_char() {
                Some(p) => format!("{p}{nick}"),
                None => nick.to_string(),
            })
        })
        .collect()
}

/// RPL_NAMREPLY lines for one channel, without the terminating 366.
pub fn send_names_lines(ctx: &mut Context<'_>, channel: &str) {
    let names = member_names(ctx, channel);
    let mut line = String::new();
    for name in names {
        if !line.is_empty() && line.len() + name.len() + 1 > NAMES_LINE_BUDGET {
            ctx.send_reply(Response::RPL_NAMREPLY, ["=", channel, line.as_str()]);
            line.clear();
        }
        if !line.is_empty() {
            line.push(' ');
        }
        line.push_str(&name);
    }
    if !line.is_empty() {
        ctx.send_reply(Response::RPL_NAMREPLY, ["=", channel, line.as_str()]);
    }
}

/// RPL_NAMREPLY lines followed by RPL_ENDOFNAMES.
pub fn send_names(ctx: &mut Context<'_>, channel: &str) {
    send_names_lines(ctx, channel);
    ctx.send_reply(Response::RPL_ENDOFNAMES, [channel, "End of /NAMES list."]);
}

/// Leave one channel: announce to every member (leaver included), then
/// remove the membership. An emptied channel is deleted.
pub fn leave_channel(ctx: &mut Context<'_>, channel: &str, reason: &str) -> HandlerResult {
    let chan = ctx
        .directory
        .channel(channel)
        .ok_or_else(|| HandlerError::NoSuchChannel(channel.to_string()))?;
    if !chan.is_member(ctx.id) {
        return Err(ChannelError::NotOnChannel.on(channel));
    }

    let part = Message::part(channel, reason).with_prefix(ctx.prefix()?);
    ctx.directory.broadcast(channel, &part, None);
    ctx.directory.remove_member(ctx.id, channel);
    Ok(())
}
