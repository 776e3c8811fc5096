//! TOPIC command handler.
//!
//! `TOPIC <channel>` reports the topic; `TOPIC <channel> :<text>` sets it
//! (an empty text clears it). Setting needs membership, and operator status
//! while the channel is `+t`.

use super::super::{Context, Handler, HandlerError, HandlerResult};
use super::common::send_topic;
use crate::error::ChannelError;
use crate::state::Topic;
use ircserv_proto::Message;

pub struct TopicHandler;

impl Handler for TopicHandler {
    fn handle(&self, ctx: &mut Context<'_>, msg: &Message) -> HandlerResult {
        let channel = msg.arg(0).ok_or(HandlerError::NeedMoreParams)?;
        let chan = ctx
            .directory
            .channel(channel)
            .ok_or_else(|| HandlerError::NoSuchChannel(channel.to_string()))?;

        let Some(text) = msg.arg(1) else {
            send_topic(ctx, channel);
            return Ok(());
        };

        if !chan.is_member(ctx.id) {
            return Err(ChannelError::NotOnChannel.on(channel));
        }
        if chan.modes.topic_lock && !chan.is_op(ctx.id) {
            return Err(ChannelError::ChanOpPrivsNeeded.on(channel));
        }

        let prefix = ctx.prefix()?;
        let topic = (!text.is_empty()).then(|| Topic {
            text: text.to_string(),
            set_by: ctx.nick(),
            set_at: chrono::Utc::now().timestamp(),
        });
        if let Some(chan) = ctx.directory.channel_mut(channel) {
            chan.topic = topic;
        }

        let change = Message::topic(channel, text).with_prefix(prefix);
        ctx.directory.broadcast(channel, &change, None);
        Ok(())
    }
}
