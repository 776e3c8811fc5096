//! Routing shared by PRIVMSG and NOTICE.

use super::super::{Context, HandlerError, HandlerResult, split_list};
use crate::error::ChannelError;
use ircserv_proto::{ChannelExt, Message};

/// Validated `<targets> <text>` parameters.
pub struct Outgoing<'m> {
    pub targets: Vec<&'m str>,
    pub text: &'m str,
}

/// Check the shape of a PRIVMSG/NOTICE: a recipient, some text and no more
/// targets than the server allows.
pub fn validate<'m>(ctx: &Context<'_>, msg: &'m Message) -> Result<Outgoing<'m>, HandlerError> {
    let list = msg
        .arg(0)
        .filter(|t| !t.is_empty())
        .ok_or(HandlerError::NoRecipient)?;
    let text = msg
        .arg(1)
        .filter(|t| !t.is_empty())
        .ok_or(HandlerError::NoTextToSend)?;

    let targets: Vec<&str> = split_list(list).collect();
    if targets.len() > ctx.server.limits.max_targets {
        return Err(HandlerError::TooManyTargets(list.to_string()));
    }
    Ok(Outgoing { targets, text })
}

/// Where a message ended up.
pub enum Delivered {
    Channel,
    /// Direct delivery; carries the target's away message, if any.
    User(Option<String>),
}

/// Deliver one message to one target.
///
/// Channel targets reach every member except the sender, who must be a
/// member. Nick targets reach only that connection.
pub fn route(
    ctx: &mut Context<'_>,
    command: &str,
    target: &str,
    text: &str,
) -> Result<Delivered, HandlerError> {
    let out = Message::new(command, [target, text]).with_prefix(ctx.prefix()?);

    if target.is_channel_target() {
        let chan = ctx
            .directory
            .channel(target)
            .ok_or_else(|| HandlerError::NoSuchChannel(target.to_string()))?;
        if !chan.is_member(ctx.id) {
            return Err(ChannelError::CannotSendToChan.on(target));
        }
        ctx.directory.broadcast(target, &out, Some(ctx.id));
        return Ok(Delivered::Channel);
    }

    let target_id = ctx
        .directory
        .nick_to_id(target)
        .ok_or_else(|| HandlerError::NoSuchNick(target.to_string()))?;
    ctx.directory.send_to(target_id, &out);
    let away = ctx
        .directory
        .connection(target_id)
        .and_then(|c| c.user.away.clone());
    Ok(Delivered::User(away))
}

/// Run `route` for every target, handing each outcome to `on_result`.
pub fn deliver_all<F>(
    ctx: &mut Context<'_>,
    command: &str,
    outgoing: &Outgoing<'_>,
    mut on_result: F,
) -> HandlerResult
where
    F: FnMut(&mut Context<'_>, &str, Result<Delivered, HandlerError>),
{
    for target in &outgoing.targets {
        let result = route(ctx, command, target, outgoing.text);
        on_result(ctx, target, result);
    }
    Ok(())
}
