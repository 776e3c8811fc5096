//! MODE command handler.
//!
//! - User modes: `MODE nick [+/-modes]`
//! - Channel modes: `MODE channel [+/-modes [args...]]`

mod channel;
mod user;

use super::{Context, Handler, HandlerError, HandlerResult};
use ircserv_proto::{ChannelExt, ChannelMode, Message, Mode, UserMode};

/// Handler for MODE command.
pub struct ModeHandler;

impl Handler for ModeHandler {
    fn handle(&self, ctx: &mut Context<'_>, msg: &Message) -> HandlerResult {
        // MODE <target> [modes [params]]
        let target = msg.arg(0).ok_or(HandlerError::NeedMoreParams)?;
        let mode_args: Vec<&str> = msg.params.iter().skip(1).map(String::as_str).collect();

        if target.is_channel_target() {
            let modes = Mode::<ChannelMode>::as_channel_modes(&mode_args);
            channel::handle_channel_mode(ctx, target, &modes)
        } else {
            let modes = Mode::<UserMode>::as_user_modes(&mode_args);
            user::handle_user_mode(ctx, target, &modes)
        }
    }
}
