//! User mode handling.
//!
//! Users can only query/change their own modes. `+o` is only granted by
//! OPER; `-o` drops it.

use super::super::{Context, HandlerError, HandlerResult};
use ircserv_proto::{Message, Mode, Response, UserMode};
use tracing::debug;

/// Handle user mode query/change.
pub fn handle_user_mode(
    ctx: &mut Context<'_>,
    target: &str,
    modes: &[Mode<UserMode>],
) -> HandlerResult {
    let nick = ctx.nick();
    if target != nick {
        return Err(HandlerError::UsersDontMatch);
    }

    if modes.is_empty() {
        let mode_string = ctx.user()?.modes.as_mode_string();
        ctx.send_reply(Response::RPL_UMODEIS, [mode_string]);
        return Ok(());
    }

    let prefix = ctx.prefix()?;
    let user_modes = &mut ctx.conn_mut()?.user.modes;
    let mut applied = String::new();
    let mut last_sign = None;
    let mut unknown = false;

    for mode in modes {
        let plus = mode.is_plus();
        let changed = match mode.mode() {
            UserMode::Invisible if user_modes.invisible != plus => {
                user_modes.invisible = plus;
                true
            }
            UserMode::Oper if !plus && user_modes.oper => {
                user_modes.oper = false;
                true
            }
            UserMode::Unknown(_) => {
                unknown = true;
                false
            }
            _ => false,
        };
        if changed {
            if last_sign != Some(plus) {
                applied.push(if plus { '+' } else { '-' });
                last_sign = Some(plus);
            }
            applied.push_str(&mode.mode().to_string());
        }
    }

    if !applied.is_empty() {
        debug!(nick = %nick, modes = %applied, "User modes changed");
        let change = Message::new("MODE", [nick, applied]).with_prefix(prefix);
        ctx.send(change);
    }
    if unknown {
        return Err(HandlerError::UmodeUnknownFlag);
    }
    Ok(())
}
