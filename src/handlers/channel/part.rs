//! PART command handler.
//!
//! # RFC 2812 §3.2.2 - Part message
//!
//! ## Syntax
//! ```text
//! PART <channels> [<reason>]
//! ```
//!
//! ## Behavior
//! - Can part multiple channels (comma-separated)
//! - User must be in channel to part it
//! - The PART reaches every member, the leaver included
//! - Destroys channels left empty

use super::super::{Context, Handler, HandlerError, HandlerResult, split_list};
use super::common::{DEFAULT_PART_REASON, leave_channel, parse_reason};
use ircserv_proto::Message;

pub struct PartHandler;

impl Handler for PartHandler {
    fn handle(&self, ctx: &mut Context<'_>, msg: &Message) -> HandlerResult {
        // PART <channels> [reason]
        let channels_str = msg.arg(0).ok_or(HandlerError::NeedMoreParams)?;
        let reason = parse_reason(msg.arg(1)).unwrap_or(DEFAULT_PART_REASON);

        for channel in split_list(channels_str) {
            if let Err(e) = leave_channel(ctx, channel, reason) {
                ctx.send_error("PART", &e);
            }
        }
        Ok(())
    }
}
