//! NAMES command handler.

use super::super::{Context, Handler, HandlerResult, split_list};
use super::common::{send_names, send_names_lines};
use ircserv_proto::{Message, Response};

/// Handler for NAMES command.
///
/// `NAMES [channels]`. Without arguments every channel is listed and a
/// single `366 *` ends the reply.
pub struct NamesHandler;

impl Handler for NamesHandler {
    fn handle(&self, ctx: &mut Context<'_>, msg: &Message) -> HandlerResult {
        match msg.arg(0).filter(|a| !a.is_empty()) {
            Some(list) => {
                for channel in split_list(list) {
                    if ctx.directory.channel(channel).is_some() {
                        send_names(ctx, channel);
                    } else {
                        ctx.send_reply(Response::RPL_ENDOFNAMES, [channel, "End of /NAMES list."]);
                    }
                }
            }
            None => {
                let all: Vec<String> = ctx.directory.channels().map(|c| c.name.clone()).collect();
                for channel in &all {
                    send_names_lines(ctx, channel);
                }
                ctx.send_reply(Response::RPL_ENDOFNAMES, ["*", "End of /NAMES list."]);
            }
        }
        Ok(())
    }
}
