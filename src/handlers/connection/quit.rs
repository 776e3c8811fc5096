//! QUIT handler for terminating client sessions.

use super::super::{Context, Handler, HandlerResult};
use ircserv_proto::Message;
use tracing::info;

/// Reason used when the client gives none.
const DEFAULT_QUIT_REASON: &str = "Client Quit";

/// Handler for QUIT command.
///
/// The link is only marked here; peers are told when the reactor tears
/// the connection down.
pub struct QuitHandler;

impl Handler for QuitHandler {
    fn handle(&self, ctx: &mut Context<'_>, msg: &Message) -> HandlerResult {
        let reason = msg
            .arg(0)
            .filter(|r| !r.is_empty())
            .unwrap_or(DEFAULT_QUIT_REASON);

        info!(conn = %ctx.id, nick = %ctx.nick(), message = %reason, "Client quit");

        ctx.close(&format!("Quit: {reason}"));
        Ok(())
    }
}
