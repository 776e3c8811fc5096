//! Command handler registry and dispatch.
//!
//! Handlers are filed by registration phase:
//! - `pre_reg_handlers`: commands that drive registration (PASS, NICK, USER,
//!   CAP). Reachable in every state; they reject re-registration themselves.
//! - `post_reg_handlers`: everything that needs a registered user. An
//!   unregistered connection gets ERR_NOTREGISTERED and nothing else runs.
//! - `universal_handlers`: keepalive and disconnect (PING, PONG, QUIT).

use super::context::{Context, Handler, HandlerError};
use crate::handlers::{
    channel::{
        InviteHandler, JoinHandler, KickHandler, ListHandler, NamesHandler, PartHandler,
        TopicHandler,
    },
    connection::{
        CapHandler, NickHandler, PassHandler, PingHandler, PongHandler, QuitHandler, UserHandler,
    },
    messaging::{NoticeHandler, PrivmsgHandler},
    mode::ModeHandler,
    user_query::{WhoHandler, WhoisHandler},
    user_status::{AwayHandler, OperHandler},
};
use ircserv_proto::Message;
use std::collections::HashMap;
use tracing::{Level, debug, span};

/// Registry of command handlers.
pub struct Registry {
    pre_reg_handlers: HashMap<&'static str, Box<dyn Handler>>,
    post_reg_handlers: HashMap<&'static str, Box<dyn Handler>>,
    universal_handlers: HashMap<&'static str, Box<dyn Handler>>,
}

impl Registry {
    /// Create a new registry with all handlers registered.
    pub fn new() -> Self {
        let mut pre_reg_handlers: HashMap<&'static str, Box<dyn Handler>> = HashMap::new();
        let mut post_reg_handlers: HashMap<&'static str, Box<dyn Handler>> = HashMap::new();
        let mut universal_handlers: HashMap<&'static str, Box<dyn Handler>> = HashMap::new();

        // Registration
        pre_reg_handlers.insert("PASS", Box::new(PassHandler));
        pre_reg_handlers.insert("NICK", Box::new(NickHandler));
        pre_reg_handlers.insert("USER", Box::new(UserHandler));
        pre_reg_handlers.insert("CAP", Box::new(CapHandler));

        // Keepalive / disconnect
        universal_handlers.insert("PING", Box::new(PingHandler));
        universal_handlers.insert("PONG", Box::new(PongHandler));
        universal_handlers.insert("QUIT", Box::new(QuitHandler));

        // Channel handlers
        post_reg_handlers.insert("JOIN", Box::new(JoinHandler));
        post_reg_handlers.insert("PART", Box::new(PartHandler));
        post_reg_handlers.insert("TOPIC", Box::new(TopicHandler));
        post_reg_handlers.insert("NAMES", Box::new(NamesHandler));
        post_reg_handlers.insert("LIST", Box::new(ListHandler));
        post_reg_handlers.insert("KICK", Box::new(KickHandler));
        post_reg_handlers.insert("INVITE", Box::new(InviteHandler));
        post_reg_handlers.insert("MODE", Box::new(ModeHandler));

        // Messaging handlers
        post_reg_handlers.insert("PRIVMSG", Box::new(PrivmsgHandler));
        post_reg_handlers.insert("NOTICE", Box::new(NoticeHandler));

        // User query handlers
        post_reg_handlers.insert("WHO", Box::new(WhoHandler));
        post_reg_handlers.insert("WHOIS", Box::new(WhoisHandler));

        // User status
        post_reg_handlers.insert("AWAY", Box::new(AwayHandler));
        post_reg_handlers.insert("OPER", Box::new(OperHandler));

        Self {
            pre_reg_handlers,
            post_reg_handlers,
            universal_handlers,
        }
    }

    fn lookup(&self, cmd: &str, registered: bool) -> Option<&dyn Handler> {
        let handler = self
            .universal_handlers
            .get(cmd)
            .or_else(|| self.pre_reg_handlers.get(cmd))
            .or_else(|| {
                if registered {
                    self.post_reg_handlers.get(cmd)
                } else {
                    None
                }
            });
        handler.map(|h| h.as_ref())
    }

    /// Dispatch a parsed message for the connection in `ctx`.
    ///
    /// Policy errors become a single reply on the issuing connection; a
    /// fatal error also marks it for closing.
    pub fn dispatch(&self, ctx: &mut Context<'_>, msg: &Message) {
        let cmd_name = msg.command.as_str();
        let registered = ctx.is_registered();

        let result = match self.lookup(cmd_name, registered) {
            Some(handler) => {
                crate::metrics::record_command(cmd_name);

                let irc_span = span!(
                    Level::DEBUG,
                    "irc.command",
                    command = %cmd_name,
                    conn = %ctx.id,
                );
                let _enter = irc_span.enter();
                handler.handle(ctx, msg)
            }
            None if self.post_reg_handlers.contains_key(cmd_name) => {
                Err(HandlerError::NotRegistered)
            }
            None => {
                debug!(conn = %ctx.id, command = %cmd_name, "Unknown command");
                Err(HandlerError::UnknownCommand(cmd_name.to_string()))
            }
        };

        if let Err(e) = result {
            self.report(ctx, cmd_name, &e);
        }
    }

    fn report(&self, ctx: &mut Context<'_>, cmd_name: &str, error: &HandlerError) {
        debug!(conn = %ctx.id, command = %cmd_name, error = %error, "Command error");
        ctx.send_error(cmd_name, error);
        if error.is_fatal() {
            ctx.close(&error.to_string());
        }
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}
