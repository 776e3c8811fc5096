//! Command handler context and core types.
//!
//! A [`Context`] lends the Directory to one handler invocation together
//! with the id of the connection that issued the command.

use crate::handlers::helpers::server_reply;
use crate::state::{ConnId, Connection, Directory, ServerInfo, User};
use ircserv_proto::{Message, Prefix, Response};

pub use crate::error::{HandlerError, HandlerResult};

/// A command handler.
///
/// Handlers run to completion: they may mutate the Directory, queue output
/// on any connection and mark their own connection for closing, but never
/// wait on I/O.
pub trait Handler: Send + Sync {
    fn handle(&self, ctx: &mut Context<'_>, msg: &Message) -> HandlerResult;
}

/// Handler context passed to each command handler.
pub struct Context<'a> {
    /// Connection that sent the command.
    pub id: ConnId,
    pub directory: &'a mut Directory,
    pub server: &'a ServerInfo,
}

impl<'a> Context<'a> {
    pub fn new(id: ConnId, directory: &'a mut Directory, server: &'a ServerInfo) -> Self {
        Self {
            id,
            directory,
            server,
        }
    }

    /// The issuing connection.
    ///
    /// The dispatcher only runs handlers for live connections, so a missing
    /// record is an internal error.
    pub fn conn(&self) -> Result<&Connection, HandlerError> {
        self.directory
            .connection(self.id)
            .ok_or_else(|| HandlerError::Internal(format!("no record for {}", self.id)))
    }

    pub fn conn_mut(&mut self) -> Result<&mut Connection, HandlerError> {
        let id = self.id;
        self.directory
            .connection_mut(id)
            .ok_or_else(|| HandlerError::Internal(format!("no record for {id}")))
    }

    pub fn user(&self) -> Result<&User, HandlerError> {
        Ok(&self.conn()?.user)
    }

    /// Reply target: the nick, or `*` before one is set.
    pub fn nick(&self) -> String {
        self.directory
            .connection(self.id)
            .map(|c| c.user.nick_or_star().to_string())
            .unwrap_or_else(|| "*".to_string())
    }

    /// `nick!user@host` of the issuing user.
    pub fn prefix(&self) -> Result<Prefix, HandlerError> {
        Ok(self.user()?.prefix())
    }

    pub fn is_registered(&self) -> bool {
        self.directory
            .connection(self.id)
            .is_some_and(Connection::is_registered)
    }

    /// Queue a message for the issuing connection.
    pub fn send(&mut self, msg: Message) {
        self.directory.send_to(self.id, &msg);
    }

    /// Build and queue a numeric reply; the nick is prepended to `params`.
    pub fn send_reply<I, P>(&mut self, response: Response, params: I)
    where
        I: IntoIterator<Item = P>,
        P: Into<String>,
    {
        let mut all = vec![self.nick()];
        all.extend(params.into_iter().map(Into::into));
        let reply = server_reply(&self.server.name, response, all);
        self.send(reply);
    }

    /// Queue the reply for a policy error without aborting the command.
    ///
    /// Used by multi-target commands that report per target.
    pub fn send_error(&mut self, cmd_name: &str, error: &HandlerError) {
        crate::metrics::record_command_error(cmd_name, error.error_code());
        let nick = self.nick();
        if let Some(reply) = error.to_irc_reply(&self.server.name, &nick, cmd_name) {
            self.send(reply);
        }
    }

    /// Mark the issuing connection for teardown.
    pub fn close(&mut self, reason: &str) {
        self.directory.close(self.id, reason);
    }
}
