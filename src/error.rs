//! Unified error handling for ircserv.
//!
//! Handlers return [`HandlerResult`]; the dispatcher turns an `Err` into the
//! single numeric reply the client sees. Nothing here crosses the Directory
//! boundary as a panic or is bubbled further than the dispatcher.

use ircserv_proto::{Message, Prefix, Response};
use thiserror::Error;

// ============================================================================
// Handler Errors (command processing)
// ============================================================================

/// Errors that can occur during command handling.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HandlerError {
    #[error("not enough parameters")]
    NeedMoreParams,

    #[error("no recipient given")]
    NoRecipient,

    #[error("no text to send")]
    NoTextToSend,

    #[error("no origin specified")]
    NoOrigin,

    #[error("no nickname given")]
    NoNicknameGiven,

    #[error("nickname in use: {0}")]
    NicknameInUse(String),

    #[error("erroneous nickname: {0}")]
    ErroneousNickname(String),

    #[error("not registered")]
    NotRegistered,

    #[error("already registered")]
    AlreadyRegistered,

    /// Wrong connection password. Fatal: the connection is closed after the
    /// reply is queued.
    #[error("password mismatch")]
    PasswordMismatch,

    /// Wrong OPER credentials. Not fatal.
    #[error("oper credentials rejected")]
    OperFailed,

    #[error("no such nick: {0}")]
    NoSuchNick(String),

    #[error("no such channel: {0}")]
    NoSuchChannel(String),

    #[error("bad channel mask: {0}")]
    BadChanMask(String),

    #[error("too many targets: {0}")]
    TooManyTargets(String),

    #[error("unknown command: {0}")]
    UnknownCommand(String),

    #[error("cannot change mode for other users")]
    UsersDontMatch,

    #[error("unknown user mode flag")]
    UmodeUnknownFlag,

    #[error("invalid parameter {param:?} for mode {mode} on {target}")]
    InvalidModeParam {
        target: String,
        mode: char,
        param: String,
        description: String,
    },

    #[error("{channel}: {error}")]
    Channel {
        channel: String,
        error: ChannelError,
    },

    #[error("internal error: {0}")]
    Internal(String),
}

impl HandlerError {
    /// Get a static error code string for metrics labeling.
    #[inline]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::NeedMoreParams => "need_more_params",
            Self::NoRecipient => "no_recipient",
            Self::NoTextToSend => "no_text_to_send",
            Self::NoOrigin => "no_origin",
            Self::NoNicknameGiven => "no_nickname_given",
            Self::NicknameInUse(_) => "nickname_in_use",
            Self::ErroneousNickname(_) => "erroneous_nickname",
            Self::NotRegistered => "not_registered",
            Self::AlreadyRegistered => "already_registered",
            Self::PasswordMismatch => "password_mismatch",
            Self::OperFailed => "oper_failed",
            Self::NoSuchNick(_) => "no_such_nick",
            Self::NoSuchChannel(_) => "no_such_channel",
            Self::BadChanMask(_) => "bad_chan_mask",
            Self::TooManyTargets(_) => "too_many_targets",
            Self::UnknownCommand(_) => "unknown_command",
            Self::UsersDontMatch => "users_dont_match",
            Self::UmodeUnknownFlag => "umode_unknown_flag",
            Self::InvalidModeParam { .. } => "invalid_mode_param",
            Self::Channel { error, .. } => error.error_code(),
            Self::Internal(_) => "internal_error",
        }
    }

    /// Whether the connection must be closed once the reply is flushed.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::PasswordMismatch)
    }

    /// Convert to an IRC error reply message.
    ///
    /// Returns `None` for errors that don't warrant a client-visible reply.
    pub fn to_irc_reply(&self, server_name: &str, nick: &str, cmd_name: &str) -> Option<Message> {
        let msg = match self {
            Self::NeedMoreParams => Response::err_needmoreparams(nick, cmd_name),
            Self::NoRecipient => Response::err_norecipient(nick, cmd_name),
            Self::NoTextToSend => Response::err_notexttosend(nick),
            Self::NoOrigin => Response::err_noorigin(nick),
            Self::NoNicknameGiven => Response::err_nonicknamegiven(nick),
            Self::NicknameInUse(bad_nick) => Response::err_nicknameinuse(nick, bad_nick),
            Self::ErroneousNickname(bad_nick) => Response::err_erroneusnickname(nick, bad_nick),
            Self::NotRegistered => Response::err_notregistered(nick),
            Self::AlreadyRegistered => Response::err_alreadyregistered(nick),
            Self::PasswordMismatch | Self::OperFailed => Response::err_passwdmismatch(nick),
            Self::NoSuchNick(target) => Response::err_nosuchnick(nick, target),
            Self::NoSuchChannel(chan) => Response::err_nosuchchannel(nick, chan),
            Self::BadChanMask(chan) => Response::err_badchanmask(nick, chan),
            Self::TooManyTargets(target) => Response::err_toomanytargets(nick, target),
            Self::UnknownCommand(cmd) => Response::err_unknowncommand(nick, cmd),
            Self::UsersDontMatch => Response::err_usersdontmatch(nick),
            Self::UmodeUnknownFlag => Response::err_umodeunknownflag(nick),
            Self::InvalidModeParam {
                target,
                mode,
                param,
                description,
            } => Response::err_invalidmodeparam(nick, target, *mode, param, description),
            Self::Channel { channel, error } => {
                return Some(error.to_irc_reply(server_name, nick, channel));
            }

            // These errors don't get client-visible replies
            Self::Internal(_) => return None,
        };

        Some(msg.with_prefix(Prefix::ServerName(server_name.to_string())))
    }
}

/// Result type for command handlers.
pub type HandlerResult = Result<(), HandlerError>;

// ============================================================================
// Channel Errors (membership and privilege checks)
// ============================================================================

/// Channel operation errors.
///
/// Raised by [`Channel`](crate::state::Channel) checks and mapped to
/// RFC-compliant replies by handler code.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChannelError {
    #[error("not on channel")]
    NotOnChannel,

    #[error("you're not channel operator")]
    ChanOpPrivsNeeded,

    #[error("user {0} is not on that channel")]
    UserNotInChannel(String),

    #[error("user {0} is already on that channel")]
    UserOnChannel(String),

    #[error("cannot send to channel")]
    CannotSendToChan,

    #[error("cannot join channel (+i)")]
    InviteOnlyChan,

    #[error("cannot join channel (+l)")]
    ChannelIsFull,

    #[error("cannot join channel (+k)")]
    BadChannelKey,

    #[error("channel key mismatch")]
    KeySet,

    #[error("key is not well-formed")]
    InvalidKey,
}

impl ChannelError {
    /// Get a static error code string for metrics labeling.
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::NotOnChannel => "not_on_channel",
            Self::ChanOpPrivsNeeded => "chanop_privs_needed",
            Self::UserNotInChannel(_) => "user_not_in_channel",
            Self::UserOnChannel(_) => "user_on_channel",
            Self::CannotSendToChan => "cannot_send_to_chan",
            Self::InviteOnlyChan => "invite_only_chan",
            Self::ChannelIsFull => "channel_is_full",
            Self::BadChannelKey => "bad_channel_key",
            Self::KeySet => "key_set",
            Self::InvalidKey => "invalid_key",
        }
    }

    /// Convert to an IRC error reply message.
    pub fn to_irc_reply(&self, server_name: &str, nick: &str, channel: &str) -> Message {
        let msg = match self {
            Self::NotOnChannel => Response::err_notonchannel(nick, channel),
            Self::ChanOpPrivsNeeded => Response::err_chanoprivsneeded(nick, channel),
            Self::UserNotInChannel(target) => {
                Response::err_usernotinchannel(nick, target, channel)
            }
            Self::UserOnChannel(target) => Response::err_useronchannel(nick, target, channel),
            Self::CannotSendToChan => Response::err_cannotsendtochan(nick, channel),
            Self::InviteOnlyChan => Response::err_inviteonlychan(nick, channel),
            Self::ChannelIsFull => Response::err_channelisfull(nick, channel),
            Self::BadChannelKey => Response::err_badchannelkey(nick, channel),
            Self::KeySet => Response::err_keyset(nick, channel),
            Self::InvalidKey => Response::err_invalidkey(nick, channel),
        };

        msg.with_prefix(Prefix::ServerName(server_name.to_string()))
    }

    /// Attach the channel name, producing a handler error.
    pub fn on(self, channel: &str) -> HandlerError {
        HandlerError::Channel {
            channel: channel.to_string(),
            error: self,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handler_error_codes() {
        assert_eq!(HandlerError::NeedMoreParams.error_code(), "need_more_params");
        assert_eq!(HandlerError::NotRegistered.error_code(), "not_registered");
        assert_eq!(
            ChannelError::ChannelIsFull.on("#t").error_code(),
            "channel_is_full"
        );
        assert_eq!(HandlerError::Internal("test".into()).error_code(), "internal_error");
    }

    #[test]
    fn test_handler_error_to_irc_reply() {
        let reply = HandlerError::NeedMoreParams
            .to_irc_reply("srv", "alice", "JOIN")
            .unwrap();
        assert_eq!(reply.to_string(), ":srv 461 alice JOIN :Not enough parameters\r\n");

        // Internal errors don't generate replies
        let reply = HandlerError::Internal("oops".into()).to_irc_reply("srv", "alice", "JOIN");
        assert!(reply.is_none());
    }

    #[test]
    fn test_unregistered_target_is_star() {
        let reply = HandlerError::NotRegistered
            .to_irc_reply("srv", "*", "JOIN")
            .unwrap();
        assert_eq!(reply.to_string(), ":srv 451 * :You have not registered\r\n");
    }

    #[test]
    fn test_channel_error_to_irc_reply() {
        let reply = ChannelError::NotOnChannel.to_irc_reply("srv", "alice", "#test");
        assert_eq!(reply.command, "442");

        let reply = ChannelError::UserNotInChannel("bob".into())
            .on("#test")
            .to_irc_reply("srv", "alice", "KICK")
            .unwrap();
        assert_eq!(
            reply.to_string(),
            ":srv 441 alice bob #test :They aren't on that channel\r\n"
        );
    }

    #[test]
    fn test_only_password_mismatch_is_fatal() {
        assert!(HandlerError::PasswordMismatch.is_fatal());
        assert!(!HandlerError::OperFailed.is_fatal());
        assert!(!HandlerError::NicknameInUse("x".into()).is_fatal());
    }
}
