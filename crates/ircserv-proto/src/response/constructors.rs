//! Error reply constructors for `Response`.
//!
//! Each constructor returns an unprefixed [`Message`]; the caller attaches
//! the server prefix before queueing it.

use crate::message::Message;
use crate::response::Response;

macro_rules! impl_err {
    (
        $(#[$meta:meta])*
        $name:ident, $resp:ident, $msg:literal
    ) => {
        $(#[$meta])*
        pub fn $name(client: &str) -> Message {
            Message::response(Response::$resp, [client, $msg])
        }
    };
    (
        $(#[$meta:meta])*
        $name:ident, $resp:ident, $arg:ident, $msg:literal
    ) => {
        $(#[$meta])*
        pub fn $name(client: &str, $arg: &str) -> Message {
            Message::response(Response::$resp, [client, $arg, $msg])
        }
    };
    (
        $(#[$meta:meta])*
        $name:ident, $resp:ident, fmt($arg:ident, $fmt:literal)
    ) => {
        $(#[$meta])*
        pub fn $name(client: &str, $arg: &str) -> Message {
            Message::response(Response::$resp, [client.to_string(), format!($fmt, $arg)])
        }
    };
    (
        $(#[$meta:meta])*
        $name:ident, $resp:ident, $arg1:ident, $arg2:ident, $msg:literal
    ) => {
        $(#[$meta])*
        pub fn $name(client: &str, $arg1: &str, $arg2: &str) -> Message {
            Message::response(Response::$resp, [client, $arg1, $arg2, $msg])
        }
    };
}

impl Response {
    // === 400-499 Error Replies ===

    impl_err!(
        /// `401 ERR_NOSUCHNICK`
        /// `<nickname> :No such nick/channel`
        err_nosuchnick, ERR_NOSUCHNICK, nickname, "No such nick/channel"
    );

    impl_err!(
        /// `403 ERR_NOSUCHCHANNEL`
        /// `<channel name> :No such channel`
        err_nosuchchannel, ERR_NOSUCHCHANNEL, channel, "No such channel"
    );

    impl_err!(
        /// `404 ERR_CANNOTSENDTOCHAN`
        /// `<channel name> :Cannot send to channel`
        err_cannotsendtochan, ERR_CANNOTSENDTOCHAN, channel, "Cannot send to channel"
    );

    impl_err!(
        /// `407 ERR_TOOMANYTARGETS`
        /// `<target> :Too many recipients`
        err_toomanytargets, ERR_TOOMANYTARGETS, target, "Too many recipients"
    );

    impl_err!(
        /// `409 ERR_NOORIGIN`
        /// `:No origin specified`
        err_noorigin, ERR_NOORIGIN, "No origin specified"
    );

    impl_err!(
        /// `411 ERR_NORECIPIENT`
        /// `:No recipient given (<command>)`
        err_norecipient, ERR_NORECIPIENT, fmt(command, "No recipient given ({})")
    );

    impl_err!(
        /// `412 ERR_NOTEXTTOSEND`
        /// `:No text to send`
        err_notexttosend, ERR_NOTEXTTOSEND, "No text to send"
    );

    impl_err!(
        /// `421 ERR_UNKNOWNCOMMAND`
        /// `<command> :Unknown command`
        err_unknowncommand, ERR_UNKNOWNCOMMAND, command, "Unknown command"
    );

    impl_err!(
        /// `422 ERR_NOMOTD`
        /// `:MOTD File is missing`
        err_nomotd, ERR_NOMOTD, "MOTD File is missing"
    );

    impl_err!(
        /// `431 ERR_NONICKNAMEGIVEN`
        /// `:No nickname given`
        err_nonicknamegiven, ERR_NONICKNAMEGIVEN, "No nickname given"
    );

    impl_err!(
        /// `432 ERR_ERRONEUSNICKNAME`
        /// `<nick> :Erroneous nickname`
        err_erroneusnickname, ERR_ERRONEUSNICKNAME, nick, "Erroneous nickname"
    );

    impl_err!(
        /// `433 ERR_NICKNAMEINUSE`
        /// `<nick> :Nickname is already in use`
        err_nicknameinuse, ERR_NICKNAMEINUSE, nick, "Nickname is already in use"
    );

    impl_err!(
        /// `441 ERR_USERNOTINCHANNEL`
        /// `<nick> <channel> :They aren't on that channel`
        err_usernotinchannel, ERR_USERNOTINCHANNEL, nick, channel, "They aren't on that channel"
    );

    impl_err!(
        /// `442 ERR_NOTONCHANNEL`
        /// `<channel> :You're not on that channel`
        err_notonchannel, ERR_NOTONCHANNEL, channel, "You're not on that channel"
    );

    impl_err!(
        /// `443 ERR_USERONCHANNEL`
        /// `<user> <channel> :is already on channel`
        err_useronchannel, ERR_USERONCHANNEL, nick, channel, "is already on channel"
    );

    impl_err!(
        /// `451 ERR_NOTREGISTERED`
        /// `:You have not registered`
        err_notregistered, ERR_NOTREGISTERED, "You have not registered"
    );

    impl_err!(
        /// `461 ERR_NEEDMOREPARAMS`
        /// `<command> :Not enough parameters`
        err_needmoreparams, ERR_NEEDMOREPARAMS, command, "Not enough parameters"
    );

    impl_err!(
        /// `462 ERR_ALREADYREGISTERED`
        /// `:Unauthorized command (already registered)`
        err_alreadyregistered, ERR_ALREADYREGISTERED, "Unauthorized command (already registered)"
    );

    impl_err!(
        /// `464 ERR_PASSWDMISMATCH`
        /// `:Password incorrect`
        err_passwdmismatch, ERR_PASSWDMISMATCH, "Password incorrect"
    );

    impl_err!(
        /// `467 ERR_KEYSET`
        /// `<channel> :Channel key already set`
        err_keyset, ERR_KEYSET, channel, "Channel key already set"
    );

    impl_err!(
        /// `471 ERR_CHANNELISFULL`
        /// `<channel> :Cannot join channel (+l)`
        err_channelisfull, ERR_CHANNELISFULL, channel, "Cannot join channel (+l)"
    );

    impl_err!(
        /// `473 ERR_INVITEONLYCHAN`
        /// `<channel> :Cannot join channel (+i)`
        err_inviteonlychan, ERR_INVITEONLYCHAN, channel, "Cannot join channel (+i)"
    );

    impl_err!(
        /// `475 ERR_BADCHANNELKEY`
        /// `<channel> :Cannot join channel (+k)`
        err_badchannelkey, ERR_BADCHANNELKEY, channel, "Cannot join channel (+k)"
    );

    impl_err!(
        /// `476 ERR_BADCHANMASK`
        /// `<channel> :Bad Channel Mask`
        err_badchanmask, ERR_BADCHANMASK, channel, "Bad Channel Mask"
    );

    impl_err!(
        /// `482 ERR_CHANOPRIVSNEEDED`
        /// `<channel> :You're not channel operator`
        err_chanoprivsneeded, ERR_CHANOPRIVSNEEDED, channel, "You're not channel operator"
    );

    // === 500+ ===

    impl_err!(
        /// `501 ERR_UMODEUNKNOWNFLAG`
        /// `:Unknown MODE flag`
        err_umodeunknownflag, ERR_UMODEUNKNOWNFLAG, "Unknown MODE flag"
    );

    impl_err!(
        /// `502 ERR_USERSDONTMATCH`
        /// `:Cant change mode for other users`
        err_usersdontmatch, ERR_USERSDONTMATCH, "Cant change mode for other users"
    );

    impl_err!(
        /// `525 ERR_INVALIDKEY`
        /// `<channel> :Key is not well-formed`
        err_invalidkey, ERR_INVALIDKEY, channel, "Key is not well-formed"
    );

    /// `696 ERR_INVALIDMODEPARAM`
    /// `<target> <mode char> <parameter> :<description>`
    pub fn err_invalidmodeparam(
        client: &str,
        target: &str,
        mode: char,
        param: &str,
        description: &str,
    ) -> Message {
        Message::response(
            Response::ERR_INVALIDMODEPARAM,
            [
                client.to_string(),
                target.to_string(),
                mode.to_string(),
                param.to_string(),
                description.to_string(),
            ],
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_arg_error() {
        let msg = Response::err_nicknameinuse("*", "alice");
        assert_eq!(msg.to_string(), "433 * alice :Nickname is already in use\r\n");
    }

    #[test]
    fn test_formatted_error() {
        let msg = Response::err_norecipient("alice", "PRIVMSG");
        assert_eq!(msg.params, vec!["alice", "No recipient given (PRIVMSG)"]);
    }

    #[test]
    fn test_two_arg_error() {
        let msg = Response::err_usernotinchannel("alice", "bob", "#team");
        assert_eq!(msg.command, "441");
        assert_eq!(msg.arg(1), Some("bob"));
        assert_eq!(msg.arg(2), Some("#team"));
    }
}
