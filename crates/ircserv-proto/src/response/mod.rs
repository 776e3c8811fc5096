//! IRC numeric replies.
//!
//! Only the numerics this server emits are listed. Every reply line has the
//! shape `:<server> <code> <target nick> <payload...>`.
//!
//! # Reference
//! - RFC 2812 Section 5: Replies
//! - Modern IRC documentation: <https://modern.ircdocs.horse/>

#![allow(non_camel_case_types)]

mod constructors;
mod helpers;

/// IRC server response code.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u16)]
#[non_exhaustive]
pub enum Response {
    // === Connection Registration (001-099) ===
    /// 001 - Welcome to the IRC network
    RPL_WELCOME = 1,
    /// 002 - Your host is running version
    RPL_YOURHOST = 2,
    /// 003 - Server creation date
    RPL_CREATED = 3,
    /// 004 - Server info (name, version, user modes, channel modes)
    RPL_MYINFO = 4,
    /// 005 - Server supported features (ISUPPORT)
    RPL_ISUPPORT = 5,

    // === Command Responses (200-399) ===
    /// 221 - Current user modes
    RPL_UMODEIS = 221,
    /// 301 - Target is away
    RPL_AWAY = 301,
    /// 305 - No longer marked away
    RPL_UNAWAY = 305,
    /// 306 - Now marked away
    RPL_NOWAWAY = 306,
    /// 311 - WHOIS user line
    RPL_WHOISUSER = 311,
    /// 312 - WHOIS server line
    RPL_WHOISSERVER = 312,
    /// 313 - WHOIS operator line
    RPL_WHOISOPERATOR = 313,
    /// 315 - End of WHO
    RPL_ENDOFWHO = 315,
    /// 317 - WHOIS idle time
    RPL_WHOISIDLE = 317,
    /// 318 - End of WHOIS
    RPL_ENDOFWHOIS = 318,
    /// 319 - WHOIS channel list
    RPL_WHOISCHANNELS = 319,
    /// 321 - LIST header
    RPL_LISTSTART = 321,
    /// 322 - LIST entry
    RPL_LIST = 322,
    /// 323 - End of LIST
    RPL_LISTEND = 323,
    /// 324 - Channel modes
    RPL_CHANNELMODEIS = 324,
    /// 329 - Channel creation time
    RPL_CREATIONTIME = 329,
    /// 331 - No topic set
    RPL_NOTOPIC = 331,
    /// 332 - Channel topic
    RPL_TOPIC = 332,
    /// 333 - Who set the topic and when
    RPL_TOPICWHOTIME = 333,
    /// 341 - Invite sent
    RPL_INVITING = 341,
    /// 352 - WHO entry
    RPL_WHOREPLY = 352,
    /// 353 - NAMES entry
    RPL_NAMREPLY = 353,
    /// 366 - End of NAMES
    RPL_ENDOFNAMES = 366,
    /// 372 - MOTD line
    RPL_MOTD = 372,
    /// 375 - MOTD header
    RPL_MOTDSTART = 375,
    /// 376 - End of MOTD
    RPL_ENDOFMOTD = 376,
    /// 381 - Now a server operator
    RPL_YOUREOPER = 381,

    // === Errors (400-599) ===
    /// 401 - No such nick
    ERR_NOSUCHNICK = 401,
    /// 403 - No such channel
    ERR_NOSUCHCHANNEL = 403,
    /// 404 - Cannot send to channel
    ERR_CANNOTSENDTOCHAN = 404,
    /// 407 - Too many targets
    ERR_TOOMANYTARGETS = 407,
    /// 409 - No origin for PING
    ERR_NOORIGIN = 409,
    /// 411 - No recipient
    ERR_NORECIPIENT = 411,
    /// 412 - No text to send
    ERR_NOTEXTTOSEND = 412,
    /// 421 - Unknown command
    ERR_UNKNOWNCOMMAND = 421,
    /// 422 - No MOTD
    ERR_NOMOTD = 422,
    /// 431 - No nickname given
    ERR_NONICKNAMEGIVEN = 431,
    /// 432 - Erroneous nickname
    ERR_ERRONEUSNICKNAME = 432,
    /// 433 - Nickname in use
    ERR_NICKNAMEINUSE = 433,
    /// 441 - Target not on channel
    ERR_USERNOTINCHANNEL = 441,
    /// 442 - You are not on channel
    ERR_NOTONCHANNEL = 442,
    /// 443 - Target already on channel
    ERR_USERONCHANNEL = 443,
    /// 451 - Not registered
    ERR_NOTREGISTERED = 451,
    /// 461 - Not enough parameters
    ERR_NEEDMOREPARAMS = 461,
    /// 462 - Already registered
    ERR_ALREADYREGISTERED = 462,
    /// 464 - Password incorrect
    ERR_PASSWDMISMATCH = 464,
    /// 467 - Channel key already set / mismatch on removal
    ERR_KEYSET = 467,
    /// 471 - Channel is full (+l)
    ERR_CHANNELISFULL = 471,
    /// 473 - Invite only channel (+i)
    ERR_INVITEONLYCHAN = 473,
    /// 475 - Bad channel key (+k)
    ERR_BADCHANNELKEY = 475,
    /// 476 - Bad channel mask
    ERR_BADCHANMASK = 476,
    /// 482 - Channel operator privileges needed
    ERR_CHANOPRIVSNEEDED = 482,
    /// 501 - Unknown user mode flag
    ERR_UMODEUNKNOWNFLAG = 501,
    /// 502 - Cannot change mode for other users
    ERR_USERSDONTMATCH = 502,

    // === Modern numerics ===
    /// 525 - Key is not well-formed
    ERR_INVALIDKEY = 525,
    /// 696 - Invalid mode parameter
    ERR_INVALIDMODEPARAM = 696,
}
