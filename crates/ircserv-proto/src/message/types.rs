use crate::prefix::Prefix;
use crate::response::Response;

/// An owned IRC message.
///
/// ```
/// use ircserv_proto::Message;
///
/// let msg: Message = ":alice!a@host PRIVMSG #team :hi there".parse().unwrap();
/// assert_eq!(msg.command, "PRIVMSG");
/// assert_eq!(msg.params, vec!["#team", "hi there"]);
/// ```
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Message {
    /// Message origin, if any.
    pub prefix: Option<Prefix>,
    /// Upper-case command word or three-digit numeric.
    pub command: String,
    /// Positional parameters; the last may contain spaces.
    pub params: Vec<String>,
}

impl Message {
    /// Create a message without a prefix.
    pub fn new<C, I, P>(command: C, params: I) -> Self
    where
        C: Into<String>,
        I: IntoIterator<Item = P>,
        P: Into<String>,
    {
        Message {
            prefix: None,
            command: command.into(),
            params: params.into_iter().map(Into::into).collect(),
        }
    }

    /// Create a numeric reply.
    pub fn response<I, P>(response: Response, params: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<String>,
    {
        Message::new(response.to_string(), params)
    }

    /// Attach a prefix.
    #[must_use]
    pub fn with_prefix(mut self, prefix: Prefix) -> Self {
        self.prefix = Some(prefix);
        self
    }

    /// Positional parameter `n`, if present.
    pub fn arg(&self, n: usize) -> Option<&str> {
        self.params.get(n).map(String::as_str)
    }

    /// Nickname of the prefix, if it is a user prefix.
    pub fn source_nickname(&self) -> Option<&str> {
        self.prefix.as_ref().and_then(Prefix::nick)
    }

    /// `PRIVMSG <target> :<text>`
    pub fn privmsg(target: impl Into<String>, text: impl Into<String>) -> Self {
        Message::new("PRIVMSG", [target.into(), text.into()])
    }

    /// `NOTICE <target> :<text>`
    pub fn notice(target: impl Into<String>, text: impl Into<String>) -> Self {
        Message::new("NOTICE", [target.into(), text.into()])
    }

    /// `JOIN <channel>`
    pub fn join(channel: impl Into<String>) -> Self {
        Message::new("JOIN", [channel.into()])
    }

    /// `PART <channel> :<reason>`
    pub fn part(channel: impl Into<String>, reason: impl Into<String>) -> Self {
        Message::new("PART", [channel.into(), reason.into()])
    }

    /// `KICK <channel> <nick> :<reason>`
    pub fn kick(
        channel: impl Into<String>,
        nick: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Message::new("KICK", [channel.into(), nick.into(), reason.into()])
    }

    /// `TOPIC <channel> :<text>`
    pub fn topic(channel: impl Into<String>, text: impl Into<String>) -> Self {
        Message::new("TOPIC", [channel.into(), text.into()])
    }

    /// `INVITE <nick> <channel>`
    pub fn invite(nick: impl Into<String>, channel: impl Into<String>) -> Self {
        Message::new("INVITE", [nick.into(), channel.into()])
    }

    /// `NICK <nick>`
    pub fn nick(nick: impl Into<String>) -> Self {
        Message::new("NICK", [nick.into()])
    }

    /// `QUIT :<reason>`
    pub fn quit(reason: impl Into<String>) -> Self {
        Message::new("QUIT", [reason.into()])
    }

    /// `PING <token>`
    pub fn ping(token: impl Into<String>) -> Self {
        Message::new("PING", [token.into()])
    }

    /// `PONG <server> :<token>`
    pub fn pong(server: impl Into<String>, token: impl Into<String>) -> Self {
        Message::new("PONG", [server.into(), token.into()])
    }

    /// `ERROR :<text>`
    pub fn error(text: impl Into<String>) -> Self {
        Message::new("ERROR", [text.into()])
    }
}
