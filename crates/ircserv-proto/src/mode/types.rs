//! Mode letters understood by the server.

use std::fmt;

/// Common behaviour of user and channel mode letters.
pub trait ModeType: fmt::Display + fmt::Debug + Clone + PartialEq {
    /// Map a mode letter.
    fn from_char(c: char) -> Self;

    /// Whether this letter consumes a positional argument when set (`plus`)
    /// or cleared.
    fn takes_arg(&self, plus: bool) -> bool;
}

/// User modes.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum UserMode {
    /// `i` - hidden from WHO for users sharing no channel
    Invisible,
    /// `o` - server operator
    Oper,
    /// Anything else
    Unknown(char),
}

impl ModeType for UserMode {
    fn from_char(c: char) -> Self {
        match c {
            'i' => UserMode::Invisible,
            'o' => UserMode::Oper,
            other => UserMode::Unknown(other),
        }
    }

    fn takes_arg(&self, _plus: bool) -> bool {
        false
    }
}

impl fmt::Display for UserMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let c = match self {
            UserMode::Invisible => 'i',
            UserMode::Oper => 'o',
            UserMode::Unknown(c) => *c,
        };
        write!(f, "{}", c)
    }
}

/// Channel modes.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ChannelMode {
    /// `i` - join requires an invite
    InviteOnly,
    /// `t` - only operators change the topic
    ProtectedTopic,
    /// `k` - join requires a key
    Key,
    /// `l` - member count cap
    Limit,
    /// `o` - channel operator grant/revoke
    Oper,
    /// Anything else
    Unknown(char),
}

impl ModeType for ChannelMode {
    fn from_char(c: char) -> Self {
        match c {
            'i' => ChannelMode::InviteOnly,
            't' => ChannelMode::ProtectedTopic,
            'k' => ChannelMode::Key,
            'l' => ChannelMode::Limit,
            'o' => ChannelMode::Oper,
            other => ChannelMode::Unknown(other),
        }
    }

    fn takes_arg(&self, plus: bool) -> bool {
        match self {
            ChannelMode::Oper | ChannelMode::Key => true,
            ChannelMode::Limit => plus,
            _ => false,
        }
    }
}

impl fmt::Display for ChannelMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let c = match self {
            ChannelMode::InviteOnly => 'i',
            ChannelMode::ProtectedTopic => 't',
            ChannelMode::Key => 'k',
            ChannelMode::Limit => 'l',
            ChannelMode::Oper => 'o',
            ChannelMode::Unknown(c) => *c,
        };
        write!(f, "{}", c)
    }
}

/// One parsed mode change.
#[derive(Clone, Debug, PartialEq)]
pub enum Mode<T: ModeType> {
    /// Set, with its argument if one was consumed.
    Plus(T, Option<String>),
    /// Clear, with its argument if one was consumed.
    Minus(T, Option<String>),
}

impl<T: ModeType> Mode<T> {
    /// Shorthand for `Mode::Plus`.
    pub fn plus(mode: T, arg: Option<&str>) -> Self {
        Self::Plus(mode, arg.map(String::from))
    }

    /// Shorthand for `Mode::Minus`.
    pub fn minus(mode: T, arg: Option<&str>) -> Self {
        Self::Minus(mode, arg.map(String::from))
    }

    /// `+x` / `-x`.
    pub fn flag(&self) -> String {
        match self {
            Self::Plus(m, _) => format!("+{}", m),
            Self::Minus(m, _) => format!("-{}", m),
        }
    }

    /// The consumed argument, if any.
    pub fn arg(&self) -> Option<&str> {
        match self {
            Self::Plus(_, arg) | Self::Minus(_, arg) => arg.as_deref(),
        }
    }

    /// The mode letter.
    pub fn mode(&self) -> &T {
        match self {
            Self::Plus(m, _) | Self::Minus(m, _) => m,
        }
    }

    /// Whether this sets the mode.
    pub fn is_plus(&self) -> bool {
        matches!(self, Self::Plus(..))
    }
}
