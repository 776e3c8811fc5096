//! Nom-based line parser.
//!
//! ```text
//! [:prefix] <command> [params...] [:trailing]
//! ```
//!
//! The command token is upper-cased. A parameter starting with `:` swallows
//! the rest of the line, spaces included. Runs of spaces between tokens
//! count as one separator.

use std::str::FromStr;

use nom::{
    bytes::complete::{take_while, take_while1},
    character::complete::{char, space0},
    combinator::opt,
    sequence::preceded,
    IResult,
};
use smallvec::SmallVec;

use super::types::Message;
use crate::error::MessageParseError;
use crate::prefix::Prefix;

fn parse_prefix(input: &str) -> IResult<&str, &str> {
    preceded(char(':'), take_while(|c| c != ' '))(input)
}

fn parse_command(input: &str) -> IResult<&str, &str> {
    take_while1(|c| c != ' ')(input)
}

fn parse_params(input: &str) -> SmallVec<[&str; 15]> {
    let mut params: SmallVec<[&str; 15]> = SmallVec::new();
    let mut rest = input;

    loop {
        rest = rest.trim_start_matches(' ');
        if rest.is_empty() {
            break;
        }

        if let Some(trailing) = rest.strip_prefix(':') {
            params.push(trailing);
            break;
        }

        let end = rest.find(' ').unwrap_or(rest.len());
        params.push(&rest[..end]);
        rest = &rest[end..];
    }

    params
}

fn parse_message(input: &str) -> IResult<&str, (Option<&str>, &str, SmallVec<[&str; 15]>)> {
    let (input, _) = space0(input)?;
    let (input, prefix) = opt(parse_prefix)(input)?;
    let (input, _) = space0(input)?;
    let (input, command) = parse_command(input)?;
    Ok(("", (prefix, command, parse_params(input))))
}

impl Message {
    /// Parse one framed line.
    ///
    /// Trailing CR/LF is ignored. A blank line is
    /// [`MessageParseError::EmptyMessage`]; a line holding only a prefix is
    /// [`MessageParseError::MissingCommand`]. Callers drop both.
    pub fn parse(line: &str) -> Result<Message, MessageParseError> {
        let line = line.trim_end_matches(['\r', '\n']);
        if line.trim_start_matches(' ').is_empty() {
            return Err(MessageParseError::EmptyMessage);
        }

        let (_, (prefix, command, params)) =
            parse_message(line).map_err(|_| MessageParseError::MissingCommand)?;

        Ok(Message {
            prefix: prefix.map(Prefix::new_from_str),
            command: command.to_ascii_uppercase(),
            params: params.into_iter().map(str::to_owned).collect(),
        })
    }
}

impl FromStr for Message {
    type Err = MessageParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Message::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_uppercased() {
        let msg = Message::parse("privmsg #team :hi").unwrap();
        assert_eq!(msg.command, "PRIVMSG");
        assert_eq!(msg.params, vec!["#team", "hi"]);
    }

    #[test]
    fn test_trailing_keeps_spaces() {
        let msg = Message::parse("USER a 0 * :Alice  A :x\r\n").unwrap();
        assert_eq!(msg.params, vec!["a", "0", "*", "Alice  A :x"]);
    }

    #[test]
    fn test_prefix_stripped_and_stored() {
        let msg = Message::parse(":alice!a@host NICK bob").unwrap();
        assert_eq!(msg.prefix, Some(Prefix::new("alice", "a", "host")));
        assert_eq!(msg.command, "NICK");
        assert_eq!(msg.params, vec!["bob"]);
    }

    #[test]
    fn test_space_runs_collapse() {
        let msg = Message::parse("MODE   #team  +k   key").unwrap();
        assert_eq!(msg.params, vec!["#team", "+k", "key"]);
    }

    #[test]
    fn test_empty_trailing_is_a_param() {
        let msg = Message::parse("TOPIC #team :").unwrap();
        assert_eq!(msg.params, vec!["#team", ""]);
    }

    #[test]
    fn test_no_params() {
        let msg = Message::parse("QUIT").unwrap();
        assert!(msg.params.is_empty());
        assert!(msg.prefix.is_none());
    }

    #[test]
    fn test_blank_lines_rejected() {
        assert_eq!(Message::parse(""), Err(MessageParseError::EmptyMessage));
        assert_eq!(Message::parse("\r\n"), Err(MessageParseError::EmptyMessage));
        assert_eq!(Message::parse("   "), Err(MessageParseError::EmptyMessage));
    }

    #[test]
    fn test_prefix_only_rejected() {
        assert_eq!(
            Message::parse(":alice"),
            Err(MessageParseError::MissingCommand)
        );
        assert_eq!(
            Message::parse(":alice   "),
            Err(MessageParseError::MissingCommand)
        );
    }

    #[test]
    fn test_from_str() {
        let msg: Message = "ping token".parse().unwrap();
        assert_eq!(msg.command, "PING");
        assert_eq!(msg.arg(0), Some("token"));
    }
}
