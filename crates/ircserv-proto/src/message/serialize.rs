use std::fmt::{self, Display, Formatter};

use super::types::Message;

/// Whether `param` can only be sent as the `:`-prefixed final parameter.
fn needs_colon(param: &str) -> bool {
    param.is_empty() || param.starts_with(':') || param.contains(' ')
}

impl Display for Message {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if let Some(ref prefix) = self.prefix {
            write!(f, ":{} ", prefix)?;
        }

        write!(f, "{}", self.command)?;

        if let Some((last, middle)) = self.params.split_last() {
            for param in middle {
                write!(f, " {}", param)?;
            }
            if needs_colon(last) {
                write!(f, " :{}", last)?;
            } else {
                write!(f, " {}", last)?;
            }
        }

        write!(f, "\r\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trailing_with_space_gets_colon() {
        let msg = Message::privmsg("#team", "hi there");
        assert_eq!(msg.to_string(), "PRIVMSG #team :hi there\r\n");
    }

    #[test]
    fn test_single_word_trailing_bare() {
        let msg = Message::privmsg("#team", "hi");
        assert_eq!(msg.to_string(), "PRIVMSG #team hi\r\n");
    }

    #[test]
    fn test_empty_and_colon_trailing() {
        assert_eq!(Message::topic("#t", "").to_string(), "TOPIC #t :\r\n");
        assert_eq!(Message::privmsg("bob", ":)").to_string(), "PRIVMSG bob ::)\r\n");
    }

    #[test]
    fn test_no_params() {
        assert_eq!(Message::new("QUIT", Vec::<String>::new()).to_string(), "QUIT\r\n");
    }
}
