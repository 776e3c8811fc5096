//! Helper functions for IRC command handlers.

use ircserv_proto::{Message, Prefix, Response};

/// Helper to create a server reply message (numeric response).
pub fn server_reply<I, P>(server_name: &str, response: Response, params: I) -> Message
where
    I: IntoIterator<Item = P>,
    P: Into<String>,
{
    Message::response(response, params).with_prefix(Prefix::ServerName(server_name.to_string()))
}

/// Helper to create a server NOTICE message.
pub fn server_notice<T: Into<String>>(server_name: &str, target: &str, text: T) -> Message {
    Message::notice(target, text).with_prefix(Prefix::ServerName(server_name.to_string()))
}

/// Split a comma-separated target list, dropping empty entries.
pub fn split_list(list: &str) -> impl Iterator<Item = &str> {
    list.split(',').filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_reply_prefix() {
        let msg = server_reply("srv", Response::RPL_WELCOME, ["alice", "Welcome"]);
        assert_eq!(msg.to_string(), ":srv 001 alice Welcome\r\n");
    }

    #[test]
    fn test_split_list() {
        let parts: Vec<_> = split_list("#a,,#b,").collect();
        assert_eq!(parts, vec!["#a", "#b"]);
    }
}
