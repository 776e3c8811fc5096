//! LIST command handler.

use super::super::{Context, Handler, HandlerResult, split_list};
use ircserv_proto::{Message, Response};

/// Handler for LIST command.
///
/// `LIST [channels]`
///
/// Lists channels with their member count and topic.
pub struct ListHandler;

impl Handler for ListHandler {
    fn handle(&self, ctx: &mut Context<'_>, msg: &Message) -> HandlerResult {
        let filter: Option<Vec<&str>> = msg
            .arg(0)
            .filter(|a| !a.is_empty())
            .map(|list| split_list(list).collect());

        let entries: Vec<(String, usize, String)> = ctx
            .directory
            .channels()
            .filter(|c| filter.as_ref().is_none_or(|f| f.contains(&c.name.as_str())))
            .map(|c| {
                let topic = c.topic.as_ref().map(|t| t.text.clone()).unwrap_or_default();
                (c.name.clone(), c.len(), topic)
            })
            .collect();

        ctx.send_reply(Response::RPL_LISTSTART, ["Channel", "Users  Name"]);
        for (name, users, topic) in entries {
            ctx.send_reply(Response::RPL_LIST, [name, users.to_string(), topic]);
        }
        ctx.send_reply(Response::RPL_LISTEND, ["End of /LIST"]);
        Ok(())
    }
}
