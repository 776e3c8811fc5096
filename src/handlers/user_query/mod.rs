//! User query handlers: WHO, WHOIS
//!
//! RFC 2812 §3.6 - User based queries

mod who;
mod whois;

pub use who::WhoHandler;
pub use whois::WhoisHandler;
