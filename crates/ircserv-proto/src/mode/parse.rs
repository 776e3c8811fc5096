//! Mode string parsing.
//!
//! `+`/`-` switch the sign for every letter that follows until the next
//! switch; a string with no leading sign is read as `+`. Letters that take
//! an argument consume the next positional parameter in order.

use super::types::{ChannelMode, Mode, ModeType, UserMode};

impl Mode<UserMode> {
    /// Parse user mode strings like `+i` into a vector of modes.
    pub fn as_user_modes(pieces: &[&str]) -> Vec<Mode<UserMode>> {
        parse_modes(pieces)
    }
}

impl Mode<ChannelMode> {
    /// Parse channel mode strings like `+ol-k alice 10 key` into a vector of
    /// modes.
    ///
    /// A letter that needs an argument but finds none is still returned, with
    /// `None` as its argument, so the caller can decide what to do with it.
    pub fn as_channel_modes(pieces: &[&str]) -> Vec<Mode<ChannelMode>> {
        parse_modes(pieces)
    }
}

fn parse_modes<T: ModeType>(pieces: &[&str]) -> Vec<Mode<T>> {
    let mut res = Vec::new();

    let Some((first, rest)) = pieces.split_first() else {
        return res;
    };

    let mut args = rest.iter().copied();
    let mut plus = true;

    for c in first.chars() {
        match c {
            '+' => plus = true,
            '-' => plus = false,
            c => {
                let mode = T::from_char(c);
                let arg = if mode.takes_arg(plus) {
                    args.next()
                } else {
                    None
                };
                res.push(if plus {
                    Mode::plus(mode, arg)
                } else {
                    Mode::minus(mode, arg)
                });
            }
        }
    }

    res
}
