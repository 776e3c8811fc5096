//! Line framing over a byte stream.
//!
//! [`LineFramer`] is the push-style accumulator a connection owns: raw reads
//! are fed in, complete lines are pulled out. [`LineCodec`] applies the same
//! splitting rules as a tokio `Decoder` for framed transports.
//!
//! A line ends at the first LF. A CR immediately before it is stripped, so
//! CR-LF and bare LF terminated lines frame identically.

use bytes::{Bytes, BytesMut};

use crate::error::{self, ProtocolError};

/// Default cap on a single line, including any unterminated fragment.
pub const DEFAULT_MAX_LINE_LEN: usize = 4096;

/// Split the next complete line off the front of `buf`.
///
/// `next_index` remembers how far a previous call already scanned so
/// repeated partial reads do not rescan the same bytes.
fn split_line(
    buf: &mut BytesMut,
    next_index: &mut usize,
    max_len: usize,
) -> error::Result<Option<BytesMut>> {
    match buf[*next_index..].iter().position(|b| *b == b'\n') {
        Some(offset) => {
            let mut line = buf.split_to(*next_index + offset + 1);
            *next_index = 0;

            line.truncate(line.len() - 1);
            if line.last() == Some(&b'\r') {
                line.truncate(line.len() - 1);
            }

            if line.len() > max_len {
                return Err(ProtocolError::MessageTooLong {
                    actual: line.len(),
                    limit: max_len,
                });
            }

            Ok(Some(line))
        }
        None => {
            *next_index = buf.len();

            // Partial line already over the cap: the peer is not sending lines.
            if buf.len() > max_len {
                return Err(ProtocolError::MessageTooLong {
                    actual: buf.len(),
                    limit: max_len,
                });
            }

            Ok(None)
        }
    }
}

/// Per-connection inbound accumulator.
#[derive(Debug)]
pub struct LineFramer {
    buf: BytesMut,
    next_index: usize,
    max_len: usize,
}

impl Default for LineFramer {
    fn default() -> Self {
        Self::new()
    }
}

impl LineFramer {
    /// Create a framer with [`DEFAULT_MAX_LINE_LEN`].
    pub fn new() -> Self {
        Self::with_max_len(DEFAULT_MAX_LINE_LEN)
    }

    /// Create a framer with a custom line cap.
    pub fn with_max_len(max_len: usize) -> Self {
        Self {
            buf: BytesMut::new(),
            next_index: 0,
            max_len,
        }
    }

    /// Append freshly read bytes.
    pub fn feed(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }

    /// Pull the next complete line, terminator stripped.
    ///
    /// Returns `Ok(None)` when only an incomplete fragment (or nothing) is
    /// buffered. The fragment stays put for the next [`feed`](Self::feed).
    pub fn next_line(&mut self) -> error::Result<Option<Bytes>> {
        Ok(split_line(&mut self.buf, &mut self.next_index, self.max_len)?.map(BytesMut::freeze))
    }

    /// Bytes currently buffered.
    pub fn pending(&self) -> usize {
        self.buf.len()
    }

    /// Drop everything buffered.
    pub fn clear(&mut self) {
        self.buf.clear();
        self.next_index = 0;
    }
}

#[cfg(feature = "tokio")]
mod codec {
    use bytes::BytesMut;
    use tokio_util::codec::Decoder;

    use super::{split_line, DEFAULT_MAX_LINE_LEN};
    use crate::error::{self, ProtocolError};

    /// Decoder yielding one `String` per line, terminator stripped.
    ///
    /// Bytes that are not valid UTF-8 are replaced rather than rejected.
    pub struct LineCodec {
        next_index: usize,
        max_len: usize,
    }

    impl Default for LineCodec {
        fn default() -> Self {
            Self::new()
        }
    }

    impl LineCodec {
        /// Create a codec with [`DEFAULT_MAX_LINE_LEN`].
        pub fn new() -> Self {
            Self::with_max_len(DEFAULT_MAX_LINE_LEN)
        }

        /// Create a codec with custom max line length.
        pub fn with_max_len(max_len: usize) -> Self {
            Self {
                next_index: 0,
                max_len,
            }
        }
    }

    impl Decoder for LineCodec {
        type Item = String;
        type Error = ProtocolError;

        fn decode(&mut self, src: &mut BytesMut) -> error::Result<Option<String>> {
            let line = split_line(src, &mut self.next_index, self.max_len)?;
            Ok(line.map(|l| String::from_utf8_lossy(&l).into_owned()))
        }
    }
}

#[cfg(feature = "tokio")]
pub use codec::LineCodec;

#[cfg(test)]
mod tests {
    use super::*;

    fn drain(framer: &mut LineFramer) -> Vec<String> {
        let mut out = Vec::new();
        while let Some(line) = framer.next_line().unwrap() {
            out.push(String::from_utf8(line.to_vec()).unwrap());
        }
        out
    }

    #[test]
    fn test_several_lines_in_one_read() {
        let mut framer = LineFramer::new();
        framer.feed(b"NICK alice\r\nUSER a 0 * :Alice\r\nJOIN #team\r\n");
        assert_eq!(
            drain(&mut framer),
            vec!["NICK alice", "USER a 0 * :Alice", "JOIN #team"]
        );
        assert_eq!(framer.pending(), 0);
    }

    #[test]
    fn test_fragment_carried_across_reads() {
        let mut framer = LineFramer::new();
        framer.feed(b"PRIVMSG #team :he");
        assert!(framer.next_line().unwrap().is_none());
        assert_eq!(framer.pending(), 17);

        framer.feed(b"llo\r");
        assert!(framer.next_line().unwrap().is_none());

        framer.feed(b"\nPING x");
        assert_eq!(drain(&mut framer), vec!["PRIVMSG #team :hello"]);
        assert_eq!(framer.pending(), 6);
    }

    #[test]
    fn test_bare_lf_tolerated() {
        let mut framer = LineFramer::new();
        framer.feed(b"PING a\nPING b\r\n");
        assert_eq!(drain(&mut framer), vec!["PING a", "PING b"]);
    }

    #[test]
    fn test_byte_at_a_time() {
        let mut framer = LineFramer::new();
        let mut lines = Vec::new();
        for b in b"QUIT :bye\r\n" {
            framer.feed(&[*b]);
            lines.extend(drain(&mut framer));
        }
        assert_eq!(lines, vec!["QUIT :bye"]);
    }

    #[test]
    fn test_empty_line_is_framed() {
        let mut framer = LineFramer::new();
        framer.feed(b"\r\n");
        assert_eq!(drain(&mut framer), vec![""]);
    }

    #[test]
    fn test_partial_over_cap_is_error() {
        let mut framer = LineFramer::with_max_len(8);
        framer.feed(b"0123456789");
        assert!(matches!(
            framer.next_line(),
            Err(ProtocolError::MessageTooLong {
                actual: 10,
                limit: 8
            })
        ));
    }

    #[test]
    fn test_complete_line_over_cap_is_error() {
        let mut framer = LineFramer::with_max_len(4);
        framer.feed(b"PING abc\r\n");
        assert!(framer.next_line().is_err());
    }

    #[test]
    fn test_clear() {
        let mut framer = LineFramer::new();
        framer.feed(b"half");
        framer.clear();
        assert_eq!(framer.pending(), 0);
    }

    #[cfg(feature = "tokio")]
    #[test]
    fn test_codec_decode() {
        use tokio_util::codec::Decoder;

        let mut codec = LineCodec::new();
        let mut buf = BytesMut::from(&b":srv 001 alice :Welcome\r\n:srv 002"[..]);
        assert_eq!(
            codec.decode(&mut buf).unwrap(),
            Some(":srv 001 alice :Welcome".to_string())
        );
        assert_eq!(codec.decode(&mut buf).unwrap(), None);
        assert_eq!(&buf[..], b":srv 002");
    }
}
