//! Error types for the protocol layer.
//!
//! Framing failures surface as [`ProtocolError`]; a line that frames fine
//! but does not form a message yields a [`MessageParseError`].

use thiserror::Error;

/// Convenience type alias for Results using [`ProtocolError`].
pub type Result<T, E = ProtocolError> = std::result::Result<T, E>;

/// Top-level protocol errors.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ProtocolError {
    /// I/O error during reading or writing.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// The receive accumulator grew past its cap without a line terminator,
    /// or a complete line exceeded it.
    #[error("message too long: {actual} bytes (limit: {limit})")]
    MessageTooLong {
        /// Bytes buffered when the limit tripped.
        actual: usize,
        /// Maximum allowed length.
        limit: usize,
    },

    /// Failed to parse a framed line.
    #[error("invalid message: {string}")]
    InvalidMessage {
        /// The offending line.
        string: String,
        /// The underlying parse error.
        #[source]
        cause: MessageParseError,
    },
}

/// Errors encountered when parsing a single line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum MessageParseError {
    /// Nothing left after trimming the line terminator.
    #[error("empty message")]
    EmptyMessage,

    /// A prefix was present but no command followed it.
    #[error("missing command")]
    MissingCommand,
}
