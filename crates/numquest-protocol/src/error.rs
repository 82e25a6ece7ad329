//! Error types for the protocol layer.

/// Errors that can occur while decoding inbound text.
///
/// None of these are ever reported to the client: the session handler
/// logs them and drops the message.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProtocolError {
    /// The message was empty after trimming whitespace.
    #[error("empty message")]
    Empty,

    /// The message has a recognised shape but an unusable field, such as
    /// a `JOIN` with a blank name.
    #[error("invalid message: {0}")]
    InvalidMessage(String),
}
