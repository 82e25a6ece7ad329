//! Codec trait and the pipe-delimited text codec.
//!
//! The session handler only needs "text in → [`ClientMessage`]" and
//! "[`ServerMessage`] → text out". Hiding that behind [`Codec`] keeps the
//! handler independent of the exact wire syntax.

use crate::{ClientMessage, ProtocolError, ServerMessage, FIELD_SEPARATOR};

const JOIN_PREFIX: &str = "JOIN|";
const RESTART: &str = "RESTART";

/// Converts between wire text and protocol messages.
///
/// `Send + Sync + 'static` because one codec instance is shared by every
/// connection task for the lifetime of the server.
pub trait Codec: Send + Sync + 'static {
    /// Renders an outbound message as wire text.
    fn encode(&self, msg: &ServerMessage) -> String;

    /// Parses one inbound line.
    ///
    /// # Errors
    /// - [`ProtocolError::Empty`] for blank input
    /// - [`ProtocolError::InvalidMessage`] for a `JOIN` without a name
    fn decode(&self, text: &str) -> Result<ClientMessage, ProtocolError>;
}

/// The `|`-delimited ASCII codec spoken by numquest clients.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextCodec;

impl Codec for TextCodec {
    fn encode(&self, msg: &ServerMessage) -> String {
        msg.to_string()
    }

    fn decode(&self, text: &str) -> Result<ClientMessage, ProtocolError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(ProtocolError::Empty);
        }

        if let Some(rest) = text.strip_prefix(JOIN_PREFIX) {
            // Only the first field after the tag is the name; trailing
            // fields are ignored.
            let username = rest
                .split(FIELD_SEPARATOR)
                .next()
                .unwrap_or_default()
                .trim();
            if username.is_empty() {
                return Err(ProtocolError::InvalidMessage(
                    "JOIN without a username".into(),
                ));
            }
            return Ok(ClientMessage::Join {
                username: username.to_owned(),
            });
        }

        if text == RESTART {
            return Ok(ClientMessage::Restart);
        }

        // Anything else is a guess, separators included. Whether it counts
        // depends on the round, which only the room knows.
        Ok(ClientMessage::Guess(text.to_owned()))
    }
}
