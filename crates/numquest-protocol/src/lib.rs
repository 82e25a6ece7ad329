//! Wire protocol for numquest.
//!
//! Every message is a single line of ASCII text whose fields are separated
//! by `|`; the first field is the tag.
//!
//! - **Types** ([`ClientMessage`], [`ServerMessage`], [`SessionId`]):
//!   what travels on the wire.
//! - **Codec** ([`Codec`] trait, [`TextCodec`]): how those messages are
//!   converted to and from text.
//! - **Errors** ([`ProtocolError`]): why an inbound line was rejected.
//!
//! ```text
//! Transport (text) → Protocol (ClientMessage) → Game (room actor)
//! ```

mod codec;
mod error;
mod types;

pub use codec::{Codec, TextCodec};
pub use error::ProtocolError;
pub use types::{
    ClientMessage, GuessReport, ScoreLine, ServerMessage, SessionId,
    FIELD_SEPARATOR,
};
