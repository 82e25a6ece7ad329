//! Unified error type for the numquest server.

use numquest_game::RoomError;
use numquest_leaderboard::LeaderboardError;
use numquest_protocol::ProtocolError;
use numquest_transport::TransportError;

/// Top-level error that wraps every crate-specific error.
///
/// The `#[from]` attribute on each variant generates the `From` impls, so
/// `?` converts sub-crate errors automatically.
#[derive(Debug, thiserror::Error)]
pub enum NumquestError {
    /// A transport-level error (bind, accept, send, recv).
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// An inbound line could not be decoded.
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    /// The room actor is gone or the game config is invalid.
    #[error(transparent)]
    Room(#[from] RoomError),

    /// The leaderboard could not be loaded or saved.
    #[error(transparent)]
    Leaderboard(#[from] LeaderboardError),
}
