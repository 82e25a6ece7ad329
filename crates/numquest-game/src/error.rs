//! Error types for the game layer.

/// Errors that can occur when talking to the room or configuring it.
///
/// Game rule violations (guessing between rounds, voting mid-round) are
/// not errors: the room ignores those messages.
#[derive(Debug, thiserror::Error)]
pub enum RoomError {
    /// The room's command channel is closed (the actor has stopped).
    #[error("room is unavailable")]
    Unavailable,

    /// A [`GameConfig`](crate::GameConfig) value is out of range.
    #[error("invalid game config: {0}")]
    InvalidConfig(String),
}
