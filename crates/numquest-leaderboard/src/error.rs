//! Error types for the leaderboard layer.

use std::path::PathBuf;

/// Errors raised by a durable [`LeaderboardStore`](crate::LeaderboardStore).
///
/// The game never lets these interrupt play: the room logs them and
/// carries on with whatever state it already has.
#[derive(Debug, thiserror::Error)]
pub enum LeaderboardError {
    /// Reading or writing the backing file failed.
    #[error("leaderboard I/O on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The backing file exists but is not a valid leaderboard.
    #[error("corrupt leaderboard file {}: {source}", path.display())]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Serializing entries for writing failed.
    #[error("encode leaderboard: {0}")]
    Encode(#[source] serde_json::Error),
}
