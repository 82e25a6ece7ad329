//! # Numquest
//!
//! Real-time multiplayer number guessing over WebSockets.
//!
//! Players connect, send `JOIN|<name>` and race to guess a hidden 3-5 digit
//! number. Every guess is scored on digit matches plus a speed bonus; the
//! first exact guess wins the round and personal bests go to a persistent
//! leaderboard.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use numquest::prelude::*;
//!
//! # async fn run() -> Result<(), NumquestError> {
//! let board = JsonFileLeaderboard::open("leaderboard.json")?;
//! let server = NumquestServer::builder()
//!     .bind("0.0.0.0:8080")
//!     .build(board)
//!     .await?;
//! server.run().await
//! # }
//! ```

mod error;
mod handler;
mod server;

pub use error::NumquestError;
pub use server::{NumquestServer, NumquestServerBuilder};

pub mod prelude {
    //! Everything needed to configure and run a server.

    pub use crate::{NumquestError, NumquestServer, NumquestServerBuilder};
    pub use numquest_game::{GameConfig, RoomHandle, RoomInfo, RoundPhase, ScoringRules};
    pub use numquest_leaderboard::{
        JsonFileLeaderboard, LeaderboardEntry, LeaderboardStore, MemoryLeaderboard,
    };
    pub use numquest_protocol::{ClientMessage, ServerMessage, SessionId, TextCodec};
    pub use numquest_session::UNNAMED_PLAYER;
}
