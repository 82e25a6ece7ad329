//! Personal-best leaderboard for numquest.
//!
//! One entry per player name, holding the best single-round score that
//! name has ever finished a won round with. Values only ever go up.
//!
//! # Key types
//!
//! - [`LeaderboardStore`]: the operations the game needs
//! - [`MemoryLeaderboard`]: non-durable store (tests, throwaway servers)
//! - [`JsonFileLeaderboard`]: store persisted to a JSON file
//! - [`LeaderboardEntry`]: a `(name, best)` record
//!
//! Names are whatever clients sent in `JOIN`; two connections using the
//! same name share one entry.

mod error;
mod file;
mod memory;
mod store;

pub use error::LeaderboardError;
pub use file::JsonFileLeaderboard;
pub use memory::MemoryLeaderboard;
pub use store::{LeaderboardEntry, LeaderboardStore};
