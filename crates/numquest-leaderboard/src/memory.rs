//! Non-durable leaderboard.

use crate::store::Entries;
use crate::{LeaderboardEntry, LeaderboardError, LeaderboardStore};

/// A leaderboard that lives only as long as the process.
///
/// Same semantics as [`JsonFileLeaderboard`](crate::JsonFileLeaderboard)
/// minus the file. Never fails.
#[derive(Debug, Default)]
pub struct MemoryLeaderboard {
    entries: Entries,
}

impl MemoryLeaderboard {
    /// Creates an empty leaderboard.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a leaderboard pre-filled with `entries`, in that order.
    pub fn with_entries(entries: Vec<LeaderboardEntry>) -> Self {
        Self {
            entries: Entries::from_vec(entries),
        }
    }
}

impl LeaderboardStore for MemoryLeaderboard {
    fn ensure_player(&mut self, name: &str) -> Result<(), LeaderboardError> {
        self.entries.ensure(name);
        Ok(())
    }

    fn upsert_candidate(
        &mut self,
        name: &str,
        score: u32,
    ) -> Result<bool, LeaderboardError> {
        Ok(self.entries.offer(name, score))
    }

    fn top_n(&self, limit: usize) -> Result<Vec<LeaderboardEntry>, LeaderboardError> {
        Ok(self.entries.top(limit))
    }
}
