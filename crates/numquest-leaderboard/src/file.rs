//! Leaderboard persisted to a JSON file.
//!
//! The whole table is small (one row per player name), so every change
//! rewrites the file. Writes go to a sibling `*.tmp` file first and are
//! then renamed over the real one; a crash mid-write leaves the previous
//! version intact.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::store::Entries;
use crate::{LeaderboardEntry, LeaderboardError, LeaderboardStore};

/// A durable leaderboard backed by a JSON array of
/// `{"name": ..., "best": ...}` objects, kept in insertion order.
#[derive(Debug)]
pub struct JsonFileLeaderboard {
    path: PathBuf,
    entries: Entries,
}

impl JsonFileLeaderboard {
    /// Opens the leaderboard at `path`.
    ///
    /// A missing file is an empty leaderboard; it is created on the first
    /// change.
    ///
    /// # Errors
    /// - [`LeaderboardError::Io`] if the file exists but cannot be read
    /// - [`LeaderboardError::Corrupt`] if it is not a valid entry list
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, LeaderboardError> {
        let path = path.into();
        let entries = match fs::read(&path) {
            Ok(bytes) => serde_json::from_slice::<Entries>(&bytes).map_err(
                |source| LeaderboardError::Corrupt {
                    path: path.clone(),
                    source,
                },
            )?,
            Err(e) if e.kind() == ErrorKind::NotFound => Entries::default(),
            Err(source) => {
                return Err(LeaderboardError::Io { path, source });
            }
        };

        tracing::info!(
            path = %path.display(),
            players = entries.len(),
            "leaderboard loaded"
        );
        Ok(Self { path, entries })
    }

    /// Where this leaderboard is stored.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn save(&self) -> Result<(), LeaderboardError> {
        let bytes = serde_json::to_vec_pretty(&self.entries)
            .map_err(LeaderboardError::Encode)?;

        let tmp = self.path.with_extension("tmp");
        let io_err = |source| LeaderboardError::Io {
            path: self.path.clone(),
            source,
        };
        fs::write(&tmp, bytes).map_err(io_err)?;
        fs::rename(&tmp, &self.path).map_err(io_err)?;
        Ok(())
    }
}

impl LeaderboardStore for JsonFileLeaderboard {
    fn ensure_player(&mut self, name: &str) -> Result<(), LeaderboardError> {
        if self.entries.ensure(name) {
            self.save()?;
        }
        Ok(())
    }

    fn upsert_candidate(
        &mut self,
        name: &str,
        score: u32,
    ) -> Result<bool, LeaderboardError> {
        let changed = self.entries.offer(name, score);
        if changed {
            self.save()?;
            tracing::debug!(name, best = score, "personal best recorded");
        }
        Ok(changed)
    }

    fn top_n(&self, limit: usize) -> Result<Vec<LeaderboardEntry>, LeaderboardError> {
        Ok(self.entries.top(limit))
    }
}
