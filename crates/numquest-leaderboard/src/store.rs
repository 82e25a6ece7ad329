//! The `LeaderboardStore` trait and the entry list shared by both stores.

use serde::{Deserialize, Serialize};

use crate::LeaderboardError;

/// One player's personal best.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub name: String,
    pub best: u32,
}

impl LeaderboardEntry {
    pub fn new(name: impl Into<String>, best: u32) -> Self {
        Self {
            name: name.into(),
            best,
        }
    }
}

/// Persistence operations needed by the game.
///
/// Implementations are owned by the room actor and called from it one at
/// a time, hence `&mut self` and no internal locking.
pub trait LeaderboardStore: Send + 'static {
    /// Creates a zero entry for `name` if none exists. Later calls for the
    /// same name do nothing.
    fn ensure_player(&mut self, name: &str) -> Result<(), LeaderboardError>;

    /// Records `score` as a personal-best candidate.
    ///
    /// Inserts the entry if absent; otherwise replaces the stored value only
    /// when `score` is strictly greater. Returns `true` if anything changed.
    /// Repeating a call with the same arguments is harmless.
    fn upsert_candidate(
        &mut self,
        name: &str,
        score: u32,
    ) -> Result<bool, LeaderboardError>;

    /// The `limit` best entries, highest first. Ties keep insertion order.
    fn top_n(&self, limit: usize) -> Result<Vec<LeaderboardEntry>, LeaderboardError>;
}

/// Entry list in insertion order, with the monotonic-update rule.
///
/// Both stores wrap one of these; the file store additionally writes it
/// out after every change.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub(crate) struct Entries(Vec<LeaderboardEntry>);

impl Entries {
    pub(crate) fn from_vec(entries: Vec<LeaderboardEntry>) -> Self {
        Self(entries)
    }

    /// Returns `true` if an entry was created.
    pub(crate) fn ensure(&mut self, name: &str) -> bool {
        if self.0.iter().any(|e| e.name == name) {
            return false;
        }
        self.0.push(LeaderboardEntry::new(name, 0));
        true
    }

    /// Returns `true` if an entry was created or raised.
    pub(crate) fn offer(&mut self, name: &str, score: u32) -> bool {
        match self.0.iter_mut().find(|e| e.name == name) {
            Some(entry) if score > entry.best => {
                entry.best = score;
                true
            }
            Some(_) => false,
            None => {
                self.0.push(LeaderboardEntry::new(name, score));
                true
            }
        }
    }

    pub(crate) fn top(&self, limit: usize) -> Vec<LeaderboardEntry> {
        let mut ranked = self.0.clone();
        // `sort_by` is stable, so equal scores stay in insertion order.
        ranked.sort_by(|a, b| b.best.cmp(&a.best));
        ranked.truncate(limit);
        ranked
    }

    pub(crate) fn len(&self) -> usize {
        self.0.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offer_only_raises() {
        let mut entries = Entries::default();

        assert!(entries.offer("ana", 30));
        assert!(!entries.offer("ana", 12), "lower score must not replace");
        assert!(!entries.offer("ana", 30), "equal score is not an update");
        assert!(entries.offer("ana", 31));

        assert_eq!(entries.top(10), vec![LeaderboardEntry::new("ana", 31)]);
    }

    #[test]
    fn test_best_never_decreases_over_any_sequence() {
        let mut entries = Entries::default();
        let mut high = 0;
        for score in [5, 40, 3, 40, 0, 41, 17, 100, 99] {
            entries.offer("bo", score);
            let best = entries.top(1)[0].best;
            assert!(best >= high, "best dropped from {high} to {best}");
            high = best;
        }
        assert_eq!(high, 100);
    }

    #[test]
    fn test_ensure_is_first_writer_wins() {
        let mut entries = Entries::default();
        entries.offer("ana", 50);

        assert!(!entries.ensure("ana"));
        assert!(entries.ensure("bo"));
        assert!(!entries.ensure("bo"));

        assert_eq!(
            entries.top(10),
            vec![LeaderboardEntry::new("ana", 50), LeaderboardEntry::new("bo", 0)]
        );
    }

    #[test]
    fn test_top_sorts_descending_with_stable_ties() {
        let mut entries = Entries::default();
        entries.offer("first", 20);
        entries.offer("second", 70);
        entries.offer("third", 20);
        entries.offer("fourth", 5);

        let names: Vec<_> =
            entries.top(10).into_iter().map(|e| e.name).collect();
        assert_eq!(names, ["second", "first", "third", "fourth"]);
    }

    #[test]
    fn test_top_truncates_to_limit() {
        let mut entries = Entries::default();
        for (i, name) in ["a", "b", "c"].iter().enumerate() {
            entries.offer(name, i as u32);
        }
        assert_eq!(entries.top(2).len(), 2);
        assert!(entries.top(0).is_empty());
        assert_eq!(entries.len(), 3);
    }
}
