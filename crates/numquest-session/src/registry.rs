//! The player registry: every connected session, in connection order.
//!
//! # Concurrency note
//!
//! `PlayerRegistry` is a plain `BTreeMap`, not a concurrent structure. It is
//! owned by the room actor, which applies one command at a time, so every
//! snapshot sees each entry either fully present or fully removed.
//!
//! # Unknown sessions
//!
//! A disconnect can race with messages already queued for the same
//! session. Operations on an unknown `SessionId` therefore do nothing and
//! report it through their return value instead of failing.

use std::collections::BTreeMap;
use std::time::Duration;

use numquest_protocol::{ScoreLine, SessionId};
use tokio::time::Instant;

use crate::Session;

/// Tracks name, score and last-action time for each connected session.
///
/// Keyed by `SessionId`, which increases with connection order, so
/// iterating the map yields sessions in the order they connected.
#[derive(Debug, Default)]
pub struct PlayerRegistry {
    sessions: BTreeMap<SessionId, Session>,
}

impl PlayerRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a freshly connected, unnamed session.
    ///
    /// Returns `false` (and leaves the entry alone) if the session is
    /// already known.
    pub fn connect(&mut self, id: SessionId, now: Instant) -> bool {
        if self.sessions.contains_key(&id) {
            return false;
        }
        self.sessions.insert(id, Session::new(id, now));
        tracing::debug!(session_id = %id, "session connected");
        true
    }

    /// Sets (or replaces) the session's display name, zeroes its score and
    /// restarts its speed-bonus clock.
    ///
    /// Returns `false` if the session is unknown.
    pub fn register(
        &mut self,
        id: SessionId,
        name: &str,
        now: Instant,
    ) -> bool {
        let Some(session) = self.sessions.get_mut(&id) else {
            return false;
        };
        session.name = Some(name.to_owned());
        session.reset(now);
        tracing::info!(session_id = %id, name, "player registered");
        true
    }

    /// Returns the time since the session's last scored action and moves
    /// that mark to `now`.
    ///
    /// `None` if the session is unknown.
    pub fn touch(&mut self, id: SessionId, now: Instant) -> Option<Duration> {
        let session = self.sessions.get_mut(&id)?;
        let elapsed = now.saturating_duration_since(session.last_action);
        session.last_action = now;
        Some(elapsed)
    }

    /// Adds `points` to the session's running total and returns the new
    /// total.
    ///
    /// `None` if the session is unknown (e.g. it disconnected while the
    /// guess was in flight).
    pub fn record_guess_score(
        &mut self,
        id: SessionId,
        points: u32,
    ) -> Option<u32> {
        let session = self.sessions.get_mut(&id)?;
        session.score = session.score.saturating_add(points);
        Some(session.score)
    }

    /// Removes every trace of the session. Idempotent.
    pub fn remove(&mut self, id: SessionId) -> Option<Session> {
        let removed = self.sessions.remove(&id);
        if removed.is_some() {
            tracing::debug!(session_id = %id, "session removed");
        }
        removed
    }

    /// Zeroes every score and restarts every clock. Called on round start.
    pub fn reset_all(&mut self, now: Instant) {
        for session in self.sessions.values_mut() {
            session.reset(now);
        }
    }

    /// All sessions as `name:score`, in connection order.
    ///
    /// Unnamed sessions appear under [`UNNAMED_PLAYER`](crate::UNNAMED_PLAYER).
    pub fn snapshot(&self) -> Vec<ScoreLine> {
        self.sessions.values().map(Session::score_line).collect()
    }

    /// Named sessions only, in connection order. These are the candidates
    /// submitted to the leaderboard when a round is won.
    pub fn named_scores(&self) -> Vec<ScoreLine> {
        self.sessions
            .values()
            .filter_map(|s| {
                s.name
                    .as_deref()
                    .map(|name| ScoreLine::new(name, s.score))
            })
            .collect()
    }

    /// Display name of a session, placeholder included.
    pub fn display_name(&self, id: SessionId) -> Option<&str> {
        self.sessions.get(&id).map(Session::display_name)
    }

    /// Looks up a session.
    pub fn get(&self, id: SessionId) -> Option<&Session> {
        self.sessions.get(&id)
    }

    /// Number of connected sessions.
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    /// Returns `true` if nobody is connected.
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

// =========================================================================
// Tests
// =========================================================================
