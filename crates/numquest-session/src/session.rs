//! The per-connection record kept by the registry.
//!
//! A session exists from the moment a client connects until its connection
//! closes. It tracks:
//! - WHO the client says it is (optional until `JOIN`)
//! - HOW many points it has this round
//! - WHEN it last scored, so the next guess can earn a speed bonus

use tokio::time::Instant;

use numquest_protocol::{ScoreLine, SessionId};

/// Name shown for a session that has not sent `JOIN` yet.
pub const UNNAMED_PLAYER: &str = "Player";

/// A single connected client.
///
/// `Instant` here is Tokio's monotonic clock. It behaves like
/// `std::time::Instant` in production but can be paused and advanced in
/// tests, which keeps timing-dependent scoring deterministic.
#[derive(Debug, Clone)]
pub struct Session {
    /// Which connection this record belongs to.
    pub id: SessionId,

    /// Display name from the last `JOIN`, if any.
    pub name: Option<String>,

    /// Running total for the current round.
    pub score: u32,

    /// When this session last scored (or joined, or a round started).
    pub last_action: Instant,
}

impl Session {
    /// Creates an unnamed session with a zero score.
    pub fn new(id: SessionId, now: Instant) -> Self {
        Self {
            id,
            name: None,
            score: 0,
            last_action: now,
        }
    }

    /// The name to show other players.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(UNNAMED_PLAYER)
    }

    /// This session as a `name:score` line.
    pub fn score_line(&self) -> ScoreLine {
        ScoreLine::new(self.display_name(), self.score)
    }

    /// Zeroes the score and restarts the speed-bonus clock.
    pub(crate) fn reset(&mut self, now: Instant) {
        self.score = 0;
        self.last_action = now;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name_falls_back_to_placeholder() {
        let mut session = Session::new(SessionId(1), Instant::now());
        assert_eq!(session.display_name(), UNNAMED_PLAYER);

        session.name = Some("ana".into());
        assert_eq!(session.display_name(), "ana");
    }

    #[test]
    fn test_score_line_uses_display_name() {
        let mut session = Session::new(SessionId(1), Instant::now());
        session.score = 17;
        assert_eq!(session.score_line(), ScoreLine::new("Player", 17));
    }
}
