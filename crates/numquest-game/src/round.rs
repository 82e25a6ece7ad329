//! Round controller: the single round and its lifecycle.

use std::fmt;

use rand::Rng;
use tokio::time::Instant;

use crate::GameConfig;

// ---------------------------------------------------------------------------
// Round
// ---------------------------------------------------------------------------

/// One play of the game: a hidden target of fixed length.
///
/// A round is never edited after it is drawn. Starting a new round
/// replaces it wholesale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Round {
    target: String,
    digits: u8,
    started_at: Instant,
}

impl Round {
    /// Draws a new round.
    ///
    /// The digit count is uniform over `min_digits..=max_digits`; the target
    /// is uniform over the integers with exactly that many digits, so it
    /// never starts with `0`.
    pub fn draw<R: Rng + ?Sized>(
        rng: &mut R,
        config: &GameConfig,
        now: Instant,
    ) -> Self {
        let digits = rng.random_range(config.min_digits..=config.max_digits);
        let low = 10u64.pow(u32::from(digits) - 1);
        let high = 10u64.pow(u32::from(digits)) - 1;
        let target = rng.random_range(low..=high).to_string();
        Self {
            target,
            digits,
            started_at: now,
        }
    }

    /// A round with a known target. The digit count is the target length.
    pub fn with_target(target: impl Into<String>, now: Instant) -> Self {
        let target = target.into();
        let digits = u8::try_from(target.chars().count()).unwrap_or(u8::MAX);
        Self {
            target,
            digits,
            started_at: now,
        }
    }

    /// The hidden target.
    pub fn target(&self) -> &str {
        &self.target
    }

    /// Number of digits in the target. This is all clients are told.
    pub fn digits(&self) -> u8 {
        self.digits
    }

    /// When the round started.
    pub fn started_at(&self) -> Instant {
        self.started_at
    }
}

// ---------------------------------------------------------------------------
// RoundPhase
// ---------------------------------------------------------------------------

/// Where the room is in the round lifecycle.
///
/// ```text
///          start                 winning guess
///   Idle ─────────→ Active ──────────────────→ Over
///    ↑                │                          │
///    └──(abandon)─────┘         start            │
///                     ↑──────────────────────────┘
/// ```
///
/// - **Idle**: no round yet, or the last one was abandoned when players
///   left. No target.
/// - **Active**: accepting guesses.
/// - **Over**: someone won. The target is kept for the announcement;
///   the next start replaces it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundPhase {
    Idle,
    Active,
    Over,
}

impl RoundPhase {
    /// Returns `true` while guesses are accepted.
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Active)
    }

    /// Returns `true` if a new round may start from this phase.
    pub fn can_start(&self) -> bool {
        !self.is_active()
    }
}

impl fmt::Display for RoundPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => write!(f, "Idle"),
            Self::Active => write!(f, "Active"),
            Self::Over => write!(f, "Over"),
        }
    }
}

// ---------------------------------------------------------------------------
// RoundController
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
enum RoundState {
    Idle,
    Active(Round),
    Over { round: Round, winner: String },
}

/// Owns the current round and enforces the phase transitions.
///
/// Not synchronized; the room actor is its only user.
#[derive(Debug, Clone)]
pub struct RoundController {
    state: RoundState,
}

impl RoundController {
    /// Starts in [`RoundPhase::Idle`].
    pub fn new() -> Self {
        Self {
            state: RoundState::Idle,
        }
    }

    /// Current phase.
    pub fn phase(&self) -> RoundPhase {
        match self.state {
            RoundState::Idle => RoundPhase::Idle,
            RoundState::Active(_) => RoundPhase::Active,
            RoundState::Over { .. } => RoundPhase::Over,
        }
    }

    /// Returns `true` while guesses are accepted.
    pub fn is_active(&self) -> bool {
        self.phase().is_active()
    }

    /// The running round, if any.
    pub fn active_round(&self) -> Option<&Round> {
        match &self.state {
            RoundState::Active(round) => Some(round),
            _ => None,
        }
    }

    /// Winner of the last round, while in [`RoundPhase::Over`].
    pub fn last_winner(&self) -> Option<&str> {
        match &self.state {
            RoundState::Over { winner, .. } => Some(winner),
            _ => None,
        }
    }

    /// The round that was just won, while in [`RoundPhase::Over`].
    pub fn finished_round(&self) -> Option<&Round> {
        match &self.state {
            RoundState::Over { round, .. } => Some(round),
            _ => None,
        }
    }

    /// Makes `round` the active round.
    ///
    /// Returns `false` and leaves the running round untouched if one is
    /// already active.
    pub fn start(&mut self, round: Round) -> bool {
        if !self.phase().can_start() {
            return false;
        }
        self.state = RoundState::Active(round);
        true
    }

    /// Ends the active round if `guess` equals its target exactly.
    ///
    /// Returns the target on the winning transition and `None` otherwise,
    /// including for any guess after the round is already over, so a
    /// round can be won only once.
    pub fn finish_if_won(&mut self, guess: &str, winner: &str) -> Option<String> {
        let RoundState::Active(round) = &self.state else {
            return None;
        };
        if round.target() != guess {
            return None;
        }
        let round = round.clone();
        let target = round.target().to_owned();
        self.state = RoundState::Over {
            round,
            winner: winner.to_owned(),
        };
        Some(target)
    }

    /// Drops the active round without a winner.
    ///
    /// Returns `true` if a round was running.
    pub fn abandon(&mut self) -> bool {
        if !self.is_active() {
            return false;
        }
        self.state = RoundState::Idle;
        true
    }
}

impl Default for RoundController {
    fn default() -> Self {
        Self::new()
    }
}
