//! Game rules and the room actor for numquest.
//!
//! The room runs as a single Tokio task (actor model) that owns every piece
//! of shared state: connected sessions, scores, the current round and the
//! restart quorum. Connection handlers talk to it only through a
//! [`RoomHandle`], so each round start, quorum decision and score snapshot
//! happens in exactly one place.
//!
//! # Key types
//!
//! - [`evaluate`] / [`ScoringRules`]: match feedback and points per guess
//! - [`RoundController`]: Idle → Active → Over state machine
//! - [`RestartQuorum`]: restart votes after a round
//! - [`BroadcastGateway`]: fan-out with per-recipient failure isolation
//! - [`RoomHandle`] / [`spawn_room`]: the actor and its command interface
//! - [`GameConfig`]: player thresholds, digit range, scoring weights

mod config;
mod error;
mod gateway;
mod quorum;
mod room;
mod round;
mod scoring;

pub use config::GameConfig;
pub use error::RoomError;
pub use gateway::{BroadcastGateway, SessionSender, OUTBOUND_QUEUE_CAPACITY};
pub use quorum::{QuorumVote, RestartQuorum};
pub use room::{spawn_room, RoomHandle, RoomInfo};
pub use round::{Round, RoundController, RoundPhase};
pub use scoring::{evaluate, MatchCounts, ScoringRules};
