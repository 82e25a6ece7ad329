//! Player registry for numquest.
//!
//! This crate tracks every connected session:
//!
//! 1. **Identity**: the display name a client asserted with `JOIN`
//! 2. **Score**: the running total for the current round
//! 3. **Timing**: when the session last scored, for the speed bonus
//!
//! # How it fits in the stack
//!
//! ```text
//! Game Layer (above)  ← reads snapshots, records scores
//!     ↕
//! Session Layer (this crate)  ← per-session name/score/timestamp
//!     ↕
//! Protocol Layer (below)  ← provides SessionId, ScoreLine
//! ```

mod registry;
mod session;

pub use registry::PlayerRegistry;
pub use session::{Session, UNNAMED_PLAYER};
