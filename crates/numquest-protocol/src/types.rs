//! Message types for numquest's wire format.
//!
//! Inbound (client → server):
//!
//! ```text
//! JOIN|<username>      register a display name
//! RESTART              vote to start the next round
//! <anything else>      a guess, while a round is running
//! ```
//!
//! Outbound (server → client) is [`ServerMessage`]; its `Display` impl
//! renders the exact wire text.

use std::fmt;

use numquest_transport::ConnectionId;

/// Separator between fields of a wire message.
pub const FIELD_SEPARATOR: char = '|';

// ---------------------------------------------------------------------------
// Identity
// ---------------------------------------------------------------------------

/// Identifies one connected client for as long as its connection lives.
///
/// Session IDs are derived from connection IDs, so they sort in the order
/// clients connected. Score snapshots rely on that ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SessionId(pub u64);

impl From<ConnectionId> for SessionId {
    fn from(id: ConnectionId) -> Self {
        Self(id.into_inner())
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "S-{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Inbound
// ---------------------------------------------------------------------------

/// A message sent by a client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientMessage {
    /// `JOIN|<username>`. The name is client-asserted and unverified.
    Join { username: String },

    /// `RESTART`: a vote towards the restart quorum.
    Restart,

    /// Any other text. Only meaningful while a round is active; the
    /// payload is the trimmed message.
    Guess(String),
}

// ---------------------------------------------------------------------------
// Outbound
// ---------------------------------------------------------------------------

/// One `name:score` pair, as carried by `SCORES` and `LEADERBOARD`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreLine {
    pub name: String,
    pub score: u32,
}

impl ScoreLine {
    pub fn new(name: impl Into<String>, score: u32) -> Self {
        Self {
            name: name.into(),
            score,
        }
    }
}

impl fmt::Display for ScoreLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.name, self.score)
    }
}

/// Feedback for a single guess, sent only to the player who made it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuessReport {
    /// The guess as evaluated (trimmed).
    pub guess: String,
    /// Digits in the right position.
    pub exact: u32,
    /// Digits present in the target but in another position.
    pub other: u32,
    /// Points awarded for this guess.
    pub points: u32,
    /// The player's running total after this guess.
    pub total: u32,
}

/// A message sent by the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServerMessage {
    /// `WAIT`: not enough players, or the restart quorum is not met.
    Wait,

    /// `START|<digits>`: a round began, or the client joined one already
    /// running. The target itself is never sent.
    Start { digits: u8 },

    /// `SCORES|name:score|...` in connection order.
    Scores(Vec<ScoreLine>),

    /// `RESULT|guess|exact|other|points|total`.
    Result(GuessReport),

    /// `GAMEOVER|<target>|<winner>`.
    GameOver { target: String, winner: String },

    /// `LEADERBOARD|name:score|...`, highest first.
    Leaderboard(Vec<ScoreLine>),

    /// `RESTART_CONFIRMED`: the restart vote was counted.
    RestartConfirmed,

    /// `INFO|<text>`: human-readable notice.
    Info(String),
}

impl ServerMessage {
    /// The tag (first field) of this message.
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Wait => "WAIT",
            Self::Start { .. } => "START",
            Self::Scores(_) => "SCORES",
            Self::Result(_) => "RESULT",
            Self::GameOver { .. } => "GAMEOVER",
            Self::Leaderboard(_) => "LEADERBOARD",
            Self::RestartConfirmed => "RESTART_CONFIRMED",
            Self::Info(_) => "INFO",
        }
    }
}

impl fmt::Display for ServerMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sep = FIELD_SEPARATOR;
        f.write_str(self.tag())?;
        match self {
            Self::Wait | Self::RestartConfirmed => Ok(()),
            Self::Start { digits } => write!(f, "{sep}{digits}"),
            Self::Scores(lines) | Self::Leaderboard(lines) => {
                for line in lines {
                    write!(f, "{sep}{line}")?;
                }
                Ok(())
            }
            Self::Result(r) => write!(
                f,
                "{sep}{}{sep}{}{sep}{}{sep}{}{sep}{}",
                r.guess, r.exact, r.other, r.points, r.total
            ),
            Self::GameOver { target, winner } => {
                write!(f, "{sep}{target}{sep}{winner}")
            }
            Self::Info(text) => write!(f, "{sep}{text}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_id_display() {
        assert_eq!(SessionId(7).to_string(), "S-7");
    }

    #[test]
    fn test_session_id_from_connection_id_preserves_order() {
        let a = SessionId::from(ConnectionId::new(2));
        let b = SessionId::from(ConnectionId::new(9));
        assert_eq!(a, SessionId(2));
        assert!(a < b);
    }

    #[test]
    fn test_server_message_bare_tags() {
        assert_eq!(ServerMessage::Wait.to_string(), "WAIT");
        assert_eq!(
            ServerMessage::RestartConfirmed.to_string(),
            "RESTART_CONFIRMED"
        );
    }

    #[test]
    fn test_server_message_start_carries_digit_count() {
        let msg = ServerMessage::Start { digits: 4 };
        assert_eq!(msg.to_string(), "START|4");
    }

    #[test]
    fn test_server_message_scores_in_given_order() {
        let msg = ServerMessage::Scores(vec![
            ScoreLine::new("zoe", 3),
            ScoreLine::new("ana", 40),
        ]);
        assert_eq!(msg.to_string(), "SCORES|zoe:3|ana:40");
    }

    #[test]
    fn test_server_message_empty_scores_is_just_the_tag() {
        assert_eq!(ServerMessage::Scores(Vec::new()).to_string(), "SCORES");
        assert_eq!(
            ServerMessage::Leaderboard(Vec::new()).to_string(),
            "LEADERBOARD"
        );
    }

    #[test]
    fn test_server_message_result_field_order() {
        let msg = ServerMessage::Result(GuessReport {
            guess: "731".into(),
            exact: 0,
            other: 3,
            points: 27,
            total: 52,
        });
        assert_eq!(msg.to_string(), "RESULT|731|0|3|27|52");
    }

    #[test]
    fn test_server_message_game_over() {
        let msg = ServerMessage::GameOver {
            target: "482".into(),
            winner: "ana".into(),
        };
        assert_eq!(msg.to_string(), "GAMEOVER|482|ana");
    }

    #[test]
    fn test_server_message_leaderboard_and_info() {
        let board = ServerMessage::Leaderboard(vec![
            ScoreLine::new("bo", 120),
            ScoreLine::new("ana", 95),
        ]);
        assert_eq!(board.to_string(), "LEADERBOARD|bo:120|ana:95");

        let info = ServerMessage::Info("ana is ready".into());
        assert_eq!(info.to_string(), "INFO|ana is ready");
    }
}
