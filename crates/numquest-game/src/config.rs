//! Game configuration.

use serde::{Deserialize, Serialize};

use crate::{RoomError, ScoringRules};

/// Largest digit count a target may have; 10^MAX_DIGITS must fit a `u64`.
const MAX_SUPPORTED_DIGITS: u8 = 18;

/// Settings for a room.
///
/// The defaults reproduce the classic game: two players to start, two
/// restart votes to play again, 3-5 digit targets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Connected sessions needed for a join to auto-start a round. A
    /// disconnect that drops below this abandons the running round.
    pub min_players: usize,

    /// Restart votes needed to start the next round. Independent of how
    /// many players are connected.
    pub restart_quorum: usize,

    /// Shortest target, in digits.
    pub min_digits: u8,

    /// Longest target, in digits.
    pub max_digits: u8,

    /// Point weights.
    pub scoring: ScoringRules,

    /// Entries sent in each `LEADERBOARD` message.
    pub leaderboard_size: usize,

    /// Seed for target draws. `None` seeds from the OS.
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            min_players: 2,
            restart_quorum: 2,
            min_digits: 3,
            max_digits: 5,
            scoring: ScoringRules::default(),
            leaderboard_size: 10,
            seed: None,
        }
    }
}

impl GameConfig {
    /// Checks that the values describe a playable game.
    ///
    /// # Errors
    /// Returns [`RoomError::InvalidConfig`] naming the first bad field.
    pub fn validate(&self) -> Result<(), RoomError> {
        if self.min_players == 0 {
            return Err(RoomError::InvalidConfig(
                "min_players must be at least 1".into(),
            ));
        }
        if self.restart_quorum == 0 {
            return Err(RoomError::InvalidConfig(
                "restart_quorum must be at least 1".into(),
            ));
        }
        if self.min_digits == 0 || self.min_digits > self.max_digits {
            return Err(RoomError::InvalidConfig(format!(
                "digit range {}..={} is empty",
                self.min_digits, self.max_digits
            )));
        }
        if self.max_digits > MAX_SUPPORTED_DIGITS {
            return Err(RoomError::InvalidConfig(format!(
                "max_digits {} exceeds {MAX_SUPPORTED_DIGITS}",
                self.max_digits
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_game_config_default() {
        let config = GameConfig::default();
        assert_eq!(config.min_players, 2);
        assert_eq!(config.restart_quorum, 2);
        assert_eq!((config.min_digits, config.max_digits), (3, 5));
        assert_eq!(config.scoring, ScoringRules::default());
        assert!(config.seed.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_empty_digit_range() {
        let config = GameConfig {
            min_digits: 6,
            max_digits: 4,
            ..GameConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(RoomError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_validate_rejects_zero_thresholds_and_huge_targets() {
        for config in [
            GameConfig {
                min_players: 0,
                ..GameConfig::default()
            },
            GameConfig {
                restart_quorum: 0,
                ..GameConfig::default()
            },
            GameConfig {
                min_digits: 0,
                ..GameConfig::default()
            },
            GameConfig {
                max_digits: 19,
                ..GameConfig::default()
            },
        ] {
            assert!(config.validate().is_err(), "{config:?}");
        }
    }
}
