//! Scoring engine: match feedback and points for one guess.
//!
//! Pure functions, no shared state. Targets and guesses are compared as
//! character sequences, never as numbers, so `"007"` and `"7"` differ.

use std::collections::HashMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Feedback for one guess against one target.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MatchCounts {
    /// Characters equal to the target at the same position.
    pub exact: u32,
    /// Characters present in the target at a different position, counted
    /// up to the target's remaining multiplicity.
    pub other: u32,
}

/// Compares `guess` with `target`.
///
/// `exact` counts positions `i` with `guess[i] == target[i]`; positions past
/// the end of either string do not count. `other` is the number of shared
/// characters (per character, the smaller of the two multiplicities)
/// minus `exact`.
pub fn evaluate(target: &str, guess: &str) -> MatchCounts {
    let exact = target
        .chars()
        .zip(guess.chars())
        .filter(|(t, g)| t == g)
        .count() as u32;

    let mut remaining: HashMap<char, u32> = HashMap::new();
    for c in target.chars() {
        *remaining.entry(c).or_default() += 1;
    }
    let mut shared = 0u32;
    for c in guess.chars() {
        if let Some(n) = remaining.get_mut(&c) {
            if *n > 0 {
                *n -= 1;
                shared += 1;
            }
        }
    }

    MatchCounts {
        exact,
        // Every exact match is also a shared character.
        other: shared - exact,
    }
}

/// Point weights for a guess.
///
/// ```text
/// points = exact × exact_points
///        + other × other_points
///        + max(0, speed_bonus_secs − floor(elapsed))
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoringRules {
    /// Points per correctly placed digit.
    pub exact_points: u32,
    /// Points per digit present elsewhere.
    pub other_points: u32,
    /// Seconds over which the speed bonus decays to zero, one point per
    /// whole second.
    pub speed_bonus_secs: u32,
}

impl Default for ScoringRules {
    fn default() -> Self {
        Self {
            exact_points: 10,
            other_points: 4,
            speed_bonus_secs: 15,
        }
    }
}

impl ScoringRules {
    /// Points for a guess with the given feedback, made `elapsed` after the
    /// player's previous scored action.
    pub fn score(&self, counts: MatchCounts, elapsed: Duration) -> u32 {
        let whole_secs = u32::try_from(elapsed.as_secs()).unwrap_or(u32::MAX);
        let bonus = self.speed_bonus_secs.saturating_sub(whole_secs);
        counts
            .exact
            .saturating_mul(self.exact_points)
            .saturating_add(counts.other.saturating_mul(self.other_points))
            .saturating_add(bonus)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counts(exact: u32, other: u32) -> MatchCounts {
        MatchCounts { exact, other }
    }

    // =====================================================================
    // evaluate()
    // =====================================================================

    #[test]
    fn test_evaluate_permutation_is_all_other() {
        assert_eq!(evaluate("137", "731"), counts(0, 3));
    }

    #[test]
    fn test_evaluate_exact_hit() {
        assert_eq!(evaluate("482", "482"), counts(3, 0));
    }

    #[test]
    fn test_evaluate_mixed_feedback() {
        // 1 and 2 are placed right, 4 is elsewhere, 9 is absent.
        assert_eq!(evaluate("1342", "1492"), counts(2, 1));
    }

    #[test]
    fn test_evaluate_repeated_digits_capped_by_target_multiplicity() {
        // Target has one 5: the guess's extra 5s earn nothing.
        assert_eq!(evaluate("512", "555"), counts(1, 0));
        // Same multiset of digits: all four are shared, two in place.
        assert_eq!(evaluate("3393", "9333"), counts(2, 2));
    }

    #[test]
    fn test_evaluate_shorter_and_longer_guesses() {
        assert_eq!(evaluate("4821", "48"), counts(2, 0));
        assert_eq!(evaluate("482", "48210"), counts(3, 0));
        assert_eq!(evaluate("482", ""), counts(0, 0));
    }

    #[test]
    fn test_evaluate_non_digit_guess_scores_nothing() {
        assert_eq!(evaluate("482", "abc"), counts(0, 0));
    }

    #[test]
    fn test_evaluate_bounds_hold_over_many_pairs() {
        let targets = ["137", "4821", "10000", "99999", "505"];
        let guesses = ["", "1", "731", "0000", "99", "55055", "1234567", "x7"];
        for target in targets {
            for guess in guesses {
                let MatchCounts { exact, other } = evaluate(target, guess);
                let t_len = target.chars().count() as u32;
                let g_len = guess.chars().count() as u32;
                assert!(exact <= t_len.min(g_len), "{target}/{guess}");
                assert!(exact + other <= t_len.min(g_len), "{target}/{guess}");
            }
        }
    }

    // =====================================================================
    // ScoringRules::score()
    // =====================================================================

    #[test]
    fn test_score_weights_and_full_bonus() {
        let rules = ScoringRules::default();
        assert_eq!(rules.score(counts(0, 3), Duration::ZERO), 12 + 15);
        assert_eq!(rules.score(counts(3, 0), Duration::ZERO), 30 + 15);
    }

    #[test]
    fn test_score_bonus_uses_whole_seconds() {
        let rules = ScoringRules::default();
        let elapsed = Duration::from_millis(4_900);
        assert_eq!(rules.score(counts(1, 1), elapsed), 10 + 4 + 11);
    }

    #[test]
    fn test_score_bonus_floors_at_zero() {
        let rules = ScoringRules::default();
        for secs in [15, 16, 600, u64::MAX] {
            let points = rules.score(counts(2, 0), Duration::from_secs(secs));
            assert_eq!(points, 20, "elapsed {secs}s");
        }
    }

    #[test]
    fn test_score_wrong_guess_still_earns_speed_bonus() {
        let rules = ScoringRules::default();
        assert_eq!(rules.score(counts(0, 0), Duration::from_secs(3)), 12);
    }

    #[test]
    fn test_score_monotonic_in_matches_and_elapsed() {
        let rules = ScoringRules::default();
        for secs in 0..20 {
            let elapsed = Duration::from_secs(secs);
            let later = Duration::from_secs(secs + 1);
            for exact in 0..4 {
                for other in 0..4 {
                    let base = rules.score(counts(exact, other), elapsed);
                    assert!(rules.score(counts(exact + 1, other), elapsed) >= base);
                    assert!(rules.score(counts(exact, other + 1), elapsed) >= base);
                    assert!(rules.score(counts(exact, other), later) <= base);
                }
            }
        }
    }
}
