//! Outcome of a finished game.

use serde::{Deserialize, Serialize};

/// Game mode: mash one button, or hit targets as they appear.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameMode {
    #[default]
    Tap,
    Target,
}

impl GameMode {
    pub fn name(&self) -> &'static str {
        match self {
            GameMode::Tap => "tap",
            GameMode::Target => "target",
        }
    }
}

/// One of the two seats in a two-player game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Player {
    One,
    Two,
}

/// Scores of a finished game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Outcome {
    SinglePlayer { score: u64 },
    TwoPlayer { p1_score: u64, p2_score: u64 },
}

/// Snapshot of the most recently completed game.
///
/// Produced once per game by the stats mutators and handed to the engine as
/// `Option<&GameResult>`; `None` means no game just ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameResult {
    pub outcome: Outcome,
    /// Round length in seconds.
    pub duration: u32,
    pub mode: GameMode,
}

impl GameResult {
    pub fn single_player(score: u64, duration: u32, mode: GameMode) -> Self {
        Self {
            outcome: Outcome::SinglePlayer { score },
            duration,
            mode,
        }
    }

    pub fn two_player(p1_score: u64, p2_score: u64, duration: u32, mode: GameMode) -> Self {
        Self {
            outcome: Outcome::TwoPlayer { p1_score, p2_score },
            duration,
            mode,
        }
    }

    /// Single-player score, if this was a single-player game.
    pub fn score(&self) -> Option<u64> {
        match self.outcome {
            Outcome::SinglePlayer { score } => Some(score),
            Outcome::TwoPlayer { .. } => None,
        }
    }

    /// True only for a drawn two-player game.
    pub fn is_tie(&self) -> bool {
        matches!(self.outcome, Outcome::TwoPlayer { p1_score, p2_score } if p1_score == p2_score)
    }

    /// Winning seat of a decided two-player game.
    pub fn winner(&self) -> Option<Player> {
        match self.outcome {
            Outcome::TwoPlayer { p1_score, p2_score } if p1_score > p2_score => Some(Player::One),
            Outcome::TwoPlayer { p1_score, p2_score } if p2_score > p1_score => Some(Player::Two),
            _ => None,
        }
    }

    /// Higher of the two scores. For a tie this is the shared score.
    pub fn winner_score(&self) -> Option<u64> {
        match self.outcome {
            Outcome::TwoPlayer { p1_score, p2_score } => Some(p1_score.max(p2_score)),
            Outcome::SinglePlayer { .. } => None,
        }
    }

    pub fn loser_score(&self) -> Option<u64> {
        match self.outcome {
            Outcome::TwoPlayer { p1_score, p2_score } => Some(p1_score.min(p2_score)),
            Outcome::SinglePlayer { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_two_player_accessors() {
        let result = GameResult::two_player(12, 21, 30, GameMode::Tap);
        assert!(!result.is_tie());
        assert_eq!(result.winner(), Some(Player::Two));
        assert_eq!(result.winner_score(), Some(21));
        assert_eq!(result.loser_score(), Some(12));
        assert_eq!(result.score(), None);
    }

    #[test]
    fn test_tie_has_no_winner() {
        let result = GameResult::two_player(7, 7, 30, GameMode::Target);
        assert!(result.is_tie());
        assert_eq!(result.winner(), None);
    }

    #[test]
    fn test_single_player_has_no_two_player_fields() {
        let result = GameResult::single_player(40, 60, GameMode::Tap);
        assert!(!result.is_tie());
        assert_eq!(result.winner(), None);
        assert_eq!(result.winner_score(), None);
        assert_eq!(result.loser_score(), None);
        assert_eq!(result.score(), Some(40));
    }
}
