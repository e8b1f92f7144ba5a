//! Bounded history of finished games, newest first.

use super::constants::MAX_LOG_ENTRIES;
use super::game_result::{GameMode, GameResult, Outcome, Player};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Winner column of a two-player log entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogWinner {
    #[serde(alias = "log_winner_p1")]
    P1,
    #[serde(alias = "log_winner_p2")]
    P2,
    #[serde(alias = "log_winner_tie")]
    Tie,
}

impl From<Option<Player>> for LogWinner {
    fn from(winner: Option<Player>) -> Self {
        match winner {
            Some(Player::One) => LogWinner::P1,
            Some(Player::Two) => LogWinner::P2,
            None => LogWinner::Tie,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum GameLogEntry {
    #[serde(rename = "sp")]
    SinglePlayer {
        mode: GameMode,
        score: u64,
        duration: u32,
        timestamp: DateTime<Utc>,
    },
    #[serde(rename = "tp")]
    TwoPlayer {
        mode: GameMode,
        #[serde(alias = "p1Score")]
        p1_score: u64,
        #[serde(alias = "p2Score")]
        p2_score: u64,
        #[serde(alias = "p1Name")]
        p1_name: String,
        #[serde(alias = "p2Name")]
        p2_name: String,
        winner: LogWinner,
        duration: u32,
        timestamp: DateTime<Utc>,
    },
}

impl GameLogEntry {
    /// Build a log entry from a game result. Player names only matter for
    /// two-player games.
    pub fn from_result(
        result: &GameResult,
        names: (&str, &str),
        timestamp: DateTime<Utc>,
    ) -> Self {
        match result.outcome {
            Outcome::SinglePlayer { score } => GameLogEntry::SinglePlayer {
                mode: result.mode,
                score,
                duration: result.duration,
                timestamp,
            },
            Outcome::TwoPlayer { p1_score, p2_score } => GameLogEntry::TwoPlayer {
                mode: result.mode,
                p1_score,
                p2_score,
                p1_name: names.0.to_string(),
                p2_name: names.1.to_string(),
                winner: result.winner().into(),
                duration: result.duration,
                timestamp,
            },
        }
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        match self {
            GameLogEntry::SinglePlayer { timestamp, .. }
            | GameLogEntry::TwoPlayer { timestamp, .. } => *timestamp,
        }
    }
}

/// Serialized as a plain array. Entries that fail to parse are skipped on
/// load; the rest are kept in order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<Value>", into = "Vec<GameLogEntry>")]
pub struct GameLog {
    entries: Vec<GameLogEntry>,
}

impl From<Vec<Value>> for GameLog {
    fn from(raw: Vec<Value>) -> Self {
        let mut entries: Vec<GameLogEntry> = raw
            .into_iter()
            .filter_map(|value| match serde_json::from_value(value) {
                Ok(entry) => Some(entry),
                Err(e) => {
                    tracing::debug!("skipping saved game log entry: {}", e);
                    None
                }
            })
            .collect();
        entries.truncate(MAX_LOG_ENTRIES);
        Self { entries }
    }
}

impl From<GameLog> for Vec<GameLogEntry> {
    fn from(log: GameLog) -> Self {
        log.entries
    }
}

impl GameLog {
    pub fn push(&mut self, entry: GameLogEntry) {
        self.entries.insert(0, entry);
        self.entries.truncate(MAX_LOG_ENTRIES);
    }

    pub fn entries(&self) -> &[GameLogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop anything past the cap; used after loading a hand-edited file.
    pub fn enforce_cap(&mut self) {
        self.entries.truncate(MAX_LOG_ENTRIES);
    }
}

/// Player one's share of decided two-player games, rounded percent.
pub fn win_rate(p1_wins: u64, p2_wins: u64) -> u64 {
    let total = p1_wins.saturating_add(p2_wins);
    if total == 0 {
        return 0;
    }
    ((p1_wins as f64 / total as f64) * 100.0).round() as u64
}
