//! Achievement system types and data structures.

use crate::core::game_result::GameResult;
use crate::core::stats::Stats;
use crate::utils::persistence::from_value_lenient;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Kind of rule behind an achievement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AchievementCategory {
    /// One monotonic stat crosses a threshold.
    Cumulative,
    /// A sum of stats crosses a threshold.
    Compound,
    /// Several independent conditions hold at once.
    Conjunctive,
    /// Decided by the last finished game only.
    ResultDependent,
    /// A stat that only counts under a matching configuration value.
    ConditionalThreshold,
    /// Depends on the unlock state of the other achievements.
    Meta,
}

/// Unique identifier for each achievement. The string form is the stable
/// key used in save files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AchievementId {
    #[serde(rename = "taps_100")]
    Taps100,
    #[serde(rename = "sp_target_hs_50")]
    SpTargetHs50,
    #[serde(rename = "sp_tap_hs_30")]
    SpTapHs30,
    #[serde(rename = "tp_win_10")]
    TpWin10,
    #[serde(rename = "play_all_modes")]
    PlayAllModes,
    #[serde(rename = "taps_500")]
    Taps500,
    #[serde(rename = "taps_1000")]
    Taps1000,
    #[serde(rename = "sp_target_hs_100")]
    SpTargetHs100,
    #[serde(rename = "sp_tap_hs_50")]
    SpTapHs50,
    #[serde(rename = "tp_win_50")]
    TpWin50,
    #[serde(rename = "tp_perfect_win")]
    TpPerfectWin,
    #[serde(rename = "sp_target_streak_10")]
    SpTargetStreak10,
    #[serde(rename = "sp_target_streak_25")]
    SpTargetStreak25,
    #[serde(rename = "close_call_win")]
    CloseCallWin,
    #[serde(rename = "play_sp_10")]
    PlaySp10,
    #[serde(rename = "play_tp_25")]
    PlayTp25,
    #[serde(rename = "speed_demon_30s")]
    SpeedDemon30s,
    #[serde(rename = "marathon_60s")]
    Marathon60s,
    #[serde(rename = "theme_explorer")]
    ThemeExplorer,
    #[serde(rename = "perfectionist")]
    Perfectionist,
}

impl AchievementId {
    /// Every id, in catalog order.
    pub const ALL: [AchievementId; 20] = [
        AchievementId::Taps100,
        AchievementId::SpTargetHs50,
        AchievementId::SpTapHs30,
        AchievementId::TpWin10,
        AchievementId::PlayAllModes,
        AchievementId::Taps500,
        AchievementId::Taps1000,
        AchievementId::SpTargetHs100,
        AchievementId::SpTapHs50,
        AchievementId::TpWin50,
        AchievementId::TpPerfectWin,
        AchievementId::SpTargetStreak10,
        AchievementId::SpTargetStreak25,
        AchievementId::CloseCallWin,
        AchievementId::PlaySp10,
        AchievementId::PlayTp25,
        AchievementId::SpeedDemon30s,
        AchievementId::Marathon60s,
        AchievementId::ThemeExplorer,
        AchievementId::Perfectionist,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AchievementId::Taps100 => "taps_100",
            AchievementId::SpTargetHs50 => "sp_target_hs_50",
            AchievementId::SpTapHs30 => "sp_tap_hs_30",
            AchievementId::TpWin10 => "tp_win_10",
            AchievementId::PlayAllModes => "play_all_modes",
            AchievementId::Taps500 => "taps_500",
            AchievementId::Taps1000 => "taps_1000",
            AchievementId::SpTargetHs100 => "sp_target_hs_100",
            AchievementId::SpTapHs50 => "sp_tap_hs_50",
            AchievementId::TpWin50 => "tp_win_50",
            AchievementId::TpPerfectWin => "tp_perfect_win",
            AchievementId::SpTargetStreak10 => "sp_target_streak_10",
            AchievementId::SpTargetStreak25 => "sp_target_streak_25",
            AchievementId::CloseCallWin => "close_call_win",
            AchievementId::PlaySp10 => "play_sp_10",
            AchievementId::PlayTp25 => "play_tp_25",
            AchievementId::SpeedDemon30s => "speed_demon_30s",
            AchievementId::Marathon60s => "marathon_60s",
            AchievementId::ThemeExplorer => "theme_explorer",
            AchievementId::Perfectionist => "perfectionist",
        }
    }
}

impl fmt::Display for AchievementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a saved key names no known achievement.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown achievement id `{0}`")]
pub struct UnknownAchievementId(pub String);

impl FromStr for AchievementId {
    type Err = UnknownAchievementId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AchievementId::ALL
            .iter()
            .copied()
            .find(|id| id.as_str() == s)
            .ok_or_else(|| UnknownAchievementId(s.to_string()))
    }
}

/// Everything a condition may look at during one evaluation pass.
#[derive(Clone, Copy)]
pub struct RuleContext<'a> {
    pub stats: &'a Stats,
    /// The game that just ended, if any.
    pub last_result: Option<&'a GameResult>,
    /// Achievement state as it was before the current pass began.
    pub states: &'a AchievementStates,
    /// The catalog being evaluated.
    pub catalog: &'a [AchievementDef],
}

/// Pure unlock predicate.
pub type Condition = fn(&RuleContext<'_>) -> bool;

/// Progress shown against a fixed maximum. `current` returns the raw stat;
/// the engine clamps it to `max`.
#[derive(Clone, Copy)]
pub struct ProgressRule {
    pub current: fn(&Stats) -> u64,
    pub max: u64,
}

impl fmt::Debug for ProgressRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProgressRule")
            .field("max", &self.max)
            .finish_non_exhaustive()
    }
}

/// Static definition of an achievement.
#[derive(Clone, Copy)]
pub struct AchievementDef {
    pub id: AchievementId,
    /// English text for the command-line listing.
    pub name: &'static str,
    pub description: &'static str,
    /// Localization keys; opaque to the engine.
    pub title_key: &'static str,
    pub desc_key: &'static str,
    pub icon: &'static str,
    pub category: AchievementCategory,
    pub condition: Condition,
    pub progress: Option<ProgressRule>,
}

impl fmt::Debug for AchievementDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AchievementDef")
            .field("id", &self.id)
            .field("category", &self.category)
            .field("progress", &self.progress)
            .finish_non_exhaustive()
    }
}

/// Persisted per-achievement record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AchievementState {
    pub unlocked: bool,
    pub notified: bool,
    pub progress: u64,
}

/// Achievement state for every id. Ids never written read as locked with no
/// progress.
///
/// Serialized as an object keyed by id string. Keys that name no current
/// achievement are dropped on load, and each entry is read field by field so
/// one bad value cannot reset an unlock.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    from = "BTreeMap<String, Value>",
    into = "BTreeMap<String, AchievementState>"
)]
pub struct AchievementStates {
    states: BTreeMap<AchievementId, AchievementState>,
}

impl AchievementStates {
    pub fn get(&self, id: AchievementId) -> AchievementState {
        self.states.get(&id).copied().unwrap_or_default()
    }

    pub fn is_unlocked(&self, id: AchievementId) -> bool {
        self.get(id).unlocked
    }

    pub fn set(&mut self, id: AchievementId, state: AchievementState) {
        self.states.insert(id, state);
    }

    /// Mark as unlocked and notified. Returns true if newly unlocked.
    pub fn unlock(&mut self, id: AchievementId) -> bool {
        let entry = self.states.entry(id).or_default();
        if entry.unlocked {
            return false;
        }
        entry.unlocked = true;
        entry.notified = true;
        true
    }

    pub fn unlocked_count(&self) -> usize {
        self.states.values().filter(|s| s.unlocked).count()
    }
}

impl From<BTreeMap<String, Value>> for AchievementStates {
    fn from(raw: BTreeMap<String, Value>) -> Self {
        let mut states = BTreeMap::new();
        for (key, value) in raw {
            match key.parse::<AchievementId>() {
                Ok(id) => {
                    states.insert(id, from_value_lenient(&value));
                }
                Err(err) => tracing::debug!("ignoring saved achievement state: {}", err),
            }
        }
        Self { states }
    }
}

impl From<AchievementStates> for BTreeMap<String, AchievementState> {
    fn from(states: AchievementStates) -> Self {
        states
            .states
            .into_iter()
            .map(|(id, state)| (id.as_str().to_string(), state))
            .collect()
    }
}
