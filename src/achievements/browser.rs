//! Achievement browser model: what the achievements screen lists, in which
//! order, and the summary line above it.

use super::data::ALL_ACHIEVEMENTS;
use super::types::{AchievementDef, AchievementId, AchievementStates};
use crate::core::stats::Stats;
use std::fmt;

/// One row of the achievement list.
#[derive(Debug, Clone, Copy)]
pub struct BrowserEntry {
    pub def: &'static AchievementDef,
    pub unlocked: bool,
    /// `(current, max)` for locked entries with a progress rule, from live
    /// stats rather than the stored progress.
    pub progress: Option<(u64, u64)>,
}

impl BrowserEntry {
    /// Suffix appended to the description, e.g. ` (42 / 100)`.
    pub fn progress_text(&self) -> String {
        match self.progress {
            Some((current, max)) => format!(" ({} / {})", current, max),
            None => String::new(),
        }
    }
}

/// Unlocked entries first, otherwise catalog order, with the meta
/// achievement pinned to the end.
pub fn browser_entries(states: &AchievementStates, stats: &Stats) -> Vec<BrowserEntry> {
    let mut entries: Vec<BrowserEntry> = ALL_ACHIEVEMENTS
        .iter()
        .filter(|def| def.id != AchievementId::Perfectionist)
        .map(|def| entry_for(def, states, stats))
        .collect();
    // Stable sort keeps catalog order inside each group
    entries.sort_by_key(|entry| !entry.unlocked);

    if let Some(meta) = ALL_ACHIEVEMENTS
        .iter()
        .find(|def| def.id == AchievementId::Perfectionist)
    {
        entries.push(entry_for(meta, states, stats));
    }
    entries
}

fn entry_for(def: &'static AchievementDef, states: &AchievementStates, stats: &Stats) -> BrowserEntry {
    let unlocked = states.is_unlocked(def.id);
    let progress = match def.progress {
        Some(rule) if !unlocked => Some(((rule.current)(stats).min(rule.max), rule.max)),
        _ => None,
    };
    BrowserEntry {
        def,
        unlocked,
        progress,
    }
}

/// Unlock count excluding the meta achievement, which is shown separately.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnlockSummary {
    pub unlocked: usize,
    pub total: usize,
    pub meta_unlocked: bool,
}

pub fn unlock_summary(states: &AchievementStates) -> UnlockSummary {
    let regular = ALL_ACHIEVEMENTS
        .iter()
        .filter(|def| def.id != AchievementId::Perfectionist);
    UnlockSummary {
        unlocked: regular.clone().filter(|def| states.is_unlocked(def.id)).count(),
        total: regular.count(),
        meta_unlocked: states.is_unlocked(AchievementId::Perfectionist),
    }
}

impl fmt::Display for UnlockSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unlocked: {} / {} (+ ⭐)", self.unlocked, self.total)
    }
}
