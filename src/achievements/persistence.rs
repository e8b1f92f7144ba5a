//! Save file: settings, stats, achievement state and game log in one JSON
//! document at `~/.speed_tapper/save.json`.

use super::types::AchievementStates;
use crate::core::constants::SAVE_FILE_NAME;
use crate::core::game_log::GameLog;
use crate::core::settings::Settings;
use crate::core::stats::Stats;
use crate::utils::persistence::{self, from_value_lenient, PersistenceError};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::Path;

/// Everything that survives a restart.
///
/// Loading is section by section: a section that does not parse falls back
/// to its default without touching the others, and settings and stats are
/// read field by field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Value", rename_all = "camelCase")]
pub struct SaveData {
    pub settings: Settings,
    pub stats: Stats,
    pub achievements: AchievementStates,
    pub game_log: GameLog,
}

impl From<Value> for SaveData {
    fn from(value: Value) -> Self {
        if !value.is_object() {
            tracing::warn!("save data is not a JSON object, starting fresh");
        }
        SaveData {
            settings: from_value_lenient(section(&value, "settings")),
            stats: from_value_lenient(section(&value, "stats")),
            achievements: section_or_default(&value, "achievements"),
            game_log: section_or_default(&value, "gameLog"),
        }
    }
}

static MISSING: Value = Value::Null;

fn section<'v>(value: &'v Value, key: &str) -> &'v Value {
    value.get(key).unwrap_or(&MISSING)
}

fn section_or_default<T: DeserializeOwned + Default>(value: &Value, key: &str) -> T {
    match value.get(key) {
        None | Some(Value::Null) => T::default(),
        Some(raw) => serde_json::from_value(raw.clone()).unwrap_or_else(|e| {
            tracing::warn!("ignoring unreadable {} in save data: {}", key, e);
            T::default()
        }),
    }
}

impl SaveData {
    /// State for a first run: defaults, with the default theme counted as
    /// used.
    pub fn first_run() -> Self {
        let mut data = SaveData::default();
        data.stats.mark_theme_used(data.settings.theme);
        data
    }

    /// Bring freshly deserialized data into a consistent state.
    fn normalize_loaded(&mut self) {
        self.settings.normalize();
        self.stats.normalize_loaded();
        self.stats.configured_duration = self.settings.game_duration;
        self.stats.mark_theme_used(self.settings.theme);
        self.game_log.enforce_cap();
    }
}

/// Load from an explicit path. Never fails: a missing or unreadable file
/// yields first-run data.
pub fn load_from(path: &Path) -> SaveData {
    match persistence::load_json::<SaveData>(path) {
        Ok(Some(mut data)) => {
            data.normalize_loaded();
            data
        }
        Ok(None) => SaveData::first_run(),
        Err(e) => {
            tracing::warn!("failed to load save data, starting fresh: {}", e);
            SaveData::first_run()
        }
    }
}

pub fn save_to(path: &Path, data: &SaveData) -> Result<(), PersistenceError> {
    persistence::save_json(path, data)
}

/// Load the save file from the home directory, or first-run data.
pub fn load_save_data() -> SaveData {
    match persistence::save_path(SAVE_FILE_NAME) {
        Ok(path) => load_from(&path),
        Err(e) => {
            tracing::warn!("{}; starting fresh", e);
            SaveData::first_run()
        }
    }
}
