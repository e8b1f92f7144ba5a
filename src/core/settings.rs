//! Player-facing settings.
//!
//! Settings are saved alongside statistics. The achievement rules never read
//! them directly: the session mirrors the fields rules care about (selected
//! duration, theme usage) into [`Stats`](super::stats::Stats).

use super::constants::DEFAULT_GAME_DURATION;
use serde::{Deserialize, Serialize};

/// Visual theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    pub fn name(&self) -> &'static str {
        match self {
            Theme::Dark => "dark",
            Theme::Light => "light",
        }
    }
}

/// Target-mode difficulty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    English,
    Arabic,
}

/// Saved settings. Missing fields fall back to their defaults on load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Settings {
    pub sound_enabled: bool,
    pub music_enabled: bool,
    pub vibration_enabled: bool,
    /// Round length in seconds.
    pub game_duration: u32,
    pub difficulty: Difficulty,
    pub theme: Theme,
    pub language: Language,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            sound_enabled: true,
            music_enabled: false,
            vibration_enabled: true,
            game_duration: DEFAULT_GAME_DURATION,
            difficulty: Difficulty::default(),
            theme: Theme::default(),
            language: Language::default(),
        }
    }
}

impl Settings {
    /// Repair values that deserialized but make no sense.
    pub fn normalize(&mut self) {
        if self.game_duration == 0 {
            self.game_duration = DEFAULT_GAME_DURATION;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_first_run() {
        let settings = Settings::default();
        assert!(settings.sound_enabled);
        assert!(!settings.music_enabled);
        assert_eq!(settings.game_duration, 30);
        assert_eq!(settings.theme, Theme::Dark);
        assert_eq!(settings.difficulty, Difficulty::Medium);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let settings: Settings =
            serde_json::from_str(r#"{"theme":"light","gameDuration":60}"#).unwrap();
        assert_eq!(settings.theme, Theme::Light);
        assert_eq!(settings.game_duration, 60);
        assert!(settings.vibration_enabled);
        assert_eq!(settings.language, Language::English);
    }

    #[test]
    fn test_normalize_zero_duration() {
        let mut settings = Settings {
            game_duration: 0,
            ..Default::default()
        };
        settings.normalize();
        assert_eq!(settings.game_duration, DEFAULT_GAME_DURATION);
    }
}
