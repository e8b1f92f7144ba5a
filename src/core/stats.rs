//! Cumulative player statistics.
//!
//! Game-loop code mutates [`Stats`] through the `record_*` methods; the
//! achievement engine only reads it. Every counter is monotonic except
//! `consecutive_targets_hit`, which resets at game start and on any tap in
//! tap mode.

use super::constants::{DEFAULT_GAME_DURATION, MARATHON_DURATION};
use super::game_result::{GameMode, GameResult, Player};
use super::settings::Theme;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Stats {
    pub p1_wins: u64,
    pub p2_wins: u64,
    /// Taps plus target hits, all modes.
    pub total_taps: u64,
    /// Target-mode high score.
    pub single_player_high_score: u64,
    /// Tap-mode high score, valid for `sp_taps_in_duration_setting` only.
    pub sp_taps_in_duration: u64,
    pub sp_taps_in_duration_setting: u32,
    /// Round length currently selected in settings.
    pub configured_duration: u32,
    /// Consecutive single-player target hits in the current game.
    pub consecutive_targets_hit: u64,
    pub games_played_sp_tap: u64,
    pub games_played_sp_target: u64,
    pub games_played_tp_tap: u64,
    pub games_played_tp_target: u64,
    pub played_60s_game: bool,
    pub used_dark_theme: bool,
    pub used_light_theme: bool,
}

impl Default for Stats {
    fn default() -> Self {
        Self {
            p1_wins: 0,
            p2_wins: 0,
            total_taps: 0,
            single_player_high_score: 0,
            sp_taps_in_duration: 0,
            sp_taps_in_duration_setting: DEFAULT_GAME_DURATION,
            configured_duration: DEFAULT_GAME_DURATION,
            consecutive_targets_hit: 0,
            games_played_sp_tap: 0,
            games_played_sp_target: 0,
            games_played_tp_tap: 0,
            games_played_tp_target: 0,
            played_60s_game: false,
            used_dark_theme: false,
            used_light_theme: false,
        }
    }
}

/// What a finished single-player game changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SinglePlayerRecord {
    pub result: GameResult,
    pub new_high_score: bool,
}

impl Stats {
    pub fn total_wins(&self) -> u64 {
        self.p1_wins.saturating_add(self.p2_wins)
    }

    pub fn single_player_games(&self) -> u64 {
        self.games_played_sp_tap
            .saturating_add(self.games_played_sp_target)
    }

    pub fn two_player_games(&self) -> u64 {
        self.games_played_tp_tap
            .saturating_add(self.games_played_tp_target)
    }

    /// Tap-mode high score if it was set under `duration`.
    pub fn tap_high_score_for(&self, duration: u32) -> Option<u64> {
        (self.sp_taps_in_duration_setting == duration).then_some(self.sp_taps_in_duration)
    }

    /// Repair fields after loading from disk. The streak never survives a
    /// reload.
    pub fn normalize_loaded(&mut self) {
        if self.sp_taps_in_duration_setting == 0 {
            self.sp_taps_in_duration_setting = DEFAULT_GAME_DURATION;
        }
        if self.configured_duration == 0 {
            self.configured_duration = DEFAULT_GAME_DURATION;
        }
        self.consecutive_targets_hit = 0;
    }

    // =========================================================================
    // Input events
    // =========================================================================

    /// Single-player tap-mode button press. Breaks any target streak.
    pub fn record_tap(&mut self) {
        self.total_taps += 1;
        self.consecutive_targets_hit = 0;
    }

    /// Two-player tap-mode press. Streaks are single-player only.
    pub fn record_two_player_tap(&mut self) {
        self.total_taps += 1;
    }

    pub fn record_target_hit(&mut self, single_player: bool) {
        self.total_taps += 1;
        if single_player {
            self.consecutive_targets_hit += 1;
        }
    }

    pub fn start_game(&mut self) {
        self.consecutive_targets_hit = 0;
    }

    /// Leaving a game before the timer ran out.
    pub fn abandon_game(&mut self) {
        self.consecutive_targets_hit = 0;
    }

    pub fn mark_theme_used(&mut self, theme: Theme) {
        match theme {
            Theme::Dark => self.used_dark_theme = true,
            Theme::Light => self.used_light_theme = true,
        }
    }

    // =========================================================================
    // Game end
    // =========================================================================

    /// Fold a finished single-player game into the stats.
    ///
    /// The tap-mode high score is tracked for one duration at a time: a
    /// better score under a different duration replaces both the score and
    /// the duration it belongs to.
    pub fn record_single_player_game(
        &mut self,
        score: u64,
        duration: u32,
        mode: GameMode,
    ) -> SinglePlayerRecord {
        let mut new_high_score = false;
        match mode {
            GameMode::Target => {
                self.games_played_sp_target += 1;
                if score > self.single_player_high_score {
                    self.single_player_high_score = score;
                    new_high_score = true;
                }
            }
            GameMode::Tap => {
                self.games_played_sp_tap += 1;
                if score > self.sp_taps_in_duration {
                    self.sp_taps_in_duration = score;
                    self.sp_taps_in_duration_setting = duration;
                    new_high_score = true;
                }
            }
        }
        if duration == MARATHON_DURATION {
            self.played_60s_game = true;
        }
        SinglePlayerRecord {
            result: GameResult::single_player(score, duration, mode),
            new_high_score,
        }
    }

    /// Fold a finished two-player game into the stats.
    pub fn record_two_player_game(
        &mut self,
        p1_score: u64,
        p2_score: u64,
        duration: u32,
        mode: GameMode,
    ) -> GameResult {
        let result = GameResult::two_player(p1_score, p2_score, duration, mode);
        match result.winner() {
            Some(Player::One) => self.p1_wins += 1,
            Some(Player::Two) => self.p2_wins += 1,
            None => {}
        }
        match mode {
            GameMode::Tap => self.games_played_tp_tap += 1,
            GameMode::Target => self.games_played_tp_target += 1,
        }
        if duration == MARATHON_DURATION {
            self.played_60s_game = true;
        }
        result
    }
}
