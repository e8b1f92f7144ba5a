//! Session: owns the application state between input events and drives the
//! achievement engine the way the game does.
//!
//! Input handlers mutate [`Stats`], then run an achievement check. Taps and
//! hits check without a game result and let saves debounce; game ends and
//! settings changes check with the result (if any) and save immediately.

use super::constants::ACHIEVEMENT_SAVE_INTERVAL_MS;
use super::game_log::GameLogEntry;
use super::game_result::{GameMode, GameResult};
use super::settings::Settings;
use super::stats::{SinglePlayerRecord, Stats};
use crate::achievements::data::get_achievement_def;
use crate::achievements::engine::AchievementEngine;
use crate::achievements::persistence::{self, SaveData};
use crate::achievements::types::{AchievementDef, AchievementId, AchievementStates};
use crate::utils::persistence::PersistenceError;
use chrono::Utc;
use std::path::PathBuf;
use std::time::{Duration, Instant};

/// Receives each newly unlocked achievement once.
pub trait Notifier {
    fn on_unlocked(&mut self, def: &AchievementDef);
}

/// Collects ids; handy for headless runs and tests.
impl Notifier for Vec<AchievementId> {
    fn on_unlocked(&mut self, def: &AchievementDef) {
        self.push(def.id);
    }
}

/// Writes save data somewhere durable.
pub trait SaveSink {
    fn persist(&mut self, data: &SaveData) -> Result<(), PersistenceError>;
}

/// Saves to a JSON file.
#[derive(Debug, Clone)]
pub struct FileSink {
    path: PathBuf,
}

impl FileSink {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}

impl SaveSink for FileSink {
    fn persist(&mut self, data: &SaveData) -> Result<(), PersistenceError> {
        persistence::save_to(&self.path, data)
    }
}

/// Debounce for non-urgent saves: every change pushes the deadline back by
/// the interval.
#[derive(Debug, Clone)]
pub struct SaveScheduler {
    interval: Duration,
    deadline: Option<Instant>,
}

impl Default for SaveScheduler {
    fn default() -> Self {
        Self::new(Duration::from_millis(ACHIEVEMENT_SAVE_INTERVAL_MS))
    }
}

impl SaveScheduler {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            deadline: None,
        }
    }

    pub fn schedule(&mut self, now: Instant) {
        self.deadline = Some(now + self.interval);
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    pub fn is_due(&self, now: Instant) -> bool {
        self.deadline.is_some_and(|deadline| now >= deadline)
    }

    /// Clears and reports a due deadline.
    pub fn take_due(&mut self, now: Instant) -> bool {
        if self.is_due(now) {
            self.deadline = None;
            true
        } else {
            false
        }
    }
}

/// Game session state plus its notification and persistence collaborators.
pub struct Session<N: Notifier, S: SaveSink> {
    data: SaveData,
    last_result: Option<GameResult>,
    engine: AchievementEngine<'static>,
    scheduler: SaveScheduler,
    notifier: N,
    sink: S,
}

impl<N: Notifier, S: SaveSink> Session<N, S> {
    pub fn new(mut data: SaveData, notifier: N, sink: S) -> Self {
        data.stats.configured_duration = data.settings.game_duration;
        Self {
            data,
            last_result: None,
            engine: AchievementEngine::new(),
            scheduler: SaveScheduler::default(),
            notifier,
            sink,
        }
    }

    pub fn data(&self) -> &SaveData {
        &self.data
    }

    pub fn stats(&self) -> &Stats {
        &self.data.stats
    }

    pub fn settings(&self) -> &Settings {
        &self.data.settings
    }

    pub fn achievements(&self) -> &AchievementStates {
        &self.data.achievements
    }

    pub fn last_result(&self) -> Option<&GameResult> {
        self.last_result.as_ref()
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn save_pending(&self) -> bool {
        self.scheduler.is_pending()
    }

    // =========================================================================
    // Achievement check and saving
    // =========================================================================

    /// Run one evaluation pass, notify new unlocks, then save: immediately
    /// when forced, debounced when something changed.
    pub fn check_achievements(
        &mut self,
        force_save: bool,
        last_result: Option<&GameResult>,
        now: Instant,
    ) -> Vec<AchievementId> {
        let eval = self
            .engine
            .evaluate(&self.data.stats, last_result, &self.data.achievements);
        self.data.achievements = eval.next_state;

        for id in &eval.unlocked_this_pass {
            match get_achievement_def(*id) {
                Some(def) => self.notifier.on_unlocked(def),
                None => tracing::warn!("unlocked achievement {} has no definition", id),
            }
        }

        if force_save {
            self.scheduler.cancel();
            self.save_now();
        } else if eval.changed {
            self.scheduler.schedule(now);
        }
        eval.unlocked_this_pass
    }

    /// Save right away. Failures are logged; the session keeps running in
    /// memory.
    pub fn save_now(&mut self) -> bool {
        match self.sink.persist(&self.data) {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!("save failed, continuing in memory: {}", e);
                false
            }
        }
    }

    /// Flush a debounced save whose deadline has passed.
    pub fn tick(&mut self, now: Instant) -> bool {
        if self.scheduler.take_due(now) {
            self.save_now()
        } else {
            false
        }
    }

    // =========================================================================
    // Input events
    // =========================================================================

    pub fn start_game(&mut self) {
        self.data.stats.start_game();
    }

    pub fn tap(&mut self, now: Instant) -> Vec<AchievementId> {
        self.data.stats.record_tap();
        self.check_achievements(false, None, now)
    }

    pub fn two_player_tap(&mut self, now: Instant) -> Vec<AchievementId> {
        self.data.stats.record_two_player_tap();
        self.check_achievements(false, None, now)
    }

    pub fn target_hit(&mut self, single_player: bool, now: Instant) -> Vec<AchievementId> {
        self.data.stats.record_target_hit(single_player);
        self.check_achievements(false, None, now)
    }

    /// Leave a running game early. Saves whatever high scores were set.
    pub fn abandon_game(&mut self) {
        self.data.stats.abandon_game();
        self.scheduler.cancel();
        self.save_now();
    }

    // =========================================================================
    // Game end
    // =========================================================================

    pub fn finish_single_player(
        &mut self,
        score: u64,
        mode: GameMode,
        now: Instant,
    ) -> SinglePlayerRecord {
        let duration = self.data.settings.game_duration;
        let record = self
            .data
            .stats
            .record_single_player_game(score, duration, mode);
        self.data
            .game_log
            .push(GameLogEntry::from_result(&record.result, ("", ""), Utc::now()));
        self.last_result = Some(record.result);
        self.check_achievements(true, Some(&record.result), now);
        record
    }

    pub fn finish_two_player(
        &mut self,
        p1_score: u64,
        p2_score: u64,
        mode: GameMode,
        names: (&str, &str),
        now: Instant,
    ) -> GameResult {
        let duration = self.data.settings.game_duration;
        let result = self
            .data
            .stats
            .record_two_player_game(p1_score, p2_score, duration, mode);
        self.data
            .game_log
            .push(GameLogEntry::from_result(&result, names, Utc::now()));
        self.last_result = Some(result);
        self.check_achievements(true, Some(&result), now);
        result
    }

    // =========================================================================
    // Settings
    // =========================================================================

    /// Change settings, mirror what the rules read into the stats, check and
    /// save.
    pub fn update_settings(
        &mut self,
        change: impl FnOnce(&mut Settings),
        now: Instant,
    ) -> Vec<AchievementId> {
        change(&mut self.data.settings);
        self.data.settings.normalize();
        self.data.stats.mark_theme_used(self.data.settings.theme);
        self.data.stats.configured_duration = self.data.settings.game_duration;
        self.check_achievements(true, None, now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::settings::Theme;

    #[derive(Default)]
    struct MemorySink {
        saves: Vec<SaveData>,
        fail: bool,
    }

    impl SaveSink for MemorySink {
        fn persist(&mut self, data: &SaveData) -> Result<(), PersistenceError> {
            if self.fail {
                return Err(PersistenceError::NoHomeDir);
            }
            self.saves.push(data.clone());
            Ok(())
        }
    }

    fn session() -> Session<Vec<AchievementId>, MemorySink> {
        Session::new(SaveData::first_run(), Vec::new(), MemorySink::default())
    }

    #[test]
    fn test_scheduler_debounces() {
        let start = Instant::now();
        let mut scheduler = SaveScheduler::new(Duration::from_millis(100));
        assert!(!scheduler.is_due(start));

        scheduler.schedule(start);
        assert!(!scheduler.is_due(start + Duration::from_millis(50)));
        // Another change pushes the deadline back
        scheduler.schedule(start + Duration::from_millis(80));
        assert!(!scheduler.take_due(start + Duration::from_millis(120)));
        assert!(scheduler.take_due(start + Duration::from_millis(180)));
        assert!(!scheduler.is_pending());
    }

    #[test]
    fn test_taps_debounce_saves() {
        let mut s = session();
        let now = Instant::now();
        s.tap(now);
        assert!(s.sink().saves.is_empty());
        assert!(s.save_pending());

        assert!(!s.tick(now + Duration::from_millis(10)));
        assert!(s.tick(now + Duration::from_millis(ACHIEVEMENT_SAVE_INTERVAL_MS)));
        assert_eq!(s.sink().saves.len(), 1);
        assert_eq!(s.sink().saves[0].stats.total_taps, 1);
    }

    #[test]
    fn test_game_end_saves_immediately_and_cancels_debounce() {
        let mut s = session();
        let now = Instant::now();
        s.start_game();
        for _ in 0..10 {
            s.target_hit(true, now);
        }
        assert!(s.save_pending());
        assert_eq!(s.notifier(), &vec![AchievementId::SpTargetStreak10]);

        s.finish_single_player(10, GameMode::Target, now);
        assert!(!s.save_pending());
        assert_eq!(s.sink().saves.len(), 1);
        assert_eq!(s.data().game_log.len(), 1);
        assert_eq!(s.last_result().and_then(|r| r.score()), Some(10));
    }

    #[test]
    fn test_two_player_result_reaches_rules() {
        let mut s = session();
        let result = s.finish_two_player(21, 20, GameMode::Tap, ("A", "B"), Instant::now());
        assert_eq!(result.winner_score(), Some(21));
        assert!(s.achievements().is_unlocked(AchievementId::CloseCallWin));
        assert!(!s.achievements().is_unlocked(AchievementId::TpPerfectWin));
        assert_eq!(s.stats().p1_wins, 1);
    }

    #[test]
    fn test_theme_change_unlocks_explorer() {
        let mut s = session();
        let unlocked = s.update_settings(|settings| settings.theme = Theme::Light, Instant::now());
        assert_eq!(unlocked, vec![AchievementId::ThemeExplorer]);
        assert_eq!(s.sink().saves.len(), 1);
    }

    #[test]
    fn test_duration_change_is_mirrored() {
        let mut s = session();
        s.update_settings(|settings| settings.game_duration = 60, Instant::now());
        assert_eq!(s.stats().configured_duration, 60);
        s.update_settings(|settings| settings.game_duration = 0, Instant::now());
        assert_eq!(s.settings().game_duration, 30);
        assert_eq!(s.stats().configured_duration, 30);
    }

    #[test]
    fn test_save_failure_keeps_session_alive() {
        let mut s = Session::new(
            SaveData::first_run(),
            Vec::new(),
            MemorySink {
                fail: true,
                ..Default::default()
            },
        );
        s.finish_two_player(5, 0, GameMode::Target, ("A", "B"), Instant::now());
        assert!(s.achievements().is_unlocked(AchievementId::TpPerfectWin));
        assert!(!s.save_now());
        assert_eq!(s.stats().games_played_tp_target, 1);
    }

    #[test]
    fn test_file_sink_writes_json() {
        let dir = crate::utils::persistence::test_dir("file_sink");
        let mut sink = FileSink::new(dir.join("save.json"));
        let mut data = SaveData::first_run();
        data.stats.total_taps = 77;
        sink.persist(&data).unwrap();
        assert_eq!(persistence::load_from(sink.path()).stats.total_taps, 77);
        std::fs::remove_dir_all(dir).ok();
    }
}
