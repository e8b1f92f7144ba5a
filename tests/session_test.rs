//! Integration test: session orchestration
//!
//! Plays whole games through [`Session`] with a recording notifier and an
//! in-memory or on-disk save sink, and checks notification order, save
//! cadence and recovery from a broken save target.

use speed_tapper::achievements::persistence::load_from;
use speed_tapper::achievements::{AchievementDef, SaveData};
use speed_tapper::core::{FileSink, GameLogEntry, GameMode, Notifier, SaveSink, Session, Theme};
use speed_tapper::utils::PersistenceError;
use speed_tapper::AchievementId;
use std::path::PathBuf;
use std::time::{Duration, Instant};

#[derive(Default)]
struct Toasts {
    titles: Vec<&'static str>,
}

impl Notifier for Toasts {
    fn on_unlocked(&mut self, def: &AchievementDef) {
        self.titles.push(def.title_key);
    }
}

#[derive(Default)]
struct CountingSink {
    writes: usize,
    last: Option<SaveData>,
}

impl SaveSink for CountingSink {
    fn persist(&mut self, data: &SaveData) -> Result<(), PersistenceError> {
        self.writes += 1;
        self.last = Some(data.clone());
        Ok(())
    }
}

fn temp_save(label: &str) -> PathBuf {
    std::env::temp_dir()
        .join(format!(
            "speed_tapper_session_{}_{}",
            label,
            std::process::id()
        ))
        .join("save.json")
}

#[test]
fn test_full_tap_game_notifies_and_saves_once() {
    let mut session = Session::new(
        SaveData::first_run(),
        Toasts::default(),
        CountingSink::default(),
    );
    let now = Instant::now();

    session.start_game();
    for _ in 0..100 {
        session.tap(now);
    }
    assert_eq!(session.notifier().titles, vec!["ach_taps_100_t"]);
    assert_eq!(session.sink().writes, 0, "taps only schedule a save");

    let record = session.finish_single_player(100, GameMode::Tap, now);
    assert!(record.new_high_score);
    assert_eq!(session.sink().writes, 1);
    assert!(!session.save_pending());

    let saved = session.sink().last.as_ref().map(|d| d.stats.total_taps);
    assert_eq!(saved, Some(100));
    assert!(session.achievements().is_unlocked(AchievementId::SpeedDemon30s));
    assert!(session.achievements().is_unlocked(AchievementId::SpTapHs50));
}

#[test]
fn test_debounced_save_flushes_after_interval() {
    let mut session = Session::new(
        SaveData::first_run(),
        Toasts::default(),
        CountingSink::default(),
    );
    let start = Instant::now();
    session.tap(start);
    session.tap(start + Duration::from_secs(3));

    assert!(!session.tick(start + Duration::from_secs(6)));
    assert!(session.tick(start + Duration::from_secs(9)));
    assert_eq!(session.sink().writes, 1);
    assert!(!session.tick(start + Duration::from_secs(20)));
}

#[test]
fn test_two_player_games_are_logged_newest_first() {
    let mut session = Session::new(
        SaveData::first_run(),
        Toasts::default(),
        CountingSink::default(),
    );
    let now = Instant::now();
    session.finish_two_player(3, 9, GameMode::Target, ("Ann", "Bo"), now);
    session.finish_two_player(11, 10, GameMode::Tap, ("Ann", "Bo"), now);

    let log = session.data().game_log.entries();
    assert_eq!(log.len(), 2);
    match &log[0] {
        GameLogEntry::TwoPlayer {
            p1_score, p1_name, ..
        } => {
            assert_eq!(*p1_score, 11);
            assert_eq!(p1_name, "Ann");
        }
        other => panic!("expected a two-player entry, got {:?}", other),
    }
    assert_eq!(
        session.notifier().titles,
        vec!["ach_close_call_win_t"],
        "9 - 3 is neither a shutout nor a close call"
    );
}

#[test]
fn test_settings_round_trip_through_file_sink() {
    let path = temp_save("settings");
    let mut session = Session::new(
        SaveData::first_run(),
        Toasts::default(),
        FileSink::new(path.clone()),
    );
    session.update_settings(
        |s| {
            s.theme = Theme::Light;
            s.game_duration = 60;
        },
        Instant::now(),
    );
    assert_eq!(session.notifier().titles, vec!["ach_theme_explorer_t"]);

    let loaded = load_from(&path);
    assert_eq!(loaded.settings.theme, Theme::Light);
    assert_eq!(loaded.stats.configured_duration, 60);
    assert!(loaded.achievements.is_unlocked(AchievementId::ThemeExplorer));

    if let Some(dir) = path.parent() {
        std::fs::remove_dir_all(dir).ok();
    }
}

#[test]
fn test_unwritable_save_target_does_not_interrupt_play() {
    let blocker = temp_save("blocked");
    let dir = blocker.parent().map(PathBuf::from).unwrap_or_default();
    std::fs::create_dir_all(&dir).unwrap();
    // A regular file where the save directory should be
    let file_as_dir = dir.join("not_a_dir");
    std::fs::write(&file_as_dir, "x").unwrap();

    let mut session = Session::new(
        SaveData::first_run(),
        Toasts::default(),
        FileSink::new(file_as_dir.join("save.json")),
    );
    let result = session.finish_two_player(4, 0, GameMode::Tap, ("A", "B"), Instant::now());
    assert_eq!(result.winner_score(), Some(4));
    assert!(session.achievements().is_unlocked(AchievementId::TpPerfectWin));
    assert!(!session.save_now());

    std::fs::remove_dir_all(dir).ok();
}
