//! Core game state: settings, stats, results, the game log and the session
//! that ties them to the achievement engine.

pub mod constants;
pub mod game_log;
pub mod game_result;
pub mod session;
pub mod settings;
pub mod stats;

pub use game_log::{win_rate, GameLog, GameLogEntry, LogWinner};
pub use game_result::{GameMode, GameResult, Outcome, Player};
pub use session::{FileSink, Notifier, SaveScheduler, SaveSink, Session};
pub use settings::{Difficulty, Language, Settings, Theme};
pub use stats::{SinglePlayerRecord, Stats};
