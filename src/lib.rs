//! Speed Tapper - tap-speed game with a rule-table achievement engine.
//!
//! This module exposes the game state and achievement logic for the binary
//! and for tests.

pub mod achievements;
pub mod build_info;
pub mod core;
pub mod utils;

pub use achievements::{
    AchievementCategory, AchievementDef, AchievementEngine, AchievementId, AchievementState,
    AchievementStates, Evaluation, SaveData,
};
pub use core::{GameMode, GameResult, Session, Settings, Stats};
