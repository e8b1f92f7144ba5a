//! Achievement system module.
//!
//! A static rule table ([`data`]) evaluated by a pure engine ([`engine`])
//! against player stats and the last game result. Unlock state is stored in
//! `~/.speed_tapper/save.json` together with the stats.

pub mod browser;
pub mod data;
pub mod engine;
pub mod persistence;
pub mod types;

pub use browser::{browser_entries, unlock_summary, BrowserEntry, UnlockSummary};
pub use data::{get_achievement_def, ALL_ACHIEVEMENTS};
pub use engine::{evaluate, AchievementEngine, Evaluation, FaultStage, RuleFault};
pub use persistence::{load_save_data, SaveData};
pub use types::{
    AchievementCategory, AchievementDef, AchievementId, AchievementState, AchievementStates,
    RuleContext,
};
