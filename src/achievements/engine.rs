//! Achievement evaluation.
//!
//! One call to [`AchievementEngine::evaluate`] is one pass over the catalog.
//! The engine is a pure function of its inputs: it borrows stats, the last
//! result and the previous state for the duration of the call and returns an
//! owned next state. Notification and persistence are left to the caller.

use super::data::ALL_ACHIEVEMENTS;
use super::types::{AchievementDef, AchievementId, AchievementStates, RuleContext};
use crate::core::game_result::GameResult;
use crate::core::stats::Stats;
use std::any::Any;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};

/// Which part of a rule failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaultStage {
    Progress,
    Condition,
}

/// A rule that panicked during a pass. The achievement is treated as not met
/// for that pass only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleFault {
    pub id: AchievementId,
    pub stage: FaultStage,
    pub message: String,
}

impl fmt::Display for RuleFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let stage = match self.stage {
            FaultStage::Progress => "progress",
            FaultStage::Condition => "condition",
        };
        write!(f, "{} {} failed: {}", self.id, stage, self.message)
    }
}

/// Result of one evaluation pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Evaluation {
    pub next_state: AchievementStates,
    /// Newly unlocked and not yet notified, in catalog order.
    pub unlocked_this_pass: Vec<AchievementId>,
    /// Whether any progress, unlock or notified flag moved.
    pub changed: bool,
    pub faults: Vec<RuleFault>,
}

/// Evaluates a catalog of achievement rules.
#[derive(Debug, Clone, Copy)]
pub struct AchievementEngine<'c> {
    catalog: &'c [AchievementDef],
}

impl AchievementEngine<'static> {
    /// Engine over the built-in catalog.
    pub fn new() -> Self {
        Self {
            catalog: ALL_ACHIEVEMENTS,
        }
    }
}

impl Default for AchievementEngine<'static> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'c> AchievementEngine<'c> {
    pub fn with_catalog(catalog: &'c [AchievementDef]) -> Self {
        Self { catalog }
    }

    /// Run one pass over the catalog.
    ///
    /// Conditions see `previous`, never the state being built, so a rule
    /// that inspects other achievements (the meta rule) reacts one pass after
    /// its siblings unlock regardless of catalog order. Entries already
    /// unlocked in `previous` are skipped.
    pub fn evaluate(
        &self,
        stats: &Stats,
        last_result: Option<&GameResult>,
        previous: &AchievementStates,
    ) -> Evaluation {
        let ctx = RuleContext {
            stats,
            last_result,
            states: previous,
            catalog: self.catalog,
        };

        let mut next_state = previous.clone();
        let mut unlocked_this_pass = Vec::new();
        let mut faults = Vec::new();
        let mut changed = false;

        for def in self.catalog {
            let old = previous.get(def.id);
            if old.unlocked {
                continue;
            }
            let mut state = old;

            if let Some(rule) = def.progress {
                match guarded(|| (rule.current)(stats)) {
                    Ok(raw) => state.progress = raw.min(rule.max),
                    Err(message) => {
                        faults.push(report(def.id, FaultStage::Progress, message));
                        continue;
                    }
                }
            }

            match guarded(|| (def.condition)(&ctx)) {
                Ok(true) => {
                    state.unlocked = true;
                    if !state.notified {
                        state.notified = true;
                        unlocked_this_pass.push(def.id);
                    }
                    tracing::info!("achievement unlocked: {}", def.id);
                }
                Ok(false) => {}
                Err(message) => faults.push(report(def.id, FaultStage::Condition, message)),
            }

            if state != old {
                changed = true;
                next_state.set(def.id, state);
            }
        }

        Evaluation {
            next_state,
            unlocked_this_pass,
            changed,
            faults,
        }
    }
}

/// Evaluate the built-in catalog.
pub fn evaluate(
    stats: &Stats,
    last_result: Option<&GameResult>,
    previous: &AchievementStates,
) -> Evaluation {
    AchievementEngine::new().evaluate(stats, last_result, previous)
}

fn guarded<T>(f: impl FnOnce() -> T) -> Result<T, String> {
    panic::catch_unwind(AssertUnwindSafe(f)).map_err(panic_message)
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_string()
    }
}

fn report(id: AchievementId, stage: FaultStage, message: String) -> RuleFault {
    let fault = RuleFault { id, stage, message };
    tracing::error!("achievement rule fault: {}", fault);
    fault
}
