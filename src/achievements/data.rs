//! Static achievement definitions.
//!
//! Conditions and progress functions are plain `fn` items so the table can
//! live in a `const`. All of them are total: any combination of stat values
//! and any (or no) last result yields `false`/a number, never a panic.

use super::types::{
    AchievementCategory, AchievementDef, AchievementId, ProgressRule, RuleContext,
};
use crate::core::constants::*;
use crate::core::stats::Stats;

/// All achievement definitions in catalog (evaluation) order.
pub const ALL_ACHIEVEMENTS: &[AchievementDef] = &[
    AchievementDef {
        id: AchievementId::Taps100,
        name: "Warming Up",
        description: "Tap 100 times in total",
        title_key: "ach_taps_100_t",
        desc_key: "ach_taps_100_d",
        icon: "👆",
        category: AchievementCategory::Cumulative,
        condition: |ctx| ctx.stats.total_taps >= TAPS_BRONZE,
        progress: Some(ProgressRule {
            current: total_taps,
            max: TAPS_BRONZE,
        }),
    },
    AchievementDef {
        id: AchievementId::SpTargetHs50,
        name: "Sharpshooter",
        description: "Score 50 in single-player target mode",
        title_key: "ach_sp_target_hs_50_t",
        desc_key: "ach_sp_target_hs_50_d",
        icon: "🎯",
        category: AchievementCategory::Cumulative,
        condition: |ctx| ctx.stats.single_player_high_score >= TARGET_HS_BRONZE,
        progress: Some(ProgressRule {
            current: target_high_score,
            max: TARGET_HS_BRONZE,
        }),
    },
    AchievementDef {
        id: AchievementId::SpTapHs30,
        name: "Quick Fingers",
        description: "Score 30 in single-player tap mode",
        title_key: "ach_sp_tap_hs_30_t",
        desc_key: "ach_sp_tap_hs_30_d",
        icon: "⏱️",
        category: AchievementCategory::Cumulative,
        // Any duration counts here
        condition: |ctx| ctx.stats.sp_taps_in_duration >= TAP_HS_BRONZE,
        progress: Some(ProgressRule {
            current: tap_high_score,
            max: TAP_HS_BRONZE,
        }),
    },
    AchievementDef {
        id: AchievementId::TpWin10,
        name: "Rival",
        description: "Win 10 two-player games",
        title_key: "ach_tp_win_10_t",
        desc_key: "ach_tp_win_10_d",
        icon: "⚔️",
        category: AchievementCategory::Compound,
        condition: |ctx| ctx.stats.total_wins() >= TWO_PLAYER_WINS_BRONZE,
        progress: Some(ProgressRule {
            current: total_wins,
            max: TWO_PLAYER_WINS_BRONZE,
        }),
    },
    AchievementDef {
        id: AchievementId::PlayAllModes,
        name: "Tourist",
        description: "Play every game mode at least once",
        title_key: "ach_play_all_modes_t",
        desc_key: "ach_play_all_modes_d",
        icon: "🗺️",
        category: AchievementCategory::Conjunctive,
        condition: played_every_mode,
        progress: None,
    },
    AchievementDef {
        id: AchievementId::Taps500,
        name: "Tapper",
        description: "Tap 500 times in total",
        title_key: "ach_taps_500_t",
        desc_key: "ach_taps_500_d",
        icon: "👆👆",
        category: AchievementCategory::Cumulative,
        condition: |ctx| ctx.stats.total_taps >= TAPS_SILVER,
        progress: Some(ProgressRule {
            current: total_taps,
            max: TAPS_SILVER,
        }),
    },
    AchievementDef {
        id: AchievementId::Taps1000,
        name: "Tap Machine",
        description: "Tap 1000 times in total",
        title_key: "ach_taps_1000_t",
        desc_key: "ach_taps_1000_d",
        icon: "🚀",
        category: AchievementCategory::Cumulative,
        condition: |ctx| ctx.stats.total_taps >= TAPS_GOLD,
        progress: Some(ProgressRule {
            current: total_taps,
            max: TAPS_GOLD,
        }),
    },
    AchievementDef {
        id: AchievementId::SpTargetHs100,
        name: "Marksman",
        description: "Score 100 in single-player target mode",
        title_key: "ach_sp_target_hs_100_t",
        desc_key: "ach_sp_target_hs_100_d",
        icon: "🏆",
        category: AchievementCategory::Cumulative,
        condition: |ctx| ctx.stats.single_player_high_score >= TARGET_HS_GOLD,
        progress: Some(ProgressRule {
            current: target_high_score,
            max: TARGET_HS_GOLD,
        }),
    },
    AchievementDef {
        id: AchievementId::SpTapHs50,
        name: "Blazing Fingers",
        description: "Score 50 in single-player tap mode",
        title_key: "ach_sp_tap_hs_50_t",
        desc_key: "ach_sp_tap_hs_50_d",
        icon: "🔥",
        category: AchievementCategory::Cumulative,
        condition: |ctx| ctx.stats.sp_taps_in_duration >= TAP_HS_GOLD,
        progress: Some(ProgressRule {
            current: tap_high_score,
            max: TAP_HS_GOLD,
        }),
    },
    AchievementDef {
        id: AchievementId::TpWin50,
        name: "Champion",
        description: "Win 50 two-player games",
        title_key: "ach_tp_win_50_t",
        desc_key: "ach_tp_win_50_d",
        icon: "👑",
        category: AchievementCategory::Compound,
        condition: |ctx| ctx.stats.total_wins() >= TWO_PLAYER_WINS_GOLD,
        progress: Some(ProgressRule {
            current: total_wins,
            max: TWO_PLAYER_WINS_GOLD,
        }),
    },
    AchievementDef {
        id: AchievementId::TpPerfectWin,
        name: "Flawless",
        description: "Win a two-player game while your opponent scores nothing",
        title_key: "ach_tp_perfect_win_t",
        desc_key: "ach_tp_perfect_win_d",
        icon: "💯",
        category: AchievementCategory::ResultDependent,
        condition: perfect_win,
        progress: None,
    },
    AchievementDef {
        id: AchievementId::SpTargetStreak10,
        name: "On a Roll",
        description: "Hit 10 targets in a row",
        title_key: "ach_sp_target_streak_10_t",
        desc_key: "ach_sp_target_streak_10_d",
        icon: "✅",
        category: AchievementCategory::Cumulative,
        condition: |ctx| ctx.stats.consecutive_targets_hit >= TARGET_STREAK_BRONZE,
        progress: Some(ProgressRule {
            current: target_streak,
            max: TARGET_STREAK_BRONZE,
        }),
    },
    AchievementDef {
        id: AchievementId::SpTargetStreak25,
        name: "Unstoppable",
        description: "Hit 25 targets in a row",
        title_key: "ach_sp_target_streak_25_t",
        desc_key: "ach_sp_target_streak_25_d",
        icon: "✨",
        category: AchievementCategory::Cumulative,
        condition: |ctx| ctx.stats.consecutive_targets_hit >= TARGET_STREAK_GOLD,
        progress: Some(ProgressRule {
            current: target_streak,
            max: TARGET_STREAK_GOLD,
        }),
    },
    AchievementDef {
        id: AchievementId::CloseCallWin,
        name: "Close Call",
        description: "Win a two-player game by exactly one point",
        title_key: "ach_close_call_win_t",
        desc_key: "ach_close_call_win_d",
        icon: "😅",
        category: AchievementCategory::ResultDependent,
        condition: close_call_win,
        progress: None,
    },
    AchievementDef {
        id: AchievementId::PlaySp10,
        name: "Regular",
        description: "Play 10 single-player games",
        title_key: "ach_play_sp_10_t",
        desc_key: "ach_play_sp_10_d",
        icon: "🚶",
        category: AchievementCategory::Compound,
        condition: |ctx| ctx.stats.single_player_games() >= SINGLE_PLAYER_GAMES,
        progress: Some(ProgressRule {
            current: Stats::single_player_games,
            max: SINGLE_PLAYER_GAMES,
        }),
    },
    AchievementDef {
        id: AchievementId::PlayTp25,
        name: "Social Tapper",
        description: "Play 25 two-player games",
        title_key: "ach_play_tp_25_t",
        desc_key: "ach_play_tp_25_d",
        icon: "🧑‍🤝‍🧑",
        category: AchievementCategory::Compound,
        condition: |ctx| ctx.stats.two_player_games() >= TWO_PLAYER_GAMES,
        progress: Some(ProgressRule {
            current: Stats::two_player_games,
            max: TWO_PLAYER_GAMES,
        }),
    },
    AchievementDef {
        id: AchievementId::SpeedDemon30s,
        name: "Speed Demon",
        description: "Score 60 in a 30 second tap game",
        title_key: "ach_speed_demon_30s_t",
        desc_key: "ach_speed_demon_30s_d",
        icon: "⚡",
        category: AchievementCategory::ConditionalThreshold,
        condition: |ctx| speed_demon_taps(ctx.stats) >= SPEED_DEMON_TAPS,
        progress: Some(ProgressRule {
            current: speed_demon_taps,
            max: SPEED_DEMON_TAPS,
        }),
    },
    AchievementDef {
        id: AchievementId::Marathon60s,
        name: "Marathon",
        description: "Finish a 60 second game",
        title_key: "ach_marathon_60s_t",
        desc_key: "ach_marathon_60s_d",
        icon: "🏃",
        category: AchievementCategory::Conjunctive,
        condition: |ctx| ctx.stats.played_60s_game,
        progress: None,
    },
    AchievementDef {
        id: AchievementId::ThemeExplorer,
        name: "Decorator",
        description: "Try both the dark and the light theme",
        title_key: "ach_theme_explorer_t",
        desc_key: "ach_theme_explorer_d",
        icon: "🎨",
        category: AchievementCategory::Conjunctive,
        condition: |ctx| ctx.stats.used_dark_theme && ctx.stats.used_light_theme,
        progress: None,
    },
    AchievementDef {
        id: AchievementId::Perfectionist,
        name: "Perfectionist",
        description: "Unlock every other achievement",
        title_key: "ach_perfectionist_t",
        desc_key: "ach_perfectionist_d",
        icon: "⭐",
        category: AchievementCategory::Meta,
        condition: all_others_unlocked,
        progress: None,
    },
];

// =========================================================================
// Progress functions
// =========================================================================

fn total_taps(stats: &Stats) -> u64 {
    stats.total_taps
}

fn target_high_score(stats: &Stats) -> u64 {
    stats.single_player_high_score
}

fn tap_high_score(stats: &Stats) -> u64 {
    stats.sp_taps_in_duration
}

fn total_wins(stats: &Stats) -> u64 {
    stats.total_wins()
}

fn target_streak(stats: &Stats) -> u64 {
    stats.consecutive_targets_hit
}

/// Tap high score for the speed-demon trial. Counts only when the score was
/// set in a 30 s round and 30 s is still the selected round length;
/// otherwise zero.
fn speed_demon_taps(stats: &Stats) -> u64 {
    if stats.configured_duration != SPEED_DEMON_DURATION {
        return 0;
    }
    stats.tap_high_score_for(SPEED_DEMON_DURATION).unwrap_or(0)
}

// =========================================================================
// Conditions
// =========================================================================

fn played_every_mode(ctx: &RuleContext<'_>) -> bool {
    let stats = ctx.stats;
    stats.games_played_sp_tap > 0
        && stats.games_played_sp_target > 0
        && stats.games_played_tp_tap > 0
        && stats.games_played_tp_target > 0
}

/// Last game was a decided two-player game the loser scored nothing in.
fn perfect_win(ctx: &RuleContext<'_>) -> bool {
    match ctx.last_result {
        Some(result) if !result.is_tie() => result.loser_score() == Some(0),
        _ => false,
    }
}

/// Last game was a two-player game won by exactly one point.
fn close_call_win(ctx: &RuleContext<'_>) -> bool {
    let Some(result) = ctx.last_result else {
        return false;
    };
    if result.is_tie() {
        return false;
    }
    match (result.winner_score(), result.loser_score()) {
        (Some(winner), Some(loser)) => winner.checked_sub(loser) == Some(1),
        _ => false,
    }
}

/// Every other catalog entry is unlocked in the pre-pass snapshot.
fn all_others_unlocked(ctx: &RuleContext<'_>) -> bool {
    ctx.catalog
        .iter()
        .filter(|def| def.id != AchievementId::Perfectionist)
        .all(|def| ctx.states.is_unlocked(def.id))
}

// =========================================================================
// Lookup
// =========================================================================

/// Look up an achievement definition by id.
pub fn get_achievement_def(id: AchievementId) -> Option<&'static AchievementDef> {
    ALL_ACHIEVEMENTS.iter().find(|a| a.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::achievements::types::AchievementStates;
    use crate::core::game_result::{GameMode, GameResult};

    fn holds(id: AchievementId, stats: &Stats, last_result: Option<&GameResult>) -> bool {
        let states = AchievementStates::default();
        let def = get_achievement_def(id).unwrap();
        (def.condition)(&RuleContext {
            stats,
            last_result,
            states: &states,
            catalog: ALL_ACHIEVEMENTS,
        })
    }

    #[test]
    fn test_all_achievements_have_unique_ids() {
        use std::collections::HashSet;
        let mut ids = HashSet::new();
        for achievement in ALL_ACHIEVEMENTS {
            assert!(
                ids.insert(achievement.id),
                "Duplicate achievement ID: {:?}",
                achievement.id
            );
        }
    }

    #[test]
    fn test_catalog_order_matches_id_list() {
        let catalog: Vec<_> = ALL_ACHIEVEMENTS.iter().map(|a| a.id).collect();
        assert_eq!(catalog, AchievementId::ALL.to_vec());
    }

    #[test]
    fn test_get_achievement_def() {
        let def = get_achievement_def(AchievementId::Taps100).unwrap();
        assert_eq!(def.title_key, "ach_taps_100_t");
        assert_eq!(def.progress.map(|p| p.max), Some(100));
    }

    #[test]
    fn test_result_dependent_rules_have_no_progress() {
        let ids: Vec<_> = ALL_ACHIEVEMENTS
            .iter()
            .filter(|a| a.category == AchievementCategory::ResultDependent)
            .inspect(|a| assert!(a.progress.is_none(), "{} has progress", a.id))
            .map(|a| a.id)
            .collect();
        assert_eq!(
            ids,
            vec![AchievementId::TpPerfectWin, AchievementId::CloseCallWin]
        );
    }

    #[test]
    fn test_every_entry_has_english_text() {
        for def in ALL_ACHIEVEMENTS {
            assert!(!def.name.is_empty(), "{} has no name", def.id);
            assert!(!def.description.is_empty(), "{} has no description", def.id);
        }
    }

    #[test]
    fn test_default_stats_satisfy_nothing() {
        let stats = Stats::default();
        for def in ALL_ACHIEVEMENTS {
            if def.id == AchievementId::Perfectionist {
                continue;
            }
            assert!(!holds(def.id, &stats, None), "{} held on fresh stats", def.id);
        }
    }

    #[test]
    fn test_play_all_modes_needs_all_four() {
        let mut stats = Stats {
            games_played_sp_tap: 3,
            games_played_sp_target: 1,
            games_played_tp_tap: 2,
            ..Default::default()
        };
        assert!(!holds(AchievementId::PlayAllModes, &stats, None));
        stats.games_played_tp_target = 1;
        assert!(holds(AchievementId::PlayAllModes, &stats, None));
    }

    #[test]
    fn test_perfect_win() {
        let stats = Stats::default();
        let shutout = GameResult::two_player(10, 0, 30, GameMode::Tap);
        let zero_zero = GameResult::two_player(0, 0, 30, GameMode::Tap);
        let single = GameResult::single_player(0, 30, GameMode::Tap);
        assert!(holds(AchievementId::TpPerfectWin, &stats, Some(&shutout)));
        assert!(!holds(AchievementId::TpPerfectWin, &stats, Some(&zero_zero)));
        assert!(!holds(AchievementId::TpPerfectWin, &stats, Some(&single)));
        assert!(!holds(AchievementId::TpPerfectWin, &stats, None));
    }

    #[test]
    fn test_close_call() {
        let stats = Stats::default();
        let by_one = GameResult::two_player(20, 21, 30, GameMode::Target);
        let by_two = GameResult::two_player(21, 19, 30, GameMode::Target);
        let tie = GameResult::two_player(21, 21, 30, GameMode::Target);
        assert!(holds(AchievementId::CloseCallWin, &stats, Some(&by_one)));
        assert!(!holds(AchievementId::CloseCallWin, &stats, Some(&by_two)));
        assert!(!holds(AchievementId::CloseCallWin, &stats, Some(&tie)));
    }

    #[test]
    fn test_speed_demon_requires_matching_duration() {
        let mut stats = Stats {
            sp_taps_in_duration: 80,
            sp_taps_in_duration_setting: 30,
            configured_duration: 30,
            ..Default::default()
        };
        assert_eq!(speed_demon_taps(&stats), 80);
        assert!(holds(AchievementId::SpeedDemon30s, &stats, None));

        stats.configured_duration = 60;
        assert_eq!(speed_demon_taps(&stats), 0);
        assert!(!holds(AchievementId::SpeedDemon30s, &stats, None));

        stats.configured_duration = 30;
        stats.sp_taps_in_duration_setting = 10;
        assert_eq!(speed_demon_taps(&stats), 0);
    }

    #[test]
    fn test_theme_explorer_needs_both_themes() {
        let mut stats = Stats {
            used_dark_theme: true,
            ..Default::default()
        };
        assert!(!holds(AchievementId::ThemeExplorer, &stats, None));
        stats.used_light_theme = true;
        assert!(holds(AchievementId::ThemeExplorer, &stats, None));
    }

    #[test]
    fn test_extreme_stats_do_not_panic() {
        let stats = Stats {
            p1_wins: u64::MAX / 2,
            p2_wins: u64::MAX / 2,
            total_taps: u64::MAX,
            ..Default::default()
        };
        let lopsided = GameResult::two_player(u64::MAX, 0, u32::MAX, GameMode::Tap);
        for def in ALL_ACHIEVEMENTS {
            let _ = holds(def.id, &stats, Some(&lopsided));
            if let Some(progress) = def.progress {
                let _ = (progress.current)(&stats);
            }
        }
    }
}
