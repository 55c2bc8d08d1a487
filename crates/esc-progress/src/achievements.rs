//! The achievement catalog and unlock checks.

use crate::record::ProgressRecord;

/// An achievement and the condition that earns it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AchievementDef {
    /// Stable identifier stored in the progress record.
    pub id: &'static str,
    /// Display name.
    pub name: &'static str,
    /// What must be done to earn it.
    pub description: &'static str,
}

/// Escapes faster than this earn Quick Escape.
pub const QUICK_ESCAPE_SECS: u64 = 300;

/// Streaks at least this long earn On a Roll.
pub const STREAK_THRESHOLD: u32 = 3;

/// Distinct rooms needed for Master Escapist.
pub const MASTER_ROOM_COUNT: u32 = 3;

/// Every achievement that can be earned.
pub const CATALOG: &[AchievementDef] = &[
    AchievementDef {
        id: "first-escape",
        name: "First Escape",
        description: "Escape your first room.",
    },
    AchievementDef {
        id: "quick-escape",
        name: "Quick Escape",
        description: "Escape a room in under five minutes.",
    },
    AchievementDef {
        id: "self-reliant",
        name: "Self Reliant",
        description: "Escape a room without using a single hint.",
    },
    AchievementDef {
        id: "on-a-roll",
        name: "On a Roll",
        description: "Escape three rooms in a row.",
    },
    AchievementDef {
        id: "master-escapist",
        name: "Master Escapist",
        description: "Escape three different rooms.",
    },
];

/// Achievements newly earned by the playthrough just folded into
/// `record` (call after `record_completion` and `update_streak`).
/// Already-earned achievements are never reported again.
pub fn check_unlocks(
    record: &ProgressRecord,
    time_secs: u64,
    hints_used: u32,
) -> Vec<&'static AchievementDef> {
    CATALOG
        .iter()
        .filter(|def| !record.has_achievement(def.id))
        .filter(|def| match def.id {
            "first-escape" => record.total_rooms_completed >= 1,
            "quick-escape" => time_secs < QUICK_ESCAPE_SECS,
            "self-reliant" => hints_used == 0,
            "on-a-roll" => record.current_streak >= STREAK_THRESHOLD,
            "master-escapist" => record.total_rooms_completed >= MASTER_ROOM_COUNT,
            _ => false,
        })
        .collect()
}
