//! The persistent progress record.
//!
//! One [`ProgressRecord`] accumulates across playthroughs: per-room
//! stats, lifetime totals, the escape streak, and unlocked
//! achievements. Everything serializes to a single JSON document.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use esc_core::RoomId;

/// Lifetime statistics for a single room.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomStats {
    /// Whether the room has ever been escaped.
    #[serde(default)]
    pub completed: bool,
    /// Fastest escape in seconds, if any.
    #[serde(default)]
    pub best_time_secs: Option<u64>,
    /// Completed playthroughs of this room.
    #[serde(default)]
    pub attempts: u32,
    /// Hints spent on the most recent completion of this room.
    #[serde(default)]
    pub hints_used: u32,
}

/// An unlocked achievement, stamped with when it was earned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Achievement {
    /// Stable identifier, e.g. `first-escape`.
    pub id: String,
    /// Display name.
    pub name: String,
    /// What was done to earn it.
    pub description: String,
    /// When it was earned.
    pub unlocked_at: DateTime<Utc>,
}

/// Accumulated player progress across every room and playthrough.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProgressRecord {
    /// Distinct rooms escaped at least once.
    #[serde(default)]
    pub total_rooms_completed: u32,
    /// Total play time across all completions, in seconds.
    #[serde(default)]
    pub total_play_time_secs: u64,
    /// Hints spent across all completions.
    #[serde(default)]
    pub total_hints_used: u32,
    /// Consecutive escapes without abandoning a room.
    #[serde(default)]
    pub current_streak: u32,
    /// Best streak ever reached.
    #[serde(default)]
    pub longest_streak: u32,
    /// Achievements earned so far.
    #[serde(default)]
    pub achievements: Vec<Achievement>,
    /// Per-room lifetime stats.
    #[serde(default)]
    pub room_stats: HashMap<RoomId, RoomStats>,
}

impl ProgressRecord {
    /// An empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stats for one room, if it has ever been played.
    pub fn stats(&self, room: &RoomId) -> Option<&RoomStats> {
        self.room_stats.get(room)
    }

    /// Fold one completed playthrough into the record.
    ///
    /// Best time only ever improves; totals and attempt counts
    /// accumulate, while the per-room hint count records the latest
    /// attempt. The distinct-room count is recomputed from the
    /// per-room table so replays never inflate it.
    pub fn record_completion(&mut self, room: &RoomId, time_secs: u64, hints_used: u32) {
        let stats = self.room_stats.entry(room.clone()).or_default();
        stats.completed = true;
        stats.attempts += 1;
        stats.hints_used = hints_used;
        stats.best_time_secs = Some(match stats.best_time_secs {
            Some(best) => best.min(time_secs),
            None => time_secs,
        });

        self.total_play_time_secs += time_secs;
        self.total_hints_used += hints_used;
        self.total_rooms_completed = u32::try_from(
            self.room_stats.values().filter(|s| s.completed).count(),
        )
        .unwrap_or(u32::MAX);
    }

    /// Update the escape streak after a playthrough ends.
    pub fn update_streak(&mut self, escaped: bool) {
        if escaped {
            self.current_streak += 1;
            self.longest_streak = self.longest_streak.max(self.current_streak);
        } else {
            self.current_streak = 0;
        }
    }

    /// Whether an achievement id has been earned.
    pub fn has_achievement(&self, id: &str) -> bool {
        self.achievements.iter().any(|a| a.id == id)
    }

    /// Record a newly earned achievement. Returns false (and changes
    /// nothing) if it was already earned.
    pub fn unlock(
        &mut self,
        id: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> bool {
        let id = id.into();
        if self.has_achievement(&id) {
            return false;
        }
        self.achievements.push(Achievement {
            id,
            name: name.into(),
            description: description.into(),
            unlocked_at: Utc::now(),
        });
        true
    }
}
