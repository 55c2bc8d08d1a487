//! Player progress for Escapade.
//!
//! Tracks what persists between playthroughs: per-room statistics,
//! lifetime totals, the escape streak, and the achievement catalog,
//! all stored in one JSON file. The engine reports each finished
//! playthrough; this crate folds it in and decides what was earned.

/// Achievement catalog and unlock checks.
pub mod achievements;
/// Error types for progress persistence.
pub mod error;
/// The persistent progress record.
pub mod record;
/// Loading and saving the record as JSON.
pub mod store;

pub use achievements::{AchievementDef, CATALOG, check_unlocks};
pub use error::{ProgressError, ProgressResult};
pub use record::{Achievement, ProgressRecord, RoomStats};
