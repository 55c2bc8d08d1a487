//! The mutable per-playthrough session state.
//!
//! A [`GameSession`] is an explicit value constructed per playthrough;
//! there is no global instance. Concurrent sessions are simply
//! separate values; within one session, `&mut self` serializes
//! mutations. Every mutating operation returns a [`SessionSnapshot`]
//! copy, never a live view of internal state.

use std::fmt;

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use uuid::Uuid;

use esc_core::{ClueId, ObjectId, PuzzleId, RoomId};

use crate::combine::{self, CombinationOutcome, CombinationTable};
use crate::error::{EngineError, EngineResult};

/// Seconds a player must wait between hint requests. The cooldown is
/// advisory: callers gate on [`GameSession::can_request_hint`], the
/// session itself never blocks.
pub const HINT_COOLDOWN_SECS: i64 = 30;

/// Unique identifier for a game session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct SessionId(pub Uuid);

impl SessionId {
    /// Generate a new random session ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", &self.0.to_string()[..8])
    }
}

/// A full copy of the session state at one point in time.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionSnapshot {
    /// Session identifier.
    pub id: SessionId,
    /// The active room, if a playthrough has started.
    pub current_room: Option<RoomId>,
    /// Items currently held.
    pub inventory: Vec<ObjectId>,
    /// Objects collected this session (monotonic).
    pub collected_objects: Vec<ObjectId>,
    /// Objects examined this session (monotonic).
    pub examined_objects: Vec<ObjectId>,
    /// Puzzles solved this session (monotonic).
    pub solved_puzzles: Vec<PuzzleId>,
    /// Clues unlocked this session (monotonic).
    pub unlocked_clues: Vec<ClueId>,
    /// Hints requested this session.
    pub hints_used: u32,
    /// Time after which another hint may be requested.
    pub hint_cooldown_until: Option<DateTime<Utc>>,
    /// When the playthrough started.
    pub started_at: Option<DateTime<Utc>>,
    /// Recorded play time in seconds.
    pub play_time_secs: u64,
}

/// Summary of a finished playthrough, captured before the session
/// resets.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompletionSummary {
    /// The room that was completed.
    pub room_id: RoomId,
    /// Total play time in seconds.
    pub completion_time_secs: u64,
    /// Hints used during the playthrough.
    pub hints_used: u32,
}

/// Mutable state of a single playthrough.
#[derive(Debug, Clone)]
pub struct GameSession {
    id: SessionId,
    current_room: Option<RoomId>,
    inventory: Vec<ObjectId>,
    collected_objects: Vec<ObjectId>,
    examined_objects: Vec<ObjectId>,
    solved_puzzles: Vec<PuzzleId>,
    unlocked_clues: Vec<ClueId>,
    hints_used: u32,
    hint_cooldown_until: Option<DateTime<Utc>>,
    started_at: Option<DateTime<Utc>>,
    play_time_secs: u64,
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new()
    }
}

impl GameSession {
    /// Create a fresh session with no active room.
    pub fn new() -> Self {
        Self {
            id: SessionId::new(),
            current_room: None,
            inventory: Vec::new(),
            collected_objects: Vec::new(),
            examined_objects: Vec::new(),
            solved_puzzles: Vec::new(),
            unlocked_clues: Vec::new(),
            hints_used: 0,
            hint_cooldown_until: None,
            started_at: None,
            play_time_secs: 0,
        }
    }

    /// The session identifier.
    pub fn id(&self) -> SessionId {
        self.id
    }

    /// The active room, if any.
    pub fn current_room(&self) -> Option<&RoomId> {
        self.current_room.as_ref()
    }

    /// Items currently held.
    pub fn inventory(&self) -> &[ObjectId] {
        &self.inventory
    }

    /// Objects collected this session.
    pub fn collected_objects(&self) -> &[ObjectId] {
        &self.collected_objects
    }

    /// Objects examined this session.
    pub fn examined_objects(&self) -> &[ObjectId] {
        &self.examined_objects
    }

    /// Puzzles solved this session.
    pub fn solved_puzzles(&self) -> &[PuzzleId] {
        &self.solved_puzzles
    }

    /// Clues unlocked this session.
    pub fn unlocked_clues(&self) -> &[ClueId] {
        &self.unlocked_clues
    }

    /// Hints requested this session.
    pub fn hints_used(&self) -> u32 {
        self.hints_used
    }

    /// True if the item is currently in the inventory.
    pub fn holds(&self, item: &ObjectId) -> bool {
        self.inventory.contains(item)
    }

    /// True if the object has been examined this session.
    pub fn has_examined(&self, object: &ObjectId) -> bool {
        self.examined_objects.contains(object)
    }

    /// True if the puzzle has been solved this session.
    pub fn has_solved(&self, puzzle: &PuzzleId) -> bool {
        self.solved_puzzles.contains(puzzle)
    }

    /// A full copy of the current state.
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            id: self.id,
            current_room: self.current_room.clone(),
            inventory: self.inventory.clone(),
            collected_objects: self.collected_objects.clone(),
            examined_objects: self.examined_objects.clone(),
            solved_puzzles: self.solved_puzzles.clone(),
            unlocked_clues: self.unlocked_clues.clone(),
            hints_used: self.hints_used,
            hint_cooldown_until: self.hint_cooldown_until,
            started_at: self.started_at,
            play_time_secs: self.play_time_secs,
        }
    }

    /// Begin a playthrough of a room: clears every counter and set and
    /// stamps the start time.
    pub fn start(&mut self, room: impl Into<RoomId>) -> SessionSnapshot {
        self.reset();
        self.current_room = Some(room.into());
        self.started_at = Some(Utc::now());
        self.snapshot()
    }

    /// Record that an object has been examined. Idempotent.
    pub fn examine(&mut self, object: impl Into<ObjectId>) -> SessionSnapshot {
        let object = object.into();
        if !self.examined_objects.contains(&object) {
            self.examined_objects.push(object);
        }
        self.snapshot()
    }

    /// Add an object to the inventory and collected set. Idempotent.
    pub fn collect(&mut self, object: impl Into<ObjectId>) -> SessionSnapshot {
        let object = object.into();
        if !self.inventory.contains(&object) {
            self.inventory.push(object.clone());
        }
        if !self.collected_objects.contains(&object) {
            self.collected_objects.push(object);
        }
        self.snapshot()
    }

    /// Combine two held items. Delegates precondition checks to the
    /// resolver, then applies the outcome; on failure nothing changes.
    pub fn combine(
        &mut self,
        table: &CombinationTable,
        a: impl Into<ObjectId>,
        b: impl Into<ObjectId>,
    ) -> EngineResult<(CombinationOutcome, SessionSnapshot)> {
        let (a, b) = (a.into(), b.into());
        let outcome = combine::resolve(table, &a, &b, self)?;
        self.apply_outcome(&outcome);
        Ok((outcome, self.snapshot()))
    }

    /// Use a held item on a room object that has been examined.
    pub fn combine_with_room_object(
        &mut self,
        table: &CombinationTable,
        item: impl Into<ObjectId>,
        object: impl Into<ObjectId>,
    ) -> EngineResult<(CombinationOutcome, SessionSnapshot)> {
        let (item, object) = (item.into(), object.into());
        let outcome = combine::resolve_with_room_object(table, &item, &object, self)?;
        self.apply_outcome(&outcome);
        Ok((outcome, self.snapshot()))
    }

    /// Record a solved puzzle. Idempotent.
    pub fn solve_puzzle(&mut self, puzzle: impl Into<PuzzleId>) -> SessionSnapshot {
        let puzzle = puzzle.into();
        if !self.solved_puzzles.contains(&puzzle) {
            self.solved_puzzles.push(puzzle);
        }
        self.snapshot()
    }

    /// True when the cooldown has elapsed and a hint may be requested.
    pub fn can_request_hint(&self, now: DateTime<Utc>) -> bool {
        match self.hint_cooldown_until {
            Some(until) => now >= until,
            None => true,
        }
    }

    /// Count a hint and arm the 30-second cooldown. The session does
    /// not enforce the cooldown; gate on [`Self::can_request_hint`].
    pub fn request_hint(&mut self) -> SessionSnapshot {
        self.hints_used += 1;
        self.hint_cooldown_until = Some(Utc::now() + Duration::seconds(HINT_COOLDOWN_SECS));
        self.snapshot()
    }

    /// Refresh the recorded play time from the start timestamp.
    pub fn record_play_time(&mut self, now: DateTime<Utc>) -> SessionSnapshot {
        if let Some(start) = self.started_at {
            let secs = (now - start).num_seconds();
            self.play_time_secs = u64::try_from(secs).unwrap_or(0);
        }
        self.snapshot()
    }

    /// Finish the playthrough: capture the completion summary, then
    /// reset to the initial state. The summary is taken before the
    /// reset so its fields reflect the playthrough that just ended.
    pub fn complete(&mut self) -> EngineResult<CompletionSummary> {
        let room_id = self.current_room.clone().ok_or(EngineError::NoActiveRoom)?;
        self.record_play_time(Utc::now());
        let summary = CompletionSummary {
            room_id,
            completion_time_secs: self.play_time_secs,
            hints_used: self.hints_used,
        };
        self.reset();
        Ok(summary)
    }

    /// Clear all state back to a fresh session.
    pub fn reset(&mut self) {
        self.current_room = None;
        self.inventory.clear();
        self.collected_objects.clear();
        self.examined_objects.clear();
        self.solved_puzzles.clear();
        self.unlocked_clues.clear();
        self.hints_used = 0;
        self.hint_cooldown_until = None;
        self.started_at = None;
        self.play_time_secs = 0;
    }

    /// Apply a resolved combination: drop the consumed items, add the
    /// result to inventory and collected, and union the clues.
    fn apply_outcome(&mut self, outcome: &CombinationOutcome) {
        self.inventory.retain(|i| !outcome.consumed.contains(i));
        if let Some(result) = &outcome.result_item {
            if !self.inventory.contains(result) {
                self.inventory.push(result.clone());
            }
            if !self.collected_objects.contains(result) {
                self.collected_objects.push(result.clone());
            }
        }
        for clue in &outcome.unlocked_clues {
            if !self.unlocked_clues.contains(clue) {
                self.unlocked_clues.push(clue.clone());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CombinationRule;
    use proptest::prelude::*;

    fn started() -> GameSession {
        let mut session = GameSession::new();
        session.start("abandoned-mansion");
        session
    }

    #[test]
    fn start_resets_everything() {
        let mut session = started();
        session.collect("ancient-key");
        session.request_hint();

        let snap = session.start("secret-lab");
        assert_eq!(snap.current_room, Some("secret-lab".into()));
        assert!(snap.inventory.is_empty());
        assert_eq!(snap.hints_used, 0);
        assert!(snap.started_at.is_some());
    }

    #[test]
    fn examine_is_idempotent() {
        let mut session = started();
        let once = session.examine("bookshelf");
        let twice = session.examine("bookshelf");
        assert_eq!(once.examined_objects, twice.examined_objects);
        assert_eq!(twice.examined_objects.len(), 1);
    }

    #[test]
    fn collect_is_idempotent() {
        let mut session = started();
        session.collect("ancient-key");
        let snap = session.collect("ancient-key");
        assert_eq!(snap.inventory, vec![ObjectId::new("ancient-key")]);
        assert_eq!(snap.collected_objects.len(), 1);
    }

    #[test]
    fn solve_puzzle_is_idempotent() {
        let mut session = started();
        session.solve_puzzle("desk-code");
        let snap = session.solve_puzzle("desk-code");
        assert_eq!(snap.solved_puzzles.len(), 1);
    }

    #[test]
    fn combine_key_and_box() {
        let table = CombinationTable::builtin();
        let mut session = started();
        session.collect("ancient-key");
        session.collect("mysterious-box");

        let (outcome, snap) = session
            .combine(&table, "ancient-key", "mysterious-box")
            .unwrap();

        assert_eq!(outcome.result_item, Some("opened-box".into()));
        assert_eq!(snap.inventory, vec![ObjectId::new("opened-box")]);
        assert!(snap.unlocked_clues.contains(&"hidden-chamber-location".into()));
        // The produced item counts as collected.
        assert!(snap.collected_objects.contains(&"opened-box".into()));
    }

    #[test]
    fn combine_is_symmetric() {
        let table = CombinationTable::builtin();

        let mut forward = started();
        forward.collect("ancient-key");
        forward.collect("mysterious-box");
        let (out_fwd, snap_fwd) = forward
            .combine(&table, "ancient-key", "mysterious-box")
            .unwrap();

        let mut reverse = started();
        reverse.collect("ancient-key");
        reverse.collect("mysterious-box");
        let (out_rev, snap_rev) = reverse
            .combine(&table, "mysterious-box", "ancient-key")
            .unwrap();

        assert_eq!(out_fwd.result_item, out_rev.result_item);
        assert_eq!(out_fwd.unlocked_clues, out_rev.unlocked_clues);
        assert_eq!(snap_fwd.inventory, snap_rev.inventory);
    }

    #[test]
    fn self_combination_fails_without_mutation() {
        let table = CombinationTable::builtin();
        let mut session = started();
        session.collect("hammer");

        let err = session.combine(&table, "hammer", "hammer").unwrap_err();
        assert!(matches!(err, EngineError::SelfCombination(_)));
        assert!(err.is_invalid_combination());
        assert_eq!(session.inventory(), [ObjectId::new("hammer")]);
    }

    #[test]
    fn combine_requires_both_in_inventory() {
        let table = CombinationTable::builtin();
        let mut session = started();
        session.collect("ancient-key");

        let err = session
            .combine(&table, "ancient-key", "mysterious-box")
            .unwrap_err();
        assert!(matches!(err, EngineError::ItemNotInInventory(_)));
        assert_eq!(session.inventory(), [ObjectId::new("ancient-key")]);
    }

    #[test]
    fn combine_unknown_pair_fails() {
        let table = CombinationTable::builtin();
        let mut session = started();
        session.collect("hammer");
        session.collect("rope");

        let err = session.combine(&table, "hammer", "rope").unwrap_err();
        assert!(matches!(err, EngineError::NoCombinationRule(_, _)));
        assert_eq!(session.inventory().len(), 2);
    }

    #[test]
    fn room_object_must_be_examined_first() {
        let table = CombinationTable::builtin();
        let mut session = started();
        session.collect("rusty-key");

        let err = session
            .combine_with_room_object(&table, "rusty-key", "locked-drawer")
            .unwrap_err();
        assert!(matches!(err, EngineError::ObjectNotExamined(_)));

        session.examine("locked-drawer");
        let (outcome, snap) = session
            .combine_with_room_object(&table, "rusty-key", "locked-drawer")
            .unwrap();
        assert_eq!(outcome.result_item, Some("drawer-contents".into()));
        assert!(snap.unlocked_clues.contains(&"safe-combination".into()));
    }

    #[test]
    fn clue_union_is_idempotent() {
        let table = CombinationTable::from_rules([
            CombinationRule::new("a", "b", "one").unlocks(["shared-clue"]),
            CombinationRule::new("c", "d", "two").unlocks(["shared-clue"]),
        ]);
        let mut session = started();
        for item in ["a", "b", "c", "d"] {
            session.collect(item);
        }
        session.combine(&table, "a", "b").unwrap();
        let (_, snap) = session.combine(&table, "c", "d").unwrap();
        assert_eq!(snap.unlocked_clues, vec![ClueId::new("shared-clue")]);
    }

    #[test]
    fn hint_counter_and_cooldown() {
        let mut session = started();
        assert!(session.can_request_hint(Utc::now()));

        let before = Utc::now();
        let snap = session.request_hint();
        let after = Utc::now();

        assert_eq!(snap.hints_used, 1);
        let until = snap.hint_cooldown_until.unwrap();
        assert!(until >= before + Duration::seconds(HINT_COOLDOWN_SECS));
        assert!(until <= after + Duration::seconds(HINT_COOLDOWN_SECS));
        assert!(!session.can_request_hint(Utc::now()));
        assert!(session.can_request_hint(Utc::now() + Duration::seconds(31)));
    }

    #[test]
    fn complete_captures_summary_before_reset() {
        let mut session = started();
        session.request_hint();
        session.request_hint();

        let summary = session.complete().unwrap();
        assert_eq!(summary.room_id, "abandoned-mansion".into());
        assert_eq!(summary.hints_used, 2);

        // Reset happened after the capture.
        assert!(session.current_room().is_none());
        assert_eq!(session.hints_used(), 0);
    }

    #[test]
    fn complete_without_room_fails() {
        let mut session = GameSession::new();
        assert!(matches!(
            session.complete(),
            Err(EngineError::NoActiveRoom)
        ));
    }

    #[test]
    fn snapshot_is_a_copy() {
        let mut session = started();
        session.collect("ancient-key");

        let mut snap = session.snapshot();
        snap.inventory.clear();

        assert_eq!(session.inventory().len(), 1);
    }

    proptest! {
        #[test]
        fn examine_idempotent_for_any_id(id in "[a-z][a-z-]{0,20}") {
            let mut session = started();
            let once = session.examine(id.as_str());
            let twice = session.examine(id.as_str());
            prop_assert_eq!(once.examined_objects, twice.examined_objects);
        }

        #[test]
        fn collect_idempotent_for_any_id(id in "[a-z][a-z-]{0,20}") {
            let mut session = started();
            let once = session.collect(id.as_str());
            let twice = session.collect(id.as_str());
            prop_assert_eq!(once.inventory, twice.inventory);
            prop_assert_eq!(once.collected_objects, twice.collected_objects);
        }

        #[test]
        fn self_combination_always_fails(id in "[a-z][a-z-]{0,20}") {
            let table = CombinationTable::builtin();
            let mut session = started();
            session.collect(id.as_str());
            let before = session.snapshot();
            let result = session.combine(&table, id.as_str(), id.as_str());
            prop_assert!(result.is_err());
            prop_assert_eq!(before, session.snapshot());
        }
    }
}
