//! Room definitions: objects, puzzles, lock and completion status.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::id::{ObjectId, PuzzleId, RoomId};
use crate::item::Item;
use crate::puzzle::Puzzle;

/// Intended challenge level of a room.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    /// Suitable for first-time players.
    Easy,
    /// The standard experience.
    Medium,
    /// Demands note-taking.
    Hard,
    /// For veterans only.
    Expert,
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Hard => "hard",
            Self::Expert => "expert",
        };
        write!(f, "{name}")
    }
}

/// A single escape room: its objects, puzzles, and completion record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Room {
    /// Stable identifier.
    pub id: RoomId,
    /// Display name.
    pub name: String,
    /// Scene-setting description.
    #[serde(default)]
    pub description: String,
    /// Challenge level.
    pub difficulty: Difficulty,
    /// Objects placed in the room.
    #[serde(default)]
    pub objects: Vec<Item>,
    /// Puzzles blocking escape.
    #[serde(default)]
    pub puzzles: Vec<Puzzle>,
    /// Whether the room is locked (not yet reachable).
    #[serde(default)]
    pub is_locked: bool,
    /// Whether the room has ever been completed.
    #[serde(default)]
    pub is_completed: bool,
    /// Fastest completion in seconds, if any.
    #[serde(default)]
    pub best_time_secs: Option<u64>,
    /// Room unlocked when this one is completed.
    #[serde(default)]
    pub unlocks: Option<RoomId>,
}

impl Room {
    /// Create a new unlocked, empty room.
    pub fn new(id: impl Into<RoomId>, name: impl Into<String>, difficulty: Difficulty) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            difficulty,
            objects: Vec::new(),
            puzzles: Vec::new(),
            is_locked: false,
            is_completed: false,
            best_time_secs: None,
            unlocks: None,
        }
    }

    /// Set the description.
    pub fn with_description(mut self, text: impl Into<String>) -> Self {
        self.description = text.into();
        self
    }

    /// Add an object.
    pub fn with_object(mut self, item: Item) -> Self {
        self.objects.push(item);
        self
    }

    /// Add a puzzle.
    pub fn with_puzzle(mut self, puzzle: Puzzle) -> Self {
        self.puzzles.push(puzzle);
        self
    }

    /// Mark the room as initially locked.
    pub fn locked(mut self) -> Self {
        self.is_locked = true;
        self
    }

    /// Set the room unlocked on completion.
    pub fn unlocks(mut self, next: impl Into<RoomId>) -> Self {
        self.unlocks = Some(next.into());
        self
    }

    /// Look up an object by id.
    pub fn object(&self, id: &ObjectId) -> CoreResult<&Item> {
        self.objects
            .iter()
            .find(|o| o.id == *id)
            .ok_or_else(|| CoreError::ObjectNotFound {
                room: self.id.clone(),
                object: id.clone(),
            })
    }

    /// Look up an object by id, mutably.
    pub fn object_mut(&mut self, id: &ObjectId) -> CoreResult<&mut Item> {
        let room = self.id.clone();
        self.objects
            .iter_mut()
            .find(|o| o.id == *id)
            .ok_or(CoreError::ObjectNotFound {
                room,
                object: id.clone(),
            })
    }

    /// Look up a puzzle by id.
    pub fn puzzle(&self, id: &PuzzleId) -> CoreResult<&Puzzle> {
        self.puzzles
            .iter()
            .find(|p| p.id == *id)
            .ok_or_else(|| CoreError::PuzzleNotFound {
                room: self.id.clone(),
                puzzle: id.clone(),
            })
    }

    /// Look up a puzzle by id, mutably.
    pub fn puzzle_mut(&mut self, id: &PuzzleId) -> CoreResult<&mut Puzzle> {
        let room = self.id.clone();
        self.puzzles
            .iter_mut()
            .find(|p| p.id == *id)
            .ok_or(CoreError::PuzzleNotFound {
                room,
                puzzle: id.clone(),
            })
    }

    /// True when every puzzle in the room is solved.
    pub fn all_puzzles_solved(&self) -> bool {
        self.puzzles.iter().all(|p| p.is_solved)
    }
}
