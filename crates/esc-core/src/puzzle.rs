//! Puzzles and their typed solution shapes.
//!
//! Each puzzle type carries its own solution shape as an enum variant,
//! so the evaluator can match exhaustively; adding a new puzzle type
//! is a compile error until every consumer handles it.

use serde::{Deserialize, Serialize};

use crate::id::{ObjectId, PuzzleId};

/// The expected solution of a puzzle, tagged by puzzle type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Solution {
    /// An exact code string (keypad digits, safe combination).
    Code(String),
    /// An ordered arrangement of symbols that must match element-for-element.
    Pattern(Vec<String>),
    /// An ordered sequence of steps that must match element-for-element.
    Sequence(Vec<String>),
    /// An exact grid coordinate pair.
    Coordinates {
        /// Horizontal coordinate.
        x: i64,
        /// Vertical coordinate.
        y: i64,
    },
    /// Free-text answer compared case-insensitively with whitespace trimmed.
    Riddle(String),
}

impl Solution {
    /// Human-readable name of the puzzle type, for prompts and errors.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Code(_) => "code",
            Self::Pattern(_) => "pattern",
            Self::Sequence(_) => "sequence",
            Self::Coordinates { .. } => "coordinates",
            Self::Riddle(_) => "riddle",
        }
    }
}

/// A puzzle within a room.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Puzzle {
    /// Stable identifier.
    pub id: PuzzleId,
    /// Display name.
    pub name: String,
    /// Text presented to the player when attempting the puzzle.
    #[serde(default)]
    pub prompt: String,
    /// The expected solution, tagged by puzzle type.
    pub solution: Solution,
    /// Objects that must be examined or collected before this puzzle
    /// can be attempted.
    #[serde(default)]
    pub required_objects: Vec<ObjectId>,
    /// Ordered hints, from vague to explicit.
    #[serde(default)]
    pub hints: Vec<String>,
    /// Text shown when the puzzle is solved.
    #[serde(default)]
    pub reward_text: Option<String>,
    /// Whether the puzzle has been solved in the current playthrough.
    #[serde(default)]
    pub is_solved: bool,
}

impl Puzzle {
    /// Create a new unsolved puzzle with no requirements or hints.
    pub fn new(id: impl Into<PuzzleId>, name: impl Into<String>, solution: Solution) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            prompt: String::new(),
            solution,
            required_objects: Vec::new(),
            hints: Vec::new(),
            reward_text: None,
            is_solved: false,
        }
    }

    /// Set the prompt text.
    pub fn with_prompt(mut self, text: impl Into<String>) -> Self {
        self.prompt = text.into();
        self
    }

    /// Set the required objects.
    pub fn requires<I>(mut self, ids: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<ObjectId>,
    {
        self.required_objects = ids.into_iter().map(Into::into).collect();
        self
    }

    /// Set the ordered hint list.
    pub fn with_hints<I>(mut self, hints: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.hints = hints.into_iter().map(Into::into).collect();
        self
    }

    /// Set the reward text.
    pub fn with_reward(mut self, text: impl Into<String>) -> Self {
        self.reward_text = Some(text.into());
        self
    }

    /// The hint at the given escalation level, clamped to the last hint.
    ///
    /// Returns `None` only when the puzzle has no hints at all.
    pub fn hint_at(&self, level: usize) -> Option<&str> {
        if self.hints.is_empty() {
            return None;
        }
        let idx = level.min(self.hints.len() - 1);
        self.hints.get(idx).map(String::as_str)
    }
}
