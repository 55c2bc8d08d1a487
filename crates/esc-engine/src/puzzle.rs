//! Puzzle answers and solution checking.
//!
//! Answers mirror the solution shapes one-to-one and the checker
//! matches exhaustively, so a new puzzle type cannot slip through
//! unhandled. There is no partial credit: a near-miss is a miss.

use serde::{Deserialize, Serialize};

use esc_core::{Puzzle, Solution};

use crate::error::{EngineError, EngineResult};
use crate::session::GameSession;

/// A submitted puzzle answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Answer {
    /// A code string.
    Code(String),
    /// An ordered arrangement of symbols.
    Pattern(Vec<String>),
    /// An ordered sequence of steps.
    Sequence(Vec<String>),
    /// A grid coordinate pair.
    Coordinates {
        /// Horizontal coordinate.
        x: i64,
        /// Vertical coordinate.
        y: i64,
    },
    /// Free text.
    Text(String),
}

impl Answer {
    /// Human-readable name of the answer shape.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Code(_) => "code",
            Self::Pattern(_) => "pattern",
            Self::Sequence(_) => "sequence",
            Self::Coordinates { .. } => "coordinates",
            Self::Text(_) => "text",
        }
    }

    /// Build an answer from raw player text, shaped by the expected
    /// solution. Rejects input that cannot take the required shape
    /// (e.g. non-numeric coordinates) without consulting the solution
    /// values themselves.
    pub fn parse(expected: &Solution, raw: &str) -> EngineResult<Self> {
        let raw = raw.trim();
        match expected {
            Solution::Code(_) => Ok(Self::Code(raw.to_string())),
            Solution::Pattern(_) => Ok(Self::Pattern(split_elements(raw))),
            Solution::Sequence(_) => Ok(Self::Sequence(split_elements(raw))),
            Solution::Coordinates { .. } => {
                let parts: Vec<&str> = raw
                    .split(|c: char| c == ',' || c.is_whitespace())
                    .filter(|p| !p.is_empty())
                    .collect();
                let (x, y) = match parts.as_slice() {
                    [x, y] => (x.parse::<i64>(), y.parse::<i64>()),
                    _ => {
                        return Err(EngineError::SolutionShapeMismatch {
                            expected: "coordinates",
                            got: raw.to_string(),
                        });
                    }
                };
                match (x, y) {
                    (Ok(x), Ok(y)) => Ok(Self::Coordinates { x, y }),
                    _ => Err(EngineError::SolutionShapeMismatch {
                        expected: "coordinates",
                        got: raw.to_string(),
                    }),
                }
            }
            Solution::Riddle(_) => Ok(Self::Text(raw.to_string())),
        }
    }
}

/// Split a pattern/sequence submission on commas or whitespace.
fn split_elements(raw: &str) -> Vec<String> {
    raw.split(|c: char| c == ',' || c.is_whitespace())
        .filter(|p| !p.is_empty())
        .map(str::to_string)
        .collect()
}

/// Check a submitted answer against a puzzle solution.
///
/// Returns `Ok(false)` for a wrong answer of the right shape and
/// `Err(SolutionShapeMismatch)` when the shape itself is wrong, so
/// malformed submissions are distinguishable from near-misses.
pub fn check_solution(solution: &Solution, answer: &Answer) -> EngineResult<bool> {
    match (solution, answer) {
        (Solution::Code(expected), Answer::Code(got)) => Ok(expected == got),
        (Solution::Pattern(expected), Answer::Pattern(got)) => Ok(expected == got),
        (Solution::Sequence(expected), Answer::Sequence(got)) => Ok(expected == got),
        (
            Solution::Coordinates { x, y },
            Answer::Coordinates { x: gx, y: gy },
        ) => Ok(x == gx && y == gy),
        (Solution::Riddle(expected), Answer::Text(got)) => {
            Ok(expected.trim().eq_ignore_ascii_case(got.trim()))
        }
        (expected, got) => Err(EngineError::SolutionShapeMismatch {
            expected: expected.kind(),
            got: got.kind().to_string(),
        }),
    }
}

/// True when every object the puzzle requires has been examined or
/// collected this session. Reachability is the caller's gate; the
/// checker above assumes it has already passed.
pub fn requirements_met(puzzle: &Puzzle, session: &GameSession) -> bool {
    puzzle
        .required_objects
        .iter()
        .all(|obj| session.has_examined(obj) || session.holds(obj))
}
