//! Game-state and item-combination engine for Escapade.
//!
//! The engine owns everything that changes during a playthrough: the
//! session state (inventory, examined objects, solved puzzles, clues,
//! hints), the combination rule table and its resolver, and the puzzle
//! evaluator. Room content itself lives in `esc-core` and is only read
//! here; completion results are reported back through the caller.

/// Combination rule table and the pure pair resolver.
pub mod combine;
/// Error types for engine operations.
pub mod error;
/// Player command parsing and object-name resolution.
pub mod parser;
/// An interactive playthrough driver over one room.
pub mod playthrough;
/// Puzzle answers and solution checking.
pub mod puzzle;
/// The mutable per-playthrough session state.
pub mod session;

/// Re-export combination types.
pub use combine::{CombinationOutcome, CombinationRule, CombinationTable};
/// Re-export error types.
pub use error::{EngineError, EngineResult};
/// Re-export the command parser.
pub use parser::{Command, parse_command};
/// Re-export the playthrough driver.
pub use playthrough::Playthrough;
/// Re-export puzzle evaluation types.
pub use puzzle::{Answer, check_solution, requirements_met};
/// Re-export session types.
pub use session::{CompletionSummary, GameSession, SessionId, SessionSnapshot};
