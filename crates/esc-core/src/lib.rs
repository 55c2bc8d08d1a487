//! Core content model for Escapade: rooms, items, puzzles, and clues.
//!
//! This crate defines the data that escape rooms are made of. It is
//! independent of the play engine; you can construct a [`RoomStore`]
//! programmatically or deserialize room files from JSON.

/// Error types used throughout the crate.
pub mod error;
/// Newtype identifiers for rooms, objects, puzzles, and clues.
pub mod id;
/// Items and scenery objects found in rooms.
pub mod item;
/// Puzzles and their typed solution shapes.
pub mod puzzle;
/// Room definitions: objects, puzzles, lock and completion status.
pub mod room;
/// The room store that owns all room content.
pub mod store;

/// Re-export error types.
pub use error::{CoreError, CoreResult};
/// Re-export identifier types.
pub use id::{ClueId, ObjectId, PuzzleId, RoomId};
/// Re-export item types.
pub use item::{Item, ItemCategory};
/// Re-export puzzle types.
pub use puzzle::{Puzzle, Solution};
/// Re-export room types.
pub use room::{Difficulty, Room};
/// Re-export the room store.
pub use store::RoomStore;
