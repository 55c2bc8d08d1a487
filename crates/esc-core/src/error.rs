//! Error types for the content model.

use crate::id::{ObjectId, PuzzleId, RoomId};

/// Alias for `Result<T, CoreError>`.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors that can occur when reading or mutating room content.
///
/// Identifier lookups that fail indicate a content-integrity problem
/// (a rule or caller naming something the room does not define); they
/// are recoverable and never leave partial mutations behind.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// The requested room id does not exist in the store.
    #[error("room not found: {0}")]
    RoomNotFound(RoomId),

    /// The requested object id does not exist in the given room.
    #[error("object not found: {object} in room {room}")]
    ObjectNotFound {
        /// The room that was searched.
        room: RoomId,
        /// The missing object id.
        object: ObjectId,
    },

    /// The requested puzzle id does not exist in the given room.
    #[error("puzzle not found: {puzzle} in room {room}")]
    PuzzleNotFound {
        /// The room that was searched.
        room: RoomId,
        /// The missing puzzle id.
        puzzle: PuzzleId,
    },

    /// Two rooms in the store share the same id.
    #[error("duplicate room id: {0}")]
    DuplicateRoom(RoomId),

    /// A room file could not be parsed.
    #[error("invalid room content: {0}")]
    Json(#[from] serde_json::Error),

    /// A room file could not be read.
    #[error("content io error: {0}")]
    Io(#[from] std::io::Error),
}
