//! Error types for engine operations.
//!
//! Every error here is recoverable: a failed operation is surfaced to
//! the caller and leaves session state exactly as it was.

use esc_core::{CoreError, ObjectId, RoomId};
use thiserror::Error;

/// Result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

/// Errors that can occur during a playthrough.
#[derive(Debug, Error)]
pub enum EngineError {
    /// A combination names an item the player is not holding.
    #[error("{0} is not in your inventory")]
    ItemNotInInventory(ObjectId),

    /// A combination pairs an item with itself.
    #[error("cannot combine {0} with itself")]
    SelfCombination(ObjectId),

    /// No rule exists for the requested pair.
    #[error("{0} and {1} cannot be combined")]
    NoCombinationRule(ObjectId, ObjectId),

    /// A room object must be examined before an item can be used on it.
    #[error("{0} has not been examined yet")]
    ObjectNotExamined(ObjectId),

    /// A submitted answer does not match the puzzle's solution shape.
    #[error("expected a {expected} answer, got {got}")]
    SolutionShapeMismatch {
        /// The puzzle's declared type.
        expected: &'static str,
        /// Description of what was submitted.
        got: String,
    },

    /// A session operation that needs a room was called before `start`.
    #[error("no active room")]
    NoActiveRoom,

    /// The room is locked and cannot be played yet.
    #[error("room {0} is locked")]
    RoomLocked(RoomId),

    /// Player input could not be parsed into a command.
    #[error("unknown command: {0}")]
    UnknownCommand(String),

    /// Content lookup failure from the room store.
    #[error("content error: {0}")]
    Content(#[from] CoreError),
}

impl EngineError {
    /// True for the combination-precondition failures a play loop
    /// should report and carry on from.
    pub fn is_invalid_combination(&self) -> bool {
        matches!(
            self,
            Self::ItemNotInInventory(_)
                | Self::SelfCombination(_)
                | Self::NoCombinationRule(_, _)
                | Self::ObjectNotExamined(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_combination_classification() {
        assert!(EngineError::SelfCombination("hammer".into()).is_invalid_combination());
        assert!(
            EngineError::NoCombinationRule("hammer".into(), "rope".into())
                .is_invalid_combination()
        );
        assert!(!EngineError::NoActiveRoom.is_invalid_combination());
    }

    #[test]
    fn messages_name_the_items() {
        let err = EngineError::ItemNotInInventory("rusty-key".into());
        assert_eq!(err.to_string(), "rusty-key is not in your inventory");
    }
}
