//! Engine error taxonomy.
//!
//! Every rejected operation returns an [`EngineError`] and leaves its input
//! untouched. Errors are grouped by [`ErrorKind`] so the session layer can
//! translate them into user-facing text without matching every variant.

use thiserror::Error;

use super::entity::{CardId, EntityId};
use crate::turns::ActionPosition;

/// Classification of an engine error.
///
/// - **Validation**: the request references something that is not there or
///   asks for something the rules do not allow right now
/// - **Conflict**: the request repeats something already done this turn
/// - **State**: the character is in the wrong lifecycle state entirely
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Invalid input for the current state.
    Validation,
    /// Repeats an action that may only happen once.
    Conflict,
    /// Operation not permitted in the character's lifecycle state.
    State,
}

impl ErrorKind {
    /// Returns a stable lowercase name for this kind.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Validation => "validation",
            Self::Conflict => "conflict",
            Self::State => "state",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors produced by engine operations.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("modifier deck of {owner} is empty")]
    EmptyDeck { owner: EntityId },

    #[error("modifier deck of {owner} cannot supply {needed} cards ({available} available)")]
    NotEnoughModifiers {
        owner: EntityId,
        needed: usize,
        available: usize,
    },

    #[error("{character} needs at least {required} discarded cards to rest ({available} in discard)")]
    InsufficientDiscard {
        character: EntityId,
        required: usize,
        available: usize,
    },

    #[error("{character} cannot reroll at {health} health: the damage would exhaust them")]
    LethalReroll { character: EntityId, health: i32 },

    #[error("{card} is not in the discard pile of {character}")]
    CardNotInDiscard { character: EntityId, card: CardId },

    #[error("{card} is not in the hand of {character}")]
    CardNotInHand { character: EntityId, card: CardId },

    #[error("{card} is not one of the cards {character} selected this round")]
    CardNotSelected { character: EntityId, card: CardId },

    #[error("{character} must select two different cards")]
    DuplicateSelection { character: EntityId },

    #[error("{character} has no selected cards")]
    NoSelection { character: EntityId },

    #[error("{character} has no pending action")]
    NoPendingAction { character: EntityId },

    #[error("{character} has no short rest in progress")]
    NoShortRest { character: EntityId },

    #[error("{entity} is not in the turn order")]
    NotInTurnOrder { entity: EntityId },

    #[error("{character} already used an action from {card}")]
    CardAlreadyUsed { character: EntityId, card: CardId },

    #[error("{character} already used a {position} action this turn")]
    ActionSlotUsed {
        character: EntityId,
        position: ActionPosition,
    },

    #[error("{character} already has an action pending")]
    ActionPending { character: EntityId },

    #[error("{character} already rerolled this short rest")]
    AlreadyRerolled { character: EntityId },

    #[error("{character} is already resting")]
    AlreadyResting { character: EntityId },

    #[error("{character} cannot change card selection mid-turn")]
    TurnInProgress { character: EntityId },

    #[error("{character} is exhausted")]
    CharacterExhausted { character: EntityId },

    #[error("{character} is not exhausted")]
    NotExhausted { character: EntityId },
}

impl EngineError {
    /// Classify this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::EmptyDeck { .. }
            | Self::NotEnoughModifiers { .. }
            | Self::InsufficientDiscard { .. }
            | Self::LethalReroll { .. }
            | Self::CardNotInDiscard { .. }
            | Self::CardNotInHand { .. }
            | Self::CardNotSelected { .. }
            | Self::DuplicateSelection { .. }
            | Self::NoSelection { .. }
            | Self::NoPendingAction { .. }
            | Self::NoShortRest { .. }
            | Self::NotInTurnOrder { .. } => ErrorKind::Validation,

            Self::CardAlreadyUsed { .. }
            | Self::ActionSlotUsed { .. }
            | Self::ActionPending { .. }
            | Self::AlreadyRerolled { .. }
            | Self::AlreadyResting { .. }
            | Self::TurnInProgress { .. } => ErrorKind::Conflict,

            Self::CharacterExhausted { .. } | Self::NotExhausted { .. } => ErrorKind::State,
        }
    }

    /// Shorthand for `kind() == ErrorKind::Validation`.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self.kind(), ErrorKind::Validation)
    }

    /// Shorthand for `kind() == ErrorKind::Conflict`.
    #[must_use]
    pub const fn is_conflict(&self) -> bool {
        matches!(self.kind(), ErrorKind::Conflict)
    }

    /// Shorthand for `kind() == ErrorKind::State`.
    #[must_use]
    pub const fn is_state(&self) -> bool {
        matches!(self.kind(), ErrorKind::State)
    }
}

/// Result alias used throughout the engine.
pub type Result<T> = std::result::Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kinds() {
        let c = EntityId::new(1);
        assert!(EngineError::EmptyDeck { owner: c }.is_validation());
        assert!(EngineError::LethalReroll { character: c, health: 1 }.is_validation());
        assert!(EngineError::AlreadyRerolled { character: c }.is_conflict());
        assert!(EngineError::AlreadyResting { character: c }.is_conflict());
        assert!(EngineError::CharacterExhausted { character: c }.is_state());
        assert!(EngineError::NotExhausted { character: c }.is_state());
    }

    #[test]
    fn test_messages() {
        let err = EngineError::CardNotInDiscard {
            character: EntityId::new(2),
            card: CardId::new(14),
        };
        assert_eq!(err.to_string(), "Card(14) is not in the discard pile of Entity(2)");

        let err = EngineError::ActionSlotUsed {
            character: EntityId::new(2),
            position: ActionPosition::Top,
        };
        assert_eq!(err.to_string(), "Entity(2) already used a top action this turn");
    }

    #[test]
    fn test_kind_names() {
        assert_eq!(ErrorKind::Validation.as_str(), "validation");
        assert_eq!(ErrorKind::Conflict.to_string(), "conflict");
        assert_eq!(ErrorKind::State.as_str(), "state");
    }
}
