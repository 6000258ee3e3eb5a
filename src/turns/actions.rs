//! Card actions within a character's turn.
//!
//! Each round a character selects two ability cards. On their turn they use
//! the top half of one and the bottom half of the other:
//!
//! 1. `select_cards` before the round (cards stay in hand)
//! 2. `initiate_action(card, position)` marks the pending action
//! 3. `use_action(disposition)` or `skip_action()` commits it and moves the
//!    card out of hand
//! 4. The second action must name the other card and the other half
//! 5. `end_turn` clears the per-turn state; piles are left alone
//!
//! All functions are pure: they return a new record or an error.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::character::CharacterRecord;
use crate::core::{CardId, EngineError, Result};

/// Which half of an ability card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionPosition {
    Top,
    Bottom,
}

impl ActionPosition {
    /// The other half.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Top => Self::Bottom,
            Self::Bottom => Self::Top,
        }
    }
}

impl std::fmt::Display for ActionPosition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Top => f.write_str("top"),
            Self::Bottom => f.write_str("bottom"),
        }
    }
}

/// Where a card goes once its action is used.
///
/// Supplied by the card catalog: most actions discard, some are lost, some
/// stay in play as persistent effects.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CardDisposition {
    #[default]
    Discard,
    Lost,
    Persistent,
}

/// The two cards chosen for this round.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectedCards {
    /// Card whose initiative places the character in the turn order.
    pub leading: CardId,
    /// The other card; its initiative breaks ties.
    pub supporting: CardId,
}

impl SelectedCards {
    /// Check if a card is one of the two.
    #[must_use]
    pub fn contains(&self, card: CardId) -> bool {
        self.leading == card || self.supporting == card
    }
}

/// An action chosen but not yet committed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingAction {
    pub card: CardId,
    pub position: ActionPosition,
}

/// Per-turn card state on a character.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnCards {
    pub selected: Option<SelectedCards>,
    pub pending: Option<PendingAction>,
    pub used_top_action: bool,
    pub used_bottom_action: bool,
    pub used_card: Option<CardId>,
}

impl TurnCards {
    /// Check if any action has been chosen or used this turn.
    #[must_use]
    pub fn in_progress(&self) -> bool {
        self.pending.is_some() || self.used_top_action || self.used_bottom_action
    }

    /// Check if both actions have been used.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.used_top_action && self.used_bottom_action
    }

    fn slot_used(&self, position: ActionPosition) -> bool {
        match position {
            ActionPosition::Top => self.used_top_action,
            ActionPosition::Bottom => self.used_bottom_action,
        }
    }
}

fn ensure_playable(record: &CharacterRecord) -> Result<()> {
    if record.is_exhausted() {
        return Err(EngineError::CharacterExhausted { character: record.id });
    }
    Ok(())
}

/// Choose the two cards for this round.
///
/// # Errors
///
/// - `CharacterExhausted` if exhausted
/// - `AlreadyResting` if a rest is pending or declared
/// - `TurnInProgress` if an action was already chosen or used
/// - `DuplicateSelection` if both cards are the same
/// - `CardNotInHand` if either card is not in hand
pub fn select_cards(record: &CharacterRecord, leading: CardId, supporting: CardId) -> Result<CharacterRecord> {
    ensure_playable(record)?;
    if record.is_resting() {
        return Err(EngineError::AlreadyResting { character: record.id });
    }
    if record.turn.in_progress() {
        return Err(EngineError::TurnInProgress { character: record.id });
    }
    if leading == supporting {
        return Err(EngineError::DuplicateSelection { character: record.id });
    }
    for card in [leading, supporting] {
        if !record.hand.contains(&card) {
            return Err(EngineError::CardNotInHand { character: record.id, card });
        }
    }

    let mut next = record.clone();
    next.turn = TurnCards {
        selected: Some(SelectedCards { leading, supporting }),
        ..TurnCards::default()
    };
    debug!(character = %record.id, %leading, %supporting, "cards selected");
    Ok(next)
}

/// Choose which card half to use next.
///
/// # Errors
///
/// - `NoSelection` if no cards were selected
/// - `CardNotSelected` if the card is not one of the two
/// - `ActionPending` if another action awaits commit
/// - `CardAlreadyUsed` if this card's action was already used
/// - `ActionSlotUsed` if that half was already used this turn
/// - `CardNotInHand` if the card has left the hand
pub fn initiate_action(record: &CharacterRecord, card: CardId, position: ActionPosition) -> Result<CharacterRecord> {
    ensure_playable(record)?;
    let selected = record
        .turn
        .selected
        .ok_or(EngineError::NoSelection { character: record.id })?;
    if !selected.contains(card) {
        return Err(EngineError::CardNotSelected { character: record.id, card });
    }
    if record.turn.pending.is_some() {
        return Err(EngineError::ActionPending { character: record.id });
    }
    if record.turn.used_card == Some(card) {
        return Err(EngineError::CardAlreadyUsed { character: record.id, card });
    }
    if record.turn.slot_used(position) {
        return Err(EngineError::ActionSlotUsed { character: record.id, position });
    }
    if !record.hand.contains(&card) {
        return Err(EngineError::CardNotInHand { character: record.id, card });
    }

    let mut next = record.clone();
    next.turn.pending = Some(PendingAction { card, position });
    Ok(next)
}

/// Commit the pending action and move its card to `disposition`.
///
/// # Errors
///
/// `NoPendingAction` if nothing was initiated.
pub fn use_action(record: &CharacterRecord, disposition: CardDisposition) -> Result<CharacterRecord> {
    ensure_playable(record)?;
    let pending = record
        .turn
        .pending
        .ok_or(EngineError::NoPendingAction { character: record.id })?;
    let index = record
        .hand
        .index_of(&pending.card)
        .ok_or(EngineError::CardNotInHand { character: record.id, card: pending.card })?;

    let mut next = record.clone();
    let card = next.hand.remove(index);
    match disposition {
        CardDisposition::Discard => next.discard_pile.push_back(card),
        CardDisposition::Lost => next.lost_pile.push_back(card),
        CardDisposition::Persistent => next.active_effects.push_back(card),
    }

    match pending.position {
        ActionPosition::Top => next.turn.used_top_action = true,
        ActionPosition::Bottom => next.turn.used_bottom_action = true,
    }
    next.turn.used_card = Some(card);
    next.turn.pending = None;

    debug!(
        character = %record.id,
        %card,
        position = %pending.position,
        ?disposition,
        "card action used"
    );
    Ok(next)
}

/// Commit the pending action without performing it. The card is discarded.
///
/// # Errors
///
/// Same as [`use_action`].
pub fn skip_action(record: &CharacterRecord) -> Result<CharacterRecord> {
    use_action(record, CardDisposition::Discard)
}

/// Clear the per-turn selection and flags.
///
/// # Errors
///
/// `CharacterExhausted` if exhausted.
pub fn end_turn(record: &CharacterRecord) -> Result<CharacterRecord> {
    ensure_playable(record)?;
    let mut next = record.clone();
    next.turn = TurnCards::default();
    Ok(next)
}
