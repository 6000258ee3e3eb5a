//! Turn sequencing: initiative order, round progression, card actions.
//!
//! ## Key Types
//!
//! - `Participant`: A combatant offered to the order at round start
//! - `TurnOrderEntry`: One slot in the round's order
//! - `TurnSequencer`: Current entity, turn and round advancement
//! - `TurnCards`: A character's selected cards and per-turn action flags
//! - `InitiativeLookup`: Card catalog collaborator

pub mod actions;
pub mod order;
pub mod sequencer;

pub use actions::{
    end_turn, initiate_action, select_cards, skip_action, use_action, ActionPosition, CardDisposition,
    PendingAction, SelectedCards, TurnCards,
};
pub use order::{build_turn_order, InitiativeLookup, Participant, TurnOrderEntry, LONG_REST_INITIATIVE};
pub use sequencer::TurnSequencer;
