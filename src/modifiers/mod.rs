//! Attack modifier system: cards, decks, advantage.
//!
//! ## Key Types
//!
//! - `Modifier`: Closed card value (Integer, Miss, Critical)
//! - `AttackModifierCard`: A card with reshuffle/temporary flags and riders
//! - `ModifierDeck`: Draw and discard piles with reshuffle semantics
//!
//! Advantage and disadvantage are free functions over a drawn pair.

pub mod advantage;
pub mod card;
pub mod deck;

pub use advantage::{apply_advantage, apply_disadvantage};
pub use card::{compare_modifiers, standard_composition, AttackModifierCard, Modifier, STANDARD_DECK_SIZE};
pub use deck::ModifierDeck;
