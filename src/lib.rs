//! # crawl-combat
//!
//! Combat resolution and character lifecycle for a cooperative
//! dungeon-crawl board game.
//!
//! ## Design Principles
//!
//! 1. **Pure Transitions**: Every operation takes the current record and
//!    returns a new one, or an error with the input untouched. Nothing is
//!    half-applied.
//!
//! 2. **Recorded Randomness**: Random operations draw a fresh seed from
//!    `GameRng` and store it next to the result, so any shuffle or rest
//!    pick can be replayed.
//!
//! 3. **Explicit Lifecycle**: A character is in exactly one
//!    `LifecycleState`; there are no independent rest flags to drift apart.
//!
//! ## Architecture
//!
//! - **Persistent Data Structures**: Card piles are `im` vectors, so the
//!   old and new record of a transition share storage.
//!
//! - **Caller-Owned Concurrency**: The engine holds no locks. Callers
//!   serialize operations per game room and persist the returned records.
//!
//! ## Modules
//!
//! - `core`: Entity ids, errors, RNG, configuration, journal
//! - `modifiers`: Attack modifier cards, decks, advantage selection
//! - `combat`: Damage arithmetic and attack resolution
//! - `character`: Character records, rests, exhaustion
//! - `turns`: Initiative order, round sequencing, card actions

pub mod character;
pub mod combat;
pub mod core;
pub mod modifiers;
pub mod turns;

// Re-export commonly used types
pub use crate::core::{
    CardId, EngineConfig, EngineError, EntityId, EntityKind, ErrorKind, GameRng, GameRngState, Journal, Operation,
    Result, RiskThresholds, TieBreak, TransitionRecord,
};

pub use crate::modifiers::{apply_advantage, apply_disadvantage, AttackModifierCard, Modifier, ModifierDeck};

pub use crate::combat::{
    apply_pierce, apply_retaliate, apply_shield, calculate_damage, extract_effects, resolve_attack, AttackMode,
    AttackOutcome, AttackRequest,
};

pub use crate::character::{
    is_party_exhausted, CharacterLifecycle, CharacterRecord, Condition, ExhaustionReason, ExhaustionRisk,
    LifecycleState, RestKind, ShortRestState,
};

pub use crate::turns::{
    build_turn_order, end_turn, initiate_action, select_cards, skip_action, use_action, ActionPosition,
    CardDisposition, InitiativeLookup, Participant, TurnOrderEntry, TurnSequencer,
};
