//! Character records and their rest/exhaustion lifecycle.
//!
//! ## Key Types
//!
//! - `CharacterRecord`: Health, card piles, conditions, lifecycle state
//! - `LifecycleState`: Active, resting, or exhausted
//! - `CharacterLifecycle`: Rest and exhaustion rules bound to an `EngineConfig`

pub mod exhaustion;
pub mod record;
pub mod rest;

pub use exhaustion::{is_party_exhausted, ExhaustionRisk};
pub use record::{
    BoardPosition, CharacterRecord, Condition, ExhaustionReason, LifecycleState, RestKind, ShortRestState,
};
pub use rest::CharacterLifecycle;
