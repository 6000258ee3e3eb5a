//! Core engine types: entity ids, errors, RNG, configuration, journal.
//!
//! Everything here is independent of the game rules; the rule modules
//! (`modifiers`, `combat`, `character`, `turns`) build on it.

pub mod config;
pub mod entity;
pub mod error;
pub mod journal;
pub mod rng;

pub use config::{EngineConfig, RiskThresholds, TieBreak};
pub use entity::{CardId, EntityId, EntityKind};
pub use error::{EngineError, ErrorKind, Result};
pub use journal::{Journal, Operation, TransitionRecord};
pub use rng::{GameRng, GameRngState};
