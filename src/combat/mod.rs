//! Combat resolution.
//!
//! - `damage`: pure damage arithmetic (modifier, shield, pierce, retaliate)
//! - `attack`: one full attack against a modifier deck

pub mod attack;
pub mod damage;

pub use attack::{resolve_attack, AttackMode, AttackOutcome, AttackRequest};
pub use damage::{apply_pierce, apply_retaliate, apply_shield, calculate_damage, extract_effects};
