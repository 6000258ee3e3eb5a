//! Engine configuration.
//!
//! Rule constants live here rather than inside the operations so a session
//! can load house rules at startup. `EngineConfig::default()` is the
//! standard rule set.

use serde::{Deserialize, Serialize};

/// How equal initiatives are ordered.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TieBreak {
    /// Characters before summons before monsters, then the lower secondary
    /// initiative, then the lower entity id.
    #[default]
    CharactersFirst,
    /// Lower entity id only.
    EntityId,
}

/// Thresholds for the advisory exhaustion-risk classification.
///
/// Never used for rule enforcement.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskThresholds {
    /// Health at or below this is critical.
    pub critical_health: i32,
    /// Health at or below this percentage of max health is a warning.
    pub warning_health_percent: u32,
    /// Hand plus discard at or below this is critical.
    pub critical_cards: usize,
    /// Hand plus discard at or below this is a warning.
    pub warning_cards: usize,
}

impl Default for RiskThresholds {
    fn default() -> Self {
        Self {
            critical_health: 1,
            warning_health_percent: 33,
            critical_cards: 3,
            warning_cards: 5,
        }
    }
}

/// Engine rule configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Minimum discard pile size required to rest.
    pub min_rest_discard: usize,

    /// A character with fewer cards than this in hand cannot play a turn.
    pub min_playable_hand: usize,

    /// Health restored by a long rest (capped at max health).
    pub long_rest_heal: i32,

    /// Damage taken when rerolling a short rest.
    pub reroll_damage: i32,

    /// Advisory risk thresholds.
    pub risk: RiskThresholds,

    /// Ordering rule for equal initiatives.
    pub tie_break: TieBreak,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            min_rest_discard: 2,
            min_playable_hand: 2,
            long_rest_heal: 2,
            reroll_damage: 1,
            risk: RiskThresholds::default(),
            tie_break: TieBreak::default(),
        }
    }
}

impl EngineConfig {
    /// Set the health restored by a long rest.
    #[must_use]
    pub fn with_long_rest_heal(mut self, heal: i32) -> Self {
        self.long_rest_heal = heal;
        self
    }

    /// Set the damage taken on a short-rest reroll.
    #[must_use]
    pub fn with_reroll_damage(mut self, damage: i32) -> Self {
        self.reroll_damage = damage;
        self
    }

    /// Set the minimum discard size for resting.
    #[must_use]
    pub fn with_min_rest_discard(mut self, cards: usize) -> Self {
        self.min_rest_discard = cards;
        self
    }

    /// Set the initiative tie-break rule.
    #[must_use]
    pub fn with_tie_break(mut self, tie_break: TieBreak) -> Self {
        self.tie_break = tie_break;
        self
    }

    /// Set the advisory risk thresholds.
    #[must_use]
    pub fn with_risk(mut self, risk: RiskThresholds) -> Self {
        self.risk = risk;
        self
    }
}
