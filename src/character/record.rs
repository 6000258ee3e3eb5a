//! Character records: health, ability-card piles, lifecycle state.
//!
//! A `CharacterRecord` is the plain snapshot the session layer hands to the
//! engine and receives back. Piles are `im` vectors so every transition is a
//! cheap copy and the caller can diff old against new.
//!
//! ## Card Conservation
//!
//! `hand ∪ discard ∪ lost ∪ active_effects` always equals the character's
//! full ability deck. Cards selected for the round stay in hand until their
//! action is used. [`CharacterRecord::conserves_cards`] checks the multiset.
//!
//! ## Lifecycle
//!
//! Rest and exhaustion flags are one enum, [`LifecycleState`], so a record can
//! never be "resting" without a rest kind, or exhausted and resting at once.

use im::{OrdSet, Vector};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::core::{CardId, EntityId};
use crate::turns::TurnCards;

/// Kind of rest.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RestKind {
    /// Random card lost, rest of discard returns to hand.
    Short,
    /// Chosen card lost, heal, rest of discard returns to hand.
    Long,
}

/// Why a character is exhausted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExhaustionReason {
    /// Health reached zero.
    Damage,
    /// Cannot play two cards and cannot rest.
    InsufficientCards,
}

impl ExhaustionReason {
    /// Stable lowercase name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Damage => "damage",
            Self::InsufficientCards => "insufficient_cards",
        }
    }
}

impl std::fmt::Display for ExhaustionReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A short rest awaiting confirmation.
///
/// The seed reproduces the random pick; rerolling replaces both.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShortRestState {
    /// Discard card that will be lost on finalize.
    pub random_card: CardId,
    /// Seed used to pick `random_card`.
    pub seed: u64,
    /// A reroll has been spent.
    pub has_rerolled: bool,
    /// Caller-supplied time of the pick (ms since epoch).
    pub timestamp: u64,
}

/// Rest and exhaustion state machine.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum LifecycleState {
    /// Normal play.
    #[default]
    Active,
    /// Short rest picked a card; waiting for reroll or finalize.
    ShortRestPending(ShortRestState),
    /// Long rest committed for this round.
    LongRestDeclared,
    /// Out of the scenario until revived.
    Exhausted { reason: ExhaustionReason },
}

/// Status conditions on a character.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Condition {
    Poison,
    Wound,
    Immobilize,
    Disarm,
    Stun,
    Muddle,
    Invisible,
    Strengthen,
}

/// Axial hex coordinate on the scenario board.
///
/// The engine only stores and clears it; geometry lives elsewhere.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BoardPosition {
    pub q: i32,
    pub r: i32,
}

/// Snapshot of one character.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterRecord {
    /// Entity ID.
    pub id: EntityId,

    /// Current health.
    pub health: i32,

    /// Health cap.
    pub max_health: i32,

    /// Playable ability cards.
    pub hand: Vector<CardId>,

    /// Played cards, recoverable by resting.
    pub discard_pile: Vector<CardId>,

    /// Cards out for the rest of the scenario.
    pub lost_pile: Vector<CardId>,

    /// Played cards whose persistent effect is still in play.
    pub active_effects: Vector<CardId>,

    /// Per-turn card selection and action flags.
    #[serde(default)]
    pub turn: TurnCards,

    /// Rest/exhaustion state.
    #[serde(default)]
    pub lifecycle: LifecycleState,

    /// Active conditions.
    #[serde(default)]
    pub conditions: OrdSet<Condition>,

    /// Board position, if placed.
    #[serde(default)]
    pub position: Option<BoardPosition>,
}

impl CharacterRecord {
    /// Create a character at full health holding its whole ability deck.
    #[must_use]
    pub fn new(id: EntityId, max_health: i32, deck: impl IntoIterator<Item = CardId>) -> Self {
        Self {
            id,
            health: max_health,
            max_health,
            hand: deck.into_iter().collect(),
            discard_pile: Vector::new(),
            lost_pile: Vector::new(),
            active_effects: Vector::new(),
            turn: TurnCards::default(),
            lifecycle: LifecycleState::Active,
            conditions: OrdSet::new(),
            position: None,
        }
    }

    /// Set the discard pile (builder).
    #[must_use]
    pub fn with_discard(mut self, cards: impl IntoIterator<Item = CardId>) -> Self {
        self.discard_pile = cards.into_iter().collect();
        self
    }

    /// Set the lost pile (builder).
    #[must_use]
    pub fn with_lost(mut self, cards: impl IntoIterator<Item = CardId>) -> Self {
        self.lost_pile = cards.into_iter().collect();
        self
    }

    /// Set the active-effect cards (builder).
    #[must_use]
    pub fn with_active_effects(mut self, cards: impl IntoIterator<Item = CardId>) -> Self {
        self.active_effects = cards.into_iter().collect();
        self
    }

    /// Set current health (builder).
    #[must_use]
    pub fn with_health(mut self, health: i32) -> Self {
        self.health = health;
        self
    }

    /// Place on the board (builder).
    #[must_use]
    pub fn with_position(mut self, q: i32, r: i32) -> Self {
        self.position = Some(BoardPosition { q, r });
        self
    }

    /// Add a condition (builder).
    #[must_use]
    pub fn with_condition(mut self, condition: Condition) -> Self {
        self.conditions.insert(condition);
        self
    }

    // === Lifecycle queries ===

    /// Check if the character is exhausted.
    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        matches!(self.lifecycle, LifecycleState::Exhausted { .. })
    }

    /// Exhaustion reason, if exhausted.
    #[must_use]
    pub fn exhaustion_reason(&self) -> Option<ExhaustionReason> {
        match self.lifecycle {
            LifecycleState::Exhausted { reason } => Some(reason),
            _ => None,
        }
    }

    /// Check if a rest is pending or declared.
    #[must_use]
    pub fn is_resting(&self) -> bool {
        self.rest_kind().is_some()
    }

    /// Kind of rest in progress.
    #[must_use]
    pub fn rest_kind(&self) -> Option<RestKind> {
        match self.lifecycle {
            LifecycleState::ShortRestPending(_) => Some(RestKind::Short),
            LifecycleState::LongRestDeclared => Some(RestKind::Long),
            _ => None,
        }
    }

    /// Pending short rest, if any.
    #[must_use]
    pub fn short_rest(&self) -> Option<&ShortRestState> {
        match &self.lifecycle {
            LifecycleState::ShortRestPending(state) => Some(state),
            _ => None,
        }
    }

    /// Check for a condition.
    #[must_use]
    pub fn has_condition(&self, condition: Condition) -> bool {
        self.conditions.contains(&condition)
    }

    // === Health ===

    /// Lose health, floored at zero. Does not exhaust by itself.
    #[must_use]
    pub fn take_damage(&self, amount: i32) -> Self {
        let mut next = self.clone();
        next.health = self.health.saturating_sub(amount.max(0)).max(0);
        next
    }

    /// Restore health, capped at max.
    ///
    /// Poison blocks the heal and is removed instead. Wound is removed by
    /// any heal.
    #[must_use]
    pub fn heal(&self, amount: i32) -> Self {
        let mut next = self.clone();
        next.conditions.remove(&Condition::Wound);
        if next.conditions.remove(&Condition::Poison).is_some() {
            return next;
        }
        next.health = self.health.saturating_add(amount.max(0)).min(self.max_health);
        next
    }

    // === Card accounting ===

    /// Total ability cards across all piles.
    #[must_use]
    pub fn total_cards(&self) -> usize {
        self.hand.len() + self.discard_pile.len() + self.lost_pile.len() + self.active_effects.len()
    }

    /// Multiset of every ability card the character owns.
    #[must_use]
    pub fn card_counts(&self) -> FxHashMap<CardId, usize> {
        let mut counts = FxHashMap::default();
        for card in self
            .hand
            .iter()
            .chain(self.discard_pile.iter())
            .chain(self.lost_pile.iter())
            .chain(self.active_effects.iter())
        {
            *counts.entry(*card).or_insert(0) += 1;
        }
        counts
    }

    /// Check that `other` holds exactly the same cards as `self`.
    #[must_use]
    pub fn conserves_cards(&self, other: &Self) -> bool {
        self.card_counts() == other.card_counts()
    }
}
