//! Attack resolution: draw, select, damage, retaliate.
//!
//! ```text
//! mode      = request.mode                        (Normal / Advantage / Disadvantage)
//! drawn     = deck.draw() or deck.draw_two()
//! card      = drawn[0] or apply_(dis)advantage(drawn)
//! damage    = shield/pierce(calculate_damage(base, card))
//! attacker  = apply_retaliate(attacker_health, retaliate, ranged)
//! ```
//!
//! The deck is never mutated; the outcome carries the deck after the draw.

use serde::{Deserialize, Serialize};
use smallvec::{smallvec, SmallVec};
use tracing::debug;

use super::damage::{apply_pierce, apply_retaliate, apply_shield, calculate_damage, extract_effects};
use crate::character::{CharacterRecord, Condition};
use crate::core::{GameRng, Result};
use crate::modifiers::{apply_advantage, apply_disadvantage, AttackModifierCard, ModifierDeck};

/// How many modifier cards an attack draws and which one it keeps.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttackMode {
    #[default]
    Normal,
    Advantage,
    Disadvantage,
}

impl AttackMode {
    /// Mode granted by the attacker's conditions.
    ///
    /// Strengthen gives advantage, Muddle gives disadvantage, both cancel.
    #[must_use]
    pub fn for_attacker(record: &CharacterRecord) -> Self {
        match (
            record.has_condition(Condition::Strengthen),
            record.has_condition(Condition::Muddle),
        ) {
            (true, false) => Self::Advantage,
            (false, true) => Self::Disadvantage,
            _ => Self::Normal,
        }
    }

    /// Combine two sources of advantage: opposites cancel, otherwise the
    /// non-normal one wins.
    #[must_use]
    pub fn combine(self, other: Self) -> Self {
        match (self, other) {
            (Self::Normal, m) | (m, Self::Normal) => m,
            (a, b) if a == b => a,
            _ => Self::Normal,
        }
    }

    /// Cards this mode draws.
    #[must_use]
    pub fn cards_drawn(self) -> usize {
        match self {
            Self::Normal => 1,
            Self::Advantage | Self::Disadvantage => 2,
        }
    }
}

/// Parameters of a single attack against one target.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttackRequest {
    pub base: i32,
    pub shield: i32,
    pub pierce: i32,
    pub retaliate: i32,
    pub ranged: bool,
    pub mode: AttackMode,
    pub attacker_health: i32,
}

impl AttackRequest {
    /// Plain melee attack with no target modifiers.
    #[must_use]
    pub fn new(base: i32, attacker_health: i32) -> Self {
        Self {
            base,
            shield: 0,
            pierce: 0,
            retaliate: 0,
            ranged: false,
            mode: AttackMode::Normal,
            attacker_health,
        }
    }

    /// Attack by a character: health and mode come from the record.
    #[must_use]
    pub fn from_attacker(record: &CharacterRecord, base: i32) -> Self {
        Self {
            mode: AttackMode::for_attacker(record),
            ..Self::new(base, record.health)
        }
    }

    #[must_use]
    pub fn with_shield(mut self, shield: i32) -> Self {
        self.shield = shield;
        self
    }

    #[must_use]
    pub fn with_pierce(mut self, pierce: i32) -> Self {
        self.pierce = pierce;
        self
    }

    #[must_use]
    pub fn with_retaliate(mut self, retaliate: i32) -> Self {
        self.retaliate = retaliate;
        self
    }

    #[must_use]
    pub fn ranged(mut self) -> Self {
        self.ranged = true;
        self
    }

    /// Combine `mode` with the request's current mode.
    #[must_use]
    pub fn with_mode(mut self, mode: AttackMode) -> Self {
        self.mode = self.mode.combine(mode);
        self
    }
}

/// Result of [`resolve_attack`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttackOutcome {
    /// Deck after the draw (and any reshuffle it triggered).
    pub deck: ModifierDeck,
    pub drawn: SmallVec<[AttackModifierCard; 2]>,
    pub card: AttackModifierCard,
    /// Damage dealt to the target after shield and pierce.
    pub damage: i32,
    pub effects: SmallVec<[String; 2]>,
    pub attacker_health: i32,
    /// Seeds of the reshuffles the draw triggered, oldest first.
    pub seeds: SmallVec<[u64; 2]>,
}

impl AttackOutcome {
    #[must_use]
    pub fn is_miss(&self) -> bool {
        self.card.is_miss()
    }
}

/// Resolve one attack against `deck`.
///
/// # Errors
///
/// - `EmptyDeck` if a normal attack finds no card to draw
/// - `NotEnoughModifiers` if an advantage or disadvantage attack cannot
///   draw two cards
pub fn resolve_attack(deck: &ModifierDeck, rng: &mut GameRng, request: &AttackRequest) -> Result<AttackOutcome> {
    let before = deck;
    let (deck, drawn, card) = match request.mode {
        AttackMode::Normal => {
            let (deck, card) = deck.draw(rng)?;
            (deck, smallvec![card.clone()], card)
        }
        AttackMode::Advantage => {
            let (deck, pair) = deck.draw_two(rng)?;
            let card = apply_advantage(pair.clone());
            (deck, SmallVec::from(pair), card)
        }
        AttackMode::Disadvantage => {
            let (deck, pair) = deck.draw_two(rng)?;
            let card = apply_disadvantage(pair.clone());
            (deck, SmallVec::from(pair), card)
        }
    };

    let raw = calculate_damage(request.base, &card);
    let damage = if request.pierce > 0 {
        apply_pierce(raw, request.shield, request.pierce)
    } else {
        apply_shield(raw, request.shield, card.is_miss())
    };
    let attacker_health = apply_retaliate(request.attacker_health, request.retaliate, request.ranged);
    let effects = extract_effects(&card);
    let seeds = deck.seeds_since(before);

    debug!(
        owner = %deck.owner(),
        mode = ?request.mode,
        card = %card,
        damage,
        attacker_health,
        "attack resolved"
    );

    Ok(AttackOutcome {
        deck,
        drawn,
        card,
        damage,
        effects,
        attacker_health,
        seeds,
    })
}
