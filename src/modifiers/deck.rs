//! Per-combatant attack modifier deck.
//!
//! ## Piles
//!
//! - `draw_pile`: ordered, index 0 is the top card
//! - `discard_pile`: ordered, most recent draw last
//!
//! ## Invariants
//!
//! - Permanent cards are never created or destroyed: for a standard deck
//!   `draw + discard == 20` once temporaries are excluded
//! - Temporary cards (bless/curse) live only in the draw pile and vanish
//!   when drawn
//! - Drawing a reshuffle card merges the discard into the draw pile and
//!   shuffles before any later draw
//!
//! ## Seeds
//!
//! Every shuffle draws its own seed from the room's `GameRng` and appends it
//! to `shuffle_seeds`. A `draw_two` that hits two reshuffle cards records
//! two seeds; [`ModifierDeck::seeds_since`] returns the ones an operation
//! added.
//!
//! ## Snapshots
//!
//! Every operation takes `&self` and returns a new deck. Piles are `im`
//! vectors, so the copy is O(1) and the caller keeps the old state for
//! diffing or replay.

use im::Vector;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::{debug, trace};

use super::card::{standard_composition, AttackModifierCard};
use crate::core::{EngineError, EntityId, GameRng, Result};

/// An attack modifier deck owned by one combatant.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModifierDeck {
    owner: EntityId,
    draw_pile: Vector<AttackModifierCard>,
    discard_pile: Vector<AttackModifierCard>,
    /// Seed of every shuffle applied, oldest first.
    #[serde(default)]
    shuffle_seeds: Vector<u64>,
}

impl ModifierDeck {
    /// Build a deck from explicit piles, without shuffling.
    ///
    /// Used to restore a deck from a stored record.
    #[must_use]
    pub fn from_piles(
        owner: EntityId,
        draw_pile: impl IntoIterator<Item = AttackModifierCard>,
        discard_pile: impl IntoIterator<Item = AttackModifierCard>,
    ) -> Self {
        Self {
            owner,
            draw_pile: draw_pile.into_iter().collect(),
            discard_pile: discard_pile.into_iter().collect(),
            shuffle_seeds: Vector::new(),
        }
    }

    /// Create the standard 20-card deck, shuffled.
    #[must_use]
    pub fn standard(owner: EntityId, rng: &mut GameRng) -> Self {
        Self::from_piles(owner, standard_composition(), Vec::new()).shuffled_draw_pile(rng.next_seed())
    }

    /// Owning combatant.
    #[must_use]
    pub fn owner(&self) -> EntityId {
        self.owner
    }

    /// Cards left to draw, top first.
    #[must_use]
    pub fn draw_pile(&self) -> &Vector<AttackModifierCard> {
        &self.draw_pile
    }

    /// Cards drawn since the last reshuffle.
    #[must_use]
    pub fn discard_pile(&self) -> &Vector<AttackModifierCard> {
        &self.discard_pile
    }

    /// Number of cards left in the draw pile.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.draw_pile.len()
    }

    /// Seed used by the most recent shuffle.
    #[must_use]
    pub fn last_shuffle_seed(&self) -> Option<u64> {
        self.shuffle_seeds.back().copied()
    }

    /// Seeds of every shuffle applied since the deck was built, oldest first.
    #[must_use]
    pub fn shuffle_seeds(&self) -> &Vector<u64> {
        &self.shuffle_seeds
    }

    /// Number of shuffles applied since the deck was built.
    #[must_use]
    pub fn shuffle_count(&self) -> usize {
        self.shuffle_seeds.len()
    }

    /// Shuffle seeds recorded after `earlier`, a previous snapshot of this
    /// deck.
    #[must_use]
    pub fn seeds_since(&self, earlier: &Self) -> SmallVec<[u64; 2]> {
        self.shuffle_seeds
            .iter()
            .skip(earlier.shuffle_seeds.len())
            .copied()
            .collect()
    }

    /// Permanent cards across both piles.
    #[must_use]
    pub fn permanent_count(&self) -> usize {
        self.draw_pile
            .iter()
            .chain(self.discard_pile.iter())
            .filter(|c| !c.temporary)
            .count()
    }

    /// Bless cards waiting in the draw pile.
    #[must_use]
    pub fn bless_count(&self) -> usize {
        self.draw_pile.iter().filter(|c| c.is_bless()).count()
    }

    /// Curse cards waiting in the draw pile.
    #[must_use]
    pub fn curse_count(&self) -> usize {
        self.draw_pile.iter().filter(|c| c.is_curse()).count()
    }

    /// Look at the top card without drawing it.
    #[must_use]
    pub fn peek(&self) -> Option<&AttackModifierCard> {
        self.draw_pile.front()
    }

    /// Draw the top card.
    ///
    /// Permanent cards go to the discard pile; temporary cards are removed.
    /// A reshuffle card is discarded first, then the whole discard is
    /// shuffled back in.
    ///
    /// # Errors
    ///
    /// `EmptyDeck` if the draw pile is empty.
    pub fn draw(&self, rng: &mut GameRng) -> Result<(Self, AttackModifierCard)> {
        let mut next = self.clone();
        let card = next
            .draw_pile
            .pop_front()
            .ok_or(EngineError::EmptyDeck { owner: self.owner })?;

        if !card.temporary {
            next.discard_pile.push_back(card.clone());
        }
        trace!(owner = %self.owner, card = %card, "modifier drawn");

        if card.triggers_reshuffle() {
            next = next.reshuffle_with_seed(rng.next_seed());
        }

        Ok((next, card))
    }

    /// Draw two cards in sequence (for advantage or disadvantage).
    ///
    /// The second card may come from a freshly reshuffled deck if the first
    /// card was a reshuffle card. Each reshuffle records its own seed, so a
    /// pair of reshuffle cards adds two entries to `shuffle_seeds`.
    ///
    /// # Errors
    ///
    /// `NotEnoughModifiers` if the draw pile holds fewer than two cards. The
    /// deck is returned untouched and no seed is consumed.
    pub fn draw_two(&self, rng: &mut GameRng) -> Result<(Self, [AttackModifierCard; 2])> {
        if !self.can_draw_two() {
            return Err(EngineError::NotEnoughModifiers {
                owner: self.owner,
                needed: 2,
                available: self.draw_pile.len(),
            });
        }

        let (after_first, first) = self.draw(rng)?;
        let (after_second, second) = after_first.draw(rng)?;
        Ok((after_second, [first, second]))
    }

    /// Check whether `draw_two` would succeed.
    ///
    /// Only the draw pile counts; discarded cards are not available until a
    /// reshuffle brings them back.
    #[must_use]
    pub fn can_draw_two(&self) -> bool {
        self.draw_pile.len() >= 2
    }

    /// Merge the discard pile into the draw pile and shuffle.
    #[must_use]
    pub fn reshuffle(&self, rng: &mut GameRng) -> Self {
        self.reshuffle_with_seed(rng.next_seed())
    }

    /// Replay a reshuffle with a recorded seed.
    #[must_use]
    pub fn reshuffle_with_seed(&self, seed: u64) -> Self {
        let mut next = self.clone();
        let discard = std::mem::take(&mut next.discard_pile);
        next.draw_pile.append(discard);
        debug!(owner = %self.owner, seed, cards = next.draw_pile.len(), "modifier deck reshuffled");
        next.shuffled_draw_pile(seed)
    }

    /// Shuffle a bless card into the draw pile.
    #[must_use]
    pub fn add_bless(&self, rng: &mut GameRng) -> Self {
        self.add_temporary(AttackModifierCard::bless(), rng)
    }

    /// Shuffle a curse card into the draw pile.
    #[must_use]
    pub fn add_curse(&self, rng: &mut GameRng) -> Self {
        self.add_temporary(AttackModifierCard::curse(), rng)
    }

    /// Remove the first bless card from the draw pile, if any.
    #[must_use]
    pub fn remove_bless(&self) -> Self {
        self.remove_first(AttackModifierCard::is_bless)
    }

    /// Remove the first curse card from the draw pile, if any.
    #[must_use]
    pub fn remove_curse(&self) -> Self {
        self.remove_first(AttackModifierCard::is_curse)
    }

    fn add_temporary(&self, card: AttackModifierCard, rng: &mut GameRng) -> Self {
        let mut next = self.clone();
        debug!(owner = %self.owner, card = %card, "temporary modifier added");
        next.draw_pile.push_back(card);
        next.shuffled_draw_pile(rng.next_seed())
    }

    fn remove_first(&self, matches: impl Fn(&AttackModifierCard) -> bool) -> Self {
        let mut next = self.clone();
        if let Some(index) = next.draw_pile.iter().position(|c| matches(c)) {
            let removed = next.draw_pile.remove(index);
            debug!(owner = %self.owner, card = %removed, "temporary modifier removed");
        }
        next
    }

    /// Fisher-Yates shuffle of the draw pile only, recording the seed.
    fn shuffled_draw_pile(mut self, seed: u64) -> Self {
        let mut cards: Vec<_> = self.draw_pile.iter().cloned().collect();
        GameRng::shuffle_seeded(seed, &mut cards);
        self.draw_pile = cards.into_iter().collect();
        self.shuffle_seeds.push_back(seed);
        self
    }
}
