//! Short and long rests.
//!
//! ## Short Rest
//!
//! ```text
//! Active --execute_short_rest--> ShortRestPending{card, seed}
//!        <--finalize_short_rest--
//! ShortRestPending --reroll_short_rest (once, costs health)--> ShortRestPending{new card}
//! ```
//!
//! The random card is picked but nothing moves until finalize, so the
//! player can see the pick and decide whether to reroll.
//!
//! ## Long Rest
//!
//! ```text
//! Active --declare_long_rest--> LongRestDeclared --execute_long_rest(card)--> Active
//! ```
//!
//! Every operation checks all preconditions first and returns a new record;
//! the input is never modified.

use tracing::debug;

use super::record::{CharacterRecord, LifecycleState, RestKind, ShortRestState};
use crate::core::{CardId, EngineConfig, EngineError, GameRng, Result};

/// Rest and exhaustion rules bound to an engine configuration.
#[derive(Clone, Debug, Default)]
pub struct CharacterLifecycle {
    config: EngineConfig,
}

impl CharacterLifecycle {
    /// Create lifecycle rules from a configuration.
    #[must_use]
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    /// The rule configuration in use.
    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Check whether the character may take a rest of `kind`.
    ///
    /// Both kinds need the same discard minimum; `kind` is kept for callers
    /// that report which button they are validating.
    ///
    /// # Errors
    ///
    /// - `CharacterExhausted` if exhausted
    /// - `InsufficientDiscard` if the discard pile is below the minimum
    pub fn can_rest(&self, record: &CharacterRecord, kind: RestKind) -> Result<()> {
        if record.is_exhausted() {
            return Err(EngineError::CharacterExhausted { character: record.id });
        }
        if record.discard_pile.len() < self.config.min_rest_discard {
            debug!(character = %record.id, ?kind, discard = record.discard_pile.len(), "rest rejected");
            return Err(EngineError::InsufficientDiscard {
                character: record.id,
                required: self.config.min_rest_discard,
                available: record.discard_pile.len(),
            });
        }
        Ok(())
    }

    /// Pick the card a short rest will lose. No cards move yet.
    ///
    /// `timestamp` is recorded as given (ms since epoch, caller's clock).
    ///
    /// # Errors
    ///
    /// - `CharacterExhausted`, `InsufficientDiscard` as in [`Self::can_rest`]
    /// - `AlreadyResting` if a rest is pending or declared
    pub fn execute_short_rest(
        &self,
        record: &CharacterRecord,
        rng: &mut GameRng,
        timestamp: u64,
    ) -> Result<CharacterRecord> {
        self.ensure_not_resting(record)?;
        self.can_rest(record, RestKind::Short)?;

        let seed = rng.next_seed();
        let random_card = pick_discard(record, seed)?;

        let mut next = record.clone();
        next.lifecycle = LifecycleState::ShortRestPending(ShortRestState {
            random_card,
            seed,
            has_rerolled: false,
            timestamp,
        });
        debug!(character = %record.id, card = %random_card, seed, "short rest pending");
        Ok(next)
    }

    /// Spend health to pick a different random card. Allowed once.
    ///
    /// # Errors
    ///
    /// - `NoShortRest` if no short rest is pending
    /// - `AlreadyRerolled` if the reroll was already used
    /// - `LethalReroll` if the damage would bring health to zero
    pub fn reroll_short_rest(&self, record: &CharacterRecord, rng: &mut GameRng) -> Result<CharacterRecord> {
        if record.is_exhausted() {
            return Err(EngineError::CharacterExhausted { character: record.id });
        }
        let pending = *record
            .short_rest()
            .ok_or(EngineError::NoShortRest { character: record.id })?;
        if pending.has_rerolled {
            return Err(EngineError::AlreadyRerolled { character: record.id });
        }
        if record.health <= self.config.reroll_damage {
            return Err(EngineError::LethalReroll {
                character: record.id,
                health: record.health,
            });
        }

        let seed = rng.next_seed();
        let random_card = pick_discard(record, seed)?;

        let mut next = record.clone();
        next.health -= self.config.reroll_damage;
        next.lifecycle = LifecycleState::ShortRestPending(ShortRestState {
            random_card,
            seed,
            has_rerolled: true,
            timestamp: pending.timestamp,
        });
        debug!(character = %record.id, card = %random_card, seed, health = next.health, "short rest rerolled");
        Ok(next)
    }

    /// Lose the picked card and return the rest of the discard to hand.
    ///
    /// # Errors
    ///
    /// - `NoShortRest` if no short rest is pending
    /// - `CardNotInDiscard` if the picked card has left the discard pile
    pub fn finalize_short_rest(&self, record: &CharacterRecord) -> Result<CharacterRecord> {
        if record.is_exhausted() {
            return Err(EngineError::CharacterExhausted { character: record.id });
        }
        let pending = *record
            .short_rest()
            .ok_or(EngineError::NoShortRest { character: record.id })?;

        let mut next = recover_discard(record, pending.random_card)?;
        next.lifecycle = LifecycleState::Active;
        debug!(character = %record.id, lost = %pending.random_card, "short rest finalized");
        Ok(next)
    }

    /// Commit to a long rest this round. No cards move.
    ///
    /// A card selection made earlier in the round is dropped.
    ///
    /// # Errors
    ///
    /// - `AlreadyResting` if a rest is pending or declared
    /// - `TurnInProgress` if an action was already chosen or used
    /// - `CharacterExhausted`, `InsufficientDiscard` as in [`Self::can_rest`]
    pub fn declare_long_rest(&self, record: &CharacterRecord) -> Result<CharacterRecord> {
        self.ensure_not_resting(record)?;
        if record.turn.in_progress() {
            return Err(EngineError::TurnInProgress { character: record.id });
        }
        self.can_rest(record, RestKind::Long)?;

        let mut next = record.clone();
        next.turn = Default::default();
        next.lifecycle = LifecycleState::LongRestDeclared;
        debug!(character = %record.id, "long rest declared");
        Ok(next)
    }

    /// Lose the chosen card, return the rest of the discard to hand, heal.
    ///
    /// Works from `Active` or `LongRestDeclared`.
    ///
    /// # Errors
    ///
    /// - `AlreadyResting` if a short rest is pending
    /// - `CharacterExhausted`, `InsufficientDiscard` as in [`Self::can_rest`]
    /// - `CardNotInDiscard` if `chosen` is not in the discard pile
    pub fn execute_long_rest(&self, record: &CharacterRecord, chosen: CardId) -> Result<CharacterRecord> {
        if matches!(record.lifecycle, LifecycleState::ShortRestPending(_)) {
            return Err(EngineError::AlreadyResting { character: record.id });
        }
        self.can_rest(record, RestKind::Long)?;

        let mut next = recover_discard(record, chosen)?;
        next.health = record
            .health
            .saturating_add(self.config.long_rest_heal)
            .min(record.max_health);
        next.lifecycle = LifecycleState::Active;
        debug!(character = %record.id, lost = %chosen, health = next.health, "long rest completed");
        Ok(next)
    }

    fn ensure_not_resting(&self, record: &CharacterRecord) -> Result<()> {
        if record.is_exhausted() {
            return Err(EngineError::CharacterExhausted { character: record.id });
        }
        if record.is_resting() {
            return Err(EngineError::AlreadyResting { character: record.id });
        }
        Ok(())
    }
}

/// Seeded pick of one discard card.
fn pick_discard(record: &CharacterRecord, seed: u64) -> Result<CardId> {
    GameRng::pick_index_seeded(seed, record.discard_pile.len())
        .map(|i| record.discard_pile[i])
        .ok_or(EngineError::InsufficientDiscard {
            character: record.id,
            required: 1,
            available: 0,
        })
}

/// Move `lost` from discard to the lost pile and the rest of discard to hand.
fn recover_discard(record: &CharacterRecord, lost: CardId) -> Result<CharacterRecord> {
    let index = record
        .discard_pile
        .index_of(&lost)
        .ok_or(EngineError::CardNotInDiscard { character: record.id, card: lost })?;

    let mut next = record.clone();
    let mut discard = std::mem::take(&mut next.discard_pile);
    let card = discard.remove(index);
    next.lost_pile.push_back(card);
    next.hand.append(discard);
    Ok(next)
}
