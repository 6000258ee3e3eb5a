//! Round and turn sequencing.
//!
//! The sequencer holds the turn order for one round. Like decks and
//! character records it is a value: every transition takes `&self` and
//! returns the next snapshot, leaving the input usable for replay or undo.
//!
//! 1. `start_round(participants)` builds the order
//! 2. `current_entity()` is whoever acts now
//! 3. `advance_turn()` marks them acted and moves on
//! 4. `remove_entity(id)` drops someone mid-round (death, exhaustion)
//! 5. `advance_round()` discards the order and bumps the round counter
//!
//! The order is an `im::Vector`, so each snapshot shares structure with the
//! one it came from.

use im::Vector;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::order::{build_turn_order, Participant, TurnOrderEntry};
use crate::core::{EngineConfig, EngineError, EntityId, Result, TieBreak};

/// Turn order state for one game room.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnSequencer {
    tie_break: TieBreak,

    /// Round number (starts at 1).
    round: u32,

    /// This round's order. Empty between rounds.
    order: Vector<TurnOrderEntry>,

    /// Index into `order` of the acting entity.
    index: usize,
}

impl TurnSequencer {
    /// Create a sequencer at round 1 with no order yet.
    #[must_use]
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            tie_break: config.tie_break,
            round: 1,
            order: Vector::new(),
            index: 0,
        }
    }

    /// Current round number.
    #[must_use]
    pub fn round(&self) -> u32 {
        self.round
    }

    /// This round's order.
    #[must_use]
    pub fn order(&self) -> &Vector<TurnOrderEntry> {
        &self.order
    }

    /// Build this round's order from the participants.
    ///
    /// Replaces any previous order and starts from the first entry.
    #[must_use]
    pub fn start_round(&self, participants: &[Participant]) -> Self {
        let order: Vector<TurnOrderEntry> = build_turn_order(participants, self.tie_break).into_iter().collect();
        debug!(round = self.round, entities = order.len(), "round started");
        Self {
            order,
            index: 0,
            ..self.clone()
        }
    }

    /// The entity whose turn it is.
    #[must_use]
    pub fn current_entity(&self) -> Option<&TurnOrderEntry> {
        self.order.get(self.index)
    }

    /// Finish the current turn and move to the next entity.
    ///
    /// Past the end of the order this returns an equal snapshot.
    #[must_use]
    pub fn advance_turn(&self) -> Self {
        let mut next = self.clone();
        if let Some(entry) = next.order.get_mut(next.index) {
            entry.acted = true;
            next.index += 1;
        }
        if let Some(entry) = next.current_entity() {
            debug!(round = next.round, entity = %entry.id, kind = %entry.kind, "turn started");
        }
        next
    }

    /// Check if every entity in the order has acted.
    #[must_use]
    pub fn is_round_complete(&self) -> bool {
        self.index >= self.order.len()
    }

    /// Remove an entity from this round's order.
    ///
    /// If the entity is acting now, the next entity becomes current.
    ///
    /// # Errors
    ///
    /// `NotInTurnOrder` if the entity is not in the order.
    pub fn remove_entity(&self, entity: EntityId) -> Result<Self> {
        let position = self
            .order
            .iter()
            .position(|e| e.id == entity)
            .ok_or(EngineError::NotInTurnOrder { entity })?;

        let mut next = self.clone();
        next.order.remove(position);
        if position < next.index {
            next.index -= 1;
        }
        debug!(round = next.round, %entity, "removed from turn order");
        Ok(next)
    }

    /// End the round: clear the order and increment the round number.
    #[must_use]
    pub fn advance_round(&self) -> Self {
        let round = self.round + 1;
        debug!(round, "round advanced");
        Self {
            tie_break: self.tie_break,
            round,
            order: Vector::new(),
            index: 0,
        }
    }
}
