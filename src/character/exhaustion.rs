//! Exhaustion and revival.
//!
//! A character is exhausted when health reaches zero or when it can neither
//! play two cards nor rest. Exhaustion moves every card the character still
//! holds into the lost pile and takes it off the board. Only an explicit
//! revival brings it back.

use im::OrdSet;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::record::{CharacterRecord, ExhaustionReason, LifecycleState};
use super::rest::CharacterLifecycle;
use crate::core::{EngineError, Result};
use crate::turns::TurnCards;

/// Advisory exhaustion risk for UI hints.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExhaustionRisk {
    Safe,
    Warning,
    Critical,
}

impl CharacterLifecycle {
    /// Determine whether the character is, or should now be, exhausted.
    ///
    /// Returns the cached reason for an already exhausted character, and
    /// `None` for one that can keep playing.
    #[must_use]
    pub fn check_exhaustion(&self, record: &CharacterRecord) -> Option<ExhaustionReason> {
        if let Some(reason) = record.exhaustion_reason() {
            return Some(reason);
        }
        if record.health <= 0 {
            return Some(ExhaustionReason::Damage);
        }
        if record.hand.len() < self.config().min_playable_hand
            && record.discard_pile.len() < self.config().min_rest_discard
        {
            return Some(ExhaustionReason::InsufficientCards);
        }
        None
    }

    /// Exhaust the character.
    ///
    /// Hand, discard and active-effect cards join the lost pile after its
    /// existing contents. Card selection, rest state and board position are
    /// cleared.
    ///
    /// # Errors
    ///
    /// `CharacterExhausted` if already exhausted.
    pub fn execute_exhaustion(&self, record: &CharacterRecord, reason: ExhaustionReason) -> Result<CharacterRecord> {
        if record.is_exhausted() {
            return Err(EngineError::CharacterExhausted { character: record.id });
        }

        let mut next = record.clone();
        let hand = std::mem::take(&mut next.hand);
        let discard = std::mem::take(&mut next.discard_pile);
        let active = std::mem::take(&mut next.active_effects);
        next.lost_pile.append(hand);
        next.lost_pile.append(discard);
        next.lost_pile.append(active);
        next.turn = TurnCards::default();
        next.position = None;
        next.lifecycle = LifecycleState::Exhausted { reason };

        warn!(character = %record.id, %reason, lost = next.lost_pile.len(), "character exhausted");
        Ok(next)
    }

    /// Run the exhaustion check and exhaust the character if it fails.
    ///
    /// Returns the record unchanged when the character can keep playing or
    /// is already exhausted.
    #[must_use]
    pub fn settle_exhaustion(&self, record: &CharacterRecord) -> CharacterRecord {
        if record.is_exhausted() {
            return record.clone();
        }
        match self.check_exhaustion(record) {
            Some(reason) => self
                .execute_exhaustion(record, reason)
                .unwrap_or_else(|_| record.clone()),
            None => record.clone(),
        }
    }

    /// Bring an exhausted character back at 1 health with no conditions.
    ///
    /// Lost cards stay lost.
    ///
    /// # Errors
    ///
    /// `NotExhausted` if the character is not exhausted.
    pub fn revive(&self, record: &CharacterRecord) -> Result<CharacterRecord> {
        if !record.is_exhausted() {
            return Err(EngineError::NotExhausted { character: record.id });
        }

        let mut next = record.clone();
        next.health = 1;
        next.conditions = OrdSet::new();
        next.lifecycle = LifecycleState::Active;
        debug!(character = %record.id, "character revived");
        Ok(next)
    }

    /// Classify how close the character is to exhaustion.
    ///
    /// Advisory only; rules never consult it.
    #[must_use]
    pub fn exhaustion_risk(&self, record: &CharacterRecord) -> ExhaustionRisk {
        if record.is_exhausted() {
            return ExhaustionRisk::Critical;
        }

        let risk = &self.config().risk;
        let usable = record.hand.len() + record.discard_pile.len();
        let health_percent = if record.max_health > 0 {
            (record.health.max(0) as i64 * 100 / record.max_health as i64) as u32
        } else {
            0
        };

        if record.health <= risk.critical_health || usable <= risk.critical_cards {
            ExhaustionRisk::Critical
        } else if health_percent <= risk.warning_health_percent || usable <= risk.warning_cards {
            ExhaustionRisk::Warning
        } else {
            ExhaustionRisk::Safe
        }
    }
}

/// Check if every party member is exhausted.
///
/// An empty party is not considered exhausted.
#[must_use]
pub fn is_party_exhausted(characters: &[CharacterRecord]) -> bool {
    !characters.is_empty() && characters.iter().all(CharacterRecord::is_exhausted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::character::Condition;
    use crate::core::{CardId, EngineConfig, EntityId};

    fn c(id: u32) -> CardId {
        CardId::new(id)
    }

    fn rules() -> CharacterLifecycle {
        CharacterLifecycle::new(EngineConfig::default())
    }

    #[test]
    fn test_check_exhaustion_cases() {
        let rules = rules();

        let dead = CharacterRecord::new(EntityId::new(1), 10, [c(1), c(2), c(3)]).with_health(0);
        assert_eq!(rules.check_exhaustion(&dead), Some(ExhaustionReason::Damage));

        let thin = CharacterRecord::new(EntityId::new(1), 10, [c(1)]);
        assert_eq!(rules.check_exhaustion(&thin), Some(ExhaustionReason::InsufficientCards));

        let ok = CharacterRecord::new(EntityId::new(1), 10, [c(1), c(2)]);
        assert_eq!(rules.check_exhaustion(&ok), None);

        let can_rest = CharacterRecord::new(EntityId::new(1), 10, [c(1)]).with_discard([c(2), c(3)]);
        assert_eq!(rules.check_exhaustion(&can_rest), None);
    }

    #[test]
    fn test_check_exhaustion_cached_reason() {
        let rules = rules();
        let rec = CharacterRecord::new(EntityId::new(1), 10, [c(1)]).with_health(0);
        let exhausted = rules.execute_exhaustion(&rec, ExhaustionReason::InsufficientCards).unwrap();
        assert_eq!(rules.check_exhaustion(&exhausted), Some(ExhaustionReason::InsufficientCards));
    }

    #[test]
    fn test_execute_exhaustion_moves_everything() {
        let rec = CharacterRecord::new(EntityId::new(1), 10, [c(1), c(2)])
            .with_discard([c(3)])
            .with_active_effects([c(4)])
            .with_lost([c(5), c(6)])
            .with_position(1, 2);

        let exhausted = rules().execute_exhaustion(&rec, ExhaustionReason::Damage).unwrap();

        assert!(exhausted.hand.is_empty());
        assert!(exhausted.discard_pile.is_empty());
        assert!(exhausted.active_effects.is_empty());
        assert_eq!(exhausted.lost_pile.len(), 2 + 2 + 1 + 1);
        assert_eq!(exhausted.lost_pile.iter().take(2).copied().collect::<Vec<_>>(), vec![c(5), c(6)]);
        assert_eq!(exhausted.position, None);
        assert_eq!(exhausted.exhaustion_reason(), Some(ExhaustionReason::Damage));
        assert!(exhausted.conserves_cards(&rec));

        // Input untouched
        assert_eq!(rec.hand.len(), 2);
        assert!(!rec.is_exhausted());
    }

    #[test]
    fn test_execute_exhaustion_twice_rejected() {
        let rec = CharacterRecord::new(EntityId::new(1), 10, [c(1)]);
        let exhausted = rules().execute_exhaustion(&rec, ExhaustionReason::Damage).unwrap();
        let err = rules().execute_exhaustion(&exhausted, ExhaustionReason::Damage).unwrap_err();
        assert!(err.is_state());
    }

    #[test]
    fn test_settle_exhaustion() {
        let rules = rules();
        let ok = CharacterRecord::new(EntityId::new(1), 10, [c(1), c(2)]);
        assert_eq!(rules.settle_exhaustion(&ok), ok);

        let dying = ok.take_damage(10);
        let settled = rules.settle_exhaustion(&dying);
        assert_eq!(settled.exhaustion_reason(), Some(ExhaustionReason::Damage));
        assert_eq!(rules.settle_exhaustion(&settled), settled);
    }

    #[test]
    fn test_revive() {
        let rules = rules();
        let rec = CharacterRecord::new(EntityId::new(1), 10, [c(1)])
            .with_health(0)
            .with_condition(Condition::Poison);
        let exhausted = rules.execute_exhaustion(&rec, ExhaustionReason::Damage).unwrap();

        let revived = rules.revive(&exhausted).unwrap();
        assert_eq!(revived.health, 1);
        assert!(revived.conditions.is_empty());
        assert_eq!(revived.lifecycle, LifecycleState::Active);
        assert_eq!(revived.lost_pile, exhausted.lost_pile);

        let err = rules.revive(&revived).unwrap_err();
        assert_eq!(err, EngineError::NotExhausted { character: EntityId::new(1) });
    }

    #[test]
    fn test_exhaustion_risk() {
        let rules = rules();
        let deck: Vec<_> = (1..=10).map(c).collect();

        let healthy = CharacterRecord::new(EntityId::new(1), 12, deck.clone());
        assert_eq!(rules.exhaustion_risk(&healthy), ExhaustionRisk::Safe);

        let hurt = healthy.clone().with_health(3);
        assert_eq!(rules.exhaustion_risk(&hurt), ExhaustionRisk::Warning);

        let dying = healthy.clone().with_health(1);
        assert_eq!(rules.exhaustion_risk(&dying), ExhaustionRisk::Critical);

        let few_cards = CharacterRecord::new(EntityId::new(1), 12, [c(1), c(2)]).with_discard([c(3)]);
        assert_eq!(rules.exhaustion_risk(&few_cards), ExhaustionRisk::Critical);

        let some_cards = CharacterRecord::new(EntityId::new(1), 12, [c(1), c(2), c(3)]).with_discard([c(4), c(5)]);
        assert_eq!(rules.exhaustion_risk(&some_cards), ExhaustionRisk::Warning);
    }

    #[test]
    fn test_party_exhaustion() {
        let rules = rules();
        let a = CharacterRecord::new(EntityId::new(1), 10, [c(1)]);
        let b = CharacterRecord::new(EntityId::new(2), 10, [c(2)]);
        let a_out = rules.execute_exhaustion(&a, ExhaustionReason::Damage).unwrap();
        let b_out = rules.execute_exhaustion(&b, ExhaustionReason::Damage).unwrap();

        assert!(!is_party_exhausted(&[a_out.clone(), b.clone()]));
        assert!(is_party_exhausted(&[a_out, b_out]));
    }

    #[test]
    fn test_empty_party_is_not_exhausted() {
        assert!(!is_party_exhausted(&[]));
    }
}
