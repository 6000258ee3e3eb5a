//! Initiative order.
//!
//! Lower initiative acts first. Ties are broken by [`TieBreak`]:
//!
//! - `CharactersFirst` (default): characters, then summons, then monsters;
//!   then the lower secondary initiative (a character's supporting card);
//!   then the lower entity id
//! - `EntityId`: the lower entity id
//!
//! A participant without a determined initiative, or not alive, is left
//! out. A summon without its own initiative takes its owner's.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::character::{CharacterRecord, LifecycleState};
use crate::core::{CardId, EntityId, EntityKind, TieBreak};

/// Initiative a character acts at while long resting.
pub const LONG_REST_INITIATIVE: u32 = 99;

/// Card catalog collaborator: initiative printed on an ability card.
pub trait InitiativeLookup {
    /// Initiative of `card`, or `None` if the catalog does not know it.
    fn initiative(&self, card: CardId) -> Option<u32>;
}

impl InitiativeLookup for FxHashMap<CardId, u32> {
    fn initiative(&self, card: CardId) -> Option<u32> {
        self.get(&card).copied()
    }
}

/// A combatant offered to the turn order at round start.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    pub id: EntityId,
    pub kind: EntityKind,
    pub initiative: Option<u32>,
    pub secondary: Option<u32>,
    /// Controlling character, for summons.
    pub owner: Option<EntityId>,
    pub alive: bool,
}

impl Participant {
    /// A character with its leading and supporting initiatives.
    #[must_use]
    pub fn character(id: EntityId, initiative: u32, secondary: Option<u32>) -> Self {
        Self {
            id,
            kind: EntityKind::Character,
            initiative: Some(initiative),
            secondary,
            owner: None,
            alive: true,
        }
    }

    /// A monster acting at its drawn ability card's initiative.
    #[must_use]
    pub fn monster(id: EntityId, initiative: u32) -> Self {
        Self {
            id,
            kind: EntityKind::Monster,
            initiative: Some(initiative),
            secondary: None,
            owner: None,
            alive: true,
        }
    }

    /// A summon acting at its owner's initiative.
    #[must_use]
    pub fn summon(id: EntityId, owner: EntityId) -> Self {
        Self {
            id,
            kind: EntityKind::Summon,
            initiative: None,
            secondary: None,
            owner: Some(owner),
            alive: true,
        }
    }

    /// Build a character participant from its record.
    ///
    /// Initiative comes from the leading selected card; a long-resting
    /// character acts at [`LONG_REST_INITIATIVE`]; an exhausted one is not
    /// alive; one with no selection has no initiative.
    #[must_use]
    pub fn from_record(record: &CharacterRecord, catalog: &impl InitiativeLookup) -> Self {
        let (initiative, secondary) = match record.lifecycle {
            LifecycleState::LongRestDeclared => (Some(LONG_REST_INITIATIVE), None),
            _ => match record.turn.selected {
                Some(selected) => (
                    catalog.initiative(selected.leading),
                    catalog.initiative(selected.supporting),
                ),
                None => (None, None),
            },
        };

        Self {
            id: record.id,
            kind: EntityKind::Character,
            initiative,
            secondary,
            owner: None,
            alive: !record.is_exhausted(),
        }
    }

    /// Mark as dead (builder).
    #[must_use]
    pub fn dead(mut self) -> Self {
        self.alive = false;
        self
    }
}

/// One slot in a round's turn order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnOrderEntry {
    pub id: EntityId,
    pub kind: EntityKind,
    pub initiative: u32,
    pub secondary: Option<u32>,
    pub acted: bool,
}

/// Sort living participants with a determined initiative.
#[must_use]
pub fn build_turn_order(participants: &[Participant], tie_break: TieBreak) -> Vec<TurnOrderEntry> {
    let owner_initiative: FxHashMap<EntityId, u32> = participants
        .iter()
        .filter(|p| p.alive)
        .filter_map(|p| p.initiative.map(|i| (p.id, i)))
        .collect();

    let mut entries: Vec<TurnOrderEntry> = participants
        .iter()
        .filter(|p| p.alive)
        .filter_map(|p| {
            let initiative = p
                .initiative
                .or_else(|| p.owner.and_then(|owner| owner_initiative.get(&owner).copied()))?;
            Some(TurnOrderEntry {
                id: p.id,
                kind: p.kind,
                initiative,
                secondary: p.secondary,
                acted: false,
            })
        })
        .collect();

    match tie_break {
        TieBreak::CharactersFirst => entries.sort_by_key(|e| {
            (e.initiative, e.kind, e.secondary.unwrap_or(u32::MAX), e.id)
        }),
        TieBreak::EntityId => entries.sort_by_key(|e| (e.initiative, e.id)),
    }
    entries
}
