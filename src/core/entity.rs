//! Entity and card identification.
//!
//! Every combatant (character, monster, summon) has a unique `EntityId`
//! assigned by the session layer. Ability cards are referenced by `CardId`,
//! which the static card catalog owns.
//!
//! ## Usage
//!
//! ```
//! use crawl_combat::core::{CardId, EntityId, EntityKind};
//!
//! let brute = EntityId::new(1);
//! assert_eq!(brute.to_string(), "Entity(1)");
//!
//! let card = CardId::new(112);
//! assert_eq!(card.raw(), 112);
//!
//! assert!(EntityKind::Character.is_character());
//! ```

use serde::{Deserialize, Serialize};

/// Unique identifier for any combatant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EntityId(pub u32);

impl EntityId {
    /// Create a new entity ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl From<u32> for EntityId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Entity({})", self.0)
    }
}

/// What kind of combatant an entity is.
///
/// The ordering of variants is the tie-break rank used by the turn order
/// when initiatives are equal: characters, then summons, then monsters.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    /// A player-controlled character.
    Character,
    /// A summon controlled by a character.
    Summon,
    /// A monster controlled by the scenario.
    Monster,
}

impl EntityKind {
    /// Check if this is a player character.
    #[must_use]
    pub const fn is_character(self) -> bool {
        matches!(self, Self::Character)
    }

    /// Stable lowercase name, used in logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Character => "character",
            Self::Summon => "summon",
            Self::Monster => "monster",
        }
    }
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identifier for an ability card in a character's deck.
///
/// The engine never interprets card IDs; the catalog assigns meaning.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CardId(pub u32);

impl CardId {
    /// Create a new card ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl From<u32> for CardId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({})", self.0)
    }
}
