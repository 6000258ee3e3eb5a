//! Attack modifier cards.
//!
//! A modifier card adjusts an attack's base value. The value is a closed
//! variant, so damage calculation and comparison are exhaustive:
//!
//! - `Integer(n)`: add `n` to the attack
//! - `Miss`: the attack deals no damage
//! - `Critical`: the attack deals double damage
//!
//! ## Ordering
//!
//! `Critical` beats any integer, any integer beats `Miss`, integers compare
//! numerically. Advantage and disadvantage pick by this order.
//!
//! ```
//! use crawl_combat::modifiers::Modifier;
//!
//! assert!(Modifier::Critical > Modifier::Integer(2));
//! assert!(Modifier::Integer(-2) > Modifier::Miss);
//! assert!(Modifier::Integer(1) > Modifier::Integer(0));
//! ```

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Number of cards in a standard modifier deck.
pub const STANDARD_DECK_SIZE: usize = 20;

/// The value printed on a modifier card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Modifier {
    /// Flat adjustment to the attack value.
    Integer(i32),
    /// Null: no damage.
    Miss,
    /// Double damage.
    Critical,
}

impl Modifier {
    /// Rank used by the total order: Miss < Integer < Critical.
    const fn rank(self) -> u8 {
        match self {
            Self::Miss => 0,
            Self::Integer(_) => 1,
            Self::Critical => 2,
        }
    }
}

impl Ord for Modifier {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Integer(a), Self::Integer(b)) => a.cmp(b),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

impl PartialOrd for Modifier {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl std::fmt::Display for Modifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Integer(n) if *n >= 0 => write!(f, "+{}", n),
            Self::Integer(n) => write!(f, "{}", n),
            Self::Miss => f.write_str("miss"),
            Self::Critical => f.write_str("x2"),
        }
    }
}

/// A single attack modifier card.
///
/// Temporary cards (bless and curse) leave the deck entirely when drawn and
/// never trigger a reshuffle.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AttackModifierCard {
    /// The printed value.
    pub modifier: Modifier,

    /// Drawing this card reshuffles the deck.
    pub reshuffle: bool,

    /// Rider effects printed on the card (e.g. "poison"). Apply on a miss too.
    #[serde(default, skip_serializing_if = "SmallVec::is_empty")]
    pub effects: SmallVec<[String; 2]>,

    /// Bless or curse: removed on draw instead of discarded.
    #[serde(default)]
    pub temporary: bool,
}

impl AttackModifierCard {
    /// Create a permanent card. Miss and Critical are reshuffle cards.
    #[must_use]
    pub fn new(modifier: Modifier) -> Self {
        Self {
            modifier,
            reshuffle: matches!(modifier, Modifier::Miss | Modifier::Critical),
            effects: SmallVec::new(),
            temporary: false,
        }
    }

    /// A permanent `+n` / `-n` card.
    #[must_use]
    pub fn integer(value: i32) -> Self {
        Self::new(Modifier::Integer(value))
    }

    /// The permanent null card.
    #[must_use]
    pub fn miss() -> Self {
        Self::new(Modifier::Miss)
    }

    /// The permanent double-damage card.
    #[must_use]
    pub fn critical() -> Self {
        Self::new(Modifier::Critical)
    }

    /// A temporary bless card (+2).
    #[must_use]
    pub fn bless() -> Self {
        Self {
            modifier: Modifier::Integer(2),
            reshuffle: false,
            effects: SmallVec::new(),
            temporary: true,
        }
    }

    /// A temporary curse card (miss).
    #[must_use]
    pub fn curse() -> Self {
        Self {
            modifier: Modifier::Miss,
            reshuffle: false,
            effects: SmallVec::new(),
            temporary: true,
        }
    }

    /// Attach a rider effect.
    #[must_use]
    pub fn with_effect(mut self, effect: impl Into<String>) -> Self {
        self.effects.push(effect.into());
        self
    }

    /// Check if drawing this card triggers a reshuffle.
    ///
    /// Only permanent Miss and Critical cards qualify, whatever the flag says.
    #[must_use]
    pub fn triggers_reshuffle(&self) -> bool {
        self.reshuffle
            && !self.temporary
            && matches!(self.modifier, Modifier::Miss | Modifier::Critical)
    }

    /// Check if this is a temporary bless card.
    #[must_use]
    pub fn is_bless(&self) -> bool {
        self.temporary && matches!(self.modifier, Modifier::Integer(_))
    }

    /// Check if this is a temporary curse card.
    #[must_use]
    pub fn is_curse(&self) -> bool {
        self.temporary && self.modifier == Modifier::Miss
    }

    /// Check if this card is a miss (permanent or curse).
    #[must_use]
    pub fn is_miss(&self) -> bool {
        self.modifier == Modifier::Miss
    }
}

impl std::fmt::Display for AttackModifierCard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_bless() {
            write!(f, "bless({})", self.modifier)
        } else if self.is_curse() {
            f.write_str("curse")
        } else {
            write!(f, "{}", self.modifier)
        }
    }
}

/// Compare two cards by the modifier total order.
///
/// Effects and temporary flags do not participate.
#[must_use]
pub fn compare_modifiers(a: &AttackModifierCard, b: &AttackModifierCard) -> Ordering {
    a.modifier.cmp(&b.modifier)
}

/// The standard 20-card composition, unshuffled.
///
/// 1 Miss, 1 Critical, 5×+1, 5×-1, 6×+0, 1×+2, 1×-2.
#[must_use]
pub fn standard_composition() -> Vec<AttackModifierCard> {
    let mut cards = Vec::with_capacity(STANDARD_DECK_SIZE);
    cards.push(AttackModifierCard::miss());
    cards.push(AttackModifierCard::critical());
    cards.extend((0..5).map(|_| AttackModifierCard::integer(1)));
    cards.extend((0..5).map(|_| AttackModifierCard::integer(-1)));
    cards.extend((0..6).map(|_| AttackModifierCard::integer(0)));
    cards.push(AttackModifierCard::integer(2));
    cards.push(AttackModifierCard::integer(-2));
    cards
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_order() {
        let crit = AttackModifierCard::critical();
        let miss = AttackModifierCard::miss();
        let plus2 = AttackModifierCard::integer(2);
        let minus2 = AttackModifierCard::integer(-2);

        assert_eq!(compare_modifiers(&crit, &plus2), Ordering::Greater);
        assert_eq!(compare_modifiers(&minus2, &miss), Ordering::Greater);
        assert_eq!(compare_modifiers(&miss, &crit), Ordering::Less);
        assert_eq!(compare_modifiers(&plus2, &minus2), Ordering::Greater);
        assert_eq!(compare_modifiers(&plus2, &AttackModifierCard::integer(2)), Ordering::Equal);
        assert_eq!(compare_modifiers(&crit, &AttackModifierCard::critical()), Ordering::Equal);
        assert_eq!(compare_modifiers(&miss, &AttackModifierCard::curse()), Ordering::Equal);
    }

    #[test]
    fn test_reshuffle_flags() {
        assert!(AttackModifierCard::miss().triggers_reshuffle());
        assert!(AttackModifierCard::critical().triggers_reshuffle());
        assert!(!AttackModifierCard::integer(0).triggers_reshuffle());
        assert!(!AttackModifierCard::curse().triggers_reshuffle());
        assert!(!AttackModifierCard::bless().triggers_reshuffle());

        // A mislabelled integer card from an external record is ignored
        let mut odd = AttackModifierCard::integer(1);
        odd.reshuffle = true;
        assert!(!odd.triggers_reshuffle());
    }

    #[test]
    fn test_temporary_kinds() {
        assert!(AttackModifierCard::bless().is_bless());
        assert!(!AttackModifierCard::bless().is_curse());
        assert!(AttackModifierCard::curse().is_curse());
        assert!(AttackModifierCard::curse().is_miss());
        assert!(!AttackModifierCard::integer(2).is_bless());
    }

    #[test]
    fn test_standard_composition() {
        let cards = standard_composition();
        assert_eq!(cards.len(), STANDARD_DECK_SIZE);

        let count = |m: Modifier| cards.iter().filter(|c| c.modifier == m).count();
        assert_eq!(count(Modifier::Miss), 1);
        assert_eq!(count(Modifier::Critical), 1);
        assert_eq!(count(Modifier::Integer(1)), 5);
        assert_eq!(count(Modifier::Integer(-1)), 5);
        assert_eq!(count(Modifier::Integer(0)), 6);
        assert_eq!(count(Modifier::Integer(2)), 1);
        assert_eq!(count(Modifier::Integer(-2)), 1);
        assert!(cards.iter().all(|c| !c.temporary));
    }

    #[test]
    fn test_display() {
        assert_eq!(AttackModifierCard::integer(1).to_string(), "+1");
        assert_eq!(AttackModifierCard::integer(-2).to_string(), "-2");
        assert_eq!(AttackModifierCard::critical().to_string(), "x2");
        assert_eq!(AttackModifierCard::curse().to_string(), "curse");
        assert_eq!(AttackModifierCard::bless().to_string(), "bless(+2)");
    }

    #[test]
    fn test_serialization_skips_empty_effects() {
        let card = AttackModifierCard::integer(1);
        let json = serde_json::to_string(&card).unwrap();
        assert!(!json.contains("effects"));

        let card = AttackModifierCard::miss().with_effect("poison");
        let json = serde_json::to_string(&card).unwrap();
        let back: AttackModifierCard = serde_json::from_str(&json).unwrap();
        assert_eq!(back, card);
        assert_eq!(back.effects.as_slice(), &["poison".to_string()]);
    }
}
