//! Damage calculation.
//!
//! Pure functions; none of them touch a deck or a character. The attack
//! pipeline in [`super::attack`] chains them in this order:
//!
//! ```text
//! raw     = calculate_damage(base, card)
//! dealt   = apply_pierce(raw, shield, pierce)      (or apply_shield when pierce is 0)
//! backlash = apply_retaliate(attacker_hp, retaliate, ranged)
//! ```

use smallvec::SmallVec;

use crate::modifiers::{AttackModifierCard, Modifier};

/// Apply a modifier card to a base attack value.
///
/// # Formula
///
/// ```text
/// Miss        -> 0
/// Critical    -> base * 2
/// Integer(m)  -> max(base + m, 0)
/// ```
#[must_use]
pub fn calculate_damage(base: i32, card: &AttackModifierCard) -> i32 {
    match card.modifier {
        Modifier::Miss => 0,
        Modifier::Critical => base.saturating_mul(2),
        Modifier::Integer(m) => base.saturating_add(m).max(0),
    }
}

/// Reduce damage by the target's shield. A miss stays at its value.
#[must_use]
pub fn apply_shield(damage: i32, shield: i32, is_miss: bool) -> i32 {
    if is_miss {
        return damage;
    }
    damage.saturating_sub(shield).max(0)
}

/// Reduce damage by the target's shield after pierce.
///
/// # Formula
///
/// ```text
/// effective_shield = max(shield - pierce, 0)
/// result           = max(damage - effective_shield, 0)
/// ```
///
/// Pierce in excess of the shield is wasted; it never adds damage.
#[must_use]
pub fn apply_pierce(damage: i32, shield: i32, pierce: i32) -> i32 {
    let effective_shield = shield.saturating_sub(pierce).max(0);
    damage.saturating_sub(effective_shield).max(0)
}

/// Attacker health after the target's retaliate.
///
/// Ranged attacks are not retaliated against.
#[must_use]
pub fn apply_retaliate(attacker_health: i32, retaliate: i32, is_ranged: bool) -> i32 {
    if is_ranged {
        return attacker_health;
    }
    attacker_health.saturating_sub(retaliate).max(0)
}

/// Rider effects of a card.
///
/// Returned whether or not the attack hit: a curse's riders still apply on
/// a miss.
#[must_use]
pub fn extract_effects(card: &AttackModifierCard) -> SmallVec<[String; 2]> {
    card.effects.clone()
}
