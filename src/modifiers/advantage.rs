//! Advantage and disadvantage selection.
//!
//! Both functions consume the pair produced by [`ModifierDeck::draw_two`]
//! and never draw themselves. On equal rank the first card drawn is kept.
//!
//! [`ModifierDeck::draw_two`]: super::ModifierDeck::draw_two

use std::cmp::Ordering;

use super::card::{compare_modifiers, AttackModifierCard};

/// Keep the better of two cards.
#[must_use]
pub fn apply_advantage(cards: [AttackModifierCard; 2]) -> AttackModifierCard {
    let [first, second] = cards;
    match compare_modifiers(&second, &first) {
        Ordering::Greater => second,
        _ => first,
    }
}

/// Keep the worse of two cards.
#[must_use]
pub fn apply_disadvantage(cards: [AttackModifierCard; 2]) -> AttackModifierCard {
    let [first, second] = cards;
    match compare_modifiers(&second, &first) {
        Ordering::Less => second,
        _ => first,
    }
}
