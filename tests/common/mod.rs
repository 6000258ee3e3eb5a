//! Shared helpers for integration tests.

#![allow(dead_code)]

use crawl_combat::{CardId, CharacterRecord, EntityId};

/// Route engine logs to the test writer. Set `RUST_LOG=crawl_combat=debug`
/// to see them.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub fn cards(ids: impl IntoIterator<Item = u32>) -> Vec<CardId> {
    ids.into_iter().map(CardId::new).collect()
}

/// A character holding cards `1..=hand_size` at full health.
pub fn character(id: u32, max_health: i32, hand_size: u32) -> CharacterRecord {
    CharacterRecord::new(EntityId::new(id), max_health, cards(1..=hand_size))
}
