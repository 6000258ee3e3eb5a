//! Transition journal for audit and replay.
//!
//! Every engine operation is pure, so replaying a session only needs the
//! operation sequence and the seeds random operations consumed. The journal
//! records exactly that. It is an `im::Vector`, so snapshots are O(1) and
//! can ride along with the records they describe.
//!
//! Random operations expose their seeds in a form [`Journal::record`] takes
//! directly: `ModifierDeck::seeds_since`, `AttackOutcome::seeds` and
//! `ShortRestState::seed`.

use std::fmt;

use im::Vector;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::entity::EntityId;

/// Engine operation kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    Draw,
    DrawTwo,
    Reshuffle,
    AddBless,
    AddCurse,
    Attack,
    ShortRest,
    RerollShortRest,
    FinalizeShortRest,
    DeclareLongRest,
    LongRest,
    Exhaustion,
    Revive,
    SelectCards,
    UseAction,
    SkipAction,
    EndTurn,
    StartRound,
    AdvanceRound,
    RemoveEntity,
}

impl Operation {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Draw => "draw",
            Self::DrawTwo => "draw_two",
            Self::Reshuffle => "reshuffle",
            Self::AddBless => "add_bless",
            Self::AddCurse => "add_curse",
            Self::Attack => "attack",
            Self::ShortRest => "short_rest",
            Self::RerollShortRest => "reroll_short_rest",
            Self::FinalizeShortRest => "finalize_short_rest",
            Self::DeclareLongRest => "declare_long_rest",
            Self::LongRest => "long_rest",
            Self::Exhaustion => "exhaustion",
            Self::Revive => "revive",
            Self::SelectCards => "select_cards",
            Self::UseAction => "use_action",
            Self::SkipAction => "skip_action",
            Self::EndTurn => "end_turn",
            Self::StartRound => "start_round",
            Self::AdvanceRound => "advance_round",
            Self::RemoveEntity => "remove_entity",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One applied operation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionRecord {
    /// Position in the journal (0-based, gap-free).
    pub sequence: usize,

    /// Round the operation happened in.
    pub round: u32,

    /// Entity the operation applied to.
    pub actor: EntityId,

    pub operation: Operation,

    /// Seeds consumed by the operation, in the order they were drawn.
    /// Empty for deterministic operations.
    pub seeds: SmallVec<[u64; 2]>,
}

/// Append-only log of applied operations.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Journal {
    entries: Vector<TransitionRecord>,
}

impl Journal {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an operation and return its sequence number.
    ///
    /// `seeds` accepts `None`, `Some(seed)` or any seed collection.
    pub fn record(
        &mut self,
        round: u32,
        actor: EntityId,
        operation: Operation,
        seeds: impl IntoIterator<Item = u64>,
    ) -> usize {
        let sequence = self.entries.len();
        self.entries.push_back(TransitionRecord {
            sequence,
            round,
            actor,
            operation,
            seeds: seeds.into_iter().collect(),
        });
        sequence
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn last(&self) -> Option<&TransitionRecord> {
        self.entries.last()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TransitionRecord> {
        self.entries.iter()
    }

    /// Entries for one actor, in order.
    pub fn for_actor(&self, actor: EntityId) -> impl Iterator<Item = &TransitionRecord> {
        self.entries.iter().filter(move |r| r.actor == actor)
    }

    /// Seeds consumed so far, in order.
    #[must_use]
    pub fn seeds(&self) -> Vec<u64> {
        self.entries.iter().flat_map(|r| r.seeds.iter().copied()).collect()
    }

    /// Encode to a compact binary form.
    ///
    /// # Errors
    ///
    /// Propagates `bincode` serialization failures.
    pub fn encode(&self) -> bincode::Result<Vec<u8>> {
        bincode::serialize(self)
    }

    /// Decode from [`Journal::encode`] output.
    ///
    /// # Errors
    ///
    /// Fails on truncated or foreign input.
    pub fn decode(bytes: &[u8]) -> bincode::Result<Self> {
        bincode::deserialize(bytes)
    }
}
