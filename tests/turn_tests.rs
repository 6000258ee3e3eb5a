//! Turn sequencing integration tests.
//!
//! A full round: characters select cards, the order is built from the
//! catalog, each entity acts, exhaustion removes someone mid-round, and the
//! round advances.

mod common;

use common::character;
use crawl_combat::turns::{LONG_REST_INITIATIVE, TurnCards};
use crawl_combat::{
    end_turn, initiate_action, select_cards, skip_action, use_action, ActionPosition, CardDisposition, CardId,
    CharacterLifecycle, CharacterRecord, EngineConfig, EngineError, EntityId, EntityKind, ErrorKind,
    ExhaustionReason, Journal, Operation, Participant, TieBreak, TurnSequencer,
};
use rustc_hash::FxHashMap;

/// Card n has initiative 10 * n.
fn catalog() -> FxHashMap<CardId, u32> {
    (1..=10).map(|n| (CardId::new(n), 10 * n)).collect()
}

fn id(n: u32) -> EntityId {
    EntityId::new(n)
}

// =============================================================================
// Card Action Tests
// =============================================================================

#[test]
fn test_play_both_halves() {
    common::init_tracing();
    let rec = character(1, 10, 4);
    let rec = select_cards(&rec, CardId::new(2), CardId::new(3)).unwrap();
    // Selected cards stay in hand until used
    assert_eq!(rec.hand.len(), 4);

    let rec = initiate_action(&rec, CardId::new(2), ActionPosition::Top).unwrap();
    let rec = use_action(&rec, CardDisposition::Discard).unwrap();
    assert!(rec.turn.used_top_action);
    assert_eq!(rec.turn.used_card, Some(CardId::new(2)));

    // Same card again: conflict
    let err = initiate_action(&rec, CardId::new(2), ActionPosition::Bottom).unwrap_err();
    assert_eq!(err, EngineError::CardAlreadyUsed { character: id(1), card: CardId::new(2) });
    assert_eq!(err.kind(), ErrorKind::Conflict);

    // Same half again: conflict
    let err = initiate_action(&rec, CardId::new(3), ActionPosition::Top).unwrap_err();
    assert_eq!(
        err,
        EngineError::ActionSlotUsed { character: id(1), position: ActionPosition::Top }
    );

    let rec = initiate_action(&rec, CardId::new(3), ActionPosition::Bottom).unwrap();
    let rec = use_action(&rec, CardDisposition::Persistent).unwrap();
    assert!(rec.turn.is_complete());
    assert_eq!(rec.discard_pile.len(), 1);
    assert_eq!(rec.active_effects.len(), 1);
    assert_eq!(rec.hand.len(), 2);

    let rec = end_turn(&rec).unwrap();
    assert_eq!(rec.turn, TurnCards::default());
    assert_eq!(rec.active_effects.len(), 1);
}

#[test]
fn test_skip_action_discards() {
    let rec = select_cards(&character(1, 10, 3), CardId::new(1), CardId::new(2)).unwrap();
    let rec = initiate_action(&rec, CardId::new(1), ActionPosition::Bottom).unwrap();
    let rec = skip_action(&rec).unwrap();
    assert!(rec.discard_pile.contains(&CardId::new(1)));
    assert!(rec.turn.used_bottom_action);
}

#[test]
fn test_action_validation() {
    let rec = character(1, 10, 3);

    let err = select_cards(&rec, CardId::new(1), CardId::new(1)).unwrap_err();
    assert_eq!(err, EngineError::DuplicateSelection { character: id(1) });

    let err = select_cards(&rec, CardId::new(1), CardId::new(9)).unwrap_err();
    assert_eq!(err, EngineError::CardNotInHand { character: id(1), card: CardId::new(9) });

    let err = initiate_action(&rec, CardId::new(1), ActionPosition::Top).unwrap_err();
    assert_eq!(err, EngineError::NoSelection { character: id(1) });

    let err = use_action(&rec, CardDisposition::Lost).unwrap_err();
    assert_eq!(err, EngineError::NoPendingAction { character: id(1) });

    let selected = select_cards(&rec, CardId::new(1), CardId::new(2)).unwrap();
    let err = initiate_action(&selected, CardId::new(3), ActionPosition::Top).unwrap_err();
    assert_eq!(err, EngineError::CardNotSelected { character: id(1), card: CardId::new(3) });

    let pending = initiate_action(&selected, CardId::new(1), ActionPosition::Top).unwrap();
    let err = initiate_action(&pending, CardId::new(2), ActionPosition::Bottom).unwrap_err();
    assert_eq!(err, EngineError::ActionPending { character: id(1) });
    let err = select_cards(&pending, CardId::new(2), CardId::new(3)).unwrap_err();
    assert_eq!(err, EngineError::TurnInProgress { character: id(1) });
}

// =============================================================================
// Round Tests
// =============================================================================

#[test]
fn test_full_round_with_exhaustion() {
    let config = EngineConfig::default();
    let rules = CharacterLifecycle::new(config.clone());
    let catalog = catalog();
    let mut journal = Journal::new();

    let alice = select_cards(&character(1, 10, 4), CardId::new(5), CardId::new(1)).unwrap();
    let bob = select_cards(&character(2, 10, 4), CardId::new(2), CardId::new(3)).unwrap();

    let participants = vec![
        Participant::from_record(&alice, &catalog),
        Participant::from_record(&bob, &catalog),
        Participant::monster(id(10), 35),
        Participant::summon(id(11), id(1)),
    ];
    let seq = TurnSequencer::new(&config).start_round(&participants);
    let order: Vec<_> = seq.order().iter().map(|e| e.id).collect();
    journal.record(seq.round(), id(0), Operation::StartRound, None);
    // bob 20, monster 35, alice 50, alice's summon 50
    assert_eq!(order, vec![id(2), id(10), id(1), id(11)]);

    // Bob acts
    assert_eq!(seq.current_entity().map(|e| e.kind), Some(EntityKind::Character));
    journal.record(seq.round(), id(2), Operation::EndTurn, None);
    let seq = seq.advance_turn();
    let before_removal = seq.clone();

    // The monster knocks alice out on its turn
    let alice = rules
        .execute_exhaustion(&alice.take_damage(10), ExhaustionReason::Damage)
        .unwrap();
    journal.record(seq.round(), id(1), Operation::Exhaustion, None);
    let seq = seq.remove_entity(alice.id).unwrap();
    journal.record(seq.round(), id(1), Operation::RemoveEntity, None);
    // The earlier snapshot still has alice
    assert_eq!(before_removal.order().len(), 4);
    assert_eq!(seq.order().len(), 3);

    let seq = seq.advance_turn();
    assert_eq!(seq.current_entity().map(|e| e.id), Some(id(11)));
    let seq = seq.advance_turn();
    assert_eq!(seq.current_entity(), None);
    assert!(seq.is_round_complete());

    let seq = seq.advance_round();
    assert_eq!(seq.round(), 2);
    journal.record(seq.round(), id(0), Operation::AdvanceRound, None);

    // Next round: alice is left out, along with her summon
    let participants = vec![
        Participant::from_record(&alice, &catalog),
        Participant::from_record(&bob, &catalog),
        Participant::summon(id(11), id(1)),
    ];
    let seq = seq.start_round(&participants);
    let order: Vec<_> = seq.order().iter().map(|e| e.id).collect();
    assert_eq!(order, vec![id(2)]);

    assert_eq!(journal.for_actor(id(1)).count(), 2);
    assert_eq!(journal.last().map(|r| r.round), Some(2));
}

#[test]
fn test_long_rester_acts_last() {
    let config = EngineConfig::default();
    let rules = CharacterLifecycle::new(config.clone());
    let catalog = catalog();

    let rester: CharacterRecord = rules
        .declare_long_rest(&character(1, 10, 2).with_discard([CardId::new(7), CardId::new(8)]))
        .unwrap();
    let player = select_cards(&character(2, 10, 10), CardId::new(9), CardId::new(10)).unwrap();

    let p = Participant::from_record(&rester, &catalog);
    assert_eq!(p.initiative, Some(LONG_REST_INITIATIVE));

    let seq = TurnSequencer::new(&config).start_round(&[p, Participant::from_record(&player, &catalog)]);
    let order: Vec<_> = seq.order().iter().map(|e| e.id).collect();
    assert_eq!(order, vec![id(2), id(1)]);
}

#[test]
fn test_tie_break_policies() {
    let tied = [
        Participant::monster(id(1), 40),
        Participant::character(id(5), 40, Some(70)),
        Participant::character(id(3), 40, Some(90)),
    ];

    let characters_first = TurnSequencer::new(&EngineConfig::default()).start_round(&tied);
    let order: Vec<_> = characters_first.order().iter().map(|e| e.id).collect();
    assert_eq!(order, vec![id(5), id(3), id(1)]);

    let by_id = TurnSequencer::new(&EngineConfig::default().with_tie_break(TieBreak::EntityId)).start_round(&tied);
    let order: Vec<_> = by_id.order().iter().map(|e| e.id).collect();
    assert_eq!(order, vec![id(1), id(3), id(5)]);
}

#[test]
fn test_sequencer_json_roundtrip() {
    let seq = TurnSequencer::new(&EngineConfig::default())
        .start_round(&[Participant::monster(id(1), 10), Participant::monster(id(2), 20)])
        .advance_turn();

    let json = serde_json::to_string(&seq).unwrap();
    let restored: TurnSequencer = serde_json::from_str(&json).unwrap();
    assert_eq!(restored, seq);
    assert_eq!(restored.round(), 1);
    assert_eq!(restored.current_entity().map(|e| e.id), Some(id(2)));
    assert!(restored.order()[0].acted);
}
