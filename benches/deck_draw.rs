//! Modifier deck benchmarks.
//!
//! Run with: `cargo bench --bench deck_draw`

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use crawl_combat::{resolve_attack, AttackMode, AttackRequest, EntityId, GameRng, ModifierDeck};

/// Draw through a full standard deck, reshuffles included.
fn benchmark_draw(c: &mut Criterion) {
    let mut rng = GameRng::new(42);
    let deck = ModifierDeck::standard(EntityId::new(1), &mut rng);

    let mut group = c.benchmark_group("Draw");
    for draws in [1usize, 10, 40] {
        group.bench_with_input(BenchmarkId::new("draws", draws), &draws, |b, &draws| {
            b.iter(|| {
                let mut rng = GameRng::new(7);
                let mut current = deck.clone();
                for _ in 0..draws {
                    if current.remaining() == 0 {
                        current = current.reshuffle(&mut rng);
                    }
                    if let Ok((next, card)) = current.draw(&mut rng) {
                        black_box(card);
                        current = next;
                    }
                }
                black_box(current)
            });
        });
    }
    group.finish();
}

/// Full attack resolution in each mode.
fn benchmark_attack(c: &mut Criterion) {
    let mut rng = GameRng::new(42);
    let deck = ModifierDeck::standard(EntityId::new(1), &mut rng);

    let mut group = c.benchmark_group("Attack");
    for mode in [AttackMode::Normal, AttackMode::Advantage, AttackMode::Disadvantage] {
        let request = AttackRequest::new(3, 10).with_shield(1).with_mode(mode);
        group.bench_with_input(BenchmarkId::new("mode", format!("{mode:?}")), &request, |b, request| {
            let mut rng = GameRng::new(7);
            b.iter(|| black_box(resolve_attack(black_box(&deck), &mut rng, request)));
        });
    }
    group.finish();
}

criterion_group!(benches, benchmark_draw, benchmark_attack);
criterion_main!(benches);
