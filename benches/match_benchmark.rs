//! Benchmarks for running complete matches.
//!
//! Covers the full round loop: movement, food respawn and combat.

#![allow(missing_docs)]
#![allow(clippy::unwrap_used)]

use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};
use gridsnake::engine::apply_step;
use gridsnake::{Direction, GameState, Match, MatchConfig, ScriptedDirections, Snake};
use rand::SeedableRng;
use rand::rngs::SmallRng;

fn play(config: &MatchConfig, cpus: usize, seed: u64) -> u32 {
    let game = Match::cpu_only(config, cpus, SmallRng::seed_from_u64(seed)).unwrap();
    game.play(&mut ScriptedDirections::new(Vec::new()))
        .unwrap()
        .rounds
}

fn bench_default_match(c: &mut Criterion) {
    let config = MatchConfig::default();

    c.bench_function("match_10x10_5p", |b| {
        b.iter(|| black_box(play(black_box(&config), 5, black_box(42))));
    });
}

fn bench_large_board(c: &mut Criterion) {
    let config = MatchConfig {
        board_width: 32,
        board_height: 32,
        food_count: 40,
        ..MatchConfig::default()
    };

    c.bench_function("match_32x32_8p", |b| {
        b.iter(|| black_box(play(black_box(&config), 8, black_box(7))));
    });
}

fn bench_match_batch(c: &mut Criterion) {
    // Ten seeds sequentially (without parallel overhead)
    let config = MatchConfig::default();

    c.bench_function("10_matches_sequential", |b| {
        b.iter(|| {
            for seed in 0..10u64 {
                black_box(play(&config, 5, seed));
            }
        });
    });
}

fn bench_single_step(c: &mut Criterion) {
    let mut state = GameState::new(10, 10).unwrap();
    let mut rng = SmallRng::seed_from_u64(1);
    let id = state.register(Snake::new(0, "bench")).unwrap();
    state.spawn_snake(id, &mut rng).unwrap();
    state.fill_food(5, &(1..=999_999), &mut rng).unwrap();

    c.bench_function("apply_step", |b| {
        b.iter(|| {
            let direction = Direction::random(&mut rng);
            black_box(apply_step(&mut state, id, direction, &(1..=999_999), &mut rng).unwrap())
        });
    });
}

criterion_group!(
    benches,
    bench_default_match,
    bench_large_board,
    bench_match_batch,
    bench_single_step
);
criterion_main!(benches);
