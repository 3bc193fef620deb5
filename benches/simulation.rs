//! Performance benchmarks for the match simulation.
//!
//! Run with: cargo bench
//!
//! This will generate HTML reports in target/criterion/

use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};

use knightfall::{advance, Keyboard, MatchConfig, MatchState};

/// Fresh match on the default arena.
fn fresh_match() -> (MatchState, Keyboard, MatchConfig) {
    let config = MatchConfig::default();
    let state = MatchState::new(&config).expect("default config is valid");
    let keyboard = config.keyboard();
    (state, keyboard, config)
}

/// One second of simulated time with no inputs.
fn bench_idle_ticks(c: &mut Criterion) {
    let (state, keyboard, config) = fresh_match();

    c.bench_function("idle_second", |b| {
        b.iter_batched(
            || (state.clone(), keyboard.clone()),
            |(mut state, mut keyboard)| {
                for _ in 0..60 {
                    advance(&mut state, &mut keyboard, &config);
                }
                black_box(state.tick)
            },
            BatchSize::SmallInput,
        );
    });
}

/// One second with both fighters running.
fn bench_running_ticks(c: &mut Criterion) {
    let (state, mut keyboard, config) = fresh_match();
    // Pending press edges are cloned into every iteration, so each run
    // starts with both fighters pressing toward their own facing
    keyboard.press(config.fighters[0].bindings.right, 0);
    keyboard.press(config.fighters[1].bindings.left, 0);

    c.bench_function("running_second", |b| {
        b.iter_batched(
            || (state.clone(), keyboard.clone()),
            |(mut state, mut keyboard)| {
                for _ in 0..60 {
                    advance(&mut state, &mut keyboard, &config);
                }
                black_box(state.fighters[0].position.x)
            },
            BatchSize::SmallInput,
        );
    });
}

/// A held attack chain swinging at a target standing in reach.
fn bench_attack_chain(c: &mut Criterion) {
    let (mut state, mut keyboard, config) = fresh_match();
    state.fighters[1].position.x = 230.0;
    keyboard.press(config.fighters[0].bindings.attack, 0);

    c.bench_function("attack_chain_in_range", |b| {
        b.iter_batched(
            || (state.clone(), keyboard.clone()),
            |(mut state, mut keyboard)| {
                let mut events = 0;
                for _ in 0..96 {
                    events += advance(&mut state, &mut keyboard, &config).events.len();
                }
                black_box(events)
            },
            BatchSize::SmallInput,
        );
    });
}

/// The whole bout from first swing to knockout.
fn bench_bout_to_knockout(c: &mut Criterion) {
    let (mut state, mut keyboard, config) = fresh_match();
    state.fighters[1].position.x = 230.0;
    keyboard.press(config.fighters[0].bindings.attack, 0);

    c.bench_function("bout_to_knockout", |b| {
        b.iter_batched(
            || (state.clone(), keyboard.clone()),
            |(mut state, mut keyboard)| {
                for _ in 0..3600 {
                    if advance(&mut state, &mut keyboard, &config).match_over {
                        break;
                    }
                }
                black_box(state.tick)
            },
            BatchSize::SmallInput,
        );
    });
}

criterion_group!(
    benches,
    bench_idle_ticks,
    bench_running_ticks,
    bench_attack_chain,
    bench_bout_to_knockout,
);
criterion_main!(benches);
