//! Knightfall Demo
//!
//! Exhibition bout for the Knightfall simulation core. Scripts a full
//! match through the public tick API, logs the fight as it unfolds,
//! then replays the recorded inputs to confirm the simulation is
//! deterministic.

use anyhow::Context;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use knightfall::{
    advance, FightEventData, Key, Keyboard, MatchConfig, MatchState, TICK_RATE, VERSION,
};

/// Hard cap on simulated ticks (one minute of fight time).
const DEMO_TICK_LIMIT: u32 = 60 * TICK_RATE;

/// Trigger line for the advancing fighter to halt and raise its guard.
/// It coasts one last step past this line, still inside strike reach.
const GUARD_STAND_X: f32 = 230.0;

/// One recorded key transition, kept so the bout can be replayed.
#[derive(Clone, Copy)]
enum Edge {
    Press(Key),
    Release(Key),
}

fn main() -> anyhow::Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .expect("Failed to set tracing subscriber");

    info!("Knightfall Core v{}", VERSION);
    info!("Tick Rate: {} Hz", TICK_RATE);

    demo_bout()
}

/// Runs a scripted bout: slot 0 stands on its mark and swings the attack
/// chain without pause, slot 1 runs in, stops on the strike line, absorbs
/// one strike with the guard up, then drops the guard and takes the rest.
fn demo_bout() -> anyhow::Result<()> {
    info!("=== Starting Demo Bout ===");

    let config = MatchConfig::default();
    let mut state = MatchState::new(&config).context("default match configuration rejected")?;
    let mut keyboard = config.keyboard();

    for fighter in &state.fighters {
        info!(
            "{} enters at ({:.0}, {:.0}) with {} hp",
            fighter.name, fighter.position.x, fighter.position.y, fighter.hp
        );
    }

    let attacker_keys = config.fighters[0].bindings;
    let defender_keys = config.fighters[1].bindings;

    // Every key edge is recorded so the bout can be replayed afterwards
    let mut script: Vec<(u32, Edge)> = Vec::new();
    let mut walking = false;
    let mut guarding = false;
    let mut guard_broken = false;

    let mut total_events = 0;
    let mut last_report_tick = 0;

    info!("Running up to {} ticks...", DEMO_TICK_LIMIT);

    for _ in 0..DEMO_TICK_LIMIT {
        let tick = state.tick;

        // Feed this tick's key edges
        if tick == 0 {
            press(&mut keyboard, &mut script, tick, attacker_keys.attack);
            press(&mut keyboard, &mut script, tick, defender_keys.left);
            walking = true;
        }
        if walking && state.fighters[1].position.x <= GUARD_STAND_X {
            release(&mut keyboard, &mut script, tick, defender_keys.left);
            press(&mut keyboard, &mut script, tick, defender_keys.block);
            walking = false;
            guarding = true;
        }
        if guarding && guard_broken {
            release(&mut keyboard, &mut script, tick, defender_keys.block);
            guarding = false;
        }

        // Run tick
        let result = advance(&mut state, &mut keyboard, &config);
        total_events += result.events.len();

        // Log the fight
        for event in &result.events {
            match &event.data {
                FightEventData::HitLanded {
                    attacker,
                    defender,
                    remaining_hp,
                } => {
                    info!(
                        "Tick {}: {} strikes {} ({} hp left)",
                        event.tick,
                        state.fighter(*attacker).name,
                        state.fighter(*defender).name,
                        remaining_hp
                    );
                }
                FightEventData::HitBlocked { attacker, defender } => {
                    info!(
                        "Tick {}: {} blocks a strike from {}",
                        event.tick,
                        state.fighter(*defender).name,
                        state.fighter(*attacker).name
                    );
                    guard_broken = true;
                }
                FightEventData::FighterDefeated { fighter } => {
                    info!("Tick {}: {} falls", event.tick, state.fighter(*fighter).name);
                }
                FightEventData::MatchEnded { winner } => {
                    info!(
                        "Tick {}: match over, {} wins",
                        event.tick,
                        state.fighter(*winner).name
                    );
                }
            }
        }

        // Report every 10 seconds
        if state.tick - last_report_tick >= 600 {
            let [left, right] = &state.fighters;
            info!(
                "Tick {}: {} {} hp at x {:.0} | {} {} hp at x {:.0}",
                state.tick,
                left.name,
                left.hp,
                left.position.x,
                right.name,
                right.hp,
                right.position.x
            );
            last_report_tick = state.tick;
        }

        if result.match_over {
            break;
        }
    }

    report_results(&state, total_events);
    verify_replay(&config, &state, &script)?;

    Ok(())
}

fn press(keyboard: &mut Keyboard, script: &mut Vec<(u32, Edge)>, tick: u32, key: Key) {
    keyboard.press(key, tick);
    script.push((tick, Edge::Press(key)));
}

fn release(keyboard: &mut Keyboard, script: &mut Vec<(u32, Edge)>, tick: u32, key: Key) {
    keyboard.release(key);
    script.push((tick, Edge::Release(key)));
}

/// Prints the final standings.
fn report_results(state: &MatchState, total_events: usize) {
    info!("=== Bout Results ===");

    match state.outcome {
        Some(outcome) => {
            let winner = state.fighter(outcome.winner);
            info!("Winner: {} at tick {}", winner.name, outcome.end_tick);
        }
        None => info!("No decision inside {} ticks", DEMO_TICK_LIMIT),
    }

    for fighter in &state.fighters {
        info!(
            "{}: {} hp, {:?}, at ({:.0}, {:.0})",
            fighter.name,
            fighter.hp,
            fighter.state.name(),
            fighter.position.x,
            fighter.position.y
        );
    }

    info!("Total events: {}", total_events);
}

/// Replays the recorded script from a fresh state and checks that it
/// lands on the same final state as the live bout.
fn verify_replay(
    config: &MatchConfig,
    original: &MatchState,
    script: &[(u32, Edge)],
) -> anyhow::Result<()> {
    info!("=== Verifying Determinism ===");

    let mut state = MatchState::new(config).context("replay configuration rejected")?;
    let mut keyboard = config.keyboard();
    let mut cursor = 0;

    for _ in 0..original.tick {
        while cursor < script.len() && script[cursor].0 == state.tick {
            match script[cursor].1 {
                Edge::Press(key) => keyboard.press(key, state.tick),
                Edge::Release(key) => keyboard.release(key),
            }
            cursor += 1;
        }
        let result = advance(&mut state, &mut keyboard, config);
        if result.match_over {
            break;
        }
    }

    if state == *original {
        info!("DETERMINISM VERIFIED: replay reached the same state");
    } else {
        info!("DETERMINISM FAILURE: replay diverged from the live bout");
    }

    Ok(())
}
