//! Match State and Tick Orchestration
//!
//! One call to [`advance`] is one simulation tick. Fighters update
//! strictly in slot order; within a fighter's phase the order is fixed:
//! animation, kinematics, behavior, probe maintenance. The same inputs
//! against the same state always produce the same match.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::game::combat;
use crate::game::config::{ConfigError, MatchConfig};
use crate::game::events::FightEvent;
use crate::game::fighter::{Fighter, FighterId};
use crate::game::input::{BoundInput, Keyboard};
use crate::game::states;

/// Result of a tick.
#[derive(Debug, Default)]
pub struct TickResult {
    /// Events generated this tick
    pub events: Vec<FightEvent>,
    /// Whether the match is over
    pub match_over: bool,
    /// Winner, once the match is over
    pub winner: Option<FighterId>,
}

/// How a finished match ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchOutcome {
    /// Fighter left standing
    pub winner: FighterId,
    /// Tick the match ended on
    pub end_tick: u32,
}

/// Complete state of a match.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MatchState {
    /// Ticks simulated so far
    pub tick: u32,

    /// Both fighters, indexed by slot
    pub fighters: [Fighter; 2],

    /// Set once, on the tick a fighter falls; freezes the simulation
    pub outcome: Option<MatchOutcome>,
}

impl MatchState {
    /// Create a match from a validated configuration.
    pub fn new(config: &MatchConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let fighters = [
            Fighter::new(FighterId::new(0), &config.fighters[0], config.ground_y),
            Fighter::new(FighterId::new(1), &config.fighters[1], config.ground_y),
        ];

        Ok(Self {
            tick: 0,
            fighters,
            outcome: None,
        })
    }

    /// The fighter in the given slot.
    #[inline]
    pub fn fighter(&self, id: FighterId) -> &Fighter {
        &self.fighters[id.index()]
    }
}

/// Both fighters of a slot, mutably: the slot's own fighter first.
fn pair_mut(fighters: &mut [Fighter; 2], slot: usize) -> (&mut Fighter, &mut Fighter) {
    let (head, tail) = fighters.split_at_mut(1);
    if slot == 0 {
        (&mut head[0], &mut tail[0])
    } else {
        (&mut tail[0], &mut head[0])
    }
}

/// Run one simulation tick.
///
/// Per fighter, in slot order: drop the previous tick's strike marker,
/// step the animation clock, integrate kinematics, run the state
/// behavior (which may transition and may strike the opponent), then
/// recompute probe rectangles and consume-or-drop the hit latch. The
/// keyboard settles its press/release edges once both fighters have
/// read it.
///
/// The first fighter to fall decides the match: its opponent wins, a
/// `MatchEnded` event is emitted and every later call returns
/// immediately with `match_over` set.
pub fn advance(
    state: &mut MatchState,
    keyboard: &mut Keyboard,
    config: &MatchConfig,
) -> TickResult {
    if let Some(outcome) = state.outcome {
        return TickResult {
            events: Vec::new(),
            match_over: true,
            winner: Some(outcome.winner),
        };
    }

    let mut events = Vec::new();

    // 1. Update each fighter, strictly in slot order
    for slot in 0..2 {
        let (me, opponent) = pair_mut(&mut state.fighters, slot);
        let input = BoundInput::new(keyboard, &config.fighters[slot].bindings);

        me.strike.hitting = false;
        me.animate();
        me.integrate(config);
        states::update(me, opponent, &input, state.tick, &mut events);
        me.reposition_probes();
        combat::drop_stale_hit(me, state.tick, &mut events);
    }

    // 2. Settle keyboard edges now that both fighters have read them
    keyboard.end_tick();

    // 3. Check the end condition: the first fallen fighter in slot
    //    order loses, even on a double knockout
    for slot in 0..2 {
        if state.fighters[slot].is_defeated() {
            let winner = state.fighters[slot].id.opponent();
            state.outcome = Some(MatchOutcome {
                winner,
                end_tick: state.tick,
            });
            events.push(FightEvent::match_ended(state.tick, winner));
            debug!(
                "match over at tick {}: {} wins",
                state.tick,
                state.fighter(winner).name
            );
            break;
        }
    }

    // 4. Advance tick counter
    state.tick += 1;

    TickResult {
        events,
        match_over: state.outcome.is_some(),
        winner: state.outcome.map(|o| o.winner),
    }
}

// =============================================================================
// TESTS
// =============================================================================
