//! Fighter Behavior States
//!
//! The state machine driving each fighter. One state is active at a
//! time; its update runs once per tick after animation and kinematics,
//! reads the fighter's bound input, and may transition (entering a state
//! applies its velocity policy and resets the animation clock) or swing
//! at the opponent.
//!
//! Exit conditions per state:
//!
//! | State         | Exits                                              |
//! |---------------|----------------------------------------------------|
//! | Idle          | hit -> Hurt/Defeated; block/move/jump/attack input |
//! | Walk          | move released -> Idle; jump; attack                |
//! | Run           | move released -> Idle; jump; attack press          |
//! | Jump          | last frame -> Idle                                 |
//! | AttackLight   | last frame -> AttackHeavy (attack held) or Idle    |
//! | AttackHeavy   | last frame -> Idle                                 |
//! | AttackRunning | last frame -> Idle                                 |
//! | Hurt          | last frame -> Idle                                 |
//! | Block         | block released -> Idle                             |
//! | Defeated      | none                                               |
//!
//! Only Idle consumes the incoming-hit latch; a hit arriving in any
//! other state is dropped at probe maintenance, which is what makes
//! blocking (and trading mid-swing) absorb damage.

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::game::combat;
use crate::game::events::FightEvent;
use crate::game::fighter::{Facing, Fighter};
use crate::game::input::{Action, BoundInput};
use crate::game::probe::{RUNNING_STRIKE_OFFSET, STRIKE_OFFSET};
use crate::TICKS_PER_FRAME;

// =============================================================================
// MOVEMENT CONSTANTS
// =============================================================================

/// Forward walk speed, world units per tick.
pub const WALK_SPEED: f32 = 1.0;
/// Backward walk speed (walking away from the faced direction).
pub const WALK_BACK_SPEED: f32 = 0.5;
/// Run speed.
pub const RUN_SPEED: f32 = 2.0;
/// Upward velocity applied on jump entry.
pub const JUMP_VELOCITY: f32 = -10.0;
/// Horizontal speed carried into a jump out of a run.
pub const RUN_JUMP_CARRY: f32 = 1.0;
/// Horizontal speed carried into a jump out of a walk.
pub const WALK_JUMP_CARRY: f32 = 0.7;

// =============================================================================
// STATE SET
// =============================================================================

/// Discriminant of a fighter state, without payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StateName {
    /// Standing, reading input
    Idle,
    /// Walking (half speed when backward)
    Walk,
    /// Running toward the faced direction
    Run,
    /// Airborne
    Jump,
    /// Quick swing
    AttackLight,
    /// Follow-up swing chained from a light attack
    AttackHeavy,
    /// Swing out of a run
    AttackRunning,
    /// Hit stun
    Hurt,
    /// Guard raised
    Block,
    /// Out of hit points; terminal
    Defeated,
}

/// Active behavior state of a fighter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum FighterState {
    /// Standing, reading input
    Idle,
    /// Walking; `backward` when traveling away from the faced direction
    Walk {
        /// Traveling opposite to the facing (half speed, reversed frames)
        backward: bool,
    },
    /// Running toward the faced direction
    Run,
    /// Airborne
    Jump,
    /// Quick swing
    AttackLight,
    /// Follow-up swing chained from a light attack
    AttackHeavy,
    /// Swing out of a run
    AttackRunning,
    /// Hit stun
    Hurt,
    /// Guard raised
    Block,
    /// Out of hit points; terminal
    Defeated,
}

/// Animation parameters of one state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AnimationSpec {
    /// Last frame index in the row (frames run 0..=max_frame)
    pub max_frame: u32,
    /// Frame shown on state entry
    pub entry_frame: u32,
    /// Sprite row while facing right
    pub row_right: u32,
    /// Sprite row while facing left
    pub row_left: u32,
    /// Ticks each frame is held
    pub ticks_per_frame: u32,
    /// Frames step downward instead of upward
    pub reversed: bool,
}

impl AnimationSpec {
    /// Sprite row for the given facing.
    #[inline]
    pub fn row(&self, facing: Facing) -> u32 {
        match facing {
            Facing::Right => self.row_right,
            Facing::Left => self.row_left,
        }
    }
}

impl FighterState {
    /// Discriminant without payload.
    pub fn name(&self) -> StateName {
        match self {
            FighterState::Idle => StateName::Idle,
            FighterState::Walk { .. } => StateName::Walk,
            FighterState::Run => StateName::Run,
            FighterState::Jump => StateName::Jump,
            FighterState::AttackLight => StateName::AttackLight,
            FighterState::AttackHeavy => StateName::AttackHeavy,
            FighterState::AttackRunning => StateName::AttackRunning,
            FighterState::Hurt => StateName::Hurt,
            FighterState::Block => StateName::Block,
            FighterState::Defeated => StateName::Defeated,
        }
    }

    /// Animation parameters for this state.
    ///
    /// Every state currently shares the default frame duration; the
    /// per-state field exists so content can diverge.
    pub fn animation(&self) -> AnimationSpec {
        let (max_frame, entry_frame, row_right, row_left, reversed) = match self {
            FighterState::Idle => (3, 0, 0, 1, false),
            FighterState::Walk { backward } => (7, 7, 2, 3, *backward),
            FighterState::Run => (6, 0, 18, 19, false),
            FighterState::Jump => (6, 0, 16, 17, false),
            FighterState::AttackLight => (5, 0, 4, 5, false),
            FighterState::AttackHeavy => (4, 0, 6, 7, false),
            FighterState::AttackRunning => (5, 0, 20, 21, false),
            FighterState::Hurt => (2, 0, 12, 13, false),
            FighterState::Block => (4, 0, 10, 11, false),
            FighterState::Defeated => (0, 0, 14, 15, false),
        };
        AnimationSpec {
            max_frame,
            entry_frame,
            row_right,
            row_left,
            ticks_per_frame: TICKS_PER_FRAME,
            reversed,
        }
    }

    /// Frame on which this state's strike resolves, if it attacks.
    pub fn strike_frame(&self) -> Option<u32> {
        match self {
            FighterState::AttackLight => Some(4),
            FighterState::AttackHeavy => Some(2),
            FighterState::AttackRunning => Some(4),
            _ => None,
        }
    }
}

// =============================================================================
// TRANSITIONS
// =============================================================================

/// Enter `next`: apply its velocity policy and strike offset, then reset
/// the animation clock.
///
/// Several updates chain transitions within one tick (release-plus-jump
/// enters Idle and then Jump); each entry's side effects apply in order,
/// which is why such a jump carries no horizontal speed.
pub(crate) fn transition(fighter: &mut Fighter, next: FighterState) {
    let prev = fighter.state.name();

    match next {
        FighterState::Idle
        | FighterState::Hurt
        | FighterState::Block
        | FighterState::Defeated => {
            fighter.velocity.x = 0.0;
        }
        FighterState::Walk { backward } => {
            fighter.velocity.x = if backward {
                -fighter.facing.sign() * WALK_BACK_SPEED
            } else {
                fighter.facing.sign() * WALK_SPEED
            };
        }
        FighterState::Run => {
            fighter.velocity.x = fighter.facing.sign() * RUN_SPEED;
        }
        FighterState::Jump => {
            // Carried speed follows the facing, even out of a backward walk
            fighter.velocity.x = match prev {
                StateName::Run => fighter.facing.sign() * RUN_JUMP_CARRY,
                StateName::Walk => fighter.facing.sign() * WALK_JUMP_CARRY,
                _ => 0.0,
            };
            fighter.velocity.y = JUMP_VELOCITY;
        }
        FighterState::AttackLight | FighterState::AttackHeavy => {
            fighter.velocity.x = 0.0;
            fighter.strike.offset = STRIKE_OFFSET;
        }
        FighterState::AttackRunning => {
            fighter.velocity.x = fighter.facing.sign() * RUN_SPEED;
            fighter.strike.offset = RUNNING_STRIKE_OFFSET;
        }
    }

    fighter.state = next;
    fighter.begin_animation();
    trace!("{}: {:?} -> {:?}", fighter.id, prev, next.name());
}

// =============================================================================
// PER-TICK BEHAVIOR
// =============================================================================

/// Run the active state's behavior for one tick.
pub(crate) fn update(
    me: &mut Fighter,
    opponent: &mut Fighter,
    input: &BoundInput<'_>,
    tick: u32,
    events: &mut Vec<FightEvent>,
) {
    match me.state {
        FighterState::Idle => update_idle(me, opponent, input, tick, events),
        FighterState::Walk { .. } => update_walk(me, input),
        FighterState::Run => update_run(me, input),
        FighterState::Jump => update_jump(me),
        FighterState::AttackLight | FighterState::AttackHeavy | FighterState::AttackRunning => {
            update_attack(me, opponent, input)
        }
        FighterState::Hurt => update_hurt(me),
        FighterState::Block => update_block(me, input),
        FighterState::Defeated => {}
    }
}

/// Consume the incoming-hit latch: take damage and fall into hit stun,
/// or into Defeated when hit points run out.
fn consume_hit(me: &mut Fighter, opponent: &Fighter, tick: u32, events: &mut Vec<FightEvent>) {
    me.vulnerable.got_hit = false;
    let remaining = me.take_hit();
    events.push(FightEvent::hit_landed(tick, opponent.id, me.id, remaining));

    if remaining == 0 {
        transition(me, FighterState::Defeated);
        events.push(FightEvent::fighter_defeated(tick, me.id));
    } else {
        transition(me, FighterState::Hurt);
    }
}

fn update_idle(
    me: &mut Fighter,
    opponent: &mut Fighter,
    input: &BoundInput<'_>,
    tick: u32,
    events: &mut Vec<FightEvent>,
) {
    if me.vulnerable.got_hit {
        consume_hit(me, opponent, tick, events);
        return;
    }

    // Guard first; a movement intent in the same tick supersedes it
    if input.is_held(Action::Block) {
        transition(me, FighterState::Block);
    }

    // A directional press away from the facing only turns; toward it
    // runs. Running in a new direction therefore takes two quick taps,
    // turn then run. Held keys walk, which keeps backward walking
    // reachable for keys already down when Idle regains control.
    if input.was_just_pressed(Action::Left, true) {
        match me.facing {
            Facing::Right => turn(me, Facing::Left),
            Facing::Left => transition(me, FighterState::Run),
        }
    } else if input.was_just_pressed(Action::Right, true) {
        match me.facing {
            Facing::Left => turn(me, Facing::Right),
            Facing::Right => transition(me, FighterState::Run),
        }
    } else if input.is_held(Action::Right) {
        let backward = me.facing == Facing::Left;
        transition(me, FighterState::Walk { backward });
    } else if input.is_held(Action::Left) {
        let backward = me.facing == Facing::Right;
        transition(me, FighterState::Walk { backward });
    } else if input.is_held(Action::Jump) {
        transition(me, FighterState::Jump);
    } else if input.is_held(Action::Attack) {
        transition(me, FighterState::AttackLight);
    }
}

fn turn(me: &mut Fighter, facing: Facing) {
    me.facing = facing;
    trace!("{} turns {:?}", me.id, facing);
}

fn update_walk(me: &mut Fighter, input: &BoundInput<'_>) {
    // Independent checks; a later transition supersedes an earlier one
    if input.was_just_released(&[Action::Left, Action::Right]) {
        transition(me, FighterState::Idle);
    }
    if input.is_held(Action::Jump) {
        transition(me, FighterState::Jump);
    }
    if input.is_held(Action::Attack) {
        transition(me, FighterState::AttackLight);
    }
}

fn update_run(me: &mut Fighter, input: &BoundInput<'_>) {
    if input.was_just_released(&[Action::Left, Action::Right]) {
        transition(me, FighterState::Idle);
    }
    if input.is_held(Action::Jump) {
        transition(me, FighterState::Jump);
    }
    // A single press only; a press that classified as a double tap does
    // not start a running attack
    if input.was_just_pressed(Action::Attack, false) {
        transition(me, FighterState::AttackRunning);
    }
}

fn update_jump(me: &mut Fighter) {
    if me.frame_x == me.state.animation().max_frame {
        transition(me, FighterState::Idle);
    }
}

fn update_attack(me: &mut Fighter, opponent: &mut Fighter, input: &BoundInput<'_>) {
    // The strike resolves exactly once, on the tick the animation steps
    // onto the strike frame
    if let Some(strike_frame) = me.state.strike_frame() {
        if me.frame_stepped && me.frame_x == strike_frame {
            combat::resolve_strike(me, opponent);
        }
    }

    if me.frame_x == me.state.animation().max_frame {
        let chain =
            me.state == FighterState::AttackLight && input.is_held(Action::Attack);
        if chain {
            transition(me, FighterState::AttackHeavy);
        } else {
            transition(me, FighterState::Idle);
        }
    }
}

fn update_hurt(me: &mut Fighter) {
    if me.frame_x == me.state.animation().max_frame {
        transition(me, FighterState::Idle);
    }
}

fn update_block(me: &mut Fighter, input: &BoundInput<'_>) {
    if input.was_just_released(&[Action::Block]) {
        transition(me, FighterState::Idle);
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::config::MatchConfig;
    use crate::game::fighter::FighterId;
    use crate::game::input::{Key, KeyBindings, Keyboard};

    fn setup() -> (Fighter, Fighter, Keyboard, MatchConfig) {
        let config = MatchConfig::default();
        let me = Fighter::new(FighterId::new(0), &config.fighters[0], config.ground_y);
        let opponent = Fighter::new(FighterId::new(1), &config.fighters[1], config.ground_y);
        let keyboard = Keyboard::tracking(
            config.fighters[0]
                .bindings
                .keys()
                .into_iter()
                .chain(config.fighters[1].bindings.keys()),
        );
        (me, opponent, keyboard, config)
    }

    fn bindings() -> KeyBindings {
        KeyBindings::player_one()
    }

    /// Press a key and settle so it reads as held.
    fn hold(kb: &mut Keyboard, key: Key) {
        kb.press(key, 0);
        kb.end_tick();
    }

    fn run_update(me: &mut Fighter, opponent: &mut Fighter, kb: &Keyboard) -> Vec<FightEvent> {
        let mut events = Vec::new();
        let b = bindings();
        let input = BoundInput::new(kb, &b);
        update(me, opponent, &input, 0, &mut events);
        events
    }

    #[test]
    fn test_idle_held_key_walks_forward() {
        let (mut me, mut opp, mut kb, _) = setup();
        hold(&mut kb, bindings().right);

        run_update(&mut me, &mut opp, &kb);
        assert_eq!(me.state, FighterState::Walk { backward: false });
        assert_eq!(me.velocity.x, WALK_SPEED);
        assert_eq!(me.frame_x, 7);
    }

    #[test]
    fn test_idle_held_away_key_walks_backward() {
        let (mut me, mut opp, mut kb, _) = setup();
        assert_eq!(me.facing, Facing::Right);
        hold(&mut kb, bindings().left);

        run_update(&mut me, &mut opp, &kb);
        assert_eq!(me.state, FighterState::Walk { backward: true });
        assert_eq!(me.velocity.x, -WALK_BACK_SPEED);
        assert!(me.state.animation().reversed);
    }

    #[test]
    fn test_press_away_from_facing_only_turns() {
        let (mut me, mut opp, mut kb, _) = setup();
        me.facing = Facing::Left;
        kb.press(bindings().right, 0);

        run_update(&mut me, &mut opp, &kb);
        assert_eq!(me.facing, Facing::Right);
        assert_eq!(me.state, FighterState::Idle);
        assert_eq!(me.velocity.x, 0.0);
    }

    #[test]
    fn test_press_toward_facing_runs() {
        let (mut me, mut opp, mut kb, _) = setup();
        assert_eq!(me.facing, Facing::Right);
        kb.press(bindings().right, 0);

        run_update(&mut me, &mut opp, &kb);
        assert_eq!(me.state, FighterState::Run);
        assert_eq!(me.velocity.x, RUN_SPEED);
    }

    #[test]
    fn test_tap_turn_then_tap_runs() {
        let (mut me, mut opp, mut kb, _) = setup();
        let left = bindings().left;

        kb.press(left, 0);
        run_update(&mut me, &mut opp, &kb);
        assert_eq!(me.facing, Facing::Left);
        assert_eq!(me.state, FighterState::Idle);

        kb.release(left);
        kb.end_tick();

        // The second tap classifies as a double; the turned fighter runs
        kb.press(left, 5);
        assert!(kb.was_double_tapped(left));
        run_update(&mut me, &mut opp, &kb);
        assert_eq!(me.state, FighterState::Run);
        assert_eq!(me.velocity.x, -RUN_SPEED);
    }

    #[test]
    fn test_movement_supersedes_block() {
        let (mut me, mut opp, mut kb, _) = setup();
        hold(&mut kb, bindings().block);
        hold(&mut kb, bindings().right);

        run_update(&mut me, &mut opp, &kb);
        assert_eq!(me.state, FighterState::Walk { backward: false });
    }

    #[test]
    fn test_block_enter_and_exit() {
        let (mut me, mut opp, mut kb, _) = setup();
        hold(&mut kb, bindings().block);

        run_update(&mut me, &mut opp, &kb);
        assert_eq!(me.state, FighterState::Block);

        kb.release(bindings().block);
        run_update(&mut me, &mut opp, &kb);
        assert_eq!(me.state, FighterState::Idle);
    }

    #[test]
    fn test_idle_consumes_hit_into_hurt() {
        let (mut me, mut opp, mut kb, _) = setup();
        // A held block key loses to the hit check
        hold(&mut kb, bindings().block);
        me.vulnerable.got_hit = true;

        let events = run_update(&mut me, &mut opp, &kb);
        assert_eq!(me.state, FighterState::Hurt);
        assert_eq!(me.hp, crate::MAX_HP - 1);
        assert!(!me.vulnerable.got_hit);
        assert_eq!(
            events,
            vec![FightEvent::hit_landed(0, opp.id, me.id, crate::MAX_HP - 1)]
        );
    }

    #[test]
    fn test_fatal_hit_defeats() {
        let (mut me, mut opp, kb, _) = setup();
        me.hp = 1;
        me.vulnerable.got_hit = true;

        let events = run_update(&mut me, &mut opp, &kb);
        assert_eq!(me.state, FighterState::Defeated);
        assert_eq!(me.hp, 0);
        assert_eq!(events.len(), 2);
        assert_eq!(events[1], FightEvent::fighter_defeated(0, me.id));
    }

    #[test]
    fn test_release_plus_jump_is_neutral_jump() {
        let (mut me, mut opp, mut kb, _) = setup();
        let b = bindings();
        kb.press(b.right, 0);
        kb.press(b.jump, 0);
        kb.end_tick();
        transition(&mut me, FighterState::Walk { backward: false });
        assert_eq!(me.velocity.x, WALK_SPEED);

        // Walk exit and jump entry chain within one update; the Idle
        // entry zeroes the carried speed first
        kb.release(b.right);
        run_update(&mut me, &mut opp, &kb);
        assert_eq!(me.state, FighterState::Jump);
        assert_eq!(me.velocity.x, 0.0);
        assert_eq!(me.velocity.y, JUMP_VELOCITY);
    }

    #[test]
    fn test_walk_to_jump_carries_speed() {
        let (mut me, mut opp, mut kb, _) = setup();
        transition(&mut me, FighterState::Walk { backward: false });
        hold(&mut kb, bindings().jump);

        run_update(&mut me, &mut opp, &kb);
        assert_eq!(me.state, FighterState::Jump);
        assert_eq!(me.velocity.x, WALK_JUMP_CARRY);
        assert_eq!(me.velocity.y, JUMP_VELOCITY);
    }

    #[test]
    fn test_run_to_jump_carries_speed() {
        let (mut me, mut opp, mut kb, _) = setup();
        me.facing = Facing::Left;
        transition(&mut me, FighterState::Run);
        assert_eq!(me.velocity.x, -RUN_SPEED);
        hold(&mut kb, bindings().jump);

        run_update(&mut me, &mut opp, &kb);
        assert_eq!(me.state, FighterState::Jump);
        assert_eq!(me.velocity.x, -RUN_JUMP_CARRY);
    }

    #[test]
    fn test_backward_walk_jump_carries_facing_direction() {
        let (mut me, mut opp, mut kb, _) = setup();
        assert_eq!(me.facing, Facing::Right);
        transition(&mut me, FighterState::Walk { backward: true });
        assert_eq!(me.velocity.x, -WALK_BACK_SPEED);
        hold(&mut kb, bindings().jump);

        // The carry is keyed by facing, so jumping out of a backward
        // walk lurches forward
        run_update(&mut me, &mut opp, &kb);
        assert_eq!(me.state, FighterState::Jump);
        assert_eq!(me.velocity.x, WALK_JUMP_CARRY);
    }

    #[test]
    fn test_running_attack_requires_single_press() {
        let (mut me, mut opp, mut kb, _) = setup();
        let attack = bindings().attack;
        transition(&mut me, FighterState::Run);

        // A double-classified press does not trigger the running attack
        kb.press(attack, 0);
        kb.release(attack);
        kb.end_tick();
        kb.press(attack, 3);
        assert!(kb.was_double_tapped(attack));
        run_update(&mut me, &mut opp, &kb);
        assert_eq!(me.state, FighterState::Run);

        // A fresh single press does
        kb.release(attack);
        kb.end_tick();
        kb.press(attack, 60);
        run_update(&mut me, &mut opp, &kb);
        assert_eq!(me.state, FighterState::AttackRunning);
        assert_eq!(me.strike.offset, RUNNING_STRIKE_OFFSET);
    }

    #[test]
    fn test_attack_light_chains_to_heavy_when_held() {
        let (mut me, mut opp, mut kb, _) = setup();
        transition(&mut me, FighterState::AttackLight);
        me.frame_x = me.state.animation().max_frame;
        hold(&mut kb, bindings().attack);

        run_update(&mut me, &mut opp, &kb);
        assert_eq!(me.state, FighterState::AttackHeavy);
        assert_eq!(me.frame_x, 0);
    }

    #[test]
    fn test_attack_light_ends_to_idle_when_released() {
        let (mut me, mut opp, kb, _) = setup();
        transition(&mut me, FighterState::AttackLight);
        me.frame_x = me.state.animation().max_frame;

        run_update(&mut me, &mut opp, &kb);
        assert_eq!(me.state, FighterState::Idle);
    }

    #[test]
    fn test_hurt_recovers_at_last_frame() {
        let (mut me, mut opp, kb, _) = setup();
        transition(&mut me, FighterState::Hurt);

        run_update(&mut me, &mut opp, &kb);
        assert_eq!(me.state, FighterState::Hurt);

        me.frame_x = me.state.animation().max_frame;
        run_update(&mut me, &mut opp, &kb);
        assert_eq!(me.state, FighterState::Idle);
    }

    #[test]
    fn test_defeated_ignores_input() {
        let (mut me, mut opp, mut kb, _) = setup();
        transition(&mut me, FighterState::Defeated);
        hold(&mut kb, bindings().jump);
        me.vulnerable.got_hit = true;

        let events = run_update(&mut me, &mut opp, &kb);
        assert_eq!(me.state, FighterState::Defeated);
        assert!(events.is_empty());
        // The stale latch is left for probe maintenance to drop
        assert!(me.vulnerable.got_hit);
    }

    #[test]
    fn test_strike_frames() {
        assert_eq!(FighterState::AttackLight.strike_frame(), Some(4));
        assert_eq!(FighterState::AttackHeavy.strike_frame(), Some(2));
        assert_eq!(FighterState::AttackRunning.strike_frame(), Some(4));
        assert_eq!(FighterState::Run.strike_frame(), None);
    }

    #[test]
    fn test_animation_rows_per_facing() {
        let spec = FighterState::Run.animation();
        assert_eq!(spec.row(Facing::Right), 18);
        assert_eq!(spec.row(Facing::Left), 19);

        let spec = FighterState::Defeated.animation();
        assert_eq!(spec.row(Facing::Right), 14);
        assert_eq!(spec.max_frame, 0);
    }
}
