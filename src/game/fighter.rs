//! Fighter State
//!
//! The per-fighter record: transform, hit points, facing, animation
//! clock and the two combat probes. Behavior (state transitions) lives
//! in [`crate::game::states`]; this module owns the mechanical pieces
//! every state shares: sprite geometry, gravity and wall clamping, and
//! frame stepping.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::{Rect, Vec2};
use crate::game::config::{FighterConfig, MatchConfig};
use crate::game::probe::{StrikeProbe, VulnerableProbe};
use crate::game::states::FighterState;
use crate::MAX_HP;

// =============================================================================
// SPRITE AND PHYSICS CONSTANTS
// =============================================================================

/// Sprite cell width in sheet units.
pub const SPRITE_WIDTH: f32 = 175.0;
/// Sprite cell height in sheet units.
pub const SPRITE_HEIGHT: f32 = 100.0;
/// World scale applied to sprite-sheet units.
pub const SPRITE_SCALE: f32 = 1.8;

/// Downward acceleration applied each airborne tick.
pub const GRAVITY_PER_TICK: f32 = 0.5;

/// Fighters stop just short of the arena walls.
const WALL_MARGIN: f32 = 0.01;

// =============================================================================
// IDENTITY
// =============================================================================

/// Identifies a fighter by its slot in the match (0 or 1).
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct FighterId(u8);

impl FighterId {
    /// Create from a slot index. Valid slots are 0 and 1.
    pub const fn new(slot: u8) -> Self {
        Self(slot)
    }

    /// Slot index, for indexing the fighter array.
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// The other fighter's id.
    #[inline]
    pub const fn opponent(self) -> Self {
        Self(self.0 ^ 1)
    }
}

impl fmt::Display for FighterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "fighter {}", self.0)
    }
}

/// Which arena wall a fighter starts next to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    /// Spawns by the left wall
    Left,
    /// Spawns by the right wall
    Right,
}

impl Side {
    /// Fighters spawn facing their opponent.
    #[inline]
    pub const fn initial_facing(self) -> Facing {
        match self {
            Side::Left => Facing::Right,
            Side::Right => Facing::Left,
        }
    }
}

/// Horizontal direction a fighter is looking.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Facing {
    /// Looking toward the left wall
    Left,
    /// Looking toward the right wall
    Right,
}

impl Facing {
    /// The opposite facing.
    #[inline]
    pub const fn flipped(self) -> Facing {
        match self {
            Facing::Left => Facing::Right,
            Facing::Right => Facing::Left,
        }
    }

    /// Unit sign along x: +1 looking right, -1 looking left.
    #[inline]
    pub const fn sign(self) -> f32 {
        match self {
            Facing::Left => -1.0,
            Facing::Right => 1.0,
        }
    }
}

// =============================================================================
// FIGHTER
// =============================================================================

/// Complete state of one fighter.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Fighter {
    /// Slot identity
    pub id: FighterId,

    /// Display name
    pub name: String,

    /// Wall this fighter started at
    pub side: Side,

    /// Sprite-cell top-left corner in world units
    pub position: Vec2,

    /// Velocity in world units per tick
    pub velocity: Vec2,

    /// Current facing
    pub facing: Facing,

    /// Remaining hit points
    pub hp: u8,

    /// Active behavior state
    pub state: FighterState,

    /// Current animation frame (column in the sprite row)
    pub frame_x: u32,

    /// Current sprite row, derived from state and facing
    pub frame_y: u32,

    /// Ticks spent on the current frame
    pub ticks_in_frame: u32,

    /// True on ticks where `frame_x` advanced
    pub frame_stepped: bool,

    /// Offensive probe
    pub strike: StrikeProbe,

    /// Defensive probe
    pub vulnerable: VulnerableProbe,
}

impl Fighter {
    /// Create a fighter at its spawn point, grounded and idle.
    pub fn new(id: FighterId, config: &FighterConfig, ground_y: f32) -> Self {
        let position = Vec2::new(config.spawn_x, ground_y);
        let facing = config.side.initial_facing();
        let state = FighterState::Idle;
        let spec = state.animation();

        Self {
            id,
            name: config.name.clone(),
            side: config.side,
            position,
            velocity: Vec2::ZERO,
            facing,
            hp: MAX_HP,
            frame_x: spec.entry_frame,
            frame_y: spec.row(facing),
            ticks_in_frame: 0,
            frame_stepped: false,
            state,
            strike: StrikeProbe::new(position, facing),
            vulnerable: VulnerableProbe::new(position, facing),
        }
    }

    /// True while resting on the ground line.
    #[inline]
    pub fn is_grounded(&self, ground_y: f32) -> bool {
        self.position.y >= ground_y
    }

    /// True once the fighter has been defeated.
    #[inline]
    pub fn is_defeated(&self) -> bool {
        matches!(self.state, FighterState::Defeated)
    }

    /// World rectangle of the full sprite cell.
    #[inline]
    pub fn sprite_rect(&self) -> Rect {
        Rect::from_origin_size(self.position, SPRITE_WIDTH, SPRITE_HEIGHT, SPRITE_SCALE)
    }

    /// Source sub-rectangle in the sprite sheet for the current frame.
    #[inline]
    pub fn sprite_src(&self) -> Rect {
        let origin = Vec2::new(
            self.frame_x as f32 * SPRITE_WIDTH,
            self.frame_y as f32 * SPRITE_HEIGHT,
        );
        Rect::from_origin_size(origin, SPRITE_WIDTH, SPRITE_HEIGHT, 1.0)
    }

    /// Remove one hit point, saturating at zero. Returns remaining hp.
    pub fn take_hit(&mut self) -> u8 {
        self.hp = self.hp.saturating_sub(1);
        self.hp
    }

    /// Reset the animation clock for the current state.
    ///
    /// Called on every state entry: the entry frame shows for a full
    /// frame duration before the first step.
    pub(crate) fn begin_animation(&mut self) {
        let spec = self.state.animation();
        self.frame_x = spec.entry_frame;
        self.frame_y = spec.row(self.facing);
        self.ticks_in_frame = 0;
        self.frame_stepped = false;
    }

    /// Advance the animation clock by one tick.
    ///
    /// Each frame holds for the state's frame duration; on rollover the
    /// frame steps (backwards for reversed animations) and wraps at the
    /// state's last frame. `frame_stepped` reports whether this tick
    /// stepped. The sprite row is re-derived so a facing flip takes
    /// effect without waiting for a state change.
    pub(crate) fn animate(&mut self) {
        let spec = self.state.animation();
        self.frame_y = spec.row(self.facing);
        self.frame_stepped = false;

        self.ticks_in_frame += 1;
        if self.ticks_in_frame >= spec.ticks_per_frame {
            self.ticks_in_frame = 0;
            self.frame_x = if spec.reversed {
                if self.frame_x == 0 {
                    spec.max_frame
                } else {
                    self.frame_x - 1
                }
            } else if self.frame_x >= spec.max_frame {
                0
            } else {
                self.frame_x + 1
            };
            self.frame_stepped = true;
        }
    }

    /// Apply gravity and velocity for one tick.
    ///
    /// Gravity accumulates before the vertical move; the move applies
    /// only while it stays at or above the ground line, otherwise the
    /// fighter snaps to the ground and vertical velocity resets.
    ///
    /// The horizontal move is skipped outright when it would push the
    /// sprite box past an arena wall, checked per direction with a
    /// small margin. Only the applied step is cancelled; the stored
    /// velocity is untouched, and a fighter standing beyond a wall can
    /// still move back inside.
    pub(crate) fn integrate(&mut self, config: &MatchConfig) {
        self.velocity.y += GRAVITY_PER_TICK;
        if self.position.y + self.velocity.y <= config.ground_y {
            self.position.y += self.velocity.y;
        } else {
            self.velocity.y = 0.0;
            self.position.y = config.ground_y;
        }

        let min_x = config.arena.left + WALL_MARGIN;
        let max_x = config.arena.right - SPRITE_WIDTH * SPRITE_SCALE - WALL_MARGIN;
        let next_x = self.position.x + self.velocity.x;
        let blocked = (self.velocity.x < 0.0 && next_x < min_x)
            || (self.velocity.x > 0.0 && next_x > max_x);
        if !blocked {
            self.position.x = next_x;
        }
    }

    /// Recompute both probe rectangles from the current transform.
    pub(crate) fn reposition_probes(&mut self) {
        self.strike.reposition(self.position, self.facing);
        self.vulnerable.reposition(self.position, self.facing);
    }
}

// =============================================================================
// TESTS
// =============================================================================
