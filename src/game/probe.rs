//! Strike and Vulnerable Probes
//!
//! Every fighter carries two probe rectangles that track its sprite:
//!
//! - the **strike probe**, the region a landed attack covers, and
//! - the **vulnerable probe**, the region of the body that can be hit.
//!
//! Probe placement mirrors with the fighter's facing. The sprite cell is
//! wider than the drawn knight, so the vulnerable probe sits at a small
//! per-facing offset rather than being mirrored exactly.

use serde::{Deserialize, Serialize};

use crate::core::{Rect, Vec2};
use crate::game::fighter::{Facing, SPRITE_SCALE, SPRITE_WIDTH};

// =============================================================================
// PROBE GEOMETRY
// =============================================================================

/// Strike probe width in sprite-sheet units.
pub const STRIKE_WIDTH: f32 = 27.0;
/// Strike probe height in sprite-sheet units.
pub const STRIKE_HEIGHT: f32 = 63.0;
/// Vulnerable probe width in sprite-sheet units.
pub const VULNERABLE_WIDTH: f32 = 30.0;
/// Vulnerable probe height in sprite-sheet units.
pub const VULNERABLE_HEIGHT: f32 = 64.0;

/// Strike offset for standing attacks, relative to the sprite origin.
pub const STRIKE_OFFSET: Vec2 = Vec2::new(50.0, 15.0);
/// Strike offset while attacking out of a run. The deeper x inset tucks
/// the probe in toward the body and the larger y drops it: a low slash
/// rather than the standing arc.
pub const RUNNING_STRIKE_OFFSET: Vec2 = Vec2::new(100.0, 35.0);

const VULNERABLE_OFFSET_RIGHT: Vec2 = Vec2::new(128.0, 40.0);
const VULNERABLE_OFFSET_LEFT: Vec2 = Vec2::new(132.0, 40.0);

/// World rectangle the strike probe covers for a fighter at `position`.
///
/// Facing right, the probe hangs off the leading (right) edge of the
/// sprite cell, inset by `offset.x`; facing left it mirrors to the same
/// inset from the left edge.
pub fn strike_rect(position: Vec2, facing: Facing, offset: Vec2) -> Rect {
    let x = match facing {
        Facing::Right => position.x + SPRITE_WIDTH * SPRITE_SCALE - offset.x,
        Facing::Left => position.x + offset.x - STRIKE_WIDTH * SPRITE_SCALE,
    };
    Rect::from_origin_size(
        Vec2::new(x, position.y + offset.y),
        STRIKE_WIDTH,
        STRIKE_HEIGHT,
        SPRITE_SCALE,
    )
}

/// World rectangle the vulnerable probe covers for a fighter at `position`.
pub fn vulnerable_rect(position: Vec2, facing: Facing) -> Rect {
    let offset = match facing {
        Facing::Right => VULNERABLE_OFFSET_RIGHT,
        Facing::Left => VULNERABLE_OFFSET_LEFT,
    };
    Rect::from_origin_size(
        position + offset,
        VULNERABLE_WIDTH,
        VULNERABLE_HEIGHT,
        SPRITE_SCALE,
    )
}

// =============================================================================
// PROBE STATE
// =============================================================================

/// Offensive probe carried by a fighter.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct StrikeProbe {
    /// Current world-space rectangle
    pub rect: Rect,
    /// Offset in effect; attack states override this on entry
    pub offset: Vec2,
    /// Set when this fighter's strike connected this tick; cleared at the
    /// start of the fighter's next update
    pub hitting: bool,
}

impl StrikeProbe {
    /// Probe for a fighter at `position` with the standing attack offset.
    pub fn new(position: Vec2, facing: Facing) -> Self {
        Self {
            rect: strike_rect(position, facing, STRIKE_OFFSET),
            offset: STRIKE_OFFSET,
            hitting: false,
        }
    }

    /// Recompute the rectangle from the owner's current transform.
    pub fn reposition(&mut self, position: Vec2, facing: Facing) {
        self.rect = strike_rect(position, facing, self.offset);
    }
}

/// Defensive probe carried by a fighter.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct VulnerableProbe {
    /// Current world-space rectangle
    pub rect: Rect,
    /// Set when an opposing strike overlapped this probe; consumed by the
    /// owner's behavior update or dropped (blocked) at end of tick
    pub got_hit: bool,
}

impl VulnerableProbe {
    /// Probe for a fighter at `position`.
    pub fn new(position: Vec2, facing: Facing) -> Self {
        Self {
            rect: vulnerable_rect(position, facing),
            got_hit: false,
        }
    }

    /// Recompute the rectangle from the owner's current transform.
    pub fn reposition(&mut self, position: Vec2, facing: Facing) {
        self.rect = vulnerable_rect(position, facing);
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-3
    }

    #[test]
    fn test_strike_rect_facing_right() {
        let r = strike_rect(Vec2::new(100.0, 200.0), Facing::Right, STRIKE_OFFSET);
        // Leading edge of the cell is at 100 + 175*1.8; probe insets by 50
        assert!(approx(r.left, 100.0 + 175.0 * 1.8 - 50.0));
        assert!(approx(r.top, 215.0));
        assert!(approx(r.width(), 27.0 * 1.8));
        assert!(approx(r.height(), 63.0 * 1.8));
    }

    #[test]
    fn test_strike_rect_facing_left_mirrors() {
        let right = strike_rect(Vec2::new(100.0, 200.0), Facing::Right, STRIKE_OFFSET);
        let left = strike_rect(Vec2::new(100.0, 200.0), Facing::Left, STRIKE_OFFSET);

        // Same inset from the faced cell edge on both sides
        let cell_right = 100.0 + SPRITE_WIDTH * SPRITE_SCALE;
        assert!(approx(cell_right - right.left, STRIKE_OFFSET.x));
        assert!(approx(left.right - 100.0, STRIKE_OFFSET.x));
        assert!(approx(left.width(), right.width()));
    }

    #[test]
    fn test_running_strike_sits_closer_and_lower() {
        let standing = strike_rect(Vec2::ZERO, Facing::Right, STRIKE_OFFSET);
        let running = strike_rect(Vec2::ZERO, Facing::Right, RUNNING_STRIKE_OFFSET);

        // Larger x inset pulls the probe toward the body; larger y drops it
        assert!(running.left < standing.left);
        assert!(running.top > standing.top);
    }

    #[test]
    fn test_vulnerable_rect_offsets() {
        let right = vulnerable_rect(Vec2::new(0.0, 0.0), Facing::Right);
        let left = vulnerable_rect(Vec2::new(0.0, 0.0), Facing::Left);

        assert!(approx(right.left, 128.0));
        assert!(approx(left.left, 132.0));
        assert!(approx(right.top, 40.0));
        assert!(approx(right.width(), 30.0 * 1.8));
        assert!(approx(right.height(), 64.0 * 1.8));
    }

    #[test]
    fn test_reposition_tracks_movement() {
        let mut probe = VulnerableProbe::new(Vec2::ZERO, Facing::Right);
        let before = probe.rect;

        probe.reposition(Vec2::new(10.0, 0.0), Facing::Right);
        assert!(approx(probe.rect.left, before.left + 10.0));
        assert!(!probe.got_hit);
    }

    #[test]
    fn test_strike_probe_offset_override() {
        let mut probe = StrikeProbe::new(Vec2::ZERO, Facing::Right);
        let standing = probe.rect;

        probe.offset = RUNNING_STRIKE_OFFSET;
        probe.reposition(Vec2::ZERO, Facing::Right);
        assert!(probe.rect.left < standing.left);
        assert!(!probe.hitting);
    }
}
