//! Render Descriptors
//!
//! The outward-facing view of a match: pure-data descriptors a host
//! renderer turns into pixels. The simulation keeps rectangles and
//! frame indexes correct; everything here is derived, never stored.

use serde::{Deserialize, Serialize};

use crate::core::{Rect, Vec2};
use crate::game::fighter::{Facing, Fighter, SPRITE_WIDTH};
use crate::MAX_HP;

/// Health bar sprite cell width, in sheet units.
pub const HP_BAR_WIDTH: f32 = 33.0;
/// Health bar sprite cell height, in sheet units.
pub const HP_BAR_HEIGHT: f32 = 6.0;
/// Scale the health bar is drawn at.
pub const HP_BAR_SCALE: f32 = 2.4;

/// How a [`Drawable`] should be painted.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum DrawStyle {
    /// Flat fill, used for the probe overlays
    Fill,
    /// Sub-rectangle of a sprite sheet
    SpriteRegion {
        /// Source rectangle in sheet units
        src: Rect,
    },
}

/// One rectangle the host should draw.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Drawable {
    /// Destination in world units
    pub rect: Rect,
    /// Paint instruction
    pub style: DrawStyle,
}

/// Sprite-sheet row of the health bar for a remaining-hp count.
///
/// The sheet stacks bars from full to empty, so full health is row 0
/// and an empty bar is row [`MAX_HP`].
#[inline]
pub fn hp_bar_row(hp: u8) -> u32 {
    (MAX_HP - hp.min(MAX_HP)) as u32
}

/// The fighter's sprite cell with its current sheet region.
pub fn fighter_sprite(fighter: &Fighter) -> Drawable {
    Drawable {
        rect: fighter.sprite_rect(),
        style: DrawStyle::SpriteRegion {
            src: fighter.sprite_src(),
        },
    }
}

/// The fighter's health bar, anchored above its head.
///
/// The anchor nudges with facing so the bar stays centered over the
/// visible body rather than the sprite cell.
pub fn hp_bar(fighter: &Fighter) -> Drawable {
    let x = match fighter.facing {
        Facing::Right => fighter.position.x + SPRITE_WIDTH / 2.0,
        Facing::Left => fighter.position.x + SPRITE_WIDTH / 2.0 + 10.0,
    };
    let anchor = Vec2::new(x, fighter.position.y + 20.0);
    let src_origin = Vec2::new(0.0, hp_bar_row(fighter.hp) as f32 * HP_BAR_HEIGHT);

    Drawable {
        rect: Rect::from_origin_size(anchor, HP_BAR_WIDTH, HP_BAR_HEIGHT, HP_BAR_SCALE),
        style: DrawStyle::SpriteRegion {
            src: Rect::from_origin_size(src_origin, HP_BAR_WIDTH, HP_BAR_HEIGHT, 1.0),
        },
    }
}

/// World anchor of the fighter's name tag.
pub fn name_anchor(fighter: &Fighter) -> Vec2 {
    let x = match fighter.facing {
        Facing::Right => fighter.position.x + SPRITE_WIDTH / 2.0 - 5.0,
        Facing::Left => fighter.position.x + SPRITE_WIDTH / 2.0 + 15.0,
    };
    Vec2::new(x, fighter.position.y + 15.0)
}

/// Flat overlays of the strike and vulnerable rectangles, for debug
/// rendering.
pub fn probe_overlays(fighter: &Fighter) -> [Drawable; 2] {
    [
        Drawable {
            rect: fighter.strike.rect,
            style: DrawStyle::Fill,
        },
        Drawable {
            rect: fighter.vulnerable.rect,
            style: DrawStyle::Fill,
        },
    ]
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::config::MatchConfig;
    use crate::game::fighter::{FighterId, SPRITE_HEIGHT};

    fn test_fighter() -> Fighter {
        let config = MatchConfig::default();
        Fighter::new(FighterId::new(0), &config.fighters[0], config.ground_y)
    }

    #[test]
    fn test_hp_bar_row_mapping() {
        assert_eq!(hp_bar_row(MAX_HP), 0);
        assert_eq!(hp_bar_row(5), 3);
        assert_eq!(hp_bar_row(0), MAX_HP as u32);
        // Overshoot reads as a full bar
        assert_eq!(hp_bar_row(MAX_HP + 1), 0);
    }

    #[test]
    fn test_sprite_source_follows_frame() {
        let mut fighter = test_fighter();
        fighter.frame_x = 2;
        fighter.frame_y = 4;

        let drawable = fighter_sprite(&fighter);
        assert_eq!(drawable.rect, fighter.sprite_rect());
        match drawable.style {
            DrawStyle::SpriteRegion { src } => {
                assert_eq!(src.left, 2.0 * SPRITE_WIDTH);
                assert_eq!(src.top, 4.0 * SPRITE_HEIGHT);
                assert_eq!(src.width(), SPRITE_WIDTH);
            }
            DrawStyle::Fill => panic!("fighter sprite must carry a sheet region"),
        }
    }

    #[test]
    fn test_hp_bar_tracks_health_and_facing() {
        let mut fighter = test_fighter();
        fighter.hp = 3;

        let right = hp_bar(&fighter);
        match right.style {
            DrawStyle::SpriteRegion { src } => {
                assert_eq!(src.top, 5.0 * HP_BAR_HEIGHT);
            }
            DrawStyle::Fill => panic!("hp bar must carry a sheet region"),
        }
        assert!((right.rect.width() - HP_BAR_WIDTH * HP_BAR_SCALE).abs() < 1e-3);

        fighter.facing = Facing::Left;
        let left = hp_bar(&fighter);
        assert_eq!(left.rect.left, right.rect.left + 10.0);
    }

    #[test]
    fn test_name_anchor_per_facing() {
        let mut fighter = test_fighter();
        let right = name_anchor(&fighter);

        fighter.facing = Facing::Left;
        let left = name_anchor(&fighter);
        assert_eq!(left.x, right.x + 20.0);
        assert_eq!(left.y, right.y);
    }

    #[test]
    fn test_probe_overlays_are_fills() {
        let fighter = test_fighter();
        for overlay in probe_overlays(&fighter) {
            assert_eq!(overlay.style, DrawStyle::Fill);
        }
    }
}
