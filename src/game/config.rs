//! Match Configuration
//!
//! Spawn-time parameters provided by the host: arena geometry, the
//! ground line, and the two fighter slots with their key layouts.
//! Validated once when a match is created; the simulation itself never
//! re-checks them.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::Rect;
use crate::game::fighter::Side;
use crate::game::input::{Key, KeyBindings, Keyboard};

/// Default arena width in world units.
pub const DEFAULT_ARENA_WIDTH: f32 = 1280.0;
/// Default arena height in world units.
pub const DEFAULT_ARENA_HEIGHT: f32 = 720.0;
/// Ground line of the default arena.
pub const DEFAULT_GROUND_Y: f32 = 475.0;

/// Spawn-time parameters of one fighter slot.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FighterConfig {
    /// Display name
    pub name: String,

    /// Wall the fighter starts at; also sets the initial facing
    pub side: Side,

    /// Spawn x in world units
    pub spawn_x: f32,

    /// Personal key layout
    pub bindings: KeyBindings,
}

/// Complete parameters of a match.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MatchConfig {
    /// Playable area fighters cannot walk out of
    pub arena: Rect,

    /// y of the ground line fighters stand on
    pub ground_y: f32,

    /// The two fighter slots, in update order
    pub fighters: [FighterConfig; 2],
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            arena: Rect::new(0.0, 0.0, DEFAULT_ARENA_WIDTH, DEFAULT_ARENA_HEIGHT),
            ground_y: DEFAULT_GROUND_Y,
            fighters: [
                FighterConfig {
                    name: "Sir Aldric".to_string(),
                    side: Side::Left,
                    spawn_x: 100.0,
                    bindings: KeyBindings::player_one(),
                },
                FighterConfig {
                    name: "Sir Rowan".to_string(),
                    side: Side::Right,
                    spawn_x: 980.0,
                    bindings: KeyBindings::player_two(),
                },
            ],
        }
    }
}

impl MatchConfig {
    /// Check the parameters the simulation relies on.
    ///
    /// The ground line must cut through the arena, both spawns must lie
    /// within it horizontally, and no physical key may serve two
    /// actions.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.ground_y <= self.arena.top || self.ground_y >= self.arena.bottom {
            return Err(ConfigError::GroundOutsideArena {
                ground_y: self.ground_y,
                top: self.arena.top,
                bottom: self.arena.bottom,
            });
        }

        for (slot, fighter) in self.fighters.iter().enumerate() {
            if fighter.spawn_x < self.arena.left || fighter.spawn_x > self.arena.right {
                return Err(ConfigError::SpawnOutsideArena {
                    slot,
                    spawn_x: fighter.spawn_x,
                    left: self.arena.left,
                    right: self.arena.right,
                });
            }
        }

        let mut seen = BTreeSet::new();
        for key in self.fighters.iter().flat_map(|f| f.bindings.keys()) {
            if !seen.insert(key) {
                return Err(ConfigError::DuplicateKeyBinding { key });
            }
        }

        Ok(())
    }

    /// Keyboard tracking every key either fighter binds.
    pub fn keyboard(&self) -> Keyboard {
        Keyboard::tracking(self.fighters.iter().flat_map(|f| f.bindings.keys()))
    }
}

/// Reasons a match configuration is rejected.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    /// The ground line does not cut through the arena.
    #[error("ground line {ground_y} outside arena range {top}..{bottom}")]
    GroundOutsideArena {
        /// Configured ground line
        ground_y: f32,
        /// Arena top edge
        top: f32,
        /// Arena bottom edge
        bottom: f32,
    },

    /// A fighter would spawn outside the arena.
    #[error("fighter {slot} spawn x {spawn_x} outside arena range {left}..{right}")]
    SpawnOutsideArena {
        /// Fighter slot index
        slot: usize,
        /// Configured spawn
        spawn_x: f32,
        /// Arena left edge
        left: f32,
        /// Arena right edge
        right: f32,
    },

    /// One physical key is bound to two actions.
    #[error("key '{key}' bound more than once")]
    DuplicateKeyBinding {
        /// The doubly bound key
        key: Key,
    },
}

// =============================================================================
// TESTS
// =============================================================================
