//! # Knightfall Core
//!
//! Two-fighter melee combat simulation, built as a library for a host game
//! loop. The host samples its input device, calls [`advance`] once per
//! tick and draws whatever the display descriptors tell it to draw.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      KNIGHTFALL CORE                        │
//! ├─────────────────────────────────────────────────────────────┤
//! │  core/           - Geometry primitives                      │
//! │  ├── vec2.rs     - 2D vector                                │
//! │  └── rect.rs     - Axis-aligned rectangle (inclusive edges) │
//! │                                                             │
//! │  game/           - Simulation                               │
//! │  ├── input.rs    - Key states, double-tap pairing, bindings │
//! │  ├── fighter.rs  - Fighter entity, kinematics, animation    │
//! │  ├── states.rs   - Fighter state machine                    │
//! │  ├── probe.rs    - Attack / hurt probes (offset rectangles) │
//! │  ├── combat.rs   - Strike resolution and hit consumption    │
//! │  ├── config.rs   - Spawn-time configuration + validation    │
//! │  ├── events.rs   - Tick-stamped fight events                │
//! │  ├── display.rs  - Outward render descriptors               │
//! │  └── tick.rs     - Match state and per-tick orchestration   │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Timing model
//!
//! Everything is frame-count based: one call to [`advance`] is one tick,
//! animation frames step every [`TICKS_PER_FRAME`] ticks, and the
//! double-tap window is measured in ticks. There is no wall clock
//! anywhere in the simulation, and no `dt` - the host is expected to
//! call at a fixed rate (nominally [`TICK_RATE`] Hz).
//!
//! ## Update order
//!
//! Fighters update strictly in slot order (spawn order) within a tick: a
//! hit latch set by the first fighter's strike is visible to the second
//! fighter's update in the same tick, and one set by the second fighter
//! only on the next tick. The asymmetry is part of the tick contract;
//! see [`game::tick::advance`].

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod core;
pub mod game;

// Re-export commonly used types
pub use crate::core::rect::Rect;
pub use crate::core::vec2::Vec2;
pub use game::config::{ConfigError, FighterConfig, MatchConfig};
pub use game::display::{DrawStyle, Drawable};
pub use game::events::{FightEvent, FightEventData};
pub use game::fighter::{Facing, Fighter, FighterId, Side};
pub use game::input::{Action, BoundInput, Key, KeyBindings, Keyboard};
pub use game::states::{FighterState, StateName};
pub use game::tick::{advance, MatchOutcome, MatchState, TickResult};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Nominal simulation tick rate (Hz). The core never reads a clock; this
/// documents the rate the host loop is expected to call [`advance`] at.
pub const TICK_RATE: u32 = 60;

/// Starting (and maximum) hit points per fighter.
pub const MAX_HP: u8 = 8;

/// Default animation cadence: ticks per animation frame.
pub const TICKS_PER_FRAME: u32 = 8;
