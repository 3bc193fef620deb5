//! Combat Simulation Module
//!
//! Everything that decides a match lives here; rendering and raw input
//! capture stay in the host.
//!
//! ## Module Structure
//!
//! - `input`: Key edge classification, double-tap pairing, bindings
//! - `fighter`: The fighter record, kinematics and animation clock
//! - `states`: Fighter behavior state machine
//! - `probe`: Attack and hurt rectangles attached to a fighter
//! - `combat`: Strike resolution and hit-latch maintenance
//! - `config`: Spawn-time configuration and validation
//! - `events`: Tick-stamped fight events
//! - `display`: Outward render descriptors
//! - `tick`: Match state and the per-tick loop

pub mod combat;
pub mod config;
pub mod display;
pub mod events;
pub mod fighter;
pub mod input;
pub mod probe;
pub mod states;
pub mod tick;

// Re-export key types
pub use config::{ConfigError, FighterConfig, MatchConfig};
pub use events::{FightEvent, FightEventData};
pub use fighter::{Facing, Fighter, FighterId, Side};
pub use input::{Action, BoundInput, Key, KeyBindings, Keyboard};
pub use states::{FighterState, StateName};
pub use tick::{advance, MatchOutcome, MatchState, TickResult};
