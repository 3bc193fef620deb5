//! Input Capture and Edge Classification
//!
//! Translates host key events into the per-tick edge states the fighter
//! state machine consumes. Every tracked key runs a small state machine:
//!
//! ```text
//!          press                      press within window
//!   Up ----------> Pressed     Up ----------------------> PressedTwice
//!    ^                |                                        |
//!    |            end_tick                                 end_tick
//!    |                v                                        |
//!   end_tick      Down <---------------------------------------
//!    |                |
//!    |             release
//!    +--- Released <--+
//! ```
//!
//! `Pressed`, `PressedTwice` and `Released` are visible for exactly one
//! tick; [`Keyboard::end_tick`] settles them to `Down` / `Up` after the
//! simulation has consumed them.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Ticks between two presses of the same key for the second press to
/// classify as a double tap.
pub const DOUBLE_TAP_WINDOW_TICKS: u32 = 30;

// =============================================================================
// ACTIONS AND BINDINGS
// =============================================================================

/// Gameplay action a fighter can be told to perform.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Action {
    /// Move toward the left arena wall
    Left,
    /// Move toward the right arena wall
    Right,
    /// Leave the ground
    Jump,
    /// Swing the weapon
    Attack,
    /// Raise the guard
    Block,
}

impl Action {
    /// All actions, in binding order.
    pub const ALL: [Action; 5] = [
        Action::Left,
        Action::Right,
        Action::Jump,
        Action::Attack,
        Action::Block,
    ];
}

/// A physical key, identified by its character.
///
/// ASCII letters are normalized to lowercase so that a host reporting
/// `'A'` (shift held) and `'a'` address the same key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Key(char);

impl Key {
    /// Create a key from its character, normalizing ASCII case.
    #[inline]
    pub const fn new(c: char) -> Self {
        Self(c.to_ascii_lowercase())
    }

    /// The underlying character.
    #[inline]
    pub const fn as_char(&self) -> char {
        self.0
    }
}

impl From<char> for Key {
    #[inline]
    fn from(c: char) -> Self {
        Self::new(c)
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Maps the five [`Action`]s of one fighter to physical keys.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyBindings {
    /// Key bound to [`Action::Left`]
    pub left: Key,
    /// Key bound to [`Action::Right`]
    pub right: Key,
    /// Key bound to [`Action::Jump`]
    pub jump: Key,
    /// Key bound to [`Action::Attack`]
    pub attack: Key,
    /// Key bound to [`Action::Block`]
    pub block: Key,
}

impl KeyBindings {
    /// Create bindings from the five keys.
    pub const fn new(left: Key, right: Key, jump: Key, attack: Key, block: Key) -> Self {
        Self {
            left,
            right,
            jump,
            attack,
            block,
        }
    }

    /// Default left-hand bindings (WASD cluster plus space to attack).
    pub const fn player_one() -> Self {
        Self::new(
            Key::new('a'),
            Key::new('d'),
            Key::new('w'),
            Key::new(' '),
            Key::new('s'),
        )
    }

    /// Default right-hand bindings (JLI cluster).
    pub const fn player_two() -> Self {
        Self::new(
            Key::new('j'),
            Key::new('l'),
            Key::new('i'),
            Key::new('m'),
            Key::new('k'),
        )
    }

    /// Key bound to the given action.
    #[inline]
    pub const fn key_for(&self, action: Action) -> Key {
        match action {
            Action::Left => self.left,
            Action::Right => self.right,
            Action::Jump => self.jump,
            Action::Attack => self.attack,
            Action::Block => self.block,
        }
    }

    /// All five bound keys, in [`Action::ALL`] order.
    pub const fn keys(&self) -> [Key; 5] {
        [self.left, self.right, self.jump, self.attack, self.block]
    }
}

// =============================================================================
// KEY STATE MACHINE
// =============================================================================

/// Per-tick state of a tracked key.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum KeyState {
    /// Not held, no edge this tick
    #[default]
    Up,
    /// Press edge this tick, classified as a single press
    Pressed,
    /// Press edge this tick, second press within the double-tap window
    PressedTwice,
    /// Held, press edge already consumed on an earlier tick
    Down,
    /// Release edge this tick
    Released,
}

/// Tracking slot for one key.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize)]
struct KeySlot {
    state: KeyState,
    /// Tick of the press that opened the current double-tap pair.
    /// Cleared once a pair completes so a third rapid press starts fresh.
    last_press: Option<u32>,
}

/// Edge-classifying keyboard shared by both fighters.
///
/// Only keys registered via [`Keyboard::track`] (or the constructor) are
/// observed; events for any other key are ignored. The match loop calls
/// [`Keyboard::end_tick`] once per tick, after both fighters have read
/// their inputs, to settle press and release edges.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Keyboard {
    // BTreeMap for deterministic iteration during settling
    keys: BTreeMap<Key, KeySlot>,
}

impl Keyboard {
    /// Create a keyboard tracking the given keys.
    pub fn tracking<I>(keys: I) -> Self
    where
        I: IntoIterator<Item = Key>,
    {
        let mut kb = Self::default();
        for key in keys {
            kb.track(key);
        }
        kb
    }

    /// Start tracking a key. Idempotent.
    pub fn track(&mut self, key: Key) {
        self.keys.entry(key).or_default();
    }

    /// Number of tracked keys.
    #[inline]
    pub fn tracked_count(&self) -> usize {
        self.keys.len()
    }

    /// Record a press edge for `key` at `tick`.
    ///
    /// Host auto-repeat is ignored: a press while the key is already in
    /// `Pressed`, `PressedTwice` or `Down` is a no-op. A second press
    /// within [`DOUBLE_TAP_WINDOW_TICKS`] of the previous press edge of
    /// the same key classifies as `PressedTwice` and closes the pair.
    ///
    /// Ticks must be non-decreasing across calls.
    pub fn press(&mut self, key: Key, tick: u32) {
        let Some(slot) = self.keys.get_mut(&key) else {
            return;
        };
        match slot.state {
            KeyState::Pressed | KeyState::PressedTwice | KeyState::Down => {}
            KeyState::Up | KeyState::Released => {
                let in_window = slot
                    .last_press
                    .is_some_and(|prev| tick.saturating_sub(prev) <= DOUBLE_TAP_WINDOW_TICKS);
                if in_window {
                    slot.state = KeyState::PressedTwice;
                    slot.last_press = None;
                } else {
                    slot.state = KeyState::Pressed;
                    slot.last_press = Some(tick);
                }
            }
        }
    }

    /// Record a release edge for `key`.
    ///
    /// Ignored if the key is not currently pressed or held.
    pub fn release(&mut self, key: Key) {
        let Some(slot) = self.keys.get_mut(&key) else {
            return;
        };
        match slot.state {
            KeyState::Up | KeyState::Released => {}
            KeyState::Pressed | KeyState::PressedTwice | KeyState::Down => {
                slot.state = KeyState::Released;
            }
        }
    }

    /// Drop all key state back to `Up`, forgetting pending double taps.
    ///
    /// For hosts that lose input focus mid-match.
    pub fn reset(&mut self) {
        for slot in self.keys.values_mut() {
            *slot = KeySlot::default();
        }
    }

    /// Settle edges at the end of a tick: press edges become `Down`,
    /// release edges become `Up`.
    pub fn end_tick(&mut self) {
        for slot in self.keys.values_mut() {
            slot.state = match slot.state {
                KeyState::Pressed | KeyState::PressedTwice => KeyState::Down,
                KeyState::Released => KeyState::Up,
                settled => settled,
            };
        }
    }

    /// Current state of a key (`Up` if untracked).
    #[inline]
    pub fn state_of(&self, key: Key) -> KeyState {
        self.keys.get(&key).map(|s| s.state).unwrap_or_default()
    }

    /// True while the key is held with its press edge already settled.
    ///
    /// Note the press tick itself reports `false`; holds become visible
    /// one tick after the press edge.
    #[inline]
    pub fn is_down(&self, key: Key) -> bool {
        self.state_of(key) == KeyState::Down
    }

    /// True on the tick of a single-classified press edge.
    #[inline]
    pub fn was_pressed(&self, key: Key) -> bool {
        self.state_of(key) == KeyState::Pressed
    }

    /// True on the tick of a double-classified press edge.
    #[inline]
    pub fn was_double_tapped(&self, key: Key) -> bool {
        self.state_of(key) == KeyState::PressedTwice
    }

    /// True on the tick of a release edge.
    #[inline]
    pub fn was_released(&self, key: Key) -> bool {
        self.state_of(key) == KeyState::Released
    }
}

// =============================================================================
// ACTION-LEVEL VIEW
// =============================================================================

/// One fighter's view of the shared keyboard through its own bindings.
///
/// Fighter behavior code queries actions, never raw keys.
#[derive(Clone, Copy)]
pub struct BoundInput<'a> {
    keyboard: &'a Keyboard,
    bindings: &'a KeyBindings,
}

impl<'a> BoundInput<'a> {
    /// Bind a keyboard to one fighter's key map.
    #[inline]
    pub fn new(keyboard: &'a Keyboard, bindings: &'a KeyBindings) -> Self {
        Self { keyboard, bindings }
    }

    /// True while the action's key is held (press edge already settled).
    #[inline]
    pub fn is_held(&self, action: Action) -> bool {
        self.keyboard.is_down(self.bindings.key_for(action))
    }

    /// True on the tick of a press edge of the action's key.
    ///
    /// A second press inside [`DOUBLE_TAP_WINDOW_TICKS`] classifies as a
    /// double tap; such edges only report here when `allow_double_tap` is
    /// set. Callers that must not fire on a double tap pass `false`.
    #[inline]
    pub fn was_just_pressed(&self, action: Action, allow_double_tap: bool) -> bool {
        let key = self.bindings.key_for(action);
        self.keyboard.was_pressed(key)
            || (allow_double_tap && self.keyboard.was_double_tapped(key))
    }

    /// True if any of the given actions' keys saw a release edge this tick.
    #[inline]
    pub fn was_just_released(&self, actions: &[Action]) -> bool {
        actions
            .iter()
            .any(|&a| self.keyboard.was_released(self.bindings.key_for(a)))
    }
}

// =============================================================================
// TESTS
// =============================================================================
