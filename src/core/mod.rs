//! Core geometry primitives.
//!
//! Plain f32 world units throughout. The simulation assumes a fixed
//! per-tick step, so none of these carry a time component.

pub mod rect;
pub mod vec2;

// Re-export core types
pub use rect::Rect;
pub use vec2::Vec2;
