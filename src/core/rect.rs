//! Axis-Aligned Rectangle
//!
//! Edge-based rectangle used for the arena bounds, strike and vulnerable
//! probes, and screen draw regions. Overlap is inclusive: rectangles that
//! merely touch along an edge count as overlapping.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::vec2::Vec2;

/// Axis-aligned rectangle stored as its four edges.
///
/// Follows screen convention: `top < bottom`, `left < right`.
#[derive(Clone, Copy, PartialEq, Debug, Serialize, Deserialize)]
pub struct Rect {
    /// Left edge (world units)
    pub left: f32,
    /// Top edge (world units)
    pub top: f32,
    /// Right edge (world units)
    pub right: f32,
    /// Bottom edge (world units)
    pub bottom: f32,
}

impl Rect {
    /// Create a rectangle from its four edges.
    #[inline]
    pub const fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Create a rectangle from a top-left origin and a scaled size.
    ///
    /// `width` and `height` are in source units (e.g. sprite-sheet cells);
    /// the rectangle spans `width * scale` by `height * scale` world units.
    #[inline]
    pub fn from_origin_size(origin: Vec2, width: f32, height: f32, scale: f32) -> Self {
        Self {
            left: origin.x,
            top: origin.y,
            right: origin.x + width * scale,
            bottom: origin.y + height * scale,
        }
    }

    /// Width in world units.
    #[inline]
    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    /// Height in world units.
    #[inline]
    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }

    /// Top-left corner.
    #[inline]
    pub fn origin(&self) -> Vec2 {
        Vec2::new(self.left, self.top)
    }

    /// Inclusive overlap test. Touching edges overlap.
    #[inline]
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.left <= other.right
            && self.right >= other.left
            && self.top <= other.bottom
            && self.bottom >= other.top
    }

    /// True if the point lies inside or on the boundary.
    #[inline]
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.left && point.x <= self.right && point.y >= self.top && point.y <= self.bottom
    }
}

impl fmt::Display for Rect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{:.1},{:.1} {:.1}x{:.1}]",
            self.left,
            self.top,
            self.width(),
            self.height()
        )
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_origin_size_applies_scale() {
        let r = Rect::from_origin_size(Vec2::new(100.0, 475.0), 175.0, 100.0, 1.8);
        assert_eq!(r.left, 100.0);
        assert_eq!(r.top, 475.0);
        assert!((r.width() - 315.0).abs() < 1e-4);
        assert!((r.height() - 180.0).abs() < 1e-4);
    }

    #[test]
    fn test_overlap_is_inclusive_at_edges() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let touching = Rect::new(10.0, 0.0, 20.0, 10.0);
        let apart = Rect::new(10.01, 0.0, 20.0, 10.0);

        assert!(a.overlaps(&touching));
        assert!(touching.overlaps(&a));
        assert!(!a.overlaps(&apart));
    }

    #[test]
    fn test_overlap_disjoint_vertically() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let below = Rect::new(0.0, 11.0, 10.0, 20.0);
        assert!(!a.overlaps(&below));
    }

    #[test]
    fn test_contains_boundary() {
        let r = Rect::new(0.0, 0.0, 1280.0, 720.0);
        assert!(r.contains(Vec2::new(0.0, 0.0)));
        assert!(r.contains(Vec2::new(1280.0, 720.0)));
        assert!(!r.contains(Vec2::new(1280.5, 100.0)));
    }
}
