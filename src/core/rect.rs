//! Axis-Aligned Rectangle
//!
//! The shared geometry type for hitboxes, tiles, traps, and the goal.
//! Stored as top-left corner plus size; edge setters move the rectangle
//! without resizing it, which is what the collision resolver relies on.

use serde::{Deserialize, Serialize};

use super::vec2::Vec2;

/// Axis-aligned rectangle in pixel space (+y down).
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// Left edge
    pub x: f32,
    /// Top edge
    pub y: f32,
    /// Width (non-negative)
    pub w: f32,
    /// Height (non-negative)
    pub h: f32,
}

impl Rect {
    /// Create a rectangle from its top-left corner and size.
    #[inline]
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Left edge.
    #[inline]
    pub fn left(&self) -> f32 {
        self.x
    }

    /// Right edge.
    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    /// Top edge.
    #[inline]
    pub fn top(&self) -> f32 {
        self.y
    }

    /// Bottom edge.
    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    /// Horizontal center.
    #[inline]
    pub fn center_x(&self) -> f32 {
        self.x + self.w / 2.0
    }

    /// Move the rectangle so its left edge is at `value`.
    #[inline]
    pub fn set_left(&mut self, value: f32) {
        self.x = value;
    }

    /// Move the rectangle so its right edge is at `value`.
    #[inline]
    pub fn set_right(&mut self, value: f32) {
        self.x = value - self.w;
    }

    /// Move the rectangle so its top edge is at `value`.
    #[inline]
    pub fn set_top(&mut self, value: f32) {
        self.y = value;
    }

    /// Move the rectangle so its bottom edge is at `value`.
    #[inline]
    pub fn set_bottom(&mut self, value: f32) {
        self.y = value - self.h;
    }

    /// Copy translated by `(dx, dy)`.
    #[inline]
    pub fn translated(&self, dx: f32, dy: f32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }

    /// Top-left corner as a vector.
    #[inline]
    pub fn top_left(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    /// Overlap test with strict inequalities: rectangles that merely share
    /// an edge do NOT overlap. A body resting flush on a tile is therefore
    /// collision-free, and the one-pixel ground probe works.
    #[inline]
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && self.right() > other.left()
            && self.top() < other.bottom()
            && self.bottom() > other.top()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_edges() {
        let r = Rect::new(10.0, 20.0, 30.0, 40.0);
        assert_eq!(r.left(), 10.0);
        assert_eq!(r.right(), 40.0);
        assert_eq!(r.top(), 20.0);
        assert_eq!(r.bottom(), 60.0);
        assert_eq!(r.center_x(), 25.0);
    }

    #[test]
    fn test_rect_edge_setters_preserve_size() {
        let mut r = Rect::new(0.0, 0.0, 10.0, 10.0);
        r.set_right(100.0);
        assert_eq!(r.left(), 90.0);
        assert_eq!(r.w, 10.0);
        r.set_bottom(50.0);
        assert_eq!(r.top(), 40.0);
        assert_eq!(r.h, 10.0);
    }

    #[test]
    fn test_rect_overlap_strict() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(5.0, 5.0, 10.0, 10.0);
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));

        // Edge-flush rectangles do not overlap
        let flush = Rect::new(10.0, 0.0, 10.0, 10.0);
        assert!(!a.overlaps(&flush));

        let below = Rect::new(0.0, 10.0, 10.0, 10.0);
        assert!(!a.overlaps(&below));

        // One pixel of penetration does
        let nudged = Rect::new(9.0, 0.0, 10.0, 10.0);
        assert!(a.overlaps(&nudged));
    }

    #[test]
    fn test_rect_translated() {
        let r = Rect::new(1.0, 2.0, 3.0, 4.0);
        let t = r.translated(10.0, -2.0);
        assert_eq!(t, Rect::new(11.0, 0.0, 3.0, 4.0));
        // Original untouched
        assert_eq!(r.x, 1.0);
    }
}
