// =============================================================================
// GEOMETRY.RS — Pixel-space primitives shared by the slicer and the sheet
//
// - `Rect`: half-open axis-aligned box in image pixel coordinates
// - Neighbour offsets for grid traversal
// =============================================================================

use std::fmt;

use serde::{Deserialize, Serialize};

/// Half-open pixel rectangle `[min_x, max_x) × [min_y, max_y)`.
///
/// Regions produced by the slicer always contain at least one pixel
/// (`min_x < max_x`, `min_y < max_y`).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rect {
    pub min_x: u32,
    pub min_y: u32,
    pub max_x: u32,
    pub max_y: u32,
}

impl Rect {
    /// Build a rectangle from its left, top, right and bottom edges.
    /// Right and bottom are exclusive.
    #[inline]
    pub const fn from_ltrb(min_x: u32, min_y: u32, max_x: u32, max_y: u32) -> Self {
        Self { min_x, min_y, max_x, max_y }
    }

    /// Build a rectangle from a top-left corner and a size. Edges past
    /// `u32::MAX` saturate.
    #[inline]
    pub const fn from_xywh(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self { min_x: x, min_y: y, max_x: x.saturating_add(width), max_y: y.saturating_add(height) }
    }

    /// The 1×1 rectangle covering pixel (x, y).
    #[inline]
    pub const fn pixel(x: u32, y: u32) -> Self {
        Self::from_xywh(x, y, 1, 1)
    }

    #[inline]
    pub const fn width(&self) -> u32 {
        self.max_x.saturating_sub(self.min_x)
    }

    #[inline]
    pub const fn height(&self) -> u32 {
        self.max_y.saturating_sub(self.min_y)
    }

    /// Number of pixels covered (not the number of opaque pixels inside).
    #[inline]
    pub const fn area(&self) -> u64 {
        self.width() as u64 * self.height() as u64
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.min_x >= self.max_x || self.min_y >= self.max_y
    }

    #[inline]
    pub const fn contains(&self, x: u32, y: u32) -> bool {
        x >= self.min_x && x < self.max_x && y >= self.min_y && y < self.max_y
    }

    /// True when both rectangles share at least one pixel.
    pub const fn intersects(&self, other: &Rect) -> bool {
        self.min_x < other.max_x
            && other.min_x < self.max_x
            && self.min_y < other.max_y
            && other.min_y < self.max_y
    }

    /// True when the rectangle lies entirely inside a `width × height` image.
    #[inline]
    pub const fn fits_within(&self, width: u32, height: u32) -> bool {
        self.max_x <= width && self.max_y <= height
    }
}

impl fmt::Display for Rect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}, {}, {})", self.min_x, self.min_y, self.max_x, self.max_y)
    }
}

// =============================================================================
// DIRECTION HELPERS
// =============================================================================

/// The 4 axis neighbours as (dx, dy), in the order the slicer pushes them:
/// right, left, down, up.
pub const NEIGHBORS_4: [(i64, i64); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pixel_rect_is_one_by_one() {
        let r = Rect::pixel(3, 7);
        assert_eq!(r, Rect::from_ltrb(3, 7, 4, 8));
        assert_eq!(r.width(), 1);
        assert_eq!(r.height(), 1);
        assert_eq!(r.area(), 1);
    }

    #[test]
    fn test_contains_is_half_open() {
        let r = Rect::from_ltrb(1, 1, 3, 3);
        assert!(r.contains(1, 1));
        assert!(r.contains(2, 2));
        assert!(!r.contains(3, 2));
        assert!(!r.contains(2, 3));
        assert!(!r.contains(0, 1));
    }

    #[test]
    fn test_touching_edges_do_not_intersect() {
        let a = Rect::from_ltrb(0, 0, 2, 2);
        let b = Rect::from_ltrb(2, 0, 4, 2);
        assert!(!a.intersects(&b));
        assert!(a.intersects(&Rect::from_ltrb(1, 1, 5, 5)));
    }

    #[test]
    fn test_empty_rect() {
        assert!(Rect::from_ltrb(2, 2, 2, 5).is_empty());
        assert_eq!(Rect::from_ltrb(4, 0, 2, 1).width(), 0);
    }

    #[test]
    fn test_from_xywh_saturates_at_edge() {
        let r = Rect::from_xywh(u32::MAX - 2, 5, 10, u32::MAX);
        assert_eq!(r, Rect::from_ltrb(u32::MAX - 2, 5, u32::MAX, u32::MAX));
        assert_eq!(r.width(), 2);
    }

    #[test]
    fn test_display() {
        assert_eq!(Rect::from_ltrb(1, 2, 3, 4).to_string(), "[1, 2, 3, 4)");
    }
}
