//! Axis-aligned bounding boxes and overlap testing
//!
//! Every entity in the arena is a rectangle in screen space:
//! - x grows to the right, y grows downward
//! - edges are inclusive integers (left <= right, top <= bottom)

use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle in arena coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BoundingBox {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl BoundingBox {
    pub fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        debug_assert!(right >= left && bottom >= top, "inverted box");
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Box of the given size with its top-left corner at (left, top)
    pub fn from_size(left: i32, top: i32, width: i32, height: i32) -> Self {
        Self::new(left, top, left + width, top + height)
    }

    /// Box of the given size centered on (cx, cy)
    ///
    /// Odd sizes put the extra unit on the right/bottom side.
    pub fn from_center(cx: i32, cy: i32, width: i32, height: i32) -> Self {
        Self::from_size(cx - width / 2, cy - height / 2, width, height)
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.right - self.left
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.bottom - self.top
    }

    /// Translate in place
    #[inline]
    pub fn translate(&mut self, dx: i32, dy: i32) {
        self.left += dx;
        self.right += dx;
        self.top += dy;
        self.bottom += dy;
    }

    /// Clamp each violated edge back inside [0, width] x [0, height]
    ///
    /// Out-of-bound boxes are shifted, never resized: the opposite edge moves
    /// with the violated one. A box larger than the region keeps its
    /// left/top edge at 0.
    pub fn clamp_within(&mut self, width: i32, height: i32) {
        if self.right > width {
            let dx = width - self.right;
            self.translate(dx, 0);
        }
        if self.left < 0 {
            let dx = -self.left;
            self.translate(dx, 0);
        }
        if self.bottom > height {
            let dy = height - self.bottom;
            self.translate(0, dy);
        }
        if self.top < 0 {
            let dy = -self.top;
            self.translate(0, dy);
        }
    }

    /// True if the box lies entirely inside [0, width] x [0, height]
    pub fn is_within(&self, width: i32, height: i32) -> bool {
        self.left >= 0 && self.top >= 0 && self.right <= width && self.bottom <= height
    }
}

/// Check whether two boxes intersect (touching edges count as overlap)
#[inline]
pub fn overlaps(a: &BoundingBox, b: &BoundingBox) -> bool {
    !(a.right < b.left || a.left > b.right || a.bottom < b.top || a.top > b.bottom)
}
