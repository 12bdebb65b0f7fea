//! Circle vs axis-aligned rectangle primitives
//!
//! Shared by collision and near-miss detection. Screen space: +Y points down.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle described by its top-left corner and size
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::new(width, height),
        }
    }

    #[inline]
    pub fn min(&self) -> Vec2 {
        self.pos
    }

    #[inline]
    pub fn max(&self) -> Vec2 {
        self.pos + self.size
    }

    /// Y of the bottom edge
    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    /// Closest point on (or inside) the rectangle to `p`
    #[inline]
    pub fn closest_point(&self, p: Vec2) -> Vec2 {
        p.max(self.min()).min(self.max())
    }
}

/// Distance from a circle's centre to the closest point of `rect`.
///
/// Zero when the centre lies inside the rectangle. The radius only matters to
/// callers comparing against it, so it is not taken here.
#[inline]
pub fn circle_rect_distance(center: Vec2, rect: &Rect) -> f32 {
    (center - rect.closest_point(center)).length()
}

/// Strict overlap: touching at exactly `radius` is not an overlap
#[inline]
pub fn circle_rect_overlap(center: Vec2, radius: f32, rect: &Rect) -> bool {
    circle_rect_distance(center, rect) < radius
}
