//! Canvas-space geometry helpers
//!
//! Screen coordinates: origin top-left, +y points down.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::clamp_soft;

/// Drawable canvas extent
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width: width.max(0.0),
            height: height.max(0.0),
        }
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }

    /// Clamp a circle center so the whole circle stays on the canvas
    pub fn clamp_circle(&self, center: Vec2, radius: f32) -> Vec2 {
        Vec2::new(
            clamp_soft(center.x, radius, self.width - radius),
            clamp_soft(center.y, radius, self.height - radius),
        )
    }

    /// Whether a circle lies fully on the canvas (with a small tolerance)
    pub fn contains_circle(&self, center: Vec2, radius: f32) -> bool {
        const EPS: f32 = 1e-3;
        center.x - radius >= -EPS
            && center.x + radius <= self.width + EPS
            && center.y - radius >= -EPS
            && center.y + radius <= self.height + EPS
    }
}

/// Axis-aligned rectangle, `pos` is the top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::new(w, h),
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

    pub fn center(&self) -> Vec2 {
        self.pos + self.size * 0.5
    }

    /// Corners: top-left, top-right, bottom-left, bottom-right
    pub fn corners(&self) -> [Vec2; 4] {
        let (min, max) = (self.min(), self.max());
        [
            min,
            Vec2::new(max.x, min.y),
            Vec2::new(min.x, max.y),
            max,
        ]
    }

    /// Closest point on (or inside) the rectangle to `p`
    pub fn closest_point(&self, p: Vec2) -> Vec2 {
        p.max(self.min()).min(self.max())
    }

    /// Outward normal of the edge nearest to `p`
    ///
    /// Ties resolve left, right, top, bottom.
    pub fn nearest_edge_normal(&self, p: Vec2) -> Vec2 {
        let (min, max) = (self.min(), self.max());
        let candidates = [
            ((p.x - min.x).abs(), Vec2::NEG_X),
            ((p.x - max.x).abs(), Vec2::X),
            ((p.y - min.y).abs(), Vec2::NEG_Y),
            ((p.y - max.y).abs(), Vec2::Y),
        ];
        let mut best = candidates[0];
        for candidate in &candidates[1..] {
            if candidate.0 < best.0 {
                best = *candidate;
            }
        }
        best.1
    }
}

/// Reflect velocity off a surface
///
/// Standard reflection: v' = v - 2(v·n)n
#[inline]
pub fn reflect(vel: Vec2, normal: Vec2) -> Vec2 {
    vel - 2.0 * vel.dot(normal) * normal
}

/// Rotate a vector by `angle` radians (counter-clockwise in math space)
#[inline]
pub fn rotate(v: Vec2, angle: f32) -> Vec2 {
    Vec2::from_angle(angle).rotate(v)
}
