//! Collision detection between a circular particle and the square
//!
//! Produces the contact point, the reflection normal and the penetration
//! depth needed for response and push-out.

use glam::Vec2;

use super::geometry::Rect;

/// Result of a collision check
#[derive(Debug, Clone)]
pub struct CollisionResult {
    /// Whether the circle overlaps the rectangle
    pub hit: bool,
    /// Closest point on the rectangle to the circle center
    pub point: Vec2,
    /// Unit normal pointing from the rectangle toward the circle (zero if undefined)
    pub normal: Vec2,
    /// Overlap depth (for position correction)
    pub penetration: f32,
    /// Whether the contact was resolved as a corner hit
    pub corner: bool,
}

impl CollisionResult {
    pub fn miss(point: Vec2) -> Self {
        Self {
            hit: false,
            point,
            normal: Vec2::ZERO,
            penetration: 0.0,
            corner: false,
        }
    }
}

/// Check collision between a circle and an axis-aligned rectangle
///
/// Contacts within `corner_factor * radius` of a corner use the direction
/// from the contact point to the circle center as normal; all others use the
/// outward normal of the nearest edge.
pub fn circle_rect_collision(
    center: Vec2,
    radius: f32,
    rect: &Rect,
    corner_factor: f32,
) -> CollisionResult {
    let point = rect.closest_point(center);
    let offset = center - point;
    let distance = offset.length();

    if distance >= radius {
        return CollisionResult::miss(point);
    }

    let corner_dist = rect
        .corners()
        .iter()
        .map(|c| c.distance(center))
        .fold(f32::INFINITY, f32::min);
    let corner = corner_dist < radius * corner_factor;

    let normal = if corner {
        // Center inside the square leaves no offset; fall back to the square's center
        let n = offset.normalize_or_zero();
        if n == Vec2::ZERO {
            (center - rect.center()).normalize_or_zero()
        } else {
            n
        }
    } else {
        rect.nearest_edge_normal(center)
    };

    CollisionResult {
        hit: true,
        point,
        normal,
        penetration: radius - distance,
        corner,
    }
}
