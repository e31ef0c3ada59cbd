//! The keyboard-driven square

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geometry::{Bounds, Rect};
use super::input::TickInput;
use crate::clamp_soft;

/// The square particles collide with
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Obstacle {
    /// Top-left corner
    pub pos: Vec2,
    /// Edge length
    pub size: f32,
    /// Base movement speed (px/s)
    pub speed: f32,
}

impl Obstacle {
    /// Create a square centered on the canvas
    pub fn centered(bounds: Bounds, size: f32, speed: f32) -> Self {
        let mut obstacle = Self {
            pos: bounds.center() - Vec2::splat(size / 2.0),
            size,
            speed,
        };
        obstacle.clamp_to(bounds);
        obstacle
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, self.size, self.size)
    }

    /// Keep the square fully on the canvas
    pub fn clamp_to(&mut self, bounds: Bounds) {
        self.pos = Vec2::new(
            clamp_soft(self.pos.x, 0.0, bounds.width - self.size).max(0.0),
            clamp_soft(self.pos.y, 0.0, bounds.height - self.size).max(0.0),
        );
    }

    /// Move per held keys for `dt` seconds, scaled by the speed boost
    pub fn apply_input(&mut self, input: &TickInput, multiplier: f32, dt: f32, bounds: Bounds) {
        let step = self.speed * multiplier * dt;
        if step.is_finite() && step > 0.0 {
            self.pos += input.direction() * step;
        }
        self.clamp_to(bounds);
    }
}
