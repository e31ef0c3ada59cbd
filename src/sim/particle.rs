//! Particle motion: attraction, damping, walls and the square
//!
//! Velocities are in px per reference frame (see [`crate::consts::REFERENCE_FPS`]);
//! a step covering `dt` seconds advances `dt * 60` frame units.

use std::collections::VecDeque;

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::category::Category;
use super::collision::circle_rect_collision;
use super::geometry::{Bounds, Rect, reflect, rotate};
use crate::settings::Settings;

/// Why a particle was destroyed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShatterCause {
    /// Hit a canvas edge faster than the shatter speed
    Wall,
    /// Hit the square too often within the collision window
    Battered,
}

/// Something a particle step wants the engine to act on
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ParticleEvent {
    /// Rising-edge contact with the square (counts, spawns a pulse)
    ObstacleHit { point: Vec2 },
    /// Particle destroyed (spawns an explosion)
    Shattered {
        pos: Vec2,
        category: Category,
        cause: ShatterCause,
    },
}

/// Per-frame inputs shared by every particle step
#[derive(Debug, Clone, Copy)]
pub struct StepContext<'a> {
    pub bounds: Bounds,
    pub obstacle: Rect,
    /// Wall-clock timestamp of this frame (seconds)
    pub now: f64,
    /// Reference frames covered by this step
    pub frames: f32,
    pub settings: &'a Settings,
}

/// A colored, attracting particle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub category: Category,
    /// Damped particles lose speed down to a floor; others keep it forever
    pub damped: bool,
    /// Square contact timestamps (oldest first)
    #[serde(default)]
    pub collision_times: VecDeque<f64>,
    /// Overlapping the square as of the last step
    #[serde(default)]
    pub was_colliding: bool,
    /// Flagged for removal at the end of the frame
    #[serde(default)]
    pub destroyed: bool,
}

impl Particle {
    pub fn new(id: u32, pos: Vec2, vel: Vec2, radius: f32, category: Category, damped: bool) -> Self {
        Self {
            id,
            pos,
            vel,
            radius,
            category,
            damped,
            collision_times: VecDeque::new(),
            was_colliding: false,
            destroyed: false,
        }
    }

    /// Spawn at a random on-canvas position with a small random velocity
    pub fn random<R: Rng>(
        id: u32,
        category: Category,
        bounds: Bounds,
        settings: &Settings,
        rng: &mut R,
    ) -> Self {
        let radius = settings.particle_radius;
        let pos = bounds.clamp_circle(
            Vec2::new(
                rng.random::<f32>() * bounds.width,
                rng.random::<f32>() * bounds.height,
            ),
            radius,
        );
        let spread = crate::consts::INITIAL_SPEED_SPREAD;
        let vel = Vec2::new(
            (rng.random::<f32>() - 0.5) * spread,
            (rng.random::<f32>() - 0.5) * spread,
        );
        let chance = if settings.damping_chance.is_finite() {
            settings.damping_chance.clamp(0.0, 1.0)
        } else {
            0.0
        };
        let damped = rng.random_bool(chance);
        Self::new(id, pos, vel, radius, category, damped)
    }

    /// Advance one frame
    ///
    /// `peers` holds every particle's position from before this frame's
    /// updates; `index` is this particle's slot in it. The attraction pass
    /// is all-pairs, which is fine for the tens of particles this runs with.
    pub fn step<R: Rng>(
        &mut self,
        index: usize,
        peers: &[Vec2],
        ctx: &StepContext<'_>,
        rng: &mut R,
        events: &mut Vec<ParticleEvent>,
    ) {
        if self.destroyed || ctx.frames.is_nan() || ctx.frames <= 0.0 {
            return;
        }
        let settings = ctx.settings;
        let frames = ctx.frames;

        // --- ATTRACTION ---
        let k = settings.attraction_strength();
        let mut pull = Vec2::ZERO;
        for (j, &other) in peers.iter().enumerate() {
            if j == index {
                continue;
            }
            let d = other - self.pos;
            pull += d * (k / (d.length_squared() + 1.0));
        }
        self.vel += pull * frames;

        // --- DAMPING ---
        if self.damped {
            let factor = settings.damping_factor.powf(frames);
            self.vel = Vec2::new(
                damp_axis(self.vel.x, factor, settings.min_speed),
                damp_axis(self.vel.y, factor, settings.min_speed),
            );
        }

        self.pos += self.vel * frames;

        // --- WALLS ---
        let speed = self.vel.length();
        let (w, h, r) = (ctx.bounds.width, ctx.bounds.height, self.radius);
        if self.pos.x - r < 0.0 || self.pos.x + r > w {
            if speed > settings.shatter_speed {
                self.shatter(ShatterCause::Wall, events);
                return;
            }
            self.vel.x = -self.vel.x;
            self.pos.x = crate::clamp_soft(self.pos.x, r, w - r);
        }
        if self.pos.y - r < 0.0 || self.pos.y + r > h {
            if speed > settings.shatter_speed {
                self.shatter(ShatterCause::Wall, events);
                return;
            }
            self.vel.y = -self.vel.y;
            self.pos.y = crate::clamp_soft(self.pos.y, r, h - r);
        }

        // --- SQUARE ---
        self.collide_with_obstacle(ctx, rng, events);
        if self.destroyed {
            return;
        }

        // Push-out next to a wall can leave the canvas
        self.pos = ctx.bounds.clamp_circle(self.pos, self.radius);
    }

    /// Rising-edge collision response against the square
    fn collide_with_obstacle<R: Rng>(
        &mut self,
        ctx: &StepContext<'_>,
        rng: &mut R,
        events: &mut Vec<ParticleEvent>,
    ) {
        let settings = ctx.settings;
        let contact = circle_rect_collision(self.pos, self.radius, &ctx.obstacle, settings.corner_factor);
        let rising = contact.hit && !self.was_colliding;
        self.was_colliding = contact.hit;
        if !rising {
            return;
        }

        self.collision_times.push_back(ctx.now);
        let cutoff = ctx.now - settings.collision_window_secs;
        while self.collision_times.front().is_some_and(|&t| t < cutoff) {
            self.collision_times.pop_front();
        }
        if self.collision_times.len() > settings.collision_limit {
            self.shatter(ShatterCause::Battered, events);
            return;
        }

        events.push(ParticleEvent::ObstacleHit { point: contact.point });

        let normal = contact.normal;
        let approach = self.vel.dot(normal);
        if approach < 0.0 {
            let reflected = reflect(self.vel, normal) * settings.bounce_strength;
            let jitter = settings.bounce_jitter_deg.abs().to_radians();
            let angle = if jitter.is_finite() && jitter > 0.0 {
                rng.random_range(-jitter..=jitter)
            } else {
                0.0
            };
            self.vel = rotate(reflected, angle);
        }

        if contact.penetration > 0.0 && normal != Vec2::ZERO {
            self.pos += normal * (contact.penetration + settings.push_out_epsilon);
        }
    }

    fn shatter(&mut self, cause: ShatterCause, events: &mut Vec<ParticleEvent>) {
        self.destroyed = true;
        log::trace!("particle {} shattered ({:?}) at {:?}", self.id, cause, self.pos);
        events.push(ParticleEvent::Shattered {
            pos: self.pos,
            category: self.category,
            cause,
        });
    }
}

/// Scale one velocity axis, never dropping below `min_speed` (sign kept)
#[inline]
fn damp_axis(v: f32, factor: f32, min_speed: f32) -> f32 {
    if v.abs() > min_speed {
        v * factor
    } else if v < 0.0 {
        -min_speed
    } else {
        min_speed
    }
}
