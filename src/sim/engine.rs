//! Simulation engine
//!
//! Owns all simulation state and advances it one frame per [`Engine::step`].
//! Commands from the UI (counts, pause, reset, resize) are plain methods.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::category::Category;
use super::clock::SimulationClock;
use super::effects::{EffectFactory, EffectPulse};
use super::geometry::Bounds;
use super::input::{SpeedBoost, TickInput};
use super::obstacle::Obstacle;
use super::particle::{Particle, ParticleEvent, StepContext};
use super::snapshot::{Counters, EffectView, ParticleView, RenderSnapshot};
use crate::frame_units;
use crate::settings::Settings;

/// Engine run state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SimPhase {
    Running,
    Paused,
}

/// The whole simulation
#[derive(Debug, Clone)]
pub struct Engine {
    settings: Settings,
    bounds: Bounds,
    clock: SimulationClock,
    obstacle: Obstacle,
    /// Live particles, in creation order
    particles: Vec<Particle>,
    effects: Vec<EffectPulse>,
    factory: EffectFactory,
    boost: SpeedBoost,
    collisions: u64,
    /// Multiplier from the last running frame
    speed_multiplier: f32,
    rng: Pcg32,
    /// Reused per-frame event buffer
    events: Vec<ParticleEvent>,
    next_id: u32,
}

impl Engine {
    /// Create an engine with the default population on the given canvas
    pub fn new(settings: Settings, bounds: Bounds, seed: u64) -> Self {
        let obstacle = Obstacle::centered(bounds, settings.obstacle_size, settings.obstacle_speed);
        let mut engine = Self {
            clock: SimulationClock::new(settings.max_frame_dt),
            factory: EffectFactory::new(settings.effects.clone()),
            boost: SpeedBoost::new(settings.boost_window_secs),
            settings,
            bounds,
            obstacle,
            particles: Vec::new(),
            effects: Vec::new(),
            collisions: 0,
            speed_multiplier: 1.0,
            rng: Pcg32::seed_from_u64(seed),
            events: Vec::new(),
            next_id: 1,
        };
        engine.populate();
        log::info!(
            "Engine created: {}x{} canvas, {} particles, seed {}",
            bounds.width,
            bounds.height,
            engine.particles.len(),
            seed
        );
        engine
    }

    fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    fn populate(&mut self) {
        self.particles.clear();
        for category in Category::ALL {
            for _ in 0..self.settings.default_count {
                self.add_particle(category);
            }
        }
    }

    // === Commands ===

    /// Add one randomly placed particle; returns its id
    pub fn add_particle(&mut self, category: Category) -> u32 {
        let id = self.next_entity_id();
        let particle = Particle::random(id, category, self.bounds, &self.settings, &mut self.rng);
        self.particles.push(particle);
        id
    }

    /// Add one particle with an explicit position and velocity; returns its id
    pub fn spawn_particle_at(&mut self, category: Category, pos: Vec2, vel: Vec2, damped: bool) -> u32 {
        let id = self.next_entity_id();
        let pos = self.bounds.clamp_circle(pos, self.settings.particle_radius);
        self.particles
            .push(Particle::new(id, pos, vel, self.settings.particle_radius, category, damped));
        id
    }

    /// Grow or shrink one category to `count` particles
    ///
    /// Shrinking removes the most recently created particles of that category.
    pub fn set_category_count(&mut self, category: Category, count: u32) {
        let current = self.category_count(category);
        if count > current {
            for _ in current..count {
                self.add_particle(category);
            }
        } else if count < current {
            let mut to_remove = current - count;
            let mut i = self.particles.len();
            while i > 0 && to_remove > 0 {
                i -= 1;
                if self.particles[i].category == category {
                    self.particles.remove(i);
                    to_remove -= 1;
                }
            }
        }
        log::debug!("{} count: {} -> {}", category.as_str(), current, count);
    }

    pub fn toggle_pause(&mut self) {
        self.clock.toggle_pause();
        log::debug!("Simulation {:?}", self.phase());
    }

    pub fn set_paused(&mut self, paused: bool) {
        if paused != self.clock.is_paused() {
            self.toggle_pause();
        }
    }

    /// Default population, zero counters and time, running again
    pub fn reset(&mut self) {
        self.populate();
        self.effects.clear();
        self.boost.clear();
        self.collisions = 0;
        self.speed_multiplier = 1.0;
        self.clock.reset();
        self.obstacle = Obstacle::centered(
            self.bounds,
            self.settings.obstacle_size,
            self.settings.obstacle_speed,
        );
        log::info!("Simulation reset ({} particles)", self.particles.len());
    }

    /// Adopt new canvas bounds, pulling everything back on screen
    pub fn resize(&mut self, bounds: Bounds) {
        self.bounds = bounds;
        self.obstacle.clamp_to(bounds);
        for particle in self.particles.iter_mut().filter(|p| !p.destroyed) {
            particle.pos = bounds.clamp_circle(particle.pos, particle.radius);
        }
        log::info!("Canvas resized to {}x{}", bounds.width, bounds.height);
    }

    /// Record a movement key press outside of a frame
    pub fn record_key_press(&mut self, now: f64) {
        self.boost.record(now);
    }

    // === Frame ===

    /// Advance one frame at wall-clock `now` (seconds) and report the result
    pub fn step(&mut self, now: f64, input: &TickInput) -> RenderSnapshot {
        let dt = self.clock.tick(now);

        // Paused: draw-only
        if self.clock.is_paused() {
            return self.snapshot();
        }

        for _ in 0..input.presses {
            self.boost.record(now);
        }
        self.speed_multiplier = self.boost.multiplier(now);
        self.obstacle
            .apply_input(input, self.speed_multiplier, dt, self.bounds);

        // Every particle sees its peers' positions from before this frame
        let peers: Vec<Vec2> = self.particles.iter().map(|p| p.pos).collect();
        let ctx = StepContext {
            bounds: self.bounds,
            obstacle: self.obstacle.rect(),
            now,
            frames: frame_units(dt),
            settings: &self.settings,
        };
        let mut events = std::mem::take(&mut self.events);
        events.clear();
        for (i, particle) in self.particles.iter_mut().enumerate() {
            particle.step(i, &peers, &ctx, &mut self.rng, &mut events);
        }

        for event in events.drain(..) {
            match event {
                ParticleEvent::ObstacleHit { point } => {
                    self.collisions += 1;
                    self.effects.push(self.factory.spawn_collision_pulse(point));
                }
                ParticleEvent::Shattered { pos, category, .. } => {
                    let burst = self.factory.spawn_explosion(pos, category.color(), &mut self.rng);
                    self.effects.extend(burst);
                }
            }
        }
        self.events = events;

        self.particles.retain(|p| !p.destroyed);

        for effect in &mut self.effects {
            effect.step(dt);
        }
        self.effects.retain(|e| !e.finished);

        self.snapshot()
    }

    /// Current state for drawing, without advancing anything
    pub fn snapshot(&self) -> RenderSnapshot {
        let live = self.particles.iter().filter(|p| !p.destroyed);
        RenderSnapshot {
            particles: live.map(ParticleView::from).collect(),
            effects: self.effects.iter().filter_map(EffectView::from_pulse).collect(),
            obstacle: self.obstacle.rect(),
            counters: self.counters(),
        }
    }

    pub fn counters(&self) -> Counters {
        let mut per_category = [0u32; Category::COUNT];
        for particle in self.particles.iter().filter(|p| !p.destroyed) {
            per_category[particle.category.index()] += 1;
        }
        Counters {
            per_category,
            total: per_category.iter().sum(),
            collisions: self.collisions,
            elapsed_secs: self.clock.elapsed(),
            paused: self.clock.is_paused(),
            speed_multiplier: self.speed_multiplier,
        }
    }

    // === Accessors ===

    pub fn phase(&self) -> SimPhase {
        if self.clock.is_paused() {
            SimPhase::Paused
        } else {
            SimPhase::Running
        }
    }

    pub fn is_paused(&self) -> bool {
        self.clock.is_paused()
    }

    pub fn category_count(&self, category: Category) -> u32 {
        self.particles
            .iter()
            .filter(|p| p.category == category && !p.destroyed)
            .count() as u32
    }

    pub fn collision_count(&self) -> u64 {
        self.collisions
    }

    pub fn elapsed(&self) -> f64 {
        self.clock.elapsed()
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn effects(&self) -> &[EffectPulse] {
        &self.effects
    }

    pub fn obstacle(&self) -> &Obstacle {
        &self.obstacle
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::category::Rgb;
    use crate::sim::effects::RenderMode;

    const FRAME: f64 = 1.0 / 60.0;

    fn engine() -> Engine {
        Engine::new(Settings::default(), Bounds::new(800.0, 600.0), 12345)
    }

    fn empty_engine() -> Engine {
        let mut engine = engine();
        for category in Category::ALL {
            engine.set_category_count(category, 0);
        }
        engine
    }

    #[test]
    fn test_default_population() {
        let engine = engine();
        let counters = engine.counters();
        assert_eq!(counters.total, 50);
        for category in Category::ALL {
            assert_eq!(counters.count(category), 10);
        }
        assert_eq!(engine.phase(), SimPhase::Running);
        let bounds = engine.bounds();
        assert!(engine.particles().iter().all(|p| bounds.contains_circle(p.pos, p.radius)));
    }

    #[test]
    fn test_set_category_count_removes_from_tail() {
        let mut engine = empty_engine();
        let first = engine.add_particle(Category::Blue);
        engine.add_particle(Category::Red);
        let second = engine.add_particle(Category::Blue);
        let third = engine.add_particle(Category::Blue);

        engine.set_category_count(Category::Blue, 1);
        let ids: Vec<u32> = engine.particles().iter().map(|p| p.id).collect();
        assert!(ids.contains(&first));
        assert!(!ids.contains(&second));
        assert!(!ids.contains(&third));
        assert_eq!(engine.category_count(Category::Red), 1);

        engine.set_category_count(Category::Blue, 4);
        assert_eq!(engine.category_count(Category::Blue), 4);
        assert_eq!(engine.counters().total, 5);
    }

    #[test]
    fn test_first_frame_moves_nothing() {
        let mut engine = engine();
        let before = engine.snapshot();
        let after = engine.step(100.0, &TickInput::default());
        assert_eq!(before.particles, after.particles);
        assert_eq!(after.counters.elapsed_secs, 0.0);
    }

    #[test]
    fn test_head_on_collision_scenario() {
        let mut engine = empty_engine();
        let square = engine.obstacle().rect();
        let start = Vec2::new(square.min().x - 15.0, square.center().y);
        engine.spawn_particle_at(Category::Red, start, Vec2::new(3.0, 0.0), false);

        let input = TickInput::default();
        let mut now = 0.0;
        engine.step(now, &input);

        let mut hit_snapshot = None;
        for _ in 0..30 {
            now += FRAME;
            let snapshot = engine.step(now, &input);
            if snapshot.counters.collisions == 1 && hit_snapshot.is_none() {
                hit_snapshot = Some(snapshot);
            }
        }

        assert_eq!(engine.collision_count(), 1);
        let snapshot = hit_snapshot.expect("particle should reach the square");
        assert_eq!(snapshot.effects.len(), 1);
        assert_eq!(snapshot.effects[0].mode, RenderMode::Outline);
        assert_eq!(snapshot.effects[0].color, Rgb::WHITE);
        assert_eq!(snapshot.effects[0].pos.x, square.min().x);

        let particle = &engine.particles()[0];
        assert!(particle.vel.x < 0.0);
        let deviation = particle.vel.y.atan2(-particle.vel.x).abs();
        assert!(deviation <= 15f32.to_radians() + 1e-4);
        // Square never moved
        assert_eq!(engine.obstacle().rect(), square);
    }

    #[test]
    fn test_wall_shatter_spawns_one_explosion() {
        let mut engine = empty_engine();
        engine.spawn_particle_at(Category::Lavender, Vec2::new(785.0, 300.0), Vec2::new(20.0, 0.0), false);

        engine.step(0.0, &TickInput::default());
        let snapshot = engine.step(FRAME, &TickInput::default());

        assert_eq!(snapshot.counters.total, 0);
        assert_eq!(snapshot.counters.collisions, 0);
        assert_eq!(snapshot.effects.len(), 22);
        let lavender = Category::Lavender.color();
        assert_eq!(snapshot.effects.iter().filter(|e| e.color == lavender).count(), 21);
    }

    #[test]
    fn test_attraction_reads_positions_from_before_the_frame() {
        let mut engine = empty_engine();
        engine.spawn_particle_at(Category::Red, Vec2::new(100.0, 100.0), Vec2::ZERO, false);
        engine.spawn_particle_at(Category::Blue, Vec2::new(110.0, 104.0), Vec2::ZERO, false);

        engine.step(0.0, &TickInput::default());
        engine.step(FRAME, &TickInput::default());

        let (a, b) = (&engine.particles()[0], &engine.particles()[1]);
        assert_ne!(a.vel, Vec2::ZERO);
        // Equal and opposite only if neither saw the other's new position
        assert_eq!(a.vel, -b.vel);
    }

    #[test]
    fn test_sixth_hit_in_a_second_explodes_instead_of_counting() {
        let mut engine = empty_engine();
        let square = engine.obstacle().rect();
        let start = Vec2::new(square.min().x - 9.0, square.center().y);
        engine.spawn_particle_at(Category::Rose, start, Vec2::new(3.0, 0.0), false);

        let input = TickInput::default();
        engine.step(0.0, &input);
        for i in 1..=5 {
            let particle = &mut engine.particles[0];
            particle.pos = start;
            particle.vel = Vec2::new(3.0, 0.0);
            particle.was_colliding = false;
            engine.step(i as f64 * FRAME, &input);
            assert_eq!(engine.collision_count(), i);
        }
        let pulses_before = engine.effects().len();
        assert_eq!(pulses_before, 5);

        let particle = &mut engine.particles[0];
        particle.pos = start;
        particle.vel = Vec2::new(3.0, 0.0);
        particle.was_colliding = false;
        let snapshot = engine.step(6.0 * FRAME, &input);

        assert_eq!(snapshot.counters.collisions, 5);
        assert_eq!(snapshot.counters.total, 0);
        assert_eq!(engine.effects().len() - pulses_before, 22);
        let rose = Category::Rose.color();
        assert_eq!(snapshot.effects.iter().filter(|e| e.color == rose).count(), 21);
    }

    #[test]
    fn test_elapsed_counts_measured_time_on_slow_frames() {
        let mut engine = empty_engine();
        engine.step(0.0, &TickInput::default());
        for i in 1..=5 {
            engine.step(i as f64 * 0.2, &TickInput::default());
        }
        assert!((engine.elapsed() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_pause_freezes_snapshots() {
        let mut engine = engine();
        let input = TickInput {
            right: true,
            presses: 3,
            ..Default::default()
        };
        let mut now = 0.0;
        for _ in 0..20 {
            engine.step(now, &input);
            now += FRAME;
        }
        engine.toggle_pause();
        assert_eq!(engine.phase(), SimPhase::Paused);

        let a = engine.step(now, &input);
        let b = engine.step(now + 0.5, &input);
        assert_eq!(a, b);
        assert!(a.counters.paused);

        // Resume: first frame after resume is a zero-delta frame
        engine.toggle_pause();
        let c = engine.step(now + 10.0, &TickInput::default());
        assert_eq!(a.particles, c.particles);
        assert_eq!(a.counters.elapsed_secs, c.counters.elapsed_secs);
    }

    #[test]
    fn test_obstacle_moves_with_boost() {
        let mut engine = empty_engine();
        let start = engine.obstacle().pos;
        engine.step(0.0, &TickInput::default());

        // 20 presses -> 2x speed -> 400 px/s
        let input = TickInput {
            left: true,
            presses: 20,
            ..Default::default()
        };
        let snapshot = engine.step(0.05, &input);
        assert_eq!(snapshot.counters.speed_multiplier, 2.0);
        assert!((snapshot.obstacle.pos.x - (start.x - 20.0)).abs() < 1e-3);
        assert_eq!(snapshot.obstacle.pos.y, start.y);
    }

    #[test]
    fn test_reset_restores_defaults() {
        let mut engine = engine();
        engine.set_category_count(Category::Rose, 2);
        engine.set_category_count(Category::Sage, 25);
        engine.step(0.0, &TickInput::default());
        engine.step(FRAME, &TickInput::default());
        engine.collisions = 7;
        engine.toggle_pause();

        engine.reset();
        let counters = engine.counters();
        assert_eq!(engine.phase(), SimPhase::Running);
        assert_eq!(counters.collisions, 0);
        assert_eq!(counters.elapsed_secs, 0.0);
        assert_eq!(counters.total, 50);
        for category in Category::ALL {
            assert_eq!(counters.count(category), 10);
        }
        assert!(engine.effects().is_empty());
    }

    #[test]
    fn test_resize_reclamps_everything() {
        let mut engine = engine();
        let small = Bounds::new(200.0, 150.0);
        engine.resize(small);
        assert!(engine.particles().iter().all(|p| small.contains_circle(p.pos, p.radius)));
        let rect = engine.obstacle().rect();
        assert!(rect.max().x <= 200.0 && rect.max().y <= 150.0);
        assert!(rect.min().x >= 0.0 && rect.min().y >= 0.0);
    }

    #[test]
    fn test_bounds_hold_over_many_frames() {
        let mut engine = Engine::new(
            Settings::from_profile(crate::AttractionProfile::Strong),
            Bounds::new(640.0, 480.0),
            7,
        );
        let input = TickInput {
            up: true,
            left: true,
            presses: 1,
            ..Default::default()
        };
        let mut now = 0.0;
        for _ in 0..600 {
            let snapshot = engine.step(now, &input);
            let bounds = engine.bounds();
            assert!(snapshot
                .particles
                .iter()
                .all(|p| p.pos.is_finite() && bounds.contains_circle(p.pos, p.radius)));
            now += FRAME;
        }
        assert_eq!(engine.counters().total as usize, engine.particles().len());
    }

    #[test]
    fn test_determinism() {
        // Same seed and inputs produce identical frames
        let mut a = engine();
        let mut b = engine();
        let inputs = [
            TickInput::default(),
            TickInput {
                right: true,
                presses: 2,
                ..Default::default()
            },
            TickInput {
                down: true,
                ..Default::default()
            },
        ];
        let mut now = 0.0;
        for i in 0..120 {
            let input = &inputs[i % inputs.len()];
            assert_eq!(a.step(now, input), b.step(now, input));
            now += FRAME;
        }
    }
}
