//! Simulation core
//!
//! Everything that moves lives here. This module must stay free of
//! rendering and platform code:
//! - Measured delta time only (no fixed frame rate assumed)
//! - Seeded RNG only
//! - State mutated only inside `Engine::step` and the engine's commands

pub mod category;
pub mod clock;
pub mod collision;
pub mod effects;
pub mod engine;
pub mod geometry;
pub mod input;
pub mod obstacle;
pub mod particle;
pub mod snapshot;

pub use category::{Category, Rgb};
pub use clock::SimulationClock;
pub use collision::{CollisionResult, circle_rect_collision};
pub use effects::{EffectFactory, EffectPulse, RenderMode};
pub use engine::{Engine, SimPhase};
pub use geometry::{Bounds, Rect};
pub use input::{Key, SpeedBoost, TickInput, speed_multiplier};
pub use obstacle::Obstacle;
pub use particle::{Particle, ParticleEvent, StepContext};
pub use snapshot::{Counters, EffectView, ParticleView, RenderSnapshot, format_elapsed};
