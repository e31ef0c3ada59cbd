//! Pulse Field - attracting particles, a movable square and pulse effects
//!
//! Core modules:
//! - `sim`: Simulation core (particles, obstacle, effects, clock, engine)
//! - `renderer`: Draw-ready instance packing for a 2D raster surface
//! - `platform`: Frame-rate measurement and the browser binding
//! - `settings`: Data-driven tuning
//! - `error`: Errors for the fallible outer surfaces

pub mod error;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use error::SettingsError;
pub use settings::{AttractionProfile, EffectSettings, Settings};
pub use sim::{Engine, RenderSnapshot, TickInput};

/// Simulation configuration constants
pub mod consts {
    /// Reference frame rate that particle velocities are expressed in
    pub const REFERENCE_FPS: f32 = 60.0;
    /// Largest delta accepted per frame (stalled tabs, debugger pauses)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Particle defaults
    pub const PARTICLE_RADIUS: f32 = 7.0;
    pub const DEFAULT_COUNT_PER_CATEGORY: u32 = 10;
    pub const DAMPING_CHANCE: f64 = 0.4;
    pub const DAMPING_FACTOR: f32 = 0.99;
    /// Damped particles never slow below this (px/frame, per axis)
    pub const MIN_SPEED: f32 = 0.1;
    /// Initial velocity spread (px/frame, per axis)
    pub const INITIAL_SPEED_SPREAD: f32 = 1.0;

    /// Attraction strengths
    pub const ATTRACTION_GENTLE: f32 = 0.3;
    pub const ATTRACTION_STRONG: f32 = 1.0;

    /// Speed magnitude above which a wall hit shatters the particle
    pub const SHATTER_SPEED: f32 = 15.0;
    /// Multiplier applied to a reflected bounce off the square
    pub const BOUNCE_STRENGTH: f32 = 1.3;
    /// Random bounce rotation (degrees, each way)
    pub const BOUNCE_JITTER_DEG: f32 = 15.0;
    /// Corner hits are those within this many radii of a corner
    pub const CORNER_FACTOR: f32 = 1.5;
    /// Extra separation after push-out
    pub const PUSH_OUT_EPSILON: f32 = 0.5;
    /// Square hits allowed within the window before a particle shatters
    pub const COLLISION_LIMIT: usize = 5;
    pub const COLLISION_WINDOW_SECS: f64 = 1.0;

    /// Square defaults
    pub const OBSTACLE_SIZE: f32 = 50.0;
    pub const OBSTACLE_SPEED: f32 = 200.0;

    /// Key presses older than this no longer count toward the speed boost
    pub const BOOST_WINDOW_SECS: f64 = 3.0;
}

/// Number of reference frames covered by `dt` seconds
#[inline]
pub fn frame_units(dt: f32) -> f32 {
    dt * consts::REFERENCE_FPS
}

/// Clamp that tolerates `lo > hi` (resolves to `hi`) instead of panicking
#[inline]
pub fn clamp_soft(value: f32, lo: f32, hi: f32) -> f32 {
    value.max(lo).min(hi)
}
