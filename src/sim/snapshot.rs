//! Per-frame output for renderers and UI counters

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::category::{Category, Rgb};
use super::effects::{EffectPulse, RenderMode};
use super::geometry::Rect;
use super::particle::Particle;

/// A particle as it should be drawn
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParticleView {
    pub pos: Vec2,
    pub radius: f32,
    pub color: Rgb,
    pub category: Category,
}

impl From<&Particle> for ParticleView {
    fn from(p: &Particle) -> Self {
        Self {
            pos: p.pos,
            radius: p.radius,
            color: p.category.color(),
            category: p.category,
        }
    }
}

/// An effect as it should be drawn (values already clamped)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EffectView {
    pub pos: Vec2,
    pub radius: f32,
    pub opacity: f32,
    pub color: Rgb,
    pub mode: RenderMode,
}

impl EffectView {
    /// `None` for effects that would draw nothing
    pub fn from_pulse(pulse: &EffectPulse) -> Option<Self> {
        if !pulse.is_visible() {
            return None;
        }
        Some(Self {
            pos: pulse.pos,
            radius: pulse.radius.max(0.0),
            opacity: pulse.opacity.clamp(0.0, 1.0),
            color: pulse.color,
            mode: pulse.mode,
        })
    }
}

/// UI-facing counters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Counters {
    /// Live particles per category, indexed by [`Category::index`]
    pub per_category: [u32; Category::COUNT],
    pub total: u32,
    pub collisions: u64,
    pub elapsed_secs: f64,
    pub paused: bool,
    pub speed_multiplier: f32,
}

impl Counters {
    pub fn count(&self, category: Category) -> u32 {
        self.per_category[category.index()]
    }

    /// Elapsed time as `m:ss`
    pub fn elapsed_label(&self) -> String {
        format_elapsed(self.elapsed_secs)
    }
}

/// Everything needed to draw one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderSnapshot {
    pub particles: Vec<ParticleView>,
    pub effects: Vec<EffectView>,
    pub obstacle: Rect,
    pub counters: Counters,
}

/// Format seconds as `m:ss` (minutes unpadded)
pub fn format_elapsed(secs: f64) -> String {
    let total = if secs.is_finite() && secs > 0.0 {
        secs.floor() as u64
    } else {
        0
    };
    format!("{}:{:02}", total / 60, total % 60)
}
