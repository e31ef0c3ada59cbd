//! Instance records for circles and the square

use bytemuck::{Pod, Zeroable};

use crate::sim::{RenderMode, RenderSnapshot};

/// Circle draw styles (matches `CircleInstance::style`)
pub const STYLE_FILLED: u32 = 0;
pub const STYLE_OUTLINE: u32 = 1;
/// Soft glow around a particle body
pub const STYLE_GLOW: u32 = 2;

/// Stroke width for outline rings (px)
pub const OUTLINE_WIDTH: f32 = 2.0;

/// Particle glow layer alpha and core scale
const GLOW_ALPHA: f32 = 0.7;
const CORE_SCALE: f32 = 0.5;

/// Colors for scene elements
pub mod colors {
    pub const BACKGROUND_TOP: [f32; 4] = [0.0, 0.0, 0.0, 1.0];
    /// #1a1a1a
    pub const BACKGROUND_BOTTOM: [f32; 4] = [0.102, 0.102, 0.102, 1.0];
    pub const OBSTACLE: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
}

/// One circle (particle layer or effect)
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct CircleInstance {
    pub center: [f32; 2],
    pub radius: f32,
    pub style: u32,
    pub color: [f32; 4],
}

/// One axis-aligned rectangle
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct RectInstance {
    pub min: [f32; 2],
    pub size: [f32; 2],
    pub color: [f32; 4],
}

/// Instances for one frame, in draw order: particles, effects, square
#[derive(Debug, Clone, Default)]
pub struct FrameInstances {
    pub circles: Vec<CircleInstance>,
    pub rects: Vec<RectInstance>,
}

impl FrameInstances {
    pub fn circle_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.circles)
    }

    pub fn rect_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.rects)
    }
}

/// Flatten a snapshot into instance records
///
/// Each particle becomes a translucent glow at full radius plus an opaque
/// core at half radius.
pub fn build_instances(snapshot: &RenderSnapshot) -> FrameInstances {
    let mut circles = Vec::with_capacity(snapshot.particles.len() * 2 + snapshot.effects.len());

    for p in &snapshot.particles {
        circles.push(CircleInstance {
            center: p.pos.to_array(),
            radius: p.radius,
            style: STYLE_GLOW,
            color: p.color.to_rgba(GLOW_ALPHA),
        });
        circles.push(CircleInstance {
            center: p.pos.to_array(),
            radius: p.radius * CORE_SCALE,
            style: STYLE_FILLED,
            color: p.color.to_rgba(1.0),
        });
    }

    for e in &snapshot.effects {
        if e.opacity <= 0.0 || !e.radius.is_finite() {
            continue;
        }
        circles.push(CircleInstance {
            center: e.pos.to_array(),
            radius: e.radius.max(0.0),
            style: match e.mode {
                RenderMode::Filled => STYLE_FILLED,
                RenderMode::Outline => STYLE_OUTLINE,
            },
            color: e.color.to_rgba(e.opacity),
        });
    }

    let rects = vec![RectInstance {
        min: snapshot.obstacle.pos.to_array(),
        size: snapshot.obstacle.size.to_array(),
        color: colors::OBSTACLE,
    }];

    FrameInstances { circles, rects }
}
