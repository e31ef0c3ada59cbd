//! Simulation settings
//!
//! Every tunable of the simulation lives here so front ends can ship a JSON
//! file instead of recompiling. Missing fields fall back to defaults.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::SettingsError;

/// Attraction strength presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum AttractionProfile {
    #[default]
    Gentle,
    Strong,
}

impl AttractionProfile {
    pub fn as_str(&self) -> &'static str {
        match self {
            AttractionProfile::Gentle => "Gentle",
            AttractionProfile::Strong => "Strong",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "gentle" | "soft" => Some(AttractionProfile::Gentle),
            "strong" => Some(AttractionProfile::Strong),
            _ => None,
        }
    }

    /// Force constant `k` in `k / (r² + 1)`
    pub fn strength(&self) -> f32 {
        match self {
            AttractionProfile::Gentle => ATTRACTION_GENTLE,
            AttractionProfile::Strong => ATTRACTION_STRONG,
        }
    }
}

/// Pulse and explosion parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EffectSettings {
    /// Radius growth (px/s)
    pub expansion_rate: f32,
    /// Opacity loss per second
    pub fade_rate: f32,

    // === Collision feedback ===
    pub pulse_max_radius: f32,

    // === Explosion ===
    pub core_max_radius: f32,
    pub burst_rings: usize,
    pub burst_min_radius: f32,
    pub burst_max_radius: f32,
    pub burst_opacity: f32,
    /// Positional jitter per burst ring (px, each way)
    pub burst_jitter: f32,
    pub outer_rings: usize,
    pub outer_base_radius: f32,
    pub outer_radius_step: f32,
    pub outer_base_opacity: f32,
    pub outer_opacity_step: f32,
    pub flash_max_radius: f32,
    pub flash_opacity: f32,
}

impl Default for EffectSettings {
    fn default() -> Self {
        Self {
            expansion_rate: 200.0,
            fade_rate: 1.0,

            pulse_max_radius: 50.0,

            core_max_radius: 60.0,
            burst_rings: 15,
            burst_min_radius: 100.0,
            burst_max_radius: 140.0,
            burst_opacity: 0.9,
            burst_jitter: 5.0,
            outer_rings: 5,
            outer_base_radius: 120.0,
            outer_radius_step: 20.0,
            outer_base_opacity: 0.6,
            outer_opacity_step: 0.1,
            flash_max_radius: 80.0,
            flash_opacity: 0.5,
        }
    }
}

/// Simulation settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Physics ===
    pub attraction: AttractionProfile,
    /// Overrides the profile strength when set
    pub attraction_strength: Option<f32>,
    pub damping_factor: f32,
    pub min_speed: f32,
    /// Probability that a new particle is damped
    pub damping_chance: f64,
    pub particle_radius: f32,
    pub shatter_speed: f32,
    pub bounce_strength: f32,
    pub bounce_jitter_deg: f32,
    pub corner_factor: f32,
    pub push_out_epsilon: f32,
    pub collision_limit: usize,
    pub collision_window_secs: f64,

    // === Population ===
    pub default_count: u32,

    // === Square ===
    pub obstacle_size: f32,
    pub obstacle_speed: f32,

    // === Input ===
    pub boost_window_secs: f64,

    // === Timing ===
    pub max_frame_dt: f32,

    // === Effects ===
    pub effects: EffectSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            attraction: AttractionProfile::Gentle,
            attraction_strength: None,
            damping_factor: DAMPING_FACTOR,
            min_speed: MIN_SPEED,
            damping_chance: DAMPING_CHANCE,
            particle_radius: PARTICLE_RADIUS,
            shatter_speed: SHATTER_SPEED,
            bounce_strength: BOUNCE_STRENGTH,
            bounce_jitter_deg: BOUNCE_JITTER_DEG,
            corner_factor: CORNER_FACTOR,
            push_out_epsilon: PUSH_OUT_EPSILON,
            collision_limit: COLLISION_LIMIT,
            collision_window_secs: COLLISION_WINDOW_SECS,

            default_count: DEFAULT_COUNT_PER_CATEGORY,

            obstacle_size: OBSTACLE_SIZE,
            obstacle_speed: OBSTACLE_SPEED,

            boost_window_secs: BOOST_WINDOW_SECS,

            max_frame_dt: MAX_FRAME_DT,

            effects: EffectSettings::default(),
        }
    }
}

impl Settings {
    /// Create settings with the given attraction profile
    pub fn from_profile(profile: AttractionProfile) -> Self {
        Self {
            attraction: profile,
            ..Self::default()
        }
    }

    /// Effective attraction constant
    pub fn attraction_strength(&self) -> f32 {
        self.attraction_strength
            .unwrap_or_else(|| self.attraction.strength())
    }

    /// Parse and validate settings from JSON
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load settings from a JSON file (native only)
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load(path: impl AsRef<std::path::Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Reject values that would make the simulation degenerate
    pub fn validate(&self) -> Result<(), SettingsError> {
        let positive = [
            ("particle_radius", self.particle_radius),
            ("shatter_speed", self.shatter_speed),
            ("obstacle_size", self.obstacle_size),
            ("max_frame_dt", self.max_frame_dt),
            ("effects.expansion_rate", self.effects.expansion_rate),
            ("effects.fade_rate", self.effects.fade_rate),
        ];
        for (field, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(SettingsError::invalid(field, format!("must be > 0, got {value}")));
            }
        }

        let finite = [
            ("min_speed", self.min_speed),
            ("bounce_jitter_deg", self.bounce_jitter_deg),
            ("corner_factor", self.corner_factor),
            ("push_out_epsilon", self.push_out_epsilon),
            ("effects.pulse_max_radius", self.effects.pulse_max_radius),
            ("effects.core_max_radius", self.effects.core_max_radius),
            ("effects.burst_min_radius", self.effects.burst_min_radius),
            ("effects.burst_max_radius", self.effects.burst_max_radius),
            ("effects.burst_jitter", self.effects.burst_jitter),
            ("effects.outer_base_radius", self.effects.outer_base_radius),
            ("effects.outer_radius_step", self.effects.outer_radius_step),
            ("effects.flash_max_radius", self.effects.flash_max_radius),
        ];
        for (field, value) in finite {
            if !value.is_finite() {
                return Err(SettingsError::invalid(field, format!("must be finite, got {value}")));
            }
        }

        if let Some(k) = self.attraction_strength {
            if !k.is_finite() || k < 0.0 {
                return Err(SettingsError::invalid(
                    "attraction_strength",
                    format!("must be >= 0, got {k}"),
                ));
            }
        }
        if !(0.0..=1.0).contains(&self.damping_factor) {
            return Err(SettingsError::invalid(
                "damping_factor",
                format!("must be in [0, 1], got {}", self.damping_factor),
            ));
        }
        if !(0.0..=1.0).contains(&self.damping_chance) {
            return Err(SettingsError::invalid(
                "damping_chance",
                format!("must be in [0, 1], got {}", self.damping_chance),
            ));
        }
        if !(self.obstacle_speed.is_finite() && self.obstacle_speed >= 0.0) {
            return Err(SettingsError::invalid(
                "obstacle_speed",
                format!("must be >= 0, got {}", self.obstacle_speed),
            ));
        }
        if !(self.bounce_strength.is_finite() && self.bounce_strength >= 1.0) {
            return Err(SettingsError::invalid(
                "bounce_strength",
                format!("must amplify (>= 1), got {}", self.bounce_strength),
            ));
        }
        if self.collision_window_secs <= 0.0 || self.boost_window_secs <= 0.0 {
            return Err(SettingsError::invalid("window", "time windows must be > 0"));
        }
        if self.effects.burst_min_radius > self.effects.burst_max_radius {
            return Err(SettingsError::invalid(
                "effects.burst_min_radius",
                "must not exceed burst_max_radius",
            ));
        }
        Ok(())
    }
}
