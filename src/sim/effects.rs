//! Transient visual effects: collision pulses and explosions
//!
//! Effects never touch physics. They grow, fade, and get dropped once
//! finished.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::category::Rgb;
use crate::settings::EffectSettings;

/// How an effect is drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RenderMode {
    /// Filled disc (explosion cores, flashes)
    Filled,
    /// Stroked ring (feedback pulses, blast rings)
    Outline,
}

/// An expanding, fading ring or disc
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EffectPulse {
    pub pos: Vec2,
    pub radius: f32,
    pub max_radius: f32,
    pub opacity: f32,
    pub color: Rgb,
    pub mode: RenderMode,
    pub expansion_rate: f32,
    pub fade_rate: f32,
    pub finished: bool,
}

impl EffectPulse {
    /// Start at radius 0, growing and fading at the rates in `rates`
    pub fn new(
        pos: Vec2,
        max_radius: f32,
        opacity: f32,
        color: Rgb,
        mode: RenderMode,
        rates: &EffectSettings,
    ) -> Self {
        Self {
            pos,
            radius: 0.0,
            max_radius: max_radius.max(0.0),
            opacity: opacity.clamp(0.0, 1.0),
            color,
            mode,
            expansion_rate: rates.expansion_rate,
            fade_rate: rates.fade_rate,
            finished: false,
        }
    }

    /// Grow and fade by `dt` seconds
    ///
    /// Non-positive or non-finite `dt` leaves the pulse untouched, as does a
    /// pulse that already finished.
    pub fn step(&mut self, dt: f32) {
        if self.finished || !dt.is_finite() || dt <= 0.0 {
            return;
        }

        self.radius += self.expansion_rate * dt;
        self.opacity = (self.opacity - self.fade_rate * dt).max(0.0);

        if self.radius >= self.max_radius || self.opacity <= 0.0 {
            self.finished = true;
        }
    }

    /// Whether the pulse still produces visible output
    pub fn is_visible(&self) -> bool {
        !self.finished && self.radius >= 0.0 && self.opacity > 0.0
    }
}

/// Builds pulses and explosion bursts from [`EffectSettings`]
#[derive(Debug, Clone, Default)]
pub struct EffectFactory {
    pub settings: EffectSettings,
}

impl EffectFactory {
    pub fn new(settings: EffectSettings) -> Self {
        Self { settings }
    }

    fn pulse(&self, pos: Vec2, max_radius: f32, opacity: f32, color: Rgb, mode: RenderMode) -> EffectPulse {
        EffectPulse::new(pos, max_radius, opacity, color, mode, &self.settings)
    }

    /// Single white ring for a square hit
    pub fn spawn_collision_pulse(&self, pos: Vec2) -> EffectPulse {
        self.pulse(pos, self.settings.pulse_max_radius, 1.0, Rgb::WHITE, RenderMode::Outline)
    }

    /// Layered burst for a shattered particle
    ///
    /// Layers, in order: one filled core, the jittered burst rings, the
    /// stepped outer rings, one white flash.
    pub fn spawn_explosion<R: Rng>(&self, pos: Vec2, color: Rgb, rng: &mut R) -> Vec<EffectPulse> {
        let s = &self.settings;
        let mut out = Vec::with_capacity(s.burst_rings + s.outer_rings + 2);

        out.push(self.pulse(pos, s.core_max_radius, 1.0, color, RenderMode::Filled));

        for _ in 0..s.burst_rings {
            let bounded = s.burst_min_radius.is_finite() && s.burst_max_radius.is_finite();
            let max_radius = if bounded && s.burst_max_radius > s.burst_min_radius {
                rng.random_range(s.burst_min_radius..s.burst_max_radius)
            } else {
                s.burst_min_radius
            };
            let jitter = Vec2::new(
                (rng.random::<f32>() - 0.5) * 2.0 * s.burst_jitter,
                (rng.random::<f32>() - 0.5) * 2.0 * s.burst_jitter,
            );
            out.push(self.pulse(pos + jitter, max_radius, s.burst_opacity, color, RenderMode::Outline));
        }

        for i in 0..s.outer_rings {
            let step = i as f32;
            let max_radius = s.outer_base_radius + step * s.outer_radius_step;
            let opacity = s.outer_base_opacity - step * s.outer_opacity_step;
            out.push(self.pulse(pos, max_radius, opacity, color, RenderMode::Outline));
        }

        out.push(self.pulse(pos, s.flash_max_radius, s.flash_opacity, Rgb::WHITE, RenderMode::Filled));

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_pulse_grows_and_fades() {
        let mut pulse = EffectFactory::default().spawn_collision_pulse(Vec2::ZERO);
        pulse.step(0.1);
        assert!((pulse.radius - 20.0).abs() < 1e-4);
        assert!((pulse.opacity - 0.9).abs() < 1e-4);
        assert!(!pulse.finished);
    }

    #[test]
    fn test_pulse_finishes_at_max_radius() {
        let mut pulse = EffectFactory::default().spawn_collision_pulse(Vec2::ZERO);
        // 50px at 200px/s -> 0.25s
        for _ in 0..30 {
            pulse.step(0.01);
        }
        assert!(pulse.finished);
        assert!(pulse.radius >= pulse.max_radius);
        assert!(!pulse.is_visible());
    }

    #[test]
    fn test_pulse_finishes_when_faded() {
        let rates = EffectSettings::default();
        let mut pulse = EffectPulse::new(Vec2::ZERO, 1000.0, 0.3, Rgb::WHITE, RenderMode::Filled, &rates);
        pulse.step(0.5);
        assert!(pulse.finished);
        assert_eq!(pulse.opacity, 0.0);
    }

    #[test]
    fn test_factory_rates_reach_every_pulse() {
        let settings = EffectSettings {
            expansion_rate: 50.0,
            fade_rate: 4.0,
            ..Default::default()
        };
        let factory = EffectFactory::new(settings);
        let mut rng = Pcg32::seed_from_u64(3);
        let mut pulses = factory.spawn_explosion(Vec2::ZERO, Rgb::WHITE, &mut rng);
        pulses.push(factory.spawn_collision_pulse(Vec2::ZERO));
        for pulse in &mut pulses {
            assert_eq!((pulse.expansion_rate, pulse.fade_rate), (50.0, 4.0));
            pulse.step(0.1);
            assert!((pulse.radius - 5.0).abs() < 1e-4);
        }
    }

    #[test]
    fn test_unbounded_burst_radii_do_not_panic() {
        let settings = EffectSettings {
            burst_max_radius: f32::INFINITY,
            ..Default::default()
        };
        let mut rng = Pcg32::seed_from_u64(3);
        let burst = EffectFactory::new(settings).spawn_explosion(Vec2::ZERO, Rgb::WHITE, &mut rng);
        assert_eq!(burst.len(), 22);
        assert!(burst[1..16].iter().all(|ring| ring.max_radius == 100.0));
    }

    #[test]
    fn test_bad_dt_is_ignored() {
        let mut pulse = EffectFactory::default().spawn_collision_pulse(Vec2::ZERO);
        let before = pulse.clone();
        pulse.step(0.0);
        pulse.step(-1.0);
        pulse.step(f32::NAN);
        pulse.step(f32::INFINITY);
        assert_eq!(pulse, before);
    }

    #[test]
    fn test_finished_pulse_is_frozen() {
        let mut pulse = EffectFactory::default().spawn_collision_pulse(Vec2::ZERO);
        pulse.step(1.0);
        assert!(pulse.finished);
        let frozen = pulse.clone();
        pulse.step(0.5);
        assert_eq!(pulse, frozen);
    }

    #[test]
    fn test_explosion_composition() {
        let mut rng = Pcg32::seed_from_u64(7);
        let origin = Vec2::new(200.0, 150.0);
        let color = Rgb(220, 140, 140);
        let burst = EffectFactory::default().spawn_explosion(origin, color, &mut rng);

        assert_eq!(burst.len(), 1 + 15 + 5 + 1);

        let core = &burst[0];
        assert_eq!(core.mode, RenderMode::Filled);
        assert_eq!(core.max_radius, 60.0);
        assert_eq!(core.color, color);

        for ring in &burst[1..16] {
            assert_eq!(ring.mode, RenderMode::Outline);
            assert!((100.0..140.0).contains(&ring.max_radius));
            assert!((ring.pos - origin).abs().max_element() <= 5.0);
            assert!((ring.opacity - 0.9).abs() < 1e-6);
        }

        for (i, ring) in burst[16..21].iter().enumerate() {
            assert_eq!(ring.max_radius, 120.0 + 20.0 * i as f32);
            assert!((ring.opacity - (0.6 - 0.1 * i as f32)).abs() < 1e-6);
            assert_eq!(ring.pos, origin);
        }

        let flash = &burst[21];
        assert_eq!(flash.mode, RenderMode::Filled);
        assert_eq!(flash.color, Rgb::WHITE);
        assert_eq!(flash.max_radius, 80.0);
        assert_eq!(flash.opacity, 0.5);
    }

    proptest! {
        #[test]
        fn prop_pulse_monotonic(dts in proptest::collection::vec(-0.05f32..0.2, 1..60)) {
            let mut pulse = EffectFactory::default().spawn_collision_pulse(Vec2::ZERO);
            for dt in dts {
                let (r0, o0, done) = (pulse.radius, pulse.opacity, pulse.finished);
                pulse.step(dt);
                prop_assert!(pulse.radius >= r0);
                prop_assert!(pulse.opacity <= o0);
                prop_assert!(pulse.opacity >= 0.0);
                if done {
                    prop_assert_eq!(pulse.radius, r0);
                    prop_assert_eq!(pulse.opacity, o0);
                }
            }
        }
    }
}
