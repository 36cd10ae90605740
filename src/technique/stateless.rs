//! Stateless techniques: config plus generator, nothing to tick.

use glam::Vec3;

use crate::hash::{scatter3, unit_dir};
use crate::particles::ParticleTarget;
use crate::technique::{Technique, TechniqueConfig};

static AURA_CONFIG: TechniqueConfig = TechniqueConfig {
    display_name: "Aura",
    glow_color: [0.2, 0.5, 0.9],
    bloom: 1.0,
    shake: 0.0,
    camera_dolly: 0.0,
};

/// Neutral fallback: a calm drifting cloud. Every unknown or absent gesture
/// resolves to this.
pub struct Aura;

impl Technique for Aura {
    fn config(&self) -> &'static TechniqueConfig {
        &AURA_CONFIG
    }

    fn generate(&self, i: usize, _active: usize, now: f64) -> ParticleTarget {
        let (h0, h1, h2) = scatter3(i);
        let drift = 0.3 * ((now as f32) * 0.3 + h0 * 6.0).sin();
        let position = unit_dir(h1, h2) * (2.0 + 1.5 * h0 + drift);
        let color = Vec3::new(0.2, 0.45 + 0.2 * h2, 0.9) * (0.3 + 0.5 * h1);
        ParticleTarget {
            position,
            color,
            size: 0.04 + 0.04 * h2,
        }
    }
}

static VORTEX_CONFIG: TechniqueConfig = TechniqueConfig {
    display_name: "Vortex",
    glow_color: [0.3, 0.85, 0.5],
    bloom: 1.4,
    shake: 0.0,
    camera_dolly: 0.5,
};

/// Helical swirl; the whole shape rotates with time but each particle's slot
/// on the helix is fixed by its hash.
pub struct Vortex;

impl Technique for Vortex {
    fn config(&self) -> &'static TechniqueConfig {
        &VORTEX_CONFIG
    }

    fn generate(&self, i: usize, active: usize, now: f64) -> ParticleTarget {
        let (h0, h1, h2) = scatter3(i);
        let frac = i as f32 / active.max(1) as f32;
        let angle = frac * std::f32::consts::TAU * 3.0 + (now as f32) * 0.8 + h1 * 0.3;
        let radius = 0.8 + 2.5 * frac + 0.3 * h0;
        let position = Vec3::new(
            radius * angle.cos(),
            (frac - 0.5) * 4.0 + 0.2 * h2,
            radius * angle.sin(),
        );
        let color = Vec3::new(0.25, 0.85, 0.45 + 0.3 * h2) * (0.4 + 0.6 * h0);
        ParticleTarget {
            position,
            color,
            size: 0.04 + 0.05 * h1,
        }
    }

    fn rotation_rate(&self) -> Vec3 {
        Vec3::new(0.0, 0.5, 0.0)
    }
}
