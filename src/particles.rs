//! Fixed-capacity columnar particle storage.
//!
//! Techniques describe what each particle should look like *right now* via a
//! target triple; this buffer owns the smoothing that makes the current
//! attributes approach those targets, plus the velocity channel used by
//! impulse-driven effects. Keeping the smoothing here once means every
//! technique generator can stay a pure function of index and time.

use glam::Vec3;
use rand::prelude::*;

use crate::constants::{MAX_PARTICLES, PLANE_IMPULSE_FALLOFF_DIST, VELOCITY_DECAY};

/// What one particle should converge to this frame.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ParticleTarget {
    pub position: Vec3,
    pub color: Vec3,
    pub size: f32,
}

impl ParticleTarget {
    /// Zeroed, invisible target used for every index past the active count.
    pub const HIDDEN: Self = Self {
        position: Vec3::ZERO,
        color: Vec3::ZERO,
        size: 0.0,
    };
}

/// Structure-of-arrays particle store, always sized to [`MAX_PARTICLES`] so
/// changing the active count never reallocates.
pub struct ParticleBuffer {
    positions: Vec<Vec3>,
    colors: Vec<Vec3>,
    sizes: Vec<f32>,
    target_positions: Vec<Vec3>,
    target_colors: Vec<Vec3>,
    target_sizes: Vec<f32>,
    velocities: Vec<Vec3>,
    active: usize,
    // impulse jitter is intentionally non-reproducible
    rng: StdRng,
}

impl ParticleBuffer {
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    pub fn with_rng(rng: StdRng) -> Self {
        Self {
            positions: vec![Vec3::ZERO; MAX_PARTICLES],
            colors: vec![Vec3::ZERO; MAX_PARTICLES],
            sizes: vec![0.0; MAX_PARTICLES],
            target_positions: vec![Vec3::ZERO; MAX_PARTICLES],
            target_colors: vec![Vec3::ZERO; MAX_PARTICLES],
            target_sizes: vec![0.0; MAX_PARTICLES],
            velocities: vec![Vec3::ZERO; MAX_PARTICLES],
            active: MAX_PARTICLES,
            rng,
        }
    }

    pub fn set_active_count(&mut self, n: usize) {
        self.active = n.min(MAX_PARTICLES);
    }

    pub fn active_count(&self) -> usize {
        self.active
    }

    pub fn capacity(&self) -> usize {
        MAX_PARTICLES
    }

    /// Regenerate every target from the active technique's generator.
    ///
    /// Indices at or past the active count are always forced to the hidden
    /// target so stale attributes never leak when the count shrinks.
    pub fn set_targets(&mut self, generator: impl Fn(usize, usize) -> ParticleTarget) {
        for i in 0..MAX_PARTICLES {
            let t = if i < self.active {
                generator(i, self.active)
            } else {
                ParticleTarget::HIDDEN
            };
            self.target_positions[i] = t.position;
            self.target_colors[i] = t.color;
            self.target_sizes[i] = t.size;
        }
    }

    /// Radial outward burst from the origin.
    ///
    /// Applied to every slot so inactive particles keep harmless velocity
    /// state; a particle sitting exactly at the origin gets no kick.
    pub fn apply_impulse(&mut self, strength: f32) {
        for i in 0..MAX_PARTICLES {
            let pos = self.positions[i];
            let dist = pos.length();
            let dir = if dist > f32::EPSILON {
                pos / dist
            } else {
                Vec3::ZERO
            };
            let u = self.rng.gen_range(0.5..1.0);
            self.velocities[i] += dir * (strength * u);
        }
    }

    /// Push particles away from a slice plane.
    ///
    /// Only particles within `width` of the plane's center (measured in the
    /// plane) are touched; the kick runs along `normal`, signed by side, and
    /// falls off linearly both with distance from the plane (zero at
    /// [`PLANE_IMPULSE_FALLOFF_DIST`]) and with in-plane distance (zero at
    /// `width`).
    pub fn apply_plane_impulse(&mut self, center: Vec3, normal: Vec3, strength: f32, width: f32) {
        if width <= 0.0 {
            return;
        }
        for i in 0..MAX_PARTICLES {
            let rel = self.positions[i] - center;
            let side = rel.dot(normal);
            let in_plane = (rel - normal * side).length();
            if in_plane >= width {
                continue;
            }
            let plane_falloff = (1.0 - side.abs() / PLANE_IMPULSE_FALLOFF_DIST).max(0.0);
            let radial_falloff = 1.0 - in_plane / width;
            let jitter = self.rng.gen_range(0.8..1.2);
            let sign = if side < 0.0 { -1.0 } else { 1.0 };
            self.velocities[i] += normal * (sign * strength * plane_falloff * radial_falloff * jitter);
        }
    }

    /// Exponential smoothing toward targets, once per frame.
    ///
    /// `lerp_factor` is the fraction of remaining distance covered: near 1.0
    /// snaps, near 0.0 barely moves. With `use_velocity` the velocity channel
    /// is integrated into position; either way it decays by
    /// [`VELOCITY_DECAY`] so old impulses settle out even while ignored.
    pub fn update(&mut self, lerp_factor: f32, use_velocity: bool) {
        for i in 0..MAX_PARTICLES {
            let dp = (self.target_positions[i] - self.positions[i]) * lerp_factor;
            self.positions[i] += dp;
            let dc = (self.target_colors[i] - self.colors[i]) * lerp_factor;
            self.colors[i] += dc;
            self.sizes[i] += (self.target_sizes[i] - self.sizes[i]) * lerp_factor;
            if use_velocity {
                self.positions[i] += self.velocities[i];
            }
            self.velocities[i] *= VELOCITY_DECAY;
        }
    }

    /// Drop all inherited drift; call when switching away from an
    /// impulse-using technique.
    pub fn clear_velocities(&mut self) {
        for v in &mut self.velocities {
            *v = Vec3::ZERO;
        }
    }

    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    pub fn colors(&self) -> &[Vec3] {
        &self.colors
    }

    pub fn sizes(&self) -> &[f32] {
        &self.sizes
    }

    pub fn velocities(&self) -> &[Vec3] {
        &self.velocities
    }

    pub fn target_sizes(&self) -> &[f32] {
        &self.target_sizes
    }

    pub fn target_positions(&self) -> &[Vec3] {
        &self.target_positions
    }

    // ---------------- zero-copy views for GPU upload ----------------

    pub fn position_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.positions)
    }

    pub fn color_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.colors)
    }

    pub fn size_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.sizes)
    }
}

impl Default for ParticleBuffer {
    fn default() -> Self {
        Self::new()
    }
}
