//! Deterministic scatter hash.
//!
//! Per-particle appearance must be identical every frame unless it is
//! explicitly animated by time, so all "random" scatter comes from this hash
//! of the particle index rather than from an RNG. There is no statistical
//! claim here beyond "looks random" at the seed ranges used (up to ~3e5).

use glam::Vec3;

use crate::constants::{HASH_AMP, HASH_FREQ, HASH_PHASE, HASH_SEED_OFFSET};

/// Map a seed to a reproducible value in `[0, 1)`.
#[inline]
pub fn hash01(seed: f32) -> f32 {
    let v = (seed * HASH_FREQ + HASH_PHASE).sin() * HASH_AMP;
    v - v.floor()
}

/// Three decorrelated scalars for one logical index.
///
/// Adjacent seeds produce visibly correlated values with this hash family, so
/// the second and third scalars are drawn at `i + 1e5` and `i + 2e5`.
#[inline]
pub fn scatter3(index: usize) -> (f32, f32, f32) {
    let i = index as f32;
    (
        hash01(i),
        hash01(i + HASH_SEED_OFFSET),
        hash01(i + 2.0 * HASH_SEED_OFFSET),
    )
}

/// Unit direction from two scalars in `[0, 1)`, uniform over the sphere.
#[inline]
pub fn unit_dir(u: f32, v: f32) -> Vec3 {
    let theta = u * std::f32::consts::TAU;
    let z = 2.0 * v - 1.0;
    let r = (1.0 - z * z).max(0.0).sqrt();
    Vec3::new(r * theta.cos(), r * theta.sin(), z)
}
