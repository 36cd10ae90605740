//! Externally-owned quality/intensity settings, re-read every frame.

use crate::constants::MAX_PARTICLES;

/// Snapshot of the settings panel. The arbiter derives all scaled quantities
/// from this each frame; nothing here is cached inside the core.
#[derive(Clone, Copy, Debug)]
pub struct Settings {
    pub particle_count: usize,
    pub bloom_multiplier: f32,
    pub intensity: f32,
    pub shake_enabled: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            particle_count: MAX_PARTICLES / 2,
            bloom_multiplier: 1.0,
            intensity: 1.0,
            shake_enabled: true,
        }
    }
}
