//! Cleave: continuous blade-slice spawner.
//!
//! While the gesture holds, a new randomly-oriented slice plane spawns every
//! 400ms and lives for 600ms, shoving nearby particles apart along its
//! normal. Slice orientation comes from the deterministic hash seeded by a
//! monotonic counter, so a session's blade sequence is reproducible even
//! though the impulse jitter is not.

use glam::Vec3;
use smallvec::SmallVec;

use crate::constants::*;
use crate::hash::{hash01, scatter3, unit_dir};
use crate::particles::{ParticleBuffer, ParticleTarget};
use crate::technique::{Technique, TechniqueConfig};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CleavePhase {
    Idle,
    Slicing,
    Settle,
}

/// One live blade. Stored oldest-first; ids are unique within a session.
#[derive(Clone, Copy, Debug)]
pub struct Slice {
    pub center: Vec3,
    pub normal: Vec3,
    pub width: f32,
    pub spawn_time: f64,
    pub id: u64,
}

static CONFIG: TechniqueConfig = TechniqueConfig {
    display_name: "Cleave",
    glow_color: [0.85, 0.15, 0.1],
    bloom: 2.2,
    shake: 0.3,
    camera_dolly: -0.5,
};

pub struct Cleave {
    phase: CleavePhase,
    activation: f64,
    slice_seq: u64,
    slices: SmallVec<[Slice; 8]>,
}

impl Cleave {
    pub fn new() -> Self {
        Self {
            phase: CleavePhase::Idle,
            activation: 0.0,
            slice_seq: 0,
            slices: SmallVec::new(),
        }
    }

    pub fn phase(&self) -> CleavePhase {
        self.phase
    }

    pub fn active_slices(&self) -> &[Slice] {
        &self.slices
    }

    fn spawn_slice(&mut self, spawn_time: f64) {
        // seed by sequence number, not wall clock, so blade k of a session
        // always has the same orientation
        let seed = (self.slice_seq * 7) as f32;
        let u = hash01(seed);
        let v = hash01(seed + HASH_SEED_OFFSET);
        let w = hash01(seed + 2.0 * HASH_SEED_OFFSET);
        let normal = unit_dir(u, v);
        let center = unit_dir(
            hash01(seed + 3.0 * HASH_SEED_OFFSET),
            hash01(seed + 4.0 * HASH_SEED_OFFSET),
        ) * (w * 1.5);
        self.slices.push(Slice {
            center,
            normal,
            width: 1.0 + 1.5 * w,
            spawn_time,
            id: self.slice_seq,
        });
        self.slice_seq += 1;
    }

    fn expire_slices(&mut self, now: f64) {
        self.slices
            .retain(|s| now - s.spawn_time < CLEAVE_SLICE_LIFETIME_SEC);
    }
}

impl Default for Cleave {
    fn default() -> Self {
        Self::new()
    }
}

impl Technique for Cleave {
    fn config(&self) -> &'static TechniqueConfig {
        &CONFIG
    }

    fn generate(&self, i: usize, _active: usize, now: f64) -> ParticleTarget {
        if self.phase == CleavePhase::Idle {
            return ParticleTarget::HIDDEN;
        }
        let (h0, h1, h2) = scatter3(i);
        let position = unit_dir(h1, h2) * (2.0 + 2.0 * h0);
        // slow shimmer so the cloud reads as unquiet even between blades
        let s = 0.75 + 0.25 * ((now as f32) * (1.0 + 2.0 * h0) + h1 * 6.0).sin();
        let color = Vec3::new(0.85, 0.12 + 0.1 * h2, 0.1) * (0.4 + 0.6 * h1) * s;
        ParticleTarget {
            position,
            color,
            size: 0.05 + 0.07 * h2,
        }
    }

    fn rotation_rate(&self) -> Vec3 {
        Vec3::new(0.05, 0.4, 0.0)
    }

    fn activate(&mut self, now: f64) {
        if self.phase != CleavePhase::Idle {
            return;
        }
        self.phase = CleavePhase::Slicing;
        // first blade lands on the first update after activation
        self.activation = now;
    }

    fn deactivate(&mut self, _now: f64) {
        if self.phase == CleavePhase::Slicing {
            self.phase = CleavePhase::Settle;
        }
    }

    fn reset(&mut self) {
        self.phase = CleavePhase::Idle;
        self.slices.clear();
        self.slice_seq = 0;
    }

    fn update_phase(&mut self, now: f64) {
        if self.phase == CleavePhase::Slicing {
            // spawn instants are derived from the activation time and the
            // blade counter, never accumulated, so the 400ms grid holds
            // exactly however coarse the polling is
            loop {
                let at = self.activation + self.slice_seq as f64 * CLEAVE_SLICE_INTERVAL_SEC;
                if now < at {
                    break;
                }
                self.spawn_slice(at);
            }
        }
        // after spawning, so a catch-up blade past its lifetime never lingers
        self.expire_slices(now);
    }

    fn phase_name(&self) -> &'static str {
        match self.phase {
            CleavePhase::Idle => "idle",
            CleavePhase::Slicing => "slicing",
            CleavePhase::Settle => "settle",
        }
    }

    fn bloom_override(&self, now: f64) -> Option<f32> {
        if self.phase == CleavePhase::Idle {
            return None;
        }
        // bloom pulses on every spawn, decaying within half a blade's life
        let burst = self
            .slices
            .iter()
            .map(|s| {
                let age = ((now - s.spawn_time) / CLEAVE_SLICE_LIFETIME_SEC) as f32;
                (1.0 - 2.0 * age).max(0.0) * CLEAVE_BLOOM_BURST
            })
            .fold(0.0f32, f32::max);
        Some(CLEAVE_BLOOM_BASE + burst)
    }

    fn shake_trigger(&self, now: f64) -> bool {
        self.slices
            .iter()
            .any(|s| now - s.spawn_time < CLEAVE_SHAKE_WINDOW_SEC)
    }

    fn needs_velocity(&self) -> bool {
        true
    }

    fn apply_impulses(&mut self, buffer: &mut ParticleBuffer, now: f64) {
        for s in &self.slices {
            let age = (((now - s.spawn_time) / CLEAVE_SLICE_LIFETIME_SEC) as f32).clamp(0.0, 1.0);
            // front-loaded force over the blade's life
            let strength = (1.0 - age * age) * CLEAVE_SLICE_STRENGTH;
            buffer.apply_plane_impulse(s.center, s.normal, strength, s.width);
        }
    }
}
