//! Technique contract and registry.
//!
//! A technique owns its own phase state and exposes a generator that maps a
//! particle index to the attributes that particle should have right now. The
//! trait splits the mandatory surface (config, generator, rotation) from the
//! lifecycle/override hooks that only stateful techniques implement; the
//! stateless ones keep every default.

pub mod black_flash;
pub mod cleave;
pub mod domain;
pub mod stateless;

pub use black_flash::{settle_flicker, BlackFlash, BlackFlashPhase};
pub use cleave::{Cleave, CleavePhase, Slice};
pub use domain::{DomainPhase, SimpleDomain};
pub use stateless::{Aura, Vortex};

use fnv::FnvHashMap;
use glam::Vec3;
use std::str::FromStr;
use thiserror::Error;

use crate::particles::{ParticleBuffer, ParticleTarget};

/// Static per-technique render defaults, used whenever the technique has no
/// dynamic override this frame.
#[derive(Clone, Copy, Debug)]
pub struct TechniqueConfig {
    pub display_name: &'static str,
    pub glow_color: [f32; 3],
    pub bloom: f32,
    pub shake: f32,
    pub camera_dolly: f32,
}

/// Fixed gesture vocabulary. Unknown names fall back to [`TechniqueId::Aura`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TechniqueId {
    Aura,
    Vortex,
    BlackFlash,
    Cleave,
    Domain,
}

impl TechniqueId {
    pub const ALL: [TechniqueId; 5] = [
        TechniqueId::Aura,
        TechniqueId::Vortex,
        TechniqueId::BlackFlash,
        TechniqueId::Cleave,
        TechniqueId::Domain,
    ];

    pub fn gesture_name(self) -> &'static str {
        match self {
            TechniqueId::Aura => "aura",
            TechniqueId::Vortex => "vortex",
            TechniqueId::BlackFlash => "blackflash",
            TechniqueId::Cleave => "cleave",
            TechniqueId::Domain => "domain",
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown gesture name: {0}")]
pub struct UnknownGesture(pub String);

impl FromStr for TechniqueId {
    type Err = UnknownGesture;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TechniqueId::ALL
            .into_iter()
            .find(|id| id.gesture_name() == s)
            .ok_or_else(|| UnknownGesture(s.to_string()))
    }
}

pub trait Technique {
    fn config(&self) -> &'static TechniqueConfig;

    /// Target attributes for particle `i` of `active` right now. Must be O(1)
    /// and safe to call up to the buffer capacity every frame.
    fn generate(&self, i: usize, active: usize, now: f64) -> ParticleTarget;

    /// Angular rate (radians per second, per axis) applied to the whole
    /// particle cloud. Purely cosmetic.
    fn rotation_rate(&self) -> Vec3 {
        Vec3::new(0.0, 0.15, 0.0)
    }

    // ---------------- lifecycle (stateful techniques only) ----------------

    fn activate(&mut self, _now: f64) {}

    /// The triggering gesture was released. Guarded no-op outside the phases
    /// where release means something.
    fn deactivate(&mut self, _now: f64) {}

    fn reset(&mut self) {}

    /// Advance time-based phase transitions; called once per frame before
    /// the generator or overrides are read.
    fn update_phase(&mut self, _now: f64) {}

    /// Phase name for logging and diagnostics.
    fn phase_name(&self) -> &'static str {
        "idle"
    }

    /// True while the technique is mid-animation and a switch away from it
    /// must be deferred.
    fn locked(&self, _now: f64) -> bool {
        false
    }

    // ---------------- overrides and buffer coupling ----------------

    /// Dynamic bloom, or `None` to fall back to the static config.
    fn bloom_override(&self, _now: f64) -> Option<f32> {
        None
    }

    /// Dynamic shake, or `None` to fall back to the static config.
    fn shake_override(&self, _now: f64) -> Option<f32> {
        None
    }

    /// One-shot shake pulse, sampled once per frame by the arbiter.
    fn shake_trigger(&self, _now: f64) -> bool {
        false
    }

    /// Whether the buffer should integrate the velocity channel while this
    /// technique is current.
    fn needs_velocity(&self) -> bool {
        false
    }

    /// Push this frame's impulses into the buffer. Runs after target
    /// generation and before buffer integration.
    fn apply_impulses(&mut self, _buffer: &mut ParticleBuffer, _now: f64) {}
}

/// One boxed instance of every technique, keyed by id.
pub fn registry() -> FnvHashMap<TechniqueId, Box<dyn Technique>> {
    let mut map: FnvHashMap<TechniqueId, Box<dyn Technique>> = FnvHashMap::default();
    map.insert(TechniqueId::Aura, Box::new(Aura));
    map.insert(TechniqueId::Vortex, Box::new(Vortex));
    map.insert(TechniqueId::BlackFlash, Box::new(BlackFlash::new()));
    map.insert(TechniqueId::Cleave, Box::new(Cleave::new()));
    map.insert(TechniqueId::Domain, Box::new(SimpleDomain::new()));
    map
}
