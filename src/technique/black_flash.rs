//! Black Flash: charge, release, impact, settle.
//!
//! The one technique with a timing-skill payoff. Holding the gesture charges
//! for up to 800ms; releasing inside the 200-600ms window lands a "perfect"
//! hit with a bigger shockwave, brighter flash and harder shake. All
//! transitions compare elapsed seconds, never frame counts, so the state
//! machine behaves identically at any poll rate.

use glam::Vec3;

use crate::constants::*;
use crate::hash::{hash01, scatter3, unit_dir};
use crate::particles::ParticleTarget;
use crate::technique::{Technique, TechniqueConfig};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BlackFlashPhase {
    Idle,
    Charge,
    Impact,
    Settle,
}

static CONFIG: TechniqueConfig = TechniqueConfig {
    display_name: "Black Flash",
    glow_color: [0.9, 0.08, 0.12],
    bloom: 1.5,
    shake: 0.0,
    camera_dolly: -1.5,
};

pub struct BlackFlash {
    phase: BlackFlashPhase,
    start: f64,
    impact_start: f64,
    perfect: bool,
}

impl BlackFlash {
    pub fn new() -> Self {
        Self {
            phase: BlackFlashPhase::Idle,
            start: 0.0,
            impact_start: 0.0,
            perfect: false,
        }
    }

    pub fn phase(&self) -> BlackFlashPhase {
        self.phase
    }

    pub fn perfect(&self) -> bool {
        self.perfect
    }

    fn enter_impact(&mut self, now: f64) {
        self.phase = BlackFlashPhase::Impact;
        self.impact_start = now;
    }

    fn charge_target(&self, i: usize, now: f64) -> ParticleTarget {
        let t = (((now - self.start) / BF_CHARGE_MAX_SEC) as f32).clamp(0.0, 1.0);
        let (h0, h1, h2) = scatter3(i);
        let start_radius = 3.5 + h0 * 4.0;
        // converge toward the core as charge builds
        let radius = start_radius * (1.0 - t * t) + 0.3;
        let position = unit_dir(h1, h2) * radius;
        let crackle = 0.15 + 0.85 * h0;
        let brightness = 0.4 + 1.6 * t;
        let color = Vec3::new(0.9 * crackle, 0.05 + 0.1 * crackle, 0.12 * crackle) * brightness;
        let size = (0.05 + 0.08 * h1) * (0.5 + t);
        ParticleTarget {
            position,
            color,
            size,
        }
    }

    fn impact_target(&self, i: usize, now: f64) -> ParticleTarget {
        let t = (((now - self.impact_start) / BF_IMPACT_SEC) as f32).clamp(0.0, 1.0);
        let (h0, h1, h2) = scatter3(i);
        let ring_radius = if self.perfect {
            BF_RING_RADIUS_PERFECT
        } else {
            BF_RING_RADIUS
        };
        let fade = 1.0 - t;
        if h0 < 0.4 {
            // expanding shockwave ring, fast start then easing out
            let ease = 1.0 - (1.0 - t) * (1.0 - t) * (1.0 - t);
            let angle = h1 * std::f32::consts::TAU;
            let r = ring_radius * ease * (0.92 + 0.16 * h2);
            let position = Vec3::new(r * angle.cos(), (h2 - 0.5) * 0.6, r * angle.sin());
            let color = Vec3::new(1.0, 0.25 + 0.45 * fade, 0.3 * fade) * (0.5 + 1.5 * fade);
            ParticleTarget {
                position,
                color,
                size: 0.12 * fade,
            }
        } else if h0 < 0.6 {
            // flash core, white-hot and collapsing quickly
            let core = if self.perfect { 1.4 } else { 0.9 };
            let position = unit_dir(h1, h2) * (0.2 + core * t * 0.5);
            let color = Vec3::splat(2.2 * fade * fade) + Vec3::new(0.6, 0.05, 0.08);
            ParticleTarget {
                position,
                color,
                size: 0.2 * fade * fade + 0.02,
            }
        } else {
            // debris blasted outward on straight rays
            let speed = if self.perfect { 14.0 } else { 9.0 };
            let position = unit_dir(h1, h2) * (speed * (0.5 + 0.5 * h0) * t);
            let color = Vec3::new(0.9, 0.1, 0.14) * (0.3 + 1.2 * fade);
            ParticleTarget {
                position,
                color,
                size: 0.08 * fade,
            }
        }
    }

    fn settle_target(&self, i: usize, now: f64) -> ParticleTarget {
        let (h0, h1, h2) = scatter3(i);
        let position = unit_dir(h1, h2) * (1.5 + 2.0 * h0);
        // stable per-particle flicker: frequency and phase come from the
        // hash, only the wave itself moves with time
        let freq = 2.0 + 6.0 * h1;
        let phase = h2 * std::f32::consts::TAU;
        let s = 0.5 + 0.5 * ((now as f32) * freq + phase).sin();
        let color = Vec3::new(0.9, 0.08, 0.12) * (0.3 + 0.7 * s);
        ParticleTarget {
            position,
            color,
            size: 0.05 + 0.06 * s,
        }
    }
}

impl Default for BlackFlash {
    fn default() -> Self {
        Self::new()
    }
}

impl Technique for BlackFlash {
    fn config(&self) -> &'static TechniqueConfig {
        &CONFIG
    }

    fn generate(&self, i: usize, _active: usize, now: f64) -> ParticleTarget {
        match self.phase {
            BlackFlashPhase::Idle => ParticleTarget::HIDDEN,
            BlackFlashPhase::Charge => self.charge_target(i, now),
            BlackFlashPhase::Impact => self.impact_target(i, now),
            BlackFlashPhase::Settle => self.settle_target(i, now),
        }
    }

    fn rotation_rate(&self) -> Vec3 {
        match self.phase {
            BlackFlashPhase::Charge => Vec3::new(0.0, 0.9, 0.0),
            _ => Vec3::new(0.0, 0.2, 0.0),
        }
    }

    fn activate(&mut self, now: f64) {
        if self.phase != BlackFlashPhase::Idle {
            return;
        }
        self.phase = BlackFlashPhase::Charge;
        self.start = now;
        self.perfect = false;
    }

    fn deactivate(&mut self, now: f64) {
        if self.phase != BlackFlashPhase::Charge {
            return;
        }
        let elapsed = now - self.start;
        self.perfect = (BF_TIMING_MIN_SEC..=BF_TIMING_MAX_SEC).contains(&elapsed);
        self.enter_impact(now);
    }

    fn reset(&mut self) {
        self.phase = BlackFlashPhase::Idle;
        self.perfect = false;
    }

    fn update_phase(&mut self, now: f64) {
        match self.phase {
            BlackFlashPhase::Charge => {
                let elapsed = now - self.start;
                if elapsed >= BF_CHARGE_MAX_SEC {
                    // auto-fire; the window closes before the charge cap so
                    // this is never perfect in practice, but keep the check
                    self.perfect = elapsed <= BF_TIMING_MAX_SEC;
                    // impact is anchored to the charge cap, not the poll
                    // instant, so a slow frame does not stretch the charge
                    self.enter_impact(self.start + BF_CHARGE_MAX_SEC);
                }
            }
            BlackFlashPhase::Impact => {
                if now - self.impact_start >= BF_IMPACT_SEC {
                    self.phase = BlackFlashPhase::Settle;
                    self.start = self.impact_start + BF_IMPACT_SEC;
                }
            }
            BlackFlashPhase::Idle | BlackFlashPhase::Settle => {}
        }
    }

    fn phase_name(&self) -> &'static str {
        match self.phase {
            BlackFlashPhase::Idle => "idle",
            BlackFlashPhase::Charge => "charge",
            BlackFlashPhase::Impact => "impact",
            BlackFlashPhase::Settle => "settle",
        }
    }

    fn locked(&self, _now: f64) -> bool {
        matches!(self.phase, BlackFlashPhase::Charge | BlackFlashPhase::Impact)
    }

    fn bloom_override(&self, now: f64) -> Option<f32> {
        match self.phase {
            BlackFlashPhase::Idle => None,
            BlackFlashPhase::Charge => {
                let t = (((now - self.start) / BF_CHARGE_MAX_SEC) as f32).clamp(0.0, 1.0);
                Some(BF_CHARGE_BLOOM_MIN + (BF_CHARGE_BLOOM_MAX - BF_CHARGE_BLOOM_MIN) * t)
            }
            BlackFlashPhase::Impact => {
                let t = (((now - self.impact_start) / BF_IMPACT_SEC) as f32).clamp(0.0, 1.0);
                let peak = if self.perfect {
                    BF_IMPACT_BLOOM_PEAK_PERFECT
                } else {
                    BF_IMPACT_BLOOM_PEAK
                };
                Some(peak * (1.0 - t * t))
            }
            BlackFlashPhase::Settle => Some(BF_SETTLE_BLOOM),
        }
    }

    fn shake_override(&self, _now: f64) -> Option<f32> {
        match self.phase {
            BlackFlashPhase::Impact => Some(if self.perfect {
                BF_IMPACT_SHAKE_PERFECT
            } else {
                BF_IMPACT_SHAKE
            }),
            _ => None,
        }
    }
}

/// Per-particle flicker value used by the settle phase; exposed for tests of
/// the stable-sparkle property.
pub fn settle_flicker(i: usize, now: f64) -> f32 {
    let h1 = hash01(i as f32 + HASH_SEED_OFFSET);
    let h2 = hash01(i as f32 + 2.0 * HASH_SEED_OFFSET);
    let freq = 2.0 + 6.0 * h1;
    let phase = h2 * std::f32::consts::TAU;
    0.5 + 0.5 * ((now as f32) * freq + phase).sin()
}
