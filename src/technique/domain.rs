//! Simple Domain: a two-hand barrier that grows, holds, and fades.
//!
//! The shader-driven glyph visuals live render-side; this module owns the
//! phase/scale state machine and the particle shell that traces the barrier
//! boundary.

use glam::Vec3;

use crate::constants::*;
use crate::hash::{scatter3, unit_dir};
use crate::particles::ParticleTarget;
use crate::technique::{Technique, TechniqueConfig};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DomainPhase {
    Idle,
    Growing,
    Active,
    Fading,
}

static CONFIG: TechniqueConfig = TechniqueConfig {
    display_name: "Simple Domain",
    glow_color: [0.45, 0.2, 0.8],
    bloom: 1.6,
    shake: 0.0,
    camera_dolly: 2.0,
};

pub struct SimpleDomain {
    phase: DomainPhase,
    start: f64,
}

impl SimpleDomain {
    pub fn new() -> Self {
        Self {
            phase: DomainPhase::Idle,
            start: 0.0,
        }
    }

    pub fn phase(&self) -> DomainPhase {
        self.phase
    }

    /// Barrier scale in `[0, 1]`; doubles as the particle size multiplier
    /// and the render layer's mesh scale.
    pub fn scale(&self, now: f64) -> f32 {
        match self.phase {
            DomainPhase::Idle => 0.0,
            DomainPhase::Growing => (((now - self.start) / DOMAIN_GROW_SEC) as f32).clamp(0.0, 1.0),
            DomainPhase::Active => 1.0,
            DomainPhase::Fading => {
                1.0 - (((now - self.start) / DOMAIN_FADE_SEC) as f32).clamp(0.0, 1.0)
            }
        }
    }
}

impl Default for SimpleDomain {
    fn default() -> Self {
        Self::new()
    }
}

impl Technique for SimpleDomain {
    fn config(&self) -> &'static TechniqueConfig {
        &CONFIG
    }

    fn generate(&self, i: usize, _active: usize, now: f64) -> ParticleTarget {
        let scale = self.scale(now);
        let (h0, h1, h2) = scatter3(i);
        if self.phase == DomainPhase::Idle {
            // faint ambient ring at the feet of the barrier-to-be
            let angle = h1 * std::f32::consts::TAU;
            let r = 2.5 + h0 * 0.4;
            let position = Vec3::new(r * angle.cos(), -1.0 + 0.2 * h2, r * angle.sin());
            let color = Vec3::new(0.3, 0.15, 0.5) * (0.2 + 0.3 * h2);
            return ParticleTarget {
                position,
                color,
                size: 0.03 + 0.03 * h0,
            };
        }
        // boundary shimmer on the barrier shell
        let position = unit_dir(h1, h2) * (DOMAIN_SHELL_RADIUS * scale * (0.97 + 0.06 * h0));
        let s = 0.6 + 0.4 * ((now as f32) * (1.5 + 3.0 * h0) + h1 * 8.0).sin();
        let color = Vec3::new(0.45, 0.2, 0.8) * (0.3 + 0.7 * s);
        ParticleTarget {
            position,
            color,
            size: (0.04 + 0.05 * h2) * scale * s,
        }
    }

    fn rotation_rate(&self) -> Vec3 {
        Vec3::new(0.0, 0.1, 0.0)
    }

    fn activate(&mut self, now: f64) {
        if self.phase != DomainPhase::Idle {
            return;
        }
        self.phase = DomainPhase::Growing;
        self.start = now;
    }

    fn deactivate(&mut self, now: f64) {
        if matches!(self.phase, DomainPhase::Growing | DomainPhase::Active) {
            // back-date the fade so it picks up at the current scale; a
            // barrier released mid-growth shrinks from where it got to
            // instead of popping to full size first
            let s = self.scale(now) as f64;
            self.phase = DomainPhase::Fading;
            self.start = now - (1.0 - s) * DOMAIN_FADE_SEC;
        }
    }

    fn reset(&mut self) {
        self.phase = DomainPhase::Idle;
    }

    fn update_phase(&mut self, now: f64) {
        match self.phase {
            DomainPhase::Growing => {
                if now - self.start >= DOMAIN_GROW_SEC {
                    self.phase = DomainPhase::Active;
                }
            }
            DomainPhase::Fading => {
                if now - self.start >= DOMAIN_FADE_SEC {
                    self.phase = DomainPhase::Idle;
                }
            }
            DomainPhase::Idle | DomainPhase::Active => {}
        }
    }

    fn phase_name(&self) -> &'static str {
        match self.phase {
            DomainPhase::Idle => "idle",
            DomainPhase::Growing => "growing",
            DomainPhase::Active => "active",
            DomainPhase::Fading => "fading",
        }
    }
}
