//! Technique arbiter: owns the particle buffer, the technique registry and
//! the current/pending selection, and runs the fixed per-frame order
//! (phase advance, target generation, impulses, integration).
//!
//! Switch policy: a gesture change normally switches immediately, resetting
//! the outgoing technique. Black Flash is the exception; while it is charging
//! or impacting the switch is recorded as pending and the gesture change is
//! treated as the release that ends the charge. The pending technique takes
//! over on the first frame the animation unlocks.

use fnv::FnvHashMap;
use glam::Vec3;
use smallvec::SmallVec;

use crate::clock::Clock;
use crate::constants::{BF_FLASH_CLEAR_SEC, BF_LABEL_RESET_SEC, LERP_FACTOR};
use crate::particles::ParticleBuffer;
use crate::scheduler::{TaskKind, TaskQueue};
use crate::settings::Settings;
use crate::technique::{registry, Technique, TechniqueConfig, TechniqueId};

/// Everything the render layer needs from one frame.
pub struct FrameOutput {
    /// Resolved bloom: technique override or static config, scaled by the
    /// settings multipliers.
    pub bloom: f32,
    /// Resolved shake; zero when shake is disabled in settings.
    pub shake: f32,
    /// One-shot shake pulse (blade spawn and the like).
    pub shake_trigger: bool,
    /// Accumulated cosmetic cloud orientation, radians per axis.
    pub rotation: Vec3,
    /// Static defaults for the current technique (display name, glow color,
    /// camera dolly).
    pub config: &'static TechniqueConfig,
    /// Current phase name, for the overlay/UI layer.
    pub phase: &'static str,
    /// Deferred cosmetic tasks that came due this frame.
    pub tasks: SmallVec<[TaskKind; 4]>,
}

pub struct TechniqueArbiter<C: Clock> {
    clock: C,
    buffer: ParticleBuffer,
    techniques: FnvHashMap<TechniqueId, Box<dyn Technique>>,
    current: TechniqueId,
    pending: Option<TechniqueId>,
    session: u64,
    rotation: Vec3,
    tasks: TaskQueue,
    last_now: f64,
    last_phase: &'static str,
}

impl<C: Clock> TechniqueArbiter<C> {
    pub fn new(clock: C) -> Self {
        let last_now = clock.now();
        Self {
            clock,
            buffer: ParticleBuffer::new(),
            techniques: registry(),
            current: TechniqueId::Aura,
            pending: None,
            session: 0,
            rotation: Vec3::ZERO,
            tasks: TaskQueue::new(),
            last_now,
            last_phase: "idle",
        }
    }

    pub fn current_id(&self) -> TechniqueId {
        self.current
    }

    pub fn pending_id(&self) -> Option<TechniqueId> {
        self.pending
    }

    pub fn current_phase(&self) -> &'static str {
        self.techniques
            .get(&self.current)
            .map_or("idle", |t| t.phase_name())
    }

    pub fn buffer(&self) -> &ParticleBuffer {
        &self.buffer
    }

    pub fn rotation(&self) -> Vec3 {
        self.rotation
    }

    /// Gesture-change event. Unknown names resolve to the neutral fallback;
    /// a gesture matching the current technique revokes any pending switch
    /// and otherwise does nothing.
    pub fn set_gesture(&mut self, name: &str) {
        let id = name.parse().unwrap_or_else(|_| {
            log::warn!("unknown gesture {name:?}, falling back to aura");
            TechniqueId::Aura
        });
        if id == self.current {
            // the latest gesture wins: returning to the current technique
            // revokes any switch still waiting on an animation lock
            self.pending = None;
            return;
        }
        let now = self.clock.now();
        let locked = self
            .techniques
            .get(&self.current)
            .is_some_and(|t| t.locked(now));
        if locked {
            // the gesture change doubles as the release that ends a charge;
            // deactivate guards its own source state
            if let Some(t) = self.techniques.get_mut(&self.current) {
                t.deactivate(now);
            }
            log::debug!(
                "deferring switch {} -> {} until animation completes",
                self.current.gesture_name(),
                id.gesture_name()
            );
            self.pending = Some(id);
        } else {
            self.pending = None;
            self.switch_to(id, now);
        }
    }

    fn switch_to(&mut self, id: TechniqueId, now: f64) {
        if let Some(old) = self.techniques.get_mut(&self.current) {
            old.reset();
        }
        self.tasks.cancel_session(self.session);
        self.buffer.clear_velocities();
        self.session += 1;
        self.current = id;
        if let Some(next) = self.techniques.get_mut(&id) {
            next.activate(now);
        }
        self.last_phase = self.current_phase();
        log::debug!("technique -> {}", id.gesture_name());
    }

    /// Run one frame. Order matters: phase advance, deferred switch, target
    /// generation, impulses, buffer integration; anything else produces a
    /// one-frame lag or a missed one-shot effect.
    pub fn frame(&mut self, settings: &Settings) -> FrameOutput {
        let now = self.clock.now();
        let dt = (now - self.last_now).max(0.0) as f32;
        self.last_now = now;

        self.buffer.set_active_count(settings.particle_count);

        if let Some(tech) = self.techniques.get_mut(&self.current) {
            tech.update_phase(now);
        }

        if let Some(next) = self.pending {
            let unlocked = self
                .techniques
                .get(&self.current)
                .map_or(true, |t| !t.locked(now));
            if unlocked {
                self.pending = None;
                self.switch_to(next, now);
            }
        }

        self.schedule_phase_tasks(now);

        let mut bloom = 0.0;
        let mut shake = 0.0;
        let mut shake_trigger = false;
        let mut phase = "idle";
        let mut config: &'static TechniqueConfig = crate::technique::stateless::Aura.config();
        if let Some(tech) = self.techniques.get_mut(&self.current) {
            let buffer = &mut self.buffer;
            buffer.set_targets(|i, active| tech.generate(i, active, now));
            tech.apply_impulses(buffer, now);
            buffer.update(LERP_FACTOR, tech.needs_velocity());

            self.rotation += tech.rotation_rate() * dt;

            let cfg = tech.config();
            bloom = tech.bloom_override(now).unwrap_or(cfg.bloom)
                * settings.bloom_multiplier
                * settings.intensity;
            shake = if settings.shake_enabled {
                tech.shake_override(now).unwrap_or(cfg.shake)
            } else {
                0.0
            };
            shake_trigger = settings.shake_enabled && tech.shake_trigger(now);
            phase = tech.phase_name();
            config = cfg;
        }

        FrameOutput {
            bloom,
            shake,
            shake_trigger,
            rotation: self.rotation,
            config,
            phase,
            tasks: self.tasks.drain_due(now),
        }
    }

    fn schedule_phase_tasks(&mut self, now: f64) {
        let phase = self.current_phase();
        if phase != self.last_phase && self.current == TechniqueId::BlackFlash {
            match phase {
                "impact" => self.tasks.schedule(
                    self.session,
                    now + BF_FLASH_CLEAR_SEC,
                    TaskKind::ClearFlashOverlay,
                ),
                "settle" => self.tasks.schedule(
                    self.session,
                    now + BF_LABEL_RESET_SEC,
                    TaskKind::ResetLabelScale,
                ),
                _ => {}
            }
        }
        self.last_phase = phase;
    }
}
