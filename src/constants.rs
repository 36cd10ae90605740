// Shared tuning constants for the technique/particle core. Timing values are
// in seconds; distances are in world units.

// Particle buffer
pub const MAX_PARTICLES: usize = 4000; // columns never reallocate past this
pub const VELOCITY_DECAY: f32 = 0.91; // multiplicative, per update() call
pub const LERP_FACTOR: f32 = 0.12; // fraction of remaining distance per frame
pub const PLANE_IMPULSE_FALLOFF_DIST: f32 = 15.0; // plane kick reaches zero here

// Deterministic hash (fract(sin(x * FREQ + PHASE) * AMP) family)
pub const HASH_FREQ: f32 = 12.9898;
pub const HASH_PHASE: f32 = 78.233;
pub const HASH_AMP: f32 = 43758.547;
pub const HASH_SEED_OFFSET: f32 = 1.0e5; // decorrelates scalars of one index

// Black Flash
pub const BF_CHARGE_MAX_SEC: f64 = 0.8; // auto-fire if held this long
pub const BF_TIMING_MIN_SEC: f64 = 0.2; // perfect window, inclusive
pub const BF_TIMING_MAX_SEC: f64 = 0.6; // perfect window, inclusive
pub const BF_IMPACT_SEC: f64 = 0.7;
pub const BF_CHARGE_BLOOM_MIN: f32 = 1.5;
pub const BF_CHARGE_BLOOM_MAX: f32 = 4.0;
pub const BF_IMPACT_BLOOM_PEAK: f32 = 5.5;
pub const BF_IMPACT_BLOOM_PEAK_PERFECT: f32 = 9.0;
pub const BF_SETTLE_BLOOM: f32 = 1.8;
pub const BF_IMPACT_SHAKE: f32 = 0.9;
pub const BF_IMPACT_SHAKE_PERFECT: f32 = 1.8;
pub const BF_RING_RADIUS: f32 = 6.0;
pub const BF_RING_RADIUS_PERFECT: f32 = 9.0;
pub const BF_FLASH_CLEAR_SEC: f64 = 0.08; // overlay clear task delay
pub const BF_LABEL_RESET_SEC: f64 = 2.0; // label scale reset task delay

// Cleave
pub const CLEAVE_SLICE_INTERVAL_SEC: f64 = 0.4;
pub const CLEAVE_SLICE_LIFETIME_SEC: f64 = 0.6;
pub const CLEAVE_SLICE_STRENGTH: f32 = 3.5;
pub const CLEAVE_BLOOM_BASE: f32 = 2.2;
pub const CLEAVE_BLOOM_BURST: f32 = 1.2; // extra bloom right after a spawn
pub const CLEAVE_SHAKE_WINDOW_SEC: f64 = 0.05; // blade younger than this shakes

// Simple Domain
pub const DOMAIN_GROW_SEC: f64 = 0.5;
pub const DOMAIN_FADE_SEC: f64 = 0.3;
pub const DOMAIN_SHELL_RADIUS: f32 = 5.0;
