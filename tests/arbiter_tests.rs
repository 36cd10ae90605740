// Host-side tests for the technique arbiter: gesture fallback, the Black
// Flash deferral path, immediate switches, settings scaling, and the
// per-frame pipeline effects on the buffer.

use fx_core::{
    ManualClock, Settings, TaskKind, TechniqueArbiter, TechniqueId, BF_CHARGE_BLOOM_MIN,
};

fn arbiter() -> (TechniqueArbiter<ManualClock>, ManualClock) {
    let clock = ManualClock::new();
    (TechniqueArbiter::new(clock.clone()), clock)
}

#[test]
fn starts_on_the_neutral_technique() {
    let (arb, _clock) = arbiter();
    assert_eq!(arb.current_id(), TechniqueId::Aura);
    assert_eq!(arb.pending_id(), None);
}

#[test]
fn unknown_gesture_falls_back_to_neutral() {
    let (mut arb, _clock) = arbiter();
    arb.set_gesture("vortex");
    assert_eq!(arb.current_id(), TechniqueId::Vortex);
    arb.set_gesture("spiral-of-doom");
    assert_eq!(arb.current_id(), TechniqueId::Aura);
}

#[test]
fn matching_gesture_is_a_no_op() {
    let (mut arb, clock) = arbiter();
    arb.set_gesture("blackflash");
    assert_eq!(arb.current_phase(), "charge");
    clock.set(0.1);
    arb.set_gesture("blackflash");
    // no re-activation: still the same charge session
    assert_eq!(arb.current_phase(), "charge");
    assert_eq!(arb.pending_id(), None);
}

#[test]
fn switch_away_from_charging_black_flash_is_deferred() {
    let (mut arb, clock) = arbiter();
    let settings = Settings::default();
    arb.set_gesture("blackflash");
    assert_eq!(arb.current_phase(), "charge");

    clock.set(0.25);
    arb.set_gesture("cleave");
    // the gesture change is the release: charge ends, impact begins, and the
    // switch waits
    assert_eq!(arb.current_id(), TechniqueId::BlackFlash);
    assert_eq!(arb.pending_id(), Some(TechniqueId::Cleave));
    assert_eq!(arb.current_phase(), "impact");

    clock.set(0.5);
    arb.frame(&settings);
    assert_eq!(arb.current_id(), TechniqueId::BlackFlash, "switched mid-impact");

    // impact started at 0.25 and lasts 0.7; the next frame past 0.95 reaches
    // settle and applies the pending switch
    clock.set(1.0);
    arb.frame(&settings);
    assert_eq!(arb.current_id(), TechniqueId::Cleave);
    assert_eq!(arb.pending_id(), None);
    assert_eq!(arb.current_phase(), "slicing");
}

#[test]
fn competing_gesture_during_impact_defers_too() {
    let (mut arb, clock) = arbiter();
    let settings = Settings::default();
    arb.set_gesture("blackflash");
    clock.set(0.25);
    arb.set_gesture("cleave");
    assert_eq!(arb.current_phase(), "impact");

    // changing the target again mid-impact replaces the pending technique
    clock.set(0.4);
    arb.set_gesture("domain");
    assert_eq!(arb.current_id(), TechniqueId::BlackFlash);
    assert_eq!(arb.pending_id(), Some(TechniqueId::Domain));

    clock.set(1.0);
    arb.frame(&settings);
    assert_eq!(arb.current_id(), TechniqueId::Domain);
}

#[test]
fn returning_gesture_revokes_the_pending_switch() {
    let (mut arb, clock) = arbiter();
    let settings = Settings::default();
    arb.set_gesture("blackflash");
    clock.set(0.25);
    arb.set_gesture("cleave"); // release -> impact, switch deferred
    assert_eq!(arb.pending_id(), Some(TechniqueId::Cleave));

    // the player comes back to the flash before the lock releases; the
    // latest gesture wins and the deferred switch is dropped
    clock.set(0.4);
    arb.set_gesture("blackflash");
    assert_eq!(arb.pending_id(), None);

    clock.set(1.2);
    arb.frame(&settings);
    assert_eq!(arb.current_id(), TechniqueId::BlackFlash);
    assert_eq!(arb.current_phase(), "settle");
}

#[test]
fn cleave_and_domain_switch_away_immediately() {
    let (mut arb, clock) = arbiter();
    let settings = Settings::default();
    arb.set_gesture("cleave");
    arb.frame(&settings);
    assert_eq!(arb.current_phase(), "slicing");

    clock.set(0.2);
    arb.set_gesture("domain");
    assert_eq!(arb.current_id(), TechniqueId::Domain);
    assert_eq!(arb.pending_id(), None);
    assert_eq!(arb.current_phase(), "growing");

    clock.set(0.3);
    arb.set_gesture("aura");
    assert_eq!(arb.current_id(), TechniqueId::Aura);
}

#[test]
fn bloom_respects_settings_multipliers() {
    let (mut arb, _clock) = arbiter();
    let settings = Settings {
        bloom_multiplier: 2.0,
        intensity: 1.5,
        ..Settings::default()
    };
    // aura has no bloom override; its static config bloom is 1.0
    let out = arb.frame(&settings);
    assert!((out.bloom - 3.0).abs() < 1e-5);

    arb.set_gesture("blackflash");
    let out = arb.frame(&settings);
    assert!((out.bloom - BF_CHARGE_BLOOM_MIN * 3.0).abs() < 1e-4);
    assert_eq!(out.config.display_name, "Black Flash");
}

#[test]
fn shake_is_silenced_by_settings() {
    let (mut arb, clock) = arbiter();
    let muted = Settings {
        shake_enabled: false,
        ..Settings::default()
    };
    arb.set_gesture("blackflash");
    clock.set(0.25);
    arb.set_gesture("cleave"); // release -> impact, perfect
    clock.set(0.3);
    let out = arb.frame(&muted);
    assert_eq!(out.shake, 0.0);
    assert_eq!(out.phase, "impact");

    let loud = Settings::default();
    clock.set(0.35);
    let out = arb.frame(&loud);
    assert!(out.shake > 0.0, "impact should shake when enabled");
}

#[test]
fn flash_overlay_clear_task_fires_after_impact() {
    let (mut arb, clock) = arbiter();
    let settings = Settings::default();
    arb.set_gesture("blackflash");
    clock.set(0.25);
    arb.set_gesture("cleave"); // impact begins at 0.25
    clock.set(0.3);
    let out = arb.frame(&settings); // schedules the clear at 0.3 + 0.08
    assert!(out.tasks.is_empty());
    clock.set(0.5);
    let out = arb.frame(&settings);
    assert!(
        out.tasks.contains(&TaskKind::ClearFlashOverlay),
        "overlay clear task never fired"
    );
}

#[test]
fn session_tasks_are_cancelled_by_the_switch() {
    let (mut arb, clock) = arbiter();
    let settings = Settings::default();
    arb.set_gesture("blackflash");
    clock.set(0.9);
    arb.frame(&settings); // auto-fire: impact at 0.9, clear scheduled for 0.98
    assert_eq!(arb.current_phase(), "impact");
    // player bails out mid-impact; the switch applies once impact ends and
    // must cancel the old session's tasks with it
    arb.set_gesture("aura");
    clock.set(1.7);
    let out = arb.frame(&settings);
    assert_eq!(arb.current_id(), TechniqueId::Aura);
    assert!(
        out.tasks.is_empty(),
        "stale task from the dead session leaked through"
    );
}

#[test]
fn frames_move_particles_toward_targets() {
    let (mut arb, clock) = arbiter();
    let settings = Settings {
        particle_count: 64,
        ..Settings::default()
    };
    for step in 1..=20 {
        clock.set(step as f64 * 0.016);
        arb.frame(&settings);
    }
    let sizes = arb.buffer().sizes();
    assert!(sizes[0] > 0.0, "active particle never grew");
    for i in 64..arb.buffer().capacity() {
        assert_eq!(
            arb.buffer().target_sizes()[i],
            0.0,
            "inactive particle {i} has a live target"
        );
    }
    assert!(arb.rotation().y > 0.0, "cloud rotation never accumulated");
}
