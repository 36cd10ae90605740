// Host-side tests for the Simple Domain grow/active/fade state machine.

use fx_core::{DomainPhase, SimpleDomain, Technique};

#[test]
fn scale_ramps_up_over_grow_duration() {
    let mut d = SimpleDomain::new();
    d.activate(0.0);
    assert_eq!(d.phase(), DomainPhase::Growing);
    assert_eq!(d.scale(0.0), 0.0);
    assert!((d.scale(0.25) - 0.5).abs() < 1e-5);
    d.update_phase(0.5);
    assert_eq!(d.phase(), DomainPhase::Active);
    assert_eq!(d.scale(0.5), 1.0);
}

#[test]
fn active_holds_until_deactivated() {
    let mut d = SimpleDomain::new();
    d.activate(0.0);
    d.update_phase(0.5);
    d.update_phase(300.0);
    assert_eq!(d.phase(), DomainPhase::Active);
    assert_eq!(d.scale(300.0), 1.0);
}

#[test]
fn fade_ramps_down_then_returns_to_idle() {
    let mut d = SimpleDomain::new();
    d.activate(0.0);
    d.update_phase(0.5);
    d.deactivate(10.0);
    assert_eq!(d.phase(), DomainPhase::Fading);
    assert!((d.scale(10.15) - 0.5).abs() < 1e-5);
    d.update_phase(10.3);
    assert_eq!(d.phase(), DomainPhase::Idle);
    assert_eq!(d.scale(10.3), 0.0);
}

#[test]
fn deactivating_mid_growth_starts_the_fade() {
    let mut d = SimpleDomain::new();
    d.activate(0.0);
    d.deactivate(0.2);
    assert_eq!(d.phase(), DomainPhase::Fading);
}

#[test]
fn releasing_mid_growth_fades_from_the_current_scale() {
    let mut d = SimpleDomain::new();
    d.activate(0.0);
    assert!((d.scale(0.2) - 0.4).abs() < 1e-5);
    d.deactivate(0.2);
    assert_eq!(d.phase(), DomainPhase::Fading);
    // no pop back to full size: the fade picks up at 0.4 and shrinks
    assert!((d.scale(0.2) - 0.4).abs() < 1e-4);
    assert!((d.scale(0.26) - 0.2).abs() < 1e-4);
    d.update_phase(0.33);
    assert_eq!(d.phase(), DomainPhase::Idle);
}

#[test]
fn wrong_source_transitions_are_no_ops() {
    let mut d = SimpleDomain::new();
    d.deactivate(1.0);
    assert_eq!(d.phase(), DomainPhase::Idle);
    d.activate(0.0);
    d.activate(5.0); // re-activation ignored while growing
    assert!((d.scale(0.25) - 0.5).abs() < 1e-5);
}

#[test]
fn particle_size_scales_with_barrier_scale() {
    // same particle, same instant, different barrier scale: only the scale
    // multiplier differs between the two generators
    let mut growing = SimpleDomain::new();
    growing.activate(0.0);
    let mut active = SimpleDomain::new();
    active.activate(0.0);
    active.update_phase(0.5);

    let small = growing.generate(11, 256, 0.05).size;
    let full = active.generate(11, 256, 0.05).size;
    assert!(full > small, "shell particles should grow with the barrier");
}

#[test]
fn idle_generator_shows_the_ambient_ring() {
    let d = SimpleDomain::new();
    let t = d.generate(3, 256, 0.0);
    assert!(t.size > 0.0, "idle ring should be faintly visible");
    assert!(t.position.y < 0.0, "idle ring sits low");
}
