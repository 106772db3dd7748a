// Host-side tests for the ambient bubble field.

use dial_core::*;
use std::time::Duration;

const STEP: Duration = Duration::from_millis(100);

fn make_field(seed: u64) -> AmbientField {
    AmbientField::with_defaults(DialGeometry::default(), seed)
}

#[test]
fn disabled_field_does_not_move() {
    let mut field = make_field(42);
    assert!(!field.is_enabled());
    let before = field.particles();
    for _ in 0..20 {
        field.tick(STEP);
    }
    assert_eq!(field.particles(), before);
    assert!(field.elements().iter().all(|e| e.step_index() == 0));
}

#[test]
fn particles_start_small_at_rest() {
    let field = make_field(42);
    let particles = field.particles();
    assert_eq!(particles.len(), DEFAULT_BUBBLES.len());
    for (p, cfg) in particles.iter().zip(DEFAULT_BUBBLES.iter()) {
        assert!((p.radius - cfg.max_radius * AMBIENT_MIN_SCALE).abs() < 1e-5);
    }
    for e in field.elements() {
        assert_eq!(e.jitter(), AMBIENT_REST_JITTER);
        assert_eq!(e.theta(), field.initial_theta());
    }
    let flat: &[f32] = bytemuck::cast_slice(particles.as_slice());
    assert_eq!(flat.len(), particles.len() * 4);
}

#[test]
fn enabled_bubbles_step_after_their_delay() {
    let mut field = make_field(42);
    field.set_enabled(true);
    field.tick(STEP);
    let e = field.elements();
    assert_eq!(e[0].step_index(), 1);
    // second bubble waits 30ms first
    assert_eq!(e[1].step_index(), 0);
    assert!(e[1].scale() > AMBIENT_MIN_SCALE);
    assert!((e[0].theta() - field.initial_theta() - std::f32::consts::PI / 15.0).abs() < 1e-5);
}

#[test]
fn long_frame_completes_at_most_one_step() {
    let mut field = make_field(42);
    field.set_enabled(true);
    field.tick(Duration::from_secs(5));
    assert!(field.elements().iter().all(|e| e.step_index() == 1));
}

#[test]
fn disable_mid_cycle_resets_to_rest() {
    let mut field = make_field(42);
    field.set_enabled(true);
    for _ in 0..7 {
        field.tick(STEP);
    }
    assert_eq!(field.elements()[0].step_index(), 7);

    field.set_enabled(false);
    for e in field.elements() {
        assert_eq!(e.step_index(), 0);
        assert_eq!(e.theta(), field.initial_theta());
        assert_eq!(e.jitter(), AMBIENT_REST_JITTER);
        assert_eq!(e.scale(), AMBIENT_MIN_SCALE);
    }

    // re-enabling starts over, honouring the stagger again
    field.set_enabled(true);
    field.tick(Duration::from_millis(20));
    assert_eq!(field.elements()[0].step_index(), 0);
    assert!(field.elements()[0].scale() > AMBIENT_MIN_SCALE);
    assert_eq!(field.elements()[1].scale(), AMBIENT_MIN_SCALE);
}

#[test]
fn sequence_rests_expanded_after_last_step() {
    let mut field = make_field(42);
    field.set_enabled(true);
    for _ in 0..40 {
        field.tick(STEP);
    }
    for e in field.elements() {
        assert!(e.is_done());
        assert_eq!(e.step_index(), AMBIENT_STEPS - 1);
        assert_eq!(e.scale(), 1.0);
    }
    let settled = field.particles();
    field.tick(STEP);
    assert_eq!(field.particles(), settled);
}

#[test]
fn repeating_sequence_wraps_around() {
    let params = AmbientParams {
        repeat: true,
        ..AmbientParams::default()
    };
    let mut field = AmbientField::new(&DEFAULT_BUBBLES[..1], DialGeometry::default(), params, 1);
    field.set_enabled(true);
    for _ in 0..AMBIENT_STEPS {
        field.tick(STEP);
    }
    let e = &field.elements()[0];
    assert!(!e.is_done());
    assert_eq!(e.step_index(), 0);
    assert_eq!(e.theta(), field.initial_theta());
}

#[test]
fn jitter_is_seeded_and_bounded() {
    let mut a = make_field(9);
    let mut b = make_field(9);
    let mut c = make_field(10);
    for f in [&mut a, &mut b, &mut c] {
        f.set_enabled(true);
        for _ in 0..5 {
            f.tick(STEP);
        }
    }
    assert_eq!(a.particles(), b.particles());
    assert_ne!(a.particles(), c.particles());
    for e in a.elements() {
        assert!(e.jitter().abs() <= AMBIENT_JITTER_SPAN);
    }

    a.reseed(10);
    b.reseed(10);
    a.tick(STEP);
    b.tick(STEP);
    assert_eq!(a.particles(), b.particles());
}

#[test]
fn pause_freezes_without_reset() {
    let mut field = make_field(42);
    field.set_enabled(true);
    field.tick(STEP);
    field.tick(Duration::from_millis(50));
    field.set_paused(true);
    let frozen = field.particles();
    field.tick(STEP);
    assert_eq!(field.particles(), frozen);
    assert_eq!(field.elements()[0].step_index(), 1);

    field.set_paused(false);
    field.tick(Duration::from_millis(60));
    assert_eq!(field.elements()[0].step_index(), 2);
}
