// Host-side tests for the circular dial controller.

use dial_core::*;
use glam::Vec2;
use rand::prelude::*;
use std::f32::consts::PI;

/// Screen-space touch at y-up `angle` on the dial's ring.
fn touch(g: DialGeometry, angle: f32) -> GestureSample {
    let p = g.pivot + Vec2::new(angle.cos(), -angle.sin()) * g.radius;
    GestureSample::at(p.x, p.y)
}

fn make_dial() -> AngularInputController {
    AngularInputController::new(&DialParams::default()).unwrap()
}

#[test]
fn shortest_delta_wraps_across_seam() {
    let d = shortest_delta(PI - 0.1, -PI + 0.1);
    assert!((d - 0.2).abs() < 1e-5);
    let d = shortest_delta(-PI + 0.1, PI - 0.1);
    assert!((d + 0.2).abs() < 1e-5);

    let half = shortest_delta(0.0, PI);
    assert!(half.is_finite());
    assert!((half.abs() - PI).abs() < 1e-5);
}

#[test]
fn starts_at_default_temperature() {
    let dial = make_dial();
    assert_eq!(dial.rounded_value(), 76);
    assert_eq!(dial.driver(), Driver::None);
    assert!((dial.ring_rotation() + dial.position() * RING_ROTATION_GAIN).abs() < 1e-6);
}

#[test]
fn begin_emits_one_light_haptic() {
    let mut dial = make_dial();
    let g = dial.geometry();
    let mut effects = Vec::new();
    assert!(dial.begin(1, touch(g, 3.0), &mut effects));
    assert_eq!(effects, vec![Effect::Haptic(ImpactStyle::Light)]);
    assert!(dial.is_dragging());
    assert_eq!(dial.driver(), Driver::Drag);
}

#[test]
fn sample_at_same_angle_is_noop() {
    let mut dial = make_dial();
    let g = dial.geometry();
    let before = dial.value();
    dial.begin(1, touch(g, 2.5), &mut Vec::new());
    let v = dial.update(1, touch(g, 2.5)).unwrap();
    assert!((v - before).abs() < 1e-4);
}

#[test]
fn counter_clockwise_drag_raises_value() {
    let mut dial = make_dial();
    let g = dial.geometry();
    dial.begin(1, touch(g, 3.0), &mut Vec::new());
    let v = dial.update(1, touch(g, 3.1)).unwrap();
    // 24 degrees over 2.7 radians of sweep
    assert!((v - (76.0 + 0.1 * 24.0 / 2.7)).abs() < 1e-3);
    let v = dial.update(1, touch(g, 2.9)).unwrap();
    assert!(v < 76.0);
}

#[test]
fn drag_across_the_seam_does_not_jump() {
    let mut dial = make_dial();
    let g = dial.geometry();
    dial.begin(1, touch(g, PI - 0.05), &mut Vec::new());
    // y-up angle wraps from +π to -π here
    let v = dial.update(1, touch(g, -PI + 0.05)).unwrap();
    assert!((v - (76.0 + 0.1 * 24.0 / 2.7)).abs() < 1e-2);
}

#[test]
fn saturates_at_max_and_reverses_immediately() {
    let mut dial = make_dial();
    let g = dial.geometry();
    dial.begin(1, touch(g, 3.0), &mut Vec::new());
    let mut angle = 3.0;
    for _ in 0..20 {
        angle += 0.1;
        dial.update(1, touch(g, angle));
    }
    assert_eq!(dial.value(), MAX_TEMPERATURE);
    assert_eq!(dial.rounded_value(), 86);

    // first step back leaves the bound, no dead zone from the overshoot
    angle -= 0.1;
    let v = dial.update(1, touch(g, angle)).unwrap();
    assert!(v < MAX_TEMPERATURE);
    assert_eq!(dial.rounded_value(), 85);
}

#[test]
fn saturates_at_min() {
    let mut dial = make_dial();
    let g = dial.geometry();
    dial.begin(1, touch(g, 3.0), &mut Vec::new());
    let mut angle: f32 = 3.0;
    for _ in 0..30 {
        angle -= 0.1;
        dial.update(1, touch(g, angle));
    }
    assert_eq!(dial.value(), MIN_TEMPERATURE);
    angle += 0.05;
    assert!(dial.update(1, touch(g, angle)).unwrap() > MIN_TEMPERATURE);
}

#[test]
fn value_stays_in_range_for_any_pointer_path() {
    let mut dial = make_dial();
    let g = dial.geometry();
    let mut rng = StdRng::seed_from_u64(7);
    dial.begin(1, GestureSample::at(0.0, 0.0), &mut Vec::new());
    for _ in 0..500 {
        let x = rng.gen_range(-200.0..800.0);
        let y = rng.gen_range(-200.0..1000.0);
        let v = dial.update(1, GestureSample::at(x, y)).unwrap();
        assert!(v.is_finite());
        assert!((MIN_TEMPERATURE..=MAX_TEMPERATURE).contains(&v), "{v}");
    }
    // the pivot itself has no defined angle but must not poison the value
    let v = dial.update(1, GestureSample::at(g.pivot.x, g.pivot.y)).unwrap();
    assert!(v.is_finite());
}

#[test]
fn second_pointer_is_ignored() {
    let mut dial = make_dial();
    let g = dial.geometry();
    let mut effects = Vec::new();
    assert!(dial.begin(1, touch(g, 3.0), &mut effects));
    assert!(!dial.begin(2, touch(g, 2.0), &mut effects));
    assert_eq!(effects.len(), 1);
    assert_eq!(dial.update(2, touch(g, 2.5)), None);
    assert_eq!(dial.end(2, touch(g, 2.5)), None);
    assert!(dial.is_dragging());
}

#[test]
fn disabled_dial_is_inert() {
    let mut dial = make_dial();
    let g = dial.geometry();
    dial.set_enabled(false);
    let mut effects = Vec::new();
    assert!(!dial.begin(1, touch(g, 3.0), &mut effects));
    assert!(effects.is_empty());
    assert_eq!(dial.update(1, touch(g, 3.3)), None);
    assert_eq!(dial.rounded_value(), 76);
}

#[test]
fn disabling_mid_drag_drops_it() {
    let mut dial = make_dial();
    let g = dial.geometry();
    dial.begin(1, touch(g, 3.0), &mut Vec::new());
    dial.set_enabled(false);
    assert!(!dial.is_dragging());
    assert_eq!(dial.driver(), Driver::None);
}

#[test]
fn release_near_pivot_is_a_tap() {
    let mut dial = make_dial();
    let g = dial.geometry();
    dial.begin(1, touch(g, 3.0), &mut Vec::new());
    let at_pivot = GestureSample::at(g.pivot.x + 0.5, g.pivot.y).with_velocity(0.0, 5000.0);
    assert_eq!(dial.end(1, at_pivot), Some(Release::Tap));
    assert!(!dial.is_coasting());
}

#[test]
fn settle_animates_to_value_and_releases() {
    let mut dial = make_dial();
    assert!(dial.settle_to(70.0, std::time::Duration::from_millis(300)));
    assert!(dial.is_settling());
    assert_eq!(dial.settle_target_value().map(|v| v.round()), Some(70.0));

    let mut finished = false;
    for _ in 0..20 {
        finished |= dial.tick(std::time::Duration::from_millis(16)).settle_finished;
    }
    assert!(finished);
    assert_eq!(dial.rounded_value(), 70);
    assert_eq!(dial.driver(), Driver::None);
    assert_eq!(dial.settle_target_value(), None);
}

#[test]
fn drag_cancels_a_settle() {
    let mut dial = make_dial();
    let g = dial.geometry();
    dial.settle_to(62.0, std::time::Duration::from_millis(300));
    dial.tick(std::time::Duration::from_millis(100));
    assert!(dial.begin(1, touch(g, 3.0), &mut Vec::new()));
    let held = dial.value();
    dial.tick(std::time::Duration::from_millis(300));
    assert_eq!(dial.value(), held);
    // a settle cannot steal the dial back from the finger
    assert!(!dial.settle_to(80.0, std::time::Duration::from_millis(300)));
}
