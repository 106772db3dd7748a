// Host-side tests for release momentum.

use dial_core::*;
use glam::Vec2;
use std::time::Duration;

const FRAME: Duration = Duration::from_millis(16);

fn touch(g: DialGeometry, angle: f32) -> GestureSample {
    let p = g.pivot + Vec2::new(angle.cos(), -angle.sin()) * g.radius;
    GestureSample::at(p.x, p.y)
}

/// Release sample at `angle` moving around the ring at `omega` rad/s (y-up).
fn fling(g: DialGeometry, angle: f32, omega: f32) -> GestureSample {
    let v = Vec2::new(-angle.sin(), -angle.cos()) * omega * g.radius;
    touch(g, angle).with_velocity(v.x, v.y)
}

#[test]
fn angular_velocity_needs_distance_from_pivot() {
    assert_eq!(angular_velocity(Vec2::new(0.5, 0.5), Vec2::new(0.0, 100.0)), None);
    assert_eq!(angular_velocity(Vec2::new(1.0, 0.0), Vec2::new(0.0, 100.0)), None);
    assert_eq!(angular_velocity(Vec2::ZERO, Vec2::ZERO), None);

    let w = angular_velocity(Vec2::new(100.0, 0.0), Vec2::new(0.0, 100.0)).unwrap();
    assert!((w - 1.0).abs() < 1e-6);
    // radial motion has no angular component
    let w = angular_velocity(Vec2::new(100.0, 0.0), Vec2::new(50.0, 0.0)).unwrap();
    assert_eq!(w, 0.0);
}

#[test]
fn decay_is_monotonic_and_terminates() {
    let bounds = DriveBounds::new(-10.0, 10.0).unwrap();
    let mut decay = InertialDecay::new(DecayParams::default());
    assert!(decay.launch(1.0));

    let mut position = 0.0;
    let mut frames = 0;
    loop {
        let step = decay.step(position, bounds, FRAME);
        assert!(step.position.is_finite());
        assert!(step.position >= position);
        position = step.position;
        frames += 1;
        if step.finished {
            break;
        }
        assert!(frames < 200, "decay never settled");
    }
    assert!(!decay.is_active());
    // closed form: v0 / -ln(d) per millisecond, less the tail below rest speed
    assert!((position - 0.1975).abs() < 5e-3, "{position}");
}

#[test]
fn decay_distance_does_not_depend_on_frame_rate() {
    let bounds = DriveBounds::new(-10.0, 10.0).unwrap();
    let mut fine = InertialDecay::new(DecayParams::default());
    let mut coarse = InertialDecay::new(DecayParams::default());
    fine.launch(-2.0);
    coarse.launch(-2.0);

    let mut a = 0.0;
    for _ in 0..160 {
        a = fine.step(a, bounds, Duration::from_millis(1)).position;
    }
    let mut b = 0.0;
    for _ in 0..10 {
        b = coarse.step(b, bounds, FRAME).position;
    }
    assert!((a - b).abs() < 1e-4, "{a} vs {b}");
    assert!((fine.velocity() - coarse.velocity()).abs() < 1e-4);
}

#[test]
fn decay_stops_at_bound() {
    let bounds = DriveBounds::new(-1.0, 1.0).unwrap();
    let mut decay = InertialDecay::new(DecayParams::default());
    decay.launch(100.0);
    let step = decay.step(0.0, bounds, FRAME);
    assert_eq!(step.position, 1.0);
    assert!(step.finished);
    assert!(!decay.is_active());
    assert_eq!(decay.velocity(), 0.0);
}

#[test]
fn resting_or_invalid_launch_is_ignored() {
    let mut decay = InertialDecay::new(DecayParams::default());
    assert!(!decay.launch(0.001));
    assert!(!decay.launch(f32::NAN));
    assert!(!decay.launch(f32::INFINITY));
    assert!(!decay.is_active());
}

#[test]
fn fling_coasts_then_settles() {
    let mut dial = AngularInputController::new(&DialParams::default()).unwrap();
    let g = dial.geometry();
    dial.begin(1, touch(g, 3.0), &mut Vec::new());
    dial.update(1, touch(g, 3.05));

    let release = dial.end(1, fling(g, 3.05, 2.0)).unwrap();
    match release {
        Release::Fling { velocity } => assert!((velocity - 1.0).abs() < 1e-3),
        Release::Tap => panic!("expected a fling"),
    }
    assert!(dial.is_coasting());

    let start = dial.value();
    let mut settled = false;
    for _ in 0..200 {
        if dial.tick(FRAME).decay_settled {
            settled = true;
            break;
        }
    }
    assert!(settled);
    assert!(dial.value() > start);
    assert_eq!(dial.driver(), Driver::None);
}

#[test]
fn hard_fling_clamps_at_max() {
    let mut dial = AngularInputController::new(&DialParams::default()).unwrap();
    let g = dial.geometry();
    dial.begin(1, touch(g, 3.0), &mut Vec::new());
    dial.end(1, fling(g, 3.0, 40.0));
    for _ in 0..200 {
        if dial.tick(FRAME).decay_settled {
            break;
        }
    }
    assert_eq!(dial.value(), MAX_TEMPERATURE);
    assert!(!dial.is_coasting());
}

#[test]
fn new_drag_cancels_coasting() {
    let mut dial = AngularInputController::new(&DialParams::default()).unwrap();
    let g = dial.geometry();
    dial.begin(1, touch(g, 3.0), &mut Vec::new());
    dial.end(1, fling(g, 3.0, -2.0));
    dial.tick(FRAME);
    assert!(dial.is_coasting());

    assert!(dial.begin(1, touch(g, 3.0), &mut Vec::new()));
    assert!(!dial.is_coasting());
    let held = dial.position();
    for _ in 0..10 {
        dial.tick(FRAME);
    }
    assert_eq!(dial.position(), held);
}
