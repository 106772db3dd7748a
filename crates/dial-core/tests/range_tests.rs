// Host-side tests for the value range map and the shared drive cell.

use dial_core::*;

fn dial_range() -> ValueRange {
    let drive = DriveBounds::new(SWEEP_MIN, SWEEP_MAX).unwrap();
    ValueRange::new(MIN_TEMPERATURE, MAX_TEMPERATURE, drive).unwrap()
}

#[test]
fn midpoint_of_sweep_shows_mid_temperature() {
    let range = dial_range();
    let mid = (SWEEP_MIN + SWEEP_MAX) / 2.0;
    assert!((range.fraction(mid) - 0.5).abs() < 1e-6);
    assert!((range.value_at(mid) - 74.0).abs() < 1e-4);
    assert_eq!(range.rounded_value_at(mid), 74);
}

#[test]
fn map_is_increasing_and_clamped() {
    let range = dial_range();
    assert_eq!(range.value_at(SWEEP_MIN), MIN_TEMPERATURE);
    assert_eq!(range.value_at(SWEEP_MAX), MAX_TEMPERATURE);
    assert_eq!(range.value_at(-10.0), MIN_TEMPERATURE);
    assert_eq!(range.value_at(10.0), MAX_TEMPERATURE);
    assert!(range.value_at(0.0) > range.value_at(-1.0));
}

#[test]
fn position_for_inverts_value_at() {
    let range = dial_range();
    for v in [62.0, 70.0, 76.0, 80.5, 86.0] {
        let p = range.position_for(v);
        assert!((range.value_at(p) - v).abs() < 1e-3, "{v} -> {p}");
    }
    // default temperature sits a little left of the sweep centre
    assert!((range.position_for(DEFAULT_TEMPERATURE) + 0.275).abs() < 1e-3);
    assert!((range.value_at(range.position_for(200.0)) - MAX_TEMPERATURE).abs() < 1e-4);
}

#[test]
fn empty_intervals_are_rejected() {
    assert!(matches!(
        DriveBounds::new(1.0, 1.0),
        Err(DialError::EmptyDrive { .. })
    ));
    assert!(DriveBounds::new(f32::NAN, 1.0).is_err());
    let drive = DriveBounds::new(0.0, 1.0).unwrap();
    assert!(matches!(
        ValueRange::new(86.0, 62.0, drive),
        Err(DialError::EmptyRange { .. })
    ));
}

#[test]
fn higher_driver_preempts_lower() {
    let bounds = DriveBounds::new(-1.0, 1.0).unwrap();
    let mut cell = DriveCell::new(0.0, bounds);
    assert_eq!(cell.driver(), Driver::None);

    assert!(cell.claim(Driver::Decay));
    assert!(cell.claim(Driver::Drag));
    assert!(!cell.claim(Driver::Transition));
    assert_eq!(cell.write(Driver::Decay, 0.5), DriveWrite::Rejected);
    assert_eq!(cell.position(), 0.0);

    // releasing as a non-owner does nothing
    cell.release(Driver::Decay);
    assert!(cell.owned_by(Driver::Drag));
    cell.release(Driver::Drag);
    assert_eq!(cell.driver(), Driver::None);
    assert_eq!(cell.write(Driver::None, 0.5), DriveWrite::Rejected);
}

#[test]
fn writes_are_clamped_to_bounds() {
    let bounds = DriveBounds::new(-1.0, 1.0).unwrap();
    let mut cell = DriveCell::new(5.0, bounds);
    assert_eq!(cell.position(), 1.0);
    assert!(cell.at_bound());

    cell.claim(Driver::Transition);
    assert_eq!(cell.write(Driver::Transition, 0.25), DriveWrite::Applied);
    assert!(!cell.at_bound());
    assert_eq!(cell.write(Driver::Transition, -3.0), DriveWrite::Clamped);
    assert_eq!(cell.position(), -1.0);
    assert!(cell.at_bound());
}
