//! Circular temperature dial: pointer angle around a pivot drives the value.
//!
//! Angles are measured y-up (`atan2(-(y - cy), x - cx)`), so counter-clockwise
//! finger motion increases the drive coordinate and therefore the value. The
//! rendered ring turns the opposite way, see [`AngularInputController::ring_rotation`].

use crate::constants::{
    DEFAULT_TEMPERATURE, DECAY_VELOCITY_GAIN, DIAL_PIVOT_X_PAD,
    DIAL_PIVOT_Y_LIFT, DIAL_RADIUS_PER_WIDTH, MAX_TEMPERATURE, MIN_TEMPERATURE,
    RING_ROTATION_GAIN, SWEEP_MAX, SWEEP_MIN,
};
use crate::decay::{angular_velocity, DecayParams, InertialDecay};
use crate::drive::{DriveCell, DriveWrite, Driver};
use crate::error::DialError;
use crate::feedback::{Effect, ImpactStyle};
use crate::gesture::{GestureSample, PointerId};
use crate::range::{DriveBounds, ValueRange};
use crate::tween::{Easing, Tween};
use glam::Vec2;
use std::time::Duration;

/// Shortest signed angle from `from` to `to`, in (-π, π].
///
/// Uses `atan2(sin Δ, cos Δ)` rather than the raw difference so crossing the
/// ±π seam never produces a 2π jump.
#[inline]
pub fn shortest_delta(from: f32, to: f32) -> f32 {
    let raw = to - from;
    raw.sin().atan2(raw.cos())
}

/// Where the dial sits on screen.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DialGeometry {
    pub pivot: Vec2,
    pub radius: f32,
}

impl DialGeometry {
    /// Layout used on phones: a large ring whose pivot sits just past the
    /// right edge, so only its left arc is visible.
    pub fn for_viewport(width: f32, height: f32) -> Self {
        Self {
            pivot: Vec2::new(width + DIAL_PIVOT_X_PAD, height / 2.0 - DIAL_PIVOT_Y_LIFT),
            radius: width * DIAL_RADIUS_PER_WIDTH,
        }
    }
}

impl Default for DialGeometry {
    fn default() -> Self {
        Self::for_viewport(390.0, 844.0)
    }
}

#[derive(Clone, Debug)]
pub struct DialParams {
    pub geometry: DialGeometry,
    pub min: f32,
    pub max: f32,
    pub sweep_min: f32,
    pub sweep_max: f32,
    pub initial_value: f32,
    /// Scales the release angular velocity before it feeds the decay.
    pub velocity_gain: f32,
    pub decay: DecayParams,
}

impl Default for DialParams {
    fn default() -> Self {
        Self {
            geometry: DialGeometry::default(),
            min: MIN_TEMPERATURE,
            max: MAX_TEMPERATURE,
            sweep_min: SWEEP_MIN,
            sweep_max: SWEEP_MAX,
            initial_value: DEFAULT_TEMPERATURE,
            velocity_gain: DECAY_VELOCITY_GAIN,
            decay: DecayParams::default(),
        }
    }
}

/// How a drag ended.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Release {
    /// Too close to the pivot or too slow to coast; value stays put.
    Tap,
    /// Momentum continues at `velocity` rad/s.
    Fling { velocity: f32 },
}

/// Things that finished during [`AngularInputController::tick`].
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct DialTick {
    pub decay_settled: bool,
    pub settle_finished: bool,
}

#[derive(Clone, Debug)]
pub struct AngularInputController {
    range: ValueRange,
    geometry: DialGeometry,
    cell: DriveCell,
    decay: InertialDecay,
    settle: Tween,
    /// Angle the next update is measured from. Frozen while clamped.
    reference_angle: f32,
    /// Angle of the most recent sample, clamped or not.
    last_angle: f32,
    pointer: Option<PointerId>,
    enabled: bool,
    velocity_gain: f32,
}

impl AngularInputController {
    pub fn new(params: &DialParams) -> Result<Self, DialError> {
        let bounds = DriveBounds::new(params.sweep_min, params.sweep_max)?;
        let range = ValueRange::new(params.min, params.max, bounds)?;
        let start = range.position_for(params.initial_value);
        Ok(Self {
            range,
            geometry: params.geometry,
            cell: DriveCell::new(start, bounds),
            decay: InertialDecay::new(params.decay),
            settle: Tween::idle(start),
            reference_angle: 0.0,
            last_angle: 0.0,
            pointer: None,
            enabled: true,
            velocity_gain: params.velocity_gain,
        })
    }

    pub fn range(&self) -> &ValueRange {
        &self.range
    }

    pub fn geometry(&self) -> DialGeometry {
        self.geometry
    }

    pub fn set_geometry(&mut self, geometry: DialGeometry) {
        self.geometry = geometry;
    }

    /// Pivot-relative offset in a y-up frame.
    #[inline]
    fn offset_of(&self, screen: Vec2) -> Vec2 {
        let d = screen - self.geometry.pivot;
        Vec2::new(d.x, -d.y)
    }

    pub fn pointer_angle(&self, screen: Vec2) -> f32 {
        let r = self.offset_of(screen);
        r.y.atan2(r.x)
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Disabling drops any drag or coast in flight but keeps the position.
    pub fn set_enabled(&mut self, enabled: bool) {
        if self.enabled == enabled {
            return;
        }
        self.enabled = enabled;
        if !enabled {
            if self.pointer.take().is_some() {
                log::debug!("[dial] drag dropped by disable");
            }
            self.cell.release(Driver::Drag);
            self.decay.cancel();
            self.cell.release(Driver::Decay);
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.pointer.is_some()
    }

    pub fn is_coasting(&self) -> bool {
        self.cell.owned_by(Driver::Decay)
    }

    pub fn is_settling(&self) -> bool {
        self.cell.owned_by(Driver::Transition)
    }

    pub fn driver(&self) -> Driver {
        self.cell.driver()
    }

    pub fn position(&self) -> f32 {
        self.cell.position()
    }

    pub fn fraction(&self) -> f32 {
        self.range.fraction(self.cell.position())
    }

    pub fn value(&self) -> f32 {
        self.range.value_at(self.cell.position())
    }

    pub fn rounded_value(&self) -> i32 {
        self.range.rounded_value_at(self.cell.position())
    }

    /// Value the dial is heading to when a settle animation owns it.
    pub fn settle_target_value(&self) -> Option<f32> {
        self.is_settling()
            .then(|| self.range.value_at(self.settle.target()))
    }

    /// Rotation to apply to the gradient ring and ticks, in radians.
    pub fn ring_rotation(&self) -> f32 {
        -self.cell.position() * RING_ROTATION_GAIN
    }

    /// Start a drag. Cancels coasting or a settle animation. Returns `false`
    /// when the dial is disabled or another pointer already owns it.
    pub fn begin(
        &mut self,
        pointer: PointerId,
        sample: GestureSample,
        effects: &mut Vec<Effect>,
    ) -> bool {
        if !self.enabled {
            return false;
        }
        if let Some(owner) = self.pointer {
            if owner != pointer {
                log::debug!("[dial] ignoring pointer {} while {} drags", pointer, owner);
            }
            return false;
        }
        self.decay.cancel();
        self.cell.claim(Driver::Drag);
        let angle = self.pointer_angle(sample.position);
        self.reference_angle = angle;
        self.last_angle = angle;
        self.pointer = Some(pointer);
        effects.push(Effect::Haptic(ImpactStyle::Light));
        log::debug!("[dial] begin pointer={} angle={:.3}", pointer, angle);
        true
    }

    /// Apply a pointer sample and return the live value, or `None` if the
    /// sample does not belong to the active drag.
    pub fn update(&mut self, pointer: PointerId, sample: GestureSample) -> Option<f32> {
        if !self.enabled || self.pointer != Some(pointer) {
            return None;
        }
        let angle = self.pointer_angle(sample.position);
        let delta = shortest_delta(self.reference_angle, angle);
        let target = self.cell.position() + delta;

        match self.cell.write(Driver::Drag, target) {
            DriveWrite::Applied => self.reference_angle = angle,
            DriveWrite::Clamped => {
                // Overshoot past a bound is absorbed. As soon as the finger
                // heads back inward, re-anchor on the current angle so the
                // value moves off the bound without a dead zone.
                let step = shortest_delta(self.last_angle, angle);
                let bounds = self.cell.bounds();
                let inward = (self.cell.position() >= bounds.hi && step < 0.0)
                    || (self.cell.position() <= bounds.lo && step > 0.0);
                if inward {
                    let from_bound = self.cell.position() + step;
                    self.cell.write(Driver::Drag, from_bound);
                    self.reference_angle = angle;
                }
            }
            DriveWrite::Rejected => return None,
        }
        self.last_angle = angle;
        Some(self.value())
    }

    /// Finish a drag, handing the release velocity to the decay engine.
    pub fn end(&mut self, pointer: PointerId, sample: GestureSample) -> Option<Release> {
        if self.pointer != Some(pointer) {
            return None;
        }
        self.pointer = None;
        self.cell.release(Driver::Drag);
        if !self.enabled {
            return Some(Release::Tap);
        }

        let offset = self.offset_of(sample.position);
        let velocity = Vec2::new(sample.velocity.x, -sample.velocity.y);
        let Some(omega) = angular_velocity(offset, velocity) else {
            log::debug!("[dial] release too close to pivot, treating as tap");
            return Some(Release::Tap);
        };
        let sweep_velocity = omega * self.velocity_gain;
        if self.decay.launch(sweep_velocity) && self.cell.claim(Driver::Decay) {
            Some(Release::Fling {
                velocity: sweep_velocity,
            })
        } else {
            self.decay.cancel();
            Some(Release::Tap)
        }
    }

    /// Animate to `value` under the transition driver. Fails while a drag
    /// owns the dial.
    pub fn settle_to(&mut self, value: f32, duration: Duration) -> bool {
        if !self.cell.claim(Driver::Transition) {
            return false;
        }
        self.decay.cancel();
        let target = self.range.position_for(value);
        self.settle = Tween::new(
            self.cell.position(),
            target,
            duration,
            Easing::EaseInOutCubic,
        );
        log::debug!("[dial] settle to {:.1} over {:?}", value, duration);
        true
    }

    /// Advance coasting or settling by `dt`.
    pub fn tick(&mut self, dt: Duration) -> DialTick {
        let mut out = DialTick::default();
        match self.cell.driver() {
            Driver::Decay => {
                let step = self
                    .decay
                    .step(self.cell.position(), self.cell.bounds(), dt);
                self.cell.write(Driver::Decay, step.position);
                if step.finished {
                    self.cell.release(Driver::Decay);
                    out.decay_settled = true;
                }
            }
            Driver::Transition => {
                let done = self.settle.tick(dt);
                self.cell.write(Driver::Transition, self.settle.value());
                if done || self.settle.is_finished() {
                    self.cell.release(Driver::Transition);
                    out.settle_finished = true;
                }
            }
            Driver::Drag | Driver::None => {}
        }
        out
    }
}
