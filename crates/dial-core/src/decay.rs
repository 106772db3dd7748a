//! Post-release momentum.
//!
//! Velocity falls off by a fixed factor per millisecond. Each tick integrates
//! that curve exactly, so the distance travelled does not depend on frame
//! rate.

use crate::constants::{DECAY_DECELERATION, DECAY_MIN_RADIUS_SQ, DECAY_REST_VELOCITY};
use crate::range::DriveBounds;
use glam::Vec2;
use std::time::Duration;

/// Angular velocity (rad/s) of a pointer moving with `velocity` at `offset`
/// from the pivot, both in a y-up frame: `ω = (r × v) / |r|²`.
///
/// Returns `None` when the pointer is too close to the pivot for the division
/// to be meaningful; callers treat that release as a tap.
pub fn angular_velocity(offset: Vec2, velocity: Vec2) -> Option<f32> {
    let r2 = offset.length_squared();
    if !(r2 > DECAY_MIN_RADIUS_SQ) {
        return None;
    }
    Some(offset.perp_dot(velocity) / r2)
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DecayParams {
    /// Velocity multiplier per elapsed millisecond, in (0, 1).
    pub deceleration: f32,
    /// Below this speed (units/s) the motion stops.
    pub rest_velocity: f32,
}

impl Default for DecayParams {
    fn default() -> Self {
        Self {
            deceleration: DECAY_DECELERATION,
            rest_velocity: DECAY_REST_VELOCITY,
        }
    }
}

/// Result of advancing the decay by one tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DecayStep {
    pub position: f32,
    pub finished: bool,
}

#[derive(Clone, Debug, Default)]
pub struct InertialDecay {
    params: DecayParams,
    velocity: f32,
    active: bool,
}

impl InertialDecay {
    pub fn new(params: DecayParams) -> Self {
        Self {
            params,
            velocity: 0.0,
            active: false,
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn velocity(&self) -> f32 {
        self.velocity
    }

    /// Start coasting at `velocity` units/s. Speeds already at rest are ignored.
    pub fn launch(&mut self, velocity: f32) -> bool {
        if !velocity.is_finite() || velocity.abs() < self.params.rest_velocity {
            self.cancel();
            return false;
        }
        log::debug!("[decay] launch v={:.3}", velocity);
        self.velocity = velocity;
        self.active = true;
        true
    }

    pub fn cancel(&mut self) {
        self.active = false;
        self.velocity = 0.0;
    }

    /// Advance from `position` by `dt`, clamped to `bounds`.
    pub fn step(&mut self, position: f32, bounds: DriveBounds, dt: Duration) -> DecayStep {
        if !self.active {
            return DecayStep {
                position,
                finished: true,
            };
        }
        let ms = dt.as_secs_f32() * 1000.0;
        let d = self.params.deceleration;
        let k = d.powf(ms);
        // ∫ v0·d^t dt over [0, ms] milliseconds, converted from per-second units
        let travel = self.velocity * (k - 1.0) / d.ln() / 1000.0;
        let next = position + travel;
        self.velocity *= k;

        let clamped = bounds.clamp(next);
        let hit_bound = clamped != next;
        let finished = hit_bound || self.velocity.abs() < self.params.rest_velocity;
        if finished {
            log::debug!("[decay] settle at {:.3} (bound={})", clamped, hit_bound);
            self.cancel();
        }
        DecayStep {
            position: clamped,
            finished,
        }
    }
}
