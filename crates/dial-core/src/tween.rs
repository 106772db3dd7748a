//! Timed scalar animation used for every non-physical motion in the crate.

use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Easing {
    Linear,
    EaseOutCubic,
    EaseInOutCubic,
    /// CSS-style cubic bezier through (0,0), (x1,y1), (x2,y2), (1,1).
    Bezier(f32, f32, f32, f32),
}

impl Easing {
    /// Map linear progress in [0, 1] to eased progress. Bezier curves may
    /// overshoot 1 between the endpoints.
    pub fn apply(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match *self {
            Easing::Linear => t,
            Easing::EaseOutCubic => 1.0 - (1.0 - t).powi(3),
            Easing::EaseInOutCubic => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            }
            Easing::Bezier(x1, y1, x2, y2) => bezier_at(t, x1, y1, x2, y2),
        }
    }
}

#[inline]
fn bezier_axis(s: f32, p1: f32, p2: f32) -> f32 {
    let u = 1.0 - s;
    3.0 * u * u * s * p1 + 3.0 * u * s * s * p2 + s * s * s
}

#[inline]
fn bezier_axis_slope(s: f32, p1: f32, p2: f32) -> f32 {
    let u = 1.0 - s;
    3.0 * u * u * p1 + 6.0 * u * s * (p2 - p1) + 3.0 * s * s * (1.0 - p2)
}

// Solve x(s) = t with a few Newton steps, falling back to bisection when the
// slope flattens out, then evaluate y(s).
fn bezier_at(t: f32, x1: f32, y1: f32, x2: f32, y2: f32) -> f32 {
    if t <= 0.0 || t >= 1.0 {
        return t;
    }
    let mut s = t;
    for _ in 0..8 {
        let err = bezier_axis(s, x1, x2) - t;
        if err.abs() < 1e-5 {
            return bezier_axis(s, y1, y2);
        }
        let slope = bezier_axis_slope(s, x1, x2);
        if slope.abs() < 1e-6 {
            break;
        }
        s = (s - err / slope).clamp(0.0, 1.0);
    }
    let (mut lo, mut hi) = (0.0_f32, 1.0_f32);
    s = t;
    for _ in 0..24 {
        let x = bezier_axis(s, x1, x2);
        if (x - t).abs() < 1e-5 {
            break;
        }
        if x < t {
            lo = s;
        } else {
            hi = s;
        }
        s = 0.5 * (lo + hi);
    }
    bezier_axis(s, y1, y2)
}

/// Animates a scalar from `from` to `to` over `duration`.
///
/// Tweens are plain values advanced by [`Tween::tick`]; nothing here reads a
/// clock.
#[derive(Debug, Clone)]
pub struct Tween {
    from: f32,
    to: f32,
    duration: Duration,
    elapsed: Duration,
    delay: Duration,
    easing: Easing,
}

impl Tween {
    /// A finished tween resting at `value`.
    pub fn idle(value: f32) -> Self {
        Self {
            from: value,
            to: value,
            duration: Duration::ZERO,
            elapsed: Duration::ZERO,
            delay: Duration::ZERO,
            easing: Easing::Linear,
        }
    }

    pub fn new(from: f32, to: f32, duration: Duration, easing: Easing) -> Self {
        Self {
            from,
            to,
            duration,
            elapsed: Duration::ZERO,
            delay: Duration::ZERO,
            easing,
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Restart toward `to` from wherever the tween currently is, so replacing
    /// an in-flight animation never jumps.
    pub fn retarget(&mut self, to: f32, duration: Duration, easing: Easing) {
        *self = Tween::new(self.value(), to, duration, easing);
    }

    pub fn retarget_delayed(&mut self, to: f32, duration: Duration, easing: Easing, delay: Duration) {
        *self = Tween::new(self.value(), to, duration, easing).with_delay(delay);
    }

    /// Jump to `value` and stop.
    pub fn snap(&mut self, value: f32) {
        *self = Tween::idle(value);
    }

    /// Advance by `dt`. Returns `true` on the tick the tween finishes.
    pub fn tick(&mut self, dt: Duration) -> bool {
        if self.is_finished() {
            return false;
        }
        let mut dt = dt;
        if !self.delay.is_zero() {
            if dt <= self.delay {
                self.delay -= dt;
                return false;
            }
            dt -= self.delay;
            self.delay = Duration::ZERO;
        }
        self.elapsed = (self.elapsed + dt).min(self.duration);
        self.is_finished()
    }

    pub fn progress(&self) -> f32 {
        if self.duration.is_zero() {
            1.0
        } else {
            self.elapsed.as_secs_f32() / self.duration.as_secs_f32()
        }
    }

    pub fn value(&self) -> f32 {
        if self.is_finished() {
            return self.to;
        }
        let t = self.easing.apply(self.progress());
        self.from + (self.to - self.from) * t
    }

    pub fn target(&self) -> f32 {
        self.to
    }

    pub fn is_finished(&self) -> bool {
        self.delay.is_zero() && self.elapsed >= self.duration
    }
}
