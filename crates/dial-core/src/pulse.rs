//! The bell: a bulge in the outer ticks that swells under the finger and
//! flashes on room changes. Rendering interpolates between a flat and an
//! expanded tick path using [`BellPulse::amount`].

use crate::constants::{BELL_EXPAND_DURATION, BELL_INTRO_FALL, BELL_INTRO_RISE, BELL_INTRO_ROTATION};
use crate::tween::{Easing, Tween};
use std::time::Duration;

// Ease with a slight overshoot for the intro swell.
const INTRO_RISE_EASING: Easing = Easing::Bezier(0.25, 0.1, 0.25, 1.37);
const INTRO_FALL_EASING: Easing = Easing::Bezier(0.25, 0.1, 0.25, 1.0);

#[derive(Clone, Debug)]
pub struct BellPulse {
    amount: Tween,
    /// Second leg of a rise-then-fall sequence.
    queued_fall: Option<(Duration, Easing)>,
    /// Swing-in rotation for the first appearance.
    rotation: Tween,
}

impl Default for BellPulse {
    fn default() -> Self {
        Self::new()
    }
}

impl BellPulse {
    pub fn new() -> Self {
        Self {
            amount: Tween::idle(0.0),
            queued_fall: None,
            rotation: Tween::idle(0.0),
        }
    }

    /// Bell as it first appears: swings in from an angle while swelling and
    /// then collapsing.
    pub fn with_intro() -> Self {
        let mut bell = Self::new();
        bell.rotation = Tween::new(
            BELL_INTRO_ROTATION,
            0.0,
            BELL_INTRO_RISE,
            INTRO_FALL_EASING,
        );
        bell.amount = Tween::new(0.0, 1.0, BELL_INTRO_RISE, INTRO_RISE_EASING);
        bell.queued_fall = Some((BELL_INTRO_FALL, INTRO_FALL_EASING));
        bell
    }

    pub fn amount(&self) -> f32 {
        self.amount.value()
    }

    pub fn rotation(&self) -> f32 {
        self.rotation.value()
    }

    pub fn is_animating(&self) -> bool {
        !self.amount.is_finished() || self.queued_fall.is_some() || !self.rotation.is_finished()
    }

    /// Swell fully, e.g. when a drag begins.
    pub fn expand(&mut self) {
        self.queued_fall = None;
        self.amount
            .retarget(1.0, BELL_EXPAND_DURATION, Easing::Linear);
    }

    /// Collapse back to flat.
    pub fn relax(&mut self) {
        self.queued_fall = None;
        self.amount
            .retarget(0.0, BELL_EXPAND_DURATION, Easing::Linear);
    }

    /// Swell over `rise`, then collapse over `fall`. Replaces whatever the bell
    /// was doing, starting from its current amount.
    pub fn pulse(&mut self, rise: Duration, fall: Duration) {
        self.amount.retarget(1.0, rise, Easing::EaseOutCubic);
        self.queued_fall = Some((fall, Easing::EaseOutCubic));
    }

    pub fn tick(&mut self, dt: Duration) {
        self.rotation.tick(dt);
        self.amount.tick(dt);
        if self.amount.is_finished() {
            if let Some((fall, easing)) = self.queued_fall.take() {
                self.amount.retarget(0.0, fall, easing);
            }
        }
    }
}
