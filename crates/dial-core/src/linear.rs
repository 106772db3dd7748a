//! Fan-speed slider: horizontal drag along a track.
//!
//! Unlike the dial, the slider only reports its value once the finger lifts;
//! while dragging it reports a [`Direction`] for the propeller icons.

use crate::constants::{FAN_ANIMATION, FAN_MAX, FAN_MIN};
use crate::drive::{DriveCell, Driver};
use crate::error::DialError;
use crate::feedback::{Effect, ImpactStyle};
use crate::gesture::{Direction, GestureSample, PointerId};
use crate::range::{DriveBounds, ValueRange};
use crate::tween::{Easing, Tween};
use std::time::Duration;

#[derive(Clone, Debug)]
pub struct FanParams {
    pub min: f32,
    pub max: f32,
    pub initial_value: f32,
    pub animation: Duration,
}

impl Default for FanParams {
    fn default() -> Self {
        Self {
            min: FAN_MIN,
            max: FAN_MAX,
            initial_value: FAN_MIN,
            animation: FAN_ANIMATION,
        }
    }
}

#[derive(Clone, Debug)]
pub struct LinearInputController {
    range: ValueRange,
    /// Thumb position as a 0..1 fraction of the track, so relayout keeps it.
    cell: DriveCell,
    track_length: f32,
    animation: Tween,
    animation_time: Duration,
    /// Thumb offset in px when the current drag began.
    origin: f32,
    last_translation: f32,
    direction: Direction,
    pointer: Option<PointerId>,
    enabled: bool,
    committed: f32,
}

impl LinearInputController {
    pub fn new(params: &FanParams) -> Result<Self, DialError> {
        let range = ValueRange::new(params.min, params.max, DriveBounds::new(0.0, 1.0)?)?;
        let committed = range.clamp_value(params.initial_value);
        let start = range.position_for(committed);
        Ok(Self {
            range,
            cell: DriveCell::new(start, range.drive()),
            track_length: 0.0,
            animation: Tween::idle(start),
            animation_time: params.animation,
            origin: 0.0,
            last_translation: 0.0,
            direction: Direction::Idle,
            pointer: None,
            enabled: true,
            committed,
        })
    }

    pub fn range(&self) -> &ValueRange {
        &self.range
    }

    /// Track width in px; zero until the host has laid the slider out.
    pub fn set_track_length(&mut self, length: f32) {
        let length = if length.is_finite() { length.max(0.0) } else { 0.0 };
        if length <= 0.0 && self.pointer.take().is_some() {
            log::warn!("[fan] track collapsed mid-drag, dropping gesture");
            self.cell.release(Driver::Drag);
            self.direction = Direction::Idle;
        }
        self.track_length = length;
    }

    pub fn track_length(&self) -> f32 {
        self.track_length
    }

    fn is_laid_out(&self) -> bool {
        self.track_length > 0.0
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        if !enabled && self.pointer.take().is_some() {
            self.cell.release(Driver::Drag);
            self.direction = Direction::Idle;
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn is_dragging(&self) -> bool {
        self.pointer.is_some()
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Last committed value.
    pub fn value(&self) -> f32 {
        self.committed
    }

    /// Value under the thumb right now, for rendering only.
    pub fn live_value(&self) -> f32 {
        self.range.value_at(self.cell.position())
    }

    pub fn fraction(&self) -> f32 {
        self.cell.position()
    }

    pub fn thumb_offset(&self) -> f32 {
        self.cell.position() * self.track_length
    }

    pub fn begin(
        &mut self,
        pointer: PointerId,
        sample: GestureSample,
        effects: &mut Vec<Effect>,
    ) -> bool {
        if !self.enabled || !self.is_laid_out() || self.pointer.is_some() {
            return false;
        }
        self.cell.claim(Driver::Drag);
        self.origin = self.thumb_offset();
        self.last_translation = sample.translation.x;
        self.direction = Direction::Idle;
        self.pointer = Some(pointer);
        effects.push(Effect::Haptic(ImpactStyle::Light));
        true
    }

    /// Move the thumb to the gesture's cumulative translation and report the
    /// direction of this step.
    pub fn update(&mut self, pointer: PointerId, sample: GestureSample) -> Option<Direction> {
        if !self.enabled || !self.is_laid_out() || self.pointer != Some(pointer) {
            return None;
        }
        let translation = sample.translation.x;
        let offset = (self.origin + translation).clamp(0.0, self.track_length);
        self.cell.write(Driver::Drag, offset / self.track_length);
        self.direction = Direction::of_delta(translation - self.last_translation);
        self.last_translation = translation;
        Some(self.direction)
    }

    /// Release the thumb and commit whatever value it rests on.
    pub fn end(&mut self, pointer: PointerId, effects: &mut Vec<Effect>) -> Option<f32> {
        if self.pointer != Some(pointer) {
            return None;
        }
        self.pointer = None;
        self.cell.release(Driver::Drag);
        self.direction = Direction::Idle;
        self.committed = self.live_value();
        effects.push(Effect::FanCommitted(self.committed));
        log::debug!("[fan] committed {:.1}", self.committed);
        Some(self.committed)
    }

    /// Programmatically move to `value`, animating the thumb. Ignored while
    /// the user is dragging.
    pub fn set_value(&mut self, value: f32) -> bool {
        if !self.cell.claim(Driver::Transition) {
            return false;
        }
        self.committed = self.range.clamp_value(value);
        let target = self.range.position_for(self.committed);
        self.direction = Direction::of_delta(target - self.cell.position());
        self.animation = Tween::new(
            self.cell.position(),
            target,
            self.animation_time,
            Easing::EaseInOutCubic,
        );
        true
    }

    pub fn tick(&mut self, dt: Duration) {
        if !self.cell.owned_by(Driver::Transition) {
            return;
        }
        self.animation.tick(dt);
        self.cell.write(Driver::Transition, self.animation.value());
        if self.animation.is_finished() {
            self.cell.release(Driver::Transition);
            self.direction = Direction::Idle;
        }
    }
}
