//! The whole thermostat control surface: dial, fan slider, rooms, mode and
//! the decorative animations around them.
//!
//! Hosts feed gestures and commands in, call [`ThermostatSurface::tick`] once
//! per frame, and drain [`Effect`]s on their own schedule.

use crate::ambient::{AmbientElementConfig, AmbientField, AmbientParams, DEFAULT_BUBBLES};
use crate::angular::{AngularInputController, DialParams, Release};
use crate::constants::{
    CONTEXT_SETTLE_DURATION, CONTROLS_DIMMED_OPACITY, DIM_DELAY, DIM_FADE,
    DISPLAY_DIMMED_OPACITY, FAN_MIN, FAN_ON_SPEED,
};
use crate::context::{ContextId, ContextTransitionEngine, PaletteTable, RoomValueTable};
use crate::error::DialError;
use crate::feedback::{dispatch_haptics, Effect, FeedbackSink, ImpactStyle, ValueWatch};
use crate::gesture::{Direction, GestureSample, PointerId};
use crate::linear::{FanParams, LinearInputController};
use crate::mode::{HvacMode, ModeAccent};
use crate::pulse::BellPulse;
use crate::state::{gradient_stops, rgba, DialUniforms, FrameSample};
use crate::tween::{Easing, Tween};
use std::time::Duration;

#[derive(Clone, Debug)]
pub struct SurfaceParams {
    pub dial: DialParams,
    pub fan: FanParams,
    pub ambient: AmbientParams,
    pub bubbles: Vec<AmbientElementConfig>,
    pub initial_room: ContextId,
    pub mode: HvacMode,
    pub enabled: bool,
    /// Fan speed applied when the thermostat is switched on.
    pub fan_on_speed: f32,
    pub settle_duration: Duration,
    /// Seed for the ambient jitter.
    pub seed: u64,
}

impl Default for SurfaceParams {
    fn default() -> Self {
        Self {
            dial: DialParams::default(),
            fan: FanParams::default(),
            ambient: AmbientParams::default(),
            bubbles: DEFAULT_BUBBLES.to_vec(),
            initial_room: ContextId(0),
            mode: HvacMode::Cool,
            enabled: false,
            fan_on_speed: FAN_ON_SPEED,
            settle_duration: CONTEXT_SETTLE_DURATION,
            seed: 42,
        }
    }
}

pub struct ThermostatSurface {
    dial: AngularInputController,
    fan: LinearInputController,
    contexts: ContextTransitionEngine,
    palettes: PaletteTable,
    rooms: RoomValueTable,
    bell: BellPulse,
    ambient: AmbientField,
    accent: ModeAccent,
    display_opacity: Tween,
    controls_opacity: Tween,
    enabled: bool,
    fan_on_speed: f32,
    settle_duration: Duration,
    temperature_watch: ValueWatch<i32>,
    /// Room value to settle to once the current drag lets go.
    pending_settle: Option<f32>,
    effects: Vec<Effect>,
}

impl ThermostatSurface {
    pub fn new(params: SurfaceParams, palettes: PaletteTable) -> Result<Self, DialError> {
        let dial = AngularInputController::new(&params.dial)?;
        let fan = LinearInputController::new(&params.fan)?;
        let mut rooms = RoomValueTable::new(params.dial.initial_value);
        rooms.value_or_insert(params.initial_room);
        let ambient = AmbientField::new(
            &params.bubbles,
            params.dial.geometry,
            params.ambient,
            params.seed,
        );
        let watch = ValueWatch::primed(dial.rounded_value());
        let (display, controls) = if params.enabled {
            (1.0, 1.0)
        } else {
            (DISPLAY_DIMMED_OPACITY, CONTROLS_DIMMED_OPACITY)
        };

        let mut surface = Self {
            dial,
            fan,
            contexts: ContextTransitionEngine::new(params.initial_room),
            palettes,
            rooms,
            bell: BellPulse::with_intro(),
            ambient,
            accent: ModeAccent::new(params.mode),
            display_opacity: Tween::idle(display),
            controls_opacity: Tween::idle(controls),
            enabled: params.enabled,
            fan_on_speed: params.fan_on_speed,
            settle_duration: params.settle_duration,
            temperature_watch: watch,
            pending_settle: None,
            effects: Vec::new(),
        };
        surface.dial.set_enabled(params.enabled);
        surface.fan.set_enabled(params.enabled);
        surface.ambient.set_enabled(params.enabled);
        if params.enabled {
            surface.fan.set_value(surface.fan_on_speed);
        }
        Ok(surface)
    }

    pub fn dial(&self) -> &AngularInputController {
        &self.dial
    }

    pub fn fan(&self) -> &LinearInputController {
        &self.fan
    }

    pub fn contexts(&self) -> &ContextTransitionEngine {
        &self.contexts
    }

    pub fn rooms(&self) -> &RoomValueTable {
        &self.rooms
    }

    pub fn ambient(&self) -> &AmbientField {
        &self.ambient
    }

    pub fn bell(&self) -> &BellPulse {
        &self.bell
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn mode(&self) -> HvacMode {
        self.accent.mode()
    }

    pub fn room(&self) -> ContextId {
        self.contexts.target()
    }

    pub fn temperature(&self) -> i32 {
        self.dial.rounded_value()
    }

    /// Take every effect queued since the last call.
    pub fn take_effects(&mut self) -> Vec<Effect> {
        std::mem::take(&mut self.effects)
    }

    /// Send queued haptics to `sink` and return the remaining effects.
    pub fn dispatch_effects(&mut self, sink: &mut dyn FeedbackSink) -> Vec<Effect> {
        let mut effects = self.take_effects();
        dispatch_haptics(&mut effects, sink);
        effects
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        if self.enabled == enabled {
            return;
        }
        self.enabled = enabled;
        let was_dragging = self.dial.is_dragging();
        let was_coasting = self.dial.is_coasting();
        self.dial.set_enabled(enabled);
        if !enabled {
            self.finish_dropped_dial(was_dragging, was_coasting);
        }
        self.fan.set_enabled(enabled);
        self.ambient.set_enabled(enabled);
        if enabled {
            self.fan.set_value(self.fan_on_speed);
            self.effects.push(Effect::Haptic(ImpactStyle::Rigid));
            self.display_opacity
                .retarget(1.0, DIM_FADE, Easing::Linear);
            self.controls_opacity
                .retarget(1.0, DIM_FADE, Easing::Linear);
        } else {
            self.fan.set_value(FAN_MIN);
            self.effects.push(Effect::Haptic(ImpactStyle::Heavy));
            self.display_opacity.retarget_delayed(
                DISPLAY_DIMMED_OPACITY,
                DIM_FADE,
                Easing::Linear,
                DIM_DELAY,
            );
            self.controls_opacity.retarget_delayed(
                CONTROLS_DIMMED_OPACITY,
                DIM_FADE,
                Easing::Linear,
                DIM_DELAY,
            );
        }
        log::info!("[surface] enabled={} fan={:.0}", enabled, self.fan.value());
    }

    /// Pause or resume the ambient bubbles without resetting them.
    pub fn set_ambient_paused(&mut self, paused: bool) {
        self.ambient.set_paused(paused);
    }

    pub fn set_mode(&mut self, mode: HvacMode) -> bool {
        if !self.accent.set_mode(mode) {
            return false;
        }
        self.effects.push(Effect::Haptic(ImpactStyle::Rigid));
        log::info!("[surface] mode -> {:?}", mode);
        true
    }

    /// Switch the dial to another room.
    ///
    /// The outgoing room keeps the value the dial shows (or was settling
    /// toward), the palettes start cross-fading, the bell flashes and the dial
    /// animates to the incoming room's stored value.
    pub fn select_room(&mut self, room: ContextId) -> bool {
        let outgoing = self.contexts.target();
        if room == outgoing {
            return false;
        }
        let value = self
            .dial
            .settle_target_value()
            .or(self.pending_settle)
            .unwrap_or_else(|| self.dial.value());
        self.commit_room_value(outgoing, value);

        self.contexts.request(room);
        let blend = self.contexts.duration();
        self.bell.pulse(blend / 3, blend - blend / 3);

        let incoming = self.rooms.value_or_insert(room);
        if self.dial.settle_to(incoming, self.settle_duration) {
            self.pending_settle = None;
        } else {
            log::debug!("[surface] dial busy, deferring settle to {:.1}", incoming);
            self.pending_settle = Some(incoming);
        }
        log::info!("[surface] room {:?} -> {:?} ({:.1})", outgoing, room, incoming);
        true
    }

    /// Disabling cut a drag or coast short. A room switch that was waiting
    /// for the finger settles now; otherwise the value left on the dial is
    /// stored for the current room.
    fn finish_dropped_dial(&mut self, was_dragging: bool, was_coasting: bool) {
        if let Some(value) = self.pending_settle.take() {
            self.dial.settle_to(value, self.settle_duration);
        } else if was_dragging || was_coasting {
            self.commit_room_value(self.contexts.target(), self.dial.value());
        }
    }

    fn commit_room_value(&mut self, room: ContextId, value: f32) {
        self.rooms.commit(room, value);
        self.effects.push(Effect::ValueCommitted {
            context: room,
            value,
        });
    }

    fn observe_temperature(&mut self) {
        if self
            .temperature_watch
            .observe(self.dial.rounded_value())
            .is_some()
        {
            self.effects.push(Effect::Haptic(ImpactStyle::Soft));
        }
    }

    pub fn dial_begin(&mut self, pointer: PointerId, sample: GestureSample) -> bool {
        if !self.dial.begin(pointer, sample, &mut self.effects) {
            return false;
        }
        // deferred settles only outlive the drag that deferred them
        self.pending_settle = None;
        self.bell.expand();
        true
    }

    /// Live temperature while dragging.
    pub fn dial_update(&mut self, pointer: PointerId, sample: GestureSample) -> Option<i32> {
        self.dial.update(pointer, sample)?;
        self.observe_temperature();
        Some(self.dial.rounded_value())
    }

    pub fn dial_end(&mut self, pointer: PointerId, sample: GestureSample) -> Option<Release> {
        let release = self.dial.end(pointer, sample)?;
        self.bell.relax();
        if let Some(value) = self.pending_settle.take() {
            // a room switch arrived mid-drag; it wins over any fling
            self.dial.settle_to(value, self.settle_duration);
            return Some(release);
        }
        if release == Release::Tap {
            self.commit_room_value(self.contexts.target(), self.dial.value());
        }
        Some(release)
    }

    /// Lay out the fan track (px). Zero disables fan gestures.
    pub fn set_fan_track_length(&mut self, length: f32) {
        self.fan.set_track_length(length);
    }

    pub fn fan_begin(&mut self, pointer: PointerId, sample: GestureSample) -> bool {
        self.fan.begin(pointer, sample, &mut self.effects)
    }

    pub fn fan_update(&mut self, pointer: PointerId, sample: GestureSample) -> Option<Direction> {
        self.fan.update(pointer, sample)
    }

    pub fn fan_end(&mut self, pointer: PointerId) -> Option<f32> {
        self.fan.end(pointer, &mut self.effects)
    }

    /// Advance every animation by `dt` and sample the frame.
    pub fn tick(&mut self, dt: Duration) -> FrameSample {
        let dial = self.dial.tick(dt);
        if dial.decay_settled {
            self.commit_room_value(self.contexts.target(), self.dial.value());
        }
        if self.contexts.tick(dt) {
            log::debug!("[surface] blend settled on {:?}", self.contexts.target());
        }
        self.bell.tick(dt);
        self.fan.tick(dt);
        self.accent.tick(dt);
        self.display_opacity.tick(dt);
        self.controls_opacity.tick(dt);
        self.ambient.tick(dt);
        self.observe_temperature();
        self.sample()
    }

    /// Visual state for this instant.
    pub fn sample(&self) -> FrameSample {
        let palette = self.contexts.sample(&self.palettes);
        let blend = self.contexts.blend();
        let uniforms = DialUniforms {
            ring_rotation: self.dial.ring_rotation(),
            bell_amount: self.bell.amount(),
            bell_rotation: self.bell.rotation(),
            blend_factor: blend.factor,
            value_fraction: self.dial.fraction(),
            display_opacity: self.display_opacity.value(),
            controls_opacity: self.controls_opacity.value(),
            fan_fraction: self.fan.fraction(),
            gradient: gradient_stops(&palette),
            accent: rgba(self.accent.color()),
            accent_background: rgba(self.accent.background()),
        };
        FrameSample {
            uniforms,
            particles: self.ambient.particles(),
            temperature: self.dial.rounded_value(),
            blend,
            fan_value: self.fan.value(),
            fan_thumb_offset: self.fan.thumb_offset(),
            fan_direction: self.fan.direction(),
        }
    }
}
