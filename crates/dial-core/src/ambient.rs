//! Glowing bubbles that creep around the ring while the thermostat is on.
//!
//! Each bubble walks through [`AMBIENT_STEPS`] positions. A step is one
//! linear swell from the minimum scale to full size; only when that swell has
//! completed does the bubble move on, nudging its angle forward and drawing a
//! fresh radial jitter. A tick completes at most one step, so a long frame
//! delays the walk instead of skipping positions.

use crate::angular::DialGeometry;
use crate::constants::{
    AMBIENT_CYCLE, AMBIENT_JITTER_SPAN, AMBIENT_MIN_SCALE, AMBIENT_REST_JITTER,
    AMBIENT_START_ARC_PX, AMBIENT_STEPS,
};
use bytemuck::{Pod, Zeroable};
use rand::prelude::*;
use smallvec::SmallVec;
use std::f32::consts::{FRAC_PI_2, PI};
use std::time::Duration;

/// Static layout of one bubble relative to the ring.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AmbientElementConfig {
    /// Angular lead over the first bubble, as arc length in px.
    pub arc_offset_px: f32,
    pub rx_offset: f32,
    pub ry_offset: f32,
    /// Stagger before the first step after enabling.
    pub delay: Duration,
    pub max_radius: f32,
}

impl Default for AmbientElementConfig {
    fn default() -> Self {
        Self {
            arc_offset_px: 0.0,
            rx_offset: 0.0,
            ry_offset: 0.0,
            delay: Duration::ZERO,
            max_radius: 20.0,
        }
    }
}

const fn bubble(arc: f32, rx: f32, ry: f32, delay_ms: u64, max_radius: f32) -> AmbientElementConfig {
    AmbientElementConfig {
        arc_offset_px: arc,
        rx_offset: rx,
        ry_offset: ry,
        delay: Duration::from_millis(delay_ms),
        max_radius,
    }
}

/// The eight-bubble trail shown behind the dial.
pub const DEFAULT_BUBBLES: [AmbientElementConfig; 8] = [
    bubble(0.0, 12.0, 7.0, 0, 22.0),
    bubble(20.0, -15.0, -12.0, 30, 22.0),
    bubble(20.0, 17.0, 10.0, 50, 18.0),
    bubble(22.0, -10.0, -14.0, 70, 18.0),
    bubble(24.0, 17.0, 12.0, 100, 16.0),
    bubble(24.0, -12.0, -17.0, 110, 16.0),
    bubble(28.0, 17.0, 12.0, 140, 12.0),
    bubble(30.0, -12.0, 7.0, 160, 12.0),
];

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AmbientParams {
    pub steps: usize,
    pub cycle: Duration,
    /// Start over after the last step instead of resting fully expanded.
    pub repeat: bool,
}

impl Default for AmbientParams {
    fn default() -> Self {
        Self {
            steps: AMBIENT_STEPS,
            cycle: AMBIENT_CYCLE,
            repeat: false,
        }
    }
}

/// Render instance for one bubble.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct ParticleInstance {
    pub pos: [f32; 2],
    pub radius: f32,
    pub _pad: f32,
}

#[derive(Clone, Debug)]
pub struct AmbientElement {
    config: AmbientElementConfig,
    theta_offset: f32,
    step_index: usize,
    /// 0..1 through the current step's swell.
    progress: f32,
    theta: f32,
    jitter: f32,
    delay_left: Duration,
    done: bool,
}

impl AmbientElement {
    fn new(config: AmbientElementConfig, radius: f32, initial_theta: f32) -> Self {
        Self {
            config,
            theta_offset: config.arc_offset_px / radius,
            step_index: 0,
            progress: 0.0,
            theta: initial_theta,
            jitter: AMBIENT_REST_JITTER,
            delay_left: Duration::ZERO,
            done: false,
        }
    }

    pub fn step_index(&self) -> usize {
        self.step_index
    }

    pub fn theta(&self) -> f32 {
        self.theta
    }

    pub fn jitter(&self) -> f32 {
        self.jitter
    }

    pub fn is_done(&self) -> bool {
        self.done
    }

    pub fn scale(&self) -> f32 {
        if self.done {
            1.0
        } else {
            AMBIENT_MIN_SCALE + (1.0 - AMBIENT_MIN_SCALE) * self.progress
        }
    }

    fn reset(&mut self, initial_theta: f32) {
        self.step_index = 0;
        self.progress = 0.0;
        self.theta = initial_theta;
        self.jitter = AMBIENT_REST_JITTER;
        self.delay_left = Duration::ZERO;
        self.done = false;
    }
}

#[derive(Clone, Debug)]
pub struct AmbientField {
    elements: SmallVec<[AmbientElement; 8]>,
    geometry: DialGeometry,
    params: AmbientParams,
    initial_theta: f32,
    rng: StdRng,
    enabled: bool,
    paused: bool,
}

impl AmbientField {
    pub fn new(
        configs: &[AmbientElementConfig],
        geometry: DialGeometry,
        params: AmbientParams,
        seed: u64,
    ) -> Self {
        let radius = geometry.radius.max(1.0);
        let initial_theta = FRAC_PI_2 + AMBIENT_START_ARC_PX / radius;
        let elements = configs
            .iter()
            .map(|c| AmbientElement::new(*c, radius, initial_theta))
            .collect();
        Self {
            elements,
            geometry,
            params: AmbientParams {
                steps: params.steps.max(1),
                ..params
            },
            initial_theta,
            rng: StdRng::seed_from_u64(seed),
            enabled: false,
            paused: false,
        }
    }

    pub fn with_defaults(geometry: DialGeometry, seed: u64) -> Self {
        Self::new(&DEFAULT_BUBBLES, geometry, AmbientParams::default(), seed)
    }

    pub fn reseed(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
    }

    pub fn elements(&self) -> &[AmbientElement] {
        &self.elements
    }

    pub fn initial_theta(&self) -> f32 {
        self.initial_theta
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    fn step_duration(&self) -> Duration {
        self.params.cycle / self.params.steps as u32
    }

    fn theta_step(&self) -> f32 {
        PI / self.params.steps as f32
    }

    /// Enabling restarts every bubble from step 0 after its stagger delay;
    /// disabling snaps every bubble back to its resting phase and scale.
    pub fn set_enabled(&mut self, enabled: bool) {
        if self.enabled == enabled {
            return;
        }
        self.enabled = enabled;
        let initial = self.initial_theta;
        for e in &mut self.elements {
            e.reset(initial);
            if enabled {
                e.delay_left = e.config.delay;
            }
        }
        log::debug!("[ambient] enabled={}", enabled);
    }

    /// Freeze or resume time without resetting any bubble.
    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }

    pub fn tick(&mut self, dt: Duration) {
        if !self.enabled || self.paused {
            return;
        }
        let step_secs = self.step_duration().as_secs_f32();
        let theta_step = self.theta_step();
        let steps = self.params.steps;
        let repeat = self.params.repeat;
        let initial = self.initial_theta;

        for e in &mut self.elements {
            if e.done {
                continue;
            }
            let mut dt = dt;
            if !e.delay_left.is_zero() {
                if dt <= e.delay_left {
                    e.delay_left -= dt;
                    continue;
                }
                dt -= e.delay_left;
                e.delay_left = Duration::ZERO;
            }
            e.progress = if step_secs > 0.0 {
                (e.progress + dt.as_secs_f32() / step_secs).min(1.0)
            } else {
                1.0
            };
            if e.progress < 1.0 {
                continue;
            }

            // step finished: move on and re-roll the jitter
            e.theta += theta_step;
            e.jitter = (self.rng.gen::<f32>() * 2.0 - 1.0) * AMBIENT_JITTER_SPAN;
            e.step_index += 1;
            if e.step_index >= steps {
                if repeat {
                    e.step_index = 0;
                    e.theta = initial;
                    e.progress = 0.0;
                } else {
                    e.step_index = steps - 1;
                    e.done = true;
                }
            } else {
                e.progress = 0.0;
            }
        }
    }

    /// Current bubble instances in screen space.
    pub fn particles(&self) -> SmallVec<[ParticleInstance; 8]> {
        let c = self.geometry.pivot;
        let r = self.geometry.radius;
        self.elements
            .iter()
            .map(|e| {
                let angle = e.theta + e.theta_offset;
                let x = c.x + (r + e.config.rx_offset + e.jitter) * angle.cos();
                let y = c.y + (r + e.config.ry_offset + e.jitter) * angle.sin();
                ParticleInstance {
                    pos: [x, y],
                    radius: e.config.max_radius * e.scale(),
                    _pad: 0.0,
                }
            })
            .collect()
    }
}
