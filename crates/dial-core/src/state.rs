//! Render-side snapshot of the control surface.
//!
//! A [`FrameSample`] is produced once per display frame. Renderers upload
//! [`DialUniforms`] as-is (it is `Pod`) and draw one circle per particle.
//! Nothing here should be cached across frames: blends and fades move every
//! tick.

use crate::ambient::ParticleInstance;
use crate::context::{ContextBlend, Palette};
use crate::gesture::Direction;
use bytemuck::{Pod, Zeroable};
use glam::Vec3;
use smallvec::SmallVec;

/// Fixed number of gradient stops handed to the ring shader.
pub const GRADIENT_STOPS: usize = 5;

#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct DialUniforms {
    pub ring_rotation: f32,
    pub bell_amount: f32,
    pub bell_rotation: f32,
    pub blend_factor: f32,
    pub value_fraction: f32,
    pub display_opacity: f32,
    pub controls_opacity: f32,
    pub fan_fraction: f32,
    pub gradient: [[f32; 4]; GRADIENT_STOPS],
    pub accent: [f32; 4],
    pub accent_background: [f32; 4],
}

#[inline]
pub fn rgba(c: Vec3) -> [f32; 4] {
    [c.x, c.y, c.z, 1.0]
}

/// Resample `palette` onto the shader's fixed stop count.
pub fn gradient_stops(palette: &Palette) -> [[f32; 4]; GRADIENT_STOPS] {
    let mut out = [[0.0; 4]; GRADIENT_STOPS];
    for (i, slot) in out.iter_mut().enumerate() {
        let t = i as f32 / (GRADIENT_STOPS - 1) as f32;
        *slot = rgba(palette.sample_at(t));
    }
    out
}

#[derive(Clone, Debug)]
pub struct FrameSample {
    pub uniforms: DialUniforms,
    pub particles: SmallVec<[ParticleInstance; 8]>,
    /// Temperature as displayed.
    pub temperature: i32,
    pub blend: ContextBlend,
    pub fan_value: f32,
    pub fan_thumb_offset: f32,
    pub fan_direction: Direction,
}
