use crate::constants::ACCENT_FADE;
use crate::tween::{Easing, Tween};
use glam::Vec3;
use std::time::Duration;

/// Operating mode shown by the accent colour of the controls.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum HvacMode {
    #[default]
    Cool,
    Heat,
    Auto,
}

impl HvacMode {
    /// Foreground accent (#60f8fb, #f9ed4e, #6efb7e).
    pub fn accent(self) -> Vec3 {
        match self {
            HvacMode::Cool => rgb8(0x60, 0xf8, 0xfb),
            HvacMode::Heat => rgb8(0xf9, 0xed, 0x4e),
            HvacMode::Auto => rgb8(0x6e, 0xfb, 0x7e),
        }
    }

    /// Dark tint used behind the active mode button.
    pub fn background(self) -> Vec3 {
        match self {
            HvacMode::Cool => rgb8(0x10, 0x29, 0x2a),
            HvacMode::Heat => rgb8(0x29, 0x24, 0x0a),
            HvacMode::Auto => rgb8(0x14, 0x28, 0x16),
        }
    }
}

#[inline]
const fn rgb8_channel(c: u8) -> f32 {
    c as f32 / 255.0
}

fn rgb8(r: u8, g: u8, b: u8) -> Vec3 {
    Vec3::new(rgb8_channel(r), rgb8_channel(g), rgb8_channel(b))
}

/// Cross-fades the accent colour when the mode changes.
#[derive(Clone, Debug)]
pub struct ModeAccent {
    mode: HvacMode,
    from: Vec3,
    to: Vec3,
    from_background: Vec3,
    to_background: Vec3,
    mix: Tween,
    fade: Duration,
}

impl ModeAccent {
    pub fn new(mode: HvacMode) -> Self {
        Self {
            mode,
            from: mode.accent(),
            to: mode.accent(),
            from_background: mode.background(),
            to_background: mode.background(),
            mix: Tween::idle(1.0),
            fade: ACCENT_FADE,
        }
    }

    pub fn mode(&self) -> HvacMode {
        self.mode
    }

    /// Returns `true` if the mode actually changed.
    pub fn set_mode(&mut self, mode: HvacMode) -> bool {
        if mode == self.mode {
            return false;
        }
        // start from the colour on screen so a fast double switch doesn't pop
        self.from = self.color();
        self.to = mode.accent();
        self.from_background = self.background();
        self.to_background = mode.background();
        self.mode = mode;
        self.mix = Tween::new(0.0, 1.0, self.fade, Easing::Linear);
        true
    }

    pub fn tick(&mut self, dt: Duration) {
        self.mix.tick(dt);
    }

    pub fn color(&self) -> Vec3 {
        self.from.lerp(self.to, self.mix.value())
    }

    /// Tint behind the active mode button, faded in step with [`Self::color`].
    pub fn background(&self) -> Vec3 {
        self.from_background
            .lerp(self.to_background, self.mix.value())
    }
}
