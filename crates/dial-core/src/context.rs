//! Rooms ("contexts"): their palettes, their remembered values, and the timed
//! cross-fade between them.

use crate::constants::CONTEXT_BLEND_DURATION;
use crate::error::DialError;
use fnv::FnvHashMap;
use glam::Vec3;
use smallvec::SmallVec;
use std::time::Duration;

/// Index of a room in the host's room list.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContextId(pub usize);

/// Parse `#rrggbb` (leading `#` optional) into linear 0..1 channels.
pub fn parse_hex(s: &str) -> Result<Vec3, DialError> {
    let hex = s.strip_prefix('#').unwrap_or(s);
    if hex.len() != 6 || !hex.is_ascii() {
        return Err(DialError::InvalidColor(s.to_string()));
    }
    let channel = |i: usize| {
        u8::from_str_radix(&hex[i..i + 2], 16)
            .map(|c| c as f32 / 255.0)
            .map_err(|_| DialError::InvalidColor(s.to_string()))
    };
    Ok(Vec3::new(channel(0)?, channel(2)?, channel(4)?))
}

/// Gradient stops swept around the ring, evenly spaced.
#[derive(Clone, Debug, PartialEq)]
pub struct Palette {
    stops: SmallVec<[Vec3; 5]>,
}

impl Palette {
    pub fn new(stops: &[Vec3]) -> Result<Self, DialError> {
        if stops.len() < 2 {
            return Err(DialError::ShortPalette(stops.len()));
        }
        Ok(Self {
            stops: SmallVec::from_slice(stops),
        })
    }

    pub fn from_hex(stops: &[&str]) -> Result<Self, DialError> {
        let parsed = stops
            .iter()
            .map(|s| parse_hex(s))
            .collect::<Result<SmallVec<[Vec3; 5]>, _>>()?;
        if parsed.len() < 2 {
            return Err(DialError::ShortPalette(parsed.len()));
        }
        Ok(Self { stops: parsed })
    }

    pub fn stops(&self) -> &[Vec3] {
        &self.stops
    }

    /// Colour at `t` in [0, 1] along the gradient.
    pub fn sample_at(&self, t: f32) -> Vec3 {
        let last = self.stops.len() - 1;
        let x = t.clamp(0.0, 1.0) * last as f32;
        let i = (x.floor() as usize).min(last - 1);
        self.stops[i].lerp(self.stops[i + 1], x - i as f32)
    }

    /// Per-channel mix of two palettes. Differing stop counts are resampled to
    /// the longer of the two.
    pub fn mix(&self, other: &Palette, t: f32) -> Palette {
        let t = t.clamp(0.0, 1.0);
        if self.stops.len() == other.stops.len() {
            let stops = self
                .stops
                .iter()
                .zip(other.stops.iter())
                .map(|(a, b)| a.lerp(*b, t))
                .collect();
            return Palette { stops };
        }
        let n = self.stops.len().max(other.stops.len());
        let stops = (0..n)
            .map(|i| {
                let u = i as f32 / (n - 1) as f32;
                self.sample_at(u).lerp(other.sample_at(u), t)
            })
            .collect();
        Palette { stops }
    }
}

/// Palettes per room, with a fallback for rooms that have none.
#[derive(Clone, Debug)]
pub struct PaletteTable {
    palettes: FnvHashMap<ContextId, Palette>,
    fallback: Palette,
}

impl PaletteTable {
    pub fn new(fallback: Palette) -> Self {
        Self {
            palettes: FnvHashMap::default(),
            fallback,
        }
    }

    pub fn insert(&mut self, id: ContextId, palette: Palette) {
        self.palettes.insert(id, palette);
    }

    pub fn get(&self, id: ContextId) -> &Palette {
        self.palettes.get(&id).unwrap_or(&self.fallback)
    }

    pub fn len(&self) -> usize {
        self.palettes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.palettes.is_empty()
    }
}

/// Last committed value per room, in the order rooms were first seen.
#[derive(Clone, Debug)]
pub struct RoomValueTable {
    entries: Vec<(ContextId, f32)>,
    default_value: f32,
}

impl RoomValueTable {
    pub fn new(default_value: f32) -> Self {
        Self {
            entries: Vec::new(),
            default_value,
        }
    }

    pub fn default_value(&self) -> f32 {
        self.default_value
    }

    /// Stored value, creating the entry with the default on first sight.
    pub fn value_or_insert(&mut self, id: ContextId) -> f32 {
        match self.entries.iter().find(|(c, _)| *c == id) {
            Some((_, v)) => *v,
            None => {
                self.entries.push((id, self.default_value));
                self.default_value
            }
        }
    }

    pub fn get(&self, id: ContextId) -> Option<f32> {
        self.entries
            .iter()
            .find(|(c, _)| *c == id)
            .map(|(_, v)| *v)
    }

    pub fn commit(&mut self, id: ContextId, value: f32) {
        match self.entries.iter_mut().find(|(c, _)| *c == id) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((id, value)),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (ContextId, f32)> + '_ {
        self.entries.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum BlendState {
    Stable(ContextId),
    Blending {
        from: ContextId,
        to: ContextId,
        factor: f32,
    },
}

/// Snapshot of the blend for one frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ContextBlend {
    pub from: ContextId,
    pub to: ContextId,
    pub factor: f32,
}

/// Two-context cross-fade. A new request while blending restarts from the
/// in-flight target instead of queueing, so at most two contexts ever mix.
#[derive(Clone, Debug)]
pub struct ContextTransitionEngine {
    state: BlendState,
    elapsed: Duration,
    duration: Duration,
}

impl ContextTransitionEngine {
    pub fn new(initial: ContextId) -> Self {
        Self::with_duration(initial, CONTEXT_BLEND_DURATION)
    }

    pub fn with_duration(initial: ContextId, duration: Duration) -> Self {
        Self {
            state: BlendState::Stable(initial),
            elapsed: Duration::ZERO,
            duration,
        }
    }

    pub fn state(&self) -> BlendState {
        self.state
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Context the engine is showing or heading to.
    pub fn target(&self) -> ContextId {
        match self.state {
            BlendState::Stable(c) => c,
            BlendState::Blending { to, .. } => to,
        }
    }

    pub fn is_blending(&self) -> bool {
        matches!(self.state, BlendState::Blending { .. })
    }

    /// Ask for `next`. Returns `true` when a new blend started.
    pub fn request(&mut self, next: ContextId) -> bool {
        let from = self.target();
        if from == next {
            return false;
        }
        if let BlendState::Blending { factor, .. } = self.state {
            log::debug!(
                "[context] restart blend {:?} -> {:?} (abandoned at {:.2})",
                from,
                next,
                factor
            );
        }
        self.state = BlendState::Blending {
            from,
            to: next,
            factor: 0.0,
        };
        self.elapsed = Duration::ZERO;
        true
    }

    /// Advance the blend. Returns `true` on the tick it collapses.
    pub fn tick(&mut self, dt: Duration) -> bool {
        let BlendState::Blending { from, to, .. } = self.state else {
            return false;
        };
        self.elapsed += dt;
        if self.duration.is_zero() || self.elapsed >= self.duration {
            self.state = BlendState::Stable(to);
            self.elapsed = Duration::ZERO;
            return true;
        }
        let factor = self.elapsed.as_secs_f32() / self.duration.as_secs_f32();
        self.state = BlendState::Blending { from, to, factor };
        false
    }

    pub fn blend(&self) -> ContextBlend {
        match self.state {
            BlendState::Stable(c) => ContextBlend {
                from: c,
                to: c,
                factor: 1.0,
            },
            BlendState::Blending { from, to, factor } => ContextBlend { from, to, factor },
        }
    }

    /// Interpolated palette for this instant. Call every frame; the result is
    /// only valid for the current blend factor.
    pub fn sample(&self, palettes: &PaletteTable) -> Palette {
        let b = self.blend();
        palettes.get(b.from).mix(palettes.get(b.to), b.factor)
    }
}
