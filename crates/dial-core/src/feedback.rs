//! Side effects the engines hand back to the host's ordinary context.
//!
//! Engines never call out directly. They push [`Effect`]s into a caller-owned
//! `Vec`, at most once per discrete event, and the host drains them (haptics,
//! bookkeeping) at its own pace.

use crate::context::ContextId;

/// Strength of a tactile tick, mirroring the platform's impact styles.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ImpactStyle {
    Light,
    Soft,
    Rigid,
    Heavy,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Effect {
    Haptic(ImpactStyle),
    /// A room's temperature was stored in the room table.
    ValueCommitted { context: ContextId, value: f32 },
    /// The fan slider settled on a new speed.
    FanCommitted(f32),
}

/// Fire-and-forget tactile output.
pub trait FeedbackSink {
    fn impact(&mut self, style: ImpactStyle);
}

/// Forward the haptic effects in `effects` to `sink`, keeping the rest.
pub fn dispatch_haptics(effects: &mut Vec<Effect>, sink: &mut dyn FeedbackSink) {
    effects.retain(|e| match e {
        Effect::Haptic(style) => {
            sink.impact(*style);
            false
        }
        _ => true,
    });
}

/// De-duplicating subscription over a derived value.
///
/// [`ValueWatch::observe`] reports a change only when the observed value
/// differs from the last one it reported, so sampling every frame fires at
/// most once per actual change.
#[derive(Clone, Debug, Default)]
pub struct ValueWatch<T> {
    last: Option<T>,
}

impl<T: PartialEq + Copy> ValueWatch<T> {
    pub fn new() -> Self {
        Self { last: None }
    }

    /// Start watching from `value` without reporting it.
    pub fn primed(value: T) -> Self {
        Self { last: Some(value) }
    }

    pub fn observe(&mut self, value: T) -> Option<T> {
        if self.last == Some(value) {
            return None;
        }
        self.last = Some(value);
        Some(value)
    }

    pub fn last(&self) -> Option<T> {
        self.last
    }
}
