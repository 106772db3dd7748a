use thiserror::Error;

/// Construction-time validation failures.
///
/// Runtime input (pointer samples, velocities, track sizes) never produces an
/// error: degenerate geometry is clamped or skipped where it is consumed.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DialError {
    #[error("empty value range: min {min} must be below max {max}")]
    EmptyRange { min: f32, max: f32 },
    #[error("empty drive interval: lo {lo} must be below hi {hi}")]
    EmptyDrive { lo: f32, hi: f32 },
    #[error("invalid colour {0:?}: expected #rrggbb")]
    InvalidColor(String),
    #[error("palette needs at least two stops, got {0}")]
    ShortPalette(usize),
}
