use crate::error::DialError;

/// Closed interval a controller's drive coordinate lives in.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DriveBounds {
    pub lo: f32,
    pub hi: f32,
}

impl DriveBounds {
    pub fn new(lo: f32, hi: f32) -> Result<Self, DialError> {
        // written as a negation so NaN is rejected too
        if !(lo < hi) {
            return Err(DialError::EmptyDrive { lo, hi });
        }
        Ok(Self { lo, hi })
    }

    #[inline]
    pub fn span(&self) -> f32 {
        self.hi - self.lo
    }

    #[inline]
    pub fn clamp(&self, position: f32) -> f32 {
        position.clamp(self.lo, self.hi)
    }

    #[inline]
    pub fn contains(&self, position: f32) -> bool {
        position >= self.lo && position <= self.hi
    }
}

/// Bounded numeric domain plus the affine map to and from a drive interval.
///
/// The map is increasing: `drive.lo` shows `min`, `drive.hi` shows `max`.
/// Inputs outside either interval are clamped, never rejected.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ValueRange {
    min: f32,
    max: f32,
    drive: DriveBounds,
}

impl ValueRange {
    pub fn new(min: f32, max: f32, drive: DriveBounds) -> Result<Self, DialError> {
        if !(min < max) {
            return Err(DialError::EmptyRange { min, max });
        }
        Ok(Self { min, max, drive })
    }

    pub fn min(&self) -> f32 {
        self.min
    }

    pub fn max(&self) -> f32 {
        self.max
    }

    pub fn drive(&self) -> DriveBounds {
        self.drive
    }

    /// Position within the drive interval as a 0..=1 fraction.
    pub fn fraction(&self, position: f32) -> f32 {
        ((position - self.drive.lo) / self.drive.span()).clamp(0.0, 1.0)
    }

    pub fn value_at(&self, position: f32) -> f32 {
        self.min + self.fraction(position) * (self.max - self.min)
    }

    pub fn rounded_value_at(&self, position: f32) -> i32 {
        self.value_at(position).round() as i32
    }

    pub fn position_for(&self, value: f32) -> f32 {
        let t = ((value - self.min) / (self.max - self.min)).clamp(0.0, 1.0);
        self.drive.lo + t * self.drive.span()
    }

    pub fn clamp_value(&self, value: f32) -> f32 {
        value.clamp(self.min, self.max)
    }
}
