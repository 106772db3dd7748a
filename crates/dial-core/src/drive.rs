//! The single mutable drive coordinate shared by drag, decay and transitions.
//!
//! Every source that moves a control's position goes through one
//! [`DriveCell`]. The cell records which source currently owns it; only the
//! owner may write, and ownership passes by [`Driver`] rank.

use crate::range::DriveBounds;

/// Who is currently allowed to move the drive coordinate.
///
/// Variants are declared in ascending priority.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
pub enum Driver {
    #[default]
    None,
    Decay,
    Transition,
    Drag,
}

/// Outcome of a write into the cell.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DriveWrite {
    /// Writer does not own the cell; nothing changed.
    Rejected,
    Applied,
    /// The requested position was outside the bounds and was clamped.
    Clamped,
}

#[derive(Clone, Debug)]
pub struct DriveCell {
    position: f32,
    bounds: DriveBounds,
    driver: Driver,
}

impl DriveCell {
    pub fn new(position: f32, bounds: DriveBounds) -> Self {
        Self {
            position: bounds.clamp(position),
            bounds,
            driver: Driver::None,
        }
    }

    pub fn position(&self) -> f32 {
        self.position
    }

    pub fn bounds(&self) -> DriveBounds {
        self.bounds
    }

    pub fn driver(&self) -> Driver {
        self.driver
    }

    /// Take ownership for `driver`. Succeeds when it ranks at least as high as
    /// the current owner; the previous owner loses the cell silently and is
    /// expected to notice through [`DriveCell::owned_by`].
    pub fn claim(&mut self, driver: Driver) -> bool {
        if driver >= self.driver {
            if self.driver != driver {
                log::debug!("[drive] {:?} -> {:?}", self.driver, driver);
            }
            self.driver = driver;
            true
        } else {
            false
        }
    }

    /// Give the cell back. Ignored unless `driver` is the owner.
    pub fn release(&mut self, driver: Driver) {
        if self.driver == driver {
            self.driver = Driver::None;
        }
    }

    pub fn owned_by(&self, driver: Driver) -> bool {
        self.driver == driver
    }

    pub fn write(&mut self, driver: Driver, position: f32) -> DriveWrite {
        if self.driver != driver || driver == Driver::None {
            return DriveWrite::Rejected;
        }
        let clamped = self.bounds.clamp(position);
        self.position = clamped;
        if clamped == position {
            DriveWrite::Applied
        } else {
            DriveWrite::Clamped
        }
    }

    /// Does `position` sit on either bound?
    pub fn at_bound(&self) -> bool {
        self.position <= self.bounds.lo || self.position >= self.bounds.hi
    }
}
