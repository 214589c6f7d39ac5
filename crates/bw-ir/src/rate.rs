//! Signed playback rate relative to the baseline traversal speed.
//!
//! `1.0` traverses one frame's worth of bytes per baseline frame period.
//! The sign is the direction; `0.0` is a frozen cursor (distinct from pause).

use crate::command::Direction;

/// Largest allowed rate magnitude, in multiples of baseline.
pub const MAX_RATE: f64 = 10_000.0;

/// Steps are rounded to this resolution so repeated steps land exactly on zero.
const STEP_RESOLUTION: f64 = 1e6;

/// A signed speed multiplier.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
pub struct PlaybackRate(f64);

impl PlaybackRate {
    pub const BASELINE: Self = Self(1.0);
    pub const FROZEN: Self = Self(0.0);

    /// Create a rate, clamping to `±MAX_RATE`. NaN freezes.
    pub fn new(value: f64) -> Self {
        if value.is_nan() {
            return Self::FROZEN;
        }
        Self(value.clamp(-MAX_RATE, MAX_RATE))
    }

    pub fn value(self) -> f64 {
        self.0
    }

    pub fn magnitude(self) -> f64 {
        libm::fabs(self.0)
    }

    pub fn is_forward(self) -> bool {
        self.0 > 0.0
    }

    pub fn is_frozen(self) -> bool {
        self.0 == 0.0
    }

    /// Plain sign flip, used by boomerang reflection.
    pub fn inverted(self) -> Self {
        Self(-self.0)
    }

    /// Reverse direction; a frozen rate becomes baseline backward.
    pub fn reversed(self) -> Self {
        if self.is_frozen() {
            Self(-Self::BASELINE.0)
        } else {
            self.inverted()
        }
    }

    /// Point the rate in `direction`, keeping its magnitude.
    /// A frozen rate becomes baseline in that direction.
    pub fn with_direction(self, direction: Direction) -> Self {
        let magnitude = if self.is_frozen() {
            Self::BASELINE.0
        } else {
            self.magnitude()
        };
        match direction {
            Direction::Forward => Self(magnitude),
            Direction::Backward => Self(-magnitude),
        }
    }

    /// Replace the magnitude, keeping the current direction (forward if frozen).
    pub fn with_magnitude(self, magnitude: f64) -> Self {
        let magnitude = libm::fabs(magnitude);
        if self.0 < 0.0 {
            Self::new(-magnitude)
        } else {
            Self::new(magnitude)
        }
    }

    /// Step the signed value up (`steps > 0`) or down (`steps < 0`).
    ///
    /// Each step's size depends on the magnitude at the time of the step, so
    /// small rates move finely and large rates move coarsely. Steps are
    /// symmetric: the value passes through zero without special-casing.
    pub fn stepped(self, steps: i8) -> Self {
        let mut value = self.0;
        for _ in 0..steps.unsigned_abs() {
            let step = rate_step(libm::fabs(value));
            value = if steps > 0 { value + step } else { value - step };
            value = libm::round(value * STEP_RESOLUTION) / STEP_RESOLUTION;
        }
        Self::new(value)
    }
}

impl Default for PlaybackRate {
    fn default() -> Self {
        Self::BASELINE
    }
}

/// Step increment for a given rate magnitude.
pub fn rate_step(magnitude: f64) -> f64 {
    if magnitude < 1.0 {
        0.1
    } else if magnitude < 10.0 {
        0.5
    } else {
        1.0
    }
}
