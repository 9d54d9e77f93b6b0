//! Tolerance Window Evaluator.
//!
//! A tolerance widens a free interval by the same number of minutes on both
//! sides. The widened bounds are clipped to `00:00..=24:00`: slack lets an
//! event fit approximately, it never lets a window spill into another day.

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};
use crate::freetime::FreeInterval;
use crate::time::TimeOfDay;

/// Symmetric slack in minutes. Never negative.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(try_from = "i64", into = "i64")]
pub struct Tolerance(u32);

impl Tolerance {
    pub const ZERO: Tolerance = Tolerance(0);

    pub fn from_minutes(minutes: u32) -> Self {
        Tolerance(minutes)
    }

    /// Validate a signed minute count from an external boundary.
    ///
    /// Values beyond `u32::MAX` saturate; they already cover the whole day.
    pub fn new(minutes: i64) -> Result<Self> {
        if minutes < 0 {
            return Err(EngineError::NegativeTolerance(minutes));
        }
        Ok(Tolerance(u32::try_from(minutes).unwrap_or(u32::MAX)))
    }

    pub fn minutes(self) -> u32 {
        self.0
    }
}

impl TryFrom<i64> for Tolerance {
    type Error = EngineError;

    fn try_from(minutes: i64) -> Result<Self> {
        Tolerance::new(minutes)
    }
}

impl From<Tolerance> for i64 {
    fn from(t: Tolerance) -> Self {
        i64::from(t.0)
    }
}

/// A free interval widened by a tolerance. Bounds are inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExpandedWindow {
    pub start: TimeOfDay,
    pub end: TimeOfDay,
}

impl ExpandedWindow {
    /// `(free.start - tolerance, free.end + tolerance)`, clipped to one day.
    pub fn around(free: &FreeInterval, tolerance: Tolerance) -> Self {
        ExpandedWindow {
            start: free.start.saturating_sub_minutes(tolerance.minutes()),
            end: free.end.saturating_add_minutes(tolerance.minutes()),
        }
    }

    /// Point containment within the closed bounds.
    pub fn contains(&self, t: TimeOfDay) -> bool {
        self.start <= t && t <= self.end
    }

    /// Full containment: both `start` and `end` lie within the closed bounds.
    pub fn contains_span(&self, start: TimeOfDay, end: TimeOfDay) -> bool {
        self.contains(start) && self.contains(end)
    }
}
