//! Free-Time Calculator: the complement of a day's busy intervals within a
//! day window, computed for all seven weekdays.
//!
//! Busy intervals are clipped to the window first, then a cursor walks the
//! merged sequence and emits the gaps. The resulting [`FreeTimeMap`] always
//! has an entry for every weekday.

use std::collections::BTreeMap;
use std::fmt;

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

use crate::error::{EngineError, Result};
use crate::normalize::BusyInterval;
use crate::schedule::WeekSchedule;
use crate::time::{Day, TimeOfDay, DEFAULT_DAY_END, DEFAULT_DAY_START};

/// The bounding period of each day considered for free time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "WindowBounds")]
pub struct DayWindow {
    pub start: TimeOfDay,
    pub end: TimeOfDay,
}

#[derive(Deserialize)]
struct WindowBounds {
    start: TimeOfDay,
    end: TimeOfDay,
}

impl TryFrom<WindowBounds> for DayWindow {
    type Error = EngineError;

    fn try_from(b: WindowBounds) -> Result<Self> {
        DayWindow::new(b.start, b.end)
    }
}

impl DayWindow {
    /// Fails with [`EngineError::InvalidWindow`] unless `start < end`.
    pub fn new(start: TimeOfDay, end: TimeOfDay) -> Result<Self> {
        if start >= end {
            return Err(EngineError::InvalidWindow {
                start: start.to_string(),
                end: end.to_string(),
            });
        }
        Ok(DayWindow { start, end })
    }

    /// Parse both bounds from `HH:MM` strings and validate.
    pub fn parse(start: &str, end: &str) -> Result<Self> {
        DayWindow::new(start.parse()?, end.parse()?)
    }

    pub fn duration_minutes(&self) -> i64 {
        self.start.minutes_until(self.end)
    }

    /// The part of `busy` inside this window, or `None` if they do not overlap.
    pub fn clip(&self, busy: &BusyInterval) -> Option<BusyInterval> {
        if busy.start >= self.end || busy.end <= self.start {
            return None;
        }
        BusyInterval::new(busy.start.max(self.start), busy.end.min(self.end))
    }
}

impl Default for DayWindow {
    /// `08:00` to `22:00`.
    fn default() -> Self {
        DayWindow {
            start: DEFAULT_DAY_START,
            end: DEFAULT_DAY_END,
        }
    }
}

impl fmt::Display for DayWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

/// A gap between busy periods, serialized as an `["HH:MM", "HH:MM"]` pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(into = "(TimeOfDay, TimeOfDay)")]
pub struct FreeInterval {
    pub start: TimeOfDay,
    pub end: TimeOfDay,
}

impl FreeInterval {
    pub fn duration_minutes(&self) -> i64 {
        self.start.minutes_until(self.end)
    }
}

impl From<FreeInterval> for (TimeOfDay, TimeOfDay) {
    fn from(f: FreeInterval) -> Self {
        (f.start, f.end)
    }
}

/// Free intervals for all seven weekdays within one [`DayWindow`].
#[derive(Debug, Clone, PartialEq)]
pub struct FreeTimeMap {
    window: DayWindow,
    days: BTreeMap<Day, Vec<FreeInterval>>,
}

impl FreeTimeMap {
    pub fn window(&self) -> DayWindow {
        self.window
    }

    /// Free intervals for `day`, in ascending order.
    pub fn get(&self, day: Day) -> &[FreeInterval] {
        self.days.get(&day).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn iter(&self) -> impl Iterator<Item = (Day, &[FreeInterval])> + '_ {
        Day::ALL.into_iter().map(move |day| (day, self.get(day)))
    }

    /// The first free interval on `day` lasting at least `min_duration_minutes`.
    pub fn first_free(&self, day: Day, min_duration_minutes: i64) -> Option<FreeInterval> {
        self.get(day)
            .iter()
            .find(|slot| slot.duration_minutes() >= min_duration_minutes)
            .copied()
    }

    /// Sum of free minutes across the whole week.
    pub fn total_free_minutes(&self) -> i64 {
        self.days
            .values()
            .flatten()
            .map(FreeInterval::duration_minutes)
            .sum()
    }
}

impl Serialize for FreeTimeMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(Day::ALL.len()))?;
        for (day, free) in self.iter() {
            map.serialize_entry(&day, free)?;
        }
        map.end()
    }
}

/// Free intervals for one day: the complement of `busy` within `window`.
///
/// `busy` should be sorted by start (as produced by the normalizer); parts
/// outside the window are ignored.
pub fn find_free_intervals(busy: &[BusyInterval], window: DayWindow) -> Vec<FreeInterval> {
    let mut free = Vec::new();
    let mut cursor = window.start;

    for clipped in busy.iter().filter_map(|b| window.clip(b)) {
        if clipped.start > cursor {
            free.push(FreeInterval {
                start: cursor,
                end: clipped.start,
            });
        }
        cursor = cursor.max(clipped.end);
    }

    // Trailing free interval after the last busy period.
    if cursor < window.end {
        free.push(FreeInterval {
            start: cursor,
            end: window.end,
        });
    }

    free
}

/// Compute the free-time map for every weekday of `schedule`.
pub fn compute_free_time(schedule: &WeekSchedule, window: DayWindow) -> FreeTimeMap {
    let days = schedule
        .iter()
        .map(|(day, busy)| (day, find_free_intervals(busy, window)))
        .collect();
    FreeTimeMap { window, days }
}

/// Free time for a possibly-missing schedule.
///
/// Keeps "nothing is busy" (an empty schedule) apart from "no schedule yet".
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Availability {
    NoSchedule,
    Ready { free_time: FreeTimeMap },
}

impl Availability {
    pub fn free_time(&self) -> Option<&FreeTimeMap> {
        match self {
            Availability::Ready { free_time } => Some(free_time),
            Availability::NoSchedule => None,
        }
    }
}

pub fn compute_availability(schedule: Option<&WeekSchedule>, window: DayWindow) -> Availability {
    match schedule {
        Some(schedule) => Availability::Ready {
            free_time: compute_free_time(schedule, window),
        },
        None => Availability::NoSchedule,
    }
}
