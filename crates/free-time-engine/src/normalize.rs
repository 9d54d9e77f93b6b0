//! Interval Normalizer: validate, sort, and merge one day's busy intervals.
//!
//! Malformed entries (unparsable times, `start >= end`) are dropped one at a
//! time so a single bad record never costs the rest of the day.

use serde::{Deserialize, Serialize};

use crate::time::TimeOfDay;

/// One occupied period on one weekday. Always `start < end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "(TimeOfDay, TimeOfDay)", try_from = "(TimeOfDay, TimeOfDay)")]
pub struct BusyInterval {
    pub start: TimeOfDay,
    pub end: TimeOfDay,
}

impl BusyInterval {
    /// Returns `None` unless `start < end`.
    pub fn new(start: TimeOfDay, end: TimeOfDay) -> Option<Self> {
        (start < end).then_some(BusyInterval { start, end })
    }

    pub fn duration_minutes(&self) -> i64 {
        self.start.minutes_until(self.end)
    }
}

impl From<BusyInterval> for (TimeOfDay, TimeOfDay) {
    fn from(b: BusyInterval) -> Self {
        (b.start, b.end)
    }
}

impl TryFrom<(TimeOfDay, TimeOfDay)> for BusyInterval {
    type Error = String;

    fn try_from((start, end): (TimeOfDay, TimeOfDay)) -> Result<Self, Self::Error> {
        BusyInterval::new(start, end)
            .ok_or_else(|| format!("busy interval start {start} must be before end {end}"))
    }
}

/// Parse one day's raw `(start, end)` string pairs and normalize them.
///
/// Entries that fail to parse or have `start >= end` are skipped.
pub fn normalize_day<S: AsRef<str>>(raw: &[(S, S)]) -> Vec<BusyInterval> {
    let intervals = raw
        .iter()
        .filter_map(|(start, end)| {
            let (start, end) = (start.as_ref(), end.as_ref());
            let parsed = start
                .parse::<TimeOfDay>()
                .ok()
                .zip(end.parse::<TimeOfDay>().ok())
                .and_then(|(s, e)| BusyInterval::new(s, e));
            if parsed.is_none() {
                tracing::debug!(start, end, "skipping malformed busy interval");
            }
            parsed
        })
        .collect();

    merge_intervals(intervals)
}

/// Sort by start and merge overlapping or touching intervals.
///
/// Returns the minimal disjoint cover of the input. Running it on its own
/// output is a no-op.
pub fn merge_intervals(mut intervals: Vec<BusyInterval>) -> Vec<BusyInterval> {
    if intervals.is_empty() {
        return intervals;
    }

    // Sort by start time (then by end time for stability).
    intervals.sort_by_key(|b| (b.start, b.end));

    let mut merged: Vec<BusyInterval> = Vec::with_capacity(intervals.len());
    for interval in intervals {
        if let Some(last) = merged.last_mut() {
            if interval.start <= last.end {
                last.end = last.end.max(interval.end);
                continue;
            }
        }
        merged.push(interval);
    }

    merged
}
