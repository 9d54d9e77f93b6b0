//! Weekly busy schedule: the normalized input to the Free-Time Calculator.
//!
//! Two input shapes are accepted:
//!
//! - a day-keyed map, `{"Mon": [["09:30", "10:50"]], ...}`
//! - a class list, `{"classes": [{"day": "Mon", "start": "09:30", "end": "10:50"}]}`
//!
//! Both are normalized per day on construction, so a `WeekSchedule` always
//! holds sorted, pairwise-disjoint intervals.

use std::collections::BTreeMap;

use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use crate::normalize::{merge_intervals, normalize_day, BusyInterval};
use crate::time::Day;

/// One class from a schedule extraction, e.g. the output of an OCR step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassEntry {
    pub day: String,
    pub start: String,
    pub end: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// Raw schedule as it arrives from a collaborator, before normalization.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ScheduleInput {
    Classes { classes: Vec<ClassEntry> },
    /// Day values stay loose JSON so one malformed pair cannot reject the week.
    ByDay(BTreeMap<String, Value>),
}

/// A week of normalized busy intervals. Days never mentioned are empty.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct WeekSchedule {
    days: BTreeMap<Day, Vec<BusyInterval>>,
}

impl WeekSchedule {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from a day-keyed map of `(start, end)` string pairs.
    ///
    /// Keys that are not weekday names are skipped with a warning.
    pub fn from_raw<K, S>(raw: &BTreeMap<K, Vec<(S, S)>>) -> Self
    where
        K: AsRef<str>,
        S: AsRef<str>,
    {
        let mut schedule = WeekSchedule::new();
        for (key, pairs) in raw {
            let Some(day) = parse_day_key(key.as_ref()) else {
                continue;
            };
            schedule.extend_day(day, normalize_day(pairs));
        }
        schedule
    }

    /// Build from a flat class list, grouping entries by their `day`.
    pub fn from_classes(classes: &[ClassEntry]) -> Self {
        let mut grouped: BTreeMap<Day, Vec<(&str, &str)>> = BTreeMap::new();
        for class in classes {
            let Some(day) = parse_day_key(&class.day) else {
                continue;
            };
            grouped
                .entry(day)
                .or_default()
                .push((class.start.as_str(), class.end.as_str()));
        }

        let mut schedule = WeekSchedule::new();
        for (day, pairs) in grouped {
            schedule.extend_day(day, normalize_day(&pairs));
        }
        schedule
    }

    /// Add already-valid intervals to a day and re-normalize it.
    pub fn extend_day(&mut self, day: Day, intervals: Vec<BusyInterval>) {
        let mut merged = self.days.remove(&day).unwrap_or_default();
        merged.extend(intervals);
        let merged = merge_intervals(merged);
        if !merged.is_empty() {
            self.days.insert(day, merged);
        }
    }

    /// The normalized busy intervals for `day` (empty if none).
    pub fn busy(&self, day: Day) -> &[BusyInterval] {
        self.days.get(&day).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Iterate all seven days in order, including empty ones.
    pub fn iter(&self) -> impl Iterator<Item = (Day, &[BusyInterval])> + '_ {
        Day::ALL.into_iter().map(move |day| (day, self.busy(day)))
    }

    /// Total number of busy intervals across the week.
    pub fn interval_count(&self) -> usize {
        self.days.values().map(Vec::len).sum()
    }

    /// The normalized schedule in the external `HH:MM` pair shape, all 7 days.
    pub fn to_raw(&self) -> BTreeMap<Day, Vec<(String, String)>> {
        self.iter()
            .map(|(day, busy)| {
                let pairs = busy
                    .iter()
                    .map(|b| (b.start.to_string(), b.end.to_string()))
                    .collect();
                (day, pairs)
            })
            .collect()
    }
}

impl From<ScheduleInput> for WeekSchedule {
    fn from(input: ScheduleInput) -> Self {
        match input {
            ScheduleInput::Classes { classes } => WeekSchedule::from_classes(&classes),
            ScheduleInput::ByDay(raw) => {
                let pairs: BTreeMap<&str, Vec<(&str, &str)>> = raw
                    .iter()
                    .map(|(key, value)| (key.as_str(), string_pairs(key, value)))
                    .collect();
                WeekSchedule::from_raw(&pairs)
            }
        }
    }
}

impl Serialize for WeekSchedule {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(Day::ALL.len()))?;
        for (day, busy) in self.iter() {
            map.serialize_entry(&day, busy)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for WeekSchedule {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        ScheduleInput::deserialize(deserializer).map(WeekSchedule::from)
    }
}

/// The `["HH:MM", "HH:MM"]` entries of one day's JSON value.
///
/// Entries of any other shape are skipped; a non-array day counts as empty.
fn string_pairs<'a>(key: &str, value: &'a Value) -> Vec<(&'a str, &'a str)> {
    let Some(entries) = value.as_array() else {
        tracing::debug!(key, "skipping schedule day that is not an array");
        return Vec::new();
    };
    entries
        .iter()
        .filter_map(|entry| {
            let pair = match entry.as_array().map(Vec::as_slice) {
                Some([start, end]) => start.as_str().zip(end.as_str()),
                _ => None,
            };
            if pair.is_none() {
                tracing::debug!(key, %entry, "skipping malformed schedule entry");
            }
            pair
        })
        .collect()
}

fn parse_day_key(key: &str) -> Option<Day> {
    match key.parse::<Day>() {
        Ok(day) => Some(day),
        Err(_) => {
            tracing::warn!(key, "skipping schedule entry with unknown weekday");
            None
        }
    }
}
