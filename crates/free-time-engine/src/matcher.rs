//! Event Matcher: keep the events that fit into the free-time map.
//!
//! Each event is placed on its weekday, screened against the day filter, and
//! then tested against that day's free intervals in order. The first
//! interval that passes wins. Output order follows input order.

use std::collections::BTreeSet;

use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::event::{Event, EventSlot};
use crate::freetime::{FreeInterval, FreeTimeMap};
use crate::time::Day;
use crate::tolerance::{ExpandedWindow, Tolerance};

/// How an event is tested against a tolerance-expanded free interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchMode {
    /// The whole `[start, end]` span must fit.
    #[default]
    Strict,
    /// Only the start time must fit.
    Anchor,
}

/// Per-request matching knobs.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MatchOptions {
    /// Eligible weekdays. `None` or an empty set means every day.
    pub days: Option<BTreeSet<Day>>,
    pub tolerance: Tolerance,
    pub mode: MatchMode,
    /// Zone used to read offset-bearing event timestamps.
    pub timezone: Option<Tz>,
}

impl MatchOptions {
    pub fn allows(&self, day: Day) -> bool {
        match &self.days {
            Some(days) if !days.is_empty() => days.contains(&day),
            _ => true,
        }
    }

    /// The effective day filter, Monday first.
    pub fn selected_days(&self) -> Vec<Day> {
        Day::ALL.into_iter().filter(|d| self.allows(*d)).collect()
    }
}

/// Events that fit, with the settings that produced them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchResult {
    pub count: usize,
    pub tolerance_minutes: u32,
    pub mode: MatchMode,
    pub selected_days: Vec<Day>,
    pub events: Vec<Event>,
}

/// The first free interval that `slot` fits into, if any.
pub fn first_fit(
    slot: &EventSlot,
    free: &[FreeInterval],
    tolerance: Tolerance,
    mode: MatchMode,
) -> Option<FreeInterval> {
    free.iter().copied().find(|interval| {
        let window = ExpandedWindow::around(interval, tolerance);
        match mode {
            MatchMode::Strict => window.contains_span(slot.start, slot.end),
            MatchMode::Anchor => window.contains(slot.start),
        }
    })
}

/// Filter `events` down to those that fit `free_time` under `options`.
///
/// Events that cannot be placed on the week (bad timestamps) are dropped
/// without failing the batch.
pub fn match_events(
    events: &[Event],
    free_time: &FreeTimeMap,
    options: &MatchOptions,
) -> MatchResult {
    let matched: Vec<Event> = events
        .iter()
        .filter(|event| {
            let Some(slot) = event.resolve(options.timezone) else {
                tracing::debug!(name = event.name(), "skipping event with unresolvable timestamp");
                return false;
            };
            if !options.allows(slot.day) {
                return false;
            }
            first_fit(&slot, free_time.get(slot.day), options.tolerance, options.mode).is_some()
        })
        .cloned()
        .collect();

    MatchResult {
        count: matched.len(),
        tolerance_minutes: options.tolerance.minutes(),
        mode: options.mode,
        selected_days: options.selected_days(),
        events: matched,
    }
}
