//! End-to-end entry point: schedule + events + config in, recommendation out.

use serde::Serialize;

use crate::config::{EngineConfig, ValidatedConfig};
use crate::error::Result;
use crate::event::Event;
use crate::freetime::{compute_availability, Availability};
use crate::matcher::{match_events, MatchResult};
use crate::schedule::WeekSchedule;

/// Outcome of a recommendation request.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Recommendation {
    /// No schedule was supplied, so free time is unknown.
    NoSchedule,
    Matched(MatchResult),
}

impl Recommendation {
    pub fn matched(&self) -> Option<&MatchResult> {
        match self {
            Recommendation::Matched(result) => Some(result),
            Recommendation::NoSchedule => None,
        }
    }
}

/// Validate `config`, then run the full pipeline.
///
/// # Errors
/// Only configuration problems fail; see [`EngineConfig::validate`].
pub fn recommend(
    schedule: Option<&WeekSchedule>,
    events: &[Event],
    config: &EngineConfig,
) -> Result<Recommendation> {
    let validated = config.validate()?;
    Ok(recommend_validated(schedule, events, &validated))
}

/// Run the pipeline with configuration that is already known to be valid.
pub fn recommend_validated(
    schedule: Option<&WeekSchedule>,
    events: &[Event],
    config: &ValidatedConfig,
) -> Recommendation {
    let free_time = match compute_availability(schedule, config.window) {
        Availability::Ready { free_time } => free_time,
        Availability::NoSchedule => return Recommendation::NoSchedule,
    };

    let result = match_events(events, &free_time, &config.options);
    tracing::debug!(
        candidates = events.len(),
        matched = result.count,
        window = %config.window,
        "matched events against free time"
    );
    Recommendation::Matched(result)
}
