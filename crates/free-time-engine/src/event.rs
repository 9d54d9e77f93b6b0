//! External event records and their resolution onto the weekly grid.
//!
//! An [`Event`] is an opaque JSON object owned by whoever fetched it. The
//! engine reads only `start`, `end` (or `duration_minutes`) and `day`;
//! everything else is carried through untouched so matched events come back
//! in exactly the shape they arrived.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::time::{Day, TimeOfDay};

/// Naive timestamp layouts accepted for `start`/`end`, tried in order.
const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
];

/// An event record as supplied by an event feed.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Event {
    fields: Map<String, Value>,
}

/// Where an event falls in the week.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventSlot {
    pub day: Day,
    pub start: TimeOfDay,
    pub end: TimeOfDay,
}

enum Stamp {
    Dated(NaiveDateTime),
    TimeOnly(TimeOfDay),
}

impl Event {
    /// An event with only a `start` and an `end`.
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Self {
        let (start, end): (String, String) = (start.into(), end.into());
        Event::default().with_field("start", start).with_field("end", end)
    }

    /// Wrap a JSON value. Returns `None` for anything but an object.
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(fields) => Some(Event { fields }),
            _ => None,
        }
    }

    pub fn with_field(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.fields.insert(key.to_string(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    pub fn name(&self) -> Option<&str> {
        self.str_field("name")
    }

    pub fn location(&self) -> Option<&str> {
        self.str_field("location")
    }

    pub fn organization(&self) -> Option<&str> {
        self.str_field("organization")
    }

    fn str_field(&self, key: &str) -> Option<&str> {
        self.fields.get(key).and_then(Value::as_str)
    }

    /// Place the event on the weekly grid.
    ///
    /// The weekday comes from the start date when there is one, otherwise
    /// from the `day` tag. Offset-bearing timestamps are shifted to `tz`'s
    /// wall clock when a zone is given. Returns `None` for anything that
    /// cannot be placed: a missing or unparsable start, an unparsable end, or
    /// an end before the start.
    pub fn resolve(&self, tz: Option<Tz>) -> Option<EventSlot> {
        let start = parse_stamp(self.str_field("start")?, tz)?;

        let (day, start_date, start_time) = match start {
            Stamp::Dated(dt) => (
                Day::from(dt.weekday()),
                Some(dt.date()),
                TimeOfDay::from(dt.time()),
            ),
            Stamp::TimeOnly(t) => (self.str_field("day")?.parse::<Day>().ok()?, None, t),
        };

        let end_time = match self.str_field("end") {
            Some(raw) => match parse_stamp(raw, tz)? {
                Stamp::Dated(end) => end_of_span(start_date, end.date(), end.time().into())?,
                Stamp::TimeOnly(t) => t,
            },
            None => match self.get("duration_minutes").and_then(Value::as_u64) {
                Some(minutes) => {
                    start_time.saturating_add_minutes(u32::try_from(minutes).unwrap_or(u32::MAX))
                }
                None => start_time,
            },
        };

        (start_time <= end_time).then_some(EventSlot {
            day,
            start: start_time,
            end: end_time,
        })
    }
}

/// Clamp a dated end to the start's calendar day.
fn end_of_span(
    start_date: Option<NaiveDate>,
    end_date: NaiveDate,
    end_time: TimeOfDay,
) -> Option<TimeOfDay> {
    match start_date {
        Some(start_date) if end_date > start_date => Some(TimeOfDay::END_OF_DAY),
        Some(start_date) if end_date < start_date => None,
        _ => Some(end_time),
    }
}

fn parse_stamp(raw: &str, tz: Option<Tz>) -> Option<Stamp> {
    let raw = raw.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        let local = match tz {
            Some(tz) => dt.with_timezone(&tz).naive_local(),
            None => dt.naive_local(),
        };
        return Some(Stamp::Dated(local));
    }

    if let Some(dt) = NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
    {
        return Some(Stamp::Dated(dt));
    }

    raw.parse::<TimeOfDay>().ok().map(Stamp::TimeOnly)
}
