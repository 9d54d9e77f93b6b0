//! # free-time-engine
//!
//! Turns a weekly class schedule into free time windows and picks the
//! external events that fit inside them.
//!
//! The engine is pure and synchronous: every function is a deterministic
//! map from its arguments to its result, with no I/O and no shared state.
//! Reading files, calling feeds and persisting results belong to the caller.
//!
//! ## Quick start
//!
//! ```rust
//! use free_time_engine::{compute_free_time, DayWindow, WeekSchedule};
//!
//! let schedule: WeekSchedule =
//!     serde_json::from_str(r#"{"Mon": [["09:30", "10:50"], ["10:00", "11:00"]]}"#).unwrap();
//! let free = compute_free_time(&schedule, DayWindow::default());
//! let mon = serde_json::to_value(&free).unwrap()["Mon"].clone();
//! assert_eq!(mon, serde_json::json!([["08:00", "09:30"], ["11:00", "22:00"]]));
//! ```
//!
//! ## Modules
//!
//! - [`time`] — `TimeOfDay` (minutes since midnight) and `Day` tags
//! - [`normalize`] — validate, sort and merge busy intervals
//! - [`schedule`] — `WeekSchedule` and its accepted input shapes
//! - [`freetime`] — busy → free complement within a `DayWindow`
//! - [`tolerance`] — tolerance-expanded containment tests
//! - [`event`] — external event records and timestamp resolution
//! - [`matcher`] — filter events into free time (strict or anchor mode)
//! - [`config`] — request configuration and its validation
//! - [`pipeline`] — `recommend`, the end-to-end entry point
//! - [`error`] — Error types

pub mod config;
pub mod error;
pub mod event;
pub mod freetime;
pub mod matcher;
pub mod normalize;
pub mod pipeline;
pub mod schedule;
pub mod time;
pub mod tolerance;

pub use config::{EngineConfig, ValidatedConfig};
pub use error::EngineError;
pub use event::Event;
pub use freetime::{
    compute_availability, compute_free_time, Availability, DayWindow, FreeInterval, FreeTimeMap,
};
pub use matcher::{match_events, MatchMode, MatchOptions, MatchResult};
pub use normalize::{normalize_day, BusyInterval};
pub use pipeline::{recommend, Recommendation};
pub use schedule::WeekSchedule;
pub use time::{Day, TimeOfDay};
pub use tolerance::Tolerance;
