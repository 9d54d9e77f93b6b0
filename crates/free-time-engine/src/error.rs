//! Error types for free-time-engine operations.
//!
//! Only configuration and boundary-parse failures surface as errors. Noisy
//! schedule or event data is skipped where it is consumed and never reaches
//! this type.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Invalid time of day: {0}")]
    InvalidTime(String),

    #[error("Invalid day window: start {start} must be before end {end}")]
    InvalidWindow { start: String, end: String },

    #[error("Tolerance must be non-negative, got {0} minutes")]
    NegativeTolerance(i64),

    #[error("Unknown weekday: {0}")]
    UnknownDay(String),

    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience alias used throughout free-time-engine.
pub type Result<T> = std::result::Result<T, EngineError>;
