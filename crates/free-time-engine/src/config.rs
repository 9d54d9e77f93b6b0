//! Request-level configuration.
//!
//! [`EngineConfig`] is the loose, serde-facing form (every field defaulted,
//! strings where the caller may send garbage). [`EngineConfig::validate`]
//! turns it into a [`ValidatedConfig`] or fails before any interval math runs.

use std::collections::BTreeSet;

use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};
use crate::freetime::DayWindow;
use crate::matcher::{MatchMode, MatchOptions};
use crate::time::{Day, DEFAULT_DAY_END, DEFAULT_DAY_START};
use crate::tolerance::Tolerance;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowConfig {
    pub start: String,
    pub end: String,
}

impl Default for WindowConfig {
    fn default() -> Self {
        WindowConfig {
            start: DEFAULT_DAY_START.to_string(),
            end: DEFAULT_DAY_END.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub day_window: WindowConfig,
    pub tolerance_minutes: i64,
    pub mode: MatchMode,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub days: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
}

/// Configuration that has passed every boundary check.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ValidatedConfig {
    pub window: DayWindow,
    pub options: MatchOptions,
}

impl EngineConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// # Errors
    /// - [`EngineError::InvalidTime`] / [`EngineError::InvalidWindow`] for a bad day window
    /// - [`EngineError::NegativeTolerance`] for `tolerance_minutes < 0`
    /// - [`EngineError::UnknownDay`] for an unrecognized day filter entry
    /// - [`EngineError::InvalidTimezone`] for a zone `chrono-tz` does not know
    pub fn validate(&self) -> Result<ValidatedConfig> {
        let window = DayWindow::parse(&self.day_window.start, &self.day_window.end)?;
        let tolerance = Tolerance::new(self.tolerance_minutes)?;

        let days = if self.days.is_empty() {
            None
        } else {
            Some(
                self.days
                    .iter()
                    .map(|d| d.parse::<Day>())
                    .collect::<Result<BTreeSet<Day>>>()?,
            )
        };

        let timezone = self
            .timezone
            .as_deref()
            .map(|name| {
                name.parse::<Tz>()
                    .map_err(|_| EngineError::InvalidTimezone(name.to_string()))
            })
            .transpose()?;

        Ok(ValidatedConfig {
            window,
            options: MatchOptions {
                days,
                tolerance,
                mode: self.mode,
                timezone,
            },
        })
    }
}
