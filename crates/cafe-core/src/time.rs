//! Date/time range bounds for filtering transactions by `created_at`

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};

/// Optional start/end dates with optional times of day.
///
/// A time without its date has no effect. Missing times default to the
/// start and end of the day, so an end date alone includes `23:59:59`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DateTimeRange {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
}

impl DateTimeRange {
    /// Range covering whole days from `start` to `end`
    pub fn days(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        Self {
            start_date: start,
            end_date: end,
            ..Self::default()
        }
    }

    /// Whether any bound is set
    pub fn is_active(&self) -> bool {
        self.start_date.is_some() || self.end_date.is_some()
    }

    /// Inclusive lower bound in local wall-clock time
    pub fn start_bound(&self) -> Option<NaiveDateTime> {
        self.start_date
            .map(|d| d.and_time(self.start_time.unwrap_or_else(start_of_day)))
    }

    /// Inclusive upper bound in local wall-clock time
    pub fn end_bound(&self) -> Option<NaiveDateTime> {
        self.end_date
            .map(|d| d.and_time(self.end_time.unwrap_or_else(end_of_day)))
    }

    /// Check a timestamp against the bounds, reading it as wall-clock time in `tz`
    pub fn contains_in<Tz: TimeZone>(&self, at: &DateTime<Utc>, tz: &Tz) -> bool {
        let local = at.with_timezone(tz).naive_local();

        match (self.start_bound(), self.end_bound()) {
            (None, None) => true,
            (Some(s), None) => local >= s,
            (None, Some(e)) => local <= e,
            (Some(s), Some(e)) => local >= s && local <= e,
        }
    }

    /// Drop all four fields
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Get a human-readable description of the range
    pub fn description(&self) -> String {
        match (self.start_bound(), self.end_bound()) {
            (None, None) => "All Time".to_string(),
            (Some(s), None) => format!("From {}", s.format("%Y-%m-%d %H:%M")),
            (None, Some(e)) => format!("Until {}", e.format("%Y-%m-%d %H:%M")),
            (Some(s), Some(e)) => format!(
                "{} to {}",
                s.format("%Y-%m-%d %H:%M"),
                e.format("%Y-%m-%d %H:%M")
            ),
        }
    }
}

fn start_of_day() -> NaiveTime {
    NaiveTime::from_hms_opt(0, 0, 0).unwrap_or_default()
}

fn end_of_day() -> NaiveTime {
    NaiveTime::from_hms_opt(23, 59, 59).unwrap_or_default()
}

/// Parse a `YYYY-MM-DD` date input; blank means unset
pub fn parse_date(field: &str, value: &str) -> CoreResult<Option<NaiveDate>> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(None);
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map(Some)
        .map_err(|_| CoreError::InvalidFilter {
            message: format!("{} '{}' is not a date", field, value),
        })
}

/// Parse an `HH:MM` or `HH:MM:SS` time input; blank means unset
pub fn parse_time(field: &str, value: &str) -> CoreResult<Option<NaiveTime>> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(None);
    }
    NaiveTime::parse_from_str(value, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M"))
        .map(Some)
        .map_err(|_| CoreError::InvalidFilter {
            message: format!("{} '{}' is not a time of day", field, value),
        })
}
