//! Report period (from/to date range) shared by every report endpoint.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised when building a report period.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PeriodError {
    /// A date string could not be parsed as `YYYY-MM-DD`.
    #[error("Invalid date: {0}")]
    InvalidDate(String),

    /// The start of the range lies after its end.
    #[error("Invalid date range: start {start} is after end {end}")]
    InvalidRange {
        /// Start date.
        start: NaiveDate,
        /// End date.
        end: NaiveDate,
    },
}

/// Inclusive date range a report is requested for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ReportPeriod {
    /// First day of the period.
    pub from_date: NaiveDate,
    /// Last day of the period.
    pub to_date: NaiveDate,
}

impl ReportPeriod {
    /// Creates a period, rejecting inverted ranges.
    pub fn new(from_date: NaiveDate, to_date: NaiveDate) -> Result<Self, PeriodError> {
        if from_date > to_date {
            return Err(PeriodError::InvalidRange {
                start: from_date,
                end: to_date,
            });
        }
        Ok(Self { from_date, to_date })
    }

    /// Parses a period from ISO date strings as sent in query parameters.
    pub fn parse(from_date: &str, to_date: &str) -> Result<Self, PeriodError> {
        Self::new(parse_iso(from_date)?, parse_iso(to_date)?)
    }

    /// Query pairs in the shape the upstream API expects.
    #[must_use]
    pub fn query_pairs(&self) -> [(&'static str, String); 2] {
        [
            ("from_date", self.from_date.format("%Y-%m-%d").to_string()),
            ("to_date", self.to_date.format("%Y-%m-%d").to_string()),
        ]
    }
}

fn parse_iso(raw: &str) -> Result<NaiveDate, PeriodError> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|_| PeriodError::InvalidDate(raw.to_string()))
}
