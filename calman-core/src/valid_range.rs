//! The date range the calendar lets a user select in.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::error::{CalmanError, CalmanResult};
use crate::event::EventTime;

/// First selectable day.
pub const DEFAULT_START: &str = "2021-01-04";
/// Day after the last selectable one.
pub const DEFAULT_END: &str = "2021-01-18";

/// Selectable dates, `start` inclusive and `end` exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl Default for ValidRange {
    fn default() -> Self {
        ValidRange {
            start: NaiveDate::from_ymd_opt(2021, 1, 4).unwrap_or(NaiveDate::MIN),
            end: NaiveDate::from_ymd_opt(2021, 1, 18).unwrap_or(NaiveDate::MAX),
        }
    }
}

impl ValidRange {
    /// Parse a range from two YYYY-MM-DD strings.
    pub fn from_args(start: &str, end: &str) -> CalmanResult<Self> {
        let start = parse_date(start)?;
        let end = parse_date(end)?;

        if end <= start {
            return Err(CalmanError::Config(format!(
                "valid range end {} must come after start {}",
                end, start
            )));
        }

        Ok(ValidRange { start, end })
    }

    pub fn contains_date(&self, date: NaiveDate) -> bool {
        date >= self.start && date < self.end
    }

    pub fn contains(&self, time: &EventTime) -> bool {
        self.contains_date(time.date())
    }

    /// Whether a selection from `start` to `end` stays in range. The end is
    /// exclusive, so a timed slot may end at midnight of `self.end` and an
    /// all-day slot may end on `self.end` itself.
    pub fn contains_span(&self, start: &EventTime, end: &EventTime) -> bool {
        self.contains(start) && end.naive() <= self.end.and_time(NaiveTime::MIN)
    }

    /// Clamp a date into the range.
    pub fn clamp(&self, date: NaiveDate) -> NaiveDate {
        if self.contains_date(date) {
            date
        } else {
            self.start
        }
    }

    pub fn days(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.start.iter_days().take_while(move |d| *d < self.end)
    }
}

/// Parse YYYY-MM-DD
fn parse_date(s: &str) -> CalmanResult<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").map_err(|_| {
        CalmanError::Config(format!("Invalid date format '{}'. Expected YYYY-MM-DD", s))
    })
}
