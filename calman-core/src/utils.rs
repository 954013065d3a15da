//! Small helpers shared by the form, the page and the CLI.

use chrono::{NaiveDate, NaiveDateTime};

use crate::error::{CalmanError, CalmanResult};
use crate::event::{EventId, EventTime};

/// Create a fresh event id.
pub fn create_event_id() -> EventId {
    EventId::new()
}

/// Format a date/time the way a `datetime-local` input expects it.
pub fn convert_date_to_iso(dt: NaiveDateTime) -> String {
    dt.format("%Y-%m-%dT%H:%M").to_string()
}

/// Parse `YYYY-MM-DD` or `YYYY-MM-DDTHH:MM[:SS]` and normalize the result to
/// the requested granularity.
pub fn parse_iso(input: &str, all_day: bool) -> CalmanResult<EventTime> {
    let s = input.trim();

    let parsed = if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        EventTime::Date(d)
    } else {
        ["%Y-%m-%dT%H:%M", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M"]
            .iter()
            .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
            .map(EventTime::DateTime)
            .ok_or_else(|| CalmanError::InvalidTime(input.to_string()))?
    };

    Ok(parsed.with_granularity(all_day))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_unique() {
        assert_ne!(create_event_id(), create_event_id());
    }

    #[test]
    fn iso_has_minute_precision() {
        let dt = NaiveDate::from_ymd_opt(2021, 1, 4)
            .unwrap()
            .and_hms_opt(8, 5, 59)
            .unwrap();
        assert_eq!(convert_date_to_iso(dt), "2021-01-04T08:05");
    }

    #[test]
    fn parse_iso_accepts_both_granularities() {
        let timed = parse_iso("2021-01-04T11:00", false).unwrap();
        assert_eq!(timed.to_string(), "2021-01-04T11:00");

        let day = parse_iso("2021-01-04T11:00", true).unwrap();
        assert_eq!(day.to_string(), "2021-01-04");

        let padded = parse_iso("2021-01-04", false).unwrap();
        assert_eq!(padded.to_string(), "2021-01-04T00:00");
    }

    #[test]
    fn parse_iso_rejects_garbage() {
        assert!(matches!(
            parse_iso("next tuesday", false),
            Err(CalmanError::InvalidTime(_))
        ));
    }
}
