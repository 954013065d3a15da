//! Parsing of dates, times and durations typed by the user.

use anyhow::{Context, Result};
use calman_core::event::EventTime;
use calman_core::store::default_duration;
use calman_core::utils::parse_iso;
use chrono::Duration;

/// Expand common abbreviations that fuzzydate doesn't handle.
fn expand_abbreviations(input: &str) -> String {
    let abbrevs = [
        ("mon", "monday"),
        ("tue", "tuesday"),
        ("tues", "tuesday"),
        ("wed", "wednesday"),
        ("thu", "thursday"),
        ("thurs", "thursday"),
        ("fri", "friday"),
        ("sat", "saturday"),
        ("sun", "sunday"),
        ("jan", "january"),
        ("feb", "february"),
        ("mar", "march"),
        ("apr", "april"),
        ("jun", "june"),
        ("jul", "july"),
        ("aug", "august"),
        ("sep", "september"),
        ("sept", "september"),
        ("oct", "october"),
        ("nov", "november"),
        ("dec", "december"),
    ];

    input
        .to_lowercase()
        .split_whitespace()
        .map(|word| {
            abbrevs
                .iter()
                .find(|(abbr, _)| *abbr == word)
                .map(|(_, full)| *full)
                .unwrap_or(word)
                .to_string()
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Parse a date or date/time typed by the user.
///
/// ISO input (`2021-01-04`, `2021-01-04T09:00`) is taken as is. Anything else
/// goes through fuzzydate; input without a time of day becomes all-day.
pub fn parse_datetime(input: &str) -> Result<EventTime> {
    let trimmed = input.trim();
    if let Ok(iso) = parse_iso(trimmed, false) {
        return Ok(if trimmed.contains(['T', ' ']) {
            iso
        } else {
            iso.with_granularity(true)
        });
    }

    let expanded = expand_abbreviations(trimmed);
    let dt = fuzzydate::parse(&expanded)
        .map_err(|_| anyhow::anyhow!("Could not parse date/time: \"{}\"", input))?;

    if has_time_component(trimmed) {
        Ok(EventTime::DateTime(dt))
    } else {
        Ok(EventTime::Date(dt.date()))
    }
}

/// Check if the user's input contains time-related tokens.
fn has_time_component(input: &str) -> bool {
    let lower = input.to_lowercase();

    if lower.contains("noon") || lower.contains("midnight") {
        return true;
    }

    let bytes = lower.as_bytes();

    // "6pm", "6 pm", "11am"
    for (i, &b) in bytes.iter().enumerate() {
        if (b == b'a' || b == b'p') && bytes.get(i + 1) == Some(&b'm') {
            if i > 0 && bytes[i - 1].is_ascii_digit() {
                return true;
            }
            if i > 1 && bytes[i - 1] == b' ' && bytes[i - 2].is_ascii_digit() {
                return true;
            }
        }
    }

    // HH:MM
    for (i, &b) in bytes.iter().enumerate() {
        if b == b':' {
            let has_digit_before = i > 0 && bytes[i - 1].is_ascii_digit();
            let has_digit_after = bytes.get(i + 1).is_some_and(|c| c.is_ascii_digit());
            if has_digit_before && has_digit_after {
                return true;
            }
        }
    }

    // "at 3", "friday at 15"
    let after_at = lower
        .find(" at ")
        .map(|pos| &lower[pos + 4..])
        .or_else(|| lower.strip_prefix("at "));
    after_at.is_some_and(|rest| rest.starts_with(|c: char| c.is_ascii_digit()))
}

/// Parse an end input: a duration first (humantime), then a date/time.
pub fn parse_end(input: &str, start: &EventTime) -> Result<EventTime> {
    if let Ok(end) = try_apply_duration(start, input) {
        return Ok(end);
    }

    let cleaned = input
        .strip_prefix("until ")
        .or_else(|| input.strip_prefix("to "))
        .unwrap_or(input);

    Ok(parse_datetime(cleaned)?.with_granularity(start.is_date()))
}

/// Apply a duration string to a start time.
pub fn apply_duration(start: &EventTime, dur_input: &str) -> Result<EventTime> {
    try_apply_duration(start, dur_input)
        .with_context(|| format!("Could not parse duration: \"{}\"", dur_input))
}

fn try_apply_duration(start: &EventTime, dur_input: &str) -> Result<EventTime> {
    let std_dur = humantime::parse_duration(dur_input.trim()).map_err(|e| anyhow::anyhow!("{}", e))?;
    let chrono_dur = Duration::from_std(std_dur).context("Duration too large")?;
    shift(start, chrono_dur)
}

/// Default end: one hour for timed starts, one day for all-day starts.
pub fn default_end(start: &EventTime) -> Result<EventTime> {
    shift(start, default_duration(start.is_date()))
}

fn shift(start: &EventTime, by: Duration) -> Result<EventTime> {
    let shifted = match start {
        EventTime::Date(d) => d.checked_add_signed(by).map(EventTime::Date),
        EventTime::DateTime(dt) => dt.checked_add_signed(by).map(EventTime::DateTime),
    };
    shifted.context("Duration too large")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn timed(h: u32, m: u32) -> EventTime {
        EventTime::DateTime(
            NaiveDate::from_ymd_opt(2021, 1, 4)
                .unwrap()
                .and_hms_opt(h, m, 0)
                .unwrap(),
        )
    }

    // --- has_time_component ---

    #[test]
    fn time_component_am_pm() {
        assert!(has_time_component("tomorrow 6pm"));
        assert!(has_time_component("sat 3 pm"));
        assert!(has_time_component("9AM"));
    }

    #[test]
    fn time_component_colon_and_keywords() {
        assert!(has_time_component("march 20 9:30"));
        assert!(has_time_component("friday noon"));
        assert!(has_time_component("at 9"));
        assert!(has_time_component("friday at 15"));
    }

    #[test]
    fn no_time_component() {
        assert!(!has_time_component("tomorrow"));
        assert!(!has_time_component("next friday"));
        assert!(!has_time_component("december"));
        assert!(!has_time_component("camp"));
    }

    #[test]
    fn expand_abbreviations_per_word() {
        assert_eq!(expand_abbreviations("sat 3pm"), "saturday 3pm");
        assert_eq!(expand_abbreviations("Sept 5"), "september 5");
        assert_eq!(expand_abbreviations("next friday"), "next friday");
    }

    // --- parse_datetime ---

    #[test]
    fn iso_datetime_is_timed() {
        assert_eq!(parse_datetime("2021-01-04T09:30").unwrap(), timed(9, 30));
    }

    #[test]
    fn iso_date_is_all_day() {
        let parsed = parse_datetime("2021-01-04").unwrap();
        assert_eq!(
            parsed,
            EventTime::Date(NaiveDate::from_ymd_opt(2021, 1, 4).unwrap())
        );
    }

    #[test]
    fn fuzzy_input_without_time_is_all_day() {
        assert!(parse_datetime("tomorrow").unwrap().is_date());
        assert!(!parse_datetime("tomorrow 3pm").unwrap().is_date());
    }

    #[test]
    fn nonsense_is_rejected() {
        assert!(parse_datetime("not a date at all xyz").is_err());
    }

    // --- ends ---

    #[test]
    fn default_end_adds_an_hour_or_a_day() {
        assert_eq!(default_end(&timed(15, 0)).unwrap(), timed(16, 0));
        let day = EventTime::Date(NaiveDate::from_ymd_opt(2021, 1, 4).unwrap());
        assert_eq!(
            default_end(&day).unwrap(),
            EventTime::Date(NaiveDate::from_ymd_opt(2021, 1, 5).unwrap())
        );
    }

    #[test]
    fn parse_end_prefers_durations() {
        assert_eq!(parse_end("45m", &timed(15, 0)).unwrap(), timed(15, 45));
        assert_eq!(apply_duration(&timed(14, 0), "2hours").unwrap(), timed(16, 0));
    }

    #[test]
    fn parse_end_accepts_until_datetime() {
        assert_eq!(
            parse_end("until 2021-01-04T18:00", &timed(15, 0)).unwrap(),
            timed(18, 0)
        );
    }

    #[test]
    fn huge_duration_is_an_error() {
        let err = apply_duration(&timed(9, 0), "300000years").unwrap_err();
        assert!(format!("{:#}", err).contains("Duration too large"));

        let day = EventTime::Date(NaiveDate::from_ymd_opt(2021, 1, 4).unwrap());
        assert!(apply_duration(&day, "300000years").is_err());
    }

    #[test]
    fn bad_duration_names_the_input() {
        let err = apply_duration(&timed(15, 0), "forever").unwrap_err();
        assert!(err.to_string().contains("forever"));
    }
}
