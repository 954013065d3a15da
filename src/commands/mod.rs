pub mod check;
pub mod new;
pub mod session;
pub mod show;

use anyhow::{Context, Result};
use calman_core::page::SlotSelection;
use calman_core::valid_range::ValidRange;
use chrono::NaiveDate;

use crate::input::parse_end;
use crate::input::parse_datetime;

/// Parse a YYYY-MM-DD argument, defaulting to today clamped into the range.
pub fn resolve_date(date: Option<&str>, range: &ValidRange) -> Result<NaiveDate> {
    match date {
        Some(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .with_context(|| format!("Invalid date '{}'. Expected YYYY-MM-DD", s)),
        None => Ok(range.clamp(chrono::Local::now().date_naive())),
    }
}

/// Turn start/end input into a slot; the start's granularity decides all-day.
pub fn slot_from_input(start: &str, end: &str) -> Result<SlotSelection> {
    let start = parse_datetime(start)?;
    let end = parse_end(end, &start)?;
    Ok(SlotSelection {
        start,
        end,
        all_day: start.is_date(),
    })
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use calman_core::config::CalmanConfig;
    use calman_core::event::EventTime;
    use calman_core::seed;
    use calman_core::store::MemoryStore;
    use calman_core::CalendarPage;

    /// A page seeded the way `calman` starts, pinned to 2021-01-04.
    pub fn seeded_page() -> CalendarPage {
        let config = CalmanConfig::default();
        let today = NaiveDate::from_ymd_opt(2021, 1, 4).unwrap();
        let store = MemoryStore::with_events(seed::initial_events(today, &config.valid_range)).unwrap();
        CalendarPage::new(store, &config)
    }

    #[test]
    fn timed_start_gives_timed_slot() {
        let slot = slot_from_input("2021-01-04T09:00", "90m").unwrap();
        assert!(!slot.all_day);
        assert_eq!(slot.end.to_string(), "2021-01-04T10:30");
    }

    #[test]
    fn date_start_gives_all_day_slot() {
        let slot = slot_from_input("2021-01-05", "2021-01-06T15:00").unwrap();
        assert!(slot.all_day);
        assert_eq!(
            slot.end,
            EventTime::Date(NaiveDate::from_ymd_opt(2021, 1, 6).unwrap())
        );
    }

    #[test]
    fn bad_start_is_an_error() {
        assert!(slot_from_input("2021-13-45T09:00x", "1h").is_err());
    }

    #[test]
    fn resolve_date_parses_or_clamps() {
        let range = ValidRange::default();
        assert_eq!(
            resolve_date(Some("2021-01-07"), &range).unwrap(),
            NaiveDate::from_ymd_opt(2021, 1, 7).unwrap()
        );
        assert!(range.contains_date(resolve_date(None, &range).unwrap()));
        assert!(resolve_date(Some("07.01.2021"), &range).is_err());
    }
}
