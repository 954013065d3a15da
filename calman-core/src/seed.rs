//! Events shown when the calendar starts up.

use chrono::{NaiveDate, NaiveTime};

use crate::event::{Event, EventTime};
use crate::utils::create_event_id;
use crate::valid_range::ValidRange;

pub const WELCOME_COLOR: &str = "#ff9f89";

fn at(day: NaiveDate, hour: u32) -> EventTime {
    let time = NaiveTime::from_hms_opt(hour, 0, 0).unwrap_or(NaiveTime::MIN);
    EventTime::DateTime(day.and_time(time))
}

fn all_day_event(day: NaiveDate) -> Event {
    let next = day.succ_opt().unwrap_or(day);
    Event::new(
        create_event_id(),
        "All-day event",
        EventTime::Date(day),
        EventTime::Date(next),
    )
}

fn timed_event(day: NaiveDate) -> Event {
    Event::new(create_event_id(), "Timed event", at(day, 13), at(day, 15))
}

/// The blocking welcome slot nobody may book over.
pub fn blocking_events(day: NaiveDate) -> Vec<Event> {
    vec![Event::new(create_event_id(), "Welcome Event", at(day, 10), at(day, 12)).blocking(WELCOME_COLOR)]
}

/// All start-up events, placed on `today` when it is selectable and on the
/// first day of the range otherwise.
///
/// An all-day event covers its whole day and would cross the welcome slot, so
/// it goes on the neighbouring selectable day instead.
pub fn initial_events(today: NaiveDate, range: &ValidRange) -> Vec<Event> {
    let day = range.clamp(today);
    let neighbour = day
        .succ_opt()
        .filter(|d| range.contains_date(*d))
        .or_else(|| day.pred_opt().filter(|d| range.contains_date(*d)))
        .unwrap_or(day);

    let mut events = vec![all_day_event(neighbour), timed_event(day)];
    events.extend(blocking_events(day));
    events
}
