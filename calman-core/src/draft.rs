//! The working copy edited by the event form.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::event::{span_of, Event, EventId, EventTime, ExtendedProps, Rendering};

/// A value copy of an event under edit.
///
/// `id` is None for a new event drawn from a slot selection; its presence is
/// what makes a save an update instead of a create.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventDraft {
    pub id: Option<EventId>,
    pub title: String,
    pub start: EventTime,
    pub end: EventTime,
    pub all_day: bool,
    pub overlap: bool,
    #[serde(flatten)]
    pub extended: ExtendedProps,
}

impl EventDraft {
    /// A new, untitled draft covering a selected slot.
    pub fn blank(start: EventTime, end: EventTime, all_day: bool) -> Self {
        EventDraft {
            id: None,
            title: String::new(),
            start: start.with_granularity(all_day),
            end: end.with_granularity(all_day),
            all_day,
            overlap: true,
            extended: ExtendedProps::default(),
        }
    }

    /// Snapshot a stored event. A missing end collapses onto the start.
    pub fn from_event(event: &Event) -> Self {
        EventDraft {
            id: Some(event.id),
            title: event.title.clone(),
            start: event.start,
            end: event.end.unwrap_or(event.start),
            all_day: event.all_day,
            overlap: event.overlap,
            extended: event.extended.clone(),
        }
    }

    pub fn span(&self) -> (NaiveDateTime, NaiveDateTime) {
        span_of(self.start, Some(self.end), self.all_day)
    }

    /// Build the stored event for this draft under the given id.
    pub fn into_event(self, id: EventId) -> Event {
        let rendering = if self.overlap {
            Rendering::Auto
        } else {
            Rendering::Background
        };

        Event {
            id,
            title: self.title,
            start: self.start,
            end: Some(self.end),
            all_day: self.all_day,
            overlap: self.overlap,
            rendering,
            color: None,
            extended: self.extended,
        }
    }

    /// Copy the mutable fields onto the stored event.
    pub fn apply_to(&self, event: &mut Event) {
        event.set_title(self.title.clone());
        event.set_all_day(self.all_day);
        event.set_dates(self.start, Some(self.end));
        event.set_overlap(self.overlap);
        event.set_extended_props(self.extended.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::Place;
    use chrono::NaiveDate;

    fn at(h: u32) -> EventTime {
        EventTime::DateTime(
            NaiveDate::from_ymd_opt(2021, 1, 5)
                .unwrap()
                .and_hms_opt(h, 0, 0)
                .unwrap(),
        )
    }

    #[test]
    fn blank_draft_has_no_id() {
        let draft = EventDraft::blank(at(9), at(10), false);
        assert!(draft.id.is_none());
        assert!(draft.overlap);
    }

    #[test]
    fn snapshot_is_detached_from_the_event() {
        let mut event = Event::new(EventId::new(), "Choir", at(18), at(20));
        let draft = EventDraft::from_event(&event);
        event.set_title("Renamed");
        assert_eq!(draft.title, "Choir");
        assert_eq!(draft.id, Some(event.id));
    }

    #[test]
    fn apply_to_copies_mutable_fields_only() {
        let mut event = Event::new(EventId::new(), "Choir", at(18), at(20));
        let original_id = event.id;

        let mut draft = EventDraft::from_event(&event);
        draft.title = "Rehearsal".into();
        draft.end = at(21);
        draft.extended.place = Some(Place::AhnedAmBergli);
        draft.apply_to(&mut event);

        assert_eq!(event.id, original_id);
        assert_eq!(event.title, "Rehearsal");
        assert_eq!(event.end, Some(at(21)));
        assert_eq!(event.extended.place, Some(Place::AhnedAmBergli));
    }

    #[test]
    fn blocking_drafts_render_in_background() {
        let mut draft = EventDraft::blank(at(9), at(10), false);
        draft.overlap = false;
        let event = draft.into_event(EventId::new());
        assert_eq!(event.rendering, Rendering::Background);
    }
}
