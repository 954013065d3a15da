//! Event store: the in-memory collection the calendar grid renders.

use chrono::Duration;

use crate::error::{CalmanError, CalmanResult};
use crate::event::{Event, EventId, EventTime};

/// Contract of the collection backing the calendar grid.
///
/// Stored events are mutated in place through `get_mut` and the `Event`
/// setters; the page never keeps references across calls.
pub trait EventStore {
    fn events(&self) -> &[Event];

    fn get(&self, id: EventId) -> Option<&Event> {
        self.events().iter().find(|e| e.id == id)
    }

    fn get_mut(&mut self, id: EventId) -> Option<&mut Event>;

    fn add_event(&mut self, event: Event) -> CalmanResult<()>;

    fn remove(&mut self, id: EventId) -> CalmanResult<Event>;

    /// Drag an event to a new start, keeping its length. Stores do not check
    /// blocking events; `CalendarPage::move_event` does that before calling.
    fn move_event(&mut self, id: EventId, start: EventTime, all_day: bool) -> CalmanResult<()>;

    /// The `[start, end)` the grid draws for an event, filling in a default
    /// duration when the event has no explicit end.
    fn instance_range(&self, id: EventId) -> Option<(EventTime, EventTime)>;
}

/// Default duration the grid assumes for timed events without an end.
pub fn default_duration(all_day: bool) -> Duration {
    if all_day {
        Duration::days(1)
    } else {
        Duration::hours(1)
    }
}

/// End the grid draws for an event: its own end, or the default duration
/// after its start.
pub fn instance_end(event: &Event) -> EventTime {
    event.end.unwrap_or_else(|| {
        let end = event
            .start
            .naive()
            .checked_add_signed(default_duration(event.all_day))
            .unwrap_or(chrono::NaiveDateTime::MAX);
        EventTime::DateTime(end).with_granularity(event.all_day)
    })
}

/// Apply a drag to an event value.
///
/// The length is kept, except that dropping an all-day event into a timed
/// slot leaves it without an end, the same way the browser grid does.
/// `CalendarPage::on_events_changed` repairs that from the instance range.
pub fn relocate(event: &mut Event, start: EventTime, all_day: bool) {
    let start = start.with_granularity(all_day);

    let end = match (event.all_day, all_day, event.end) {
        (true, false, _) => None,
        (_, _, Some(end)) => {
            let length = end.naive() - event.start.naive();
            start
                .naive()
                .checked_add_signed(length)
                .map(|moved| EventTime::DateTime(moved).with_granularity(all_day))
        }
        (_, _, None) => None,
    };

    event.all_day = all_day;
    event.set_dates(start, end);
}

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    events: Vec<Event>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_events(events: Vec<Event>) -> CalmanResult<Self> {
        let mut store = MemoryStore::new();
        for event in events {
            store.add_event(event)?;
        }
        Ok(store)
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

impl EventStore for MemoryStore {
    fn events(&self) -> &[Event] {
        &self.events
    }

    fn get_mut(&mut self, id: EventId) -> Option<&mut Event> {
        self.events.iter_mut().find(|e| e.id == id)
    }

    fn add_event(&mut self, event: Event) -> CalmanResult<()> {
        if self.get(event.id).is_some() {
            return Err(CalmanError::DuplicateId(event.id));
        }
        tracing::debug!(event = %event.title, id = %event.id, "added event");
        self.events.push(event);
        Ok(())
    }

    fn remove(&mut self, id: EventId) -> CalmanResult<Event> {
        let index = self
            .events
            .iter()
            .position(|e| e.id == id)
            .ok_or(CalmanError::EventNotFound(id))?;
        let removed = self.events.remove(index);
        tracing::debug!(event = %removed.title, id = %id, "removed event");
        Ok(removed)
    }

    fn move_event(&mut self, id: EventId, start: EventTime, all_day: bool) -> CalmanResult<()> {
        let event = self.get_mut(id).ok_or(CalmanError::EventNotFound(id))?;
        relocate(event, start, all_day);
        tracing::debug!(event = %event.title, start = %event.start, "moved event");
        Ok(())
    }

    fn instance_range(&self, id: EventId) -> Option<(EventTime, EventTime)> {
        let event = self.get(id)?;
        Some((event.start, instance_end(event)))
    }
}
