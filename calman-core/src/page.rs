//! The calendar page: glue between the event store and the editor form.
//!
//! The page tracks one active selection (a freshly drawn slot or a clicked
//! event) and, while the editor is open, the form editing it. Saves, copies
//! and deletes coming out of the form are committed to the store here and
//! nowhere else.

use crate::config::CalmanConfig;
use crate::draft::EventDraft;
use crate::error::{CalmanError, CalmanResult};
use crate::event::{Event, EventId, EventTime};
use crate::form::{EventForm, FormIntent};
use crate::store::{instance_end, relocate, EventStore, MemoryStore};
use crate::utils::create_event_id;
use crate::valid_range::ValidRange;
use crate::validation::{self, Locale};

/// A range the user drew on the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotSelection {
    pub start: EventTime,
    pub end: EventTime,
    pub all_day: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    Slot(SlotSelection),
    Event(EventId),
}

/// Asks the user a yes/no question before a destructive action.
pub trait Confirm {
    fn confirm(&self, message: &str) -> bool;
}

/// Always answers the same way. Handy for scripted runs.
pub struct AutoConfirm(pub bool);

impl Confirm for AutoConfirm {
    fn confirm(&self, _message: &str) -> bool {
        self.0
    }
}

/// What the page did with a form intent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Created(EventId),
    Updated(EventId),
    Deleted(EventId),
    /// The user declined the delete prompt; the form stays open
    Kept,
    Closed,
}

/// Summary shown next to the grid.
#[derive(Debug, Clone)]
pub struct Sidebar<'a> {
    pub range: ValidRange,
    pub events: &'a [Event],
}

pub struct CalendarPage<S: EventStore = MemoryStore> {
    store: S,
    range: ValidRange,
    locale: Locale,
    selection: Option<Selection>,
    editor: Option<EventForm>,
    current_events: Vec<Event>,
}

impl<S: EventStore> CalendarPage<S> {
    pub fn new(store: S, config: &CalmanConfig) -> Self {
        let mut page = CalendarPage {
            store,
            range: config.valid_range,
            locale: config.locale,
            selection: None,
            editor: None,
            current_events: Vec::new(),
        };
        page.on_events_changed();
        page
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn range(&self) -> &ValidRange {
        &self.range
    }

    pub fn selection(&self) -> Option<Selection> {
        self.selection
    }

    pub fn editor(&self) -> Option<&EventForm> {
        self.editor.as_ref()
    }

    pub fn editor_mut(&mut self) -> Option<&mut EventForm> {
        self.editor.as_mut()
    }

    pub fn is_editor_open(&self) -> bool {
        self.editor.is_some()
    }

    /// The page's mirror of the store, refreshed after every change.
    pub fn current_events(&self) -> &[Event] {
        &self.current_events
    }

    pub fn sidebar(&self) -> Sidebar<'_> {
        Sidebar {
            range: self.range,
            events: &self.current_events,
        }
    }

    /// Open the editor on a blank draft for a drawn slot.
    pub fn select_slot(&mut self, slot: SlotSelection) -> CalmanResult<()> {
        if !self.range.contains_span(&slot.start, &slot.end) {
            return Err(CalmanError::OutOfRange(format!("{} - {}", slot.start, slot.end)));
        }

        let draft = EventDraft::blank(slot.start, slot.end, slot.all_day);
        self.open(Selection::Slot(slot), draft);
        Ok(())
    }

    /// Open the editor on a snapshot of a stored event.
    pub fn click_event(&mut self, id: EventId) -> CalmanResult<()> {
        let event = self.store.get(id).ok_or(CalmanError::EventNotFound(id))?;
        let draft = EventDraft::from_event(event);
        self.open(Selection::Event(id), draft);
        Ok(())
    }

    fn open(&mut self, selection: Selection, draft: EventDraft) {
        let form = EventForm::new(draft, self.store.events().to_vec(), self.locale);
        self.selection = Some(selection);
        self.editor = Some(form);
    }

    /// Carry out what the form asked for.
    pub fn handle(&mut self, intent: FormIntent, confirm: &dyn Confirm) -> CalmanResult<Outcome> {
        match intent {
            FormIntent::Save(draft) => self.on_save(draft),
            FormIntent::Copy(draft) => self.on_copy(draft),
            FormIntent::Delete => self.on_delete(confirm),
            FormIntent::Close => {
                self.close();
                Ok(Outcome::Closed)
            }
        }
    }

    /// Submit the open form and commit the result.
    pub fn submit(&mut self) -> CalmanResult<Outcome> {
        let intent = self.editor.as_ref().ok_or(CalmanError::NoSelection)?.submit()?;
        self.handle(intent, &AutoConfirm(false))
    }

    /// Update the selected event in place when the draft has an id, insert a
    /// new event otherwise.
    pub fn on_save(&mut self, draft: EventDraft) -> CalmanResult<Outcome> {
        self.check(&draft)?;

        let outcome = match draft.id {
            Some(draft_id) => {
                let selected = match self.selection {
                    Some(Selection::Event(id)) => id,
                    _ => return Err(CalmanError::NoSelection),
                };
                if selected != draft_id {
                    return Err(CalmanError::SelectionMismatch {
                        draft: draft_id,
                        selected,
                    });
                }

                let event = self
                    .store
                    .get_mut(selected)
                    .ok_or(CalmanError::EventNotFound(selected))?;
                draft.apply_to(event);
                tracing::info!(event = %event.title, id = %selected, "updated event");
                Outcome::Updated(selected)
            }
            None => {
                let id = create_event_id();
                let title = draft.title.clone();
                self.store.add_event(draft.into_event(id))?;
                tracing::info!(event = %title, %id, "created event");
                Outcome::Created(id)
            }
        };

        self.close();
        self.on_events_changed();
        Ok(outcome)
    }

    /// Insert a copy of the draft under a fresh id, whatever id it carries.
    pub fn on_copy(&mut self, mut draft: EventDraft) -> CalmanResult<Outcome> {
        draft.id = None;
        self.check(&draft)?;

        let id = create_event_id();
        let title = draft.title.clone();
        self.store.add_event(draft.into_event(id))?;
        tracing::info!(event = %title, %id, "copied event");

        self.close();
        self.on_events_changed();
        Ok(Outcome::Created(id))
    }

    /// Remove the selected event once the user confirms.
    pub fn on_delete(&mut self, confirm: &dyn Confirm) -> CalmanResult<Outcome> {
        let id = match self.selection {
            Some(Selection::Event(id)) => id,
            // Deleting an unsaved slot only discards the draft
            Some(Selection::Slot(_)) => {
                self.close();
                return Ok(Outcome::Closed);
            }
            None => return Err(CalmanError::NoSelection),
        };

        let title = self
            .store
            .get(id)
            .map(|e| e.title.clone())
            .ok_or(CalmanError::EventNotFound(id))?;

        if !confirm.confirm(&format!("Are you sure you want to delete the event '{}'", title)) {
            return Ok(Outcome::Kept);
        }

        self.store.remove(id)?;
        tracing::info!(event = %title, %id, "deleted event");

        self.close();
        self.on_events_changed();
        Ok(Outcome::Deleted(id))
    }

    pub fn close(&mut self) {
        self.editor = None;
        self.selection = None;
    }

    /// Drag an event to a new start and refresh. A drop that would put the
    /// event across blocked time is refused and the event stays put.
    pub fn move_event(&mut self, id: EventId, start: EventTime, all_day: bool) -> CalmanResult<()> {
        if !self.range.contains(&start) {
            return Err(CalmanError::OutOfRange(start.to_string()));
        }

        let mut moved = self.store.get(id).cloned().ok_or(CalmanError::EventNotFound(id))?;
        relocate(&mut moved, start, all_day);
        let mut draft = EventDraft::from_event(&moved);
        draft.end = instance_end(&moved);
        self.check(&draft)?;

        self.store.move_event(id, start, all_day)?;
        self.on_events_changed();
        Ok(())
    }

    /// Mirror the store's event list. Timed events a drag left without an
    /// end get the end of their rendered instance range.
    pub fn on_events_changed(&mut self) {
        let missing: Vec<EventId> = self
            .store
            .events()
            .iter()
            .filter(|e| !e.all_day && e.end.is_none())
            .map(|e| e.id)
            .collect();

        for id in missing {
            let Some((_, range_end)) = self.store.instance_range(id) else {
                continue;
            };
            if let Some(event) = self.store.get_mut(id) {
                tracing::warn!(event = %event.title, end = %range_end, "repaired missing end");
                event.set_end(range_end);
            }
        }

        self.current_events = self.store.events().to_vec();
    }

    /// Re-run validation against the live store before committing.
    fn check(&self, draft: &EventDraft) -> CalmanResult<()> {
        validation::validate(draft, self.store.events()).map_err(|e| {
            tracing::warn!(error = %e, "rejected commit");
            CalmanError::Validation(e)
        })
    }
}
