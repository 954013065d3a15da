//! The event editor form.
//!
//! `EventForm` owns a draft and a read-only snapshot of the stored events it
//! is checked against. Every field update re-validates the whole draft
//! and stores the outcome in a single error slot; submission is refused
//! while that slot is filled. Outward actions are returned as `FormIntent`
//! values for the calendar page to carry out.

use chrono::{Duration, NaiveDate};

use crate::draft::EventDraft;
use crate::error::{CalmanError, CalmanResult};
use crate::event::{Event, EventTime, Language, Place};
use crate::validation::{self, Locale, ValidationError};

/// Minutes given to an all-day draft when it is switched to timed.
pub const DEFAULT_TIMED_MINUTES: i64 = 60;

/// A typed edit of one draft field.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldUpdate {
    Title(String),
    Start(EventTime),
    End(EventTime),
    Place(Option<Place>),
    Language(Option<Language>),
    AmountParticipants(u32),
    /// True makes the draft a blocking event
    Blocking(bool),
}

/// What the form asks its owner to do.
#[derive(Debug, Clone, PartialEq)]
pub enum FormIntent {
    Save(EventDraft),
    Copy(EventDraft),
    Delete,
    Close,
}

#[derive(Debug, Clone)]
pub struct EventForm {
    draft: EventDraft,
    events: Vec<Event>,
    error: Option<ValidationError>,
    locale: Locale,
}

impl EventForm {
    /// Open a form on a draft. The draft is validated right away so a
    /// pre-existing conflict is visible before the first edit.
    pub fn new(draft: EventDraft, events: Vec<Event>, locale: Locale) -> Self {
        let mut form = EventForm {
            draft,
            events,
            error: None,
            locale,
        };
        form.revalidate();
        form
    }

    pub fn draft(&self) -> &EventDraft {
        &self.draft
    }

    pub fn error(&self) -> Option<ValidationError> {
        self.error
    }

    /// The message under the end field; empty when the draft is valid.
    pub fn error_text(&self) -> &'static str {
        self.error.map(|e| e.message(self.locale)).unwrap_or("")
    }

    pub fn is_valid(&self) -> bool {
        self.error.is_none()
    }

    pub fn is_new(&self) -> bool {
        self.draft.id.is_none()
    }

    /// Write one field, then re-validate the entire draft.
    pub fn apply(&mut self, update: FieldUpdate) {
        let all_day = self.draft.all_day;
        match update {
            FieldUpdate::Title(title) => self.draft.title = title,
            FieldUpdate::Start(t) => self.draft.start = t.with_granularity(all_day),
            FieldUpdate::End(t) => self.draft.end = t.with_granularity(all_day),
            FieldUpdate::Place(place) => self.draft.extended.place = place,
            FieldUpdate::Language(language) => self.draft.extended.language = language,
            FieldUpdate::AmountParticipants(n) => self.draft.extended.amount_participants = n,
            FieldUpdate::Blocking(blocking) => self.draft.overlap = !blocking,
        }
        self.revalidate();
    }

    /// Flip between all-day and timed.
    ///
    /// Going all-day truncates the start to its date and moves the end to the
    /// exclusive day after the last covered one. Going timed starts at
    /// midnight of the start date and lasts `DEFAULT_TIMED_MINUTES`. The
    /// conversion is lossy: toggling twice does not restore the original times.
    pub fn toggle_all_day(&mut self) {
        let draft = &mut self.draft;
        draft.all_day = !draft.all_day;

        if draft.all_day {
            let first = draft.start.date();
            let last = draft.end.date().max(first);
            draft.start = EventTime::Date(first);
            draft.end = EventTime::Date(last.succ_opt().unwrap_or(NaiveDate::MAX));
        } else {
            let start = draft.start.with_granularity(false).naive();
            draft.start = EventTime::DateTime(start);
            draft.end = EventTime::DateTime(start + Duration::minutes(DEFAULT_TIMED_MINUTES));
        }

        self.revalidate();
    }

    /// Hand the draft to the owner for saving, unless it is invalid.
    pub fn submit(&self) -> CalmanResult<FormIntent> {
        match self.error {
            Some(e) => Err(CalmanError::Validation(e)),
            None => Ok(FormIntent::Save(self.draft.clone())),
        }
    }

    /// Hand a copy of the draft to the owner. The copy never carries the
    /// source id; the owner assigns a fresh one.
    pub fn copy(&self) -> FormIntent {
        let mut copy = self.draft.clone();
        copy.id = None;
        FormIntent::Copy(copy)
    }

    pub fn delete(&self) -> FormIntent {
        FormIntent::Delete
    }

    pub fn cancel(&self) -> FormIntent {
        FormIntent::Close
    }

    fn revalidate(&mut self) {
        self.error = validation::validate(&self.draft, &self.events).err();
        tracing::debug!(error = ?self.error, "validated draft");
    }
}
