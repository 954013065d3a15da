//! Draft validation: ordering and blocking-overlap checks.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::draft::EventDraft;
use crate::error::CalmanError;
use crate::event::Event;

/// Language used for user-facing messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    De,
    En,
}

impl FromStr for Locale {
    type Err = CalmanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "de" => Ok(Locale::De),
            "en" => Ok(Locale::En),
            _ => Err(CalmanError::InvalidField {
                field: "locale",
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Locale::De => write!(f, "de"),
            Locale::En => write!(f, "en"),
        }
    }
}

/// Why a draft cannot be committed.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("the end cannot precede the start")]
    EndBeforeStart,

    #[error("the event overlaps a blocking event")]
    OverlapsBlocking,
}

impl ValidationError {
    /// The fixed message shown under the end-time field.
    pub fn message(&self, locale: Locale) -> &'static str {
        match (self, locale) {
            (ValidationError::EndBeforeStart, Locale::De) => {
                "Der Endzeitpunkt kann nicht hinter dem Startzeitpunkt liegen"
            }
            (ValidationError::EndBeforeStart, Locale::En) => "The end time cannot precede the start time",
            (ValidationError::OverlapsBlocking, Locale::De) => {
                "Der Event überlagert mit einem blockierenden Event"
            }
            (ValidationError::OverlapsBlocking, Locale::En) => "The event overlaps a blocking event",
        }
    }
}

/// Strict interval intersection of two `[start, end)` spans.
pub fn overlaps(a: (NaiveDateTime, NaiveDateTime), b: (NaiveDateTime, NaiveDateTime)) -> bool {
    a.0 < b.1 && a.1 > b.0
}

/// Whether a draft and a stored event may not share time: at least one of
/// them is blocking.
fn conflicts(draft: &EventDraft, other: &Event) -> bool {
    !draft.overlap || other.is_blocking()
}

/// Validate a whole draft. The first failing rule wins.
///
/// `events` is a snapshot of the stored events. A regular draft may not
/// intersect a blocking event; a blocking draft may not intersect any event.
/// The draft's own stored event is skipped so an edit never conflicts with
/// itself.
pub fn validate(draft: &EventDraft, events: &[Event]) -> Result<(), ValidationError> {
    if draft.start > draft.end {
        return Err(ValidationError::EndBeforeStart);
    }

    let span = draft.span();
    let hit = events
        .iter()
        .filter(|e| draft.id != Some(e.id))
        .filter(|e| conflicts(draft, e))
        .find(|e| overlaps(span, e.span()));

    match hit {
        Some(e) => {
            tracing::debug!(other = %e.title, blocking = !draft.overlap, "draft overlaps blocked time");
            Err(ValidationError::OverlapsBlocking)
        }
        None => Ok(()),
    }
}
