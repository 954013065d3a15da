//! Calendar event types.
//!
//! An `Event` is the canonical value held by an event store. The editor never
//! works on it directly: it edits an `EventDraft` copy and changes flow back
//! through the calendar page.

use std::fmt;
use std::str::FromStr;

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::CalmanError;

/// Opaque unique identifier of a stored event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventId(Uuid);

impl EventId {
    pub fn new() -> Self {
        EventId(Uuid::new_v4())
    }
}

impl Default for EventId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for EventId {
    type Err = CalmanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s.trim())
            .map(EventId)
            .map_err(|_| CalmanError::InvalidField {
                field: "id",
                value: s.to_string(),
            })
    }
}

/// A point in time, either date-only (all-day) or date and time (timed).
///
/// Timed values are floating local times: they carry no zone and are
/// interpreted in the user's wall clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventTime {
    Date(NaiveDate),
    DateTime(NaiveDateTime),
}

impl EventTime {
    /// The instant used for comparisons. Dates start at midnight.
    pub fn naive(&self) -> NaiveDateTime {
        match self {
            EventTime::Date(d) => d.and_time(NaiveTime::MIN),
            EventTime::DateTime(dt) => *dt,
        }
    }

    pub fn date(&self) -> NaiveDate {
        match self {
            EventTime::Date(d) => *d,
            EventTime::DateTime(dt) => dt.date(),
        }
    }

    pub fn is_date(&self) -> bool {
        matches!(self, EventTime::Date(_))
    }

    /// Re-express this value at the given granularity.
    /// Timed values lose their time of day; dates gain midnight.
    pub fn with_granularity(self, all_day: bool) -> EventTime {
        match (self, all_day) {
            (EventTime::DateTime(dt), true) => EventTime::Date(dt.date()),
            (EventTime::Date(d), false) => EventTime::DateTime(d.and_time(NaiveTime::MIN)),
            (same, _) => same,
        }
    }
}

impl PartialOrd for EventTime {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for EventTime {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.naive().cmp(&other.naive())
    }
}

impl fmt::Display for EventTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventTime::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
            EventTime::DateTime(dt) => write!(f, "{}", dt.format("%Y-%m-%dT%H:%M")),
        }
    }
}

/// Predefined venues an event can take place at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Place {
    #[serde(rename = "Under de Brugg")]
    UnderDeBrugg,
    #[serde(rename = "Ähned am Bergli")]
    AhnedAmBergli,
}

impl Place {
    pub const ALL: [Place; 2] = [Place::UnderDeBrugg, Place::AhnedAmBergli];

    pub fn name(&self) -> &'static str {
        match self {
            Place::UnderDeBrugg => "Under de Brugg",
            Place::AhnedAmBergli => "Ähned am Bergli",
        }
    }
}

impl fmt::Display for Place {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Place {
    type Err = CalmanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Place::ALL
            .into_iter()
            .find(|p| p.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| CalmanError::InvalidField {
                field: "place",
                value: s.to_string(),
            })
    }
}

/// Languages an event can be held in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Language {
    German,
    French,
    Italian,
    #[serde(rename = "Schwitzerdütsch")]
    SwissGerman,
}

impl Language {
    pub const ALL: [Language; 4] = [
        Language::German,
        Language::French,
        Language::Italian,
        Language::SwissGerman,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Language::German => "German",
            Language::French => "French",
            Language::Italian => "Italian",
            Language::SwissGerman => "Schwitzerdütsch",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Language {
    type Err = CalmanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Language::ALL
            .into_iter()
            .find(|l| l.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| CalmanError::InvalidField {
                field: "language",
                value: s.to_string(),
            })
    }
}

/// How the grid draws an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rendering {
    #[default]
    Auto,
    /// Drawn as a shaded block behind the regular events
    Background,
}

/// Attributes beyond the core scheduling fields.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ExtendedProps {
    pub place: Option<Place>,
    pub language: Option<Language>,
    pub amount_participants: u32,
}

/// A calendar event as held by the event store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: EventId,
    pub title: String,
    pub start: EventTime,
    /// None only when a drag left the event without an explicit end
    pub end: Option<EventTime>,
    pub all_day: bool,
    /// False marks a blocking event that others may not intersect
    pub overlap: bool,
    pub rendering: Rendering,
    pub color: Option<String>,
    #[serde(flatten)]
    pub extended: ExtendedProps,
}

impl Event {
    pub fn new(id: EventId, title: impl Into<String>, start: EventTime, end: EventTime) -> Self {
        let all_day = start.is_date();
        Event {
            id,
            title: title.into(),
            start: start.with_granularity(all_day),
            end: Some(end.with_granularity(all_day)),
            all_day,
            overlap: true,
            rendering: Rendering::Auto,
            color: None,
            extended: ExtendedProps::default(),
        }
    }

    /// Turn this into a blocking background event.
    pub fn blocking(mut self, color: impl Into<String>) -> Self {
        self.overlap = false;
        self.rendering = Rendering::Background;
        self.color = Some(color.into());
        self
    }

    pub fn is_blocking(&self) -> bool {
        !self.overlap
    }

    /// The `[start, end)` interval. See [`span_of`].
    pub fn span(&self) -> (NaiveDateTime, NaiveDateTime) {
        span_of(self.start, self.end, self.all_day)
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn set_dates(&mut self, start: EventTime, end: Option<EventTime>) {
        self.start = start;
        self.end = end;
    }

    pub fn set_end(&mut self, end: EventTime) {
        self.end = Some(end);
    }

    pub fn set_all_day(&mut self, all_day: bool) {
        self.all_day = all_day;
        self.start = self.start.with_granularity(all_day);
        self.end = self.end.map(|e| e.with_granularity(all_day));
    }

    pub fn set_overlap(&mut self, overlap: bool) {
        self.overlap = overlap;
    }

    pub fn set_extended_props(&mut self, extended: ExtendedProps) {
        self.extended = extended;
    }
}

/// The `[start, end)` interval covered by a start/end pair.
///
/// All-day ends are exclusive dates, and an all-day span always covers at
/// least its start day, so `start == end == date` means that one day. A timed
/// span without an end is zero-length.
pub fn span_of(start: EventTime, end: Option<EventTime>, all_day: bool) -> (NaiveDateTime, NaiveDateTime) {
    let start = start.naive();
    let end = end.map(|e| e.naive()).unwrap_or(start);
    if !all_day {
        return (start, end);
    }

    let next_day = start
        .checked_add_signed(Duration::days(1))
        .unwrap_or(NaiveDateTime::MAX);
    (start, end.max(next_day))
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.title)
    }
}
