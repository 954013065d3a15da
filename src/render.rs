//! TUI rendering for calman types.
//!
//! Extension traits that add colored terminal output to calman-core types
//! using owo_colors.

use calman_core::event::{Event, EventTime, Rendering};
use calman_core::form::EventForm;
use calman_core::page::Sidebar;
use calman_core::valid_range::ValidRange;
use chrono::{Datelike, Duration, NaiveDate, NaiveTime, Timelike, Weekday};
use owo_colors::OwoColorize;

/// Extension trait for TUI rendering with colors.
pub trait Render {
    fn render(&self) -> String;
}

impl Render for Event {
    fn render(&self) -> String {
        let time = render_time_span(self);
        let title = if self.title.is_empty() {
            "(untitled)".to_string()
        } else {
            self.title.clone()
        };

        let mut line = match self.rendering {
            Rendering::Background => format!("{} {}", time.red(), title.red()),
            Rendering::Auto if self.is_blocking() => format!("{} {}", time.red(), title.red()),
            Rendering::Auto => format!("{} {}", time, title.bold()),
        };

        let details = render_extended(self);
        if !details.is_empty() {
            line.push_str(&format!(" {}", details.dimmed()));
        }
        if self.is_blocking() {
            line.push_str(&format!(" {}", "[blocking]".red()));
        }
        line
    }
}

impl Render for EventForm {
    fn render(&self) -> String {
        let draft = self.draft();
        let heading = if self.is_new() { "New event" } else { "Edit event" };
        let or_none = |v: Option<String>| v.unwrap_or_else(|| "(none)".to_string());

        let mut lines = vec![
            heading.bold().to_string(),
            format!("  {:<13} {}", "Title".dimmed(), draft.title),
            format!("  {:<13} {}", "Start".dimmed(), draft.start),
            format!("  {:<13} {}", "End".dimmed(), draft.end),
            format!("  {:<13} {}", "All-day".dimmed(), yes_no(draft.all_day)),
            format!("  {:<13} {}", "Blocking".dimmed(), yes_no(!draft.overlap)),
            format!(
                "  {:<13} {}",
                "Place".dimmed(),
                or_none(draft.extended.place.map(|p| p.to_string()))
            ),
            format!(
                "  {:<13} {}",
                "Language".dimmed(),
                or_none(draft.extended.language.map(|l| l.to_string()))
            ),
            format!(
                "  {:<13} {}",
                "Participants".dimmed(),
                draft.extended.amount_participants
            ),
        ];

        if !self.is_valid() {
            lines.push(format!("  {}", self.error_text().red()));
        }

        lines.join("\n")
    }
}

impl Render for Sidebar<'_> {
    fn render(&self) -> String {
        let mut lines = vec![
            "Date range".bold().to_string(),
            format!(
                "  Only dates can be selected between {} - {}",
                self.range.start, self.range.end
            ),
            String::new(),
            format!("All Events ({})", self.events.len()).bold().to_string(),
        ];

        for event in self.events {
            let end = event
                .end
                .map(|e| e.to_string())
                .unwrap_or_else(|| "?".to_string());
            lines.push(format!("  {} - {} - {}", event.title.italic(), event.start, end));
        }

        lines.join("\n")
    }
}

fn yes_no(value: bool) -> &'static str {
    if value { "yes" } else { "no" }
}

/// "13:00-15:00", "all-day", or "13:00-?" for an event without an end.
fn render_time_span(event: &Event) -> String {
    if event.all_day {
        return format!("{:>11}", "all-day");
    }

    let start = clock(&event.start);
    let end = event.end.as_ref().map(clock).unwrap_or_else(|| "?".to_string());
    format!("{:>11}", format!("{}-{}", start, end))
}

fn clock(time: &EventTime) -> String {
    time.naive().format("%H:%M").to_string()
}

fn render_extended(event: &Event) -> String {
    let ext = &event.extended;
    let mut parts = Vec::new();
    if let Some(place) = ext.place {
        parts.push(place.to_string());
    }
    if let Some(language) = ext.language {
        parts.push(language.to_string());
    }
    if ext.amount_participants > 0 {
        parts.push(format!("{} participants", ext.amount_participants));
    }

    if parts.is_empty() {
        String::new()
    } else {
        format!("({})", parts.join(", "))
    }
}

/// First day of the week containing `date`.
pub fn week_start(date: NaiveDate, first_day: Weekday) -> NaiveDate {
    let offset = (7 + date.weekday().num_days_from_monday() - first_day.num_days_from_monday()) % 7;
    date - Duration::days(offset as i64)
}

fn events_on(events: &[Event], day: NaiveDate) -> Vec<&Event> {
    let mut found: Vec<&Event> = events.iter().filter(|e| e.start.date() == day).collect();
    found.sort_by_key(|e| (!e.all_day, e.start));
    found
}

/// Week grid: one block per day, days outside the range greyed out.
pub fn render_week(events: &[Event], date: NaiveDate, first_day: Weekday, range: &ValidRange) -> String {
    let start = week_start(date, first_day);
    let mut lines = Vec::new();

    for day in start.iter_days().take(7) {
        let label = day.format("%a %b %-d").to_string();
        if !range.contains_date(day) {
            lines.push(label.dimmed().to_string());
            continue;
        }

        lines.push(label.bold().to_string());
        let todays = events_on(events, day);
        if todays.is_empty() {
            lines.push(format!("  {}", "-".dimmed()));
        }
        for event in todays {
            lines.push(format!("  {}", event.render()));
        }
    }

    lines.join("\n")
}

/// Day grid: one row per hour, with blocked hours marked.
pub fn render_day(events: &[Event], day: NaiveDate, range: &ValidRange) -> String {
    let mut lines = vec![day.format("%A %B %-d").to_string().bold().to_string()];

    if !range.contains_date(day) {
        lines.push(format!("  {}", "outside the selectable range".dimmed()));
        return lines.join("\n");
    }

    for event in events_on(events, day).into_iter().filter(|e| e.all_day) {
        lines.push(format!("  {}", event.render()));
    }

    for hour in 0..24 {
        let slot_start = day.and_time(NaiveTime::from_hms_opt(hour, 0, 0).unwrap_or(NaiveTime::MIN));
        let slot_end = slot_start + Duration::hours(1);

        let covering: Vec<&Event> = events
            .iter()
            .filter(|e| !e.all_day)
            .filter(|e| {
                let (start, end) = e.span();
                let end = if end == start { start + Duration::hours(1) } else { end };
                start < slot_end && end > slot_start
            })
            .collect();

        let label = format!("{:02}:00", slot_start.hour());
        let blocked = covering.iter().any(|e| e.is_blocking());
        let names: Vec<String> = covering
            .iter()
            .filter(|e| !e.is_blocking())
            .map(|e| e.title.clone())
            .collect();

        let row = match (blocked, names.is_empty()) {
            (true, true) => format!("{} {}", label.dimmed(), "blocked".on_red()),
            (true, false) => format!("{} {} {}", label.dimmed(), "blocked".on_red(), names.join(", ")),
            (false, false) => format!("{} {}", label.dimmed(), names.join(", ")),
            (false, true) => label.dimmed().to_string(),
        };
        lines.push(row);
    }

    lines.join("\n")
}
