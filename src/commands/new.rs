use anyhow::{Context, Result};
use calman_core::config::CalmanConfig;
use calman_core::event::{EventId, EventTime, Language, Place};
use calman_core::form::FieldUpdate;
use calman_core::page::{Outcome, SlotSelection};
use calman_core::CalendarPage;
use owo_colors::OwoColorize;

use crate::input::{apply_duration, default_end, parse_datetime, parse_end};
use crate::render::render_week;

/// Arguments of `calman new`.
pub struct NewEvent {
    pub title: String,
    pub start: String,
    pub end: Option<String>,
    pub duration: Option<String>,
    pub place: Option<String>,
    pub language: Option<String>,
    pub participants: u32,
    pub blocking: bool,
}

pub fn run(mut page: CalendarPage, config: &CalmanConfig, args: NewEvent) -> Result<()> {
    let (id, start) = create(&mut page, &args)?;

    println!("{}", format!("  Created: {} ({})", args.title, id).green());
    println!();
    println!(
        "{}",
        render_week(page.current_events(), start.date(), config.first_day, page.range())
    );

    Ok(())
}

/// Fill a form from the arguments and save it through the page.
pub fn create(page: &mut CalendarPage, args: &NewEvent) -> Result<(EventId, EventTime)> {
    let start = parse_datetime(&args.start)?;
    let end = resolve_end(&start, args.end.as_deref(), args.duration.as_deref())?;

    let place = args
        .place
        .as_deref()
        .map(str::parse::<Place>)
        .transpose()?;
    let language = args
        .language
        .as_deref()
        .map(str::parse::<Language>)
        .transpose()?;

    page.select_slot(SlotSelection {
        start,
        end,
        all_day: start.is_date(),
    })?;

    let form = page.editor_mut().context("Editor did not open")?;
    form.apply(FieldUpdate::Title(args.title.clone()));
    form.apply(FieldUpdate::Place(place));
    form.apply(FieldUpdate::Language(language));
    form.apply(FieldUpdate::AmountParticipants(args.participants));
    form.apply(FieldUpdate::Blocking(args.blocking));

    if !form.is_valid() {
        anyhow::bail!("{}", form.error_text());
    }

    let Outcome::Created(id) = page.submit()? else {
        anyhow::bail!("Event was not created");
    };
    Ok((id, start))
}

fn resolve_end(start: &EventTime, end: Option<&str>, duration: Option<&str>) -> Result<EventTime> {
    match (end, duration) {
        (Some(end), _) => parse_end(end, start),
        (None, Some(duration)) => apply_duration(start, duration),
        (None, None) => default_end(start),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::tests::seeded_page;
    use calman_core::store::EventStore;

    fn args(title: &str, start: &str) -> NewEvent {
        NewEvent {
            title: title.to_string(),
            start: start.to_string(),
            end: None,
            duration: None,
            place: None,
            language: None,
            participants: 0,
            blocking: false,
        }
    }

    fn timed(s: &str) -> EventTime {
        calman_core::utils::parse_iso(s, false).unwrap()
    }

    #[test]
    fn end_wins_over_default() {
        let start = timed("2021-01-04T09:00");
        assert_eq!(
            resolve_end(&start, Some("2021-01-04T11:15"), None).unwrap(),
            timed("2021-01-04T11:15")
        );
        assert_eq!(
            resolve_end(&start, None, Some("30m")).unwrap(),
            timed("2021-01-04T09:30")
        );
        assert_eq!(resolve_end(&start, None, None).unwrap(), timed("2021-01-04T10:00"));
    }

    #[test]
    fn oversized_duration_is_an_error_not_a_panic() {
        let start = timed("2021-01-04T09:00");
        assert!(resolve_end(&start, None, Some("300000years")).is_err());
    }

    #[test]
    fn creates_event_with_extended_props() {
        let mut page = seeded_page();
        let mut new = args("Concert", "2021-01-05T18:00");
        new.duration = Some("2h".to_string());
        new.place = Some("Under de Brugg".to_string());
        new.language = Some("french".to_string());
        new.participants = 40;

        let (id, _) = create(&mut page, &new).unwrap();

        let event = page.store().get(id).unwrap();
        assert_eq!(event.end, Some(timed("2021-01-05T20:00")));
        assert_eq!(event.extended.place, Some(Place::UnderDeBrugg));
        assert_eq!(event.extended.language, Some(Language::French));
        assert_eq!(event.extended.amount_participants, 40);
    }

    #[test]
    fn blocking_event_over_timed_event_is_refused() {
        let mut page = seeded_page();
        let mut new = args("Block", "2021-01-04T13:30");
        new.end = Some("2021-01-04T14:30".to_string());
        new.blocking = true;

        let err = create(&mut page, &new).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Der Event überlagert mit einem blockierenden Event"
        );
        assert_eq!(page.current_events().len(), 3);
    }

    #[test]
    fn unknown_place_is_an_error() {
        let mut page = seeded_page();
        let mut new = args("Concert", "2021-01-05T18:00");
        new.place = Some("Atlantis".to_string());
        assert!(create(&mut page, &new).is_err());
        assert_eq!(page.current_events().len(), 3);
    }
}
