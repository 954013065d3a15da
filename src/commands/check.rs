use anyhow::Result;
use calman_core::page::SlotSelection;
use calman_core::CalendarPage;
use owo_colors::OwoColorize;

use super::slot_from_input;

pub fn run(mut page: CalendarPage, start: &str, end: &str, all_day: bool) -> Result<()> {
    let mut slot = slot_from_input(start, end)?;
    if all_day {
        slot.start = slot.start.with_granularity(true);
        slot.end = slot.end.with_granularity(true);
        slot.all_day = true;
    }

    check_slot(&mut page, slot)?;
    println!("{}", format!("  {} - {} can be booked", slot.start, slot.end).green());
    Ok(())
}

/// Open the editor on the span and report what the form says about it.
pub fn check_slot(page: &mut CalendarPage, slot: SlotSelection) -> Result<()> {
    page.select_slot(slot)?;

    let Some(form) = page.editor() else {
        anyhow::bail!("Editor did not open");
    };

    if form.is_valid() {
        Ok(())
    } else {
        anyhow::bail!("{}", form.error_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::tests::seeded_page;

    #[test]
    fn free_span_can_be_booked() {
        let mut page = seeded_page();
        let slot = slot_from_input("2021-01-04T12:00", "2021-01-04T13:00").unwrap();
        assert!(check_slot(&mut page, slot).is_ok());
    }

    #[test]
    fn span_over_welcome_event_reports_the_form_error() {
        let mut page = seeded_page();
        let slot = slot_from_input("2021-01-04T11:00", "2h").unwrap();
        let err = check_slot(&mut page, slot).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Der Event überlagert mit einem blockierenden Event"
        );
    }

    #[test]
    fn whole_blocking_day_is_refused() {
        let mut page = seeded_page();
        let slot = slot_from_input("2021-01-04", "2021-01-05").unwrap();
        assert!(slot.all_day);
        assert!(check_slot(&mut page, slot).is_err());
    }

    #[test]
    fn span_outside_range_is_refused() {
        let mut page = seeded_page();
        let slot = slot_from_input("2021-02-01T09:00", "1h").unwrap();
        assert!(check_slot(&mut page, slot).is_err());
    }
}
