//! Interactive editor session.
//!
//! Mirrors the calendar screen: pick a slot or an event, edit it in the form,
//! then save, copy, delete or cancel. Nothing outlives the session.

use anyhow::Result;
use calman_core::config::{CalmanConfig, View};
use calman_core::event::{EventId, Language, Place};
use calman_core::form::FieldUpdate;
use calman_core::page::Outcome;
use calman_core::{CalendarPage, CalmanError};
use dialoguer::{Input, Select};
use owo_colors::OwoColorize;

use crate::input::{default_end, parse_datetime, parse_end};
use crate::prompt::TerminalConfirm;
use crate::render::{render_day, render_week, Render};

use super::resolve_date;

const MENU: [&str; 6] = [
    "Show week",
    "Show day",
    "New event in a slot",
    "Open event",
    "Move event",
    "Quit",
];

const EDITOR_MENU: [&str; 12] = [
    "Title",
    "Start",
    "End",
    "Toggle all-day",
    "Place",
    "Language",
    "Participants",
    "Toggle blocking",
    "Save",
    "Copy",
    "Delete",
    "Cancel",
];

pub fn run(mut page: CalendarPage, config: &CalmanConfig) -> Result<()> {
    print_grid(&page, config, config.initial_view, None)?;

    loop {
        println!();
        let choice = Select::new()
            .with_prompt("  Calendar")
            .items(&MENU)
            .default(0)
            .interact()?;

        let result = match choice {
            0 => prompt_date().and_then(|d| print_grid(&page, config, View::Week, d.as_deref())),
            1 => prompt_date().and_then(|d| print_grid(&page, config, View::Day, d.as_deref())),
            2 => select_slot(&mut page),
            3 => open_event(&mut page),
            4 => move_event(&mut page),
            _ => return Ok(()),
        };

        if let Err(e) = result {
            eprintln!("  {}", e.to_string().red());
            continue;
        }

        if page.is_editor_open() {
            edit(&mut page)?;
            println!();
            println!("{}", page.sidebar().render());
        }
    }
}

fn print_grid(page: &CalendarPage, config: &CalmanConfig, view: View, date: Option<&str>) -> Result<()> {
    let date = resolve_date(date, page.range())?;
    let grid = match view {
        View::Week => render_week(page.current_events(), date, config.first_day, page.range()),
        View::Day => render_day(page.current_events(), date, page.range()),
    };
    println!("{}", grid);
    Ok(())
}

fn prompt_date() -> Result<Option<String>> {
    let input: String = Input::new()
        .with_prompt("  Date (YYYY-MM-DD, empty for today)")
        .default(String::new())
        .show_default(false)
        .interact_text()?;
    Ok(if input.is_empty() { None } else { Some(input) })
}

fn select_slot(page: &mut CalendarPage) -> Result<()> {
    let start = prompt_with_retry("  When?", |s| parse_datetime(s))?;
    let hint = if start.is_date() { "1 day" } else { "1 hour" };

    let end = loop {
        let input: String = Input::new()
            .with_prompt(format!("  How long? ({})", hint))
            .default(String::new())
            .show_default(false)
            .interact_text()?;
        if input.is_empty() {
            break default_end(&start)?;
        }
        match parse_end(&input, &start) {
            Ok(end) => break end,
            Err(e) => eprintln!("  {}", e.to_string().red()),
        }
    };

    page.select_slot(calman_core::SlotSelection {
        start,
        end,
        all_day: start.is_date(),
    })?;
    Ok(())
}

fn pick_event(page: &CalendarPage, prompt: &str) -> Result<EventId> {
    let events = page.current_events();
    if events.is_empty() {
        anyhow::bail!("No events in the calendar");
    }

    let items: Vec<String> = events.iter().map(|e| e.render()).collect();
    let index = Select::new()
        .with_prompt(prompt)
        .items(&items)
        .default(0)
        .interact()?;
    Ok(events[index].id)
}

fn open_event(page: &mut CalendarPage) -> Result<()> {
    let id = pick_event(page, "  Open")?;
    page.click_event(id)?;
    Ok(())
}

fn move_event(page: &mut CalendarPage) -> Result<()> {
    let id = pick_event(page, "  Move")?;
    let start = prompt_with_retry("  New start", |s| parse_datetime(s))?;
    page.move_event(id, start, start.is_date())?;
    println!("{}", "  Moved".green());
    Ok(())
}

/// Editor loop: runs until the form is closed by save, copy, delete or cancel.
fn edit(page: &mut CalendarPage) -> Result<()> {
    let confirm = TerminalConfirm;

    while let Some(form) = page.editor() {
        println!();
        println!("{}", form.render());

        let choice = Select::new()
            .with_prompt("  Edit")
            .items(&EDITOR_MENU)
            .default(0)
            .interact()?;

        let intent = match choice {
            0..=7 => {
                if let Err(e) = edit_field(page, choice) {
                    eprintln!("  {}", e.to_string().red());
                }
                continue;
            }
            8 => match form.submit() {
                Ok(intent) => intent,
                Err(e) => {
                    eprintln!("  {}", e.to_string().red());
                    continue;
                }
            },
            9 => form.copy(),
            10 => form.delete(),
            _ => form.cancel(),
        };

        match page.handle(intent, &confirm) {
            Ok(Outcome::Created(id)) => println!("{}", format!("  Created ({})", id).green()),
            Ok(Outcome::Updated(_)) => println!("{}", "  Saved".green()),
            Ok(Outcome::Deleted(_)) => println!("{}", "  Deleted".green()),
            Ok(Outcome::Kept) | Ok(Outcome::Closed) => {}
            Err(CalmanError::Validation(e)) => eprintln!("  {}", e.to_string().red()),
            Err(e) => return Err(e.into()),
        }
    }

    Ok(())
}

fn edit_field(page: &mut CalendarPage, choice: usize) -> Result<()> {
    let Some(form) = page.editor_mut() else {
        return Ok(());
    };

    let update = match choice {
        0 => FieldUpdate::Title(
            Input::<String>::new()
                .with_prompt("  Title")
                .with_initial_text(form.draft().title.clone())
                .allow_empty(true)
                .interact_text()?,
        ),
        1 => FieldUpdate::Start(prompt_with_retry("  Start", |s| parse_datetime(s))?),
        2 => {
            let start = form.draft().start;
            FieldUpdate::End(prompt_with_retry("  End", |s| parse_end(s, &start))?)
        }
        3 => {
            form.toggle_all_day();
            return Ok(());
        }
        4 => FieldUpdate::Place(pick_optional("  Place", &Place::ALL)?),
        5 => FieldUpdate::Language(pick_optional("  Language", &Language::ALL)?),
        6 => FieldUpdate::AmountParticipants(
            Input::<u32>::new()
                .with_prompt("  Participants")
                .default(form.draft().extended.amount_participants)
                .interact_text()?,
        ),
        _ => FieldUpdate::Blocking(form.draft().overlap),
    };

    form.apply(update);
    Ok(())
}

fn pick_optional<T: Copy + std::fmt::Display>(prompt: &str, options: &[T]) -> Result<Option<T>> {
    let mut items = vec!["(none)".to_string()];
    items.extend(options.iter().map(|o| o.to_string()));

    let index = Select::new()
        .with_prompt(prompt)
        .items(&items)
        .default(0)
        .interact()?;

    Ok(index.checked_sub(1).map(|i| options[i]))
}

/// Prompt the user with retry on parse errors.
fn prompt_with_retry<T, F>(prompt: &str, parse: F) -> Result<T>
where
    F: Fn(&str) -> Result<T>,
{
    loop {
        let input: String = Input::new().with_prompt(prompt).interact_text()?;
        match parse(&input) {
            Ok(result) => return Ok(result),
            Err(e) => eprintln!("  {}", e.to_string().red()),
        }
    }
}
