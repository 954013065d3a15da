use anyhow::Result;
use calman_core::config::{CalmanConfig, View};
use calman_core::CalendarPage;

use crate::render::{render_day, render_week, Render};

use super::resolve_date;

pub fn run(
    page: &CalendarPage,
    config: &CalmanConfig,
    view: View,
    date: Option<&str>,
    json: bool,
) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(page.current_events())?);
        return Ok(());
    }

    let date = resolve_date(date, page.range())?;
    let grid = match view {
        View::Week => render_week(page.current_events(), date, config.first_day, page.range()),
        View::Day => render_day(page.current_events(), date, page.range()),
    };

    println!("{}", grid);
    println!();
    println!("{}", page.sidebar().render());
    Ok(())
}
