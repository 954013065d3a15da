mod commands;
mod input;
mod prompt;
mod render;

use std::path::PathBuf;

use anyhow::Result;
use calman_core::config::{CalmanConfig, View};
use calman_core::seed;
use calman_core::store::MemoryStore;
use calman_core::validation::Locale;
use calman_core::CalendarPage;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "calman")]
#[command(about = "View, create and edit calendar events without booking over blocked slots")]
struct Cli {
    /// Read configuration from this file instead of ~/.config/calman/config.toml
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Language of validation messages (de or en)
    #[arg(long, global = true)]
    locale: Option<Locale>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render the calendar grid and the event sidebar
    Show {
        /// Grid to show (week or day)
        #[arg(long)]
        view: Option<View>,

        /// Show the week/day containing this date (YYYY-MM-DD)
        #[arg(long)]
        date: Option<String>,

        /// Print the events as JSON instead
        #[arg(long)]
        json: bool,
    },
    /// Validate a time span against the calendar without saving it
    Check {
        /// Start date/time (e.g., "2021-01-04T11:00")
        #[arg(short, long)]
        start: String,

        /// End date/time or duration (e.g., "2021-01-04T13:00", "90m")
        #[arg(short, long)]
        end: String,

        /// Treat the span as whole days
        #[arg(long)]
        all_day: bool,
    },
    /// Create an event and show the resulting week
    New {
        title: String,

        /// Start date/time (e.g., "2021-01-05T15:00")
        #[arg(short, long)]
        start: String,

        /// End date/time
        #[arg(short, long, conflicts_with = "duration")]
        end: Option<String>,

        /// Duration (e.g., "1h", "30m")
        #[arg(short, long)]
        duration: Option<String>,

        /// Under de Brugg, Ähned am Bergli
        #[arg(long)]
        place: Option<String>,

        /// German, French, Italian, Schwitzerdütsch
        #[arg(long)]
        language: Option<String>,

        /// Expected number of participants
        #[arg(long, default_value_t = 0)]
        participants: u32,

        /// Block the slot for other events
        #[arg(long)]
        blocking: bool,
    },
    /// Interactive editor session
    Session,
}

fn main() -> Result<()> {
    init_logging();
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => CalmanConfig::load_from(path)?,
        None => CalmanConfig::load()?,
    };
    if let Some(locale) = cli.locale {
        config.locale = locale;
    }
    tracing::debug!(locale = %config.locale, range = %config.valid_range.start, "starting");

    let page = seeded_page(&config)?;

    match cli.command {
        Commands::Show { view, date, json } => {
            let view = view.unwrap_or(config.initial_view);
            commands::show::run(&page, &config, view, date.as_deref(), json)
        }
        Commands::Check {
            start,
            end,
            all_day,
        } => commands::check::run(page, &start, &end, all_day),
        Commands::New {
            title,
            start,
            end,
            duration,
            place,
            language,
            participants,
            blocking,
        } => commands::new::run(
            page,
            &config,
            commands::new::NewEvent {
                title,
                start,
                end,
                duration,
                place,
                language,
                participants,
                blocking,
            },
        ),
        Commands::Session => commands::session::run(page, &config),
    }
}

/// Log to stderr; quiet unless RUST_LOG says otherwise.
fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();
}

/// A page over a fresh store holding the start-up events.
fn seeded_page(config: &CalmanConfig) -> Result<CalendarPage> {
    let today = chrono::Local::now().date_naive();
    let store = MemoryStore::with_events(seed::initial_events(today, &config.valid_range))?;
    Ok(CalendarPage::new(store, config))
}
