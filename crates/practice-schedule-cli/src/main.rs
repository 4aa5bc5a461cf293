//! `schedule` CLI — practice calendar lookups and today's-game checks over
//! JSON snapshots.
//!
//! ## Usage
//!
//! ```sh
//! # Current date and hour in the reference timezone
//! schedule now
//!
//! # Is a game on this date "today"? (pin the clock with --at)
//! schedule today --date 2025-03-14 --at 2025-03-15T04:30:00Z
//!
//! # Today's game from a list of game rows
//! schedule todays-game -i games.json
//!
//! # Sessions on a date, ordered by dayOrder then start time
//! schedule lookup -i sessions.json --date 2025-09-16
//!
//! # Sessions grouped by effective date range
//! schedule periods -i sessions.json
//!
//! # Concrete dates of every session
//! schedule expand -i sessions.json
//!
//! # Dates to mark on a month view
//! cat sessions.json | schedule marked --from 2025-09-01 --to 2025-09-30
//! ```
//!
//! The reference timezone comes from `--timezone`, then the
//! `PRACTICE_SCHEDULE_TIMEZONE` environment variable, then the built-in default.

use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate, Utc};
use clap::{Parser, Subcommand};
use practice_schedule::{
    CivilClock, CivilDateTime, GameEvent, PracticeSession, ScheduleConfig,
};
use serde::Serialize;
use std::io::{self, Read};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "schedule",
    version,
    about = "Practice calendar and today's-game CLI"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// IANA timezone used to decide which day is "today"
    #[arg(long, global = true)]
    timezone: Option<String>,

    /// Log skipped sessions and other diagnostics to stderr
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the current date and hour in the reference timezone
    Now {
        /// Use this RFC 3339 instant instead of the system clock
        #[arg(long)]
        at: Option<String>,
    },
    /// Print whether a game on the given date counts as today
    Today {
        /// Game date (YYYY-MM-DD)
        #[arg(long)]
        date: String,
        /// Use this RFC 3339 instant instead of the system clock
        #[arg(long)]
        at: Option<String>,
    },
    /// Print the first game from a JSON array that counts as today, or null
    TodaysGame {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Use this RFC 3339 instant instead of the system clock
        #[arg(long)]
        at: Option<String>,
    },
    /// Print the sessions active on a date
    Lookup {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Query date (YYYY-MM-DD)
        #[arg(long)]
        date: String,
    },
    /// Print sessions grouped by effective date range
    Periods {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
    },
    /// Print the concrete dates of every session
    Expand {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
    },
    /// Print the dates in a window that have at least one session
    Marked {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// First date of the window (YYYY-MM-DD)
        #[arg(long)]
        from: String,
        /// Last date of the window, inclusive (YYYY-MM-DD)
        #[arg(long)]
        to: String,
    },
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ExpandedSession<'a> {
    day_of_week: &'a str,
    team_type: &'a str,
    effective_from: &'a str,
    effective_to: &'a str,
    dates: Vec<NaiveDate>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = match cli.timezone.as_deref() {
        Some(name) => ScheduleConfig::with_timezone(name)?,
        None => ScheduleConfig::from_env().context("Failed to read timezone from environment")?,
    };
    debug!(timezone = %config.timezone, "using reference timezone");
    let clock = CivilClock::from_config(&config);

    match cli.command {
        Commands::Now { at } => {
            let now = read_clock(&clock, at.as_deref())?;
            print_json(&now)?;
        }
        Commands::Today { date, at } => {
            let date = practice_schedule::parse_calendar_date(&date)?;
            let now = read_clock(&clock, at.as_deref())?;
            println!("{}", practice_schedule::is_today(Some(date), &now));
        }
        Commands::TodaysGame { input, at } => {
            let games: Vec<GameEvent> = read_json(input.as_deref(), "games")?;
            let now = read_clock(&clock, at.as_deref())?;
            print_json(&practice_schedule::todays_game(&games, &now))?;
        }
        Commands::Lookup { input, date } => {
            let sessions = read_sessions(input.as_deref())?;
            let date = practice_schedule::parse_calendar_date(&date)?;
            print_json(&practice_schedule::lookup(&sessions, date))?;
        }
        Commands::Periods { input } => {
            let sessions = read_sessions(input.as_deref())?;
            print_json(&practice_schedule::group_by_period(&sessions))?;
        }
        Commands::Expand { input } => {
            let sessions = read_sessions(input.as_deref())?;
            let expanded: Vec<ExpandedSession<'_>> = sessions
                .iter()
                .map(|s| ExpandedSession {
                    day_of_week: &s.day_of_week,
                    team_type: &s.team_type,
                    effective_from: &s.effective_from,
                    effective_to: &s.effective_to,
                    dates: practice_schedule::expand(s),
                })
                .collect();
            print_json(&expanded)?;
        }
        Commands::Marked { input, from, to } => {
            let sessions = read_sessions(input.as_deref())?;
            let from = practice_schedule::parse_calendar_date(&from)?;
            let to = practice_schedule::parse_calendar_date(&to)?;
            if from > to {
                anyhow::bail!("--from ({}) must not be after --to ({})", from, to);
            }
            print_json(&practice_schedule::marked_dates(&sessions, from, to))?;
        }
    }

    Ok(())
}

/// Install a stderr subscriber. `RUST_LOG` wins unless `--verbose` is given.
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .with_ansi(false)
        .try_init();
}

/// Read the clock, or resolve a pinned RFC 3339 instant with the same clock.
fn read_clock(clock: &CivilClock, at: Option<&str>) -> Result<CivilDateTime> {
    match at {
        Some(raw) => {
            let instant = DateTime::parse_from_rfc3339(raw)
                .with_context(|| format!("Invalid --at instant: {}", raw))?;
            Ok(clock.at(instant.with_timezone(&Utc)))
        }
        None => Ok(clock.now()),
    }
}

/// Read session rows; unreadable rows are skipped, not fatal.
fn read_sessions(path: Option<&str>) -> Result<Vec<PracticeSession>> {
    let raw = read_input(path)?;
    practice_schedule::sessions_from_json(&raw).context("Failed to parse sessions JSON")
}

fn read_json<T: serde::de::DeserializeOwned>(path: Option<&str>, what: &str) -> Result<T> {
    let raw = read_input(path)?;
    serde_json::from_str(&raw).with_context(|| format!("Failed to parse {} JSON", what))
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let pretty = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    println!("{}", pretty);
    Ok(())
}
