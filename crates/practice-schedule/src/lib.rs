//! # practice-schedule
//!
//! Deterministic scheduling core for a team calendar.
//!
//! Expands recurring weekly practice sessions into concrete calendar dates,
//! answers "what is scheduled on this date", and decides whether a game counts
//! as "today" in one fixed reference timezone, no matter which timezone the
//! viewer's machine is set to.
//!
//! Every operation except [`CivilClock::now`] is a pure function over its
//! arguments. Malformed session rows never produce errors: they simply never
//! match a date.
//!
//! ## Modules
//!
//! - [`clock`] — "now" as calendar fields in the reference timezone
//! - [`today`] — today's-game matching with a post-midnight grace window
//! - [`expander`] — weekly session → list of concrete dates
//! - [`index`] — per-date lookup, period grouping, and range scans
//! - [`session`] — session and game input records
//! - [`config`] — reference timezone configuration
//! - [`error`] — Error types

pub mod clock;
pub mod config;
pub mod error;
pub mod expander;
pub mod index;
pub mod session;
pub mod today;

pub use clock::{CivilClock, CivilDateTime};
pub use config::ScheduleConfig;
pub use error::ScheduleError;
pub use expander::{expand, occurs_on, weekday_from_name, weekday_ordinal};
pub use index::{
    group_by_period, has_any_occurrence, lookup, marked_dates, schedule_between, DailySchedule,
    SchedulePeriod,
};
pub use session::{parse_calendar_date, sessions_from_json, GameEvent, PracticeSession};
pub use today::{is_today, is_today_str, todays_game, upcoming_games};
