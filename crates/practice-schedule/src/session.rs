//! Session and game input records.
//!
//! Records arrive as JSON snapshots from the site's database layer. Dates and
//! times stay as the raw strings they were stored as and are parsed on use,
//! so one malformed row cannot break deserialization of a whole schedule.
//! Missing or null fields fall back to empty values, which then fail closed
//! like any other malformed recurrence; rows that still cannot be read are
//! skipped by [`sessions_from_json`].

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Deserializer, Serialize};
use tracing::debug;

use crate::error::{Result, ScheduleError};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// A recurring weekly practice: one weekday, every week, between two dates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PracticeSession {
    /// Canonical English weekday name, e.g. `"Tuesday"`.
    #[serde(default, deserialize_with = "null_as_default")]
    pub day_of_week: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub start_time: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub end_time: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub team_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default = "default_active", deserialize_with = "null_as_active")]
    pub is_active: bool,
    /// Inclusive `YYYY-MM-DD`.
    #[serde(default, deserialize_with = "null_as_default")]
    pub effective_from: String,
    /// Inclusive `YYYY-MM-DD`.
    #[serde(default, deserialize_with = "null_as_default")]
    pub effective_to: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub day_order: i32,
}

fn default_active() -> bool {
    true
}

fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn null_as_active<'de, D>(deserializer: D) -> std::result::Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<bool>::deserialize(deserializer)?.unwrap_or_else(default_active))
}

impl PracticeSession {
    /// The inclusive effective date range, or `None` if either bound is
    /// unparseable or the range is inverted.
    pub fn effective_range(&self) -> Option<(NaiveDate, NaiveDate)> {
        let from = parse_date_opt(&self.effective_from)?;
        let to = parse_date_opt(&self.effective_to)?;
        (from <= to).then_some((from, to))
    }

    /// Start time as a clock time, accepting `HH:MM` and `HH:MM:SS`.
    pub fn start_clock_time(&self) -> Option<NaiveTime> {
        parse_clock_time(&self.start_time)
    }

    /// Sort key shared by every ordered output: `dayOrder`, then start time.
    ///
    /// Start times that parse compare as clock times and sort before ones that
    /// do not; the raw string breaks the remaining ties.
    pub(crate) fn sort_key(&self) -> (i32, bool, Option<NaiveTime>, &str) {
        let start = self.start_clock_time();
        (self.day_order, start.is_none(), start, self.start_time.as_str())
    }
}

/// A scheduled game. Only `date` is interpreted; everything else the site
/// stores on a game row is carried through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameEvent {
    #[serde(default)]
    pub date: Option<String>,
    #[serde(flatten)]
    pub details: serde_json::Map<String, serde_json::Value>,
}

impl GameEvent {
    pub fn new(date: Option<&str>) -> Self {
        Self {
            date: date.map(str::to_string),
            details: serde_json::Map::new(),
        }
    }

    /// The game's calendar date, if present and well formed.
    pub fn calendar_date(&self) -> Option<NaiveDate> {
        self.date.as_deref().and_then(parse_date_opt)
    }
}

/// Read a JSON array of session rows, one row at a time.
///
/// A row that cannot be read as a session even with lenient defaults (a row
/// that is not an object, a `dayOrder` of `"first"`) is skipped with a `debug`
/// event; the remaining rows are returned in input order.
///
/// # Errors
/// Returns `ScheduleError::InvalidSessions` only when the document itself is
/// not a JSON array.
pub fn sessions_from_json(json: &str) -> Result<Vec<PracticeSession>> {
    let rows: Vec<serde_json::Value> =
        serde_json::from_str(json).map_err(|e| ScheduleError::InvalidSessions(e.to_string()))?;
    Ok(rows
        .into_iter()
        .enumerate()
        .filter_map(|(row, value)| match serde_json::from_value(value) {
            Ok(session) => Some(session),
            Err(error) => {
                debug!(row, %error, "skipping unreadable session row");
                None
            }
        })
        .collect())
}

/// Parse a caller-supplied `YYYY-MM-DD` string.
///
/// # Errors
/// Returns `ScheduleError::InvalidDate` if the string is not a calendar date.
pub fn parse_calendar_date(s: &str) -> Result<NaiveDate> {
    parse_date_opt(s).ok_or_else(|| ScheduleError::InvalidDate(s.to_string()))
}

pub(crate) fn parse_date_opt(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), DATE_FORMAT).ok()
}

fn parse_clock_time(s: &str) -> Option<NaiveTime> {
    let s = s.trim();
    NaiveTime::parse_from_str(s, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M"))
        .ok()
}
