//! WASM bindings for practice-schedule.
//!
//! Exposes calendar lookups, period grouping, and today's-game matching to the
//! site's JavaScript front end via `wasm-bindgen`. All complex types are passed
//! as JSON strings.
//!
//! ## Build process
//!
//! ```sh
//! cargo build -p practice-schedule-wasm --target wasm32-unknown-unknown --release
//! wasm-bindgen --target web --out-dir web/pkg/ \
//!   target/wasm32-unknown-unknown/release/practice_schedule_wasm.wasm
//! ```
//!
//! The reference timezone is set at most once per module instance with
//! [`configure`] and falls back to the library default. The browser passes
//! `new Date().toISOString()` to [`civil_now_at`] rather than having Rust read
//! the clock, and the reading is resolved in that reference timezone, never
//! the viewer's.

use std::sync::OnceLock;

use chrono::{DateTime, Utc};
use practice_schedule::{CivilClock, CivilDateTime, PracticeSession, ScheduleConfig};
use serde::Serialize;
use wasm_bindgen::prelude::*;

/// The reference timezone for this module instance.
static REFERENCE: OnceLock<ScheduleConfig> = OnceLock::new();

// ---------------------------------------------------------------------------
// JSON helpers (plain `String` errors so they are testable off-wasm)
// ---------------------------------------------------------------------------

fn parse_sessions_json(json: &str) -> Result<Vec<PracticeSession>, String> {
    practice_schedule::sessions_from_json(json).map_err(|e| e.to_string())
}

fn to_json<T: Serialize>(value: &T) -> Result<String, String> {
    serde_json::to_string(value).map_err(|e| format!("Serialization error: {}", e))
}

fn parse_date(s: &str) -> Result<chrono::NaiveDate, String> {
    practice_schedule::parse_calendar_date(s).map_err(|e| e.to_string())
}

/// Store `timezone` as the reference zone. Repeating the same zone is a no-op;
/// switching to a different one after the first call is refused.
fn configure_impl(cell: &OnceLock<ScheduleConfig>, timezone: &str) -> Result<(), String> {
    let config = ScheduleConfig::with_timezone(timezone).map_err(|e| e.to_string())?;
    let stored = cell.get_or_init(|| config);
    if *stored == config {
        Ok(())
    } else {
        Err(format!(
            "Reference timezone already configured as {}",
            stored.timezone
        ))
    }
}

fn civil_now_at_impl(cell: &OnceLock<ScheduleConfig>, instant: &str) -> Result<String, String> {
    let config = cell.get().copied().unwrap_or_default();
    let instant = DateTime::parse_from_rfc3339(instant)
        .map_err(|e| format!("Invalid instant '{}': {}", instant, e))?
        .with_timezone(&Utc);
    to_json(&CivilClock::from_config(&config).at(instant))
}

fn is_today_impl(date: Option<&str>, now_json: &str) -> Result<bool, String> {
    let now: CivilDateTime =
        serde_json::from_str(now_json).map_err(|e| format!("Invalid clock JSON: {}", e))?;
    Ok(practice_schedule::is_today_str(date, &now))
}

fn lookup_impl(sessions_json: &str, date: &str) -> Result<String, String> {
    let sessions = parse_sessions_json(sessions_json)?;
    to_json(&practice_schedule::lookup(&sessions, parse_date(date)?))
}

fn has_any_occurrence_impl(sessions_json: &str, date: &str) -> Result<bool, String> {
    let sessions = parse_sessions_json(sessions_json)?;
    Ok(practice_schedule::has_any_occurrence(&sessions, parse_date(date)?))
}

fn group_by_period_impl(sessions_json: &str) -> Result<String, String> {
    let sessions = parse_sessions_json(sessions_json)?;
    to_json(&practice_schedule::group_by_period(&sessions))
}

fn expand_session_impl(session_json: &str) -> Result<String, String> {
    let session: PracticeSession =
        serde_json::from_str(session_json).map_err(|e| format!("Invalid session JSON: {}", e))?;
    to_json(&practice_schedule::expand(&session))
}

fn marked_dates_impl(sessions_json: &str, from: &str, to: &str) -> Result<String, String> {
    let sessions = parse_sessions_json(sessions_json)?;
    let (from, to) = (parse_date(from)?, parse_date(to)?);
    if from > to {
        return Err(format!("from ({}) must not be after to ({})", from, to));
    }
    to_json(&practice_schedule::marked_dates(&sessions, from, to))
}

fn js_err(message: String) -> JsValue {
    JsValue::from_str(&message)
}

// ---------------------------------------------------------------------------
// WASM exports
// ---------------------------------------------------------------------------

/// Set the reference IANA timezone for this module instance.
///
/// Call once at startup. Calling again with the same zone succeeds; a
/// different zone is rejected so every reading agrees on which day is today.
#[wasm_bindgen]
pub fn configure(timezone: &str) -> Result<(), JsValue> {
    configure_impl(&REFERENCE, timezone).map_err(js_err)
}

/// Resolve an RFC 3339 instant to `{year, month, day, hour}` in the reference
/// timezone.
///
/// Returns the reading as a JSON string, suitable for passing to [`is_today`].
#[wasm_bindgen(js_name = "civilNowAt")]
pub fn civil_now_at(instant: &str) -> Result<String, JsValue> {
    civil_now_at_impl(&REFERENCE, instant).map_err(js_err)
}

/// Whether a game on `date` (`YYYY-MM-DD`, or null) counts as today for the
/// clock reading `now_json`. Malformed or missing dates return `false`.
#[wasm_bindgen(js_name = "isToday")]
pub fn is_today(date: Option<String>, now_json: &str) -> Result<bool, JsValue> {
    is_today_impl(date.as_deref(), now_json).map_err(js_err)
}

/// Sessions active on `date`, as a JSON array ordered by `dayOrder` then start
/// time.
#[wasm_bindgen(js_name = "lookupSessions")]
pub fn lookup_sessions(sessions_json: &str, date: &str) -> Result<String, JsValue> {
    lookup_impl(sessions_json, date).map_err(js_err)
}

/// Whether any session is active on `date`.
#[wasm_bindgen(js_name = "hasAnyOccurrence")]
pub fn has_any_occurrence(sessions_json: &str, date: &str) -> Result<bool, JsValue> {
    has_any_occurrence_impl(sessions_json, date).map_err(js_err)
}

/// Sessions grouped by effective date range, as a JSON array of
/// `{effectiveFrom, effectiveTo, sessions}`.
#[wasm_bindgen(js_name = "groupByPeriod")]
pub fn group_by_period(sessions_json: &str) -> Result<String, JsValue> {
    group_by_period_impl(sessions_json).map_err(js_err)
}

/// Concrete `YYYY-MM-DD` dates of one session, as a JSON array.
#[wasm_bindgen(js_name = "expandSession")]
pub fn expand_session(session_json: &str) -> Result<String, JsValue> {
    expand_session_impl(session_json).map_err(js_err)
}

/// Dates in `from..=to` with at least one session, as a JSON array. An
/// inverted window is an error.
#[wasm_bindgen(js_name = "markedDates")]
pub fn marked_dates(sessions_json: &str, from: &str, to: &str) -> Result<String, JsValue> {
    marked_dates_impl(sessions_json, from, to).map_err(js_err)
}
