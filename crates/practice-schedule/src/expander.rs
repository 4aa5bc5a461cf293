//! Weekly session expansion -- converts one practice session into the concrete
//! calendar dates it occurs on.
//!
//! A session recurs on one fixed weekday, every week, between two inclusive
//! dates. Sessions with an unknown weekday name or an unusable range expand to
//! nothing instead of failing.

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use tracing::debug;

use crate::session::PracticeSession;

/// Canonical weekday names, indexed by ordinal (Sunday = 0).
const WEEKDAY_NAMES: [(&str, Weekday); 7] = [
    ("Sunday", Weekday::Sun),
    ("Monday", Weekday::Mon),
    ("Tuesday", Weekday::Tue),
    ("Wednesday", Weekday::Wed),
    ("Thursday", Weekday::Thu),
    ("Friday", Weekday::Fri),
    ("Saturday", Weekday::Sat),
];

/// Map a canonical English weekday name to a `Weekday`.
///
/// Matching is exact and case-sensitive: `"tuesday"` and `"Tue"` are not
/// recognized.
pub fn weekday_from_name(name: &str) -> Option<Weekday> {
    WEEKDAY_NAMES
        .iter()
        .find(|(canonical, _)| *canonical == name)
        .map(|&(_, weekday)| weekday)
}

/// Ordinal 0-6 of a weekday, Sunday = 0.
pub fn weekday_ordinal(weekday: Weekday) -> u32 {
    weekday.num_days_from_sunday()
}

/// The recurrence of a session, or `None` if it cannot occur on any date.
fn recurrence(session: &PracticeSession) -> Option<(Weekday, NaiveDate, NaiveDate)> {
    let weekday = weekday_from_name(&session.day_of_week)?;
    let (from, to) = session.effective_range()?;
    Some((weekday, from, to))
}

/// Emit one `debug` event for a session that can never occur, naming the
/// field that disqualifies it. Silent for well-formed sessions.
pub(crate) fn trace_exclusion(session: &PracticeSession) {
    if weekday_from_name(&session.day_of_week).is_none() {
        debug!(
            day_of_week = %session.day_of_week,
            team_type = %session.team_type,
            "excluding session with unrecognized weekday"
        );
    } else if session.effective_range().is_none() {
        debug!(
            effective_from = %session.effective_from,
            effective_to = %session.effective_to,
            team_type = %session.team_type,
            "excluding session with unusable effective range"
        );
    }
}

/// Expand a session into every date in its effective range that falls on its
/// weekday, in ascending order.
///
/// Returns an empty list when `dayOfWeek` is not a canonical weekday name or
/// when the effective range is inverted or unparseable.
pub fn expand(session: &PracticeSession) -> Vec<NaiveDate> {
    let Some((weekday, from, to)) = recurrence(session) else {
        trace_exclusion(session);
        return Vec::new();
    };

    // Jump to the first matching weekday, then step a week at a time.
    let offset = (weekday_ordinal(weekday) + 7 - weekday_ordinal(from.weekday())) % 7;
    let mut dates = Vec::new();
    let mut cursor = from.checked_add_signed(Duration::days(i64::from(offset)));
    while let Some(date) = cursor.filter(|d| *d <= to) {
        dates.push(date);
        cursor = date.checked_add_signed(Duration::days(7));
    }
    dates
}

/// Whether `session` occurs on `date`, without materializing its dates.
///
/// Agrees with [`expand`]: `occurs_on(s, d) == expand(s).contains(&d)`.
/// Logs nothing, so it is safe to call once per day of a calendar window.
pub fn occurs_on(session: &PracticeSession, date: NaiveDate) -> bool {
    match recurrence(session) {
        Some((weekday, from, to)) => date.weekday() == weekday && from <= date && date <= to,
        None => false,
    }
}
