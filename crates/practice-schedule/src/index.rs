//! Date lookup and period grouping over a full session collection.
//!
//! Every ordered output sorts sessions by `dayOrder`, then start time. Sorts are
//! stable, so sessions with identical keys keep their input order.

use std::collections::HashMap;

use chrono::{Duration, NaiveDate};
use serde::Serialize;

use crate::expander::{occurs_on, trace_exclusion};
use crate::session::{parse_date_opt, PracticeSession};

/// Sessions sharing one exact effective date range.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SchedulePeriod<'a> {
    pub effective_from: &'a str,
    pub effective_to: &'a str,
    pub sessions: Vec<&'a PracticeSession>,
}

/// The sessions scheduled on one date.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailySchedule<'a> {
    pub date: NaiveDate,
    pub sessions: Vec<&'a PracticeSession>,
}

/// One trace event per unusable session, once per collection-level call.
fn trace_exclusions(sessions: &[PracticeSession]) {
    sessions.iter().for_each(trace_exclusion);
}

fn sort_sessions(sessions: &mut [&PracticeSession]) {
    sessions.sort_by(|a, b| a.sort_key().cmp(&b.sort_key()));
}

/// All sessions active on `date`, ordered by `dayOrder` then start time.
///
/// Any number of sessions may share a date, e.g. two team types practicing
/// the same weekday in the same period.
pub fn lookup(sessions: &[PracticeSession], date: NaiveDate) -> Vec<&PracticeSession> {
    trace_exclusions(sessions);
    matching(sessions, date)
}

fn matching(sessions: &[PracticeSession], date: NaiveDate) -> Vec<&PracticeSession> {
    let mut matched: Vec<&PracticeSession> =
        sessions.iter().filter(|s| occurs_on(s, date)).collect();
    sort_sessions(&mut matched);
    matched
}

/// Whether any session is active on `date`. Used for calendar tile marking.
pub fn has_any_occurrence(sessions: &[PracticeSession], date: NaiveDate) -> bool {
    trace_exclusions(sessions);
    sessions.iter().any(|s| occurs_on(s, date))
}

/// Partition sessions by their exact `(effectiveFrom, effectiveTo)` pair.
///
/// Every session lands in exactly one period, including sessions whose
/// weekday or dates are malformed. Periods are ordered by start date (dates
/// that do not parse go last), then end, then first appearance.
pub fn group_by_period(sessions: &[PracticeSession]) -> Vec<SchedulePeriod<'_>> {
    let mut slots: HashMap<(&str, &str), usize> = HashMap::new();
    let mut periods: Vec<SchedulePeriod<'_>> = Vec::new();

    for session in sessions {
        let key = (session.effective_from.as_str(), session.effective_to.as_str());
        let idx = *slots.entry(key).or_insert_with(|| {
            periods.push(SchedulePeriod {
                effective_from: key.0,
                effective_to: key.1,
                sessions: Vec::new(),
            });
            periods.len() - 1
        });
        periods[idx].sessions.push(session);
    }

    for period in &mut periods {
        sort_sessions(&mut period.sessions);
    }
    periods.sort_by_cached_key(|p| {
        let from = parse_date_opt(p.effective_from);
        let to = parse_date_opt(p.effective_to);
        (from.is_none(), from, to.is_none(), to)
    });
    periods
}

/// Every date in `from..=to` with at least one session, with that date's
/// [`lookup`] result. Empty when `from > to`.
pub fn schedule_between(
    sessions: &[PracticeSession],
    from: NaiveDate,
    to: NaiveDate,
) -> Vec<DailySchedule<'_>> {
    trace_exclusions(sessions);
    let mut days = Vec::new();
    let mut cursor = Some(from);
    while let Some(date) = cursor.filter(|d| *d <= to) {
        let matched = matching(sessions, date);
        if !matched.is_empty() {
            days.push(DailySchedule {
                date,
                sessions: matched,
            });
        }
        cursor = date.checked_add_signed(Duration::days(1));
    }
    days
}

/// Dates in `from..=to` that should be marked on a calendar.
pub fn marked_dates(sessions: &[PracticeSession], from: NaiveDate, to: NaiveDate) -> Vec<NaiveDate> {
    trace_exclusions(sessions);
    let mut dates = Vec::new();
    let mut cursor = Some(from);
    while let Some(date) = cursor.filter(|d| *d <= to) {
        if sessions.iter().any(|s| occurs_on(s, date)) {
            dates.push(date);
        }
        cursor = date.checked_add_signed(Duration::days(1));
    }
    dates
}
