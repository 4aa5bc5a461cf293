//! Today's-game matching.
//!
//! A game is "today" when its date equals the reference-timezone date of the
//! clock reading, or when the reading is in hour 0 of the following day. The
//! grace hour keeps a late-running game highlighted just past midnight.

use chrono::{Duration, NaiveDate};

use crate::clock::CivilDateTime;
use crate::session::{parse_date_opt, GameEvent};

/// Readings with `hour` below this still count for the previous day.
const GRACE_HOURS: u32 = 1;

/// Decide whether an event on `event_date` counts as happening today.
///
/// Only the hour of `now` is consulted for the grace window: anything in hour
/// 0 of the next day matches, hour 1 and later does not.
pub fn is_today(event_date: Option<NaiveDate>, now: &CivilDateTime) -> bool {
    let (Some(event_date), Some(today)) = (event_date, now.date()) else {
        return false;
    };
    if event_date == today {
        return true;
    }
    now.hour < GRACE_HOURS && event_date.checked_add_signed(Duration::days(1)) == Some(today)
}

/// [`is_today`] over a raw `YYYY-MM-DD` string. Absent or malformed strings
/// never match.
pub fn is_today_str(event_date: Option<&str>, now: &CivilDateTime) -> bool {
    is_today(event_date.and_then(parse_date_opt), now)
}

impl GameEvent {
    pub fn is_today(&self, now: &CivilDateTime) -> bool {
        is_today(self.calendar_date(), now)
    }
}

/// The first game, in input order, that counts as today.
pub fn todays_game<'a>(games: &'a [GameEvent], now: &CivilDateTime) -> Option<&'a GameEvent> {
    games.iter().find(|game| game.is_today(now))
}

/// Games that are today or later, earliest first.
///
/// A game from yesterday is kept while it is still inside the grace hour.
/// Games without a usable date are left out. Games on the same date keep their
/// input order.
pub fn upcoming_games<'a>(games: &'a [GameEvent], now: &CivilDateTime) -> Vec<&'a GameEvent> {
    let Some(today) = now.date() else {
        return Vec::new();
    };
    let mut upcoming: Vec<(NaiveDate, &GameEvent)> = games
        .iter()
        .filter_map(|game| game.calendar_date().map(|date| (date, game)))
        .filter(|&(date, game)| date >= today || game.is_today(now))
        .collect();
    upcoming.sort_by_key(|&(date, _)| date);
    upcoming.into_iter().map(|(_, game)| game).collect()
}
