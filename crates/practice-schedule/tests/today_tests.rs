//! Tests for today's-game matching, including the post-midnight grace hour.

use chrono::{NaiveDate, TimeZone, Utc};
use practice_schedule::{
    is_today, is_today_str, todays_game, upcoming_games, CivilClock, CivilDateTime, GameEvent,
};

fn date(y: i32, m: u32, d: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(y, m, d)
}

fn game(date: Option<&str>, opponent: &str) -> GameEvent {
    let mut game = GameEvent::new(date);
    game.details
        .insert("opponent".to_string(), serde_json::Value::from(opponent));
    game
}

fn opponent(game: &GameEvent) -> &str {
    game.details["opponent"].as_str().unwrap()
}

// ---------------------------------------------------------------------------
// Core matching
// ---------------------------------------------------------------------------

#[test]
fn absent_date_never_matches() {
    for hour in [0, 1, 12, 23] {
        assert!(!is_today(None, &CivilDateTime::new(2025, 3, 14, hour)));
        assert!(!is_today_str(None, &CivilDateTime::new(2025, 3, 14, hour)));
    }
}

#[test]
fn same_calendar_date_matches() {
    assert!(is_today(date(2025, 3, 14), &CivilDateTime::new(2025, 3, 14, 20)));
    assert!(is_today(date(2025, 3, 14), &CivilDateTime::new(2025, 3, 14, 0)));
    assert!(is_today(date(2025, 3, 14), &CivilDateTime::new(2025, 3, 14, 23)));
}

#[test]
fn grace_window_includes_hour_zero_of_next_day() {
    assert!(is_today_str(
        Some("2025-03-14"),
        &CivilDateTime::new(2025, 3, 15, 0)
    ));
}

#[test]
fn grace_window_expires_at_hour_one() {
    assert!(!is_today_str(
        Some("2025-03-14"),
        &CivilDateTime::new(2025, 3, 15, 1)
    ));
    assert!(!is_today_str(
        Some("2025-03-14"),
        &CivilDateTime::new(2025, 3, 15, 23)
    ));
}

#[test]
fn day_before_never_matches() {
    assert!(!is_today_str(
        Some("2025-03-14"),
        &CivilDateTime::new(2025, 3, 13, 23)
    ));
    assert!(!is_today_str(
        Some("2025-03-14"),
        &CivilDateTime::new(2025, 3, 13, 0)
    ));
}

#[test]
fn two_days_later_never_matches_even_at_hour_zero() {
    assert!(!is_today_str(
        Some("2025-03-14"),
        &CivilDateTime::new(2025, 3, 16, 0)
    ));
}

#[test]
fn grace_window_crosses_month_and_year_boundaries() {
    assert!(is_today_str(
        Some("2025-02-28"),
        &CivilDateTime::new(2025, 3, 1, 0)
    ));
    assert!(is_today_str(
        Some("2024-12-31"),
        &CivilDateTime::new(2025, 1, 1, 0)
    ));
    // 2024 is a leap year: Feb 28 is followed by Feb 29, not Mar 1.
    assert!(!is_today_str(
        Some("2024-02-28"),
        &CivilDateTime::new(2024, 3, 1, 0)
    ));
}

#[test]
fn malformed_inputs_never_match() {
    let now = CivilDateTime::new(2025, 3, 14, 12);
    assert!(!is_today_str(Some(""), &now));
    assert!(!is_today_str(Some("03/14/2025"), &now));
    assert!(!is_today_str(Some("2025-02-30"), &now));
    // A clock reading that is not a real date matches nothing.
    assert!(!is_today(date(2025, 2, 28), &CivilDateTime::new(2025, 2, 30, 0)));
}

// ---------------------------------------------------------------------------
// Clock + matcher together
// ---------------------------------------------------------------------------

#[test]
fn late_game_stays_today_in_reference_zone() {
    // 2025-03-15 04:30 UTC is 00:30 EDT on Mar 15: still Friday's game.
    let clock = CivilClock::new(chrono_tz::America::New_York);
    let now = clock.at(Utc.with_ymd_and_hms(2025, 3, 15, 4, 30, 0).unwrap());
    assert_eq!(now, CivilDateTime::new(2025, 3, 15, 0));
    assert!(is_today_str(Some("2025-03-14"), &now));

    // One hour later the grace window has closed.
    let later = clock.at(Utc.with_ymd_and_hms(2025, 3, 15, 5, 30, 0).unwrap());
    assert!(!is_today_str(Some("2025-03-14"), &later));
    assert!(is_today_str(Some("2025-03-15"), &later));
}

// ---------------------------------------------------------------------------
// Game lists
// ---------------------------------------------------------------------------

#[test]
fn todays_game_picks_first_match_in_input_order() {
    let games = vec![
        game(Some("2025-03-10"), "Hawks"),
        game(None, "TBD"),
        game(Some("2025-03-14"), "Wolves"),
        game(Some("2025-03-14"), "Bears"),
    ];
    let now = CivilDateTime::new(2025, 3, 14, 18);
    let found = todays_game(&games, &now).expect("a game today");
    assert_eq!(opponent(found), "Wolves");
}

#[test]
fn todays_game_none_when_nothing_matches() {
    let games = vec![game(Some("2025-03-10"), "Hawks"), game(None, "TBD")];
    assert!(todays_game(&games, &CivilDateTime::new(2025, 3, 14, 18)).is_none());
    assert!(todays_game(&[], &CivilDateTime::new(2025, 3, 14, 18)).is_none());
}

#[test]
fn upcoming_games_sorted_and_filtered() {
    let games = vec![
        game(Some("2025-03-20"), "Bears"),
        game(Some("2025-03-13"), "Hawks"),
        game(Some("2025-03-14"), "Wolves"),
        game(None, "TBD"),
        game(Some("not a date"), "Typo"),
        game(Some("2025-03-20"), "Owls"),
    ];
    let now = CivilDateTime::new(2025, 3, 14, 9);
    let names: Vec<&str> = upcoming_games(&games, &now)
        .into_iter()
        .map(opponent)
        .collect();
    assert_eq!(names, vec!["Wolves", "Bears", "Owls"]);
}

#[test]
fn upcoming_games_keeps_yesterday_inside_grace_hour() {
    let games = vec![
        game(Some("2025-03-15"), "Bears"),
        game(Some("2025-03-14"), "Wolves"),
    ];
    let names: Vec<&str> = upcoming_games(&games, &CivilDateTime::new(2025, 3, 15, 0))
        .into_iter()
        .map(opponent)
        .collect();
    assert_eq!(names, vec!["Wolves", "Bears"]);

    let names: Vec<&str> = upcoming_games(&games, &CivilDateTime::new(2025, 3, 15, 1))
        .into_iter()
        .map(opponent)
        .collect();
    assert_eq!(names, vec!["Bears"]);
}
