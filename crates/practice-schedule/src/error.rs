//! Error types for practice-schedule operations.
//!
//! Only configuration, caller-supplied query strings, and session documents
//! that are not JSON arrays can fail. Individual session and game rows never
//! produce errors; see [`crate::expander`] and [`crate::session`].

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScheduleError {
    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),

    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Invalid sessions JSON: {0}")]
    InvalidSessions(String),
}

pub type Result<T> = std::result::Result<T, ScheduleError>;
