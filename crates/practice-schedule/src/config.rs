//! Reference timezone configuration.
//!
//! The whole system agrees on one IANA timezone for deciding which calendar
//! day "today" is. It is configured once, never per call.

use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::error::{Result, ScheduleError};

/// Environment variable consulted by [`ScheduleConfig::from_env`].
pub const TIMEZONE_ENV: &str = "PRACTICE_SCHEDULE_TIMEZONE";

/// The organization's home timezone, used when nothing else is configured.
pub const DEFAULT_TIMEZONE: Tz = chrono_tz::America::New_York;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleConfig {
    /// Reference civil timezone for "today" determination.
    pub timezone: Tz,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            timezone: DEFAULT_TIMEZONE,
        }
    }
}

impl ScheduleConfig {
    /// Build a config from an IANA timezone name (e.g. `"America/Chicago"`).
    ///
    /// # Errors
    /// Returns `ScheduleError::InvalidTimezone` if the name is not in the
    /// timezone database.
    pub fn with_timezone(name: &str) -> Result<Self> {
        let timezone = parse_timezone(name)?;
        Ok(Self { timezone })
    }

    /// Read the reference timezone from `PRACTICE_SCHEDULE_TIMEZONE`.
    ///
    /// An unset or blank variable yields the default config. A set but
    /// unrecognized value is an error rather than a silent fallback, since a
    /// wrong zone would shift every "today" decision.
    pub fn from_env() -> Result<Self> {
        Self::from_env_value(std::env::var(TIMEZONE_ENV).ok().as_deref())
    }

    fn from_env_value(value: Option<&str>) -> Result<Self> {
        match value.map(str::trim) {
            None | Some("") => Ok(Self::default()),
            Some(name) => Self::with_timezone(name),
        }
    }
}

/// Parse an IANA timezone string into `Tz`.
pub fn parse_timezone(name: &str) -> Result<Tz> {
    name.parse::<Tz>()
        .map_err(|_| ScheduleError::InvalidTimezone(name.to_string()))
}
