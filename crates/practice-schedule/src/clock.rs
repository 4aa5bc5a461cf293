//! "Now" as calendar fields in the reference timezone.
//!
//! The conversion goes from a UTC instant straight through `chrono-tz`, so the
//! host's local timezone never leaks into the result. The same instant yields
//! the same fields on a server in UTC and a laptop in Tokyo.

use chrono::{DateTime, Datelike, NaiveDate, Timelike, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::config::ScheduleConfig;

/// A clock reading resolved to the reference civil timezone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CivilDateTime {
    pub year: i32,
    /// 1-based month.
    pub month: u32,
    pub day: u32,
    /// 0-23.
    pub hour: u32,
}

impl CivilDateTime {
    pub fn new(year: i32, month: u32, day: u32, hour: u32) -> Self {
        Self {
            year,
            month,
            day,
            hour,
        }
    }

    /// The calendar date of this reading, or `None` if the fields do not form
    /// a real date.
    pub fn date(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, self.day)
    }
}

/// Reads the current time in one fixed timezone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CivilClock {
    timezone: Tz,
}

impl CivilClock {
    pub fn new(timezone: Tz) -> Self {
        Self { timezone }
    }

    pub fn from_config(config: &ScheduleConfig) -> Self {
        Self::new(config.timezone)
    }

    pub fn timezone(&self) -> Tz {
        self.timezone
    }

    /// The current instant as calendar fields in the reference timezone.
    pub fn now(&self) -> CivilDateTime {
        self.at(Utc::now())
    }

    /// Resolve an explicit instant to calendar fields in the reference
    /// timezone.
    pub fn at(&self, instant: DateTime<Utc>) -> CivilDateTime {
        let local = instant.with_timezone(&self.timezone);
        CivilDateTime {
            year: local.year(),
            month: local.month(),
            day: local.day(),
            hour: local.hour(),
        }
    }
}

impl Default for CivilClock {
    fn default() -> Self {
        Self::from_config(&ScheduleConfig::default())
    }
}
