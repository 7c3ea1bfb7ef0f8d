//! Clinic timezone
//!
//! Wall-clock appointment times are entered without an offset. The clinic
//! timezone decides which instant they denote on the wire.

use chrono::{DateTime, FixedOffset, LocalResult, NaiveDateTime, TimeZone, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::error::{ScheduleError, ScheduleResult};

/// Timezone used to interpret wall-clock appointment times
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ClinicTimeZone {
    /// Timezone of the machine running the client
    #[default]
    Local,
    /// Coordinated Universal Time
    Utc,
    /// A fixed offset from UTC
    Fixed(FixedOffset),
}

impl ClinicTimeZone {
    /// Pin a wall-clock time to an instant.
    ///
    /// Ambiguous times (DST fall-back) take the earlier instant.
    pub fn resolve(&self, naive: NaiveDateTime) -> ScheduleResult<DateTime<Utc>> {
        let resolved = match self {
            ClinicTimeZone::Local => earliest(chrono::Local.from_local_datetime(&naive)),
            ClinicTimeZone::Utc => Some(Utc.from_utc_datetime(&naive)),
            ClinicTimeZone::Fixed(offset) => earliest(offset.from_local_datetime(&naive)),
        };

        resolved.ok_or(ScheduleError::NonexistentLocalTime(naive))
    }

    /// Wall-clock time of an instant in this timezone
    pub fn localize(&self, instant: DateTime<Utc>) -> NaiveDateTime {
        match self {
            ClinicTimeZone::Local => instant.with_timezone(&chrono::Local).naive_local(),
            ClinicTimeZone::Utc => instant.naive_utc(),
            ClinicTimeZone::Fixed(offset) => instant.with_timezone(offset).naive_local(),
        }
    }
}

fn earliest<Tz: TimeZone>(result: LocalResult<DateTime<Tz>>) -> Option<DateTime<Utc>> {
    result.earliest().map(|dt| dt.with_timezone(&Utc))
}

impl FromStr for ClinicTimeZone {
    type Err = ScheduleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        match normalized.as_str() {
            "local" => return Ok(ClinicTimeZone::Local),
            "utc" | "z" => return Ok(ClinicTimeZone::Utc),
            _ => {}
        }

        let re = Regex::new(r"^([+-])(\d{2}):?(\d{2})$")
            .map_err(|e| ScheduleError::Pattern(e.to_string()))?;
        let caps = re
            .captures(&normalized)
            .ok_or_else(|| ScheduleError::InvalidTimeZone(s.to_string()))?;

        let hours: i32 = caps[2]
            .parse()
            .map_err(|_| ScheduleError::InvalidTimeZone(s.to_string()))?;
        let minutes: i32 = caps[3]
            .parse()
            .map_err(|_| ScheduleError::InvalidTimeZone(s.to_string()))?;
        if minutes >= 60 {
            return Err(ScheduleError::InvalidTimeZone(s.to_string()));
        }

        let sign = if &caps[1] == "-" { -1 } else { 1 };
        FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
            .map(ClinicTimeZone::Fixed)
            .ok_or_else(|| ScheduleError::InvalidTimeZone(s.to_string()))
    }
}

impl fmt::Display for ClinicTimeZone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClinicTimeZone::Local => write!(f, "local"),
            ClinicTimeZone::Utc => write!(f, "utc"),
            ClinicTimeZone::Fixed(offset) => write!(f, "{}", offset),
        }
    }
}

impl TryFrom<String> for ClinicTimeZone {
    type Error = ScheduleError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ClinicTimeZone> for String {
    fn from(zone: ClinicTimeZone) -> Self {
        zone.to_string()
    }
}
