//! Time slots
//!
//! A time slot is a wall-clock `HH:MM` value picked from a fixed set.

use chrono::{NaiveTime, Timelike};
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use super::error::{ScheduleError, ScheduleResult};

/// First selectable slot of the day (hour)
const FIRST_SLOT_HOUR: u32 = 9;

/// Last selectable slot of the day (hour, the `:30` slot is included)
const LAST_SLOT_HOUR: u32 = 16;

/// A validated `HH:MM` wall-clock time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimeSlot(NaiveTime);

impl TimeSlot {
    /// Parse a strict two-digit `HH:MM` string
    pub fn parse(input: &str) -> ScheduleResult<Self> {
        let re = Regex::new(r"^([01]\d|2[0-3]):([0-5]\d)$")
            .map_err(|e| ScheduleError::Pattern(e.to_string()))?;

        let caps = re
            .captures(input)
            .ok_or_else(|| ScheduleError::InvalidTime(input.to_string()))?;

        let hour: u32 = caps[1]
            .parse()
            .map_err(|_| ScheduleError::InvalidTime(input.to_string()))?;
        let minute: u32 = caps[2]
            .parse()
            .map_err(|_| ScheduleError::InvalidTime(input.to_string()))?;

        Self::from_hm(hour, minute).ok_or_else(|| ScheduleError::InvalidTime(input.to_string()))
    }

    /// Build a slot from hour and minute
    pub fn from_hm(hour: u32, minute: u32) -> Option<Self> {
        NaiveTime::from_hms_opt(hour, minute, 0).map(TimeSlot)
    }

    /// Slot for the hour and minute of `time`, dropping seconds
    pub fn from_time(time: NaiveTime) -> Self {
        Self::from_hm(time.hour(), time.minute()).unwrap_or(TimeSlot(time))
    }

    /// The wall-clock time of this slot (seconds are always zero)
    pub fn time(&self) -> NaiveTime {
        self.0
    }

    /// The clinic's selectable slots: every half hour from 09:00 to 16:30
    pub fn defaults() -> Vec<TimeSlot> {
        (FIRST_SLOT_HOUR..=LAST_SLOT_HOUR)
            .flat_map(|hour| [0, 30].into_iter().filter_map(move |m| Self::from_hm(hour, m)))
            .collect()
    }
}

impl fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.0.hour(), self.0.minute())
    }
}

impl FromStr for TimeSlot {
    type Err = ScheduleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for TimeSlot {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for TimeSlot {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        TimeSlot::parse(&raw).map_err(serde::de::Error::custom)
    }
}
