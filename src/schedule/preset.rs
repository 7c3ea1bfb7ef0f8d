//! Quick date presets offered next to the calendar picker

use chrono::{Duration, NaiveDate};
use std::fmt;
use std::str::FromStr;

use super::error::{ScheduleError, ScheduleResult};

/// A date relative to today
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatePreset {
    Today,
    Tomorrow,
    InThreeDays,
    InAWeek,
}

impl DatePreset {
    /// All presets in display order
    pub const ALL: [DatePreset; 4] = [
        DatePreset::Today,
        DatePreset::Tomorrow,
        DatePreset::InThreeDays,
        DatePreset::InAWeek,
    ];

    /// Days after today
    pub fn offset_days(&self) -> i64 {
        match self {
            DatePreset::Today => 0,
            DatePreset::Tomorrow => 1,
            DatePreset::InThreeDays => 3,
            DatePreset::InAWeek => 7,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DatePreset::Today => "Today",
            DatePreset::Tomorrow => "Tomorrow",
            DatePreset::InThreeDays => "In 3 days",
            DatePreset::InAWeek => "In a week",
        }
    }

    /// The calendar date this preset points at
    pub fn resolve(&self, today: NaiveDate) -> NaiveDate {
        today + Duration::days(self.offset_days())
    }
}

impl fmt::Display for DatePreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for DatePreset {
    type Err = ScheduleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "today" | "0d" => Ok(DatePreset::Today),
            "tomorrow" | "1d" => Ok(DatePreset::Tomorrow),
            "3d" | "in 3 days" => Ok(DatePreset::InThreeDays),
            "1w" | "7d" | "in a week" => Ok(DatePreset::InAWeek),
            _ => Err(ScheduleError::InvalidDate(s.to_string())),
        }
    }
}

/// Parse a date given either as `YYYY-MM-DD` or as a preset name
pub fn parse_date_input(input: &str, today: NaiveDate) -> ScheduleResult<NaiveDate> {
    if let Ok(date) = NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d") {
        return Ok(date);
    }

    input
        .parse::<DatePreset>()
        .map(|preset| preset.resolve(today))
        .map_err(|_| ScheduleError::InvalidDate(input.to_string()))
}
