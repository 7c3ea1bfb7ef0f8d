//! Human-readable appointment formatting

use chrono::{Datelike, NaiveDate, NaiveDateTime};

/// Format an appointment as `Mar 1, 2024 | 09:00`
pub fn format_appointment(at: NaiveDateTime) -> String {
    at.format("%b %-d, %Y | %H:%M").to_string()
}

/// Format a day heading as `Friday, March 1st`
pub fn format_day_heading(date: NaiveDate) -> String {
    format!(
        "{}, {} {}{}",
        date.format("%A"),
        date.format("%B"),
        date.day(),
        ordinal_suffix(date.day())
    )
}

fn ordinal_suffix(day: u32) -> &'static str {
    if (11..=13).contains(&(day % 100)) {
        return "th";
    }
    match day % 10 {
        1 => "st",
        2 => "nd",
        3 => "rd",
        _ => "th",
    }
}
