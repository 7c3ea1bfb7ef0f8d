//! Date/time composition

use chrono::{NaiveDate, NaiveDateTime};

use super::error::ScheduleResult;
use super::slot::TimeSlot;

/// Combine a calendar date and an `HH:MM` time into one wall-clock timestamp.
///
/// The result carries no timezone; use [`ClinicTimeZone::resolve`] to pin it
/// to an instant.
///
/// [`ClinicTimeZone::resolve`]: super::ClinicTimeZone::resolve
pub fn compose(date: NaiveDate, time: &str) -> ScheduleResult<NaiveDateTime> {
    let slot = TimeSlot::parse(time)?;
    Ok(compose_slot(date, &slot))
}

/// Combine a calendar date with an already validated slot
pub fn compose_slot(date: NaiveDate, slot: &TimeSlot) -> NaiveDateTime {
    date.and_time(slot.time())
}
