//! Appointment Scheduling
//!
//! Pure helpers for turning a picked calendar date and time slot into an
//! appointment instant.
//!
//! - [`compose`]: date + `HH:MM` into a wall-clock timestamp
//! - [`ClinicTimeZone`]: wall-clock timestamp into an instant
//! - [`TimeSlot`]: the fixed set of selectable times
//! - [`DatePreset`]: today / tomorrow / in 3 days / in a week

mod compose;
mod display;
mod error;
mod preset;
mod slot;
mod zone;

pub use compose::{compose, compose_slot};
pub use display::{format_appointment, format_day_heading};
pub use error::{ScheduleError, ScheduleResult};
pub use preset::{parse_date_input, DatePreset};
pub use slot::TimeSlot;
pub use zone::ClinicTimeZone;
