//! Edit state of one booking
//!
//! Tracks whether the booking is being edited and which date and slot are
//! picked. Selection survives failed attempts so the user can retry.

use chrono::{NaiveDate, NaiveDateTime};

use super::error::{MutationError, MutationResult};
use super::service::{BookingMutations, Cancelled, Rescheduled};
use crate::booking::Booking;
use crate::schedule::{ClinicTimeZone, DatePreset, TimeSlot};

#[derive(Debug, Clone)]
pub struct BookingEditor {
    booking: Booking,
    zone: ClinicTimeZone,
    editing: bool,
    deleted: bool,
    selected_date: NaiveDate,
    selected_slot: TimeSlot,
}

impl BookingEditor {
    /// Start out of edit mode with the booking's own date and time selected
    pub fn new(booking: Booking, zone: ClinicTimeZone) -> Self {
        let (selected_date, selected_slot) = current_selection(&booking, zone);
        Self {
            booking,
            zone,
            editing: false,
            deleted: false,
            selected_date,
            selected_slot,
        }
    }

    pub fn booking(&self) -> &Booking {
        &self.booking
    }

    pub fn is_editing(&self) -> bool {
        self.editing
    }

    pub fn is_deleted(&self) -> bool {
        self.deleted
    }

    pub fn selected_date(&self) -> NaiveDate {
        self.selected_date
    }

    pub fn selected_slot(&self) -> TimeSlot {
        self.selected_slot
    }

    /// Booking time as wall clock in the clinic timezone
    pub fn current_local(&self) -> NaiveDateTime {
        self.zone.localize(self.booking.appt_date)
    }

    /// Enter or leave edit mode. Leaving discards the selection.
    pub fn toggle_edit(&mut self) {
        if self.editing {
            let (date, slot) = current_selection(&self.booking, self.zone);
            self.selected_date = date;
            self.selected_slot = slot;
        }
        self.editing = !self.editing;
    }

    pub fn select_date(&mut self, date: NaiveDate) {
        self.selected_date = date;
    }

    pub fn select_preset(&mut self, preset: DatePreset, today: NaiveDate) {
        self.selected_date = preset.resolve(today);
    }

    pub fn select_slot(&mut self, slot: TimeSlot) {
        self.selected_slot = slot;
    }

    /// Reschedule to the current selection.
    ///
    /// On success edit mode closes and the local copy takes the new time.
    /// On failure nothing changes. A deleted booking sends nothing.
    pub async fn confirm(&mut self, mutations: &BookingMutations) -> MutationResult<Rescheduled> {
        self.ensure_live()?;
        let done = mutations
            .reschedule(&self.booking, self.selected_date, &self.selected_slot)
            .await?;

        self.booking.appt_date = done.appt_date;
        self.editing = false;
        Ok(done)
    }

    /// Cancel the booking. On success edit mode closes.
    pub async fn delete(&mut self, mutations: &BookingMutations) -> MutationResult<Cancelled> {
        self.ensure_live()?;
        let done = mutations.cancel(&self.booking).await?;

        self.editing = false;
        self.deleted = true;
        Ok(done)
    }

    fn ensure_live(&self) -> MutationResult<()> {
        if self.deleted {
            return Err(MutationError::Deleted(self.booking.id.clone()));
        }
        Ok(())
    }
}

fn current_selection(booking: &Booking, zone: ClinicTimeZone) -> (NaiveDate, TimeSlot) {
    let local = zone.localize(booking.appt_date);
    (local.date(), TimeSlot::from_time(local.time()))
}
