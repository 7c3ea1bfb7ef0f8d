//! Reschedule and cancel flows
//!
//! Each flow returns its outcome to the caller. A successful write
//! invalidates the cached booking collection exactly once; a failed one
//! leaves the cache alone.

use chrono::{DateTime, NaiveDate, Utc};
use std::sync::Arc;

use super::editor::BookingEditor;
use super::error::{MutationError, MutationResult};
use crate::api::{BookingApi, ClientError, ClientResult, SessionProvider};
use crate::booking::{Booking, BookingUpdate};
use crate::cache::{QueryCache, QueryKey};
use crate::schedule::{compose_slot, ClinicTimeZone, TimeSlot};

/// Outcome of a successful reschedule
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rescheduled {
    pub booking_id: String,
    pub appt_date: DateTime<Utc>,
}

/// Outcome of a successful cancel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cancelled {
    pub booking_id: String,
}

/// Booking writes against the backend, with cache invalidation
pub struct BookingMutations {
    api: Arc<dyn BookingApi>,
    session: Arc<dyn SessionProvider>,
    cache: Arc<QueryCache<Vec<Booking>>>,
    zone: ClinicTimeZone,
}

impl BookingMutations {
    pub fn new(
        api: Arc<dyn BookingApi>,
        session: Arc<dyn SessionProvider>,
        cache: Arc<QueryCache<Vec<Booking>>>,
        zone: ClinicTimeZone,
    ) -> Self {
        Self {
            api,
            session,
            cache,
            zone,
        }
    }

    pub fn zone(&self) -> ClinicTimeZone {
        self.zone
    }

    pub fn cache(&self) -> &Arc<QueryCache<Vec<Booking>>> {
        &self.cache
    }

    /// Edit state for one booking, seeded in this flow's timezone
    pub fn editor(&self, booking: Booking) -> BookingEditor {
        BookingEditor::new(booking, self.zone)
    }

    fn token(&self) -> ClientResult<String> {
        self.session.token().ok_or(ClientError::Unauthenticated)
    }

    /// The instant a picked date and slot stand for
    pub fn candidate(&self, date: NaiveDate, slot: &TimeSlot) -> MutationResult<DateTime<Utc>> {
        Ok(self.zone.resolve(compose_slot(date, slot))?)
    }

    /// Move `booking` to `date` at `slot`
    pub async fn reschedule(
        &self,
        booking: &Booking,
        date: NaiveDate,
        slot: &TimeSlot,
    ) -> MutationResult<Rescheduled> {
        let candidate = self.candidate(date, slot)?;

        if candidate == booking.appt_date {
            tracing::warn!(booking_id = %booking.id, "Reschedule rejected: no changes");
            return Err(MutationError::NoChanges);
        }

        let token = self.token()?;
        if let Err(e) = self
            .api
            .update_booking(&token, &booking.id, &BookingUpdate::reschedule(candidate))
            .await
        {
            tracing::error!(booking_id = %booking.id, error = %e, "Error updating booking");
            return Err(e.into());
        }

        self.cache.invalidate(&QueryKey::Bookings).await;
        tracing::info!(
            booking_id = %booking.id,
            from = %booking.appt_date,
            to = %candidate,
            "Booking rescheduled"
        );

        Ok(Rescheduled {
            booking_id: booking.id.clone(),
            appt_date: candidate,
        })
    }

    /// Delete `booking`
    pub async fn cancel(&self, booking: &Booking) -> MutationResult<Cancelled> {
        let token = self.token()?;

        if let Err(e) = self.api.delete_booking(&token, &booking.id).await {
            tracing::error!(booking_id = %booking.id, error = %e, "Error deleting booking");
            return Err(e.into());
        }

        self.cache.invalidate(&QueryKey::Bookings).await;
        tracing::info!(booking_id = %booking.id, "Booking deleted");

        Ok(Cancelled {
            booking_id: booking.id.clone(),
        })
    }

    /// Bookings visible to the session, read through the cache
    pub async fn bookings(&self) -> ClientResult<Arc<Vec<Booking>>> {
        let token = self.token()?;
        self.cache
            .get_or_fetch(QueryKey::Bookings, || self.api.list_bookings(&token))
            .await
    }

    /// Look up one booking by id through the cached collection
    pub async fn find_booking(&self, id: &str) -> ClientResult<Option<Booking>> {
        let bookings = self.bookings().await?;
        Ok(bookings.iter().find(|b| b.id == id).cloned())
    }
}
