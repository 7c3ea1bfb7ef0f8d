//! Booking Mutations
//!
//! Reschedule and cancel flows for a single booking.
//!
//! ## Flow
//!
//! 1. Compose the picked date and slot into an instant
//! 2. Reject the change if it equals the current time (no request)
//! 3. Send the authenticated `PUT` or `DELETE`
//! 4. On success invalidate [`QueryKey::Bookings`](crate::cache::QueryKey)
//! 5. Return the outcome; [`Toast`] turns it into a user message

mod editor;
mod error;
mod service;
mod toast;

#[cfg(test)]
pub(crate) mod testing;

pub use editor::BookingEditor;
pub use error::{MutationError, MutationResult};
pub use service::{BookingMutations, Cancelled, Rescheduled};
pub use toast::{Toast, ToastLevel};
