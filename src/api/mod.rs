//! Clinic Backend API
//!
//! Authenticated access to the booking endpoints.
//!
//! - `GET /api/v1/bookings` - List bookings visible to the session
//! - `PUT /api/v1/bookings/:id` - Reschedule a booking
//! - `DELETE /api/v1/bookings/:id` - Cancel a booking

mod client;
mod error;
mod session;

#[cfg(test)]
pub(crate) mod stub;

pub use client::{BookingApi, ClientConfig, HttpBookingApi, REQUEST_ID_HEADER};
pub use error::{ClientError, ClientResult};
pub use session::{SessionProvider, StaticSession};
