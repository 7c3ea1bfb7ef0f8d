//! # Dentbook
//!
//! Dental clinic booking client: list, reschedule and cancel appointments
//! against the clinic REST backend.
//!
//! ## Modules
//!
//! - [`schedule`]: date + time slot composition, clinic timezone, presets
//! - [`booking`]: booking documents as served by the backend
//! - [`routes`]: backend endpoints and frontend paths
//! - [`api`]: authenticated REST client
//! - [`cache`]: typed query cache with invalidation
//! - [`mutation`]: reschedule/cancel flows and per-booking edit state
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use dentbook::*;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load_default()?;
//!
//!     let mutations = BookingMutations::new(
//!         Arc::new(HttpBookingApi::new(config.client_config())),
//!         Arc::new(StaticSession::from_option(config.session.token.clone())),
//!         QueryCache::new(config.cache_config()),
//!         config.schedule.timezone,
//!     );
//!
//!     let bookings = mutations.bookings().await?;
//!     if let Some(booking) = bookings.first() {
//!         let mut editor = mutations.editor(booking.clone());
//!         editor.toggle_edit();
//!         editor.select_slot(TimeSlot::parse("10:30")?);
//!
//!         let result = editor.confirm(&mutations).await;
//!         println!("{}", Toast::for_reschedule(&result).message);
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod booking;
pub mod cache;
pub mod config;
pub mod logging;
pub mod mutation;
pub mod routes;
pub mod schedule;

pub use api::{
    BookingApi, ClientConfig, ClientError, ClientResult, HttpBookingApi, SessionProvider,
    StaticSession,
};

pub use booking::{Booking, BookingUpdate, DentistRef, UserRef};

pub use cache::{CacheStats, EntryState, QueryCache, QueryKey};

pub use config::{generate_default_config, Config, ConfigError, LoggingConfig};

pub use mutation::{
    BookingEditor, BookingMutations, Cancelled, MutationError, MutationResult, Rescheduled, Toast,
    ToastLevel,
};

pub use routes::{BackendRoutes, FrontendRoute};

pub use schedule::{
    compose, format_appointment, format_day_heading, ClinicTimeZone, DatePreset, ScheduleError,
    TimeSlot,
};
