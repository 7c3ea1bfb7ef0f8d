//! Mutation error types

use thiserror::Error;

use crate::api::ClientError;
use crate::schedule::ScheduleError;

/// Why a reschedule or cancel did not go through
#[derive(Error, Debug)]
pub enum MutationError {
    /// Candidate time equals the booking's current time; nothing was sent
    #[error("No changes detected")]
    NoChanges,

    /// Booking was already cancelled through this editor; nothing was sent
    #[error("Booking {0} has been deleted")]
    Deleted(String),

    /// Picked date and time do not form a valid appointment time
    #[error("Invalid appointment time: {0}")]
    Schedule(#[from] ScheduleError),

    /// Backend call failed or could not be made
    #[error("Backend request failed: {0}")]
    Client(#[from] ClientError),
}

impl MutationError {
    /// True for the no-op rejection, which never reaches the network
    pub fn is_no_op(&self) -> bool {
        matches!(self, MutationError::NoChanges)
    }
}

/// Result type alias for mutation flows
pub type MutationResult<T> = Result<T, MutationError>;
