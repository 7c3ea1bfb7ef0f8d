//! User-facing notifications derived from mutation outcomes

use super::error::{MutationError, MutationResult};
use super::service::{Cancelled, Rescheduled};

pub const RESCHEDULED_MESSAGE: &str = "Appointment successfully rescheduled.";
pub const CANCELLED_MESSAGE: &str = "Appointment successfully deleted.";
pub const NO_CHANGES_MESSAGE: &str = "No changes detected.";
pub const UPDATE_FAILED_MESSAGE: &str = "Error updating the appointment. Please try again.";
pub const DELETE_FAILED_MESSAGE: &str = "Error deleting the appointment. Please try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Success,
    Error,
}

/// A short message for the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub level: ToastLevel,
    pub message: String,
}

impl Toast {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: ToastLevel::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: ToastLevel::Error,
            message: message.into(),
        }
    }

    pub fn for_reschedule(result: &MutationResult<Rescheduled>) -> Self {
        match result {
            Ok(_) => Self::success(RESCHEDULED_MESSAGE),
            Err(MutationError::NoChanges) => Self::error(NO_CHANGES_MESSAGE),
            Err(_) => Self::error(UPDATE_FAILED_MESSAGE),
        }
    }

    pub fn for_cancel(result: &MutationResult<Cancelled>) -> Self {
        match result {
            Ok(_) => Self::success(CANCELLED_MESSAGE),
            Err(_) => Self::error(DELETE_FAILED_MESSAGE),
        }
    }

    pub fn is_error(&self) -> bool {
        self.level == ToastLevel::Error
    }
}
