use thiserror::Error;

use crate::models::{BookingId, SpaceId};

/// User-correctable problems with a booking submission.
///
/// The `Display` text is shown to the user verbatim.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please select a date")]
    MissingDate,

    #[error("Cannot book a date in the past")]
    PastDate,

    #[error("Please select a time slot")]
    MissingSlot,

    #[error("Invalid time slot selected")]
    InvalidSlot,

    #[error("Time passed (Unavailable to be booked)")]
    SlotPast,

    #[error("This time slot is already booked for the selected date")]
    SlotBooked,
}

#[derive(Error, Debug)]
pub enum BookingError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Booking not found: {0}")]
    NotFound(BookingId),

    #[error("Space not found: {0}")]
    SpaceNotFound(SpaceId),

    #[error("Authentication error: {0}")]
    Authentication(String),

    #[error("Sign in required")]
    Unauthenticated,

    #[error("Invalid catalog: {0}")]
    Catalog(String),

    #[error("Storage error: {0}")]
    Storage(#[from] eyre::Report),
}

impl BookingError {
    /// True for errors the user can fix by changing their input.
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            BookingError::Validation(_)
                | BookingError::SpaceNotFound(_)
                | BookingError::Authentication(_)
                | BookingError::Unauthenticated
        )
    }
}

pub type BookingResult<T> = Result<T, BookingError>;
