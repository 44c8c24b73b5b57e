//! Availability and booking rules for StudySpot.
//!
//! Nothing in this crate touches storage or the real clock directly; both are
//! passed in so every rule can be exercised deterministically.

pub mod availability;
pub mod clock;
pub mod errors;
pub mod format;
pub mod models;
pub mod time;

pub use availability::{
    BookingLookup, BookingRequest, SlotAvailability, SlotSelection, SlotState, classify,
    is_booking_past, slot_listing, validate_booking,
};
pub use clock::{Clock, FixedClock, SystemClock};
pub use errors::{BookingError, BookingResult, ValidationError};
