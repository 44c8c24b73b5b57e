//! # Booking Handlers
//!
//! Turns a filled-in booking form into a stored booking. All checks run
//! before anything is written, so a rejected request leaves every store as it
//! was.

use studyspot_core::availability::{BookingRequest, validate_booking};
use studyspot_core::errors::{BookingError, BookingResult};
use studyspot_core::models::{Booking, BookingDraft, SpaceId, User};
use tracing::info;

use crate::AppState;

/// Validates `request` for `space_id` and books it for `user`.
///
/// # Errors
///
/// * `BookingError::SpaceNotFound` - no space has this id
/// * `BookingError::Validation` - the first failed check, in this order:
///   missing date, past date, missing slot, unknown slot, slot over, slot taken
/// * `BookingError::Storage` - the booking could not be saved (nothing is kept)
pub fn submit_booking(
    state: &mut AppState,
    user: &User,
    space_id: SpaceId,
    request: &BookingRequest,
) -> BookingResult<Booking> {
    let space = state
        .catalog
        .lookup(space_id)
        .ok_or(BookingError::SpaceNotFound(space_id))?;

    let now = state.clock.now();
    let (date, slot) = validate_booking(space, request, now, &state.bookings)?;

    let draft = BookingDraft::new(user, space, date, slot, request.notes.clone());
    let booking = state.bookings.add(draft)?;

    info!(
        "{} booked {} for {} ({})",
        user.username, booking.space_name, booking.date, booking.time_slot
    );
    Ok(booking)
}
