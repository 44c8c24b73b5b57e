//! # Dashboard Handlers
//!
//! The "My Bookings" view: upcoming and past bookings, the cancellation
//! history, and cancelling.

use serde::Serialize;
use studyspot_core::availability::is_booking_past;
use studyspot_core::errors::{BookingError, BookingResult};
use studyspot_core::models::{Booking, BookingId, CancellationRecord, User};
use tracing::{debug, warn};

use crate::AppState;

#[derive(Debug, Clone, Default, Serialize)]
pub struct Dashboard {
    /// Not yet over, most recently created first
    pub current: Vec<Booking>,
    /// Over, most recently created first
    pub past: Vec<Booking>,
    /// Cancelled, most recently cancelled first
    pub cancelled: Vec<CancellationRecord>,
}

impl Dashboard {
    pub fn is_empty(&self) -> bool {
        self.current.is_empty() && self.past.is_empty() && self.cancelled.is_empty()
    }
}

/// Splits `user`'s bookings into current and past as of now.
///
/// A booking dated today is past once its slot has ended. When its slot can
/// no longer be found in the catalog it stays current.
pub fn dashboard(state: &AppState, user: &User) -> Dashboard {
    let now = state.clock.now();

    let (mut past, mut current): (Vec<Booking>, Vec<Booking>) = state
        .bookings
        .list_by_user(user.id)
        .into_iter()
        .cloned()
        .partition(|booking| {
            let slot = state
                .catalog
                .lookup(booking.space_id)
                .and_then(|space| space.slot(&booking.time_slot));
            is_booking_past(booking.date, slot, now)
        });

    current.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    past.sort_by(|a, b| b.created_at.cmp(&a.created_at));

    let cancelled = state
        .cancellations
        .list_by_user(user.id)
        .into_iter()
        .cloned()
        .collect();

    Dashboard {
        current,
        past,
        cancelled,
    }
}

/// Cancels one of `user`'s bookings and logs it.
///
/// Returns `None` when there is nothing to cancel: the id is unknown, was
/// already cancelled, or belongs to someone else.
///
/// # Errors
///
/// * `BookingError::Storage` - the change could not be saved; the booking is
///   left active
pub fn cancel_booking(
    state: &mut AppState,
    user: &User,
    booking_id: BookingId,
) -> BookingResult<Option<CancellationRecord>> {
    let owned = state
        .bookings
        .get(booking_id)
        .is_some_and(|b| b.user_id == user.id);
    if !owned {
        debug!("Nothing to cancel for booking {booking_id}");
        return Ok(None);
    }

    let booking = match state.bookings.cancel(booking_id) {
        Ok(booking) => booking,
        Err(BookingError::NotFound(_)) => return Ok(None),
        Err(e) => return Err(e),
    };

    match state.cancellations.record(booking.clone(), state.clock.now()) {
        Ok(record) => Ok(Some(record)),
        Err(e) => {
            if let Err(restore_err) = state.bookings.restore(booking) {
                warn!("Booking {booking_id} was cancelled but not logged: {restore_err}");
            }
            Err(e)
        }
    }
}
