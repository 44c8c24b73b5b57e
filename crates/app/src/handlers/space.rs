//! # Space Handlers
//!
//! Browsing the catalog and the per-space availability shown beside the
//! booking form.

use chrono::NaiveDate;
use serde::Serialize;
use studyspot_core::availability::{SlotAvailability, slot_listing};
use studyspot_core::errors::{BookingError, BookingResult};
use studyspot_core::models::{Booking, Space, SpaceId, User};

use crate::AppState;

/// What the space page shows.
#[derive(Debug, Clone, Serialize)]
pub struct SpaceDetail {
    pub space: Space,
    /// Date the slot listing was computed for
    pub date: NaiveDate,
    pub slots: Vec<SlotAvailability>,
    /// The viewer's bookings for this space from today on, soonest first
    pub upcoming: Vec<Booking>,
}

/// Spaces whose name or location contains `term`; everything for a blank term.
pub fn search_spaces<'a>(state: &'a AppState, term: &str) -> Vec<&'a Space> {
    state.catalog.search(term)
}

/// Slot availability of one space on `date` (today when `None`).
///
/// # Errors
///
/// * `BookingError::SpaceNotFound` - no space has this id
pub fn space_detail(
    state: &AppState,
    space_id: SpaceId,
    date: Option<NaiveDate>,
    viewer: Option<&User>,
) -> BookingResult<SpaceDetail> {
    let space = state
        .catalog
        .lookup(space_id)
        .ok_or(BookingError::SpaceNotFound(space_id))?;

    let now = state.clock.now();
    let date = date.unwrap_or(now.date());
    let slots = slot_listing(space, date, now, &state.bookings);

    let mut upcoming: Vec<Booking> = match viewer {
        Some(user) => state
            .bookings
            .list_by_user(user.id)
            .into_iter()
            .filter(|b| b.space_id == space.id && b.date >= now.date())
            .cloned()
            .collect(),
        None => Vec::new(),
    };
    upcoming.sort_by(|a, b| a.date.cmp(&b.date));

    Ok(SpaceDetail {
        space: space.clone(),
        date,
        slots,
        upcoming,
    })
}
