//! # Slot State Classifier
//!
//! Every place that needs to know whether a slot can be booked goes through
//! this module: the slot listing shown next to a booking form, the checks run
//! when a booking is submitted, and the current/past split of a user's
//! bookings.
//!
//! ## Precedence
//!
//! For display, a slot that is both booked and already over is reported as
//! [`SlotState::Booked`]. A slot counts as over once its resolved end has
//! passed, so a slot viewed after midnight on an earlier date is still over.
//!
//! On submission the checks run in a fixed order and the first failure wins:
//!
//! 1. a date is selected and is not before today
//! 2. a slot is selected and exists on the space
//! 3. the slot has not ended yet
//! 4. nobody holds the slot on that date

use std::convert::Infallible;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::ValidationError;
use crate::models::{Booking, SlotDefinition, Space, SpaceId};
use crate::time::{has_slot_ended, is_past_date, is_slot_past};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SlotState {
    Available,
    Booked,
    Past,
}

impl SlotState {
    pub fn is_available(self) -> bool {
        self == SlotState::Available
    }
}

/// Answers whether an active booking holds a (space, date, slot label).
pub trait BookingLookup {
    fn is_booked(&self, space_id: SpaceId, date: NaiveDate, label: &str) -> bool;
}

impl<F> BookingLookup for F
where
    F: Fn(SpaceId, NaiveDate, &str) -> bool,
{
    fn is_booked(&self, space_id: SpaceId, date: NaiveDate, label: &str) -> bool {
        self(space_id, date, label)
    }
}

impl BookingLookup for [Booking] {
    fn is_booked(&self, space_id: SpaceId, date: NaiveDate, label: &str) -> bool {
        self.iter().any(|b| b.occupies(space_id, date, label))
    }
}

/// Classifies one slot of `space` on `date` as seen at `now`.
pub fn classify<L>(
    space: &Space,
    date: NaiveDate,
    slot: &SlotDefinition,
    now: NaiveDateTime,
    lookup: &L,
) -> SlotState
where
    L: BookingLookup + ?Sized,
{
    if lookup.is_booked(space.id, date, &slot.label) {
        SlotState::Booked
    } else if has_slot_ended(slot, date, now) {
        SlotState::Past
    } else {
        SlotState::Available
    }
}

/// One row of a space's slot listing for a given date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SlotAvailability {
    /// Position in the space's slot list. Form state only, never persisted.
    pub index: usize,
    pub label: String,
    pub state: SlotState,
}

/// Classifies every slot of `space` on `date`, in definition order.
pub fn slot_listing<L>(
    space: &Space,
    date: NaiveDate,
    now: NaiveDateTime,
    lookup: &L,
) -> Vec<SlotAvailability>
where
    L: BookingLookup + ?Sized,
{
    space
        .time_slots
        .iter()
        .enumerate()
        .map(|(index, slot)| SlotAvailability {
            index,
            label: slot.label.clone(),
            state: classify(space, date, slot, now, lookup),
        })
        .collect()
}

/// How a booking form refers to a slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlotSelection {
    Index(usize),
    Label(String),
}

impl SlotSelection {
    pub fn resolve<'a>(&self, space: &'a Space) -> Option<&'a SlotDefinition> {
        match self {
            SlotSelection::Index(index) => space.time_slots.get(*index),
            SlotSelection::Label(label) => space.slot(label),
        }
    }
}

impl FromStr for SlotSelection {
    type Err = Infallible;

    /// Numbers select by position, anything else by label.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Ok(match s.parse::<usize>() {
            Ok(index) => SlotSelection::Index(index),
            Err(_) => SlotSelection::Label(s.to_string()),
        })
    }
}

/// Raw booking form input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookingRequest {
    pub date: Option<NaiveDate>,
    pub slot: Option<SlotSelection>,
    pub notes: Option<String>,
}

/// Runs the submission checks and returns the selected date and slot on success.
pub fn validate_booking<'a, L>(
    space: &'a Space,
    request: &BookingRequest,
    now: NaiveDateTime,
    lookup: &L,
) -> Result<(NaiveDate, &'a SlotDefinition), ValidationError>
where
    L: BookingLookup + ?Sized,
{
    let result = check_request(space, request, now, lookup);
    if let Err(reason) = &result {
        debug!("Rejected booking for space {}: {}", space.id, reason);
    }
    result
}

fn check_request<'a, L>(
    space: &'a Space,
    request: &BookingRequest,
    now: NaiveDateTime,
    lookup: &L,
) -> Result<(NaiveDate, &'a SlotDefinition), ValidationError>
where
    L: BookingLookup + ?Sized,
{
    let date = request.date.ok_or(ValidationError::MissingDate)?;
    if is_past_date(date, now) {
        return Err(ValidationError::PastDate);
    }

    let slot = request
        .slot
        .as_ref()
        .ok_or(ValidationError::MissingSlot)?
        .resolve(space)
        .ok_or(ValidationError::InvalidSlot)?;

    if is_slot_past(slot, date, now) {
        return Err(ValidationError::SlotPast);
    }
    if lookup.is_booked(space.id, date, &slot.label) {
        return Err(ValidationError::SlotBooked);
    }

    Ok((date, slot))
}

/// Whether a booking on `date` for `slot` belongs in the past list.
///
/// Days before today are past, days after are current. On today the slot's
/// end decides; an unknown slot counts as current.
pub fn is_booking_past(date: NaiveDate, slot: Option<&SlotDefinition>, now: NaiveDateTime) -> bool {
    let today = now.date();
    if date < today {
        return true;
    }
    if date > today {
        return false;
    }
    slot.is_some_and(|slot| is_slot_past(slot, date, now))
}
