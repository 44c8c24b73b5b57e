//! # Time Arithmetic
//!
//! Turns a calendar date plus a slot's `"HH:MM"` bounds into concrete local
//! instants, and answers whether a slot on a given date has already ended.
//!
//! Overnight slots are slots whose end is not strictly after their start on
//! the same day (or whose end is exactly midnight). Their end instant rolls
//! over to the following calendar day with the same time of day.

use chrono::{Days, NaiveDate, NaiveDateTime, NaiveTime};

use crate::models::SlotDefinition;

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Resolves a slot on `date` to its `(start, end)` instants.
///
/// A missing `start` falls back to `end`; any time still missing is midnight.
/// Pure: never reads the clock.
pub fn resolve_slot_interval(
    date: NaiveDate,
    slot: &SlotDefinition,
) -> (NaiveDateTime, NaiveDateTime) {
    let end_time = slot.end.unwrap_or(NaiveTime::MIN);
    let start_time = slot.start.or(slot.end).unwrap_or(NaiveTime::MIN);

    let start = date.and_time(start_time);
    let mut end = date.and_time(end_time);

    if slot.end == Some(NaiveTime::MIN) || end <= start {
        end = end.checked_add_days(Days::new(1)).unwrap_or(end);
    }

    (start, end)
}

/// True if `slot` on `date` has already ended at `now`.
///
/// Only same-day slots are evaluated here; any other date returns false and
/// whole past days are the job of [`is_past_date`]. A slot without an end
/// time never ends.
pub fn is_slot_past(slot: &SlotDefinition, date: NaiveDate, now: NaiveDateTime) -> bool {
    if slot.end.is_none() || date != now.date() {
        return false;
    }
    let (_, end) = resolve_slot_interval(date, slot);
    now >= end
}

/// True if `slot` on `date` ended at or before `now`, whatever day `date` is.
///
/// Unlike [`is_slot_past`] this also covers earlier dates, including an
/// overnight slot from yesterday that finished this morning.
pub fn has_slot_ended(slot: &SlotDefinition, date: NaiveDate, now: NaiveDateTime) -> bool {
    if slot.end.is_none() {
        return false;
    }
    let (_, end) = resolve_slot_interval(date, slot);
    now >= end
}

/// True if the calendar day of `date` is strictly before today's.
pub fn is_past_date(date: NaiveDate, now: NaiveDateTime) -> bool {
    date < now.date()
}

/// Parses a `YYYY-MM-DD` date.
pub fn parse_date(text: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(text.trim(), DATE_FORMAT).ok()
}
