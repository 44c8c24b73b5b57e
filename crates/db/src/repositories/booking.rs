use std::sync::Arc;

use chrono::NaiveDate;
use eyre::eyre;
use studyspot_core::BookingLookup;
use studyspot_core::clock::Clock;
use studyspot_core::errors::{BookingError, BookingResult};
use studyspot_core::models::{Booking, BookingDraft, BookingId, SpaceId, UserId};

use crate::kv::{KeyValueStore, get_json, set_json};
use crate::schema::BOOKINGS_KEY;

/// Active bookings, mirrored to the key-value store after every change.
///
/// `add` does not apply booking rules; callers validate first. The store only
/// refuses a second active booking for the same (space, date, slot label),
/// which it reports as a storage failure.
///
/// Every mutation re-reads the stored collection first, so several handles
/// over one key-value store never overwrite each other's bookings.
pub struct BookingStore {
    kv: Arc<dyn KeyValueStore>,
    clock: Arc<dyn Clock>,
    bookings: Vec<Booking>,
}

impl BookingStore {
    pub fn open(kv: Arc<dyn KeyValueStore>, clock: Arc<dyn Clock>) -> BookingResult<Self> {
        let bookings: Vec<Booking> = get_json(kv.as_ref(), BOOKINGS_KEY)?.unwrap_or_default();
        tracing::debug!("Loaded {} bookings", bookings.len());
        Ok(Self {
            kv,
            clock,
            bookings,
        })
    }

    pub fn add(&mut self, draft: BookingDraft) -> BookingResult<Booking> {
        self.reload()?;
        if self.has_conflict(draft.space_id, draft.date, &draft.time_slot) {
            return Err(BookingError::Storage(eyre!(
                "unique constraint violated: space {} on {} at {:?} is already booked",
                draft.space_id,
                draft.date,
                draft.time_slot
            )));
        }

        let created_at = self.clock.now();
        let next_free = match self.last_id() {
            Some(last) => last
                .checked_add(1)
                .ok_or_else(|| eyre!("booking id space exhausted after {last}"))?,
            None => i64::MIN,
        };
        let id = created_at.and_utc().timestamp_millis().max(next_free);
        let booking = Booking::from_draft(draft, id, created_at);

        self.bookings.push(booking.clone());
        if let Err(e) = self.persist() {
            self.bookings.pop();
            tracing::warn!("Rolled back booking {id}: {e:#}");
            return Err(e.into());
        }

        tracing::info!(
            "Booked space {} on {} ({}) as booking {}",
            booking.space_id,
            booking.date,
            booking.time_slot,
            booking.id
        );
        Ok(booking)
    }

    /// Removes a booking and hands it back; a second call for the same id is `NotFound`.
    pub fn cancel(&mut self, id: BookingId) -> BookingResult<Booking> {
        self.reload()?;
        let position = self
            .bookings
            .iter()
            .position(|b| b.id == id)
            .ok_or(BookingError::NotFound(id))?;

        let removed = self.bookings.remove(position);
        if let Err(e) = self.persist() {
            self.bookings.insert(position, removed);
            tracing::warn!("Rolled back cancellation of booking {id}: {e:#}");
            return Err(e.into());
        }

        tracing::info!("Cancelled booking {id}");
        Ok(removed)
    }

    /// Puts a removed booking back unchanged.
    pub fn restore(&mut self, booking: Booking) -> BookingResult<()> {
        self.reload()?;
        if self.get(booking.id).is_some()
            || self.has_conflict(booking.space_id, booking.date, &booking.time_slot)
        {
            return Err(BookingError::Storage(eyre!(
                "cannot restore booking {}: its slot is taken",
                booking.id
            )));
        }

        let id = booking.id;
        self.bookings.push(booking);
        if let Err(e) = self.persist() {
            self.bookings.pop();
            return Err(e.into());
        }
        tracing::info!("Restored booking {id}");
        Ok(())
    }

    pub fn get(&self, id: BookingId) -> Option<&Booking> {
        self.bookings.iter().find(|b| b.id == id)
    }

    /// Bookings belonging to `user_id`, in no particular order.
    pub fn list_by_user(&self, user_id: UserId) -> Vec<&Booking> {
        self.bookings.iter().filter(|b| b.user_id == user_id).collect()
    }

    pub fn has_conflict(&self, space_id: SpaceId, date: NaiveDate, label: &str) -> bool {
        self.bookings.as_slice().is_booked(space_id, date, label)
    }

    pub fn len(&self) -> usize {
        self.bookings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bookings.is_empty()
    }

    fn last_id(&self) -> Option<BookingId> {
        self.bookings.iter().map(|b| b.id).max()
    }

    /// Replaces the in-memory copy with what is currently stored.
    fn reload(&mut self) -> eyre::Result<()> {
        self.bookings = get_json(self.kv.as_ref(), BOOKINGS_KEY)?.unwrap_or_default();
        Ok(())
    }

    fn persist(&self) -> eyre::Result<()> {
        set_json(self.kv.as_ref(), BOOKINGS_KEY, &self.bookings)
    }
}

impl BookingLookup for BookingStore {
    fn is_booked(&self, space_id: SpaceId, date: NaiveDate, label: &str) -> bool {
        self.has_conflict(space_id, date, label)
    }
}
