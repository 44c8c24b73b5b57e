use std::sync::Arc;

use chrono::NaiveDateTime;
use studyspot_core::errors::BookingResult;
use studyspot_core::models::{Booking, CancellationRecord, UserId};

use crate::kv::{KeyValueStore, get_json, set_json};
use crate::schema::CANCELLATIONS_KEY;

/// History of cancelled bookings. Entries are never removed, and nothing here
/// depends on the booking still existing in the active store.
pub struct CancellationLog {
    kv: Arc<dyn KeyValueStore>,
    records: Vec<CancellationRecord>,
}

impl CancellationLog {
    pub fn open(kv: Arc<dyn KeyValueStore>) -> BookingResult<Self> {
        let records: Vec<CancellationRecord> =
            get_json(kv.as_ref(), CANCELLATIONS_KEY)?.unwrap_or_default();
        Ok(Self { kv, records })
    }

    pub fn record(
        &mut self,
        booking: Booking,
        cancelled_at: NaiveDateTime,
    ) -> BookingResult<CancellationRecord> {
        let record = CancellationRecord {
            booking,
            cancelled_at,
        };
        self.records.insert(0, record.clone());

        if let Err(e) = set_json(self.kv.as_ref(), CANCELLATIONS_KEY, &self.records) {
            self.records.remove(0);
            tracing::warn!("Failed to log cancellation of booking {}: {e:#}", record.booking.id);
            return Err(e.into());
        }
        Ok(record)
    }

    /// All records, most recently cancelled first.
    pub fn list(&self) -> Vec<&CancellationRecord> {
        let mut records: Vec<_> = self.records.iter().collect();
        records.sort_by(|a, b| b.cancelled_at.cmp(&a.cancelled_at));
        records
    }

    pub fn list_by_user(&self, user_id: UserId) -> Vec<&CancellationRecord> {
        self.list()
            .into_iter()
            .filter(|r| r.booking.user_id == user_id)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
