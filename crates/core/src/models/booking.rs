use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use super::space::{SlotDefinition, Space, SpaceId};
use super::user::{User, UserId};

pub type BookingId = i64;

/// Everything needed to create a booking; the store assigns `id` and `created_at`.
///
/// User and space fields are copied at creation so later catalog or profile
/// changes never rewrite history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingDraft {
    pub user_id: UserId,
    pub user_name: String,
    pub space_id: SpaceId,
    pub space_name: String,
    pub space_location: String,
    pub price: f64,
    pub date: NaiveDate,
    pub time_slot: String,
    #[serde(default)]
    pub notes: Option<String>,
}

impl BookingDraft {
    pub fn new(
        user: &User,
        space: &Space,
        date: NaiveDate,
        slot: &SlotDefinition,
        notes: Option<String>,
    ) -> Self {
        Self {
            user_id: user.id,
            user_name: user.name.clone(),
            space_id: space.id,
            space_name: space.name.clone(),
            space_location: space.location.clone(),
            price: space.price,
            date,
            time_slot: slot.label.clone(),
            notes: notes.filter(|n| !n.trim().is_empty()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: BookingId,
    pub user_id: UserId,
    pub user_name: String,
    pub space_id: SpaceId,
    pub space_name: String,
    pub space_location: String,
    pub price: f64,
    pub date: NaiveDate,
    pub time_slot: String,
    #[serde(default)]
    pub notes: Option<String>,
    pub created_at: NaiveDateTime,
}

impl Booking {
    pub fn from_draft(draft: BookingDraft, id: BookingId, created_at: NaiveDateTime) -> Self {
        Self {
            id,
            user_id: draft.user_id,
            user_name: draft.user_name,
            space_id: draft.space_id,
            space_name: draft.space_name,
            space_location: draft.space_location,
            price: draft.price,
            date: draft.date,
            time_slot: draft.time_slot,
            notes: draft.notes,
            created_at,
        }
    }

    /// True if this booking occupies the given (space, date, slot label).
    pub fn occupies(&self, space_id: SpaceId, date: NaiveDate, label: &str) -> bool {
        self.space_id == space_id && self.date == date && self.time_slot == label
    }
}

/// Snapshot of a booking kept after it was cancelled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CancellationRecord {
    #[serde(flatten)]
    pub booking: Booking,
    pub cancelled_at: NaiveDateTime,
}
