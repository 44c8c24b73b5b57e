pub mod booking;
pub mod space;
pub mod user;

pub use booking::{Booking, BookingDraft, BookingId, CancellationRecord};
pub use space::{SlotDefinition, Space, SpaceId};
pub use user::{User, UserId};
