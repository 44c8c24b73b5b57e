//! Storage keys. Changing one orphans whatever was saved under the old name.

/// JSON array of active bookings.
pub const BOOKINGS_KEY: &str = "studyspot_bookings";

/// JSON object of the signed-in user, or `null`.
pub const SESSION_KEY: &str = "studyspot_user";

/// JSON array of cancellation records, newest first.
pub const CANCELLATIONS_KEY: &str = "cancelledBookings";
