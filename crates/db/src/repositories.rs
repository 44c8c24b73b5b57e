pub mod booking;
pub mod cancellation;
pub mod session;

pub use booking::BookingStore;
pub use cancellation::CancellationLog;
pub use session::SessionStore;
