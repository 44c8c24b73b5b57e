pub mod auth;
pub mod booking;
pub mod dashboard;
pub mod space;
