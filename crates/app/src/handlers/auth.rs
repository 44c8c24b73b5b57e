//! # Sign In Handlers

use studyspot_core::errors::{BookingError, BookingResult};
use studyspot_core::models::User;
use tracing::warn;

use crate::AppState;

/// Checks the credentials and starts a persisted session.
///
/// # Errors
///
/// * `BookingError::Authentication` - the username/password pair is wrong
/// * `BookingError::Storage` - the session could not be saved
pub fn login(state: &mut AppState, username: &str, password: &str) -> BookingResult<User> {
    let user = match state.auth.authenticate(username.trim(), password) {
        Ok(user) => user,
        Err(e) => {
            warn!("Rejected sign in for {:?}", username);
            return Err(e);
        }
    };
    state.session.sign_in(user.clone())?;
    Ok(user)
}

pub fn logout(state: &mut AppState) -> BookingResult<()> {
    state.session.sign_out()
}

pub fn current_user(state: &AppState) -> Option<&User> {
    state.session.current_user()
}

/// The signed-in user, or `BookingError::Unauthenticated`.
pub fn require_user(state: &AppState) -> BookingResult<User> {
    current_user(state)
        .cloned()
        .ok_or(BookingError::Unauthenticated)
}
