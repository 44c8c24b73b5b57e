//! Stand-in for a real identity provider: one hard-coded account.

use studyspot_core::errors::{BookingError, BookingResult};
use studyspot_core::models::User;

pub const INVALID_CREDENTIALS: &str = "Invalid username or password";

#[derive(Debug, Clone)]
pub struct MockAuthenticator {
    username: String,
    password: String,
}

impl MockAuthenticator {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    pub fn authenticate(&self, username: &str, password: &str) -> BookingResult<User> {
        if username != self.username || password != self.password {
            return Err(BookingError::Authentication(INVALID_CREDENTIALS.to_string()));
        }
        Ok(User {
            id: 1,
            username: self.username.clone(),
            name: "User".to_string(),
        })
    }
}
