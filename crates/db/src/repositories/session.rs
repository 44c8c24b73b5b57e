use std::sync::Arc;

use studyspot_core::errors::BookingResult;
use studyspot_core::models::User;

use crate::kv::{KeyValueStore, get_json, set_json};
use crate::schema::SESSION_KEY;

/// The signed-in user, kept across restarts until sign out.
pub struct SessionStore {
    kv: Arc<dyn KeyValueStore>,
    user: Option<User>,
}

impl SessionStore {
    pub fn open(kv: Arc<dyn KeyValueStore>) -> BookingResult<Self> {
        let user = get_json(kv.as_ref(), SESSION_KEY)?;
        Ok(Self { kv, user })
    }

    pub fn current_user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn sign_in(&mut self, user: User) -> BookingResult<()> {
        set_json(self.kv.as_ref(), SESSION_KEY, &Some(&user))?;
        tracing::info!("Signed in as {}", user.username);
        self.user = Some(user);
        Ok(())
    }

    pub fn sign_out(&mut self) -> BookingResult<()> {
        set_json::<Option<User>>(self.kv.as_ref(), SESSION_KEY, &None)?;
        if let Some(user) = self.user.take() {
            tracing::info!("Signed out {}", user.username);
        }
        Ok(())
    }
}
