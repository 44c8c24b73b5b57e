//! # StudySpot Application
//!
//! Wires the booking rules from `studyspot-core` to the stores in
//! `studyspot-db` and exposes the operations the front end needs: browsing
//! spaces, signing in, booking a slot and managing bookings from the dashboard.
//!
//! ## Architecture
//!
//! - **Config**: environment-driven settings
//! - **Auth**: the mock credential check
//! - **Handlers**: one module per screen, each taking an explicit [`AppState`]
//!
//! There is no global state. Everything a handler touches lives in the
//! [`AppState`] it is given, including the clock.

/// Configuration loaded from the environment
pub mod config;
/// Mock authenticator
pub mod auth;
/// Operations behind each screen
pub mod handlers;

use std::sync::Arc;

use eyre::{Result, WrapErr};
use studyspot_core::clock::{Clock, SystemClock};
use studyspot_core::errors::BookingResult;
use studyspot_db::{BookingStore, CancellationLog, SessionStore, SharedStore, SpaceCatalog};
use tracing::info;

use crate::auth::MockAuthenticator;
use crate::config::AppConfig;

/// Everything a handler may read or change.
///
/// Built once at start-up and passed by reference, so tests can swap in an
/// in-memory store and a fixed clock.
pub struct AppState {
    /// Read-only list of bookable spaces
    pub catalog: SpaceCatalog,
    /// Active bookings
    pub bookings: BookingStore,
    /// History of cancelled bookings
    pub cancellations: CancellationLog,
    /// Signed-in user
    pub session: SessionStore,
    /// Credential check used by sign in
    pub auth: MockAuthenticator,
    /// Source of "now" for every time-based rule
    pub clock: Arc<dyn Clock>,
}

impl AppState {
    /// Opens every store on top of `kv`.
    ///
    /// # Errors
    ///
    /// * `BookingError::Storage` - a stored document could not be read or decoded
    pub fn new(
        kv: SharedStore,
        clock: Arc<dyn Clock>,
        catalog: SpaceCatalog,
        auth: MockAuthenticator,
    ) -> BookingResult<Self> {
        Ok(Self {
            bookings: BookingStore::open(kv.clone(), clock.clone())?,
            cancellations: CancellationLog::open(kv.clone())?,
            session: SessionStore::open(kv)?,
            catalog,
            auth,
            clock,
        })
    }

    /// Builds the production state: file-backed storage, the configured
    /// catalog and the system clock.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use studyspot_app::{AppState, config::AppConfig};
    ///
    /// fn example() -> eyre::Result<()> {
    ///     let config = AppConfig::from_env()?;
    ///     let state = AppState::from_config(&config)?;
    ///     println!("{} spaces listed", state.catalog.all().len());
    ///     Ok(())
    /// }
    /// ```
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let kv = studyspot_db::open_store(&config.data_dir)?;

        let catalog = match &config.catalog_path {
            Some(path) => SpaceCatalog::load(path),
            None => SpaceCatalog::builtin(),
        }
        .wrap_err("Failed to load the space catalog")?;

        let auth = MockAuthenticator::new(&config.demo_username, &config.demo_password);
        let state = Self::new(kv, Arc::new(SystemClock), catalog, auth)
            .wrap_err("Failed to open the booking stores")?;

        info!(
            "Loaded {} spaces and {} active bookings from {}",
            state.catalog.all().len(),
            state.bookings.len(),
            config.data_dir.display()
        );
        Ok(state)
    }
}
