//! Read-only list of bookable spaces.

use std::collections::HashSet;
use std::path::Path;

use eyre::WrapErr;
use studyspot_core::errors::{BookingError, BookingResult};
use studyspot_core::models::{Space, SpaceId};

const BUILTIN_SPACES: &str = include_str!("../data/spaces.json");

#[derive(Debug, Clone)]
pub struct SpaceCatalog {
    spaces: Vec<Space>,
}

impl SpaceCatalog {
    /// Validates and wraps a list of spaces.
    ///
    /// Space ids must be unique, slot labels unique within a space (bookings
    /// refer to slots by label), and prices finite and non-negative.
    pub fn new(spaces: Vec<Space>) -> BookingResult<Self> {
        let mut ids = HashSet::new();
        for space in &spaces {
            if !ids.insert(space.id) {
                return Err(BookingError::Catalog(format!("duplicate space id {}", space.id)));
            }
            if !space.price.is_finite() || space.price < 0.0 {
                return Err(BookingError::Catalog(format!(
                    "space {} has an invalid price {}",
                    space.id, space.price
                )));
            }
            let mut labels = HashSet::new();
            for slot in &space.time_slots {
                if !labels.insert(slot.label.as_str()) {
                    return Err(BookingError::Catalog(format!(
                        "space {} lists the slot {:?} twice",
                        space.id, slot.label
                    )));
                }
            }
        }
        Ok(Self { spaces })
    }

    pub fn from_json(json: &str) -> BookingResult<Self> {
        let spaces: Vec<Space> = serde_json::from_str(json)
            .map_err(|e| BookingError::Catalog(format!("unreadable catalog: {e}")))?;
        Self::new(spaces)
    }

    pub fn load(path: impl AsRef<Path>) -> BookingResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .wrap_err_with(|| format!("Failed to read catalog {}", path.display()))?;
        let catalog = Self::from_json(&json)?;
        tracing::debug!("Loaded {} spaces from {}", catalog.spaces.len(), path.display());
        Ok(catalog)
    }

    /// The catalog shipped with the application.
    pub fn builtin() -> BookingResult<Self> {
        Self::from_json(BUILTIN_SPACES)
    }

    pub fn lookup(&self, id: SpaceId) -> Option<&Space> {
        self.spaces.iter().find(|space| space.id == id)
    }

    pub fn all(&self) -> &[Space] {
        &self.spaces
    }

    /// Case-insensitive match on name or location. A blank term matches everything.
    pub fn search(&self, term: &str) -> Vec<&Space> {
        let term = term.trim().to_lowercase();
        self.spaces
            .iter()
            .filter(|space| {
                term.is_empty()
                    || space.name.to_lowercase().contains(&term)
                    || space.location.to_lowercase().contains(&term)
            })
            .collect()
    }
}
