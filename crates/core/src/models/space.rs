use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

pub type SpaceId = u32;

/// A bookable study space as listed in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Space {
    pub id: SpaceId,
    pub name: String,
    pub location: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub hours: String,
    pub price: f64,
    #[serde(default)]
    pub rating: Option<f32>,
    #[serde(default)]
    pub amenities: Vec<String>,
    #[serde(default)]
    pub main_image: String,
    #[serde(default)]
    pub images: Vec<String>,
    pub time_slots: Vec<SlotDefinition>,
}

impl Space {
    /// Finds a slot by its label, the only stable key for a slot.
    pub fn slot(&self, label: &str) -> Option<&SlotDefinition> {
        self.time_slots.iter().find(|slot| slot.label == label)
    }

    /// Main image followed by the additional images.
    pub fn all_images(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.main_image.as_str())
            .filter(|img| !img.is_empty())
            .chain(self.images.iter().map(String::as_str))
    }
}

/// A fixed daily window a space can be booked for.
///
/// `end` at or before `start` (or exactly `00:00`) marks an overnight slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotDefinition {
    pub label: String,
    #[serde(default, with = "hhmm")]
    pub start: Option<NaiveTime>,
    #[serde(default, with = "hhmm")]
    pub end: Option<NaiveTime>,
}

impl SlotDefinition {
    pub fn new(label: impl Into<String>, start: NaiveTime, end: NaiveTime) -> Self {
        Self {
            label: label.into(),
            start: Some(start),
            end: Some(end),
        }
    }
}

/// `"HH:MM"` encoding for optional times of day.
mod hhmm {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    const FORMAT: &str = "%H:%M";

    pub fn serialize<S: Serializer>(value: &Option<NaiveTime>, s: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(time) => s.serialize_str(&time.format(FORMAT).to_string()),
            None => s.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<NaiveTime>, D::Error> {
        let raw: Option<String> = Option::deserialize(d)?;
        match raw.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(text) => NaiveTime::parse_from_str(text, FORMAT)
                .map(Some)
                .map_err(|e| D::Error::custom(format!("invalid time {text:?}: {e}"))),
        }
    }
}
