//! The toilet domain model.
//!
//! A `Toilet` is rebuilt from scratch on every catalog fetch; nothing is
//! merged across fetches. Only the `id` is stable between snapshots. The
//! `distance` field is request-scoped: it is attached by a ranking pass
//! and is meaningless outside the pass that produced it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use wclook_geo::Coordinate;

/// Average walking speed used for the walk-time estimate, in km/h.
const WALKING_SPEED_KMH: f64 = 3.5;

/// Cleanliness of a toilet as recorded in the catalog.
///
/// The wire strings are the French labels used by the existing dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Cleanliness {
    /// "Propre"
    #[serde(rename = "Propre")]
    Clean,
    /// "Moyenne"
    #[serde(rename = "Moyenne")]
    Average,
    /// "Sale"
    #[serde(rename = "Sale")]
    Dirty,
}

impl Default for Cleanliness {
    fn default() -> Self {
        Self::Average
    }
}

impl Cleanliness {
    /// The wire/display label.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Clean => "Propre",
            Self::Average => "Moyenne",
            Self::Dirty => "Sale",
        }
    }

    /// Parse the wire label; unknown labels fall back to `Average`.
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "Propre" => Some(Self::Clean),
            "Moyenne" => Some(Self::Average),
            "Sale" => Some(Self::Dirty),
            _ => None,
        }
    }
}

/// A user review attached to a toilet record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    /// Review identifier
    pub id: String,
    /// Author identifier
    pub user_id: String,
    /// Integer rating
    pub rating: i64,
    /// Free-text comment
    pub comment: String,
    /// When the review was written
    pub date: DateTime<Utc>,
}

/// Free-text opening hours, one entry per weekday.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpeningHours {
    /// Monday hours, free text
    pub monday: String,
    /// Tuesday hours, free text
    pub tuesday: String,
    /// Wednesday hours, free text
    pub wednesday: String,
    /// Thursday hours, free text
    pub thursday: String,
    /// Friday hours, free text
    pub friday: String,
    /// Saturday hours, free text
    pub saturday: String,
    /// Sunday hours, free text
    pub sunday: String,
}

/// A public toilet: one point of interest in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Toilet {
    /// Stable identifier, unique within a catalog snapshot
    pub id: String,
    /// Display name
    pub name: String,
    /// Geographic position; `Coordinate::SENTINEL` when none was recorded
    pub location: Coordinate,
    /// Street address
    pub address: String,
    /// Distance from the user's position in meters.
    ///
    /// `None` until a ranking pass has run over this snapshot.
    pub distance: Option<f64>,
    /// Whether the toilet is wheelchair accessible
    pub is_accessible: bool,
    /// Recorded cleanliness
    pub cleanliness: Cleanliness,
    /// Whether the toilet is currently marked open
    pub is_open: bool,
    /// Weekly opening hours, when the record carries them
    pub opening_hours: Option<OpeningHours>,
    /// User reviews
    pub reviews: Vec<Review>,
    /// Free-text note
    pub note: String,
    /// Small ordinal quality score (0 when unrated, 1..=3 otherwise)
    pub quality: u8,
    /// Cosmetic image reference
    pub image: String,
}

impl Toilet {
    /// Estimated walking time from the attached distance, at an average
    /// walking speed of 3.5 km/h.
    ///
    /// Returns `None` until a ranking pass has attached a distance.
    #[must_use]
    pub fn walk_duration(&self) -> Option<Duration> {
        let meters = self.distance?;
        let hours = (meters / 1000.0) / WALKING_SPEED_KMH;
        Some(Duration::from_secs_f64(hours * 3600.0))
    }

    /// The image reference to display, falling back to the generic
    /// `"toilet"` image when the record carries an empty one.
    #[must_use]
    pub fn image_name(&self) -> &str {
        if self.image.is_empty() {
            "toilet"
        } else {
            &self.image
        }
    }
}
