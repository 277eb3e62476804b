//! Parsing of raw backend records into typed toilets.
//!
//! Backend documents are loosely-typed field bags: every field may be
//! missing. Parsing substitutes a documented default per missing field
//! and reports each substitution as an [`AppliedDefault`] diagnostic so
//! that callers (and tests) can see exactly what was defaulted, instead
//! of defaults being applied silently.
//!
//! Default substitution rules:
//!
//! | Field | Default |
//! |---|---|
//! | name | "Nom non disponible" |
//! | location | (0, 0) sentinel |
//! | adress | "Adresse non disponible" |
//! | isAccessible | false |
//! | cleanliness | Average |
//! | isOpen | true |
//! | openingHours | absent (no hours) |
//! | note | "" |
//! | quality | 0 |
//! | image | "toilet" |
//!
//! A record without an `id` has no stable identity and is skipped
//! entirely. Reviews missing any field are skipped and counted.

use crate::model::{Cleanliness, OpeningHours, Review, Toilet};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fmt;
use tracing::debug;
use wclook_geo::Coordinate;

/// Placeholder name for records without one.
pub const DEFAULT_NAME: &str = "Nom non disponible";

/// Placeholder address for records without one.
pub const DEFAULT_ADDRESS: &str = "Adresse non disponible";

/// Image reference used when a record carries none.
pub const DEFAULT_IMAGE: &str = "toilet";

/// A raw toilet document as returned by the backend.
///
/// Every field is optional; `parse` decides what each absence means.
/// The `adress` spelling is the wire key used by the existing dataset.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawToiletRecord {
    /// Document identifier
    pub id: Option<String>,
    /// Display name
    pub name: Option<String>,
    /// Geographic position
    pub location: Option<RawGeoPoint>,
    /// Street address (wire key "adress")
    #[serde(rename = "adress")]
    pub address: Option<String>,
    /// Wheelchair accessibility flag
    #[serde(rename = "isAccessible")]
    pub is_accessible: Option<bool>,
    /// Cleanliness label ("Propre" / "Moyenne" / "Sale")
    pub cleanliness: Option<String>,
    /// Open flag
    #[serde(rename = "isOpen")]
    pub is_open: Option<bool>,
    /// Weekday name to free-text hours
    #[serde(rename = "openingHours")]
    pub opening_hours: Option<BTreeMap<String, String>>,
    /// Raw reviews
    pub reviews: Option<Vec<RawReview>>,
    /// Free-text note
    pub note: Option<String>,
    /// Quality score
    pub quality: Option<i64>,
    /// Image reference
    pub image: Option<String>,
}

/// A raw latitude/longitude pair.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct RawGeoPoint {
    /// Latitude in degrees
    pub latitude: f64,
    /// Longitude in degrees
    pub longitude: f64,
}

/// A raw review entry. Entries missing any field are skipped.
#[derive(Debug, Clone, Deserialize)]
pub struct RawReview {
    /// Review identifier
    pub id: Option<String>,
    /// Author identifier
    #[serde(rename = "userId")]
    pub user_id: Option<String>,
    /// Integer rating
    pub rating: Option<i64>,
    /// Free-text comment
    pub comment: Option<String>,
    /// Review timestamp (RFC 3339)
    pub date: Option<DateTime<Utc>>,
}

/// A field whose value was substituted with its default during parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppliedDefault {
    /// Missing name
    Name,
    /// Missing or unparsable location
    Location,
    /// Missing address
    Address,
    /// Missing accessibility flag
    Accessible,
    /// Missing or unknown cleanliness label
    Cleanliness,
    /// Missing open flag
    Open,
    /// Missing note
    Note,
    /// Missing or out-of-range quality
    Quality,
    /// Missing or empty image reference
    Image,
}

impl fmt::Display for AppliedDefault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Name => "name",
            Self::Location => "location",
            Self::Address => "address",
            Self::Accessible => "isAccessible",
            Self::Cleanliness => "cleanliness",
            Self::Open => "isOpen",
            Self::Note => "note",
            Self::Quality => "quality",
            Self::Image => "image",
        };
        f.write_str(name)
    }
}

/// One parsed record plus the diagnostics gathered while parsing it.
#[derive(Debug, Clone)]
pub struct ParseOutcome {
    /// The typed record
    pub toilet: Toilet,
    /// Fields that fell back to their defaults
    pub defaults: Vec<AppliedDefault>,
    /// Number of review entries dropped for missing fields
    pub skipped_reviews: usize,
}

/// Summary of a whole-catalog parse.
#[derive(Debug, Clone, Default)]
pub struct ParseReport {
    /// Records without an `id`, skipped entirely
    pub skipped_records: usize,
    /// Total defaulted fields across all records
    pub defaults_applied: usize,
    /// Total review entries dropped
    pub skipped_reviews: usize,
}

/// Parse a single raw record.
///
/// Returns `None` when the record has no `id` and therefore no stable
/// identity to attach anything to.
#[must_use]
pub fn parse_record(raw: RawToiletRecord) -> Option<ParseOutcome> {
    let id = raw.id?;
    let mut defaults = Vec::new();

    let name = field_or_default(raw.name, || DEFAULT_NAME.to_string(), AppliedDefault::Name, &mut defaults);
    let location = match raw.location {
        Some(point) => Coordinate::new(point.latitude, point.longitude),
        None => {
            defaults.push(AppliedDefault::Location);
            Coordinate::SENTINEL
        }
    };
    let address = field_or_default(
        raw.address,
        || DEFAULT_ADDRESS.to_string(),
        AppliedDefault::Address,
        &mut defaults,
    );
    let is_accessible =
        field_or_default(raw.is_accessible, || false, AppliedDefault::Accessible, &mut defaults);
    let cleanliness = match raw.cleanliness.as_deref().and_then(Cleanliness::from_label) {
        Some(value) => value,
        None => {
            defaults.push(AppliedDefault::Cleanliness);
            Cleanliness::default()
        }
    };
    let is_open = field_or_default(raw.is_open, || true, AppliedDefault::Open, &mut defaults);
    let note = field_or_default(raw.note, String::new, AppliedDefault::Note, &mut defaults);
    let quality = match raw.quality.and_then(|q| u8::try_from(q).ok()) {
        Some(q) => q,
        None => {
            defaults.push(AppliedDefault::Quality);
            0
        }
    };
    let image = match raw.image {
        Some(ref s) if !s.is_empty() => s.clone(),
        _ => {
            defaults.push(AppliedDefault::Image);
            DEFAULT_IMAGE.to_string()
        }
    };

    let opening_hours = raw.opening_hours.map(|hours| opening_hours_from_map(&hours));

    let mut reviews = Vec::new();
    let mut skipped_reviews = 0;
    for entry in raw.reviews.unwrap_or_default() {
        match parse_review(entry) {
            Some(review) => reviews.push(review),
            None => skipped_reviews += 1,
        }
    }

    Some(ParseOutcome {
        toilet: Toilet {
            id,
            name,
            location,
            address,
            distance: None,
            is_accessible,
            cleanliness,
            is_open,
            opening_hours,
            reviews,
            note,
            quality,
            image,
        },
        defaults,
        skipped_reviews,
    })
}

/// Parse a whole catalog snapshot, logging diagnostics per record.
#[must_use]
pub fn parse_records(raw: Vec<RawToiletRecord>) -> (Vec<Toilet>, ParseReport) {
    let mut toilets = Vec::with_capacity(raw.len());
    let mut report = ParseReport::default();

    for record in raw {
        match parse_record(record) {
            Some(outcome) => {
                if !outcome.defaults.is_empty() || outcome.skipped_reviews > 0 {
                    debug!(
                        toilet_id = %outcome.toilet.id,
                        defaults = %format_defaults(&outcome.defaults),
                        skipped_reviews = outcome.skipped_reviews,
                        "Applied defaults while parsing record"
                    );
                }
                report.defaults_applied += outcome.defaults.len();
                report.skipped_reviews += outcome.skipped_reviews;
                toilets.push(outcome.toilet);
            }
            None => {
                report.skipped_records += 1;
                debug!("Skipped record without an id");
            }
        }
    }

    (toilets, report)
}

fn field_or_default<T>(
    value: Option<T>,
    default: impl FnOnce() -> T,
    diagnostic: AppliedDefault,
    defaults: &mut Vec<AppliedDefault>,
) -> T {
    match value {
        Some(v) => v,
        None => {
            defaults.push(diagnostic);
            default()
        }
    }
}

fn parse_review(raw: RawReview) -> Option<Review> {
    Some(Review {
        id: raw.id?,
        user_id: raw.user_id?,
        rating: raw.rating?,
        comment: raw.comment?,
        date: raw.date?,
    })
}

fn opening_hours_from_map(hours: &BTreeMap<String, String>) -> OpeningHours {
    let day = |name: &str| hours.get(name).cloned().unwrap_or_default();
    OpeningHours {
        monday: day("monday"),
        tuesday: day("tuesday"),
        wednesday: day("wednesday"),
        thursday: day("thursday"),
        friday: day("friday"),
        saturday: day("saturday"),
        sunday: day("sunday"),
    }
}

fn format_defaults(defaults: &[AppliedDefault]) -> String {
    defaults
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(",")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record_from_json(value: serde_json::Value) -> RawToiletRecord {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_fully_populated_record() {
        let raw = record_from_json(json!({
            "id": "abc",
            "name": "Toilettes Rivoli",
            "location": {"latitude": 48.8566, "longitude": 2.3522},
            "adress": "12 rue de Rivoli",
            "isAccessible": true,
            "cleanliness": "Propre",
            "isOpen": false,
            "note": "Entrée dans la cour",
            "quality": 3,
            "image": "lion",
            "openingHours": {"monday": "9h-18h", "sunday": "fermé"},
            "reviews": [{
                "id": "r1",
                "userId": "u1",
                "rating": 4,
                "comment": "ok",
                "date": "2024-11-10T12:00:00Z"
            }]
        }));

        let outcome = parse_record(raw).unwrap();
        assert!(outcome.defaults.is_empty());
        assert_eq!(outcome.skipped_reviews, 0);

        let toilet = outcome.toilet;
        assert_eq!(toilet.id, "abc");
        assert_eq!(toilet.name, "Toilettes Rivoli");
        assert_eq!(toilet.cleanliness, Cleanliness::Clean);
        assert!(!toilet.is_open);
        assert_eq!(toilet.quality, 3);
        assert_eq!(toilet.reviews.len(), 1);
        assert_eq!(toilet.reviews[0].rating, 4);
        let hours = toilet.opening_hours.unwrap();
        assert_eq!(hours.monday, "9h-18h");
        assert_eq!(hours.tuesday, "");
        assert_eq!(hours.sunday, "fermé");
    }

    #[test]
    fn test_bare_record_gets_all_defaults() {
        let raw = record_from_json(json!({"id": "bare"}));
        let outcome = parse_record(raw).unwrap();

        let toilet = &outcome.toilet;
        assert_eq!(toilet.name, DEFAULT_NAME);
        assert_eq!(toilet.address, DEFAULT_ADDRESS);
        assert_eq!(toilet.location, Coordinate::SENTINEL);
        assert!(!toilet.is_accessible);
        assert_eq!(toilet.cleanliness, Cleanliness::Average);
        assert!(toilet.is_open);
        assert!(toilet.opening_hours.is_none());
        assert_eq!(toilet.quality, 0);
        assert_eq!(toilet.image, DEFAULT_IMAGE);
        assert!(toilet.distance.is_none());

        // Every defaultable field except openingHours is diagnosed.
        for field in [
            AppliedDefault::Name,
            AppliedDefault::Location,
            AppliedDefault::Address,
            AppliedDefault::Accessible,
            AppliedDefault::Cleanliness,
            AppliedDefault::Open,
            AppliedDefault::Note,
            AppliedDefault::Quality,
            AppliedDefault::Image,
        ] {
            assert!(outcome.defaults.contains(&field), "missing diagnostic {field}");
        }
    }

    #[test]
    fn test_unknown_cleanliness_defaults_to_average() {
        let raw = record_from_json(json!({"id": "x", "cleanliness": "Impeccable"}));
        let outcome = parse_record(raw).unwrap();
        assert_eq!(outcome.toilet.cleanliness, Cleanliness::Average);
        assert!(outcome.defaults.contains(&AppliedDefault::Cleanliness));
    }

    #[test]
    fn test_negative_quality_defaults_to_zero() {
        let raw = record_from_json(json!({"id": "x", "quality": -2}));
        let outcome = parse_record(raw).unwrap();
        assert_eq!(outcome.toilet.quality, 0);
        assert!(outcome.defaults.contains(&AppliedDefault::Quality));
    }

    #[test]
    fn test_incomplete_review_is_skipped() {
        let raw = record_from_json(json!({
            "id": "x",
            "reviews": [
                {"id": "r1", "userId": "u1", "rating": 5,
                 "comment": "super", "date": "2024-11-10T12:00:00Z"},
                {"id": "r2", "rating": 1}
            ]
        }));
        let outcome = parse_record(raw).unwrap();
        assert_eq!(outcome.toilet.reviews.len(), 1);
        assert_eq!(outcome.skipped_reviews, 1);
    }

    #[test]
    fn test_record_without_id_is_dropped() {
        let raw = record_from_json(json!({"name": "anonyme"}));
        assert!(parse_record(raw).is_none());
    }

    #[test]
    fn test_parse_records_report() {
        let raws = vec![
            record_from_json(json!({"id": "a"})),
            record_from_json(json!({"name": "no id"})),
            record_from_json(json!({
                "id": "b",
                "name": "Complet",
                "location": {"latitude": 1.0, "longitude": 2.0},
                "adress": "rue X",
                "isAccessible": false,
                "cleanliness": "Sale",
                "isOpen": true,
                "note": "",
                "quality": 1,
                "image": "elephant"
            })),
        ];

        let (toilets, report) = parse_records(raws);
        assert_eq!(toilets.len(), 2);
        assert_eq!(report.skipped_records, 1);
        // Record "a" contributes 9 defaults; record "b" none.
        assert_eq!(report.defaults_applied, 9);
    }
}
