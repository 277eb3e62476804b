//! Geospatial primitives for WCLook.
//!
//! This crate provides:
//! - The `Coordinate` type used across the catalog and ranking crates
//! - Haversine great-circle distance calculations
//!
//! # Example
//!
//! ```
//! use wclook_geo::{haversine_distance_meters, Coordinate};
//!
//! let notre_dame = Coordinate::new(48.8530, 2.3499);
//! let sacre_coeur = Coordinate::new(48.8867, 2.3431);
//!
//! let distance = haversine_distance_meters(&notre_dame, &sacre_coeur);
//! assert!((distance - 3780.0).abs() < 50.0); // ~3.8 km
//! ```

mod haversine;

pub use haversine::{haversine_distance_km, haversine_distance_meters, EARTH_RADIUS_KM, EARTH_RADIUS_M};

/// A geographic coordinate with latitude and longitude (WGS-84 degrees).
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Coordinate {
    /// Latitude in degrees (-90 to 90)
    pub latitude: f64,
    /// Longitude in degrees (-180 to 180)
    pub longitude: f64,
}

impl Coordinate {
    /// The degenerate (0, 0) point used upstream to mean "no real
    /// position recorded". Catalog records missing a location default
    /// to this value.
    pub const SENTINEL: Coordinate = Coordinate {
        latitude: 0.0,
        longitude: 0.0,
    };

    /// Creates a new coordinate.
    ///
    /// No range validation is performed; out-of-range values flow
    /// straight into the distance formula.
    #[inline]
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }

    /// Returns true if the coordinate has in-range values.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.latitude >= -90.0
            && self.latitude <= 90.0
            && self.longitude >= -180.0
            && self.longitude <= 180.0
    }

    /// Converts degrees to radians for internal calculations.
    #[inline]
    pub(crate) fn to_radians(&self) -> (f64, f64) {
        (self.latitude.to_radians(), self.longitude.to_radians())
    }
}

impl From<(f64, f64)> for Coordinate {
    fn from((lat, lng): (f64, f64)) -> Self {
        Self::new(lat, lng)
    }
}
