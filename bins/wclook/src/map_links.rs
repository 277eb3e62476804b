//! Map navigation links.
//!
//! Builds the URL schemes the mobile app hands to the OS: Apple Maps,
//! the Google Maps app, and the Google Maps web fallback for hosts
//! without the app installed.

use wclook_geo::Coordinate;

/// Apple Maps directions URL.
pub fn apple_maps_url(destination: &Coordinate) -> String {
    format!(
        "maps://?daddr={},{}",
        destination.latitude, destination.longitude
    )
}

/// Google Maps app directions URL.
pub fn google_maps_app_url(destination: &Coordinate) -> String {
    format!(
        "comgooglemaps://?daddr={},{}",
        destination.latitude, destination.longitude
    )
}

/// Google Maps web directions URL (fallback when the app is absent).
pub fn google_maps_web_url(destination: &Coordinate) -> String {
    format!(
        "https://www.google.com/maps/dir/?daddr={},{}",
        destination.latitude, destination.longitude
    )
}
