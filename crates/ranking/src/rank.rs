//! The ranking pass: distance annotation and ordering.
//!
//! One pass maps every toilet to its haversine distance from the user's
//! position, attaches the distance, and sorts ascending. The sort is
//! stable, so equal distances keep their catalog order; there is no
//! secondary key.
//!
//! Sentinel rule: records missing a real position default to (0, 0)
//! upstream, and a latitude of exactly 0 marks such a record. Its
//! distance is forced to 0 regardless of the computed value, which
//! places unknown-location toilets at the front of the list. Only the
//! latitude is consulted; this mirrors the backing dataset's convention
//! (a toilet at latitude 0 is not a case this catalog contains).

use crate::error::RankingError;
use tracing::debug;
use wclook_catalog::Toilet;
use wclook_geo::{haversine_distance_meters, Coordinate};
use wclook_location::LocationProvider;

/// Rank toilets by distance from the provider's current position.
///
/// Resolves the position once, before any distance computation; if the
/// provider has no position the pass fails with
/// [`RankingError::LocationUnavailable`] and the input is not partially
/// processed. An empty input yields an empty, successful result.
pub fn rank<P>(toilets: Vec<Toilet>, provider: &P) -> Result<Vec<Toilet>, RankingError>
where
    P: LocationProvider + ?Sized,
{
    let origin = provider
        .current_position()
        .ok_or(RankingError::LocationUnavailable)?;
    Ok(rank_from(toilets, origin))
}

/// Rank toilets by distance from an already-resolved origin.
#[must_use]
pub fn rank_from(toilets: Vec<Toilet>, origin: Coordinate) -> Vec<Toilet> {
    let count = toilets.len();

    let mut ranked: Vec<Toilet> = toilets
        .into_iter()
        .map(|mut toilet| {
            let mut distance = haversine_distance_meters(&origin, &toilet.location);
            if toilet.location.latitude == 0.0 {
                distance = 0.0;
            }
            toilet.distance = Some(distance);
            toilet
        })
        .collect();

    // Vec::sort_by is stable; NaN cannot occur here but partial_cmp
    // still needs a total answer.
    ranked.sort_by(|a, b| {
        a.distance
            .partial_cmp(&b.distance)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    debug!(count, "Ranked toilets by distance");
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use wclook_catalog::Cleanliness;
    use wclook_location::{FixedLocationProvider, UnavailableLocationProvider};

    fn toilet(id: &str, lat: f64, lon: f64) -> Toilet {
        Toilet {
            id: id.to_string(),
            name: format!("Toilettes {id}"),
            location: Coordinate::new(lat, lon),
            address: String::new(),
            distance: None,
            is_accessible: false,
            cleanliness: Cleanliness::Average,
            is_open: true,
            opening_hours: None,
            reviews: vec![],
            note: String::new(),
            quality: 0,
            image: "toilet".to_string(),
        }
    }

    const ORIGIN: Coordinate = Coordinate { latitude: 48.8566, longitude: 2.3522 };

    #[test]
    fn test_orders_ascending_by_distance() {
        let toilets = vec![
            toilet("far", 48.8600, 2.3600),
            toilet("near", 48.8570, 2.3530),
        ];
        let ranked = rank_from(toilets, ORIGIN);
        let ids: Vec<&str> = ranked.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, ["near", "far"]);
        assert!(ranked[0].distance.unwrap() <= ranked[1].distance.unwrap());
    }

    #[test]
    fn test_sentinel_record_ranks_first() {
        // The documented counterintuitive case: the sentinel's forced 0
        // beats every real distance, so it leads the list.
        let toilets = vec![
            toilet("a", 48.8570, 2.3530), // ~70 m
            toilet("b", 0.0, 0.0),        // sentinel
            toilet("c", 48.8600, 2.3600), // ~650 m
        ];
        let ranked = rank_from(toilets, ORIGIN);
        let ids: Vec<&str> = ranked.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, ["b", "a", "c"]);

        assert_eq!(ranked[0].distance, Some(0.0));
        let a = ranked[1].distance.unwrap();
        assert!((a - 70.0).abs() < 20.0, "a: {a}");
        let c = ranked[2].distance.unwrap();
        assert!((c - 650.0).abs() < 60.0, "c: {c}");
    }

    #[test]
    fn test_sentinel_checks_latitude_only() {
        // Latitude 0 with a real longitude is still treated as a
        // sentinel; longitude 0 with a real latitude is not.
        let toilets = vec![toilet("lat0", 0.0, 50.0), toilet("lon0", 50.0, 0.0)];
        let ranked = rank_from(toilets, ORIGIN);

        let lat0 = ranked.iter().find(|t| t.id == "lat0").unwrap();
        assert_eq!(lat0.distance, Some(0.0));

        let lon0 = ranked.iter().find(|t| t.id == "lon0").unwrap();
        assert!(lon0.distance.unwrap() > 0.0);
    }

    #[test]
    fn test_equal_distances_keep_input_order() {
        // Two toilets at the same point, plus two sentinels.
        let toilets = vec![
            toilet("s1", 0.0, 1.0),
            toilet("twin1", 48.8570, 2.3530),
            toilet("s2", 0.0, 2.0),
            toilet("twin2", 48.8570, 2.3530),
        ];
        let ranked = rank_from(toilets, ORIGIN);
        let ids: Vec<&str> = ranked.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, ["s1", "s2", "twin1", "twin2"]);
    }

    #[test]
    fn test_empty_input_is_ok() {
        let provider = FixedLocationProvider::new(ORIGIN);
        let ranked = rank(vec![], &provider).unwrap();
        assert!(ranked.is_empty());
    }

    #[test]
    fn test_no_location_fails_before_any_work() {
        let provider = UnavailableLocationProvider::new();
        let result = rank(vec![toilet("a", 48.0, 2.0)], &provider);
        assert_eq!(result.unwrap_err(), RankingError::LocationUnavailable);
    }

    proptest! {
        #[test]
        fn rank_preserves_the_id_set(
            coords in proptest::collection::vec(
                (-80.0f64..80.0, -170.0f64..170.0), 0..40,
            )
        ) {
            let toilets: Vec<Toilet> = coords
                .iter()
                .enumerate()
                .map(|(i, (lat, lon))| toilet(&format!("t{i}"), *lat, *lon))
                .collect();
            let mut input_ids: Vec<String> =
                toilets.iter().map(|t| t.id.clone()).collect();

            let ranked = rank_from(toilets, ORIGIN);

            prop_assert_eq!(ranked.len(), input_ids.len());
            let mut output_ids: Vec<String> =
                ranked.iter().map(|t| t.id.clone()).collect();
            input_ids.sort();
            output_ids.sort();
            prop_assert_eq!(input_ids, output_ids);
        }

        #[test]
        fn ranked_distances_are_monotonic(
            coords in proptest::collection::vec(
                (-80.0f64..80.0, -170.0f64..170.0), 0..40,
            )
        ) {
            let toilets: Vec<Toilet> = coords
                .iter()
                .enumerate()
                .map(|(i, (lat, lon))| toilet(&format!("t{i}"), *lat, *lon))
                .collect();

            let ranked = rank_from(toilets, ORIGIN);

            for pair in ranked.windows(2) {
                prop_assert!(pair[0].distance.unwrap() <= pair[1].distance.unwrap());
            }
            for t in &ranked {
                prop_assert!(t.distance.is_some());
            }
        }
    }
}
