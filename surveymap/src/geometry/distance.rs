//! Great-circle distance along measured paths.

use super::types::GeoPoint;
use super::units::DistanceMeasurement;

/// Mean Earth radius in metres, as used by the web map SDK's distance helpers.
pub const EARTH_RADIUS_METERS: f64 = 6_371_008.8;

/// Haversine great-circle distance between two points, in metres.
pub fn haversine_distance(a: GeoPoint, b: GeoPoint) -> f64 {
    let lat1 = a.lat.to_radians();
    let lat2 = b.lat.to_radians();
    let dlat = (b.lat - a.lat).to_radians();
    let dlon = (b.lon - a.lon).to_radians();

    let h = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    EARTH_RADIUS_METERS * c
}

/// One leg of a measured path.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PathSegment {
    pub from: GeoPoint,
    pub to: GeoPoint,
    /// Great-circle length of this leg
    pub distance: DistanceMeasurement,
}

impl PathSegment {
    /// Where a segment label sits: the arithmetic midpoint of the endpoints.
    pub fn midpoint(&self) -> GeoPoint {
        GeoPoint::new(
            (self.from.lon + self.to.lon) / 2.0,
            (self.from.lat + self.to.lat) / 2.0,
        )
    }
}

/// Result of measuring a clicked path.
#[derive(Debug, Clone, PartialEq)]
pub struct PathMeasurement {
    pub segments: Vec<PathSegment>,
    pub total: DistanceMeasurement,
}

/// Measures every leg of a path plus the running total.
///
/// Paths with fewer than two points have no segments and a zero total.
pub fn path_length(path: &[GeoPoint]) -> PathMeasurement {
    let segments: Vec<PathSegment> = path
        .windows(2)
        .map(|pair| PathSegment {
            from: pair[0],
            to: pair[1],
            distance: DistanceMeasurement::from_meters(haversine_distance(pair[0], pair[1])),
        })
        .collect();

    let total = segments.iter().map(|s| s.distance.meters()).sum();

    PathMeasurement {
        segments,
        total: DistanceMeasurement::from_meters(total),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_degree_of_longitude_at_equator() {
        let d = haversine_distance(GeoPoint::new(0.0, 0.0), GeoPoint::new(1.0, 0.0));
        let expected = EARTH_RADIUS_METERS * std::f64::consts::PI / 180.0;
        assert!((d - expected).abs() < 1e-6);
        assert!((d - 111_195.08).abs() < 0.1);
    }

    #[test]
    fn test_distance_is_symmetric_and_zero_on_self() {
        let a = GeoPoint::new(77.6, 13.0);
        let b = GeoPoint::new(77.61, 13.01);
        assert_eq!(haversine_distance(a, a), 0.0);
        assert!((haversine_distance(a, b) - haversine_distance(b, a)).abs() < 1e-9);
    }

    #[test]
    fn test_path_length_sums_segments() {
        let path = [
            GeoPoint::new(0.0, 0.0),
            GeoPoint::new(0.01, 0.0),
            GeoPoint::new(0.01, 0.01),
        ];
        let m = path_length(&path);

        assert_eq!(m.segments.len(), 2);
        let sum: f64 = m.segments.iter().map(|s| s.distance.meters()).sum();
        assert!((m.total.meters() - sum).abs() < 1e-9);
        assert!((m.segments[0].midpoint().lon - 0.005).abs() < 1e-12);
    }

    #[test]
    fn test_short_paths_have_no_segments() {
        assert!(path_length(&[]).segments.is_empty());
        let single = path_length(&[GeoPoint::new(1.0, 1.0)]);
        assert!(single.segments.is_empty());
        assert_eq!(single.total.meters(), 0.0);
    }
}
