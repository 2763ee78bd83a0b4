//! Bounding boxes, planar area, and label placement for drawn rings.

use super::types::{BoundingBox, GeoPoint, GeometryError, PolygonRing};
use std::f64::consts::PI;

/// Metres per degree of latitude used by the planar area approximation.
pub const METERS_PER_DEGREE_LAT: f64 = 111_320.0;

/// Min/max reduction over a ring's coordinates.
///
/// Rings with fewer than three points have no meaningful extent and are
/// rejected; callers surface this as "draw a shape first".
pub fn bounding_box_of(ring: &PolygonRing) -> Result<BoundingBox, GeometryError> {
    if ring.len() < 3 {
        return Err(GeometryError::TooFewPoints(ring.len()));
    }

    let mut min_lon = f64::INFINITY;
    let mut max_lon = f64::NEG_INFINITY;
    let mut min_lat = f64::INFINITY;
    let mut max_lat = f64::NEG_INFINITY;

    for p in ring.points() {
        min_lon = min_lon.min(p.lon);
        max_lon = max_lon.max(p.lon);
        min_lat = min_lat.min(p.lat);
        max_lat = max_lat.max(p.lat);
    }

    BoundingBox::new(max_lat, min_lat, max_lon, min_lon)
}

/// Approximate polygon area in square metres.
///
/// Applies the Shoelace formula to raw longitude/latitude as if they were
/// planar Cartesian coordinates, then scales by `111320 m/°` of latitude and
/// `111320·cos(avg_lat) m/°` of longitude. The average latitude is taken over
/// every listed point, including a repeated closing point.
///
/// This is a flat-earth approximation that is only reasonable for small
/// survey plots. It is not geodesically exact and must stay bit-compatible
/// with the values already shown to users.
///
/// Returns 0 for rings with fewer than three points.
pub fn planar_area(ring: &PolygonRing) -> f64 {
    let points = ring.points();
    let n = points.len();
    if n < 3 {
        return 0.0;
    }

    let mut area = 0.0;
    for pair in points.windows(2) {
        area += pair[0].lon * pair[1].lat - pair[1].lon * pair[0].lat;
    }
    let last = points[n - 1];
    let first = points[0];
    area += last.lon * first.lat - first.lon * last.lat;

    area = area.abs() / 2.0;

    let avg_lat = points.iter().map(|p| p.lat).sum::<f64>() / n as f64;
    let meters_per_degree_lon = METERS_PER_DEGREE_LAT * (avg_lat * PI / 180.0).cos();

    area * METERS_PER_DEGREE_LAT * meters_per_degree_lon
}

/// Position for an area label: the mean of the ring's distinct vertices.
///
/// A closing point that repeats the first vertex is left out of the average;
/// open rings use every point. Returns `None` for rings with fewer than two
/// points.
pub fn label_position(ring: &PolygonRing) -> Option<GeoPoint> {
    let points = ring.points();
    if points.len() < 2 {
        return None;
    }

    let body = match (points.first(), points.last()) {
        (Some(first), Some(last)) if first == last => &points[..points.len() - 1],
        _ => points,
    };
    let count = body.len() as f64;
    let (sum_lon, sum_lat) = body
        .iter()
        .fold((0.0, 0.0), |(lon, lat), p| (lon + p.lon, lat + p.lat));

    Some(GeoPoint::new(sum_lon / count, sum_lat / count))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(side: f64, lat0: f64) -> PolygonRing {
        PolygonRing::new(vec![
            GeoPoint::new(0.0, lat0),
            GeoPoint::new(side, lat0),
            GeoPoint::new(side, lat0 + side),
            GeoPoint::new(0.0, lat0 + side),
        ])
    }

    #[test]
    fn test_bounding_box_of_polygon() {
        let ring = PolygonRing::new(vec![
            GeoPoint::new(77.60, 13.00),
            GeoPoint::new(77.61, 13.002),
            GeoPoint::new(77.605, 13.01),
            GeoPoint::new(77.60, 13.00),
        ]);

        let bbox = bounding_box_of(&ring).unwrap();
        assert_eq!(bbox.north, 13.01);
        assert_eq!(bbox.south, 13.00);
        assert_eq!(bbox.east, 77.61);
        assert_eq!(bbox.west, 77.60);
    }

    #[test]
    fn test_bounding_box_requires_three_points() {
        let ring = PolygonRing::new(vec![GeoPoint::new(0.0, 0.0), GeoPoint::new(1.0, 1.0)]);
        assert_eq!(bounding_box_of(&ring), Err(GeometryError::TooFewPoints(2)));
    }

    #[test]
    fn test_planar_area_square_at_equator() {
        // Open ring: all four points average to latitude 0.0005
        let side = 0.001;
        let ring = square(side, 0.0);
        let avg_lat: f64 = 0.0005;
        let expected = side
            * side
            * METERS_PER_DEGREE_LAT
            * METERS_PER_DEGREE_LAT
            * (avg_lat * PI / 180.0).cos();

        let area = planar_area(&ring);
        assert!((area - expected).abs() < 1e-6, "area {area} expected {expected}");
        // Roughly 111m × 111m
        assert!((area - 12_392.14).abs() < 0.1);
    }

    #[test]
    fn test_planar_area_is_orientation_independent() {
        let ring = square(0.01, 10.0);
        let mut reversed: Vec<GeoPoint> = ring.points().to_vec();
        reversed.reverse();
        let reversed = PolygonRing::new(reversed);

        assert!((planar_area(&ring) - planar_area(&reversed)).abs() < 1e-6);
    }

    #[test]
    fn test_planar_area_closed_ring_matches_formula() {
        // Closing point repeated: the closing edge contributes zero but the
        // duplicate still counts towards the average latitude
        let mut points = square(0.001, 0.0).points().to_vec();
        points.push(points[0]);
        let ring = PolygonRing::new(points);

        let avg_lat: f64 = (0.0 + 0.0 + 0.001 + 0.001 + 0.0) / 5.0;
        let expected = 0.001
            * 0.001
            * METERS_PER_DEGREE_LAT
            * METERS_PER_DEGREE_LAT
            * (avg_lat * PI / 180.0).cos();
        assert!((planar_area(&ring) - expected).abs() < 1e-6);
    }

    #[test]
    fn test_planar_area_degenerate_rings_are_zero() {
        assert_eq!(planar_area(&PolygonRing::default()), 0.0);
        let one = PolygonRing::new(vec![GeoPoint::new(1.0, 1.0)]);
        assert_eq!(planar_area(&one), 0.0);
        let two = PolygonRing::new(vec![GeoPoint::new(1.0, 1.0), GeoPoint::new(2.0, 2.0)]);
        assert_eq!(planar_area(&two), 0.0);
    }

    #[test]
    fn test_label_position_skips_closing_point() {
        let ring = PolygonRing::from_bbox(&BoundingBox::new(2.0, 0.0, 4.0, 0.0).unwrap());
        let label = label_position(&ring).unwrap();
        assert!((label.lon - 2.0).abs() < 1e-12);
        assert!((label.lat - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_label_position_open_ring_uses_every_vertex() {
        let ring = square(2.0, 0.0);
        let label = label_position(&ring).unwrap();
        assert!((label.lon - 1.0).abs() < 1e-12);
        assert!((label.lat - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_label_position_needs_two_points() {
        let ring = PolygonRing::new(vec![GeoPoint::new(1.0, 1.0)]);
        assert!(label_position(&ring).is_none());
    }
}
