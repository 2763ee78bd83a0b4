//! Geometry value types

use thiserror::Error;

/// A geographic position in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoPoint {
    /// Longitude in degrees (-180 to 180)
    pub lon: f64,
    /// Latitude in degrees (-90 to 90, exclusive of the poles)
    pub lat: f64,
}

impl GeoPoint {
    /// Creates a point from longitude and latitude, in that order (GeoJSON order).
    #[inline]
    pub const fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }
}

impl From<[f64; 2]> for GeoPoint {
    fn from(value: [f64; 2]) -> Self {
        Self::new(value[0], value[1])
    }
}

/// Axis-aligned rectangle in longitude/latitude.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub north: f64,
    pub south: f64,
    pub east: f64,
    pub west: f64,
}

impl BoundingBox {
    /// Creates a bounding box, rejecting `north < south` and non-finite edges.
    ///
    /// `west > east` is accepted and describes a box crossing the antimeridian;
    /// see [`BoundingBox::crosses_antimeridian`].
    pub fn new(north: f64, south: f64, east: f64, west: f64) -> Result<Self, GeometryError> {
        if ![north, south, east, west].iter().all(|v| v.is_finite()) {
            return Err(GeometryError::NonFinite);
        }
        if north < south {
            return Err(GeometryError::InvertedLatitude { north, south });
        }
        Ok(Self {
            north,
            south,
            east,
            west,
        })
    }

    /// Longitude extent in degrees.
    #[inline]
    pub fn lon_span(&self) -> f64 {
        self.east - self.west
    }

    /// Latitude extent in degrees.
    #[inline]
    pub fn lat_span(&self) -> f64 {
        self.north - self.south
    }

    /// Larger of the absolute longitude and latitude spans.
    #[inline]
    pub fn max_span(&self) -> f64 {
        self.lon_span().abs().max(self.lat_span().abs())
    }

    /// Midpoint latitude.
    #[inline]
    pub fn center_lat(&self) -> f64 {
        (self.north + self.south) / 2.0
    }

    /// Centre of the box.
    pub fn center(&self) -> GeoPoint {
        GeoPoint::new((self.east + self.west) / 2.0, self.center_lat())
    }

    /// True when the box wraps across the ±180° meridian.
    #[inline]
    pub fn crosses_antimeridian(&self) -> bool {
        self.west > self.east
    }

    /// North-west corner.
    pub fn north_west(&self) -> GeoPoint {
        GeoPoint::new(self.west, self.north)
    }

    /// South-east corner.
    pub fn south_east(&self) -> GeoPoint {
        GeoPoint::new(self.east, self.south)
    }
}

/// An ordered ring of points; the last point implicitly connects to the first.
///
/// Rings drawn on a map usually repeat their first point at the end (GeoJSON
/// convention). Both open and closed rings are accepted everywhere.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PolygonRing {
    points: Vec<GeoPoint>,
}

impl PolygonRing {
    pub fn new(points: Vec<GeoPoint>) -> Self {
        Self { points }
    }

    /// Builds a closed rectangle ring from a bounding box.
    pub fn from_bbox(bbox: &BoundingBox) -> Self {
        Self::new(vec![
            GeoPoint::new(bbox.west, bbox.north),
            GeoPoint::new(bbox.east, bbox.north),
            GeoPoint::new(bbox.east, bbox.south),
            GeoPoint::new(bbox.west, bbox.south),
            GeoPoint::new(bbox.west, bbox.north),
        ])
    }

    #[inline]
    pub fn points(&self) -> &[GeoPoint] {
        &self.points
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

impl From<Vec<GeoPoint>> for PolygonRing {
    fn from(points: Vec<GeoPoint>) -> Self {
        Self::new(points)
    }
}

impl FromIterator<GeoPoint> for PolygonRing {
    fn from_iter<I: IntoIterator<Item = GeoPoint>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// Errors from geometry operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeometryError {
    /// A polygon needs at least three vertices
    #[error("Polygon has {0} point(s); at least 3 are required")]
    TooFewPoints(usize),

    /// North edge lies south of the south edge
    #[error("Invalid bounding box: north {north} is below south {south}")]
    InvertedLatitude { north: f64, south: f64 },

    /// NaN or infinite coordinate
    #[error("Bounding box edges must be finite numbers")]
    NonFinite,
}
