//! Survey geometry over drawn map shapes.
//!
//! Bounding boxes, the planar polygon area shown on area labels, label
//! placement, and great-circle path measurement. Everything here is a pure
//! function of its inputs.

mod area;
mod distance;
mod types;
mod units;

pub use area::{bounding_box_of, label_position, planar_area, METERS_PER_DEGREE_LAT};
pub use distance::{haversine_distance, path_length, PathMeasurement, PathSegment, EARTH_RADIUS_METERS};
pub use types::{BoundingBox, GeoPoint, GeometryError, PolygonRing};
pub use units::{
    AreaMeasurement, DistanceMeasurement, ACRES_PER_SQ_METER, FEET_PER_METER, MILES_PER_METER,
    SQ_FEET_PER_SQ_METER, SQ_METERS_PER_HECTARE,
};

/// Area of a ring with unit conversions attached.
pub fn measure_area(ring: &PolygonRing) -> AreaMeasurement {
    AreaMeasurement::from_square_meters(planar_area(ring))
}
