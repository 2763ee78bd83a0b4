//! Coordinate conversion module
//!
//! Provides conversions between geographic coordinates (latitude/longitude)
//! and spherical Web Mercator tile and pixel coordinates. All functions are
//! pure; the same inputs always produce bit-identical outputs.

mod types;

pub use types::{
    CoordError, PixelCoord, TileCoord, MAX_LAT, MAX_LON, MAX_ZOOM, MIN_LAT, MIN_LON, MIN_ZOOM,
};

use std::f64::consts::PI;

/// Ground resolution at the equator for zoom 0 with 256px tiles, in metres per pixel.
pub const EQUATOR_METERS_PER_PIXEL: f64 = 156_543.033_92;

fn validate(lat: f64, lon: f64, zoom: u8) -> Result<(), CoordError> {
    if !(MIN_LAT..=MAX_LAT).contains(&lat) {
        return Err(CoordError::InvalidLatitude(lat));
    }
    if !(MIN_LON..=MAX_LON).contains(&lon) {
        return Err(CoordError::InvalidLongitude(lon));
    }
    if zoom > MAX_ZOOM {
        return Err(CoordError::InvalidZoom(zoom));
    }
    Ok(())
}

/// Fractional position in the unit square `[0, 1]²` of the Mercator plane.
///
/// `MAX_LAT` sits a hair beyond the exact Mercator edge, so the result is
/// clamped to keep tile and pixel coordinates on the same side of it.
#[inline]
fn mercator_unit(lat: f64, lon: f64) -> (f64, f64) {
    let ux = (lon + 180.0) / 360.0;
    let lat_rad = lat * PI / 180.0;
    let uy = (1.0 - lat_rad.tan().asinh() / PI) / 2.0;
    (ux.clamp(0.0, 1.0), uy.clamp(0.0, 1.0))
}

/// Converts geographic coordinates to tile coordinates.
///
/// # Arguments
///
/// * `lat` - Latitude in degrees (-85.05112878 to 85.05112878)
/// * `lon` - Longitude in degrees (-180.0 to 180.0)
/// * `zoom` - Zoom level (0 to 22)
///
/// # Returns
///
/// A `Result` containing the tile coordinates or an error if inputs are invalid.
/// Poles are rejected because the Mercator projection diverges there.
#[inline]
pub fn to_tile_coords(lat: f64, lon: f64, zoom: u8) -> Result<TileCoord, CoordError> {
    validate(lat, lon, zoom)?;

    let n = 2.0_f64.powi(zoom as i32);
    let max_index = (1u64 << zoom) - 1;
    let (ux, uy) = mercator_unit(lat, lon);

    // lon = 180 and the southern limit land exactly on the far edge
    let x = ((ux * n).floor() as u64).min(max_index) as u32;
    let y = ((uy * n).floor() as u64).min(max_index) as u32;

    Ok(TileCoord { x, y, zoom })
}

/// Converts geographic coordinates to global pixel coordinates.
///
/// Uses the same projection as [`to_tile_coords`] scaled by `tile_size`
/// instead of truncated to tile granularity, so
/// `floor(pixel.x / tile_size) == tile.x` for any point inside the pyramid.
pub fn to_pixel_coords(
    lat: f64,
    lon: f64,
    zoom: u8,
    tile_size: u32,
) -> Result<PixelCoord, CoordError> {
    validate(lat, lon, zoom)?;
    if tile_size == 0 {
        return Err(CoordError::InvalidTileSize(tile_size));
    }

    let n = 2.0_f64.powi(zoom as i32);
    let (ux, uy) = mercator_unit(lat, lon);

    Ok(PixelCoord {
        x: ux * n * f64::from(tile_size),
        y: uy * n * f64::from(tile_size),
    })
}

/// Converts tile coordinates back to geographic coordinates.
///
/// Returns the latitude/longitude of the tile's northwest corner.
#[inline]
pub fn tile_to_lat_lon(tile: &TileCoord) -> (f64, f64) {
    let n = 2.0_f64.powi(tile.zoom as i32);

    let lon = tile.x as f64 / n * 360.0 - 180.0;

    let y = tile.y as f64 / n;
    let lat_rad = (PI * (1.0 - 2.0 * y)).sinh().atan();
    let lat = lat_rad * 180.0 / PI;

    (lat, lon)
}

/// Ground resolution in metres per pixel at a latitude and zoom level.
///
/// Standard Web Mercator formula for 256px tiles:
/// `156543.03392 * cos(lat) / 2^zoom`.
#[inline]
pub fn meters_per_pixel(lat: f64, zoom: u8) -> f64 {
    EQUATOR_METERS_PER_PIXEL * (lat * PI / 180.0).cos() / 2.0_f64.powi(zoom as i32)
}
