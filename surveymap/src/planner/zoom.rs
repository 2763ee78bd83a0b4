//! Zoom selection for exports.

use crate::coord::meters_per_pixel;
use crate::geometry::{haversine_distance, BoundingBox, GeoPoint};

/// Zoom used when the largest span is at least one degree.
pub const FALLBACK_EXTENT_ZOOM: u8 = 12;

/// Extent thresholds (degrees, exclusive upper bound) and the zoom they select.
const EXTENT_ZOOM_TABLE: [(f64, u8); 4] = [(0.001, 20), (0.01, 18), (0.1, 16), (1.0, 14)];

/// Picks a zoom from the larger of the box's longitude and latitude spans.
///
/// | max span (°) | zoom |
/// |--------------|------|
/// | < 0.001      | 20   |
/// | < 0.01       | 18   |
/// | < 0.1        | 16   |
/// | < 1          | 14   |
/// | otherwise    | 12   |
pub fn choose_zoom_by_extent(bbox: &BoundingBox) -> u8 {
    let max_span = bbox.max_span();
    EXTENT_ZOOM_TABLE
        .iter()
        .find(|(limit, _)| max_span < *limit)
        .map(|(_, zoom)| *zoom)
        .unwrap_or(FALLBACK_EXTENT_ZOOM)
}

/// Limits for the pixel-budget zoom search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelBudget {
    /// Each output dimension must stay strictly below this many pixels
    pub max_pixels: u32,
    /// First (highest) zoom tried
    pub start_zoom: u8,
    /// Zoom returned when no level fits
    pub floor_zoom: u8,
}

impl Default for PixelBudget {
    fn default() -> Self {
        Self {
            max_pixels: 12_000,
            start_zoom: 21,
            floor_zoom: 14,
        }
    }
}

/// Zoom chosen by the pixel-budget search together with the projected image size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ZoomEstimate {
    pub zoom: u8,
    pub pixel_width: u32,
    pub pixel_height: u32,
}

/// Descending search for the highest zoom whose output fits `budget`.
///
/// The box's ground extent comes from great-circle lengths of its edges: the
/// longer of the north and south edges for width, the west edge for height.
/// Each zoom's ground resolution is evaluated at the box's centre latitude.
/// The first zoom (highest first) where both pixel extents are below
/// `max_pixels` wins; otherwise `floor_zoom` is returned with its extents.
pub fn choose_zoom_by_pixel_budget(bbox: &BoundingBox, budget: &PixelBudget) -> ZoomEstimate {
    let north_edge = haversine_distance(
        GeoPoint::new(bbox.west, bbox.north),
        GeoPoint::new(bbox.east, bbox.north),
    );
    let south_edge = haversine_distance(
        GeoPoint::new(bbox.west, bbox.south),
        GeoPoint::new(bbox.east, bbox.south),
    );
    let width_m = north_edge.max(south_edge);
    let height_m = haversine_distance(
        GeoPoint::new(bbox.west, bbox.north),
        GeoPoint::new(bbox.west, bbox.south),
    );

    let center_lat = bbox.center_lat();
    let floor = budget.floor_zoom.min(budget.start_zoom);
    let limit = f64::from(budget.max_pixels);

    let extents_at = |zoom: u8| {
        let mpp = meters_per_pixel(center_lat, zoom);
        (width_m / mpp, height_m / mpp)
    };

    for zoom in (floor..=budget.start_zoom).rev() {
        let (w, h) = extents_at(zoom);
        if w < limit && h < limit {
            return to_estimate(zoom, w, h);
        }
    }

    let (w, h) = extents_at(floor);
    to_estimate(floor, w, h)
}

fn to_estimate(zoom: u8, width: f64, height: f64) -> ZoomEstimate {
    ZoomEstimate {
        zoom,
        pixel_width: width.ceil() as u32,
        pixel_height: height.ceil() as u32,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bbox(north: f64, south: f64, east: f64, west: f64) -> BoundingBox {
        BoundingBox::new(north, south, east, west).unwrap()
    }

    #[test]
    fn test_extent_table() {
        assert_eq!(choose_zoom_by_extent(&bbox(0.0005, 0.0, 0.0005, 0.0)), 20);
        assert_eq!(choose_zoom_by_extent(&bbox(0.005, 0.0, 0.002, 0.0)), 18);
        assert_eq!(choose_zoom_by_extent(&bbox(0.05, 0.0, 0.02, 0.0)), 16);
        assert_eq!(choose_zoom_by_extent(&bbox(0.5, 0.0, 0.2, 0.0)), 14);
        assert_eq!(choose_zoom_by_extent(&bbox(2.0, 0.0, 1.0, 0.0)), 12);
    }

    #[test]
    fn test_extent_thresholds_are_exclusive() {
        assert_eq!(choose_zoom_by_extent(&bbox(1.0, 0.0, 0.5, 0.0)), 12);
        assert_eq!(choose_zoom_by_extent(&bbox(0.1, 0.0, 0.05, 0.0)), 14);
    }

    #[test]
    fn test_extent_uses_longest_side() {
        // Tall narrow box: the latitude span dominates
        assert_eq!(choose_zoom_by_extent(&bbox(0.5, 0.0, 0.0001, 0.0)), 14);
    }

    #[test]
    fn test_pixel_budget_small_plot() {
        let estimate = choose_zoom_by_pixel_budget(
            &bbox(13.01, 13.00, 77.61, 77.60),
            &PixelBudget::default(),
        );
        assert_eq!(estimate.zoom, 20);
        assert!(estimate.pixel_width < 12_000);
        assert!(estimate.pixel_height < 12_000);
        assert!(estimate.pixel_width > 7_000);
    }

    #[test]
    fn test_pixel_budget_starts_at_start_zoom() {
        let estimate =
            choose_zoom_by_pixel_budget(&bbox(0.001, 0.0, 0.001, 0.0), &PixelBudget::default());
        assert_eq!(estimate.zoom, 21);
    }

    #[test]
    fn test_pixel_budget_falls_back_to_floor() {
        let estimate =
            choose_zoom_by_pixel_budget(&bbox(14.0, 12.0, 79.0, 77.0), &PixelBudget::default());
        assert_eq!(estimate.zoom, 14);
        // Floor zoom still reports its (over-budget) extents
        assert!(estimate.pixel_width >= 12_000);
    }

    #[test]
    fn test_pixel_budget_halves_per_zoom_step() {
        let area = bbox(13.01, 13.00, 77.61, 77.60);
        let high = choose_zoom_by_pixel_budget(&area, &PixelBudget {
            max_pixels: 12_000,
            start_zoom: 20,
            floor_zoom: 20,
        });
        let low = choose_zoom_by_pixel_budget(&area, &PixelBudget {
            max_pixels: 12_000,
            start_zoom: 19,
            floor_zoom: 19,
        });
        let ratio = f64::from(high.pixel_width) / f64::from(low.pixel_width);
        assert!((ratio - 2.0).abs() < 0.01);
    }
}
