//! Export planning: zoom selection and tile-grid enumeration.
//!
//! Given a bounding box, the planner picks a zoom level and lists the
//! rectangular grid of tiles that covers it. The grid size is capped by
//! [`MAX_EXPORT_TILES`] before any network call is made.

mod tile_set;
mod zoom;

pub use tile_set::TileSet;
pub use zoom::{
    choose_zoom_by_extent, choose_zoom_by_pixel_budget, PixelBudget, ZoomEstimate,
    FALLBACK_EXTENT_ZOOM,
};

use crate::coord::{to_tile_coords, CoordError};
use crate::geometry::BoundingBox;
use thiserror::Error;

/// Hard ceiling on tiles fetched for one export.
///
/// Bounds the number of remote calls and the mosaic canvas size.
pub const MAX_EXPORT_TILES: usize = 50;

/// Errors from export planning.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlannerError {
    /// A box corner cannot be projected
    #[error("Coordinate conversion failed: {0}")]
    Coord(#[from] CoordError),

    /// West edge lies east of the east edge
    #[error("Bounding box crosses the antimeridian (west {west} > east {east}); split it into two exports")]
    AntimeridianCrossing { west: f64, east: f64 },

    /// Grid exceeds the tile budget
    #[error("Area too large: would require {count} tiles (limit {max}); try a smaller area")]
    TooManyTiles { count: usize, max: usize },
}

/// Lists the tiles covering `bbox` at `zoom`.
///
/// Projects the north-west and south-east corners and returns the full
/// inclusive rectangle between them, so the count is `(Δx+1)(Δy+1)`.
pub fn tile_grid(bbox: &BoundingBox, zoom: u8) -> Result<TileSet, PlannerError> {
    if bbox.crosses_antimeridian() {
        return Err(PlannerError::AntimeridianCrossing {
            west: bbox.west,
            east: bbox.east,
        });
    }

    let top_left = to_tile_coords(bbox.north, bbox.west, zoom)?;
    let bottom_right = to_tile_coords(bbox.south, bbox.east, zoom)?;

    // Both checks above guarantee ordered corners at the same zoom
    TileSet::from_corners(top_left, bottom_right).ok_or(PlannerError::AntimeridianCrossing {
        west: bbox.west,
        east: bbox.east,
    })
}

/// Rejects grids larger than `max` tiles.
pub fn check_tile_budget(tiles: &TileSet, max: usize) -> Result<(), PlannerError> {
    let count = tiles.len();
    if count > max {
        return Err(PlannerError::TooManyTiles { count, max });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coord::to_tile_coords;

    fn bbox(north: f64, south: f64, east: f64, west: f64) -> BoundingBox {
        BoundingBox::new(north, south, east, west).unwrap()
    }

    #[test]
    fn test_grid_size_matches_corner_projection() {
        let boxes = [
            bbox(13.01, 13.00, 77.61, 77.60),
            bbox(51.52, 51.49, -0.08, -0.15),
            bbox(-33.85, -33.88, 151.23, 151.19),
            bbox(0.5, -0.5, 0.5, -0.5),
        ];

        for b in boxes {
            for zoom in [10u8, 12, 14, 16, 18] {
                let set = tile_grid(&b, zoom).unwrap();
                let tl = to_tile_coords(b.north, b.west, zoom).unwrap();
                let br = to_tile_coords(b.south, b.east, zoom).unwrap();
                let expected = ((br.x - tl.x + 1) * (br.y - tl.y + 1)) as usize;

                assert!(!set.is_empty());
                assert_eq!(set.len(), expected);
                assert_eq!(set.iter().count(), expected);
                assert_eq!(set.zoom(), zoom);
            }
        }
    }

    #[test]
    fn test_grid_for_bangalore_plot() {
        let set = tile_grid(&bbox(13.01, 13.00, 77.61, 77.60), 16).unwrap();
        assert_eq!((set.min_x(), set.max_x()), (46894, 46896));
        assert_eq!((set.min_y(), set.max_y()), (30378, 30380));
        assert_eq!(set.len(), 9);
    }

    #[test]
    fn test_degenerate_point_box_yields_one_tile() {
        let set = tile_grid(&bbox(10.0, 10.0, 20.0, 20.0), 15).unwrap();
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_antimeridian_crossing_is_rejected() {
        let result = tile_grid(&bbox(10.0, 0.0, -179.0, 179.0), 8);
        assert!(matches!(result, Err(PlannerError::AntimeridianCrossing { .. })));
    }

    #[test]
    fn test_pole_latitudes_are_rejected() {
        let b = BoundingBox::new(90.0, 80.0, 1.0, 0.0).unwrap();
        assert!(matches!(tile_grid(&b, 5), Err(PlannerError::Coord(_))));
    }

    #[test]
    fn test_budget_gate() {
        let set = tile_grid(&bbox(14.0, 12.0, 79.0, 77.0), 12).unwrap();
        assert!(set.len() > MAX_EXPORT_TILES);
        assert_eq!(
            check_tile_budget(&set, MAX_EXPORT_TILES),
            Err(PlannerError::TooManyTiles {
                count: set.len(),
                max: MAX_EXPORT_TILES
            })
        );

        let small = tile_grid(&bbox(13.01, 13.00, 77.61, 77.60), 16).unwrap();
        assert!(check_tile_budget(&small, MAX_EXPORT_TILES).is_ok());
    }

    #[test]
    fn test_budget_is_inclusive_at_limit() {
        // 5 × 10 = 50 tiles passes, one more column fails
        let fifty = TileSet::from_corners(
            crate::coord::TileCoord::new(0, 0, 10),
            crate::coord::TileCoord::new(4, 9, 10),
        )
        .unwrap();
        assert!(check_tile_budget(&fifty, 50).is_ok());

        let fifty_five = TileSet::from_corners(
            crate::coord::TileCoord::new(0, 0, 10),
            crate::coord::TileCoord::new(4, 10, 10),
        )
        .unwrap();
        assert!(check_tile_budget(&fifty_five, 50).is_err());
    }
}
