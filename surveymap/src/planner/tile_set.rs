//! Rectangular tile grids covering a bounding box.

use crate::coord::TileCoord;

/// The rectangular set of tiles covering a bounding box at one zoom level.
///
/// Bounds are inclusive on both ends. A `TileSet` is derived once and never
/// mutated; grid cells are disjoint by construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileSet {
    zoom: u8,
    min_x: u32,
    min_y: u32,
    max_x: u32,
    max_y: u32,
}

impl TileSet {
    /// Creates a grid from its two corner tiles.
    ///
    /// Returns `None` when the corners are at different zoom levels or are
    /// not ordered top-left to bottom-right.
    pub fn from_corners(top_left: TileCoord, bottom_right: TileCoord) -> Option<Self> {
        if top_left.zoom != bottom_right.zoom
            || top_left.x > bottom_right.x
            || top_left.y > bottom_right.y
        {
            return None;
        }
        Some(Self {
            zoom: top_left.zoom,
            min_x: top_left.x,
            min_y: top_left.y,
            max_x: bottom_right.x,
            max_y: bottom_right.y,
        })
    }

    #[inline]
    pub fn zoom(&self) -> u8 {
        self.zoom
    }

    #[inline]
    pub fn min_x(&self) -> u32 {
        self.min_x
    }

    #[inline]
    pub fn min_y(&self) -> u32 {
        self.min_y
    }

    #[inline]
    pub fn max_x(&self) -> u32 {
        self.max_x
    }

    #[inline]
    pub fn max_y(&self) -> u32 {
        self.max_y
    }

    /// Number of distinct tile columns.
    #[inline]
    pub fn columns(&self) -> u32 {
        self.max_x - self.min_x + 1
    }

    /// Number of distinct tile rows.
    #[inline]
    pub fn rows(&self) -> u32 {
        self.max_y - self.min_y + 1
    }

    /// Total tile count, `(Δx+1)(Δy+1)`.
    #[inline]
    pub fn len(&self) -> usize {
        self.columns() as usize * self.rows() as usize
    }

    /// Always false: a grid holds at least its single corner tile.
    #[inline]
    pub fn is_empty(&self) -> bool {
        false
    }

    /// True if `tile` lies in this grid.
    pub fn contains(&self, tile: &TileCoord) -> bool {
        tile.zoom == self.zoom
            && (self.min_x..=self.max_x).contains(&tile.x)
            && (self.min_y..=self.max_y).contains(&tile.y)
    }

    /// Tiles in column-major order (x outer, y inner).
    pub fn iter(&self) -> impl Iterator<Item = TileCoord> + '_ {
        let zoom = self.zoom;
        (self.min_x..=self.max_x)
            .flat_map(move |x| (self.min_y..=self.max_y).map(move |y| TileCoord { x, y, zoom }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid() -> TileSet {
        TileSet::from_corners(TileCoord::new(10, 20, 8), TileCoord::new(12, 21, 8)).unwrap()
    }

    #[test]
    fn test_dimensions() {
        let set = grid();
        assert_eq!(set.columns(), 3);
        assert_eq!(set.rows(), 2);
        assert_eq!(set.len(), 6);
    }

    #[test]
    fn test_iter_visits_every_cell_once() {
        let tiles: Vec<_> = grid().iter().collect();
        assert_eq!(tiles.len(), 6);
        assert_eq!(tiles[0], TileCoord::new(10, 20, 8));
        assert_eq!(tiles[1], TileCoord::new(10, 21, 8));
        assert_eq!(tiles[5], TileCoord::new(12, 21, 8));

        let unique: std::collections::HashSet<_> = tiles.iter().collect();
        assert_eq!(unique.len(), 6);
    }

    #[test]
    fn test_contains() {
        let set = grid();
        assert!(set.contains(&TileCoord::new(11, 21, 8)));
        assert!(!set.contains(&TileCoord::new(13, 21, 8)));
        assert!(!set.contains(&TileCoord::new(11, 21, 9)));
    }

    #[test]
    fn test_from_corners_rejects_unordered() {
        assert!(TileSet::from_corners(TileCoord::new(5, 0, 3), TileCoord::new(4, 1, 3)).is_none());
        assert!(TileSet::from_corners(TileCoord::new(1, 1, 3), TileCoord::new(1, 1, 4)).is_none());
    }
}
