//! Zoom strategies and pre-flight export estimates.

use super::context::OrchestratorContext;
use super::error::ExportError;
use crate::geometry::{measure_area, AreaMeasurement, BoundingBox};
use crate::planner::{
    choose_zoom_by_extent, choose_zoom_by_pixel_budget, tile_grid, PixelBudget,
};

/// How an export picks its zoom level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ZoomStrategy {
    /// Extent table, the interactive default
    #[default]
    Extent,
    /// Highest zoom whose output stays inside a pixel budget
    PixelBudget(PixelBudget),
    /// Caller-chosen zoom
    Fixed(u8),
}

impl ZoomStrategy {
    pub fn resolve(&self, bbox: &BoundingBox) -> u8 {
        match self {
            ZoomStrategy::Extent => choose_zoom_by_extent(bbox),
            ZoomStrategy::PixelBudget(budget) => choose_zoom_by_pixel_budget(bbox, budget).zoom,
            ZoomStrategy::Fixed(zoom) => *zoom,
        }
    }
}

/// What an export of the current shape would produce.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportEstimate {
    /// Zoom from the pixel-budget search
    pub zoom: u8,
    pub pixel_width: u32,
    pub pixel_height: u32,
    /// Tiles needed at `zoom`
    pub tile_count: usize,
    /// Zoom the interactive export would use
    pub extent_zoom: u8,
    /// Tiles needed at `extent_zoom`
    pub extent_tile_count: usize,
    /// Area of the selected shape
    pub area: AreaMeasurement,
    /// Whether the interactive export fits the tile budget
    pub within_budget: bool,
}

/// Previews an export without fetching anything.
///
/// # Errors
///
/// `NoShapeSelected` or `InvalidShape` for unusable selections.
pub fn estimate(
    ctx: &OrchestratorContext,
    budget: &PixelBudget,
    max_tiles: usize,
) -> Result<ExportEstimate, ExportError> {
    let bbox = ctx.selected_bounds()?;
    let shape = ctx.shape().ok_or(ExportError::NoShapeSelected)?;

    let by_pixels = choose_zoom_by_pixel_budget(&bbox, budget);
    let tile_count = tile_grid(&bbox, by_pixels.zoom)?.len();

    let extent_zoom = choose_zoom_by_extent(&bbox);
    let extent_tile_count = tile_grid(&bbox, extent_zoom)?.len();

    Ok(ExportEstimate {
        zoom: by_pixels.zoom,
        pixel_width: by_pixels.pixel_width,
        pixel_height: by_pixels.pixel_height,
        tile_count,
        extent_zoom,
        extent_tile_count,
        area: measure_area(shape),
        within_budget: extent_tile_count <= max_tiles,
    })
}
