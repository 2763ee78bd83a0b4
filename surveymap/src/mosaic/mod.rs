//! Mosaic assembly and cropping.
//!
//! Fetched tiles are placed on a transparent canvas covering the whole tile
//! grid, then the canvas is cut down to the exact pixel footprint of the
//! requested bounding box.

use crate::coord::{to_pixel_coords, CoordError};
use crate::fetcher::TileImage;
use crate::geometry::BoundingBox;
use crate::planner::TileSet;
use image::{imageops, ImageFormat, RgbaImage};
use std::io::Cursor;
use thiserror::Error;
use tracing::warn;

/// Mosaic errors.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MosaicError {
    /// The bounding box projects to zero pixels in one dimension
    #[error("Selected region is empty at this zoom ({width}×{height} px)")]
    EmptyRegion { width: i64, height: i64 },

    /// The bounding box starts before the grid origin
    #[error("Crop origin ({left}, {top}) lies outside the tile grid")]
    OutsideGrid { left: i64, top: i64 },

    /// The crop rectangle does not fit inside the canvas
    #[error("Crop {rect:?} exceeds canvas {canvas_width}×{canvas_height}")]
    OutOfCanvas {
        rect: CropRect,
        canvas_width: u32,
        canvas_height: u32,
    },

    #[error("Coordinate conversion failed: {0}")]
    Coord(#[from] CoordError),

    #[error("PNG encoding failed: {0}")]
    Encode(String),
}

/// Pixel rectangle relative to the canvas origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CropRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// Canvas size in pixels for a grid.
pub fn canvas_size(grid: &TileSet, tile_size: u32) -> (u32, u32) {
    (grid.columns() * tile_size, grid.rows() * tile_size)
}

/// Places tiles on a transparent canvas spanning `grid`.
///
/// Each tile lands at `((x - min_x) * tile_size, (y - min_y) * tile_size)`.
/// Tiles outside the grid are skipped; cells without a tile stay fully
/// transparent. Tiles are copied, never blended.
pub fn assemble(tiles: &[TileImage], grid: &TileSet, tile_size: u32) -> RgbaImage {
    let (width, height) = canvas_size(grid, tile_size);
    let mut canvas = RgbaImage::new(width, height);

    for tile in tiles {
        if !grid.contains(&tile.coord) {
            warn!(tile = %tile.coord, "Tile outside export grid, skipping");
            continue;
        }
        let x = i64::from((tile.coord.x - grid.min_x()) * tile_size);
        let y = i64::from((tile.coord.y - grid.min_y()) * tile_size);
        imageops::replace(&mut canvas, &tile.image, x, y);
    }

    canvas
}

/// Canvas rectangle covering `bbox`.
///
/// Corners are the floored global pixel positions of `(north, west)` and
/// `(south, east)`, shifted by the grid origin `(min_x, min_y) * tile_size`.
///
/// # Errors
///
/// - `MosaicError::EmptyRegion` if the width or height is not positive
/// - `MosaicError::OutsideGrid` if the box starts above or left of the grid
pub fn crop_rect(
    bbox: &BoundingBox,
    zoom: u8,
    min_x: u32,
    min_y: u32,
    tile_size: u32,
) -> Result<CropRect, MosaicError> {
    let top_left = to_pixel_coords(bbox.north, bbox.west, zoom, tile_size)?;
    let bottom_right = to_pixel_coords(bbox.south, bbox.east, zoom, tile_size)?;

    let origin_x = i64::from(min_x) * i64::from(tile_size);
    let origin_y = i64::from(min_y) * i64::from(tile_size);

    let left = top_left.x.floor() as i64 - origin_x;
    let top = top_left.y.floor() as i64 - origin_y;
    let right = bottom_right.x.floor() as i64 - origin_x;
    let bottom = bottom_right.y.floor() as i64 - origin_y;

    let width = right - left;
    let height = bottom - top;
    if width <= 0 || height <= 0 {
        return Err(MosaicError::EmptyRegion { width, height });
    }
    if left < 0 || top < 0 {
        return Err(MosaicError::OutsideGrid { left, top });
    }

    Ok(CropRect {
        x: left as u32,
        y: top as u32,
        width: width as u32,
        height: height as u32,
    })
}

/// Cuts the bounding box's footprint out of an assembled canvas.
pub fn crop(
    canvas: &RgbaImage,
    bbox: &BoundingBox,
    zoom: u8,
    min_x: u32,
    min_y: u32,
    tile_size: u32,
) -> Result<RgbaImage, MosaicError> {
    let rect = crop_rect(bbox, zoom, min_x, min_y, tile_size)?;
    crop_to(canvas, rect)
}

/// Extracts `rect` from `canvas`.
pub fn crop_to(canvas: &RgbaImage, rect: CropRect) -> Result<RgbaImage, MosaicError> {
    let fits = u64::from(rect.x) + u64::from(rect.width) <= u64::from(canvas.width())
        && u64::from(rect.y) + u64::from(rect.height) <= u64::from(canvas.height());
    if !fits {
        return Err(MosaicError::OutOfCanvas {
            rect,
            canvas_width: canvas.width(),
            canvas_height: canvas.height(),
        });
    }

    Ok(imageops::crop_imm(canvas, rect.x, rect.y, rect.width, rect.height).to_image())
}

/// Encodes an image as PNG.
pub fn encode_png(image: &RgbaImage) -> Result<Vec<u8>, MosaicError> {
    let mut out = Cursor::new(Vec::new());
    image
        .write_to(&mut out, ImageFormat::Png)
        .map_err(|e| MosaicError::Encode(e.to_string()))?;
    Ok(out.into_inner())
}
