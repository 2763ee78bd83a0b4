//! Provider types and traits

use crate::coord::TileCoord;
use std::fmt;
use std::future::Future;
use std::str::FromStr;

/// Errors that can occur during provider operations.
#[derive(Debug, Clone, PartialEq)]
pub enum ProviderError {
    /// HTTP request failed or returned a non-success status
    HttpError(String),
    /// Zoom level not supported by this provider
    UnsupportedZoom(u8),
    /// Response body could not be used
    InvalidResponse(String),
    /// Provider could not be set up (bad template, missing key)
    Configuration(String),
}

impl fmt::Display for ProviderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProviderError::HttpError(msg) => write!(f, "HTTP error: {}", msg),
            ProviderError::UnsupportedZoom(zoom) => {
                write!(f, "Zoom level {} not supported by provider", zoom)
            }
            ProviderError::InvalidResponse(msg) => write!(f, "Invalid response: {}", msg),
            ProviderError::Configuration(msg) => write!(f, "Provider configuration: {}", msg),
        }
    }
}

impl std::error::Error for ProviderError {}

/// Base map rendering requested from the tile service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MapStyle {
    /// Street map
    #[default]
    Road,
    /// Aerial imagery with road labels
    Satellite,
}

impl MapStyle {
    /// Tileset suffix understood by Azure Maps (`microsoft.base.<suffix>`).
    pub fn tileset_name(&self) -> &'static str {
        match self {
            MapStyle::Satellite => "satellite_road_labels",
            MapStyle::Road => "road",
        }
    }

    /// Parses the loose `mapType` strings sent by web clients.
    ///
    /// Only `"satellite"` selects imagery; anything else falls back to road.
    pub fn from_map_type(map_type: &str) -> Self {
        if map_type.eq_ignore_ascii_case("satellite") {
            MapStyle::Satellite
        } else {
            MapStyle::Road
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MapStyle::Road => "road",
            MapStyle::Satellite => "satellite",
        }
    }
}

impl fmt::Display for MapStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MapStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "road" => Ok(MapStyle::Road),
            "satellite" => Ok(MapStyle::Satellite),
            other => Err(format!(
                "unknown map style '{}' (expected road or satellite)",
                other
            )),
        }
    }
}

/// Async source of raster map tiles.
///
/// Implementors return the encoded image bytes (PNG or JPEG) for one tile.
/// Decoding and placement happen downstream.
pub trait TileSource: Send + Sync {
    /// Fetches one tile.
    ///
    /// # Arguments
    ///
    /// * `tile` - Tile coordinate to fetch
    /// * `style` - Base map style
    ///
    /// # Returns
    ///
    /// Encoded image bytes or an error.
    fn fetch_tile(
        &self,
        tile: &TileCoord,
        style: MapStyle,
    ) -> impl Future<Output = Result<Vec<u8>, ProviderError>> + Send;

    /// Returns the source's name for logging and identification.
    fn name(&self) -> &str;

    /// Edge length in pixels of the tiles this source serves.
    fn tile_size(&self) -> u32;

    /// Returns the minimum supported zoom level.
    fn min_zoom(&self) -> u8;

    /// Returns the maximum supported zoom level.
    fn max_zoom(&self) -> u8;

    /// Checks if this source supports the given zoom level.
    fn supports_zoom(&self, zoom: u8) -> bool {
        zoom >= self.min_zoom() && zoom <= self.max_zoom()
    }
}
