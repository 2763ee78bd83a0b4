//! Generic XYZ tile source driven by a URL template

use super::http::AsyncHttpClient;
use super::types::{MapStyle, ProviderError, TileSource};
use crate::coord::TileCoord;

/// Tile source for any `{z}/{x}/{y}` service.
///
/// Placeholders: `{z}`, `{x}`, `{y}` and optionally `{style}` (substituted
/// with `road` or `satellite`). Example:
/// `https://mt1.google.com/vt/lyrs=s&x={x}&y={y}&z={z}`.
pub struct TemplateTileSource<C: AsyncHttpClient> {
    http_client: C,
    template: String,
    tile_size: u32,
    max_zoom: u8,
}

impl<C: AsyncHttpClient> TemplateTileSource<C> {
    /// Creates a source for 256 pixel tiles up to zoom 20.
    ///
    /// # Errors
    ///
    /// Returns `ProviderError::Configuration` if any of `{z}`, `{x}` or `{y}`
    /// is missing from the template.
    pub fn new(http_client: C, template: impl Into<String>) -> Result<Self, ProviderError> {
        let template = template.into();
        for placeholder in ["{z}", "{x}", "{y}"] {
            if !template.contains(placeholder) {
                return Err(ProviderError::Configuration(format!(
                    "URL template is missing {}",
                    placeholder
                )));
            }
        }

        Ok(Self {
            http_client,
            template,
            tile_size: 256,
            max_zoom: 20,
        })
    }

    pub fn with_tile_size(mut self, tile_size: u32) -> Self {
        self.tile_size = tile_size;
        self
    }

    pub fn with_max_zoom(mut self, max_zoom: u8) -> Self {
        self.max_zoom = max_zoom;
        self
    }

    pub fn build_url(&self, tile: &TileCoord, style: MapStyle) -> String {
        self.template
            .replace("{z}", &tile.zoom.to_string())
            .replace("{x}", &tile.x.to_string())
            .replace("{y}", &tile.y.to_string())
            .replace("{style}", style.as_str())
    }
}

impl<C: AsyncHttpClient> TileSource for TemplateTileSource<C> {
    async fn fetch_tile(&self, tile: &TileCoord, style: MapStyle) -> Result<Vec<u8>, ProviderError> {
        if !self.supports_zoom(tile.zoom) {
            return Err(ProviderError::UnsupportedZoom(tile.zoom));
        }
        let url = self.build_url(tile, style);
        self.http_client.get(&url).await
    }

    fn name(&self) -> &str {
        "XYZ template"
    }

    fn tile_size(&self) -> u32 {
        self.tile_size
    }

    fn min_zoom(&self) -> u8 {
        0
    }

    fn max_zoom(&self) -> u8 {
        self.max_zoom
    }
}
