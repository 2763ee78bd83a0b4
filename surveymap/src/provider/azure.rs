//! Azure Maps tile and static-image sources

use super::http::AsyncHttpClient;
use super::types::{MapStyle, ProviderError, TileSource};
use crate::coord::TileCoord;
use crate::geometry::GeoPoint;

/// Default Azure Maps endpoint.
pub const AZURE_MAPS_BASE_URL: &str = "https://atlas.microsoft.com";

/// API version used for the tile endpoint.
pub const AZURE_TILE_API_VERSION: &str = "2.2";

/// API version used for the static image endpoint.
pub const AZURE_STATIC_API_VERSION: &str = "2.0";

/// Width and height of a standard (single-image) export.
pub const STATIC_IMAGE_SIZE: u32 = 1280;

/// Azure Maps raster tile source.
///
/// Fetches `microsoft.base.*` tiles keyed by subscription key.
pub struct AzureMapsTileSource<C: AsyncHttpClient> {
    http_client: C,
    subscription_key: String,
    api_version: String,
    tile_size: u32,
    base_url: String,
}

impl<C: AsyncHttpClient> AzureMapsTileSource<C> {
    /// Creates a source serving 512 pixel tiles from the public endpoint.
    pub fn new(http_client: C, subscription_key: impl Into<String>) -> Self {
        Self {
            http_client,
            subscription_key: subscription_key.into(),
            api_version: AZURE_TILE_API_VERSION.to_string(),
            tile_size: 512,
            base_url: AZURE_MAPS_BASE_URL.to_string(),
        }
    }

    /// Sets the tile edge length requested from the service (256 or 512).
    pub fn with_tile_size(mut self, tile_size: u32) -> Self {
        self.tile_size = tile_size;
        self
    }

    pub fn with_api_version(mut self, api_version: impl Into<String>) -> Self {
        self.api_version = api_version.into();
        self
    }

    /// Points the source at another host, e.g. a regional endpoint.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Constructs the download URL for a tile.
    pub fn build_url(&self, tile: &TileCoord, style: MapStyle) -> String {
        format!(
            "{}/map/tile?api-version={}&tilesetId=microsoft.base.{}&zoom={}&x={}&y={}&tileSize={}&subscription-key={}",
            self.base_url,
            self.api_version,
            style.tileset_name(),
            tile.zoom,
            tile.x,
            tile.y,
            self.tile_size,
            self.subscription_key
        )
    }
}

impl<C: AsyncHttpClient> TileSource for AzureMapsTileSource<C> {
    async fn fetch_tile(&self, tile: &TileCoord, style: MapStyle) -> Result<Vec<u8>, ProviderError> {
        if !self.supports_zoom(tile.zoom) {
            return Err(ProviderError::UnsupportedZoom(tile.zoom));
        }

        let url = self.build_url(tile, style);
        self.http_client.get(&url).await
    }

    fn name(&self) -> &str {
        "Azure Maps"
    }

    fn tile_size(&self) -> u32 {
        self.tile_size
    }

    fn min_zoom(&self) -> u8 {
        0
    }

    fn max_zoom(&self) -> u8 {
        22
    }
}

/// Azure Maps static image renderer, used for standard exports.
///
/// Renders a fixed 1280×1280 PNG centred on a point.
pub struct AzureStaticMap<C: AsyncHttpClient> {
    http_client: C,
    subscription_key: String,
    base_url: String,
}

impl<C: AsyncHttpClient> AzureStaticMap<C> {
    pub fn new(http_client: C, subscription_key: impl Into<String>) -> Self {
        Self {
            http_client,
            subscription_key: subscription_key.into(),
            base_url: AZURE_MAPS_BASE_URL.to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Builds the render URL. The centre is sent as `lon,lat`.
    pub fn build_url(&self, center: GeoPoint, zoom: u8, style: MapStyle) -> String {
        format!(
            "{}/map/static/png?subscription-key={}&api-version={}&layer=basic&style={}&zoom={}&center={},{}&width={}&height={}",
            self.base_url,
            self.subscription_key,
            AZURE_STATIC_API_VERSION,
            style.tileset_name(),
            zoom,
            center.lon,
            center.lat,
            STATIC_IMAGE_SIZE,
            STATIC_IMAGE_SIZE
        )
    }

    /// Fetches the rendered PNG bytes.
    pub async fn render(
        &self,
        center: GeoPoint,
        zoom: u8,
        style: MapStyle,
    ) -> Result<Vec<u8>, ProviderError> {
        let url = self.build_url(center, zoom, style);
        self.http_client.get(&url).await
    }
}
