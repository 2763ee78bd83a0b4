//! Tile source construction from configuration.
//!
//! [`TileSource`] uses `async fn` in traits and is therefore not object safe.
//! [`AnyTileSource`] gives callers a single concrete type to hold whichever
//! source the configuration selected.

use super::azure::AzureMapsTileSource;
use super::http::AsyncHttpClient;
use super::template::TemplateTileSource;
use super::types::{MapStyle, ProviderError, TileSource};
use crate::coord::TileCoord;

/// Settings needed to build a tile source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderConfig {
    /// Azure Maps (requires a subscription key)
    Azure {
        subscription_key: String,
        api_version: String,
        tile_size: u32,
    },

    /// Any XYZ service reachable through a URL template
    Template { url_template: String, tile_size: u32 },
}

impl ProviderConfig {
    /// Azure Maps with default API version and 512 pixel tiles.
    pub fn azure(subscription_key: impl Into<String>) -> Self {
        Self::Azure {
            subscription_key: subscription_key.into(),
            api_version: super::azure::AZURE_TILE_API_VERSION.to_string(),
            tile_size: 512,
        }
    }

    pub fn template(url_template: impl Into<String>) -> Self {
        Self::Template {
            url_template: url_template.into(),
            tile_size: 256,
        }
    }

    /// Human-readable provider name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Azure { .. } => "Azure Maps",
            Self::Template { .. } => "XYZ template",
        }
    }

    pub fn requires_api_key(&self) -> bool {
        matches!(self, Self::Azure { .. })
    }

    /// Builds the configured source on top of `http_client`.
    ///
    /// # Errors
    ///
    /// Returns `ProviderError::Configuration` for an empty Azure key or a
    /// template lacking a placeholder.
    pub fn build<C: AsyncHttpClient>(&self, http_client: C) -> Result<AnyTileSource<C>, ProviderError> {
        match self {
            Self::Azure {
                subscription_key,
                api_version,
                tile_size,
            } => {
                if subscription_key.trim().is_empty() {
                    return Err(ProviderError::Configuration(
                        "Azure Maps subscription key is empty".to_string(),
                    ));
                }
                let source = AzureMapsTileSource::new(http_client, subscription_key.clone())
                    .with_api_version(api_version.clone())
                    .with_tile_size(*tile_size);
                Ok(AnyTileSource::Azure(source))
            }
            Self::Template {
                url_template,
                tile_size,
            } => {
                let source = TemplateTileSource::new(http_client, url_template.clone())?
                    .with_tile_size(*tile_size);
                Ok(AnyTileSource::Template(source))
            }
        }
    }
}

/// Enum dispatch over the concrete tile sources.
pub enum AnyTileSource<C: AsyncHttpClient> {
    Azure(AzureMapsTileSource<C>),
    Template(TemplateTileSource<C>),
}

impl<C: AsyncHttpClient> TileSource for AnyTileSource<C> {
    async fn fetch_tile(&self, tile: &TileCoord, style: MapStyle) -> Result<Vec<u8>, ProviderError> {
        match self {
            Self::Azure(s) => s.fetch_tile(tile, style).await,
            Self::Template(s) => s.fetch_tile(tile, style).await,
        }
    }

    fn name(&self) -> &str {
        match self {
            Self::Azure(s) => s.name(),
            Self::Template(s) => s.name(),
        }
    }

    fn tile_size(&self) -> u32 {
        match self {
            Self::Azure(s) => s.tile_size(),
            Self::Template(s) => s.tile_size(),
        }
    }

    fn min_zoom(&self) -> u8 {
        match self {
            Self::Azure(s) => s.min_zoom(),
            Self::Template(s) => s.min_zoom(),
        }
    }

    fn max_zoom(&self) -> u8 {
        match self {
            Self::Azure(s) => s.max_zoom(),
            Self::Template(s) => s.max_zoom(),
        }
    }
}
