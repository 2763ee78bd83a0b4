//! Raster map tile sources
//!
//! Traits and implementations for fetching encoded map tiles over HTTP.
//! Sources are selected from configuration through [`ProviderConfig`]:
//!
//! ```ignore
//! use surveymap::provider::{AsyncReqwestClient, ProviderConfig};
//!
//! let http_client = AsyncReqwestClient::new()?;
//! let source = ProviderConfig::azure(key).build(http_client)?;
//! ```

mod azure;
mod factory;
mod http;
mod template;
mod types;

pub use azure::{
    AzureMapsTileSource, AzureStaticMap, AZURE_MAPS_BASE_URL, AZURE_STATIC_API_VERSION,
    AZURE_TILE_API_VERSION, STATIC_IMAGE_SIZE,
};
pub use factory::{AnyTileSource, ProviderConfig};
pub use http::{AsyncHttpClient, AsyncReqwestClient};
pub use template::TemplateTileSource;
pub use types::{MapStyle, ProviderError, TileSource};

#[cfg(test)]
pub use http::tests::MockAsyncHttpClient;
