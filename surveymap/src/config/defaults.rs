//! Default values and constants for all configuration settings.
//!
//! Contains all `DEFAULT_*` constants and the `ConfigFile::default()`
//! implementation.

use std::path::PathBuf;

use super::file::config_directory;
use super::settings::*;
use crate::provider::{MapStyle, AZURE_TILE_API_VERSION};

/// Default tile provider.
pub const DEFAULT_PROVIDER_TYPE: &str = "azure";

/// Default tile edge length requested from the provider.
pub const DEFAULT_TILE_SIZE: u32 = 512;

/// Tile sizes the mosaic pipeline accepts.
pub const VALID_TILE_SIZES: [u32; 2] = [256, 512];

/// Default tile budget for one export.
pub const DEFAULT_MAX_TILES: usize = crate::planner::MAX_EXPORT_TILES;

/// Default number of concurrent tile fetches.
pub const DEFAULT_PARALLEL_FETCHES: usize = 8;

/// Upper bound for `parallel_fetches`; higher values get throttled upstream.
pub const MAX_PARALLEL_FETCHES: usize = 32;

/// Default per-attempt tile fetch deadline.
pub const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 10;

/// Default retries per tile. Zero means a failed tile stays blank.
pub const DEFAULT_MAX_RETRIES: u32 = 0;

/// Fixed pause between retry attempts.
pub const DEFAULT_RETRY_BACKOFF_MS: u64 = 250;

/// Default API server listen address.
pub const DEFAULT_SERVER_BIND: &str = "127.0.0.1:8080";

/// Environment variable holding the Azure Maps key.
pub const ENV_SUBSCRIPTION_KEY: &str = "AZURE_MAPS_SUBSCRIPTION_KEY";

/// Older variable name, consulted when [`ENV_SUBSCRIPTION_KEY`] is unset.
pub const ENV_SUBSCRIPTION_KEY_FALLBACK: &str = "AZURE_MAPS_KEY";

/// Default directory for exported images: the user's download folder.
pub fn default_output_dir() -> PathBuf {
    dirs::download_dir().unwrap_or_else(|| config_directory().join("exports"))
}

impl Default for ConfigFile {
    fn default() -> Self {
        let config_dir = config_directory();

        Self {
            provider: ProviderSettings {
                provider_type: DEFAULT_PROVIDER_TYPE.to_string(),
                subscription_key: None,
                url_template: None,
                api_version: AZURE_TILE_API_VERSION.to_string(),
                tile_size: DEFAULT_TILE_SIZE,
                style: MapStyle::default(),
            },
            export: ExportSettings {
                max_tiles: DEFAULT_MAX_TILES,
                parallel_fetches: DEFAULT_PARALLEL_FETCHES,
                fetch_timeout_secs: DEFAULT_FETCH_TIMEOUT_SECS,
                max_retries: DEFAULT_MAX_RETRIES,
                output_dir: default_output_dir(),
            },
            logging: LoggingSettings {
                file: config_dir.join("surveymap.log"),
            },
            server: ServerSettings {
                bind: DEFAULT_SERVER_BIND.to_string(),
            },
        }
    }
}
