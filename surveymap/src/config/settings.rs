//! Settings structs for all configuration sections.
//!
//! Each struct represents one `[section]` of the INI config file.
//! These are pure data types with no parsing or serialization logic.

use crate::provider::MapStyle;
use std::path::PathBuf;

/// Complete application configuration loaded from config.ini.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigFile {
    /// Tile provider settings
    pub provider: ProviderSettings,
    /// Export pipeline settings
    pub export: ExportSettings,
    /// Logging settings
    pub logging: LoggingSettings,
    /// HTTP API server settings
    pub server: ServerSettings,
}

/// Tile provider configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderSettings {
    /// Provider type: "azure" or "template"
    pub provider_type: String,
    /// Azure Maps subscription key (environment variables take precedence)
    pub subscription_key: Option<String>,
    /// XYZ URL template (only used when type = template)
    pub url_template: Option<String>,
    /// Azure tile API version
    pub api_version: String,
    /// Tile edge length in pixels, 256 or 512
    pub tile_size: u32,
    /// Default base map style
    pub style: MapStyle,
}

/// Export pipeline configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportSettings {
    /// Maximum tiles per export
    pub max_tiles: usize,
    /// Concurrent tile fetches
    pub parallel_fetches: usize,
    /// Per-attempt tile fetch deadline in seconds
    pub fetch_timeout_secs: u64,
    /// Retries per tile after the first attempt
    pub max_retries: u32,
    /// Directory for exported PNG files
    pub output_dir: PathBuf,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct LoggingSettings {
    /// Log file path
    pub file: PathBuf,
}

/// HTTP API server configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct ServerSettings {
    /// Listen address, `host:port`
    pub bind: String,
}
