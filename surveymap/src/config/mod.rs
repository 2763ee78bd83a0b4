//! Configuration for SurveyMap components.
//!
//! The user-facing INI file lives at `~/.surveymap/config.ini` and is
//! represented by [`ConfigFile`]. Runtime components take narrower structs
//! derived from it, such as [`FetchConfig`].
//!
//! # Example
//!
//! ```no_run
//! use surveymap::config::ConfigFile;
//!
//! let config = ConfigFile::load()?;
//! let fetch = config.fetch_config();
//! # Ok::<(), surveymap::config::ConfigFileError>(())
//! ```

mod defaults;
mod fetch;
mod file;
mod parser;
mod settings;
mod writer;

pub use defaults::{
    default_output_dir, DEFAULT_FETCH_TIMEOUT_SECS, DEFAULT_MAX_RETRIES, DEFAULT_MAX_TILES,
    DEFAULT_PARALLEL_FETCHES, DEFAULT_PROVIDER_TYPE, DEFAULT_RETRY_BACKOFF_MS,
    DEFAULT_SERVER_BIND, DEFAULT_TILE_SIZE, ENV_SUBSCRIPTION_KEY, ENV_SUBSCRIPTION_KEY_FALLBACK,
    MAX_PARALLEL_FETCHES, VALID_TILE_SIZES,
};
pub use fetch::FetchConfig;
pub use file::{config_directory, config_file_path, ConfigFileError};
pub use settings::{ConfigFile, ExportSettings, LoggingSettings, ProviderSettings, ServerSettings};
