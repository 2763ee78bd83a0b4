//! Configuration file handling for ~/.surveymap/config.ini.
//!
//! Loads and saves user configuration with sensible defaults.
//! Settings structs live in [`super::settings`], constants in [`super::defaults`],
//! parsing in [`super::parser`], and serialization in [`super::writer`].

use ini::Ini;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub use super::defaults::*;
pub use super::settings::*;

use super::fetch::FetchConfig;
use crate::provider::ProviderConfig;

/// Configuration file errors.
#[derive(Debug, Error)]
pub enum ConfigFileError {
    /// Failed to read config file
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] ini::Error),

    /// Failed to write config file
    #[error("Failed to write config file: {0}")]
    WriteError(String),

    /// Invalid configuration value
    #[error("Invalid configuration: {section}.{key} = '{value}' - {reason}")]
    InvalidValue {
        section: String,
        key: String,
        value: String,
        reason: String,
    },

    /// A required setting is absent
    #[error("Missing configuration: {0}")]
    Missing(String),

    /// Failed to create config directory
    #[error("Failed to create config directory: {0}")]
    DirectoryError(std::io::Error),
}

impl ConfigFile {
    /// Load configuration from the default path (~/.surveymap/config.ini).
    pub fn load() -> Result<Self, ConfigFileError> {
        let path = config_file_path();
        Self::load_from(&path)
    }

    /// Load configuration from a specific path.
    ///
    /// If the file doesn't exist, returns defaults.
    pub fn load_from(path: &Path) -> Result<Self, ConfigFileError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let ini = Ini::load_from_file(path)?;
        super::parser::parse_ini(&ini)
    }

    /// Save configuration to the default path (~/.surveymap/config.ini).
    pub fn save(&self) -> Result<(), ConfigFileError> {
        let path = config_file_path();
        self.save_to(&path)
    }

    /// Save configuration to a specific path.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigFileError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(ConfigFileError::DirectoryError)?;
        }

        std::fs::write(path, self.to_ini_string())
            .map_err(|e| ConfigFileError::WriteError(e.to_string()))
    }

    /// The commented INI text [`Self::save_to`] writes.
    pub fn to_ini_string(&self) -> String {
        super::writer::to_config_string(self)
    }

    /// Create the default config file if it doesn't exist.
    ///
    /// Returns the path to the config file.
    pub fn ensure_exists() -> Result<PathBuf, ConfigFileError> {
        let path = config_file_path();
        if !path.exists() {
            Self::default().save_to(&path)?;
        }
        Ok(path)
    }

    /// Azure Maps key from the process environment or the file.
    ///
    /// `AZURE_MAPS_SUBSCRIPTION_KEY` wins over `AZURE_MAPS_KEY`, which wins
    /// over `[provider] subscription_key`. Blank values are ignored.
    pub fn subscription_key(&self) -> Option<String> {
        self.subscription_key_with(|name| std::env::var(name).ok())
    }

    /// [`Self::subscription_key`] with an injectable environment lookup.
    pub fn subscription_key_with<F>(&self, env: F) -> Option<String>
    where
        F: Fn(&str) -> Option<String>,
    {
        [ENV_SUBSCRIPTION_KEY, ENV_SUBSCRIPTION_KEY_FALLBACK]
            .iter()
            .filter_map(|name| env(name))
            .chain(self.provider.subscription_key.clone())
            .map(|key| key.trim().to_string())
            .find(|key| !key.is_empty())
    }

    /// Tile source settings derived from `[provider]` and the environment.
    ///
    /// # Errors
    ///
    /// Returns `ConfigFileError::Missing` when the selected provider lacks
    /// its key or URL template.
    pub fn provider_config(&self) -> Result<ProviderConfig, ConfigFileError> {
        self.provider_config_with(self.subscription_key())
    }

    pub(crate) fn provider_config_with(
        &self,
        subscription_key: Option<String>,
    ) -> Result<ProviderConfig, ConfigFileError> {
        match self.provider.provider_type.as_str() {
            "template" => {
                let url_template = self.provider.url_template.clone().ok_or_else(|| {
                    ConfigFileError::Missing(
                        "provider.url_template is required when provider.type = template"
                            .to_string(),
                    )
                })?;
                Ok(ProviderConfig::Template {
                    url_template,
                    tile_size: self.provider.tile_size,
                })
            }
            _ => {
                let subscription_key = subscription_key.ok_or_else(|| {
                    ConfigFileError::Missing(format!(
                        "Azure Maps subscription key (set {} or provider.subscription_key)",
                        ENV_SUBSCRIPTION_KEY
                    ))
                })?;
                Ok(ProviderConfig::Azure {
                    subscription_key,
                    api_version: self.provider.api_version.clone(),
                    tile_size: self.provider.tile_size,
                })
            }
        }
    }

    /// Fetch tuning derived from `[export]`.
    pub fn fetch_config(&self) -> FetchConfig {
        FetchConfig::new()
            .with_timeout_secs(self.export.fetch_timeout_secs)
            .with_max_retries(self.export.max_retries)
            .with_parallel_fetches(self.export.parallel_fetches)
    }
}

/// Get the path to the config directory (~/.surveymap).
pub fn config_directory() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".surveymap")
}

/// Get the path to the config file (~/.surveymap/config.ini).
pub fn config_file_path() -> PathBuf {
    config_directory().join("config.ini")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ConfigFile::default();

        assert_eq!(config.provider.provider_type, "azure");
        assert!(config.provider.subscription_key.is_none());
        assert_eq!(config.provider.tile_size, DEFAULT_TILE_SIZE);
        assert_eq!(config.export.max_tiles, 50);
        assert_eq!(config.export.parallel_fetches, DEFAULT_PARALLEL_FETCHES);
        assert_eq!(config.export.fetch_timeout_secs, DEFAULT_FETCH_TIMEOUT_SECS);
        assert_eq!(config.export.max_retries, 0);
    }

    #[test]
    fn test_load_nonexistent_returns_defaults() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let config_path = temp_dir.path().join("nonexistent.ini");

        let config = ConfigFile::load_from(&config_path).unwrap();
        assert_eq!(config, ConfigFile::default());
    }

    #[test]
    fn test_save_and_reload() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let config_path = temp_dir.path().join("nested").join("config.ini");

        let mut config = ConfigFile::default();
        config.provider.subscription_key = Some("abc123".to_string());
        config.provider.style = crate::provider::MapStyle::Satellite;
        config.export.parallel_fetches = 4;
        config.export.max_retries = 2;
        config.export.output_dir = temp_dir.path().join("out");
        config.server.bind = "0.0.0.0:9000".to_string();

        config.save_to(&config_path).unwrap();
        let reloaded = ConfigFile::load_from(&config_path).unwrap();
        assert_eq!(reloaded, config);
    }

    #[test]
    fn test_env_key_precedence() {
        let mut config = ConfigFile::default();
        config.provider.subscription_key = Some("from-file".to_string());

        let both = |name: &str| match name {
            "AZURE_MAPS_SUBSCRIPTION_KEY" => Some("primary".to_string()),
            "AZURE_MAPS_KEY" => Some("fallback".to_string()),
            _ => None,
        };
        assert_eq!(config.subscription_key_with(both).as_deref(), Some("primary"));

        let fallback_only = |name: &str| (name == "AZURE_MAPS_KEY").then(|| "fallback".to_string());
        assert_eq!(
            config.subscription_key_with(fallback_only).as_deref(),
            Some("fallback")
        );

        let blank = |_: &str| Some("   ".to_string());
        assert_eq!(config.subscription_key_with(blank).as_deref(), Some("from-file"));
    }

    #[test]
    fn test_missing_key_is_reported() {
        let config = ConfigFile::default();
        let key = config.subscription_key_with(|_| None);
        assert!(key.is_none());
        assert!(matches!(
            config.provider_config_with(key),
            Err(ConfigFileError::Missing(_))
        ));
    }

    #[test]
    fn test_template_provider_config() {
        let mut config = ConfigFile::default();
        config.provider.provider_type = "template".to_string();
        assert!(config.provider_config_with(None).is_err());

        config.provider.url_template = Some("https://t.example/{z}/{x}/{y}.png".to_string());
        config.provider.tile_size = 256;
        assert_eq!(
            config.provider_config_with(None).unwrap(),
            ProviderConfig::Template {
                url_template: "https://t.example/{z}/{x}/{y}.png".to_string(),
                tile_size: 256
            }
        );
    }

    #[test]
    fn test_fetch_config_from_export_section() {
        let mut config = ConfigFile::default();
        config.export.fetch_timeout_secs = 3;
        config.export.max_retries = 1;
        config.export.parallel_fetches = 2;

        let fetch = config.fetch_config();
        assert_eq!(fetch.timeout_secs(), 3);
        assert_eq!(fetch.max_retries(), 1);
        assert_eq!(fetch.parallel_fetches(), 2);
    }
}
