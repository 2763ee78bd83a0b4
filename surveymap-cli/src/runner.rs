//! CLI runner for common setup and operations.
//!
//! Encapsulates config loading, logging initialization and tile source
//! creation to reduce duplication across command handlers.

use crate::error::CliError;
use std::future::Future;
use std::path::Path;
use std::sync::Arc;
use surveymap::config::ConfigFile;
use surveymap::export::ExportOrchestrator;
use surveymap::logging::{default_log_file, init_logging, LoggingGuard};
use surveymap::provider::{AnyTileSource, AsyncReqwestClient, AzureStaticMap};
use tracing::info;

/// Tile source type every command uses.
pub type CliTileSource = AnyTileSource<AsyncReqwestClient>;

/// Runner that manages CLI lifecycle and common operations.
pub struct CliRunner {
    /// Logging guard - keeps logging active while runner exists
    _logging_guard: LoggingGuard,
    /// Loaded configuration file
    config: ConfigFile,
}

impl CliRunner {
    /// Create a runner, loading config and initializing logging.
    ///
    /// # Arguments
    ///
    /// * `verbose` - Mirror log output to stdout
    /// * `debug_mode` - Debug-level logging unless RUST_LOG says otherwise
    pub fn new(verbose: bool, debug_mode: bool) -> Result<Self, CliError> {
        let config = ConfigFile::load()?;

        let log_path = &config.logging.file;
        let log_dir = log_path.parent().unwrap_or_else(|| Path::new("."));
        let log_file = log_path
            .file_name()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| default_log_file().to_string());

        let logging_guard = init_logging(log_dir, &log_file, verbose, debug_mode)
            .map_err(|e| CliError::LoggingInit(e.to_string()))?;

        Ok(Self {
            _logging_guard: logging_guard,
            config,
        })
    }

    /// Get the loaded configuration.
    pub fn config(&self) -> &ConfigFile {
        &self.config
    }

    /// Log startup information for a command.
    pub fn log_startup(&self, command: &str) {
        info!(version = surveymap::VERSION, command, "SurveyMap CLI starting");
    }

    /// Build the configured tile source.
    pub fn tile_source(&self) -> Result<CliTileSource, CliError> {
        let provider_config = self.config.provider_config()?;
        info!(provider = provider_config.name(), "Creating tile source");

        let http_client = AsyncReqwestClient::with_timeout(self.config.export.fetch_timeout_secs)?;
        Ok(provider_config.build(http_client)?)
    }

    /// Orchestrator over the configured tile source and export settings.
    pub fn orchestrator(&self) -> Result<ExportOrchestrator<CliTileSource>, CliError> {
        let source = self.tile_source()?;
        Ok(
            ExportOrchestrator::new(Arc::new(source), self.config.fetch_config())
                .with_max_tiles(self.config.export.max_tiles),
        )
    }

    /// Static renderer, or `None` without a subscription key.
    pub fn static_renderer(&self) -> Result<Option<AzureStaticMap<AsyncReqwestClient>>, CliError> {
        match self.config.subscription_key() {
            Some(key) => Ok(Some(AzureStaticMap::new(AsyncReqwestClient::new()?, key))),
            None => Ok(None),
        }
    }

    /// Run `future` to completion on a fresh multi-threaded runtime.
    pub fn block_on<F: Future>(&self, future: F) -> Result<F::Output, CliError> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
            .map_err(CliError::Runtime)?;
        Ok(runtime.block_on(future))
    }

    /// Write bytes to `path`, creating parent directories.
    pub fn save_file(&self, path: &Path, data: &[u8]) -> Result<(), CliError> {
        let write = || -> std::io::Result<()> {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(path, data)
        };

        write().map_err(|error| CliError::FileWrite {
            path: path.display().to_string(),
            error,
        })?;

        info!(path = %path.display(), bytes = data.len(), "File saved");
        Ok(())
    }
}
