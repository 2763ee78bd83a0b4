//! CLI error handling with user-friendly messages.
//!
//! Centralizes error handling for the CLI, providing consistent formatting
//! and appropriate exit codes.

use std::fmt;
use std::process;
use surveymap::config::{ConfigFileError, ENV_SUBSCRIPTION_KEY};
use surveymap::export::ExportError;
use surveymap::provider::ProviderError;

/// CLI-specific errors with user-friendly messages.
#[derive(Debug)]
pub enum CliError {
    /// Failed to initialize logging
    LoggingInit(String),
    /// Configuration error
    Config(String),
    /// Bad command-line input
    InvalidInput(String),
    /// Failed to create the tile source or HTTP client
    Provider(ProviderError),
    /// Export did not complete
    Export(ExportError),
    /// Failed to write output file
    FileWrite { path: String, error: std::io::Error },
    /// Failed to start the async runtime
    Runtime(std::io::Error),
    /// HTTP server error
    Serve(std::io::Error),
}

impl CliError {
    /// Exit the process with an appropriate error message and code.
    pub fn exit(&self) -> ! {
        eprintln!("Error: {}", self);

        match self {
            CliError::Config(_) | CliError::Export(ExportError::Configuration(_)) => {
                eprintln!();
                eprintln!("Azure Maps needs a subscription key. Either:");
                eprintln!("  1. export {}=<key>", ENV_SUBSCRIPTION_KEY);
                eprintln!("  2. set subscription_key under [provider] in the config file");
                eprintln!("     (run 'surveymap config path' to find it)");
            }
            CliError::Export(ExportError::TooManyTiles { .. }) => {
                eprintln!();
                eprintln!("Draw a smaller area, or pass a lower --zoom.");
            }
            CliError::Serve(_) => {
                eprintln!();
                eprintln!("Check that the [server] bind address is free and valid.");
            }
            _ => {}
        }

        process::exit(1)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::LoggingInit(msg) => write!(f, "Failed to initialize logging: {}", msg),
            CliError::Config(msg) => write!(f, "Configuration error: {}", msg),
            CliError::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            CliError::Provider(e) => write!(f, "Failed to create tile source: {}", e),
            CliError::Export(e) => write!(f, "Export failed: {}", e),
            CliError::FileWrite { path, error } => {
                write!(f, "Failed to write file '{}': {}", path, error)
            }
            CliError::Runtime(e) => write!(f, "Failed to start async runtime: {}", e),
            CliError::Serve(e) => write!(f, "Server error: {}", e),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Provider(e) => Some(e),
            CliError::Export(e) => Some(e),
            CliError::FileWrite { error, .. } => Some(error),
            CliError::Runtime(e) | CliError::Serve(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ConfigFileError> for CliError {
    fn from(e: ConfigFileError) -> Self {
        CliError::Config(e.to_string())
    }
}

impl From<ExportError> for CliError {
    fn from(e: ExportError) -> Self {
        CliError::Export(e)
    }
}

impl From<ProviderError> for CliError {
    fn from(e: ProviderError) -> Self {
        CliError::Provider(e)
    }
}
