//! Configuration management CLI commands.
//!
//! Provides `config path`, `config init` and `config show`.

use clap::Subcommand;
use surveymap::config::{config_file_path, ConfigFile};

use crate::error::CliError;

/// Config subcommands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Show the configuration file path
    Path,

    /// Create the configuration file with defaults if it does not exist
    Init,

    /// Show the effective configuration
    Show,
}

/// Run a config subcommand.
pub fn run(command: ConfigCommands) -> Result<(), CliError> {
    match command {
        ConfigCommands::Path => run_path(),
        ConfigCommands::Init => run_init(),
        ConfigCommands::Show => run_show(),
    }
}

/// Show the configuration file path.
fn run_path() -> Result<(), CliError> {
    println!("{}", config_file_path().display());
    Ok(())
}

/// Create the default configuration file.
fn run_init() -> Result<(), CliError> {
    let existed = config_file_path().exists();
    let path = ConfigFile::ensure_exists()?;

    if existed {
        println!("Configuration already exists: {}", path.display());
    } else {
        println!("✓ Created {}", path.display());
        println!();
        println!("Set your Azure Maps key under [provider] subscription_key,");
        println!("or export it as an environment variable before running exports.");
    }
    Ok(())
}

/// Show the effective configuration, with the key masked.
fn run_show() -> Result<(), CliError> {
    let config = ConfigFile::load()?;

    println!("Configuration ({})", config_file_path().display());
    println!("=============");
    println!();
    println!("[provider]");
    println!("  type = {}", config.provider.provider_type);
    println!(
        "  subscription_key = {}",
        config
            .subscription_key()
            .map(|key| mask_key(&key))
            .unwrap_or_else(|| "(not set)".to_string())
    );
    if let Some(template) = &config.provider.url_template {
        println!("  url_template = {}", template);
    }
    println!("  api_version = {}", config.provider.api_version);
    println!("  tile_size = {}", config.provider.tile_size);
    println!("  style = {}", config.provider.style);
    println!();
    println!("[export]");
    println!("  max_tiles = {}", config.export.max_tiles);
    println!("  parallel_fetches = {}", config.export.parallel_fetches);
    println!("  fetch_timeout_secs = {}", config.export.fetch_timeout_secs);
    println!("  max_retries = {}", config.export.max_retries);
    println!("  output_dir = {}", config.export.output_dir.display());
    println!();
    println!("[logging]");
    println!("  file = {}", config.logging.file.display());
    println!();
    println!("[server]");
    println!("  bind = {}", config.server.bind);

    Ok(())
}

/// Keep only the last four characters of a secret.
fn mask_key(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    if chars.len() <= 4 {
        return "****".to_string();
    }
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("****{}", tail)
}
