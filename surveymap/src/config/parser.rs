//! INI parsing logic for converting `Ini` → `ConfigFile`.
//!
//! This module contains the `parse_ini()` function and its helpers.
//! It is the single place where INI key names are mapped to struct fields.

use ini::Ini;
use std::path::PathBuf;
use std::str::FromStr;

use super::defaults::{MAX_PARALLEL_FETCHES, VALID_TILE_SIZES};
use crate::planner::MAX_EXPORT_TILES;
use super::file::ConfigFileError;
use super::settings::ConfigFile;
use crate::provider::MapStyle;

/// Parse an `Ini` object into a `ConfigFile`.
///
/// Starts from `ConfigFile::default()` and overlays any values found in the INI.
pub(super) fn parse_ini(ini: &Ini) -> Result<ConfigFile, ConfigFileError> {
    let mut config = ConfigFile::default();

    // [provider] section
    if let Some(section) = ini.section(Some("provider")) {
        if let Some(v) = section.get("type") {
            let v = v.trim().to_lowercase();
            if v != "azure" && v != "template" {
                return Err(invalid("provider", "type", &v, "must be 'azure' or 'template'"));
            }
            config.provider.provider_type = v;
        }
        if let Some(v) = non_empty(section.get("subscription_key")) {
            config.provider.subscription_key = Some(v.to_string());
        }
        if let Some(v) = non_empty(section.get("url_template")) {
            config.provider.url_template = Some(v.to_string());
        }
        if let Some(v) = non_empty(section.get("api_version")) {
            config.provider.api_version = v.to_string();
        }
        if let Some(v) = section.get("tile_size") {
            let size: u32 = parse_number("provider", "tile_size", v, "must be 256 or 512")?;
            if !VALID_TILE_SIZES.contains(&size) {
                return Err(invalid("provider", "tile_size", v, "must be 256 or 512"));
            }
            config.provider.tile_size = size;
        }
        if let Some(v) = section.get("style") {
            config.provider.style = MapStyle::from_str(v.trim())
                .map_err(|reason| invalid("provider", "style", v, &reason))?;
        }
    }

    // [export] section
    if let Some(section) = ini.section(Some("export")) {
        if let Some(v) = section.get("max_tiles") {
            let n: usize =
                parse_number("export", "max_tiles", v, "must be a positive integer")?;
            if n == 0 {
                return Err(invalid("export", "max_tiles", v, "must be at least 1"));
            }
            if n > MAX_EXPORT_TILES {
                return Err(invalid(
                    "export",
                    "max_tiles",
                    v,
                    &format!("may only lower the budget (at most {})", MAX_EXPORT_TILES),
                ));
            }
            config.export.max_tiles = n;
        }
        if let Some(v) = section.get("parallel_fetches") {
            let n: usize =
                parse_number("export", "parallel_fetches", v, "must be a positive integer")?;
            config.export.parallel_fetches = clamp_parallel_fetches(n);
        }
        if let Some(v) = section.get("fetch_timeout_secs") {
            let n: u64 = parse_number(
                "export",
                "fetch_timeout_secs",
                v,
                "must be a positive integer (seconds)",
            )?;
            if n == 0 {
                return Err(invalid("export", "fetch_timeout_secs", v, "must be at least 1"));
            }
            config.export.fetch_timeout_secs = n;
        }
        if let Some(v) = section.get("max_retries") {
            config.export.max_retries =
                parse_number("export", "max_retries", v, "must be a non-negative integer")?;
        }
        if let Some(v) = non_empty(section.get("output_dir")) {
            config.export.output_dir = expand_tilde(v);
        }
    }

    // [logging] section
    if let Some(section) = ini.section(Some("logging")) {
        if let Some(v) = non_empty(section.get("file")) {
            config.logging.file = expand_tilde(v);
        }
    }

    // [server] section
    if let Some(section) = ini.section(Some("server")) {
        if let Some(v) = non_empty(section.get("bind")) {
            if !v.contains(':') {
                return Err(invalid("server", "bind", v, "expected host:port"));
            }
            config.server.bind = v.to_string();
        }
    }

    Ok(config)
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn parse_number<T: FromStr>(
    section: &str,
    key: &str,
    value: &str,
    reason: &str,
) -> Result<T, ConfigFileError> {
    value
        .trim()
        .parse()
        .map_err(|_| invalid(section, key, value, reason))
}

fn invalid(section: &str, key: &str, value: &str, reason: &str) -> ConfigFileError {
    ConfigFileError::InvalidValue {
        section: section.to_string(),
        key: key.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Clamps fetch parallelism to `1..=MAX_PARALLEL_FETCHES`, warning when clamped.
fn clamp_parallel_fetches(value: usize) -> usize {
    let clamped = value.clamp(1, MAX_PARALLEL_FETCHES);
    if clamped != value {
        tracing::warn!(
            requested = value,
            max = MAX_PARALLEL_FETCHES,
            "parallel_fetches out of range, clamping to {}",
            clamped
        );
    }
    clamped
}

pub(super) fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(stripped);
        }
    }
    PathBuf::from(path)
}
