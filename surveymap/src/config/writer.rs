//! INI serialization logic for converting `ConfigFile` → INI string.
//!
//! This module contains the `to_config_string()` function that produces
//! the commented INI representation written to `config.ini`.

use std::path::Path;

use super::settings::ConfigFile;

/// Convert a `ConfigFile` to a commented INI string for saving.
pub(super) fn to_config_string(config: &ConfigFile) -> String {
    let subscription_key = config.provider.subscription_key.as_deref().unwrap_or("");
    let url_template = config.provider.url_template.as_deref().unwrap_or("");

    format!(
        r#"[provider]
; Tile provider:
;   azure    - Azure Maps (requires a subscription key)
;   template - any XYZ tile service, see url_template
type = {}
; Azure Maps subscription key. The environment variables
; AZURE_MAPS_SUBSCRIPTION_KEY and AZURE_MAPS_KEY take precedence.
subscription_key = {}
; URL template with {{z}}, {{x}}, {{y}} and optional {{style}} placeholders
; Example: https://mt1.google.com/vt/lyrs=s&x={{x}}&y={{y}}&z={{z}}
url_template = {}
; Azure Maps tile API version
api_version = {}
; Tile edge length in pixels: 256 or 512
tile_size = {}
; Default map style: road or satellite
style = {}

[export]
; Maximum number of tiles fetched for one export (default: 50)
max_tiles = {}
; Concurrent tile fetches (default: 8, max: 32)
parallel_fetches = {}
; Per-tile fetch timeout in seconds (default: 10)
fetch_timeout_secs = {}
; Retries per failed tile (default: 0, failed tiles are left blank)
max_retries = {}
; Directory where exported PNG files are written
output_dir = {}

[logging]
; Log file path (cleared at the start of each session)
file = {}

[server]
; Listen address for `surveymap serve`
bind = {}
"#,
        config.provider.provider_type,
        subscription_key,
        url_template,
        config.provider.api_version,
        config.provider.tile_size,
        config.provider.style,
        config.export.max_tiles,
        config.export.parallel_fetches,
        config.export.fetch_timeout_secs,
        config.export.max_retries,
        path_to_string(&config.export.output_dir),
        path_to_string(&config.logging.file),
        config.server.bind,
    )
}

/// Renders a path, abbreviating the home directory to `~`.
fn path_to_string(path: &Path) -> String {
    if let Some(home) = dirs::home_dir() {
        if let Ok(stripped) = path.strip_prefix(&home) {
            return format!("~/{}", stripped.display());
        }
    }
    path.display().to_string()
}
