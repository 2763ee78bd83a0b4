//! Snapshot command - the standard single-image export.
//!
//! Renders one 1280×1280 static map centred on a point, the same image
//! `POST /api/export` serves.

use std::path::PathBuf;

use surveymap::geometry::GeoPoint;
use surveymap::provider::MapStyle;

use super::common::{parse_point, resolve_style, StyleArg};
use crate::error::CliError;
use crate::runner::CliRunner;

/// Arguments for the snapshot command.
pub struct SnapshotArgs {
    pub center: String,
    pub zoom: u8,
    pub style: Option<StyleArg>,
    pub output: Option<PathBuf>,
}

/// Run the snapshot command.
pub fn run(runner: CliRunner, args: SnapshotArgs) -> Result<(), CliError> {
    runner.log_startup("snapshot");
    let config = runner.config();

    let center: GeoPoint = parse_point(&args.center)?;
    let style: MapStyle = resolve_style(args.style, config);
    let renderer = runner.static_renderer()?.ok_or_else(|| {
        CliError::Config("no Azure Maps subscription key configured".to_string())
    })?;

    println!(
        "Rendering {} map at {:.6}, {:.6} (zoom {})...",
        style, center.lon, center.lat, args.zoom
    );
    let png = runner
        .block_on(renderer.render(center, args.zoom, style))?
        .map_err(CliError::Provider)?;

    let output = args.output.unwrap_or_else(|| {
        let stamp = chrono::Utc::now().timestamp_millis();
        config.export.output_dir.join(format!("map_{}.png", stamp))
    });
    runner.save_file(&output, &png)?;

    println!(
        "✓ Saved: {} ({:.2} KB)",
        output.display(),
        png.len() as f64 / 1024.0
    );
    Ok(())
}
