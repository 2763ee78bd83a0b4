//! SurveyMap CLI - Command-line interface
//!
//! Exports map imagery for drawn survey shapes, measures areas and paths,
//! and serves the export endpoints used by the browser map panel.

mod commands;
mod error;
mod runner;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use commands::common::StyleArg;
use commands::config::ConfigCommands;
use error::CliError;
use runner::CliRunner;

#[derive(Parser)]
#[command(name = "surveymap")]
#[command(version = surveymap::VERSION)]
#[command(about = "Tile-mosaic map exports for land-survey shapes", long_about = None)]
struct Cli {
    /// Mirror log output to stdout
    #[arg(long, short, global = true)]
    verbose: bool,

    /// Debug-level logging
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Shape given as a bounding box or a polygon.
#[derive(Debug, Args)]
#[group(required = true, multiple = false)]
struct ShapeArgs {
    /// Bounding box as N,S,E,W in degrees
    #[arg(long, value_name = "N,S,E,W", allow_hyphen_values = true)]
    bbox: Option<String>,

    /// Polygon as "lon,lat;lon,lat;..." in degrees
    #[arg(long, value_name = "LON,LAT;...", allow_hyphen_values = true)]
    polygon: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Export the map under a shape as a cropped PNG mosaic
    Export {
        #[command(flatten)]
        shape: ShapeArgs,

        /// Base map style (default from config)
        #[arg(long, value_enum)]
        style: Option<StyleArg>,

        /// Fixed zoom level instead of the extent table
        #[arg(long)]
        zoom: Option<u8>,

        /// Pick the highest zoom whose output stays below this many pixels per side
        #[arg(long, conflicts_with = "zoom")]
        pixel_budget: Option<u32>,

        /// Directory for the PNG (default from config)
        #[arg(long)]
        output_dir: Option<PathBuf>,
    },

    /// Preview zoom, image size and tile count for a shape
    Estimate {
        #[command(flatten)]
        shape: ShapeArgs,

        /// Pixel budget per side for the preview search
        #[arg(long)]
        pixel_budget: Option<u32>,
    },

    /// Measure a polygon's area
    Area {
        #[command(flatten)]
        shape: ShapeArgs,
    },

    /// Measure a path's length
    Distance {
        /// Path as "lon,lat;lon,lat;..." in degrees
        #[arg(long, allow_hyphen_values = true)]
        path: String,
    },

    /// Save a single static map image centred on a point
    Snapshot {
        /// Centre as lon,lat
        #[arg(long, allow_hyphen_values = true)]
        center: String,

        /// Zoom level
        #[arg(long, default_value = "15")]
        zoom: u8,

        /// Base map style (default from config)
        #[arg(long, value_enum)]
        style: Option<StyleArg>,

        /// Output file (default: map_<epoch-ms>.png in the output directory)
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Serve the export API over HTTP
    Serve {
        /// Listen address (default from config)
        #[arg(long)]
        bind: Option<String>,
    },

    /// View and manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        e.exit();
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let (verbose, debug) = (cli.verbose, cli.debug);
    let runner = move || CliRunner::new(verbose, debug);

    match cli.command {
        Commands::Export {
            shape,
            style,
            zoom,
            pixel_budget,
            output_dir,
        } => commands::export::run(
            runner()?,
            commands::export::ExportArgs {
                bbox: shape.bbox,
                polygon: shape.polygon,
                style,
                zoom,
                pixel_budget,
                output_dir,
            },
        ),

        Commands::Estimate {
            shape,
            pixel_budget,
        } => commands::estimate::run(
            runner()?,
            commands::estimate::EstimateArgs {
                bbox: shape.bbox,
                polygon: shape.polygon,
                pixel_budget,
            },
        ),

        Commands::Area { shape } => {
            commands::measure::run_area(shape.bbox.as_deref(), shape.polygon.as_deref())
        }

        Commands::Distance { path } => commands::measure::run_distance(&path),

        Commands::Snapshot {
            center,
            zoom,
            style,
            output,
        } => commands::snapshot::run(
            runner()?,
            commands::snapshot::SnapshotArgs {
                center,
                zoom,
                style,
                output,
            },
        ),

        Commands::Serve { bind } => commands::serve::run(runner()?, bind),

        Commands::Config { command } => commands::config::run(command),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_export_requires_one_shape() {
        assert!(Cli::try_parse_from(["surveymap", "export"]).is_err());
        assert!(Cli::try_parse_from([
            "surveymap",
            "export",
            "--bbox",
            "1,0,1,0",
            "--polygon",
            "0,0;1,0;1,1"
        ])
        .is_err());
        assert!(Cli::try_parse_from(["surveymap", "export", "--bbox", "13.01,13.00,77.61,77.60"]).is_ok());
    }

    #[test]
    fn test_negative_coordinates_parse() {
        let cli = Cli::try_parse_from([
            "surveymap",
            "distance",
            "--path",
            "-74.0,40.7;-73.9,40.8",
        ])
        .unwrap();
        assert!(matches!(cli.command, Commands::Distance { .. }));
    }

    #[test]
    fn test_zoom_conflicts_with_pixel_budget() {
        assert!(Cli::try_parse_from([
            "surveymap",
            "export",
            "--bbox",
            "1,0,1,0",
            "--zoom",
            "16",
            "--pixel-budget",
            "4000"
        ])
        .is_err());
    }
}
