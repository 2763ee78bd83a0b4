//! Estimate command - preview an export without fetching.

use surveymap::export::{estimate, OrchestratorContext};
use surveymap::planner::PixelBudget;

use super::common::{print_area, shape_from_args};
use crate::error::CliError;
use crate::runner::CliRunner;

/// Arguments for the estimate command.
pub struct EstimateArgs {
    pub bbox: Option<String>,
    pub polygon: Option<String>,
    pub pixel_budget: Option<u32>,
}

/// Run the estimate command.
pub fn run(runner: CliRunner, args: EstimateArgs) -> Result<(), CliError> {
    runner.log_startup("estimate");
    let config = runner.config();

    let shape = shape_from_args(args.bbox.as_deref(), args.polygon.as_deref())?;
    let ctx = OrchestratorContext::new(config.provider.style).with_shape(shape);
    let budget = PixelBudget {
        max_pixels: args.pixel_budget.unwrap_or(PixelBudget::default().max_pixels),
        ..PixelBudget::default()
    };

    let est = estimate(&ctx, &budget, config.export.max_tiles)?;

    println!("Export Estimate");
    println!("===============");
    println!();
    println!(
        "  Pixel budget: zoom {} → {}×{} px, {} tiles",
        est.zoom, est.pixel_width, est.pixel_height, est.tile_count
    );
    println!(
        "  Export:       zoom {} → {} tiles (limit {})",
        est.extent_zoom, est.extent_tile_count, config.export.max_tiles
    );
    print_area(&est.area);
    println!();

    if est.within_budget {
        println!("✓ Within the tile budget");
    } else {
        println!("✗ Too many tiles: draw a smaller area or pass --zoom to export");
    }

    Ok(())
}
