//! Export command - fetch, stitch and crop the tiles under a shape.

use std::io::Write;
use std::path::PathBuf;

use surveymap::export::{ChannelProgress, FileDelivery, OrchestratorContext, ZoomStrategy};
use surveymap::planner::PixelBudget;
use surveymap::provider::TileSource;
use tokio_util::sync::CancellationToken;
use tracing::info;

use super::common::{resolve_style, shape_from_args, StyleArg};
use crate::error::CliError;
use crate::runner::CliRunner;

/// Arguments for the export command.
pub struct ExportArgs {
    pub bbox: Option<String>,
    pub polygon: Option<String>,
    pub style: Option<StyleArg>,
    pub zoom: Option<u8>,
    pub pixel_budget: Option<u32>,
    pub output_dir: Option<PathBuf>,
}

/// Zoom strategy: `--zoom` > `--pixel-budget` > extent table.
pub fn zoom_strategy(zoom: Option<u8>, pixel_budget: Option<u32>) -> ZoomStrategy {
    match (zoom, pixel_budget) {
        (Some(zoom), _) => ZoomStrategy::Fixed(zoom),
        (None, Some(max_pixels)) => ZoomStrategy::PixelBudget(PixelBudget {
            max_pixels,
            ..PixelBudget::default()
        }),
        (None, None) => ZoomStrategy::Extent,
    }
}

/// Run the export command.
pub fn run(runner: CliRunner, args: ExportArgs) -> Result<(), CliError> {
    runner.log_startup("export");
    let config = runner.config();

    let shape = shape_from_args(args.bbox.as_deref(), args.polygon.as_deref())?;
    let style = resolve_style(args.style, config);
    let ctx = OrchestratorContext::new(style).with_shape(shape);
    let strategy = zoom_strategy(args.zoom, args.pixel_budget);
    let output_dir = args
        .output_dir
        .unwrap_or_else(|| config.export.output_dir.clone());

    let orchestrator = runner.orchestrator()?;
    println!("Exporting {} map from {}...", style, orchestrator.source().name());

    let outcome = runner.block_on(async {
        let cancel = CancellationToken::new();
        let ctrl_c = {
            let cancel = cancel.clone();
            tokio::spawn(async move {
                if tokio::signal::ctrl_c().await.is_ok() {
                    info!("Ctrl-C received, cancelling export");
                    cancel.cancel();
                }
            })
        };

        let (progress, mut events) = ChannelProgress::new();
        let printer = tokio::spawn(async move {
            while let Some(event) = events.recv().await {
                print!(
                    "\r  Fetching tiles: {}/{} ({}%)",
                    event.completed,
                    event.total,
                    event.percent()
                );
                let _ = std::io::stdout().flush();
            }
        });

        let result = orchestrator.export(&ctx, strategy, &progress, cancel).await;

        drop(progress);
        let _ = printer.await;
        ctrl_c.abort();
        println!();

        match result {
            Ok(outcome) => FileDelivery::new(&output_dir)
                .deliver(&outcome.png)
                .await
                .map(|path| (outcome, path)),
            Err(e) => Err(e),
        }
    })?;

    let (outcome, path) = outcome?;

    println!("✓ Export saved: {}", path.display());
    println!("  Zoom:       {}", outcome.zoom);
    println!("  Size:       {}×{} px", outcome.width, outcome.height);
    println!("  Tiles:      {}", outcome.tile_count);
    if !outcome.failed_tiles.is_empty() {
        println!(
            "  Warning:    {} tile(s) failed and were left blank",
            outcome.failed_tiles.len()
        );
    }
    println!("  Network:    {}", outcome.stats);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zoom_strategy_precedence() {
        assert_eq!(zoom_strategy(Some(17), Some(4000)), ZoomStrategy::Fixed(17));
        assert_eq!(zoom_strategy(None, None), ZoomStrategy::Extent);

        match zoom_strategy(None, Some(4000)) {
            ZoomStrategy::PixelBudget(budget) => {
                assert_eq!(budget.max_pixels, 4000);
                assert_eq!(budget.floor_zoom, PixelBudget::default().floor_zoom);
            }
            other => panic!("unexpected strategy {:?}", other),
        }
    }
}
