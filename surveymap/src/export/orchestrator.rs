//! High-resolution export pipeline.

use super::context::OrchestratorContext;
use super::error::ExportError;
use super::estimate::ZoomStrategy;
use super::job::ExportJob;
use super::progress::{ProgressEvent, ProgressSink};
use super::state::ExportState;
use crate::config::FetchConfig;
use crate::coord::TileCoord;
use crate::fetcher::{
    FetchFailure, NetworkStats, NetworkStatsSnapshot, TileFetchError, TileFetcher, TileImage,
};
use crate::geometry::BoundingBox;
use crate::mosaic::{assemble, crop, encode_png};
use crate::planner::{check_tile_budget, tile_grid, TileSet, MAX_EXPORT_TILES};
use crate::provider::{MapStyle, TileSource};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// A delivered export.
#[derive(Debug, Clone)]
pub struct ExportOutcome {
    pub job_id: u64,
    /// Encoded PNG of the cropped mosaic
    pub png: Vec<u8>,
    pub width: u32,
    pub height: u32,
    pub zoom: u8,
    pub bounds: BoundingBox,
    pub tile_count: usize,
    /// Tiles left blank after failing
    pub failed_tiles: Vec<TileCoord>,
    pub stats: NetworkStatsSnapshot,
}

/// Runs exports against one tile source, one job at a time.
///
/// # Example
///
/// ```ignore
/// let orchestrator = ExportOrchestrator::new(Arc::new(source), FetchConfig::default());
/// let outcome = orchestrator
///     .export(&ctx, ZoomStrategy::Extent, &NoProgress, CancellationToken::new())
///     .await?;
/// FileDelivery::new(dir).deliver(&outcome.png).await?;
/// ```
pub struct ExportOrchestrator<S: TileSource + 'static> {
    fetcher: TileFetcher<S>,
    max_tiles: usize,
    busy: Arc<AtomicBool>,
}

/// Clears the busy flag when the running export ends, however it ends.
struct BusyGuard(Arc<AtomicBool>);

impl Drop for BusyGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl<S: TileSource + 'static> ExportOrchestrator<S> {
    pub fn new(source: Arc<S>, config: FetchConfig) -> Self {
        Self {
            fetcher: TileFetcher::new(source, config),
            max_tiles: MAX_EXPORT_TILES,
            busy: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Lowers the tile budget. Values above [`MAX_EXPORT_TILES`] are capped.
    pub fn with_max_tiles(mut self, max_tiles: usize) -> Self {
        self.max_tiles = max_tiles.min(MAX_EXPORT_TILES);
        self
    }

    pub fn max_tiles(&self) -> usize {
        self.max_tiles
    }

    pub fn source(&self) -> &S {
        self.fetcher.source()
    }

    /// True while an export is running.
    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    /// Exports the context's selected shape.
    ///
    /// # Errors
    ///
    /// - `ExportInProgress` if another export is running
    /// - `NoShapeSelected`, `InvalidShape`, `TooManyTiles` before any fetch
    /// - `EmptyRegion` if the crop is empty at the chosen zoom
    /// - `Cancelled` when `cancel` fires during fetching
    pub async fn export(
        &self,
        ctx: &OrchestratorContext,
        strategy: ZoomStrategy,
        progress: &dyn ProgressSink,
        cancel: CancellationToken,
    ) -> Result<ExportOutcome, ExportError> {
        let _guard = self.acquire()?;
        let mut job = ExportJob::new();

        let result = match ctx.selected_bounds() {
            Ok(bbox) => {
                self.run(&mut job, bbox, ctx.style(), strategy, progress, cancel)
                    .await
            }
            Err(e) => Err(e),
        };
        self.finish(&mut job, result)
    }

    /// Exports an explicit bounding box.
    pub async fn export_bounds(
        &self,
        bbox: BoundingBox,
        style: MapStyle,
        strategy: ZoomStrategy,
        progress: &dyn ProgressSink,
        cancel: CancellationToken,
    ) -> Result<ExportOutcome, ExportError> {
        let _guard = self.acquire()?;
        let mut job = ExportJob::new();

        let result = self.run(&mut job, bbox, style, strategy, progress, cancel).await;
        self.finish(&mut job, result)
    }

    fn acquire(&self) -> Result<BusyGuard, ExportError> {
        self.busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| ExportError::ExportInProgress)?;
        Ok(BusyGuard(Arc::clone(&self.busy)))
    }

    fn finish(
        &self,
        job: &mut ExportJob,
        result: Result<ExportOutcome, ExportError>,
    ) -> Result<ExportOutcome, ExportError> {
        match &result {
            Ok(outcome) => info!(
                job_id = job.id(),
                zoom = outcome.zoom,
                width = outcome.width,
                height = outcome.height,
                failed_tiles = outcome.failed_tiles.len(),
                elapsed_ms = job.elapsed().as_millis() as u64,
                "Export delivered"
            ),
            Err(ExportError::Cancelled) => {
                info!(job_id = job.id(), state = %job.state(), "Export cancelled")
            }
            Err(e) => {
                job.fail();
                warn!(job_id = job.id(), error = %e, "Export failed");
            }
        }
        result
    }

    async fn run(
        &self,
        job: &mut ExportJob,
        bbox: BoundingBox,
        style: MapStyle,
        strategy: ZoomStrategy,
        progress: &dyn ProgressSink,
        cancel: CancellationToken,
    ) -> Result<ExportOutcome, ExportError> {
        self.step(job, ExportState::BoundsComputed)?;

        let source = self.fetcher.source();
        let zoom = strategy
            .resolve(&bbox)
            .clamp(source.min_zoom(), source.max_zoom());
        let grid = tile_grid(&bbox, zoom)?;
        check_tile_budget(&grid, self.max_tiles)?;
        self.step(job, ExportState::BudgetChecked)?;

        info!(
            job_id = job.id(),
            zoom,
            tiles = grid.len(),
            style = %style,
            source = source.name(),
            "Export started"
        );

        self.step(job, ExportState::Fetching)?;
        let stats = Arc::new(NetworkStats::new());
        let fetcher = self.fetcher.clone().with_stats(Arc::clone(&stats));
        let fetched = match fetch_grid(&fetcher, &grid, style, progress, &cancel).await {
            Ok(fetched) => fetched,
            Err(e) => {
                if e == ExportError::Cancelled {
                    self.step(job, ExportState::Cancelled)?;
                }
                return Err(e);
            }
        };

        self.step(job, ExportState::Assembling)?;
        let tile_size = fetcher.tile_size();
        let canvas = tokio::task::spawn_blocking(move || assemble(&fetched.tiles, &grid, tile_size))
            .await
            .map_err(|e| ExportError::Internal(format!("mosaic assembly aborted: {}", e)))?;

        self.step(job, ExportState::Cropping)?;
        let (min_x, min_y) = (grid.min_x(), grid.min_y());
        let image = tokio::task::spawn_blocking(move || {
            crop(&canvas, &bbox, zoom, min_x, min_y, tile_size)
        })
        .await
        .map_err(|e| ExportError::Internal(format!("crop aborted: {}", e)))?
        .map_err(|e| match e {
            crate::mosaic::MosaicError::EmptyRegion { .. } => ExportError::EmptyRegion { zoom },
            other => other.into(),
        })?;

        let (width, height) = image.dimensions();
        let png = tokio::task::spawn_blocking(move || encode_png(&image))
            .await
            .map_err(|e| ExportError::Internal(format!("encoding aborted: {}", e)))??;

        self.step(job, ExportState::Delivered)?;

        let stats = stats.snapshot();
        info!(job_id = job.id(), stats = %stats, "Export network summary");

        Ok(ExportOutcome {
            job_id: job.id(),
            png,
            width,
            height,
            zoom,
            bounds: bbox,
            tile_count: grid.len(),
            failed_tiles: fetched.failed,
            stats,
        })
    }

    fn step(&self, job: &mut ExportJob, next: ExportState) -> Result<(), ExportError> {
        job.advance(next)
            .map_err(|e| ExportError::Internal(e.to_string()))
    }
}

struct FetchedTiles {
    tiles: Vec<TileImage>,
    failed: Vec<TileCoord>,
}

/// Fetches every tile of `grid` with bounded concurrency.
///
/// Reports progress once per settled tile. On cancellation, outstanding
/// fetches are aborted, collected tiles are dropped and no further progress
/// is reported.
async fn fetch_grid<S: TileSource + 'static>(
    fetcher: &TileFetcher<S>,
    grid: &TileSet,
    style: MapStyle,
    progress: &dyn ProgressSink,
    cancel: &CancellationToken,
) -> Result<FetchedTiles, ExportError> {
    let total = grid.len();
    let semaphore = Arc::new(Semaphore::new(fetcher.config().parallel_fetches()));
    let mut fetches = JoinSet::new();

    for coord in grid.iter() {
        let fetcher = fetcher.clone();
        let semaphore = Arc::clone(&semaphore);
        fetches.spawn(async move {
            let _permit = semaphore.acquire_owned().await.map_err(|_| TileFetchError {
                coord,
                cause: FetchFailure::Aborted,
            })?;
            fetcher.fetch_tile(coord, style).await
        });
    }

    let mut tiles = Vec::with_capacity(total);
    let mut failed = Vec::new();
    let mut completed = 0;

    loop {
        let joined = tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                fetches.abort_all();
                debug!(completed, total, "Fetch cancelled");
                return Err(ExportError::Cancelled);
            }
            joined = fetches.join_next() => joined,
        };

        let Some(joined) = joined else {
            break;
        };

        match joined {
            Ok(Ok(tile)) => tiles.push(tile),
            Ok(Err(e)) => {
                warn!(tile = %e.coord, error = %e.cause, "Tile left blank");
                failed.push(e.coord);
            }
            Err(join_err) => {
                warn!(error = %join_err, "Tile fetch task aborted");
            }
        }

        completed += 1;
        progress.report(ProgressEvent { completed, total });
    }

    Ok(FetchedTiles { tiles, failed })
}
