//! Single-tile fetching with deadline, retry and decode.
//!
//! [`TileFetcher`] wraps a [`TileSource`] and turns encoded tile bodies into
//! RGBA images of the configured tile size. Every failure is reported per
//! tile as a [`TileFetchError`]; the caller decides whether to continue.

mod stats;

pub use stats::{NetworkStats, NetworkStatsSnapshot};

use crate::config::FetchConfig;
use crate::coord::TileCoord;
use crate::provider::{MapStyle, ProviderError, TileSource};
use image::{imageops, ImageReader, RgbaImage};
use std::io::Cursor;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, trace, warn};

/// A decoded tile ready for placement.
#[derive(Debug, Clone)]
pub struct TileImage {
    pub coord: TileCoord,
    pub image: RgbaImage,
}

/// Why a tile could not be obtained.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FetchFailure {
    #[error("{0}")]
    Provider(ProviderError),

    #[error("timed out after {0:?}")]
    Timeout(Duration),

    #[error("undecodable image: {0}")]
    Decode(String),

    #[error("fetch aborted")]
    Aborted,
}

/// Failure of one tile. Never aborts the surrounding export.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("tile {coord} failed: {cause}")]
pub struct TileFetchError {
    pub coord: TileCoord,
    pub cause: FetchFailure,
}

/// Fetches and decodes individual tiles from a source.
///
/// Cheap to clone; clones share the source and statistics.
pub struct TileFetcher<S: TileSource> {
    source: Arc<S>,
    config: FetchConfig,
    stats: Arc<NetworkStats>,
}

impl<S: TileSource> Clone for TileFetcher<S> {
    fn clone(&self) -> Self {
        Self {
            source: Arc::clone(&self.source),
            config: self.config,
            stats: Arc::clone(&self.stats),
        }
    }
}

impl<S: TileSource> TileFetcher<S> {
    pub fn new(source: Arc<S>, config: FetchConfig) -> Self {
        Self {
            source,
            config,
            stats: Arc::new(NetworkStats::new()),
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn config(&self) -> &FetchConfig {
        &self.config
    }

    /// Edge length every returned [`TileImage`] has.
    pub fn tile_size(&self) -> u32 {
        self.source.tile_size()
    }

    pub fn stats(&self) -> &NetworkStats {
        &self.stats
    }

    /// Replaces the statistics sink, typically with a fresh one per job.
    pub fn with_stats(mut self, stats: Arc<NetworkStats>) -> Self {
        self.stats = stats;
        self
    }

    /// Fetches one tile.
    ///
    /// Each attempt runs under the configured deadline. Provider errors and
    /// timeouts are retried up to `max_retries` times with a fixed backoff;
    /// undecodable bodies are not retried. Tiles whose pixel size differs
    /// from the source's tile size are resized.
    ///
    /// # Arguments
    ///
    /// * `coord` - Tile to fetch
    /// * `style` - Base map style
    pub async fn fetch_tile(
        &self,
        coord: TileCoord,
        style: MapStyle,
    ) -> Result<TileImage, TileFetchError> {
        let attempts = self.config.max_retries() + 1;
        let timeout = self.config.timeout();
        let mut last_failure = FetchFailure::Timeout(timeout);

        for attempt in 1..=attempts {
            trace!(tile = %coord, attempt, source = self.source.name(), "Tile fetch attempt");

            match tokio::time::timeout(timeout, self.source.fetch_tile(&coord, style)).await {
                Ok(Ok(bytes)) => {
                    let size = bytes.len();
                    return match decode_tile(&bytes, self.tile_size()) {
                        Ok(image) => {
                            debug!(tile = %coord, bytes = size, attempt, "Tile fetched");
                            self.stats.record_tile_success(size);
                            Ok(TileImage { coord, image })
                        }
                        Err(reason) => {
                            self.stats.record_tile_failure();
                            Err(TileFetchError {
                                coord,
                                cause: FetchFailure::Decode(reason),
                            })
                        }
                    };
                }
                Ok(Err(e)) => {
                    warn!(tile = %coord, attempt, error = %e, "Tile fetch error");
                    let retryable = !matches!(e, ProviderError::UnsupportedZoom(_));
                    last_failure = FetchFailure::Provider(e);
                    if !retryable {
                        break;
                    }
                }
                Err(_) => {
                    warn!(
                        tile = %coord,
                        attempt,
                        timeout_secs = timeout.as_secs(),
                        "Tile fetch timeout"
                    );
                    last_failure = FetchFailure::Timeout(timeout);
                }
            }

            if attempt < attempts {
                self.stats.record_retry();
                tokio::time::sleep(self.config.retry_backoff()).await;
            }
        }

        self.stats.record_tile_failure();
        Err(TileFetchError {
            coord,
            cause: last_failure,
        })
    }
}

/// Decodes PNG or JPEG bytes to RGBA, resizing to `tile_size` if needed.
pub fn decode_tile(bytes: &[u8], tile_size: u32) -> Result<RgbaImage, String> {
    let image = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| format!("format detection failed: {}", e))?
        .decode()
        .map_err(|e| e.to_string())?
        .to_rgba8();

    if image.width() == tile_size && image.height() == tile_size {
        Ok(image)
    } else {
        Ok(imageops::resize(
            &image,
            tile_size,
            tile_size,
            imageops::FilterType::Triangle,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, Rgba};
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn png_bytes(size: u32, color: [u8; 4]) -> Vec<u8> {
        let img = RgbaImage::from_pixel(size, size, Rgba(color));
        let mut out = Cursor::new(Vec::new());
        img.write_to(&mut out, ImageFormat::Png).unwrap();
        out.into_inner()
    }

    /// Source that fails a fixed number of times before succeeding.
    struct FlakySource {
        failures_left: AtomicUsize,
        calls: AtomicUsize,
        body: Vec<u8>,
        delay: Option<Duration>,
    }

    impl FlakySource {
        fn new(failures: usize, body: Vec<u8>) -> Self {
            Self {
                failures_left: AtomicUsize::new(failures),
                calls: AtomicUsize::new(0),
                body,
                delay: None,
            }
        }
    }

    impl TileSource for FlakySource {
        async fn fetch_tile(
            &self,
            _tile: &TileCoord,
            _style: MapStyle,
        ) -> Result<Vec<u8>, ProviderError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if let Some(delay) = self.delay {
                tokio::time::sleep(delay).await;
            }
            let left = self.failures_left.load(Ordering::SeqCst);
            if left > 0 {
                self.failures_left.store(left - 1, Ordering::SeqCst);
                return Err(ProviderError::HttpError("HTTP 503".into()));
            }
            Ok(self.body.clone())
        }

        fn name(&self) -> &str {
            "flaky"
        }

        fn tile_size(&self) -> u32 {
            8
        }

        fn min_zoom(&self) -> u8 {
            0
        }

        fn max_zoom(&self) -> u8 {
            22
        }
    }

    fn fetcher(source: FlakySource, config: FetchConfig) -> TileFetcher<FlakySource> {
        TileFetcher::new(Arc::new(source), config.with_retry_backoff_ms(1))
    }

    #[tokio::test]
    async fn test_fetch_and_decode() {
        let f = fetcher(FlakySource::new(0, png_bytes(8, [1, 2, 3, 255])), FetchConfig::new());
        let tile = f.fetch_tile(TileCoord::new(3, 4, 5), MapStyle::Road).await.unwrap();

        assert_eq!(tile.coord, TileCoord::new(3, 4, 5));
        assert_eq!(tile.image.dimensions(), (8, 8));
        assert_eq!(*tile.image.get_pixel(0, 0), Rgba([1, 2, 3, 255]));
        assert_eq!(f.stats().snapshot().tiles_fetched, 1);
    }

    #[tokio::test]
    async fn test_resizes_mismatched_tiles() {
        let f = fetcher(FlakySource::new(0, png_bytes(16, [9, 9, 9, 255])), FetchConfig::new());
        let tile = f.fetch_tile(TileCoord::new(0, 0, 1), MapStyle::Road).await.unwrap();
        assert_eq!(tile.image.dimensions(), (8, 8));
    }

    #[tokio::test]
    async fn test_no_retry_by_default() {
        let f = fetcher(FlakySource::new(1, png_bytes(8, [0; 4])), FetchConfig::new());
        let err = f
            .fetch_tile(TileCoord::new(0, 0, 1), MapStyle::Road)
            .await
            .unwrap_err();

        assert!(matches!(err.cause, FetchFailure::Provider(_)));
        assert_eq!(f.source().calls.load(Ordering::SeqCst), 1);
        assert_eq!(f.stats().snapshot().tiles_failed, 1);
    }

    #[tokio::test]
    async fn test_retry_recovers() {
        let f = fetcher(
            FlakySource::new(2, png_bytes(8, [0; 4])),
            FetchConfig::new().with_max_retries(2),
        );
        assert!(f.fetch_tile(TileCoord::new(0, 0, 1), MapStyle::Road).await.is_ok());

        let snapshot = f.stats().snapshot();
        assert_eq!(snapshot.retries, 2);
        assert_eq!(snapshot.tiles_fetched, 1);
        assert_eq!(f.source().calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_decode_failure() {
        let f = fetcher(FlakySource::new(0, b"not an image".to_vec()), FetchConfig::new());
        let err = f
            .fetch_tile(TileCoord::new(0, 0, 1), MapStyle::Road)
            .await
            .unwrap_err();
        assert!(matches!(err.cause, FetchFailure::Decode(_)));
        assert_eq!(err.coord, TileCoord::new(0, 0, 1));
    }

    #[tokio::test(start_paused = true)]
    async fn test_timeout_is_per_tile_failure() {
        let mut source = FlakySource::new(0, png_bytes(8, [0; 4]));
        source.delay = Some(Duration::from_secs(60));
        let f = fetcher(source, FetchConfig::new().with_timeout_secs(1));

        let err = f
            .fetch_tile(TileCoord::new(0, 0, 1), MapStyle::Road)
            .await
            .unwrap_err();
        assert_eq!(err.cause, FetchFailure::Timeout(Duration::from_secs(1)));
    }

    #[test]
    fn test_error_display() {
        let err = TileFetchError {
            coord: TileCoord::new(1, 2, 3),
            cause: FetchFailure::Timeout(Duration::from_secs(10)),
        };
        assert_eq!(err.to_string(), "tile 3/1/2 failed: timed out after 10s");
    }
}
