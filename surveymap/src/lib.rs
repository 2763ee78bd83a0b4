//! SurveyMap - Tile-mosaic map export for land-survey shapes
//!
//! Turns a polygon or rectangle drawn on a web map into a single PNG whose
//! edges line up with the shape's geographic bounds, by fetching the covering
//! Web Mercator tiles, stitching them and cropping the result. Also provides
//! the survey measurements shown next to drawn shapes.
//!
//! # High-Level API
//!
//! ```ignore
//! use surveymap::config::ConfigFile;
//! use surveymap::export::{ExportOrchestrator, FileDelivery, NoProgress, OrchestratorContext, ZoomStrategy};
//! use surveymap::provider::AsyncReqwestClient;
//!
//! let config = ConfigFile::load()?;
//! let source = config.provider_config()?.build(AsyncReqwestClient::new()?)?;
//! let orchestrator = ExportOrchestrator::new(Arc::new(source), config.fetch_config());
//!
//! let outcome = orchestrator
//!     .export(&ctx, ZoomStrategy::Extent, &NoProgress, CancellationToken::new())
//!     .await?;
//! FileDelivery::new(&config.export.output_dir).deliver(&outcome.png).await?;
//! ```

pub mod api;
pub mod config;
pub mod coord;
pub mod export;
pub mod fetcher;
pub mod geometry;
pub mod logging;
pub mod mosaic;
pub mod planner;
pub mod provider;

/// Version of the SurveyMap library and CLI.
///
/// Defined in the workspace `Cargo.toml` and injected at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_coord_module_exists() {
        use crate::coord::to_tile_coords;
        let result = to_tile_coords(13.0, 77.6, 16);
        assert!(result.is_ok());
    }
}
