//! Export error taxonomy.

use crate::config::ConfigFileError;
use crate::coord::CoordError;
use crate::geometry::GeometryError;
use crate::mosaic::MosaicError;
use crate::planner::PlannerError;
use crate::provider::ProviderError;
use thiserror::Error;

/// Errors that end an export job.
///
/// Per-tile failures are not represented here; they leave a transparent
/// gap in the mosaic and the job continues.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ExportError {
    /// Missing credential or unusable provider settings
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// No polygon or rectangle has been drawn
    #[error("No shape selected: draw a polygon or rectangle first")]
    NoShapeSelected,

    /// The tile grid exceeds the budget
    #[error("Area too large: would require {count} tiles (limit {max}). Try a smaller area")]
    TooManyTiles { count: usize, max: usize },

    /// The shape cannot be exported as drawn
    #[error("Invalid shape: {0}")]
    InvalidShape(String),

    /// The shape projects to zero pixels at the chosen zoom
    #[error("Selected region is empty at zoom {zoom}")]
    EmptyRegion { zoom: u8 },

    /// Upstream map service failure
    #[error("Map service request failed: {0}")]
    Network(String),

    /// Cancelled by the user
    #[error("Export cancelled")]
    Cancelled,

    /// Another export is running on this orchestrator
    #[error("An export is already in progress")]
    ExportInProgress,

    /// Writing or encoding the result failed
    #[error("Delivery failed: {0}")]
    Delivery(String),

    /// The pipeline itself misbehaved: a worker task died or the job
    /// lifecycle was driven out of order
    #[error("Internal export error: {0}")]
    Internal(String),
}

impl ExportError {
    /// True for errors raised before any tile is fetched because the request
    /// itself is unacceptable.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            ExportError::NoShapeSelected
                | ExportError::TooManyTiles { .. }
                | ExportError::InvalidShape(_)
                | ExportError::EmptyRegion { .. }
        )
    }
}

impl From<CoordError> for ExportError {
    fn from(e: CoordError) -> Self {
        ExportError::InvalidShape(e.to_string())
    }
}

impl From<GeometryError> for ExportError {
    fn from(e: GeometryError) -> Self {
        ExportError::InvalidShape(e.to_string())
    }
}

impl From<PlannerError> for ExportError {
    fn from(e: PlannerError) -> Self {
        match e {
            PlannerError::TooManyTiles { count, max } => ExportError::TooManyTiles { count, max },
            other => ExportError::InvalidShape(other.to_string()),
        }
    }
}

impl From<ProviderError> for ExportError {
    fn from(e: ProviderError) -> Self {
        match e {
            ProviderError::Configuration(msg) => ExportError::Configuration(msg),
            other => ExportError::Network(other.to_string()),
        }
    }
}

impl From<ConfigFileError> for ExportError {
    fn from(e: ConfigFileError) -> Self {
        ExportError::Configuration(e.to_string())
    }
}

impl From<MosaicError> for ExportError {
    fn from(e: MosaicError) -> Self {
        match e {
            MosaicError::Encode(msg) => ExportError::Delivery(msg),
            other => ExportError::InvalidShape(other.to_string()),
        }
    }
}

impl From<std::io::Error> for ExportError {
    fn from(e: std::io::Error) -> Self {
        ExportError::Delivery(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_planner_budget_maps_to_too_many_tiles() {
        let err: ExportError = PlannerError::TooManyTiles { count: 552, max: 50 }.into();
        assert_eq!(err, ExportError::TooManyTiles { count: 552, max: 50 });
        assert!(err.is_validation());
        assert!(err.to_string().contains("552 tiles"));
    }

    #[test]
    fn test_provider_errors_are_network() {
        let err: ExportError = ProviderError::HttpError("HTTP 500".into()).into();
        assert!(matches!(err, ExportError::Network(_)));
        assert!(!err.is_validation());

        let err: ExportError = ProviderError::Configuration("no key".into()).into();
        assert_eq!(err, ExportError::Configuration("no key".into()));
    }

    #[test]
    fn test_coord_errors_are_invalid_shape() {
        let err: ExportError = CoordError::InvalidLatitude(89.9).into();
        assert!(matches!(err, ExportError::InvalidShape(_)));
    }
}
