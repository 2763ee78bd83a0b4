//! JSON payloads of the export endpoints.

use crate::geometry::{BoundingBox, GeoPoint, GeometryError};
use crate::provider::MapStyle;
use serde::{Deserialize, Serialize};

/// Zoom used by the hi-res endpoint when the request has none.
pub const DEFAULT_HIRES_ZOOM: u8 = 18;

/// Highest zoom the hi-res endpoint will render.
pub const MAX_HIRES_ZOOM: u8 = 20;

/// Body of `POST /api/export`.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StaticExportRequest {
    /// `[lng, lat]`
    pub center: [f64; 2],
    pub zoom: u8,
    #[serde(default)]
    pub map_type: String,
}

impl StaticExportRequest {
    pub fn center_point(&self) -> GeoPoint {
        GeoPoint::from(self.center)
    }

    pub fn style(&self) -> MapStyle {
        MapStyle::from_map_type(&self.map_type)
    }
}

/// Geographic bounds as sent by the browser.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct BoundsPayload {
    pub north: f64,
    pub south: f64,
    pub east: f64,
    pub west: f64,
}

impl TryFrom<BoundsPayload> for BoundingBox {
    type Error = GeometryError;

    fn try_from(b: BoundsPayload) -> Result<Self, Self::Error> {
        BoundingBox::new(b.north, b.south, b.east, b.west)
    }
}

/// Body of `POST /api/export-hires`.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HiresExportRequest {
    pub bounds: BoundsPayload,
    #[serde(default)]
    pub max_zoom: Option<u8>,
    #[serde(default)]
    pub map_type: String,
}

impl HiresExportRequest {
    /// `min(maxZoom or 18, 20)`
    pub fn zoom(&self) -> u8 {
        self.max_zoom.unwrap_or(DEFAULT_HIRES_ZOOM).min(MAX_HIRES_ZOOM)
    }

    pub fn style(&self) -> MapStyle {
        MapStyle::from_map_type(&self.map_type)
    }
}

/// JSON error body.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ErrorBody {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }
}

/// Body of `GET /api/maps-config`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MapsConfigResponse {
    pub subscription_key: String,
}
