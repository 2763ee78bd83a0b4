//! Endpoint logic, independent of the HTTP framework serving it.

use super::types::{ErrorBody, HiresExportRequest, MapsConfigResponse, StaticExportRequest};
use crate::coord::to_tile_coords;
use crate::export::{
    ExportError, ExportOrchestrator, HttpImageResponse, NoProgress, ZoomStrategy,
};
use crate::geometry::BoundingBox;
use crate::provider::{AsyncHttpClient, AzureStaticMap, TileSource};
use serde::de::DeserializeOwned;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

/// Response payload.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiBody {
    Image(HttpImageResponse),
    Error(ErrorBody),
    MapsConfig(MapsConfigResponse),
}

/// Status code plus payload, ready for the server to write out.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiReply {
    pub status: u16,
    pub body: ApiBody,
}

impl ApiReply {
    pub fn image(png: Vec<u8>) -> Self {
        Self {
            status: 200,
            body: ApiBody::Image(HttpImageResponse::png(png)),
        }
    }

    pub fn error(status: u16, body: ErrorBody) -> Self {
        Self {
            status,
            body: ApiBody::Error(body),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Any method other than the one an endpoint accepts.
pub fn method_not_allowed() -> ApiReply {
    ApiReply::error(405, ErrorBody::new("Method not allowed"))
}

fn api_key_missing() -> ApiReply {
    ApiReply::error(500, ErrorBody::new("API key missing"))
}

/// Parses a JSON request body, answering 400 when it does not fit `T`.
pub fn parse_body<T: DeserializeOwned>(body: &[u8]) -> Result<T, ApiReply> {
    serde_json::from_slice(body).map_err(|e| {
        ApiReply::error(400, ErrorBody::new("Invalid request").with_details(e.to_string()))
    })
}

/// `GET /api/maps-config`
pub fn maps_config(subscription_key: Option<String>) -> ApiReply {
    match subscription_key {
        Some(subscription_key) => ApiReply {
            status: 200,
            body: ApiBody::MapsConfig(MapsConfigResponse { subscription_key }),
        },
        None => api_key_missing(),
    }
}

/// `POST /api/export`: one static render centred on a point.
///
/// `renderer` is `None` when no subscription key is configured.
pub async fn static_export<C: AsyncHttpClient>(
    renderer: Option<&AzureStaticMap<C>>,
    request: &StaticExportRequest,
) -> ApiReply {
    let Some(renderer) = renderer else {
        return api_key_missing();
    };

    let center = request.center_point();
    if let Err(e) = to_tile_coords(center.lat, center.lon, request.zoom) {
        return ApiReply::error(400, ErrorBody::new("Invalid request").with_details(e.to_string()));
    }

    match renderer.render(center, request.zoom, request.style()).await {
        Ok(png) => {
            info!(zoom = request.zoom, bytes = png.len(), "Static export rendered");
            ApiReply::image(png)
        }
        Err(e) => {
            warn!(error = %e, "Static export failed");
            ApiReply::error(500, ErrorBody::new("Export failed").with_details(e.to_string()))
        }
    }
}

/// `POST /api/export-hires`: full mosaic export of a bounding box.
pub async fn hires_export<S: TileSource + 'static>(
    orchestrator: &ExportOrchestrator<S>,
    request: &HiresExportRequest,
    cancel: CancellationToken,
) -> ApiReply {
    let bbox = match BoundingBox::try_from(request.bounds) {
        Ok(bbox) => bbox,
        Err(e) => return export_error(ExportError::from(e)),
    };

    match orchestrator
        .export_bounds(
            bbox,
            request.style(),
            ZoomStrategy::Fixed(request.zoom()),
            &NoProgress,
            cancel,
        )
        .await
    {
        Ok(outcome) => ApiReply::image(outcome.png),
        Err(e) => export_error(e),
    }
}

/// Validation errors answer 400, everything else 500.
pub fn export_error(error: ExportError) -> ApiReply {
    if error.is_validation() {
        ApiReply::error(400, ErrorBody::new(error.to_string()).with_details(validation_kind(&error)))
    } else {
        ApiReply::error(500, ErrorBody::new("Export failed").with_details(error.to_string()))
    }
}

fn validation_kind(error: &ExportError) -> &'static str {
    match error {
        ExportError::TooManyTiles { .. } => "too_many_tiles",
        ExportError::NoShapeSelected => "no_shape_selected",
        ExportError::EmptyRegion { .. } => "empty_region",
        _ => "invalid_shape",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FetchConfig;
    use crate::coord::TileCoord;
    use crate::provider::{MapStyle, MockAsyncHttpClient, ProviderError};
    use image::{ImageFormat, Rgba, RgbaImage};
    use std::io::Cursor;
    use std::sync::Arc;

    struct BlueSource(Vec<u8>);

    impl BlueSource {
        fn new() -> Self {
            let mut out = Cursor::new(Vec::new());
            RgbaImage::from_pixel(256, 256, Rgba([0, 0, 255, 255]))
                .write_to(&mut out, ImageFormat::Png)
                .unwrap();
            Self(out.into_inner())
        }
    }

    impl TileSource for BlueSource {
        async fn fetch_tile(&self, _: &TileCoord, _: MapStyle) -> Result<Vec<u8>, ProviderError> {
            Ok(self.0.clone())
        }
        fn name(&self) -> &str {
            "blue"
        }
        fn tile_size(&self) -> u32 {
            256
        }
        fn min_zoom(&self) -> u8 {
            0
        }
        fn max_zoom(&self) -> u8 {
            22
        }
    }

    fn static_request() -> StaticExportRequest {
        StaticExportRequest {
            center: [77.6, 13.0],
            zoom: 15,
            map_type: "road".into(),
        }
    }

    fn hires_request(north: f64, south: f64, east: f64, west: f64, max_zoom: u8) -> HiresExportRequest {
        HiresExportRequest {
            bounds: super::super::types::BoundsPayload { north, south, east, west },
            max_zoom: Some(max_zoom),
            map_type: "satellite".into(),
        }
    }

    #[test]
    fn test_maps_config() {
        let ok = maps_config(Some("key".into()));
        assert_eq!(ok.status, 200);
        assert_eq!(
            ok.body,
            ApiBody::MapsConfig(MapsConfigResponse { subscription_key: "key".into() })
        );

        let missing = maps_config(None);
        assert_eq!(missing.status, 500);
        assert_eq!(missing.body, ApiBody::Error(ErrorBody::new("API key missing")));
    }

    #[test]
    fn test_method_not_allowed() {
        let reply = method_not_allowed();
        assert_eq!(reply.status, 405);
        assert_eq!(reply.body, ApiBody::Error(ErrorBody::new("Method not allowed")));
    }

    #[test]
    fn test_parse_body_rejects_garbage() {
        let result: Result<StaticExportRequest, _> = parse_body(b"{not json");
        assert_eq!(result.unwrap_err().status, 400);
    }

    #[tokio::test]
    async fn test_static_export_success() {
        let client = MockAsyncHttpClient::new(Ok(vec![0x89, 0x50]));
        let renderer = AzureStaticMap::new(client.clone(), "KEY");

        let reply = static_export(Some(&renderer), &static_request()).await;
        assert!(reply.is_success());
        match reply.body {
            ApiBody::Image(image) => {
                assert_eq!(image.body, vec![0x89, 0x50]);
                assert_eq!(image.content_type, "image/png");
                assert_eq!(image.cache_control, "public, max-age=3600");
            }
            other => panic!("expected image, got {:?}", other),
        }
        assert!(client.last_url().unwrap().contains("center=77.6,13"));
    }

    #[tokio::test]
    async fn test_static_export_upstream_failure() {
        let client = MockAsyncHttpClient::new(Err(ProviderError::HttpError("HTTP 403".into())));
        let renderer = AzureStaticMap::new(client, "KEY");

        let reply = static_export(Some(&renderer), &static_request()).await;
        assert_eq!(reply.status, 500);
        assert_eq!(
            reply.body,
            ApiBody::Error(ErrorBody::new("Export failed").with_details("HTTP error: HTTP 403"))
        );
    }

    #[tokio::test]
    async fn test_static_export_without_key() {
        let reply = static_export::<MockAsyncHttpClient>(None, &static_request()).await;
        assert_eq!(reply.status, 500);
    }

    #[tokio::test]
    async fn test_static_export_rejects_pole() {
        let client = MockAsyncHttpClient::new(Ok(vec![]));
        let renderer = AzureStaticMap::new(client, "KEY");
        let mut request = static_request();
        request.center = [0.0, 90.0];

        let reply = static_export(Some(&renderer), &request).await;
        assert_eq!(reply.status, 400);
    }

    #[tokio::test]
    async fn test_hires_export_success() {
        let orchestrator = ExportOrchestrator::new(Arc::new(BlueSource::new()), FetchConfig::default());
        let reply = hires_export(
            &orchestrator,
            &hires_request(13.01, 13.00, 77.61, 77.60, 16),
            CancellationToken::new(),
        )
        .await;

        assert!(reply.is_success());
        let ApiBody::Image(image) = reply.body else {
            panic!("expected image");
        };
        let decoded = image::load_from_memory(&image.body).unwrap().to_rgba8();
        assert_eq!(*decoded.get_pixel(0, 0), Rgba([0, 0, 255, 255]));
    }

    #[tokio::test]
    async fn test_hires_export_over_budget_is_bad_request() {
        let orchestrator = ExportOrchestrator::new(Arc::new(BlueSource::new()), FetchConfig::default());
        let reply = hires_export(
            &orchestrator,
            &hires_request(13.01, 13.00, 77.61, 77.60, 20),
            CancellationToken::new(),
        )
        .await;

        assert_eq!(reply.status, 400);
        let ApiBody::Error(body) = reply.body else {
            panic!("expected error body");
        };
        assert!(body.error.starts_with("Area too large"));
        assert_eq!(body.details.as_deref(), Some("too_many_tiles"));
    }

    #[tokio::test]
    async fn test_hires_export_inverted_bounds() {
        let orchestrator = ExportOrchestrator::new(Arc::new(BlueSource::new()), FetchConfig::default());
        let reply = hires_export(
            &orchestrator,
            &hires_request(13.00, 13.01, 77.61, 77.60, 16),
            CancellationToken::new(),
        )
        .await;
        assert_eq!(reply.status, 400);
    }

    #[test]
    fn test_non_validation_errors_are_server_errors() {
        let reply = export_error(ExportError::Network("HTTP 502".into()));
        assert_eq!(reply.status, 500);
        assert_eq!(
            reply.body,
            ApiBody::Error(
                ErrorBody::new("Export failed")
                    .with_details("Map service request failed: HTTP 502")
            )
        );
    }
}
