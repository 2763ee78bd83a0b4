//! HTTP export endpoints.
//!
//! Request and response payloads plus the endpoint logic behind
//! `POST /api/export`, `POST /api/export-hires` and `GET /api/maps-config`.
//! Handlers return an [`ApiReply`]; the server binary only maps it onto its
//! framework's response type.

mod handlers;
mod types;

pub use handlers::{
    export_error, hires_export, maps_config, method_not_allowed, parse_body, static_export,
    ApiBody, ApiReply,
};
pub use types::{
    BoundsPayload, ErrorBody, HiresExportRequest, MapsConfigResponse, StaticExportRequest,
    DEFAULT_HIRES_ZOOM, MAX_HIRES_ZOOM,
};
