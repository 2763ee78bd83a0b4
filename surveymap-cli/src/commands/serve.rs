//! Serve command - HTTP endpoints for the browser map panel.
//!
//! - `POST /api/export` renders a static map centred on a point
//! - `POST /api/export-hires` runs a full mosaic export of a bounding box
//! - `GET /api/maps-config` hands out the subscription key
//!
//! Other methods on these paths answer 405.

use actix_web::{
    http::{header, StatusCode},
    web::{self, Bytes},
    App, HttpResponse, HttpServer,
};
use surveymap::api::{self, ApiBody, ApiReply, HiresExportRequest, StaticExportRequest};
use surveymap::export::ExportOrchestrator;
use surveymap::provider::{AsyncHttpClient, AsyncReqwestClient, AzureStaticMap, TileSource};
use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::error::CliError;
use crate::runner::{CliRunner, CliTileSource};

/// Shared state backing HTTP handlers.
pub struct ServerState<S: TileSource + 'static, C: AsyncHttpClient + 'static> {
    pub orchestrator: ExportOrchestrator<S>,
    pub renderer: Option<AzureStaticMap<C>>,
    pub subscription_key: Option<String>,
}

/// Registers the API routes.
pub fn routes<S, C>(cfg: &mut web::ServiceConfig)
where
    S: TileSource + 'static,
    C: AsyncHttpClient + 'static,
{
    cfg.service(
        web::resource("/api/export")
            .route(web::post().to(static_export_handler::<S, C>))
            .default_service(web::to(method_not_allowed_handler)),
    )
    .service(
        web::resource("/api/export-hires")
            .route(web::post().to(hires_export_handler::<S, C>))
            .default_service(web::to(method_not_allowed_handler)),
    )
    .service(
        web::resource("/api/maps-config")
            .route(web::get().to(maps_config_handler::<S, C>))
            .default_service(web::to(method_not_allowed_handler)),
    );
}

/// Writes an [`ApiReply`] as an actix response.
pub fn to_response(reply: ApiReply) -> HttpResponse {
    let status = StatusCode::from_u16(reply.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    let mut builder = HttpResponse::build(status);
    builder.insert_header((header::ACCESS_CONTROL_ALLOW_ORIGIN, "*"));

    match reply.body {
        ApiBody::Image(image) => builder
            .content_type(image.content_type)
            .insert_header((header::CACHE_CONTROL, image.cache_control))
            .body(image.body),
        ApiBody::Error(body) => builder.json(body),
        ApiBody::MapsConfig(body) => builder.json(body),
    }
}

async fn method_not_allowed_handler() -> HttpResponse {
    to_response(api::method_not_allowed())
}

async fn static_export_handler<S, C>(state: web::Data<ServerState<S, C>>, body: Bytes) -> HttpResponse
where
    S: TileSource + 'static,
    C: AsyncHttpClient + 'static,
{
    let request: StaticExportRequest = match api::parse_body(&body) {
        Ok(request) => request,
        Err(reply) => return to_response(reply),
    };
    to_response(api::static_export(state.renderer.as_ref(), &request).await)
}

async fn hires_export_handler<S, C>(state: web::Data<ServerState<S, C>>, body: Bytes) -> HttpResponse
where
    S: TileSource + 'static,
    C: AsyncHttpClient + 'static,
{
    let request: HiresExportRequest = match api::parse_body(&body) {
        Ok(request) => request,
        Err(reply) => return to_response(reply),
    };
    to_response(api::hires_export(&state.orchestrator, &request, CancellationToken::new()).await)
}

async fn maps_config_handler<S, C>(state: web::Data<ServerState<S, C>>) -> HttpResponse
where
    S: TileSource + 'static,
    C: AsyncHttpClient + 'static,
{
    to_response(api::maps_config(state.subscription_key.clone()))
}

/// Run the serve command.
pub fn run(runner: CliRunner, bind: Option<String>) -> Result<(), CliError> {
    runner.log_startup("serve");
    let config = runner.config();
    let bind = bind.unwrap_or_else(|| config.server.bind.clone());

    let state = web::Data::new(ServerState {
        orchestrator: runner.orchestrator()?,
        renderer: runner.static_renderer()?,
        subscription_key: config.subscription_key(),
    });

    println!("Serving SurveyMap API on http://{}", bind);
    info!(bind = %bind, "HTTP server starting");

    actix_web::rt::System::new()
        .block_on(async move {
            HttpServer::new(move || {
                App::new()
                    .app_data(state.clone())
                    .configure(routes::<CliTileSource, AsyncReqwestClient>)
            })
            .bind(bind.as_str())?
            .run()
            .await
        })
        .map_err(CliError::Serve)
}
