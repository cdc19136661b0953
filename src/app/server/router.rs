use crate::app::state::AppState;
use axum::{
    http::{HeaderName, HeaderValue, Method},
    response::IntoResponse,
    routing::{get, post},
    Router,
};
use std::{str::FromStr, sync::Arc, time::Duration};
use tower_http::{
    classify::ServerErrorsFailureClass,
    cors::{AllowCredentials, CorsLayer},
    trace::TraceLayer,
};
use tracing::Span;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub(super) mod block;

#[derive(Debug, Clone)]
pub struct HttpConfiguration {
    pub cors_origins: Arc<[String]>,
    pub cors_headers: Arc<[String]>,
}

pub fn router(state: AppState, config: HttpConfiguration) -> Router {
    let origins = config
        .cors_origins
        .iter()
        .map(|origin| {
            tracing::info!("CORS - Adding {origin} to allowed origins");
            HeaderValue::from_str(origin)
        })
        .map(Result::unwrap);

    let headers = config
        .cors_headers
        .iter()
        .map(|header| {
            tracing::info!("CORS - Adding {header} to allowed headers");
            HeaderName::from_str(header)
        })
        .map(Result::unwrap);

    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::AllowOrigin::list(origins))
        .allow_headers(tower_http::cors::AllowHeaders::list(headers))
        .allow_credentials(AllowCredentials::yes())
        .allow_methods([Method::GET, Method::POST]);

    Router::new()
        .route("/blocks", get(block::list_blocks))
        .route(
            "/blocks/google-drive-images/execute",
            post(block::execute_drive_images),
        )
        .with_state(state)
        .layer(
            TraceLayer::new_for_http()
                .on_request(|req: &axum::http::Request<_>, _span: &Span| {
                    let ctype = req
                        .headers()
                        .get("content-type")
                        .map(|v| v.to_str().unwrap_or("none"))
                        .unwrap_or_else(|| "none");

                    tracing::info!("Processing request | content-type: {ctype}");
                })
                .on_response(
                    |res: &axum::http::Response<_>, latency: Duration, _span: &Span| {
                        let status = res.status();

                        tracing::info!("Sending response | {status} | {}ms", latency.as_millis());
                    },
                )
                .on_failure(
                    |error: ServerErrorsFailureClass, _latency: Duration, _span: &Span| {
                        tracing::error!("Error in request: {error}")
                    },
                ),
        )
        .layer(cors)
        .merge(
            SwaggerUi::new("/swagger-ui")
                .url("/api-docs/openapi.json", block::BlockApiDoc::openapi()),
        )
        // Goes last to keep it out of the tracing and cors layers.
        .route("/_health", get(health_check))
}

async fn health_check() -> impl IntoResponse {
    axum::http::StatusCode::OK
}
