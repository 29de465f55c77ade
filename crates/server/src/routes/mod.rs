pub mod health;
pub mod news;

use axum::{extract::DefaultBodyLimit, routing::get, Json, Router};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use utoipa::OpenApi;

use crate::openapi::ApiDoc;
use crate::state::ServerState;

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Build the application router: health, OpenAPI document and the news resource.
pub fn build_router(state: ServerState, cors: CorsLayer, body_limit: usize) -> Router {
    let api = Router::new()
        .route("/news", get(news::list).post(news::create))
        .route(
            "/news/:id",
            get(news::get).put(news::update).patch(news::patch).delete(news::delete),
        )
        .layer(DefaultBodyLimit::max(body_limit));

    Router::new()
        .route("/health", get(health::health))
        .route("/api-docs/openapi.json", get(openapi_json))
        .merge(api)
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                // 5xx responses are logged at ERROR
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
