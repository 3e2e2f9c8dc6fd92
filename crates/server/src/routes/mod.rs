use std::path::Path;

use axum::{
    extract::Request,
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use tower_http::{
    cors::CorsLayer,
    services::{ServeDir, ServeFile},
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use common::types::Health;

use crate::observability;
use crate::openapi::ApiDoc;
use crate::state::ServerState;

pub mod auth;
pub mod dashboard;
pub mod services;

#[utoipa::path(get, path = "/health", tag = "health", responses((status = 200, description = "OK", body = crate::openapi::HealthResponse)))]
pub async fn health() -> Json<Health> {
    Json(Health::ok())
}

pub async fn metrics() -> impl IntoResponse {
    observability::encode_metrics()
}

async fn track_requests(req: Request, next: Next) -> Response {
    let method = req.method().clone();
    let resp = next.run(req).await;
    observability::record_request(method.as_str(), resp.status().as_u16());
    resp
}

/// Build the full application router: public routes, session-gated API,
/// Swagger UI, and the static frontend as fallback.
pub fn build_router(state: ServerState, cors: CorsLayer, frontend_dir: &str) -> Router {
    let index = Path::new(frontend_dir).join("index.html");
    let static_dir = ServeDir::new(frontend_dir).fallback(ServeFile::new(index));

    // Public routes
    let public = Router::new()
        .route("/health", get(health))
        .route("/metrics", get(metrics))
        .route("/auth/login", post(auth::login))
        .route("/auth/logout", post(auth::logout));

    // Session-gated routes
    let protected = Router::new()
        .route("/auth/me", get(auth::me))
        .route("/api/dashboard", get(dashboard::summary))
        .route("/api/services", get(services::list).post(services::create))
        .route(
            "/api/services/:id",
            get(services::get).put(services::update).delete(services::delete),
        )
        .route_layer(middleware::from_fn_with_state(state.clone(), auth::require_session));

    public
        .merge(protected)
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .fallback_service(static_dir)
        .with_state(state)
        .layer(middleware::from_fn(track_requests))
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
