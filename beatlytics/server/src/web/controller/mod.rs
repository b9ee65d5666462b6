// FIXME: remove this after this utoipa issue is fixed: https://github.com/juhaku/utoipa/pull/1423
#![allow(clippy::needless_for_each)]
mod genre;
mod health;

use axum::{
    http::{header, StatusCode},
    response::IntoResponse,
    routing, Extension, Json, Router,
};
use beatlytics_core::{ServerInfo, LIVENESS_MESSAGE};
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;

use crate::{entity, ServiceState};

/// Read API consumed by the dashboard.
pub fn api_router(service_state: &ServiceState) -> Router {
    let routes = Router::new()
        .route("/genres", routing::get(genre::list_genres))
        .route("/health", routing::get(health::health))
        .route("/v1/info", routing::get(server_info));

    Router::new()
        .nest("/api", routes)
        .layer(CorsLayer::permissive())
        .with_state(service_state.clone())
}

// SAFETY: `axum` handler must be async
#[allow(clippy::unused_async)]
pub async fn liveness() -> impl IntoResponse {
    (StatusCode::OK, [(header::CONTENT_TYPE, mime::TEXT_PLAIN_UTF_8.to_string())], LIVENESS_MESSAGE)
}

/// Get server info
#[utoipa::path(
    get,
    operation_id = "get_server_info",
    path = "/api/v1/info",
    responses(
        (status = 200, body = ServerInfo)
    )
)]
pub async fn server_info(Extension(server_info): Extension<ServerInfo>) -> Json<ServerInfo> {
    Json(server_info)
}

#[derive(OpenApi)]
#[openapi(
    paths(
        server_info,
        genre::list_genres,
        health::health,
    ),
    components(schemas(
        ServerInfo,
        entity::GenrePlays,
        entity::HealthStatus,
        entity::ServiceStatus,
        entity::ErrorResponse,
        entity::ErrorType,
    )),
    tags(
        (name = "Genres", description = "Genre play counts"),
        (name = "Health", description = "Service health")
    )
)]
pub struct ApiDoc;
