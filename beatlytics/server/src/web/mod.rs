pub mod controller;
pub mod error;

use std::{future::Future, net::SocketAddr};

use axum::{
    extract::Request, http, response::IntoResponse, routing, Extension, Json, Router, ServiceExt,
};
use beatlytics_core::ServerInfo;
use beatlytics_metrics::DefaultMetrics;
use snafu::ResultExt;
use tokio::net::TcpListener;
use tower::{Layer, ServiceBuilder};
use tower_http::{
    compression::CompressionLayer, normalize_path::NormalizePathLayer, trace::TraceLayer,
};
use utoipa::OpenApi;

pub use self::{controller::ApiDoc, error::Error};
use crate::entity::{ErrorResponse, ErrorType};

pub async fn new_api_server<ShutdownSignal>(
    listen_address: SocketAddr,
    service_state: ServiceState,
    server_info: ServerInfo,
    shutdown_signal: ShutdownSignal,
) -> Result<(), Error>
where
    ShutdownSignal: Future<Output = ()> + Send + 'static,
{
    let app = {
        let app = router(service_state, server_info);
        let app = NormalizePathLayer::trim_trailing_slash().layer(app);
        ServiceExt::<Request>::into_make_service(app)
    };

    let listener = TcpListener::bind(&listen_address)
        .await
        .context(error::BindTcpServerSnafu { listen_address })?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal)
        .await
        .context(error::ServeHttpServerSnafu)
}

/// Every route served by Beatlytics, without path normalization.
pub fn router(service_state: ServiceState, server_info: ServerInfo) -> Router {
    let middleware_stack =
        ServiceBuilder::new().layer(TraceLayer::new_for_http()).layer(CompressionLayer::new());

    Router::new()
        // Liveness probe
        .route("/", routing::get(controller::liveness))
        .route("/openapi.json", routing::get(openapi_json))
        .merge(beatlytics_metrics::router(service_state.metrics.clone()))
        .merge(controller::api_router(&service_state))
        .layer(Extension(server_info))
        .layer(middleware_stack)
        .fallback(fallback)
}

// SAFETY: `axum` handler must be async
#[allow(clippy::unused_async)]
async fn fallback(uri: http::Uri) -> axum::response::Response {
    tracing::debug!("No route for {uri}");
    (
        http::StatusCode::NOT_FOUND,
        Json(ErrorResponse { type_: ErrorType::NotFound, message: format!("No route for {uri}") }),
    )
        .into_response()
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> { Json(ApiDoc::openapi()) }

#[derive(Clone)]
pub struct ServiceState {
    pub metrics: DefaultMetrics,
}

impl ServiceState {
    #[must_use]
    pub const fn new(metrics: DefaultMetrics) -> Self { Self { metrics } }
}
