use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing, Router,
};

use crate::Metrics;

pub const METRICS_PATH: &str = "/metrics";

/// Routes serving `metrics` in the Prometheus text format on `/metrics`.
pub fn router<M>(metrics: M) -> Router
where
    M: Metrics + 'static,
{
    Router::new().route(METRICS_PATH, routing::get(serve_metrics::<M>)).with_state(metrics)
}

async fn serve_metrics<M>(State(metrics): State<M>) -> Response
where
    M: Metrics,
{
    match metrics.render() {
        Ok(body) => {
            (StatusCode::OK, [(header::CONTENT_TYPE, prometheus::TEXT_FORMAT)], body).into_response()
        }
        Err(err) => {
            tracing::error!("{err}");
            (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()).into_response()
        }
    }
}
