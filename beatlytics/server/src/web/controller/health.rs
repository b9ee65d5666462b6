use axum::{extract::State, Json};

use crate::{
    entity::{HealthStatus, ServiceStatus},
    ServiceState,
};

/// Report service status and the time of the latest genre play update
#[utoipa::path(
    get,
    operation_id = "get_health",
    path = "/api/health",
    tag = "Health",
    responses(
        (status = 200, body = HealthStatus)
    )
)]
pub async fn health(State(service_state): State<ServiceState>) -> Json<HealthStatus> {
    let last_ingest_unix =
        service_state.metrics.genre_plays().last_updated().map(|time| time.timestamp());

    Json(HealthStatus { status: ServiceStatus::Ok, last_ingest_unix })
}
