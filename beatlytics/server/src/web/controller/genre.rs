use axum::{extract::State, Json};

use crate::{entity::GenrePlays, ServiceState};

/// List play counts of every genre seen so far
#[utoipa::path(
    get,
    operation_id = "list_genres",
    path = "/api/genres",
    tag = "Genres",
    responses(
        (status = 200, body = [GenrePlays], description = "Sorted by plays, highest first")
    )
)]
pub async fn list_genres(State(service_state): State<ServiceState>) -> Json<Vec<GenrePlays>> {
    let mut genres: Vec<GenrePlays> =
        service_state.metrics.genre_plays().snapshot().into_iter().map(GenrePlays::from).collect();
    GenrePlays::sort(&mut genres);

    Json(genres)
}
