use axum::{extract::State, Json};
use std::sync::Arc;

use crate::{climate::Error, db::Station, routes::ErrorResponse, AppState};

#[utoipa::path(
    get,
    path = "/api/v1.0/stations",
    responses(
        (status = OK, description = "Every station in the catalog", content_type = "application/json", body = Vec<Station>),
        (status = SERVICE_UNAVAILABLE, description = "Failed to read the station catalog", body = ErrorResponse)
    ))]
pub async fn stations(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Station>>, Error> {
    let stations = state.store.stations().await?;
    Ok(Json(stations))
}
