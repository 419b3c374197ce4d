use axum::{extract::State, Json};
use std::sync::Arc;

use crate::{
    climate::{group, DateSeries, Error},
    db::Measurement,
    routes::{ErrorResponse, PrecipitationSeries},
    AppState,
};

#[utoipa::path(
    get,
    path = "/api/v1.0/precipitation",
    responses(
        (status = OK, description = "Precipitation readings per date for the rolling window ending at the latest measurement", content_type = "application/json", body = PrecipitationSeries),
        (status = INTERNAL_SERVER_ERROR, description = "No measurements to anchor the window", body = ErrorResponse),
        (status = SERVICE_UNAVAILABLE, description = "Failed to query measurements", body = ErrorResponse)
    ))]
pub async fn precipitation(
    State(state): State<Arc<AppState>>,
) -> Result<Json<DateSeries<Option<f64>>>, Error> {
    let window = state.window.resolve(state.store.as_ref()).await?;
    let measurements = state.store.measurements_since(window.start).await?;
    Ok(Json(precipitation_series(measurements)))
}

/// Missing precipitation stays in the series as `null`.
pub fn precipitation_series(measurements: Vec<Measurement>) -> DateSeries<Option<f64>> {
    group(measurements.into_iter().map(|m| (m.date, m.precipitation)))
}
