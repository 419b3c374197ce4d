use axum::{extract::State, Json};
use std::{collections::HashSet, sync::Arc};

use crate::{
    climate::{group, DateSeries, Error},
    db::{Measurement, Station},
    routes::{ErrorResponse, TemperatureSeries},
    AppState,
};

#[utoipa::path(
    get,
    path = "/api/v1.0/tobs",
    responses(
        (status = OK, description = "Temperature observations per date for the rolling window, limited to catalogued stations", content_type = "application/json", body = TemperatureSeries),
        (status = INTERNAL_SERVER_ERROR, description = "No measurements to anchor the window", body = ErrorResponse),
        (status = SERVICE_UNAVAILABLE, description = "Failed to query measurements", body = ErrorResponse)
    ))]
pub async fn tobs(State(state): State<Arc<AppState>>) -> Result<Json<DateSeries<f64>>, Error> {
    let window = state.window.resolve(state.store.as_ref()).await?;
    let measurements = state.store.measurements_since(window.start).await?;
    let stations = state.store.stations().await?;
    Ok(Json(station_temperatures(measurements, &stations)))
}

/// Groups temperatures of measurements whose station is in the catalog; the rest are dropped.
pub fn station_temperatures(
    measurements: Vec<Measurement>,
    stations: &[Station],
) -> DateSeries<f64> {
    let known: HashSet<&str> = stations.iter().map(|s| s.station.as_str()).collect();
    group(
        measurements
            .into_iter()
            .filter(|m| known.contains(m.station.as_str()))
            .map(|m| (m.date, m.temperature)),
    )
}
