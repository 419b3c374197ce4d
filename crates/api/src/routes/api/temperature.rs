use axum::{
    extract::{Path, State},
    Json,
};
use log::debug;
use std::sync::Arc;

use crate::{
    climate::{parse_date, stats, DailyStats, Error},
    routes::{ErrorResponse, TemperatureSummary},
    AppState,
};

#[utoipa::path(
    get,
    path = "/api/v1.0/{start}",
    params(
        ("start" = String, Path, description = "First date to include, YYYY-MM-DD"),
    ),
    responses(
        (status = OK, description = "[min, avg, max] temperature per date on or after start", content_type = "application/json", body = TemperatureSummary),
        (status = BAD_REQUEST, description = "Start is not a YYYY-MM-DD date", body = ErrorResponse),
        (status = SERVICE_UNAVAILABLE, description = "Failed to query measurements", body = ErrorResponse)
    ))]
pub async fn temperature_since(
    State(state): State<Arc<AppState>>,
    Path(start): Path<String>,
) -> Result<Json<DailyStats>, Error> {
    let start = parse_date(&start)?;
    let summary = stats::since(state.store.as_ref(), start).await?;
    debug!("{} days of temperature stats since {}", summary.len(), start);
    Ok(Json(summary))
}

#[utoipa::path(
    get,
    path = "/api/v1.0/{start}/{end}",
    params(
        ("start" = String, Path, description = "First date to include, YYYY-MM-DD"),
        ("end" = String, Path, description = "Last date to include, YYYY-MM-DD"),
    ),
    responses(
        (status = OK, description = "[min, avg, max] temperature per date from start through end", content_type = "application/json", body = TemperatureSummary),
        (status = BAD_REQUEST, description = "Start or end is not a YYYY-MM-DD date", body = ErrorResponse),
        (status = SERVICE_UNAVAILABLE, description = "Failed to query measurements", body = ErrorResponse)
    ))]
pub async fn temperature_between(
    State(state): State<Arc<AppState>>,
    Path((start, end)): Path<(String, String)>,
) -> Result<Json<DailyStats>, Error> {
    let start = parse_date(&start)?;
    let end = parse_date(&end)?;
    let summary = stats::between(state.store.as_ref(), start, end).await?;
    debug!(
        "{} days of temperature stats between {} and {}",
        summary.len(),
        start,
        end
    );
    Ok(Json(summary))
}
