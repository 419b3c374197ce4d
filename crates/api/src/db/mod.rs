pub mod schema;
pub mod sqlite;

pub use sqlite::ClimateDatabase;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use time::Date;
use utoipa::ToSchema;

use crate::climate::DateRange;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Failed to query sqlite: {0}")]
    Query(#[from] sqlx::Error),
    #[error("Query timed out after {0:?}")]
    Timeout(Duration),
    #[error("Stored date is not YYYY-MM-DD: {0}")]
    DateParse(#[from] time::error::Parse),
    #[error("Unexpected database schema: {0}")]
    Schema(String),
}

/// Read-only access to the station catalog and daily measurements.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ObservationStore: Sync + Send {
    /// Most recent measurement date, `None` when there are no measurements.
    async fn latest_measurement_date(&self) -> Result<Option<Date>, Error>;
    /// Measurements with `date >= since`, ordered by date.
    async fn measurements_since(&self, since: Date) -> Result<Vec<Measurement>, Error>;
    /// `(date, tobs)` pairs inside `range`, ordered by date.
    async fn temperatures_in_range(&self, range: DateRange) -> Result<Vec<(Date, f64)>, Error>;
    async fn stations(&self) -> Result<Vec<Station>, Error>;
    async fn health_check(&self) -> Result<(), Error>;
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, sqlx::FromRow, ToSchema)]
pub struct Station {
    pub id: i64,
    pub station: String,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub elevation: f64,
}

/// One station's reading for one day.
#[derive(Debug, Clone, PartialEq)]
pub struct Measurement {
    pub station: String,
    pub date: Date,
    pub precipitation: Option<f64>,
    pub temperature: f64,
}
