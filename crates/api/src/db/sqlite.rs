use anyhow::{Context, Result};
use async_trait::async_trait;
use log::info;
use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions},
    FromRow,
};
use std::{future::Future, str::FromStr, time::Duration};
use time::Date;

use super::{schema, Error, Measurement, ObservationStore, Station};
use crate::climate::{format_date, DateRange, DATE_FORMAT};

/// Pooled, read-only handle on the station dataset.
pub struct ClimateDatabase {
    pool: SqlitePool,
    query_timeout: Duration,
}

#[derive(FromRow)]
struct MeasurementRow {
    station: String,
    date: String,
    prcp: Option<f64>,
    tobs: f64,
}

impl TryFrom<MeasurementRow> for Measurement {
    type Error = Error;

    fn try_from(row: MeasurementRow) -> Result<Self, Self::Error> {
        Ok(Measurement {
            station: row.station,
            date: Date::parse(&row.date, DATE_FORMAT)?,
            precipitation: row.prcp,
            temperature: row.tobs,
        })
    }
}

#[derive(FromRow)]
struct TemperatureRow {
    date: String,
    tobs: f64,
}

impl ClimateDatabase {
    pub async fn new(path: &str, max_connections: u32, query_timeout: Duration) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(&format!("sqlite:{}", path))?
            .read_only(true)
            .pragma("busy_timeout", "5000")
            .pragma("cache_size", "-64000")
            .pragma("temp_store", "MEMORY");

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .acquire_timeout(Duration::from_secs(30))
            .connect_with(options)
            .await
            .with_context(|| format!("Failed to open dataset at {}", path))?;

        schema::verify_schema(&pool)
            .await
            .with_context(|| format!("Dataset at {} does not match the expected schema", path))?;
        info!("SQLite dataset opened read-only at: {}", path);

        Ok(Self::from_pool(pool, query_timeout))
    }

    pub fn from_pool(pool: SqlitePool, query_timeout: Duration) -> Self {
        Self {
            pool,
            query_timeout,
        }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    async fn timed<T, F>(&self, query: F) -> Result<T, Error>
    where
        F: Future<Output = Result<T, sqlx::Error>>,
    {
        tokio::time::timeout(self.query_timeout, query)
            .await
            .map_err(|_| Error::Timeout(self.query_timeout))?
            .map_err(Error::from)
    }
}

fn bind_date(date: Date) -> Result<String, Error> {
    format_date(date).map_err(|e| Error::Schema(format!("unformattable date {}: {}", date, e)))
}

#[async_trait]
impl ObservationStore for ClimateDatabase {
    async fn latest_measurement_date(&self) -> Result<Option<Date>, Error> {
        let latest: Option<String> = self
            .timed(sqlx::query_scalar("SELECT MAX(date) FROM measurement").fetch_one(&self.pool))
            .await?;

        latest
            .map(|date| Date::parse(&date, DATE_FORMAT))
            .transpose()
            .map_err(Error::from)
    }

    async fn measurements_since(&self, since: Date) -> Result<Vec<Measurement>, Error> {
        let rows: Vec<MeasurementRow> = self
            .timed(
                sqlx::query_as(
                    "SELECT station, date, CAST(prcp AS REAL) AS prcp, CAST(tobs AS REAL) AS tobs
                     FROM measurement
                     WHERE date >= ?
                     ORDER BY date, id",
                )
                .bind(bind_date(since)?)
                .fetch_all(&self.pool),
            )
            .await?;

        rows.into_iter().map(Measurement::try_from).collect()
    }

    async fn temperatures_in_range(&self, range: DateRange) -> Result<Vec<(Date, f64)>, Error> {
        let start = bind_date(range.start)?;
        let rows: Vec<TemperatureRow> = match range.end {
            Some(end) => {
                self.timed(
                    sqlx::query_as(
                        "SELECT date, CAST(tobs AS REAL) AS tobs
                         FROM measurement
                         WHERE date >= ? AND date <= ?
                         ORDER BY date, id",
                    )
                    .bind(start)
                    .bind(bind_date(end)?)
                    .fetch_all(&self.pool),
                )
                .await?
            }
            None => {
                self.timed(
                    sqlx::query_as(
                        "SELECT date, CAST(tobs AS REAL) AS tobs
                         FROM measurement
                         WHERE date >= ?
                         ORDER BY date, id",
                    )
                    .bind(start)
                    .fetch_all(&self.pool),
                )
                .await?
            }
        };

        rows.into_iter()
            .map(|row| -> Result<(Date, f64), Error> {
                Ok((Date::parse(&row.date, DATE_FORMAT)?, row.tobs))
            })
            .collect()
    }

    async fn stations(&self) -> Result<Vec<Station>, Error> {
        self.timed(
            sqlx::query_as(
                "SELECT id, station, name,
                        CAST(latitude AS REAL) AS latitude,
                        CAST(longitude AS REAL) AS longitude,
                        CAST(elevation AS REAL) AS elevation
                 FROM station
                 ORDER BY id",
            )
            .fetch_all(&self.pool),
        )
        .await
    }

    async fn health_check(&self) -> Result<(), Error> {
        self.timed(sqlx::query("SELECT 1").execute(&self.pool))
            .await
            .map(|_| ())
    }
}
