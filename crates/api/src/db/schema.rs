//! Static declaration of the dataset tables.
//!
//! The service never creates or migrates these tables; the DDL documents the
//! expected layout and seeds test databases. At startup the live database is
//! checked against [`EXPECTED_TABLES`].

use sqlx::SqlitePool;

use super::Error;

pub const STATION_TABLE: &str = "station";
pub const MEASUREMENT_TABLE: &str = "measurement";

pub const CREATE_STATION_TABLE: &str = r#"
CREATE TABLE station (
    id INTEGER NOT NULL PRIMARY KEY,
    station TEXT NOT NULL,
    name TEXT NOT NULL,
    latitude FLOAT NOT NULL,
    longitude FLOAT NOT NULL,
    elevation FLOAT NOT NULL
)"#;

pub const CREATE_MEASUREMENT_TABLE: &str = r#"
CREATE TABLE measurement (
    id INTEGER NOT NULL PRIMARY KEY,
    station TEXT NOT NULL,
    date TEXT NOT NULL,
    prcp FLOAT,
    tobs FLOAT NOT NULL
)"#;

pub const EXPECTED_TABLES: &[(&str, &[&str])] = &[
    (
        STATION_TABLE,
        &["id", "station", "name", "latitude", "longitude", "elevation"],
    ),
    (MEASUREMENT_TABLE, &["id", "station", "date", "prcp", "tobs"]),
];

/// Fails with [`Error::Schema`] naming the first missing table or column.
pub async fn verify_schema(pool: &SqlitePool) -> Result<(), Error> {
    for (table, columns) in EXPECTED_TABLES {
        let present: Vec<String> = sqlx::query_scalar("SELECT name FROM pragma_table_info(?)")
            .bind(*table)
            .fetch_all(pool)
            .await?;

        if present.is_empty() {
            return Err(Error::Schema(format!("missing table '{}'", table)));
        }
        if let Some(missing) = columns.iter().find(|c| !present.iter().any(|p| p == *c)) {
            return Err(Error::Schema(format!(
                "table '{}' has no column '{}'",
                table, missing
            )));
        }
    }
    Ok(())
}

/// Creates both tables. Used to build fixture databases.
pub async fn create_tables(pool: &SqlitePool) -> Result<(), Error> {
    sqlx::query(CREATE_STATION_TABLE).execute(pool).await?;
    sqlx::query(CREATE_MEASUREMENT_TABLE).execute(pool).await?;
    Ok(())
}
