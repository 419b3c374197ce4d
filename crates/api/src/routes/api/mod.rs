pub mod health;
pub mod precipitation;
pub mod stations;
pub mod temperature;
pub mod tobs;

pub use health::*;
pub use precipitation::*;
pub use stations::*;
pub use temperature::*;
pub use tobs::*;

use std::collections::HashMap;
use utoipa::ToSchema;

/// Fixed JSON routes and what they return, as listed on the index page.
pub const API_ROUTES: &[(&str, &str)] = &[
    (
        "/api/v1.0/precipitation",
        "precipitation readings per date over the rolling window",
    ),
    ("/api/v1.0/stations", "all weather stations"),
    (
        "/api/v1.0/tobs",
        "temperature observations per date over the rolling window",
    ),
];

pub const RANGE_ROUTES: &[(&str, &str)] = &[
    (
        "/api/v1.0/START_DATE",
        "[min, avg, max] temperature per date from START_DATE on",
    ),
    (
        "/api/v1.0/START_DATE/END_DATE",
        "[min, avg, max] temperature per date from START_DATE through END_DATE",
    ),
];

/// Date keyed precipitation readings, e.g. `{"2016-08-23": [0.0, 0.15, null]}`
#[derive(ToSchema)]
pub struct PrecipitationSeries(pub HashMap<String, Vec<Option<f64>>>);

/// Date keyed temperature observations, e.g. `{"2016-08-23": [81.0, 76.0]}`
#[derive(ToSchema)]
pub struct TemperatureSeries(pub HashMap<String, Vec<f64>>);

/// Date keyed `[min, avg, max]` triples, e.g. `{"2017-01-01": [70.0, 75.0, 80.0]}`
#[derive(ToSchema)]
pub struct TemperatureSummary(pub HashMap<String, Vec<f64>>);
