//! Query and aggregation engine: rolling windows, date grouping and daily
//! temperature statistics over an [`ObservationStore`](crate::db::ObservationStore).

pub mod dates;
pub mod series;
pub mod stats;
pub mod window;

pub use dates::{format_date, parse_date, DateRange, DATE_FORMAT};
pub use series::{group, DateSeries};
pub use stats::{aggregate, DailyStats, TemperatureStats};
pub use window::{window_start, Window, WindowResolver};

use crate::db;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Invalid date '{input}', expected YYYY-MM-DD: {reason}")]
    DateParse { input: String, reason: String },
    #[error("No measurements available to anchor the date window")]
    EmptyDataset,
    #[error("Observation store unavailable: {0}")]
    StoreUnavailable(#[from] db::Error),
}
