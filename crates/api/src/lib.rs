pub mod climate;
pub mod db;
pub mod routes;
mod startup;
pub mod templates;
mod utils;

pub use climate::{DailyStats, DateRange, DateSeries, TemperatureStats, Window, WindowResolver};
pub use db::{ClimateDatabase, Measurement, ObservationStore, Station};
pub use routes::*;
pub use startup::*;
pub use utils::*;
