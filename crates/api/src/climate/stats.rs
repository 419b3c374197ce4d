use indexmap::IndexMap;
use itertools::{Itertools, MinMaxResult};
use log::debug;
use serde::{Serialize, Serializer};
use time::Date;

use super::{dates::serialize_dated, series::group, DateRange, Error};
use crate::db::ObservationStore;

/// Summary of one day's temperature readings.
///
/// Serialized as the bare array `[min, avg, max]`, not as a labeled object.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TemperatureStats {
    pub min: f64,
    pub avg: f64,
    pub max: f64,
}

impl TemperatureStats {
    /// `None` for an empty slice.
    pub fn from_readings(temperatures: &[f64]) -> Option<Self> {
        let (min, max) = match temperatures.iter().copied().minmax() {
            MinMaxResult::NoElements => return None,
            MinMaxResult::OneElement(t) => (t, t),
            MinMaxResult::MinMax(min, max) => (min, max),
        };
        let sum: f64 = temperatures.iter().sum();
        // keep float error in the mean from escaping [min, max]
        let avg = (sum / temperatures.len() as f64).clamp(min, max);

        Some(Self { min, avg, max })
    }
}

impl Serialize for TemperatureStats {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        [self.min, self.avg, self.max].serialize(serializer)
    }
}

/// Per-date temperature summaries in first-seen date order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DailyStats {
    days: IndexMap<Date, TemperatureStats>,
}

impl DailyStats {
    pub fn get(&self, date: &Date) -> Option<&TemperatureStats> {
        self.days.get(date)
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Date, &TemperatureStats)> {
        self.days.iter()
    }
}

impl Serialize for DailyStats {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serialize_dated(serializer, self.days.len(), self.days.iter())
    }
}

pub fn aggregate(readings: impl IntoIterator<Item = (Date, f64)>) -> DailyStats {
    let days = group(readings)
        .into_iter()
        .filter_map(|(date, temperatures)| {
            TemperatureStats::from_readings(&temperatures).map(|stats| (date, stats))
        })
        .collect();
    DailyStats { days }
}

/// Aggregates every stored temperature reading that falls inside `range`.
pub async fn aggregate_range(
    store: &dyn ObservationStore,
    range: DateRange,
) -> Result<DailyStats, Error> {
    let readings = store.temperatures_in_range(range).await?;
    debug!("aggregating {} readings for {:?}", readings.len(), range);
    Ok(aggregate(
        readings
            .into_iter()
            .filter(|(date, _)| range.contains(*date)),
    ))
}

/// Stats for every date on or after `start`.
pub async fn since(store: &dyn ObservationStore, start: Date) -> Result<DailyStats, Error> {
    aggregate_range(store, DateRange::since(start)).await
}

/// Stats for every date in `start..=end`. An inverted range yields no entries.
pub async fn between(
    store: &dyn ObservationStore,
    start: Date,
    end: Date,
) -> Result<DailyStats, Error> {
    aggregate_range(store, DateRange::between(start, end)).await
}
