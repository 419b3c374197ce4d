use log::debug;
use time::{Date, Duration};

use super::Error;
use crate::db::ObservationStore;

/// Trailing date window, inclusive on both ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    pub start: Date,
    pub end: Date,
}

/// Derives the rolling window anchored at the most recent measurement.
#[derive(Debug, Clone, Copy)]
pub struct WindowResolver {
    days: i64,
}

impl WindowResolver {
    pub fn new(days: i64) -> Self {
        Self { days }
    }

    pub fn days(&self) -> i64 {
        self.days
    }

    pub async fn latest_date(&self, store: &dyn ObservationStore) -> Result<Date, Error> {
        store
            .latest_measurement_date()
            .await?
            .ok_or(Error::EmptyDataset)
    }

    pub async fn resolve(&self, store: &dyn ObservationStore) -> Result<Window, Error> {
        let end = self.latest_date(store).await?;
        let start = window_start(end, self.days);
        debug!("resolved {} day window: {} - {}", self.days, start, end);
        Ok(Window { start, end })
    }
}

/// `latest` minus `days` calendar days, saturating at the earliest representable date.
/// Negative spans are treated as zero.
pub fn window_start(latest: Date, days: i64) -> Date {
    days.max(0)
        .checked_mul(86_400)
        .map(Duration::seconds)
        .and_then(|span| latest.checked_sub(span))
        .unwrap_or(Date::MIN)
}
