use indexmap::{map::Entry, IndexMap};
use serde::{Serialize, Serializer};
use time::Date;

use super::dates::serialize_dated;

/// Date keyed buckets of readings.
///
/// Keys keep the order in which each date was first seen and every value is
/// retained in arrival order, so several stations reporting the same day all
/// land in that day's bucket. Serializes as `{"YYYY-MM-DD": [v, ...], ...}`.
#[derive(Debug, Clone, PartialEq)]
pub struct DateSeries<V> {
    buckets: IndexMap<Date, Vec<V>>,
}

impl<V> Default for DateSeries<V> {
    fn default() -> Self {
        Self {
            buckets: IndexMap::new(),
        }
    }
}

impl<V> DateSeries<V> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, date: Date, value: V) {
        match self.buckets.entry(date) {
            Entry::Occupied(mut bucket) => bucket.get_mut().push(value),
            Entry::Vacant(slot) => {
                slot.insert(vec![value]);
            }
        }
    }

    pub fn get(&self, date: &Date) -> Option<&[V]> {
        self.buckets.get(date).map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    pub fn dates(&self) -> impl Iterator<Item = &Date> {
        self.buckets.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Date, &Vec<V>)> {
        self.buckets.iter()
    }
}

impl<V> FromIterator<(Date, V)> for DateSeries<V> {
    fn from_iter<I: IntoIterator<Item = (Date, V)>>(readings: I) -> Self {
        let mut series = Self::new();
        for (date, value) in readings {
            series.push(date, value);
        }
        series
    }
}

impl<V> IntoIterator for DateSeries<V> {
    type Item = (Date, Vec<V>);
    type IntoIter = indexmap::map::IntoIter<Date, Vec<V>>;

    fn into_iter(self) -> Self::IntoIter {
        self.buckets.into_iter()
    }
}

impl<V: Serialize> Serialize for DateSeries<V> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serialize_dated(serializer, self.buckets.len(), self.buckets.iter())
    }
}

/// Groups readings by date. Input is expected pre-filtered and in store order.
pub fn group<V>(readings: impl IntoIterator<Item = (Date, V)>) -> DateSeries<V> {
    readings.into_iter().collect()
}
