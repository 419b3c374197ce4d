use serde::{ser::SerializeMap, Serialize, Serializer};
use time::{format_description::BorrowedFormatItem, macros::format_description, Date};

use super::Error;

/// Calendar dates travel as `YYYY-MM-DD` everywhere: path params, stored rows, JSON keys.
pub const DATE_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day]");

/// Strict `YYYY-MM-DD`. `[year]` alone would also take a leading `+`/`-`.
pub fn parse_date(input: &str) -> Result<Date, Error> {
    let invalid = |reason: String| Error::DateParse {
        input: input.to_owned(),
        reason,
    };

    if input.len() != 10 || !input.starts_with(|c: char| c.is_ascii_digit()) {
        return Err(invalid(String::from("not a four digit year, month and day")));
    }
    Date::parse(input, DATE_FORMAT).map_err(|e| invalid(e.to_string()))
}

pub fn format_date(date: Date) -> Result<String, time::error::Format> {
    date.format(DATE_FORMAT)
}

/// Inclusive date filter. An open end means "through the latest reading".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: Date,
    pub end: Option<Date>,
}

impl DateRange {
    pub fn since(start: Date) -> Self {
        Self { start, end: None }
    }

    pub fn between(start: Date, end: Date) -> Self {
        Self {
            start,
            end: Some(end),
        }
    }

    pub fn contains(&self, date: Date) -> bool {
        date >= self.start && self.end.map_or(true, |end| date <= end)
    }
}

/// Writes `(date, value)` pairs as a JSON object keyed by formatted date, in iteration order.
pub(crate) fn serialize_dated<'a, S, V, I>(
    serializer: S,
    len: usize,
    entries: I,
) -> Result<S::Ok, S::Error>
where
    S: Serializer,
    V: Serialize,
    I: IntoIterator<Item = (&'a Date, V)>,
{
    let mut map = serializer.serialize_map(Some(len))?;
    for (date, value) in entries {
        let key = format_date(*date).map_err(<S::Error as serde::ser::Error>::custom)?;
        map.serialize_entry(&key, &value)?;
    }
    map.end()
}
