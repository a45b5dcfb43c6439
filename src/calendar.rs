// Weekday helpers over the date index.
//
// Ordinals follow the Monday = 0 .. Sunday = 6 convention throughout.
use crate::error::{MetricsError, Result};
use crate::types::Table;
use chrono::{Datelike, NaiveDate};

pub const WEEKDAYS: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

/// A weekday given either by ordinal or by (case-insensitive) name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WeekdayRef {
    Ordinal(u32),
    Name(String),
}

impl From<u32> for WeekdayRef {
    fn from(n: u32) -> Self {
        WeekdayRef::Ordinal(n)
    }
}

impl From<&str> for WeekdayRef {
    fn from(s: &str) -> Self {
        WeekdayRef::Name(s.to_string())
    }
}

impl From<chrono::Weekday> for WeekdayRef {
    fn from(w: chrono::Weekday) -> Self {
        WeekdayRef::Ordinal(w.num_days_from_monday())
    }
}

impl WeekdayRef {
    pub fn ordinal(&self) -> Result<u32> {
        match self {
            WeekdayRef::Ordinal(n) if *n < 7 => Ok(*n),
            WeekdayRef::Ordinal(n) => Err(MetricsError::Configuration(format!(
                "weekday ordinal {} is outside 0..=6",
                n
            ))),
            WeekdayRef::Name(name) => name_to_int(name),
        }
    }
}

pub fn parse_date(value: &str, date_format: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), date_format).map_err(|_| MetricsError::Parse {
        value: value.to_string(),
        format: date_format.to_string(),
    })
}

/// Weekday ordinal of every date, in input order.
pub fn get_weekday<S: AsRef<str>>(dates: &[S], date_format: &str) -> Result<Vec<u32>> {
    dates
        .iter()
        .map(|d| parse_date(d.as_ref(), date_format).map(|d| d.weekday().num_days_from_monday()))
        .collect()
}

pub fn weekday_to_string(ordinals: &[u32], lowercase: bool) -> Result<Vec<String>> {
    ordinals
        .iter()
        .map(|n| {
            let name = WEEKDAYS.get(*n as usize).ok_or_else(|| {
                MetricsError::Configuration(format!("weekday ordinal {} is outside 0..=6", n))
            })?;
            Ok(if lowercase {
                name.to_lowercase()
            } else {
                name.to_string()
            })
        })
        .collect()
}

pub fn weekday_to_int<S: AsRef<str>>(names: &[S]) -> Result<Vec<u32>> {
    names.iter().map(|n| name_to_int(n.as_ref())).collect()
}

fn name_to_int(name: &str) -> Result<u32> {
    WEEKDAYS
        .iter()
        .position(|w| w.eq_ignore_ascii_case(name.trim()))
        .map(|i| i as u32)
        .ok_or_else(|| MetricsError::Configuration(format!("unknown weekday '{}'", name)))
}

/// Rows of `table` that fall on `weekday`. No match gives an empty table.
pub fn select_weekday<T: Copy>(
    table: &Table<T>,
    weekday: impl Into<WeekdayRef>,
    date_format: &str,
) -> Result<Table<T>> {
    let target = weekday.into().ordinal()?;
    let mask: Vec<bool> = get_weekday(table.index(), date_format)?
        .into_iter()
        .map(|w| w == target)
        .collect();
    Ok(table.filter_rows(&mask))
}
