//! Text representations shared by the storage layer and the request layer.

use chrono::{NaiveDate, NaiveTime};

use crate::error::ModelError;

/// ISO-8601 calendar date.
pub const DATE_FORMAT: &str = "%Y-%m-%d";
/// ISO-8601 time of day, second precision.
pub const TIME_FORMAT: &str = "%H:%M:%S";
/// Separator between stored picture paths.
pub const PICTURE_SEPARATOR: char = ',';

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

pub fn parse_date(s: &str) -> Result<NaiveDate, ModelError> {
    NaiveDate::parse_from_str(s.trim(), DATE_FORMAT)
        .map_err(|_| ModelError::InvalidDate(s.to_string()))
}

pub fn format_time(time: NaiveTime) -> String {
    time.format(TIME_FORMAT).to_string()
}

/// Accepts `HH:MM:SS` and the shorter `HH:MM`.
pub fn parse_time(s: &str) -> Result<NaiveTime, ModelError> {
    let s = s.trim();
    NaiveTime::parse_from_str(s, TIME_FORMAT)
        .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M"))
        .map_err(|_| ModelError::InvalidTime(s.to_string()))
}

pub fn join_pictures(pictures: &[String]) -> String {
    pictures.join(&PICTURE_SEPARATOR.to_string())
}

/// Inverse of [`join_pictures`]; an empty string is an empty list.
pub fn split_pictures(stored: &str) -> Vec<String> {
    if stored.is_empty() {
        return Vec::new();
    }
    stored
        .split(PICTURE_SEPARATOR)
        .map(str::to_string)
        .collect()
}
