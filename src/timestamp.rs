//! Timestamp parsing for charger status exports.

use chrono::NaiveDateTime;

use crate::error::RowError;

/// Accepted timestamp formats, tried in order. The first match wins.
///
/// | Format                | Example               |
/// |-----------------------|-----------------------|
/// | `%m/%d/%Y %H:%M`      | `3/7/2023 9:05`       |
/// | `%Y-%m-%d %H:%M:%S`   | `2023-03-07 09:05:00` |
///
/// chrono accepts unpadded month, day and hour values when parsing, so the
/// first entry also covers `M/D/YYYY H:mm`. A space in a format matches any
/// run of whitespace, including none, so `3/7/2023  9:05` and `3/7/20239:05`
/// both parse as 09:05 on 7 March 2023.
pub const TIMESTAMP_FORMATS: &[&str] = &["%m/%d/%Y %H:%M", "%Y-%m-%d %H:%M:%S"];

/// Parses a trimmed timestamp string into a naive instant.
///
/// # Errors
///
/// Returns [`RowError::InvalidTimestamp`] if none of [`TIMESTAMP_FORMATS`]
/// yields a calendar-valid date.
pub fn parse(raw: &str) -> Result<NaiveDateTime, RowError> {
    TIMESTAMP_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        .ok_or_else(|| RowError::InvalidTimestamp(raw.to_string()))
}
