//! Row normalization: raw CSV row to typed observation.

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::error::RowError;
use crate::ingest::{CHARGER_ID, CHARGING_STATUS, CONNECTOR_ID, LOCATION, RawRecord, TIMESTAMP};
use crate::status::{self, StatusCode};
use crate::timestamp;

/// A validated status observation for one connector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NormalizedObservation {
    pub city: String,
    /// `city - charger - connector`
    pub charger_key: String,
    pub timestamp: NaiveDateTime,
    pub status_code: StatusCode,
    /// Trimmed status string as it appeared in the input
    pub raw_status: String,
}

/// Validates a raw row and extracts an observation from it.
///
/// Presence of every field is checked before the timestamp is parsed.
///
/// # Errors
///
/// - [`RowError::IncompleteRow`] if `Timestamp` or `Charging_Status` is
///   absent or empty, or an identifier column is absent. Emptiness is judged
///   before trimming: a whitespace-only status is kept as `""` (unknown), and
///   a whitespace-only timestamp fails to parse.
/// - [`RowError::InvalidTimestamp`] if the timestamp matches no accepted
///   format.
pub fn normalize(row: &RawRecord) -> Result<NormalizedObservation, RowError> {
    let timestamp_str = non_empty(row, TIMESTAMP)?;
    let status_str = non_empty(row, CHARGING_STATUS)?;
    let city = present(row, LOCATION)?;
    let charger_id = present(row, CHARGER_ID)?;
    let connector_id = present(row, CONNECTOR_ID)?;

    let timestamp = timestamp::parse(timestamp_str)?;

    Ok(NormalizedObservation {
        charger_key: format!("{city} - {charger_id} - {connector_id}"),
        city: city.to_string(),
        timestamp,
        status_code: status::to_code(status_str),
        raw_status: status_str.to_string(),
    })
}

fn present<'a>(row: &'a RawRecord, column: &'static str) -> Result<&'a str, RowError> {
    row.get(column)
        .map(|v| v.trim())
        .ok_or(RowError::IncompleteRow(column))
}

fn non_empty<'a>(row: &'a RawRecord, column: &'static str) -> Result<&'a str, RowError> {
    match row.get(column) {
        Some(v) if !v.is_empty() => Ok(v.trim()),
        _ => Err(RowError::IncompleteRow(column)),
    }
}
