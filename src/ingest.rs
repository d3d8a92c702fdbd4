//! CSV ingestion of raw charger status rows.
//!
//! Turns delimited text into [`RawRecord`]s keyed by header name. Only the
//! header is validated here; per-row checks belong to [`crate::normalize`].

use csv::{ReaderBuilder, StringRecord, Trim};
use flate2::read::GzDecoder;
use std::collections::HashMap;
use std::io::Read;
use tracing::{debug, warn};

use crate::error::{IngestError, Result};

pub const TIMESTAMP: &str = "Timestamp";
pub const CHARGING_STATUS: &str = "Charging_Status";
pub const LOCATION: &str = "Location";
pub const CHARGER_ID: &str = "Charger_ID";
pub const CONNECTOR_ID: &str = "Connector_ID";

/// Columns the header row must contain. Extra columns are ignored.
pub const REQUIRED_COLUMNS: &[&str] = &[TIMESTAMP, CHARGING_STATUS, LOCATION, CHARGER_ID, CONNECTOR_ID];

/// One input row: column name to cell value.
///
/// Cells missing from a short row are absent from the map.
pub type RawRecord = HashMap<String, String>;

/// Reads every row from comma-separated input with a header line.
///
/// Blank lines are skipped. Rows the CSV reader cannot decode are logged and
/// dropped.
///
/// # Errors
///
/// Returns [`IngestError::MissingColumns`] if the header lacks any of
/// [`REQUIRED_COLUMNS`] (this includes completely empty input).
pub fn read_records<R: Read>(reader: R) -> Result<Vec<RawRecord>> {
    let mut rdr = ReaderBuilder::new()
        .flexible(true)
        .trim(Trim::Headers)
        .from_reader(reader);

    let headers = rdr.headers()?.clone();
    check_headers(&headers)?;

    let mut records = Vec::new();
    for (index, result) in rdr.records().enumerate() {
        match result {
            Ok(row) => records.push(to_raw_record(&headers, &row)),
            Err(e) => {
                warn!(row = index + 1, error = %e, "Skipping unreadable CSV row");
            }
        }
    }

    debug!(rows = records.len(), "CSV rows read");
    Ok(records)
}

/// Like [`read_records`], gunzipping the bytes first when `gzipped` is set.
pub fn read_bytes(bytes: &[u8], gzipped: bool) -> Result<Vec<RawRecord>> {
    if gzipped {
        let mut decoded = Vec::new();
        GzDecoder::new(bytes).read_to_end(&mut decoded)?;
        read_records(decoded.as_slice())
    } else {
        read_records(bytes)
    }
}

fn check_headers(headers: &StringRecord) -> Result<()> {
    let missing: Vec<String> = REQUIRED_COLUMNS
        .iter()
        .filter(|column| !headers.iter().any(|h| h == **column))
        .map(|column| column.to_string())
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(IngestError::MissingColumns(missing))
    }
}

fn to_raw_record(headers: &StringRecord, row: &StringRecord) -> RawRecord {
    headers
        .iter()
        .zip(row.iter())
        .map(|(h, v)| (h.to_string(), v.to_string()))
        .collect()
}
