//! End-to-end run: raw rows in, aggregation out.

use serde::Serialize;
use std::io::Read;
use tracing::{debug, info, warn};

use crate::aggregation::{AggregationResult, aggregate};
use crate::error::{Result, RowError};
use crate::ingest::{RawRecord, read_records};
use crate::normalize::normalize;
use crate::status::UNKNOWN_CODE;

/// Row accounting for one run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SkipReport {
    pub rows: usize,
    pub normalized: usize,
    pub incomplete_rows: usize,
    pub invalid_timestamps: usize,
    /// Normalized rows whose status was not recognized; not skipped
    pub unknown_statuses: usize,
}

impl SkipReport {
    pub fn skipped(&self) -> usize {
        self.incomplete_rows + self.invalid_timestamps
    }

    fn record(&mut self, err: &RowError) {
        match err {
            RowError::IncompleteRow(_) => self.incomplete_rows += 1,
            RowError::InvalidTimestamp(_) => self.invalid_timestamps += 1,
        }
    }
}

/// Normalizes every row and aggregates the survivors.
///
/// Row-level problems are counted in the returned [`SkipReport`] and never
/// fail the run.
#[tracing::instrument(skip_all, fields(rows = records.len()))]
pub fn process_records(records: &[RawRecord]) -> (AggregationResult, SkipReport) {
    let mut report = SkipReport {
        rows: records.len(),
        ..Default::default()
    };

    let observations: Vec<_> = records
        .iter()
        .enumerate()
        .filter_map(|(index, row)| match normalize(row) {
            Ok(obs) => {
                if obs.status_code == UNKNOWN_CODE {
                    warn!(row = index + 1, status = %obs.raw_status, "Unknown charging status");
                    report.unknown_statuses += 1;
                }
                Some(obs)
            }
            Err(e) => {
                debug!(row = index + 1, reason = e.kind(), error = %e, "Skipping row");
                report.record(&e);
                None
            }
        })
        .collect();
    report.normalized = observations.len();

    let result = aggregate(observations);

    info!(
        rows = report.rows,
        observations = report.normalized,
        skipped = report.skipped(),
        cities = result.per_city.len(),
        "Aggregation complete"
    );

    (result, report)
}

/// Reads CSV from `reader` and runs [`process_records`] on it.
///
/// # Errors
///
/// Fails only at batch level, e.g. when required header columns are missing.
pub fn process_reader<R: Read>(reader: R) -> Result<(AggregationResult, SkipReport)> {
    let records = read_records(reader)?;
    Ok(process_records(&records))
}
