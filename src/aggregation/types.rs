//! Data types produced by the aggregation pass.

use chrono::NaiveDateTime;
use indexmap::IndexMap;
use serde::Serialize;

use crate::status::StatusCode;

/// Label of the single series that collects every observation.
pub const TOTAL_SERIES_LABEL: &str = "Alle Laders";

/// One plotted sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TimeSeriesPoint {
    pub x: NaiveDateTime,
    pub y: StatusCode,
}

/// Status samples of one connector, sorted by `x` once aggregation finishes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ChargerSeries {
    pub points: Vec<TimeSeriesPoint>,
}

impl ChargerSeries {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// True if every point is at or after its predecessor.
    pub fn is_sorted(&self) -> bool {
        self.points.windows(2).all(|w| w[0].x <= w[1].x)
    }
}

/// All charger series of one city, in the order each charger was first seen.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CitySeriesGroup {
    pub datasets: IndexMap<String, ChargerSeries>,
    pub total_datasets: usize,
}

impl CitySeriesGroup {
    /// Series for `charger_key`, if that charger appeared in the batch.
    pub fn get(&self, charger_key: &str) -> Option<&ChargerSeries> {
        self.datasets.get(charger_key)
    }

    /// Number of points across every series in the group.
    pub fn point_count(&self) -> usize {
        self.datasets.values().map(ChargerSeries::len).sum()
    }
}

/// Count of observations per raw status string, in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct StatusHistogram {
    pub counts: IndexMap<String, u64>,
}

impl StatusHistogram {
    pub fn increment(&mut self, label: &str) {
        match self.counts.get_mut(label) {
            Some(count) => *count += 1,
            None => {
                self.counts.insert(label.to_string(), 1);
            }
        }
    }

    /// Count for `label`, zero if it never appeared.
    pub fn get(&self, label: &str) -> u64 {
        self.counts.get(label).copied().unwrap_or(0)
    }

    /// Sum of all counts.
    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// `(label, count)` pairs in bar-chart order.
    pub fn bars(&self) -> impl Iterator<Item = (&str, u64)> {
        self.counts.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

/// Everything derived from one batch of observations.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AggregationResult {
    pub per_city: IndexMap<String, CitySeriesGroup>,
    pub per_city_histogram: IndexMap<String, StatusHistogram>,
    /// Holds one series, [`TOTAL_SERIES_LABEL`], unless the batch was empty
    pub total: CitySeriesGroup,
    pub total_histogram: StatusHistogram,
}

impl AggregationResult {
    /// City names in first-seen order.
    pub fn cities(&self) -> impl Iterator<Item = &str> {
        self.per_city.keys().map(String::as_str)
    }

    /// Number of observations that went into this result.
    pub fn observation_count(&self) -> u64 {
        self.total_histogram.total()
    }

    pub fn is_empty(&self) -> bool {
        self.per_city.is_empty()
    }
}
