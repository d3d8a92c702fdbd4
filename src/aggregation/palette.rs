//! Chart colors and the per-dataset view handed to the chart layer.

use serde::Serialize;

use crate::aggregation::types::{CitySeriesGroup, TimeSeriesPoint};

/// Dataset colors, cycled by a charger's position within its city.
pub const PALETTE: &[&str] = &["#FF6384", "#36A2EB", "#FFCE56", "#4BC0C0", "#9966FF"];

/// Color for the dataset at `index` within its group.
pub fn color_for(index: usize) -> &'static str {
    PALETTE[index % PALETTE.len()]
}

/// One line-chart dataset: a charger's series plus its presentation attributes.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartDataset {
    pub label: String,
    pub data: Vec<TimeSeriesPoint>,
    pub border_color: &'static str,
    pub background_color: &'static str,
    pub fill: bool,
    pub stepped: bool,
}

impl ChartDataset {
    pub fn new(index: usize, label: &str, data: &[TimeSeriesPoint]) -> Self {
        let color = color_for(index);
        Self {
            label: label.to_string(),
            data: data.to_vec(),
            border_color: color,
            background_color: color,
            fill: false,
            stepped: true,
        }
    }

    /// Builds datasets for every series of `group`, colored by insertion order.
    pub fn from_group(group: &CitySeriesGroup) -> Vec<Self> {
        group
            .datasets
            .iter()
            .enumerate()
            .map(|(i, (label, series))| Self::new(i, label, &series.points))
            .collect()
    }
}
