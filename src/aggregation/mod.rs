//! Grouping and counting of normalized observations.
//!
//! One pass over the batch yields per-city charger time series, per-city
//! status histograms, and their cross-city totals. [`palette`] turns the
//! series into colored chart datasets for the presentation layer.

pub mod aggregate;
pub mod palette;
pub mod types;

pub use aggregate::aggregate;
pub use palette::{ChartDataset, PALETTE, color_for};
pub use types::{
    AggregationResult, ChargerSeries, CitySeriesGroup, StatusHistogram, TOTAL_SERIES_LABEL,
    TimeSeriesPoint,
};
