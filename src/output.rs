//! Rendering of aggregation results for the CLI.
//!
//! Supports a plain-text summary, a single page of one city, and a JSON
//! export shaped like the chart datasets the frontend consumes.

use anyhow::Result;
use indexmap::IndexMap;
use serde::Serialize;
use std::fmt::Write;
use tracing::debug;

use crate::aggregation::{AggregationResult, ChartDataset, StatusHistogram};
use crate::pagination::{PageEntry, total_pages};
use crate::pipeline::SkipReport;

/// Logs the skip report using Rust's debug pretty-print format.
pub fn print_pretty(report: &SkipReport) {
    debug!("{:#?}", report);
}

/// Chart-ready view of one city.
#[derive(Debug, Serialize)]
pub struct CityExport {
    pub datasets: Vec<ChartDataset>,
    pub total_datasets: usize,
    pub total_pages: usize,
    pub histogram: StatusHistogram,
}

/// Chart-ready view of a whole run.
#[derive(Debug, Serialize)]
pub struct Export {
    pub total: Vec<ChartDataset>,
    pub total_histogram: StatusHistogram,
    pub cities: IndexMap<String, CityExport>,
    pub report: SkipReport,
}

impl Export {
    pub fn new(result: &AggregationResult, report: &SkipReport, page_size: usize) -> Self {
        let cities = result
            .per_city
            .iter()
            .map(|(city, group)| {
                let export = CityExport {
                    datasets: ChartDataset::from_group(group),
                    total_datasets: group.total_datasets,
                    total_pages: total_pages(group.total_datasets, page_size),
                    histogram: result
                        .per_city_histogram
                        .get(city)
                        .cloned()
                        .unwrap_or_default(),
                };
                (city.clone(), export)
            })
            .collect();

        Self {
            total: ChartDataset::from_group(&result.total),
            total_histogram: result.total_histogram.clone(),
            cities,
            report: report.clone(),
        }
    }
}

/// Serializes the export as JSON, pretty-printed when `pretty` is set.
pub fn to_json(export: &Export, pretty: bool) -> Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(export)?
    } else {
        serde_json::to_string(export)?
    };
    Ok(json)
}

fn write_histogram(out: &mut String, histogram: &StatusHistogram) -> Result<()> {
    for (label, count) in histogram.bars() {
        writeln!(out, "    {label:<16} {count}")?;
    }
    Ok(())
}

/// Plain-text overview: totals first, then one block per city.
pub fn format_summary(
    result: &AggregationResult,
    report: &SkipReport,
    page_size: usize,
) -> Result<String> {
    let mut out = String::new();

    writeln!(
        out,
        "Rows: {} read, {} used, {} skipped ({} incomplete, {} invalid timestamp)",
        report.rows,
        report.normalized,
        report.skipped(),
        report.incomplete_rows,
        report.invalid_timestamps,
    )?;

    if result.is_empty() {
        writeln!(out, "No observations.")?;
        return Ok(out);
    }

    writeln!(out, "\nTotal ({} points)", result.total.point_count())?;
    write_histogram(&mut out, &result.total_histogram)?;

    for (city, group) in &result.per_city {
        writeln!(
            out,
            "\n{city}: {} chargers, {} pages",
            group.total_datasets,
            total_pages(group.total_datasets, page_size)
        )?;
        if let Some(histogram) = result.per_city_histogram.get(city) {
            write_histogram(&mut out, histogram)?;
        }
    }

    Ok(out)
}

/// One city's page: a header line, then one line per charger series.
pub fn format_page(
    city: &str,
    page: usize,
    total_pages: usize,
    entries: &[PageEntry<'_>],
) -> Result<String> {
    let mut out = String::new();
    writeln!(out, "{city}: page {page} of {total_pages}")?;

    if entries.is_empty() {
        writeln!(out, "  (no chargers on this page)")?;
    }

    for entry in entries {
        writeln!(
            out,
            "  {} {} ({} points)",
            entry.color(),
            entry.charger_key,
            entry.series.len()
        )?;
    }
    Ok(out)
}
