//! CLI entry point for the charger status aggregator.
//!
//! Reads a charger status CSV from a file or URL, aggregates it, and prints a
//! summary, a single city page, or a JSON export of the chart datasets.

use anyhow::{Result, bail};
use charger_status::{
    aggregation::AggregationResult,
    config::{DEFAULT_LOG_FILE_PATH, Settings},
    fetch::{is_gzipped, load_source},
    ingest::read_bytes,
    output::{Export, format_page, format_summary, print_pretty, to_json},
    pagination::{Navigation, PaginationState, page, total_pages},
    pipeline::{SkipReport, process_records},
};
use clap::{Parser, Subcommand};
use std::ffi::OsStr;
use std::path::Path;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "charger_status")]
#[command(about = "Aggregate EV charger status exports into time series and histograms", long_about = None)]
struct Cli {
    /// Charger series per page (overrides PAGE_SIZE)
    #[arg(long, global = true)]
    page_size: Option<usize>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print totals and per-city histograms
    Summary {
        /// Path to a CSV file (optionally .gz) or an http(s) URL
        #[arg(value_name = "FILE_OR_URL")]
        source: String,
    },
    /// Print one page of a city's chargers
    Page {
        #[arg(value_name = "FILE_OR_URL")]
        source: String,

        /// City (Location value) to page through
        #[arg(short, long)]
        city: String,

        /// Start from this page instead of page 1 (not validated)
        #[arg(short, long)]
        page: Option<usize>,

        /// Navigation to apply after positioning
        #[arg(short, long, value_enum)]
        nav: Option<Navigation>,
    },
    /// Print the full result as chart-ready JSON
    Export {
        #[arg(value_name = "FILE_OR_URL")]
        source: String,

        /// Pretty-print the JSON
        #[arg(long, default_value_t = false)]
        pretty: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    let cli = Cli::parse();

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path =
        std::env::var("LOG_FILE_PATH").unwrap_or_else(|_| DEFAULT_LOG_FILE_PATH.to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("charger_status.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse()?));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse()?));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let settings = Settings::from_env().with_page_size(cli.page_size);
    let timeout = Duration::from_secs(settings.http_timeout_secs);

    match cli.command {
        Commands::Summary { source } => {
            let (result, report) = run(&source, timeout).await?;
            print!("{}", format_summary(&result, &report, settings.page_size)?);
        }
        Commands::Page {
            source,
            city,
            page: start,
            nav,
        } => {
            let (result, _) = run(&source, timeout).await?;
            let Some(group) = result.per_city.get(&city) else {
                bail!("city '{city}' not found in input");
            };

            let pages = total_pages(group.total_datasets, settings.page_size);
            let mut state = PaginationState::new(&result);
            if let Some(start) = start {
                state.set(&city, start);
            }
            if let Some(nav) = nav {
                state.navigate(&city, nav, pages);
            }

            let current = state.current(&city);
            let entries = page(group, settings.page_size, current);
            info!(city = %city, page = current, total_pages = pages, "Rendering page");
            print!("{}", format_page(&city, current, pages, &entries)?);
        }
        Commands::Export { source, pretty } => {
            let (result, report) = run(&source, timeout).await?;
            let export = Export::new(&result, &report, settings.page_size);
            println!("{}", to_json(&export, pretty)?);
        }
    }

    Ok(())
}

/// Loads `source` and runs the whole pipeline over it.
#[tracing::instrument(skip(timeout))]
async fn run(source: &str, timeout: Duration) -> Result<(AggregationResult, SkipReport)> {
    let bytes = load_source(source, timeout).await?;
    let records = read_bytes(&bytes, is_gzipped(source))?;
    let (result, report) = process_records(&records);
    print_pretty(&report);
    Ok((result, report))
}
