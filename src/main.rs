//! CLI entry point for the trip hotspot analyzer.
//!
//! Ingests one or more trip-record files (local, gzip-compressed, or over
//! HTTP) and reports the busiest pickup zones and (zone, hour) slots.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{info, warn};
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};
use trip_hotspots::analyzers::analyzer::TripAnalyzer;
use trip_hotspots::{
    fetch::{ApiKey, BasicClient, HttpClient, fetch_bytes, is_remote},
    output::{ReportFormat, TripReport, write_report},
    source::reader_from_bytes,
    stats::IngestStats,
};

#[derive(Parser)]
#[command(name = "trip_hotspots")]
#[command(about = "Rank the busiest pickup zones and hours in trip files", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Rank the busiest zones and (zone, hour) slots
    Analyze {
        /// Trip files or URLs; `.gz` sources are decompressed
        #[arg(value_name = "FILE_OR_URL", required = true)]
        sources: Vec<String>,

        /// Number of zones to report
        #[arg(short = 'z', long, default_value_t = 10)]
        top_zones: usize,

        /// Number of (zone, hour) slots to report
        #[arg(short = 's', long, default_value_t = 10)]
        top_slots: usize,

        /// Report format
        #[arg(short, long, value_enum, default_value_t = ReportFormat::Table)]
        format: ReportFormat,

        /// Write the report to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Show the 24-hour pickup profile of a single zone
    Hours {
        /// Trip files or URLs; `.gz` sources are decompressed
        #[arg(value_name = "FILE_OR_URL", required = true)]
        sources: Vec<String>,

        /// Zone identifier to profile
        #[arg(short, long)]
        zone: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path =
        std::env::var("LOG_FILE_PATH").unwrap_or_else(|_| "logs/trip_hotspots.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("trip_hotspots.log"));

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

    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze {
            sources,
            top_zones,
            top_slots,
            format,
            output,
        } => {
            let mut analyzer = TripAnalyzer::new();
            let ingest = ingest_sources(&mut analyzer, &sources).await?;

            let report = TripReport::build(&analyzer, sources, ingest, top_zones, top_slots);
            write_report(output.as_deref(), format, &report)?;

            if let Some(path) = output {
                info!(path = %path.display(), "Report written");
            }
        }
        Commands::Hours { sources, zone } => {
            let mut analyzer = TripAnalyzer::new();
            ingest_sources(&mut analyzer, &sources).await?;

            match analyzer.hourly_counts(&zone) {
                Some(hours) => {
                    println!("Zone {zone}: {} trips", analyzer.zone_count(&zone));
                    for (hour, count) in hours.iter().enumerate() {
                        println!("{hour:02}  {count:>10}");
                    }
                }
                None => warn!(zone = %zone, "Zone has no recorded pickups"),
            }
        }
    }

    Ok(())
}

/// HTTP client for remote sources, authenticated when `TRIPS_API_TOKEN` is set.
fn http_client() -> Result<Box<dyn HttpClient>> {
    let basic = BasicClient::with_timeouts(Duration::from_secs(10), Duration::from_secs(300))?;
    match std::env::var("TRIPS_API_TOKEN") {
        Ok(token) if !token.is_empty() => Ok(Box::new(ApiKey::bearer(basic, &token)?)),
        _ => Ok(Box::new(basic)),
    }
}

/// Feeds every source into `analyzer` in order and returns the combined
/// ingestion tallies. Unavailable sources are logged and skipped.
#[tracing::instrument(skip_all, fields(source_count = sources.len()))]
async fn ingest_sources(analyzer: &mut TripAnalyzer, sources: &[String]) -> Result<IngestStats> {
    let client = if sources.iter().any(|s| is_remote(s)) {
        Some(http_client()?)
    } else {
        None
    };

    let mut total = IngestStats::default();

    for source in sources {
        let stats = match &client {
            Some(client) if is_remote(source) => match fetch_bytes(client.as_ref(), source).await {
                Ok(bytes) => analyzer.ingest_reader(reader_from_bytes(source, &bytes)),
                Err(e) => {
                    warn!(source = %source, error = %e, "Fetch failed, skipping source");
                    IngestStats::unavailable()
                }
            },
            _ => analyzer.ingest_file(Path::new(source)),
        };

        info!(
            source = %source,
            lines_read = stats.lines_read,
            accepted = stats.accepted,
            malformed = stats.malformed(),
            "Source processed"
        );
        total.merge(&stats);
    }

    info!(
        sources = total.sources,
        unavailable = total.sources_unavailable,
        lines_read = total.lines_read,
        accepted = total.accepted,
        accepted_pct = %format!("{:.1}", total.accepted_pct()),
        distinct_zones = analyzer.distinct_zones(),
        "Ingestion complete"
    );
    Ok(total)
}
