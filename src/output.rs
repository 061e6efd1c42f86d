//! Report rendering for ranked zone and slot results.
//!
//! Supports aligned text tables, JSON, and a flat CSV layout.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::ValueEnum;
use csv::WriterBuilder;
use serde::Serialize;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use tracing::debug;

use crate::analyzers::analyzer::TripAnalyzer;
use crate::analyzers::types::{SlotCount, ZoneCount};
use crate::stats::IngestStats;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ReportFormat {
    #[default]
    Table,
    Json,
    Csv,
}

/// Everything a single run produces.
#[derive(Debug, Serialize)]
pub struct TripReport {
    pub generated_at: DateTime<Utc>,
    pub sources: Vec<String>,
    pub ingest: IngestStats,
    pub top_zones: Vec<ZoneCount>,
    pub top_slots: Vec<SlotCount>,
}

impl TripReport {
    /// Snapshots the analyzer's rankings into a report.
    pub fn build(
        analyzer: &TripAnalyzer,
        sources: Vec<String>,
        ingest: IngestStats,
        top_zones: usize,
        top_slots: usize,
    ) -> Self {
        TripReport {
            generated_at: Utc::now(),
            sources,
            ingest,
            top_zones: analyzer.top_zones(top_zones),
            top_slots: analyzer.top_busy_slots(top_slots),
        }
    }
}

/// One row of the flat CSV layout.
#[derive(Serialize)]
struct CsvRow<'a> {
    kind: &'static str,
    zone: &'a str,
    hour: Option<u8>,
    count: u64,
}

/// Writes both rankings as aligned plain-text tables.
pub fn write_table<W: Write>(out: &mut W, report: &TripReport) -> Result<()> {
    let zone_width = report
        .top_zones
        .iter()
        .map(|z| z.zone.chars().count())
        .chain(report.top_slots.iter().map(|s| s.zone.chars().count()))
        .chain(std::iter::once("Zone".len()))
        .max()
        .unwrap_or(4);

    writeln!(out, "Top zones")?;
    writeln!(out, "{:<zone_width$}  {:>10}", "Zone", "Trips")?;
    for z in &report.top_zones {
        writeln!(out, "{:<zone_width$}  {:>10}", z.zone, z.count)?;
    }

    writeln!(out)?;
    writeln!(out, "Top busy slots")?;
    writeln!(out, "{:<zone_width$}  {:>4}  {:>10}", "Zone", "Hour", "Trips")?;
    for s in &report.top_slots {
        let hour = format!("{:02}", s.hour);
        writeln!(out, "{:<zone_width$}  {:>4}  {:>10}", s.zone, hour, s.count)?;
    }

    Ok(())
}

/// Writes the whole report as pretty-printed JSON.
pub fn write_json<W: Write>(out: &mut W, report: &TripReport) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, report)?;
    writeln!(out)?;
    Ok(())
}

/// Writes both rankings into one CSV with a `kind` discriminator column.
///
/// Zone rows leave `hour` empty.
pub fn write_csv<W: Write>(out: W, report: &TripReport) -> Result<()> {
    let mut writer = WriterBuilder::new().has_headers(true).from_writer(out);

    for z in &report.top_zones {
        writer.serialize(CsvRow {
            kind: "zone",
            zone: &z.zone,
            hour: None,
            count: z.count,
        })?;
    }
    for s in &report.top_slots {
        writer.serialize(CsvRow {
            kind: "slot",
            zone: &s.zone,
            hour: Some(s.hour),
            count: s.count,
        })?;
    }

    writer.flush()?;
    Ok(())
}

fn render<W: Write>(out: &mut W, format: ReportFormat, report: &TripReport) -> Result<()> {
    match format {
        ReportFormat::Table => write_table(out, report),
        ReportFormat::Json => write_json(out, report),
        ReportFormat::Csv => write_csv(out, report),
    }
}

/// Renders `report` to `path`, or to stdout when no path is given.
pub fn write_report(path: Option<&Path>, format: ReportFormat, report: &TripReport) -> Result<()> {
    debug!(?path, ?format, "Writing report");
    match path {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            let mut out = BufWriter::new(file);
            render(&mut out, format, report)?;
            out.flush()?;
        }
        None => {
            let stdout = io::stdout();
            let mut out = stdout.lock();
            render(&mut out, format, report)?;
            out.flush()?;
        }
    }
    Ok(())
}
